use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use rust_i18n::t;

use crate::{
    extractors::{IsHtmx, Locale, TeacherGuard},
    listing::ListQuery,
    names,
    rejections::{AppError, ResultExt},
    views, AppState,
};

use crate::views::dashboard as dashboard_views;

pub fn routes() -> Router<AppState> {
    Router::new().route(names::DASHBOARD_URL, get(dashboard))
}

async fn dashboard(
    TeacherGuard(user): TeacherGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Query(query): Query<ListQuery>,
) -> Result<maud::Markup, AppError> {
    let overview = dashboard_views::Overview {
        students: state.db.students().await.reject("could not get students")?.len(),
        questions: state.db.questions().await.reject("could not get questions")?.len(),
        exams: state.db.exam_summaries().await.reject("could not get exams")?.len(),
        tally: state.db.overall_tally().await.reject("could not get attempt tally")?,
    };
    let students = state
        .db
        .student_stats()
        .await
        .reject("could not get student stats")?;
    let categories = state
        .db
        .category_stats(None)
        .await
        .reject("could not get category stats")?;

    Ok(views::render(
        is_htmx,
        &t!("dashboard.title", locale = locale),
        dashboard_views::dashboard(
            &overview,
            &query.apply(&students),
            &categories,
            &query,
            &locale,
        ),
        &locale,
        Some(&user),
    ))
}
