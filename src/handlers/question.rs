use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::Form;
use rust_i18n::t;

use crate::{
    db::Question,
    extractors::{IsHtmx, Locale, TeacherGuard},
    listing::ListQuery,
    models::{Notice, NoticeQuery, QuestionForm},
    names,
    rejections::{AppError, ResultExt},
    services::SubmitOutcome,
    views::{self, components::FormMode},
    AppState,
};

use super::hx_redirect;
use crate::views::question as question_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::QUESTIONS_URL, get(question_list))
        .route(
            names::CREATE_QUESTION_URL,
            get(create_page).post(create_post),
        )
        .route("/questoes/{id}", get(question_detail))
        .route("/questoes/{id}/editar", get(edit_page).post(edit_post))
        .route("/questoes/{id}/dashboard", get(question_stats))
        .route("/questoes/{id}/excluir", post(delete_post))
}

async fn find_question(state: &AppState, question_id: i32) -> Result<Question, AppError> {
    state
        .db
        .question(question_id)
        .await
        .reject("could not get question")?
        .ok_or(AppError::NotFound)
}

/// Distinct categories in use, for the filter bar.
fn categories(questions: &[Question]) -> Vec<String> {
    let mut categories: Vec<String> = questions.iter().map(|q| q.category.clone()).collect();
    categories.sort();
    categories.dedup();
    categories
}

async fn question_list(
    TeacherGuard(user): TeacherGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Query(query): Query<ListQuery>,
    Query(notice): Query<NoticeQuery>,
) -> Result<maud::Markup, AppError> {
    let questions = state.db.questions().await.reject("could not get questions")?;
    let usage = state
        .db
        .question_usage()
        .await
        .reject("could not get question usage")?;

    Ok(views::render(
        is_htmx,
        &t!("question.list_title", locale = locale),
        question_views::question_list(
            &query.apply(&questions),
            &usage,
            &categories(&questions),
            &query,
            notice.notice(),
            &locale,
        ),
        &locale,
        Some(&user),
    ))
}

async fn create_page(
    TeacherGuard(user): TeacherGuard,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> maud::Markup {
    views::render(
        is_htmx,
        &t!("question.create_title", locale = locale),
        question_views::question_form(FormMode::Create, &QuestionForm::blank(), None, &locale),
        &locale,
        Some(&user),
    )
}

async fn create_post(
    TeacherGuard(_): TeacherGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Form(form): Form<QuestionForm>,
) -> Result<Response, AppError> {
    let outcome = state
        .questions
        .create(&form)
        .await
        .reject("could not create question")?;

    match outcome {
        SubmitOutcome::Saved(_) => hx_redirect(&Notice::QuestionCreated.url(names::QUESTIONS_URL)),
        SubmitOutcome::Rejected(rejection) => Ok(views::titled(
            &t!("question.create_title", locale = locale),
            question_views::question_form(FormMode::Create, &form, Some(rejection), &locale),
        )
        .into_response()),
        SubmitOutcome::NotFound => Err(AppError::NotFound),
    }
}

async fn question_detail(
    TeacherGuard(user): TeacherGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path(question_id): Path<i32>,
) -> Result<maud::Markup, AppError> {
    let question = find_question(&state, question_id).await?;
    let usage = state
        .db
        .question_usage()
        .await
        .reject("could not get question usage")?
        .get(&question_id)
        .copied()
        .unwrap_or(0);

    Ok(views::render(
        is_htmx,
        &question.title,
        question_views::question_detail(&question, usage, &locale),
        &locale,
        Some(&user),
    ))
}

async fn edit_page(
    TeacherGuard(user): TeacherGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path(question_id): Path<i32>,
) -> Result<maud::Markup, AppError> {
    let question = find_question(&state, question_id).await?;

    Ok(views::render(
        is_htmx,
        &t!("question.edit_title", locale = locale),
        question_views::question_form(
            FormMode::Edit(question_id),
            &QuestionForm::from(&question),
            None,
            &locale,
        ),
        &locale,
        Some(&user),
    ))
}

async fn edit_post(
    TeacherGuard(_): TeacherGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(question_id): Path<i32>,
    Form(form): Form<QuestionForm>,
) -> Result<Response, AppError> {
    let outcome = state
        .questions
        .update(question_id, &form)
        .await
        .reject("could not update question")?;

    match outcome {
        SubmitOutcome::Saved(_) => hx_redirect(&Notice::QuestionUpdated.url(names::QUESTIONS_URL)),
        SubmitOutcome::Rejected(rejection) => Ok(views::titled(
            &t!("question.edit_title", locale = locale),
            question_views::question_form(
                FormMode::Edit(question_id),
                &form,
                Some(rejection),
                &locale,
            ),
        )
        .into_response()),
        SubmitOutcome::NotFound => Err(AppError::NotFound),
    }
}

async fn question_stats(
    TeacherGuard(user): TeacherGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path(question_id): Path<i32>,
) -> Result<maud::Markup, AppError> {
    let question = find_question(&state, question_id).await?;
    let stats = state
        .db
        .question_stats(question_id)
        .await
        .reject("could not get question stats")?
        .ok_or(AppError::NotFound)?;

    Ok(views::render(
        is_htmx,
        &t!("question.stats_title", locale = locale),
        question_views::question_stats(&question, &stats, &locale),
        &locale,
        Some(&user),
    ))
}

async fn delete_post(
    TeacherGuard(_): TeacherGuard,
    State(state): State<AppState>,
    Path(question_id): Path<i32>,
) -> Result<Response, AppError> {
    let deleted = state
        .questions
        .delete(question_id)
        .await
        .reject("could not delete question")?;

    if deleted {
        hx_redirect(&Notice::QuestionDeleted.url(names::QUESTIONS_URL))
    } else {
        Err(AppError::NotFound)
    }
}
