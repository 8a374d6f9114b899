use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::Form;
use rust_i18n::t;
use serde::Deserialize;

use crate::{
    db::{ExamSummary, Question},
    extractors::{AuthGuard, IsHtmx, Locale, TeacherGuard},
    listing::ListQuery,
    models::{ExamForm, Notice, NoticeQuery},
    names,
    rejections::{AppError, ResultExt},
    services::{exam::ExamRejection, SubmitOutcome},
    views::{self, components::FormMode},
    AppState,
};

use super::hx_redirect;
use crate::views::exam as exam_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::EXAMS_URL, get(exam_list))
        .route(names::CREATE_EXAM_URL, get(create_page).post(create_post))
        .route("/prova/{id}", get(exam_detail))
        .route("/prova/{id}/editar", get(edit_page).post(edit_post))
        .route("/prova/{id}/excluir", post(delete_post))
        .route("/prova/{id}/resultados", get(exam_results))
        .route("/prova/{id}/resultados/exportar", post(export_results))
        .route("/prova/{id}/resultados/imprimir", post(print_results))
}

async fn find_summary(state: &AppState, exam_id: i32) -> Result<ExamSummary, AppError> {
    state
        .db
        .exam_summary(exam_id)
        .await
        .reject("could not get exam")?
        .ok_or(AppError::NotFound)
}

#[derive(Deserialize)]
struct TabQuery {
    #[serde(default)]
    tab: Option<String>,
}

async fn exam_list(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Query(query): Query<ListQuery>,
    Query(notice): Query<NoticeQuery>,
    Query(tab): Query<TabQuery>,
) -> Result<maud::Markup, AppError> {
    let body = if user.role.is_teacher() {
        let exams = state
            .db
            .exam_summaries()
            .await
            .reject("could not get exams")?;
        exam_views::teacher_exam_list(&query.apply(&exams), &query, notice.notice(), &locale)
    } else {
        let (pending, completed) = state
            .db
            .student_exams(&user)
            .await
            .reject("could not get student exams")?;
        let completed: Vec<_> = completed
            .into_iter()
            .filter(|(summary, _)| query.matches(summary))
            .collect();
        exam_views::student_exam_list(
            &query.apply(&pending),
            &completed,
            exam_views::StudentTab::parse(tab.tab.as_deref()),
            &query,
            &locale,
        )
    };

    Ok(views::render(
        is_htmx,
        &t!("exam.list_title", locale = locale),
        body,
        &locale,
        Some(&user),
    ))
}

struct FormChoices {
    classes: Vec<crate::db::Class>,
    questions: Vec<Question>,
}

async fn form_choices(state: &AppState) -> Result<FormChoices, AppError> {
    Ok(FormChoices {
        classes: state.db.classes().await.reject("could not get classes")?,
        questions: state.db.questions().await.reject("could not get questions")?,
    })
}

fn render_form(
    mode: FormMode,
    form: &ExamForm,
    choices: &FormChoices,
    rejection: Option<ExamRejection>,
    locale: &str,
) -> maud::Markup {
    exam_views::exam_form(
        mode,
        form,
        &choices.classes,
        &choices.questions,
        rejection,
        locale,
    )
}

async fn create_page(
    TeacherGuard(user): TeacherGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Result<maud::Markup, AppError> {
    let choices = form_choices(&state).await?;

    Ok(views::render(
        is_htmx,
        &t!("exam.create_title", locale = locale),
        render_form(FormMode::Create, &ExamForm::blank(), &choices, None, &locale),
        &locale,
        Some(&user),
    ))
}

async fn create_post(
    TeacherGuard(_): TeacherGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Form(form): Form<ExamForm>,
) -> Result<Response, AppError> {
    let outcome = state
        .exams
        .create(&form)
        .await
        .reject("could not create exam")?;

    match outcome {
        SubmitOutcome::Saved(_) => hx_redirect(&Notice::ExamCreated.url(names::EXAMS_URL)),
        SubmitOutcome::Rejected(rejection) => {
            let choices = form_choices(&state).await?;
            Ok(views::titled(
                &t!("exam.create_title", locale = locale),
                render_form(FormMode::Create, &form, &choices, Some(rejection), &locale),
            )
            .into_response())
        }
        SubmitOutcome::NotFound => Err(AppError::NotFound),
    }
}

async fn exam_detail(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path(exam_id): Path<i32>,
) -> Result<maud::Markup, AppError> {
    let summary = find_summary(&state, exam_id).await?;
    let all_questions = state.db.questions().await.reject("could not get questions")?;
    // Ids of deleted questions are skipped.
    let questions: Vec<Question> = summary
        .exam
        .question_ids
        .iter()
        .filter_map(|id| all_questions.iter().find(|q| q.id == *id).cloned())
        .collect();

    Ok(views::render(
        is_htmx,
        &summary.exam.title,
        exam_views::exam_detail(&summary, &questions, user.role.is_teacher(), &locale),
        &locale,
        Some(&user),
    ))
}

async fn edit_page(
    TeacherGuard(user): TeacherGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path(exam_id): Path<i32>,
) -> Result<maud::Markup, AppError> {
    let exam = state
        .db
        .exam(exam_id)
        .await
        .reject("could not get exam")?
        .ok_or(AppError::NotFound)?;
    let choices = form_choices(&state).await?;

    Ok(views::render(
        is_htmx,
        &t!("exam.edit_title", locale = locale),
        render_form(
            FormMode::Edit(exam_id),
            &ExamForm::from(&exam),
            &choices,
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
    Path(exam_id): Path<i32>,
    Form(form): Form<ExamForm>,
) -> Result<Response, AppError> {
    let outcome = state
        .exams
        .update(exam_id, &form)
        .await
        .reject("could not update exam")?;

    match outcome {
        SubmitOutcome::Saved(_) => hx_redirect(&Notice::ExamUpdated.url(names::EXAMS_URL)),
        SubmitOutcome::Rejected(rejection) => {
            let choices = form_choices(&state).await?;
            Ok(views::titled(
                &t!("exam.edit_title", locale = locale),
                render_form(
                    FormMode::Edit(exam_id),
                    &form,
                    &choices,
                    Some(rejection),
                    &locale,
                ),
            )
            .into_response())
        }
        SubmitOutcome::NotFound => Err(AppError::NotFound),
    }
}

async fn delete_post(
    TeacherGuard(_): TeacherGuard,
    State(state): State<AppState>,
    Path(exam_id): Path<i32>,
) -> Result<Response, AppError> {
    let deleted = state
        .exams
        .delete(exam_id)
        .await
        .reject("could not delete exam")?;

    if deleted {
        hx_redirect(&Notice::ExamDeleted.url(names::EXAMS_URL))
    } else {
        Err(AppError::NotFound)
    }
}

async fn exam_results(
    TeacherGuard(user): TeacherGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path(exam_id): Path<i32>,
    Query(query): Query<ListQuery>,
    Query(notice): Query<NoticeQuery>,
) -> Result<maud::Markup, AppError> {
    let summary = find_summary(&state, exam_id).await?;
    let results = state
        .db
        .exam_results(exam_id)
        .await
        .reject("could not get exam results")?;

    let pass_rate = if results.is_empty() {
        None
    } else {
        let passed = results.iter().filter(|r| r.passed()).count();
        Some(passed as f64 * 100.0 / results.len() as f64)
    };
    let shown = query.apply(&results);

    Ok(views::render(
        is_htmx,
        &t!("results.title", locale = locale),
        exam_views::exam_results(
            exam_views::ResultsData {
                summary: &summary,
                results: &shown,
                total_results: results.len(),
                average: summary.average_score,
                pass_rate,
            },
            &query,
            notice.notice(),
            &locale,
        ),
        &locale,
        Some(&user),
    ))
}

/// No file is produced; the teacher only gets a confirmation notice.
async fn export_results(
    TeacherGuard(user): TeacherGuard,
    State(state): State<AppState>,
    Path(exam_id): Path<i32>,
) -> Result<Response, AppError> {
    find_summary(&state, exam_id).await?;
    tracing::info!(exam_id, user_id = user.id, "results export requested");

    hx_redirect(&Notice::ExportStarted.url(&names::exam_results_url(exam_id)))
}

/// Like export, printing only confirms with a notice.
async fn print_results(
    TeacherGuard(user): TeacherGuard,
    State(state): State<AppState>,
    Path(exam_id): Path<i32>,
) -> Result<Response, AppError> {
    find_summary(&state, exam_id).await?;
    tracing::info!(exam_id, user_id = user.id, "results print requested");

    hx_redirect(&Notice::PrintStarted.url(&names::exam_results_url(exam_id)))
}
