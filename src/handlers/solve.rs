use axum::{
    extract::{Form, Query, State},
    routing::{get, post},
    Router,
};
use color_eyre::eyre::eyre;
use rust_i18n::t;
use serde::Deserialize;

use crate::{
    db::{Answer, AuthUser, Exam, Question, Role},
    extractors::{AuthGuard, IsHtmx, Locale},
    names,
    rejections::{AppError, ResultExt},
    views::{
        self,
        solve::{SolveContext, SolveOutcome},
    },
    AppState,
};

use crate::views::solve as solve_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::SOLVE_URL, get(solve_page))
        .route(names::SUBMIT_ANSWER_URL, post(submit_answer))
}

/// Multiple-choice questions in practice order, optionally limited to one
/// exam. Essay questions cannot be graded and are left out.
async fn practice_pool(
    state: &AppState,
    exam_id: Option<i32>,
) -> Result<(Vec<Question>, Option<Exam>), AppError> {
    let questions = state.db.questions().await.reject("could not get questions")?;
    let is_choice = |q: &Question| matches!(q.answer, Answer::MultipleChoice { .. });

    let Some(exam_id) = exam_id else {
        return Ok((questions.into_iter().filter(is_choice).collect(), None));
    };

    let exam = state
        .db
        .exam(exam_id)
        .await
        .reject("could not get exam")?
        .ok_or(AppError::NotFound)?;
    let pool = exam
        .question_ids
        .iter()
        .filter_map(|id| questions.iter().find(|q| q.id == *id))
        .filter(|q| is_choice(q))
        .cloned()
        .collect();

    Ok((pool, Some(exam)))
}

/// Position inside a pool of `len` questions; anything out of range restarts at 0.
fn practice_idx(idx: Option<usize>, len: usize) -> usize {
    idx.filter(|idx| *idx < len).unwrap_or(0)
}

#[derive(Deserialize)]
struct SolveQuery {
    #[serde(default)]
    idx: Option<usize>,
    #[serde(default)]
    prova: Option<i32>,
}

async fn solve_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Query(query): Query<SolveQuery>,
) -> Result<maud::Markup, AppError> {
    let (pool, exam) = practice_pool(&state, query.prova).await?;
    let idx = practice_idx(query.idx, pool.len());
    let tally = state
        .db
        .user_tally(user.id)
        .await
        .reject("could not get attempt tally")?;

    let context = SolveContext::Practice {
        idx,
        total: pool.len(),
        exam_id: query.prova,
        tally,
    };

    Ok(views::render(
        is_htmx,
        &t!("solve.title", locale = locale),
        solve_views::solve_page(pool.get(idx), &context, exam.as_ref(), &locale),
        &locale,
        Some(&user),
    ))
}

#[derive(Deserialize)]
struct AnswerPost {
    question_id: i32,
    #[serde(default)]
    idx: Option<usize>,
    #[serde(default)]
    prova: Option<i32>,
    #[serde(default)]
    option: Option<usize>,
}

/// Grades the answer. Student answers are recorded; teacher answers (from
/// the question preview) are only checked.
async fn grade(
    state: &AppState,
    user: &AuthUser,
    question: &Question,
    option: usize,
) -> Result<bool, AppError> {
    let correct = match user.role {
        Role::Aluno => state
            .db
            .record_attempt(user.id, question.id, option)
            .await
            .reject("could not record attempt")?
            .map(|attempt| attempt.correct),
        Role::Professor => question.answer.grade(option),
    };

    correct
        .ok_or_else(|| eyre!("option {option} out of range for question {}", question.id))
        .reject_input("option out of range")
}

/// Returns the card alone; the form swaps it in place.
async fn submit_answer(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Form(body): Form<AnswerPost>,
) -> Result<maud::Markup, AppError> {
    let question = state
        .db
        .question(body.question_id)
        .await
        .reject("could not get question")?
        .ok_or(AppError::NotFound)?;

    let outcome = match body.option {
        None => SolveOutcome::NoChoice,
        Some(chosen) => SolveOutcome::Answered {
            chosen,
            correct: grade(&state, &user, &question, chosen).await?,
        },
    };

    let context = match body.idx {
        Some(idx) => {
            let (pool, _) = practice_pool(&state, body.prova).await?;
            let idx = practice_idx(Some(idx), pool.len());
            let tally = state
                .db
                .user_tally(user.id)
                .await
                .reject("could not get attempt tally")?;
            SolveContext::Practice {
                idx,
                total: pool.len(),
                exam_id: body.prova,
                tally,
            }
        }
        None => SolveContext::Preview,
    };

    Ok(solve_views::solve_card(&question, &context, Some(&outcome), &locale))
}
