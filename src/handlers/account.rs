use axum::{
    extract::{Form, Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use rust_i18n::t;
use serde::Deserialize;

use crate::{
    extractors::{AuthGuard, IsHtmx, Locale},
    models::{Notice, NoticeQuery},
    names,
    rejections::{AppError, ResultExt},
    views, AppState,
};

use super::hx_redirect;
use crate::views::account as account_views;

/// Entries shown under "recent activity" on the profile page.
const RECENT_ACTIVITY: usize = 10;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::PROFILE_URL, get(profile_page))
        .route(names::SETTINGS_URL, get(settings_page))
        .route(names::SETTINGS_PROFILE_URL, post(rename_post))
        .route(names::SETTINGS_PASSWORD_URL, post(change_password_post))
}

async fn profile_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Result<maud::Markup, AppError> {
    let tally = state
        .db
        .user_tally(user.id)
        .await
        .reject("could not get attempt tally")?;
    let categories = state
        .db
        .category_stats(Some(user.id))
        .await
        .reject("could not get category stats")?;
    let activity = state
        .db
        .recent_activity(user.id, RECENT_ACTIVITY)
        .await
        .reject("could not get recent activity")?;
    let (_, completed) = state
        .db
        .student_exams(&user)
        .await
        .reject("could not get student exams")?;

    Ok(views::render(
        is_htmx,
        &t!("profile.title", locale = locale),
        account_views::profile_page(
            &user,
            account_views::ProfileData {
                tally: &tally,
                categories: &categories,
                activity: &activity,
                completed: &completed,
            },
            &locale,
        ),
        &locale,
        Some(&user),
    ))
}

async fn settings_page(
    AuthGuard(user): AuthGuard,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Query(notice): Query<NoticeQuery>,
) -> maud::Markup {
    views::render(
        is_htmx,
        &t!("settings.title", locale = locale),
        account_views::settings_page(
            &user,
            account_views::ProfileState::NoError,
            account_views::PasswordState::NoError,
            notice.notice(),
            &locale,
        ),
        &locale,
        Some(&user),
    )
}

#[derive(Deserialize)]
struct RenamePost {
    display_name: String,
}

async fn rename_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Form(body): Form<RenamePost>,
) -> Result<Response, AppError> {
    use crate::services::auth::RenameOutcome;

    let outcome = state
        .auth
        .update_display_name(user.id, &body.display_name)
        .await
        .reject("could not rename user")?;

    match outcome {
        // Full navigation so the sidebar picks up the new name.
        RenameOutcome::Success => hx_redirect(&Notice::ProfileUpdated.url(names::SETTINGS_URL)),
        RenameOutcome::EmptyName => Ok(views::titled(
            &t!("settings.title", locale = locale),
            account_views::settings_page(
                &user,
                account_views::ProfileState::EmptyName,
                account_views::PasswordState::NoError,
                None,
                &locale,
            ),
        )
        .into_response()),
    }
}

#[derive(Deserialize)]
struct ChangePasswordPost {
    current_password: String,
    new_password: String,
    confirm_password: String,
}

async fn change_password_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Form(body): Form<ChangePasswordPost>,
) -> Result<Response, AppError> {
    use crate::services::auth::ChangePasswordOutcome;

    let outcome = state
        .auth
        .change_password(
            user.id,
            &body.current_password,
            &body.new_password,
            &body.confirm_password,
        )
        .await
        .reject("could not change password")?;

    let pw_state = match outcome {
        ChangePasswordOutcome::Success => {
            return hx_redirect(&Notice::PasswordChanged.url(names::SETTINGS_URL));
        }
        ChangePasswordOutcome::EmptyFields => account_views::PasswordState::EmptyFields,
        ChangePasswordOutcome::Mismatch => account_views::PasswordState::Mismatch,
        ChangePasswordOutcome::WeakPassword => account_views::PasswordState::WeakPassword,
        ChangePasswordOutcome::IncorrectPassword => {
            account_views::PasswordState::IncorrectPassword
        }
    };

    Ok(views::titled(
        &t!("settings.title", locale = locale),
        account_views::settings_page(
            &user,
            account_views::ProfileState::NoError,
            pw_state,
            None,
            &locale,
        ),
    )
    .into_response())
}
