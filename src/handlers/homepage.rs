use axum::{
    extract::{Form, State},
    http::{
        header::{LOCATION, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::CookieJar;
use rust_i18n::t;
use serde::Deserialize;

use crate::{
    db::Role,
    extractors::{self, CurrentUser, IsHtmx, Locale},
    names, navigation,
    rejections::{AppError, ResultExt},
    utils, views, AppState,
};

use crate::views::homepage as homepage_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(homepage))
        .route(names::REGISTER_URL, get(register_page).post(register_post))
        .route(names::LOGIN_URL, get(login_page).post(login_post))
        .route(names::LOGOUT_URL, post(logout_post))
        .route(names::SET_LOCALE_URL, post(set_locale))
}

async fn homepage(
    CurrentUser(user): CurrentUser,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Response {
    if let Some(user) = user {
        let home = HeaderValue::from_static(navigation::home_for(user.role));
        return (StatusCode::SEE_OTHER, [(LOCATION, home)]).into_response();
    }

    views::render(
        is_htmx,
        "Quest Lab",
        homepage_views::landing_page(&locale),
        &locale,
        None,
    )
    .into_response()
}

async fn register_page(IsHtmx(is_htmx): IsHtmx, Locale(locale): Locale) -> maud::Markup {
    views::render(
        is_htmx,
        &t!("homepage.register_title", locale = locale),
        homepage_views::register(homepage_views::RegisterState::NoError, &locale),
        &locale,
        None,
    )
}

async fn login_page(IsHtmx(is_htmx): IsHtmx, Locale(locale): Locale) -> maud::Markup {
    views::render(
        is_htmx,
        &t!("homepage.login_title", locale = locale),
        homepage_views::login(homepage_views::LoginState::NoError, &locale),
        &locale,
        None,
    )
}

/// Session cookie plus a full-page navigation to the role's landing page.
fn signed_in(token: &str, role: Role, secure: bool) -> Result<Response, AppError> {
    let cookie = utils::cookie(names::USER_SESSION_COOKIE_NAME, token, secure)
        .reject("could not build session cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers.insert(
        "HX-Redirect",
        HeaderValue::from_static(navigation::home_for(role)),
    );
    Ok((headers, "").into_response())
}

#[derive(Deserialize)]
struct RegisterPost {
    email: String,
    display_name: String,
    password: String,
    #[serde(default)]
    role: Option<String>,
}

async fn register_post(
    State(state): State<AppState>,
    Locale(locale): Locale,
    Form(body): Form<RegisterPost>,
) -> Result<Response, AppError> {
    use crate::services::auth::RegisterOutcome;

    let role = Role::resolve(body.role.as_deref());
    let outcome = state
        .auth
        .register(&body.email, &body.password, &body.display_name, role)
        .await
        .reject("registration failed")?;

    let register_state = match outcome {
        RegisterOutcome::LoggedIn { token, role } => {
            return signed_in(&token, role, state.secure_cookies);
        }
        RegisterOutcome::EmptyFields => homepage_views::RegisterState::EmptyFields,
        RegisterOutcome::EmailTaken => homepage_views::RegisterState::EmailTaken,
        RegisterOutcome::WeakPassword => homepage_views::RegisterState::WeakPassword,
    };

    Ok(views::titled(
        &t!("homepage.register_title", locale = locale),
        homepage_views::register(register_state, &locale),
    )
    .into_response())
}

#[derive(Deserialize)]
struct LoginPost {
    email: String,
    password: String,
}

async fn login_post(
    State(state): State<AppState>,
    Locale(locale): Locale,
    Form(body): Form<LoginPost>,
) -> Result<Response, AppError> {
    use crate::services::auth::LoginOutcome;

    let outcome = state
        .auth
        .login(&body.email, &body.password)
        .await
        .reject("login failed")?;

    let login_state = match outcome {
        LoginOutcome::Success { token, role } => {
            return signed_in(&token, role, state.secure_cookies);
        }
        LoginOutcome::InvalidCredentials => homepage_views::LoginState::IncorrectPassword,
        LoginOutcome::EmptyFields => homepage_views::LoginState::EmptyFields,
    };

    Ok(views::titled(
        &t!("homepage.login_title", locale = locale),
        homepage_views::login(login_state, &locale),
    )
    .into_response())
}

async fn logout_post(
    jar: CookieJar,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(session_id) = jar
        .get(names::USER_SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
    {
        state
            .auth
            .logout(&session_id)
            .await
            .reject("could not end session")?;
    }

    let clear_user = utils::clear_cookie(names::USER_SESSION_COOKIE_NAME, state.secure_cookies)
        .reject("could not build clear-session cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, clear_user);
    headers.insert("HX-Redirect", HeaderValue::from_static(names::LOGIN_URL));

    Ok((headers, ""))
}

#[derive(Deserialize)]
struct SetLocaleBody {
    locale: String,
}

async fn set_locale(
    State(state): State<AppState>,
    Form(body): Form<SetLocaleBody>,
) -> Result<impl IntoResponse, AppError> {
    let locale =
        extractors::match_supported_locale(&body.locale).unwrap_or(names::DEFAULT_LOCALE);
    let cookie = utils::cookie(names::LOCALE_COOKIE_NAME, locale, state.secure_cookies)
        .reject("could not build locale cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers.insert("HX-Refresh", HeaderValue::from_static("true"));

    Ok((headers, ""))
}
