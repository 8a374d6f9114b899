use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::{db::models::AuthUser, names, navigation, AppState};

/// Extracts whether the request is an HTMX request by checking the `HX-Request` header.
pub struct IsHtmx(pub bool);

impl<S: Send + Sync> FromRequestParts<S> for IsHtmx {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let is_htmx = parts
            .headers
            .get("HX-Request")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "true");
        Ok(IsHtmx(is_htmx))
    }
}

/// Extracts the locale from the `lang` cookie, falling back to the browser's
/// `Accept-Language` header, then to `"pt-BR"`.
pub struct Locale(pub String);

impl<S: Send + Sync> FromRequestParts<S> for Locale {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let locale = jar
            .get(names::LOCALE_COOKIE_NAME)
            .and_then(|c| match_supported_locale(c.value()))
            .or_else(|| {
                parts
                    .headers
                    .get(header::ACCEPT_LANGUAGE)
                    .and_then(|v| v.to_str().ok())
                    .and_then(locale_from_accept_language)
            })
            .unwrap_or(names::DEFAULT_LOCALE);
        Ok(Locale(locale.to_string()))
    }
}

/// Match a language tag against supported locales, returning the locale string.
pub fn match_supported_locale(lang: &str) -> Option<&'static str> {
    let lang = lang.trim();
    if lang.eq_ignore_ascii_case("en") || lang.to_ascii_lowercase().starts_with("en-") {
        return Some("en");
    }
    if lang.eq_ignore_ascii_case("pt") || lang.to_ascii_lowercase().starts_with("pt-") {
        return Some("pt-BR");
    }
    None
}

/// Parse an `Accept-Language` header and return the best matching supported locale.
fn locale_from_accept_language(header: &str) -> Option<&'static str> {
    let mut entries: Vec<(&str, f32)> = header
        .split(',')
        .map(|entry| {
            let entry = entry.trim();
            if let Some((lang, params)) = entry.split_once(';') {
                let q = params
                    .split(';')
                    .find_map(|p| p.trim().strip_prefix("q="))
                    .and_then(|v| v.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);
                (lang.trim(), q)
            } else {
                (entry, 1.0)
            }
        })
        .collect();
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    entries
        .iter()
        .find_map(|(lang, _)| match_supported_locale(lang))
}

/// Where a guard sends a request it turned away. Plain requests get a 303,
/// htmx requests an `HX-Redirect` so the whole page navigates.
#[derive(Debug)]
pub struct GuardRedirect {
    pub to: &'static str,
    pub is_htmx: bool,
}

impl GuardRedirect {
    fn new(parts: &Parts, to: &'static str) -> Self {
        let is_htmx = parts
            .headers
            .get("HX-Request")
            .is_some_and(|v| v.as_bytes() == b"true");
        Self { to, is_htmx }
    }
}

impl IntoResponse for GuardRedirect {
    fn into_response(self) -> Response {
        let location = HeaderValue::from_static(self.to);
        if self.is_htmx {
            (StatusCode::OK, [("HX-Redirect", location)]).into_response()
        } else {
            (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response()
        }
    }
}

/// The signed-in user, if any. Never rejects.
pub struct CurrentUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = jar.get(names::USER_SESSION_COOKIE_NAME) else {
            return Ok(CurrentUser(None));
        };

        match state.db.get_user_by_session(token.value()).await {
            Ok(user) => Ok(CurrentUser(user)),
            Err(e) => {
                tracing::error!("could not look up session: {e}");
                Ok(CurrentUser(None))
            }
        }
    }
}

/// Guard extractor that verifies the user session cookie against the session store.
/// Carries the authenticated user's info for use in handlers.
pub struct AuthGuard(pub AuthUser);

impl FromRequestParts<AppState> for AuthGuard {
    type Rejection = GuardRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = match CurrentUser::from_request_parts(parts, state).await {
            Ok(user) => user,
            Err(never) => match never {},
        };

        user.map(AuthGuard)
            .ok_or_else(|| GuardRedirect::new(parts, names::LOGIN_URL))
    }
}

/// Like [`AuthGuard`], but only lets teachers through. Students are sent to
/// their own landing page.
pub struct TeacherGuard(pub AuthUser);

impl FromRequestParts<AppState> for TeacherGuard {
    type Rejection = GuardRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthGuard(user) = AuthGuard::from_request_parts(parts, state).await?;

        if user.role.is_teacher() {
            Ok(TeacherGuard(user))
        } else {
            tracing::debug!(user_id = user.id, path = %parts.uri.path(), "teacher page refused");
            Err(GuardRedirect::new(parts, navigation::home_for(user.role)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portuguese_variants_map_to_pt_br() {
        assert_eq!(match_supported_locale("pt"), Some("pt-BR"));
        assert_eq!(match_supported_locale("pt-PT"), Some("pt-BR"));
        assert_eq!(match_supported_locale("pt-BR"), Some("pt-BR"));
    }

    #[test]
    fn unsupported_language_is_ignored() {
        assert_eq!(match_supported_locale("ja"), None);
        assert_eq!(match_supported_locale(""), None);
    }

    #[test]
    fn accept_language_honours_quality() {
        assert_eq!(
            locale_from_accept_language("en;q=0.4, pt-BR;q=0.9"),
            Some("pt-BR")
        );
        assert_eq!(locale_from_accept_language("fr, en-US;q=0.8"), Some("en"));
        assert_eq!(locale_from_accept_language("fr, de"), None);
    }

    #[test]
    fn htmx_guard_redirect_uses_header() {
        let resp = GuardRedirect {
            to: names::LOGIN_URL,
            is_htmx: true,
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["HX-Redirect"], names::LOGIN_URL);

        let resp = GuardRedirect {
            to: names::LOGIN_URL,
            is_htmx: false,
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], names::LOGIN_URL);
    }
}
