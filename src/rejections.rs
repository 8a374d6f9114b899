use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;
use rust_i18n::t;

use crate::{names, views};

#[derive(Debug)]
pub enum AppError {
    Internal(&'static str),
    Input(&'static str),
    NotFound,
    Forbidden,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR"),
            AppError::Input(_) => (StatusCode::BAD_REQUEST, "INPUT_ERROR"),
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        };

        (code, error_page(code, message)).into_response()
    }
}

pub trait ResultExt<T> {
    /// Logs the error and turns it into a 500.
    fn reject(self, msg: &'static str) -> Result<T, AppError>;
    /// Logs the error and turns it into a 400.
    fn reject_input(self, msg: &'static str) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn reject(self, msg: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{msg}: {e}");
            AppError::Internal(msg)
        })
    }

    fn reject_input(self, msg: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::warn!("{msg}: {e}");
            AppError::Input(msg)
        })
    }
}

/// Page served for unknown routes.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

fn error_page(code: StatusCode, message: &str) -> maud::Markup {
    let locale = names::DEFAULT_LOCALE;
    views::page(
        &t!("error.title", locale = locale),
        html! {
            section.error-page {
                h1 { (code.as_u16()) }
                p { code { (message) } }
                @if code == StatusCode::NOT_FOUND {
                    p { (t!("error.not_found", locale = locale)) }
                }
                a role="button" href="/" { (t!("error.back_home", locale = locale)) }
            }
        },
        locale,
    )
}
