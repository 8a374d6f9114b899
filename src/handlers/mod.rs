pub mod account;
pub mod dashboard;
pub mod exam;
pub mod homepage;
pub mod question;
pub mod solve;

use axum::{
    http::HeaderValue,
    response::{IntoResponse, Response},
};

use crate::rejections::{AppError, ResultExt};

/// Tells htmx to navigate the whole page to `url`.
pub(crate) fn hx_redirect(url: &str) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(url).reject("could not build redirect header")?;
    Ok(([("HX-Redirect", location)], "").into_response())
}
