use std::path::Path;

use axum::{
    extract,
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use include_dir::{include_dir, Dir};

use crate::{rejections::AppError, AppState};

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static");
const STATIC_CACHE_CONTROL: &str = "max-age=3600, must-revalidate";

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("css") => "text/css",
        Some("svg") => "image/svg+xml",
        Some("js") => "text/javascript",
        _ => "application/octet-stream",
    }
}

async fn send_file(extract::Path(path): extract::Path<String>) -> Result<Response, AppError> {
    let file = STATIC_DIR.get_file(&path).ok_or(AppError::NotFound)?;

    Ok((
        [
            (CONTENT_TYPE, content_type(file.path())),
            (CACHE_CONTROL, STATIC_CACHE_CONTROL),
        ],
        file.contents(),
    )
        .into_response())
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/{*path}", get(send_file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_is_embedded() {
        let file = STATIC_DIR.get_file("index.css").unwrap();
        assert_eq!(content_type(file.path()), "text/css");
    }

    #[test]
    fn unknown_extension_is_binary() {
        assert_eq!(content_type(Path::new("a.bin")), "application/octet-stream");
    }
}
