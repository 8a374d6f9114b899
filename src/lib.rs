rust_i18n::i18n!("locales", fallback = "pt-BR");

pub mod db;
pub mod extractors;
pub mod handlers;
pub mod listing;
pub mod models;
pub mod names;
pub mod navigation;
pub mod rejections;
pub mod services;
pub mod statics;
pub mod utils;
pub mod views;

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use services::{auth::AuthService, exam::ExamService, question::QuestionService, Latency};

#[derive(Clone)]
pub struct AppState {
    pub db: db::Db,
    pub auth: AuthService,
    pub questions: QuestionService,
    pub exams: ExamService,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(db: db::Db, secure_cookies: bool, latency: Latency) -> Self {
        Self {
            auth: AuthService::new(db.clone()),
            questions: QuestionService::new(db.clone(), latency),
            exams: ExamService::new(db.clone(), latency),
            db,
            secure_cookies,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::homepage::routes())
        .merge(handlers::dashboard::routes())
        .merge(handlers::question::routes())
        .merge(handlers::exam::routes())
        .merge(handlers::solve::routes())
        .merge(handlers::account::routes())
        .layer(middleware::from_fn(csrf_check))
        .nest("/static", statics::routes())
        .fallback(rejections::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn csrf_check(
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    use axum::http::Method;
    use axum::response::IntoResponse;

    let state_changing = [Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

    if state_changing.contains(req.method()) {
        let has_hx_request = req
            .headers()
            .get("HX-Request")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "true");

        if !has_hx_request {
            tracing::warn!(path = %req.uri().path(), "request without HX-Request refused");
            return rejections::AppError::Forbidden.into_response();
        }
    }

    next.run(req).await
}
