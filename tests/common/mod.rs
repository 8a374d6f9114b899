#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use questlab::{db::Db, names, router, services::Latency, AppState};
use tower::ServiceExt;

pub const TEACHER_ID: i32 = 101;
pub const STUDENT_ID: i32 = 102;

pub fn seeded_db() -> Db {
    Db::new().expect("failed to seed database")
}

pub fn app_with(db: Db, latency: Latency) -> Router {
    router(AppState::new(db, false, latency))
}

pub fn app(db: Db) -> Router {
    app_with(db, Latency::default())
}

/// `Cookie` header value carrying a fresh session for `user_id`.
pub async fn session_cookie(db: &Db, user_id: i32) -> String {
    let token = db
        .create_user_session(user_id)
        .await
        .expect("create session");
    format!("{}={}", names::USER_SESSION_COOKIE_NAME, token)
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut req = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        req = req.header("cookie", cookie);
    }
    req.body(Body::empty()).expect("request build should succeed")
}

/// htmx-style form post. `body` must already be url-encoded.
pub fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("HX-Request", "true")
        .header("content-type", "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        req = req.header("cookie", cookie);
    }
    req.body(Body::from(body.to_string()))
        .expect("request build should succeed")
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.expect("router should respond")
}

pub async fn body_text(resp: Response<Body>) -> String {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub fn header<'a>(resp: &'a Response<Body>, name: &str) -> Option<&'a str> {
    resp.headers().get(name).and_then(|v| v.to_str().ok())
}
