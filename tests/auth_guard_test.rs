mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use common::{body_text, get, header, post_form, send};

#[tokio::test]
async fn protected_routes_redirect_to_login_without_session() {
    let app = common::app(common::seeded_db());

    for uri in [
        "/dashboard",
        "/questoes",
        "/questoes/1",
        "/questoes/criar",
        "/prova",
        "/prova/1",
        "/prova/1/resultados",
        "/resolucao",
        "/profile",
        "/settings",
    ] {
        let resp = send(&app, get(uri, None)).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "status for {uri}");
        assert_eq!(header(&resp, "location"), Some("/login"), "location for {uri}");
    }
}

#[tokio::test]
async fn htmx_requests_get_hx_redirect_instead_of_303() {
    let app = common::app(common::seeded_db());

    let req = Request::builder()
        .uri("/questoes")
        .header("HX-Request", "true")
        .body(Body::empty())
        .unwrap();
    let resp = send(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "HX-Redirect"), Some("/login"));
    assert!(body_text(resp).await.is_empty());
}

#[tokio::test]
async fn student_is_turned_away_from_teacher_pages() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::STUDENT_ID).await;
    let app = common::app(db);

    for uri in [
        "/dashboard",
        "/questoes",
        "/questoes/1/dashboard",
        "/prova/criar",
        "/prova/1/editar",
        "/prova/1/resultados",
    ] {
        let resp = send(&app, get(uri, Some(&cookie))).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "status for {uri}");
        assert_eq!(header(&resp, "location"), Some("/prova"), "location for {uri}");
    }
}

#[tokio::test]
async fn student_cannot_delete_questions() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::STUDENT_ID).await;
    let app = common::app(db.clone());

    let resp = send(&app, post_form("/questoes/1/excluir", Some(&cookie), "")).await;

    assert_eq!(header(&resp, "HX-Redirect"), Some("/prova"));
    assert!(db.question(1).await.unwrap().is_some());
}

#[tokio::test]
async fn teacher_reaches_teacher_pages() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db);

    for uri in ["/dashboard", "/questoes", "/questoes/1", "/prova", "/prova/1/resultados"] {
        let resp = send(&app, get(uri, Some(&cookie))).await;
        assert_eq!(resp.status(), StatusCode::OK, "status for {uri}");
    }
}

#[tokio::test]
async fn sidebar_matches_role() {
    let db = common::seeded_db();
    let student = common::session_cookie(&db, common::STUDENT_ID).await;
    let teacher = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db);

    let page = body_text(send(&app, get("/settings", Some(&student))).await).await;
    assert!(page.contains(r#"href="/resolucao""#));
    assert!(page.contains(r#"href="/profile""#));
    assert!(!page.contains(r#"href="/questoes""#));
    assert!(!page.contains(r#"href="/dashboard""#));

    let page = body_text(send(&app, get("/settings", Some(&teacher))).await).await;
    assert!(page.contains(r#"href="/questoes""#));
    assert!(page.contains(r#"href="/dashboard""#));
    assert!(!page.contains(r#"href="/resolucao""#));
}

#[tokio::test]
async fn state_changing_requests_need_hx_request_header() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db.clone());

    let req = Request::builder()
        .method(Method::POST)
        .uri("/questoes/1/excluir")
        .header("cookie", &cookie)
        .body(Body::empty())
        .unwrap();
    let resp = send(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(db.question(1).await.unwrap().is_some());
}

#[tokio::test]
async fn login_sets_cookie_and_sends_teacher_to_dashboard() {
    let app = common::app(common::seeded_db());

    let resp = send(
        &app,
        post_form(
            "/login",
            None,
            "email=professor%40example.com&password=password",
        ),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "HX-Redirect"), Some("/dashboard"));
    let cookie = header(&resp, "set-cookie").unwrap();
    assert!(cookie.starts_with("user_session="));
}

#[tokio::test]
async fn wrong_password_stays_on_login_form() {
    let app = common::app(common::seeded_db());

    let resp = send(
        &app,
        post_form("/login", None, "email=aluno%40example.com&password=nope"),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(header(&resp, "HX-Redirect").is_none());
    assert!(header(&resp, "set-cookie").is_none());
    assert!(body_text(resp).await.contains("E-mail ou senha incorretos."));
}

#[tokio::test]
async fn logout_ends_the_session() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::STUDENT_ID).await;
    let app = common::app(db);

    let resp = send(&app, post_form("/logout", Some(&cookie), "")).await;
    assert_eq!(header(&resp, "HX-Redirect"), Some("/login"));

    let resp = send(&app, get("/prova", Some(&cookie))).await;
    assert_eq!(header(&resp, "location"), Some("/login"));
}

#[tokio::test]
async fn signed_in_root_goes_to_role_home() {
    let db = common::seeded_db();
    let student = common::session_cookie(&db, common::STUDENT_ID).await;
    let teacher = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db);

    let resp = send(&app, get("/", Some(&student))).await;
    assert_eq!(header(&resp, "location"), Some("/prova"));

    let resp = send(&app, get("/", Some(&teacher))).await;
    assert_eq!(header(&resp, "location"), Some("/dashboard"));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = common::app(common::seeded_db());

    let resp = send(&app, get("/nao-existe", None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn locale_cookie_switches_language() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::STUDENT_ID).await;
    let app = common::app(db);

    let english = format!("{cookie}; lang=en");
    let page = body_text(send(&app, get("/settings", Some(&english))).await).await;
    assert!(page.contains("Change password"));

    let page = body_text(send(&app, get("/settings", Some(&cookie))).await).await;
    assert!(page.contains("Alterar senha"));
}
