mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{body_text, get, header, post_form, send};
use questlab::services::Latency;

const COMPLETE_QUESTION: &str = "title=Soma&category=Matem%C3%A1tica&difficulty=F%C3%A1cil\
    &prompt=Quanto+%C3%A9+2%2B2%3F&kind=multiple-choice\
    &options=3&options=4&options=5&correct_option=1&expected_answer=&explanation=";

const COMPLETE_EXAM: &str = "title=Simulado+Final&subject=Matem%C3%A1tica&description=\
    &duration=90&due_date=2024-07-01&classes=6&classes=7&questions=1&questions=7";

#[tokio::test]
async fn question_with_missing_title_is_rejected_inline() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db.clone());
    let before = db.questions().await.unwrap().len();

    let body = COMPLETE_QUESTION.replace("title=Soma", "title=");
    let resp = send(&app, post_form("/questoes/criar", Some(&cookie), &body)).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(header(&resp, "HX-Redirect").is_none());
    let page = body_text(resp).await;
    assert!(page.contains("Preencha título, categoria, dificuldade e enunciado."));
    // Entered values survive the round trip.
    assert!(page.contains(r#"value="4""#));
    assert_eq!(db.questions().await.unwrap().len(), before);
}

#[tokio::test]
async fn blank_option_is_rejected() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db);

    let body = COMPLETE_QUESTION.replace("options=5", "options=+");
    let resp = send(&app, post_form("/questoes/criar", Some(&cookie), &body)).await;

    assert!(header(&resp, "HX-Redirect").is_none());
    assert!(body_text(resp).await.contains("Preencha todas as alternativas"));
}

#[tokio::test]
async fn complete_question_redirects_to_list_with_notice() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db.clone());
    let before = db.questions().await.unwrap().len();

    let resp = send(
        &app,
        post_form("/questoes/criar", Some(&cookie), COMPLETE_QUESTION),
    )
    .await;

    assert_eq!(
        header(&resp, "HX-Redirect"),
        Some("/questoes?notice=question-created")
    );
    let questions = db.questions().await.unwrap();
    assert_eq!(questions.len(), before + 1);
    assert!(questions.iter().any(|q| q.title == "Soma"));

    let page = body_text(
        send(&app, get("/questoes?notice=question-created", Some(&cookie))).await,
    )
    .await;
    assert!(page.contains("Questão criada com sucesso!"));
}

#[tokio::test]
async fn editing_a_question_prefills_and_updates() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db.clone());

    let page = body_text(send(&app, get("/questoes/1/editar", Some(&cookie))).await).await;
    assert!(page.contains("Equação do segundo grau"));

    let resp = send(
        &app,
        post_form("/questoes/1/editar", Some(&cookie), COMPLETE_QUESTION),
    )
    .await;
    assert_eq!(
        header(&resp, "HX-Redirect"),
        Some("/questoes?notice=question-updated")
    );
    assert_eq!(db.question(1).await.unwrap().unwrap().title, "Soma");
}

#[tokio::test]
async fn deleting_a_question_removes_exactly_one() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db.clone());
    let before: Vec<i32> = db.questions().await.unwrap().iter().map(|q| q.id).collect();

    let resp = send(&app, post_form("/questoes/2/excluir", Some(&cookie), "")).await;
    assert_eq!(
        header(&resp, "HX-Redirect"),
        Some("/questoes?notice=question-deleted")
    );

    let after: Vec<i32> = db.questions().await.unwrap().iter().map(|q| q.id).collect();
    let expected: Vec<i32> = before.into_iter().filter(|id| *id != 2).collect();
    assert_eq!(after, expected);

    let resp = send(&app, post_form("/questoes/2/excluir", Some(&cookie), "")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn exam_with_short_duration_is_rejected() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db.clone());

    let body = COMPLETE_EXAM.replace("duration=90", "duration=5");
    let resp = send(&app, post_form("/prova/criar", Some(&cookie), &body)).await;

    assert!(header(&resp, "HX-Redirect").is_none());
    assert!(body_text(resp).await.contains("entre 10 e 240 minutos"));
    assert_eq!(db.exam_summaries().await.unwrap().len(), 5);
}

#[tokio::test]
async fn exam_without_classes_is_rejected() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db);

    let body = COMPLETE_EXAM.replace("&classes=6&classes=7", "");
    let resp = send(&app, post_form("/prova/criar", Some(&cookie), &body)).await;

    assert!(header(&resp, "HX-Redirect").is_none());
    assert!(body_text(resp)
        .await
        .contains("selecione ao menos uma turma e uma questão"));
}

#[tokio::test]
async fn complete_exam_is_created() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db.clone());

    let resp = send(&app, post_form("/prova/criar", Some(&cookie), COMPLETE_EXAM)).await;

    assert_eq!(header(&resp, "HX-Redirect"), Some("/prova?notice=exam-created"));
    let exams = db.exam_summaries().await.unwrap();
    let created = exams
        .iter()
        .find(|s| s.exam.title == "Simulado Final")
        .unwrap();
    assert_eq!(created.exam.class_ids, vec![6, 7]);
    assert_eq!(created.exam.question_ids, vec![1, 7]);
}

#[tokio::test]
async fn export_only_shows_a_notice() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db);

    let resp = send(
        &app,
        post_form("/prova/1/resultados/exportar", Some(&cookie), ""),
    )
    .await;
    assert_eq!(
        header(&resp, "HX-Redirect"),
        Some("/prova/1/resultados?notice=export-started")
    );
}

#[tokio::test]
async fn question_list_filters_by_difficulty() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db);

    let page = body_text(
        send(&app, get("/questoes?difficulty=M%C3%A9dio", Some(&cookie))).await,
    )
    .await;
    assert!(page.contains("Equação do segundo grau"));
    assert!(!page.contains(r#"class="badge badge-easy""#));
}

#[tokio::test(start_paused = true)]
async fn dropped_submission_never_writes() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app_with(db.clone(), Latency::from_millis(1000));
    let before = db.questions().await.unwrap().len();

    let pending = send(
        &app,
        post_form("/questoes/criar", Some(&cookie), COMPLETE_QUESTION),
    );
    let timed_out = tokio::time::timeout(Duration::from_millis(500), pending).await;

    assert!(timed_out.is_err());
    assert_eq!(db.questions().await.unwrap().len(), before);
}

#[tokio::test(start_paused = true)]
async fn accepted_submission_waits_for_latency() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app_with(db.clone(), Latency::from_millis(1000));

    let started = tokio::time::Instant::now();
    let resp = send(
        &app,
        post_form("/questoes/criar", Some(&cookie), COMPLETE_QUESTION),
    )
    .await;

    assert!(started.elapsed() >= Duration::from_millis(1000));
    assert!(header(&resp, "HX-Redirect").is_some());
}

#[tokio::test(start_paused = true)]
async fn rejected_submission_skips_latency() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app_with(db, Latency::from_millis(1000));

    let started = tokio::time::Instant::now();
    let body = COMPLETE_QUESTION.replace("title=Soma", "title=");
    send(&app, post_form("/questoes/criar", Some(&cookie), &body)).await;

    assert!(started.elapsed() < Duration::from_millis(1000));
}

#[tokio::test]
async fn answering_records_attempt_and_shows_feedback() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::STUDENT_ID).await;
    let app = common::app(db.clone());
    let before = db.user_tally(common::STUDENT_ID).await.unwrap();

    let resp = send(
        &app,
        post_form(
            "/resolucao/responder",
            Some(&cookie),
            "question_id=1&idx=0&option=0",
        ),
    )
    .await;

    let card = body_text(resp).await;
    assert!(card.contains("Resposta correta!"));
    assert!(card.contains("Bhaskara"));
    let after = db.user_tally(common::STUDENT_ID).await.unwrap();
    assert_eq!(after.answered, before.answered + 1);
    assert_eq!(after.correct, before.correct + 1);
}

#[tokio::test]
async fn answering_without_choice_asks_for_one() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::STUDENT_ID).await;
    let app = common::app(db.clone());
    let before = db.user_tally(common::STUDENT_ID).await.unwrap();

    let resp = send(
        &app,
        post_form("/resolucao/responder", Some(&cookie), "question_id=1&idx=0"),
    )
    .await;

    assert!(body_text(resp).await.contains("Selecione uma alternativa."));
    assert_eq!(db.user_tally(common::STUDENT_ID).await.unwrap(), before);
}

#[tokio::test]
async fn teacher_preview_is_not_recorded() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db.clone());
    let before = db.overall_tally().await.unwrap();

    let resp = send(
        &app,
        post_form("/resolucao/responder", Some(&cookie), "question_id=1&option=2"),
    )
    .await;

    assert!(body_text(resp).await.contains("Resposta incorreta."));
    assert_eq!(db.overall_tally().await.unwrap(), before);
}

#[tokio::test]
async fn password_confirmation_must_match() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::STUDENT_ID).await;
    let app = common::app(db);

    let resp = send(
        &app,
        post_form(
            "/settings/senha",
            Some(&cookie),
            "current_password=password&new_password=longenough1&confirm_password=longenough2",
        ),
    )
    .await;

    assert!(header(&resp, "HX-Redirect").is_none());
    assert!(body_text(resp).await.contains("As senhas não coincidem."));
}

#[tokio::test]
async fn rename_updates_the_sidebar() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::STUDENT_ID).await;
    let app = common::app(db);

    let resp = send(
        &app,
        post_form("/settings/perfil", Some(&cookie), "display_name=Jo%C3%A3o+P."),
    )
    .await;
    assert_eq!(
        header(&resp, "HX-Redirect"),
        Some("/settings?notice=profile-updated")
    );

    let page = body_text(send(&app, get("/settings", Some(&cookie))).await).await;
    assert!(page.contains("João P."));
}

#[tokio::test]
async fn posted_position_outside_the_pool_restarts_at_first() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::STUDENT_ID).await;
    let app = common::app(db);

    for idx in ["50", "18446744073709551615"] {
        let body = format!("question_id=1&option=0&idx={idx}");
        let resp = send(&app, post_form("/resolucao/responder", Some(&cookie), &body)).await;

        assert_eq!(resp.status(), StatusCode::OK, "status for idx={idx}");
        let card = body_text(resp).await;
        assert!(card.contains("Questão 1 de"), "position for idx={idx}");
        assert!(card.contains("/resolucao?idx=1"), "next link for idx={idx}");
    }
}

#[tokio::test]
async fn answer_option_out_of_range_is_bad_request() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::STUDENT_ID).await;
    let app = common::app(db.clone());
    let before = db.user_tally(common::STUDENT_ID).await.unwrap();

    let resp = send(
        &app,
        post_form("/resolucao/responder", Some(&cookie), "question_id=1&option=9&idx=0"),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(db.user_tally(common::STUDENT_ID).await.unwrap(), before);
}

#[tokio::test]
async fn print_only_shows_a_notice() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db);

    let page = body_text(send(&app, get("/prova/1/resultados", Some(&cookie))).await).await;
    assert!(page.contains(r#"hx-post="/prova/1/resultados/imprimir""#));
    assert!(!page.contains("window.print"));

    let resp = send(
        &app,
        post_form("/prova/1/resultados/imprimir", Some(&cookie), ""),
    )
    .await;
    assert_eq!(
        header(&resp, "HX-Redirect"),
        Some("/prova/1/resultados?notice=print-started")
    );

    let page = body_text(
        send(&app, get("/prova/1/resultados?notice=print-started", Some(&cookie))).await,
    )
    .await;
    assert!(page.contains("Os resultados foram enviados para impressão."));
}

#[tokio::test]
async fn question_list_filters_by_kind() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db.clone());
    let essay = db.question(6).await.unwrap().unwrap();

    let page = body_text(send(&app, get("/questoes?kind=essay", Some(&cookie))).await).await;
    assert!(page.contains(&essay.title));
    assert!(!page.contains("Equação do segundo grau"));
}

#[tokio::test]
async fn editing_an_exam_with_short_duration_is_rejected() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db.clone());
    let before = db.exam(1).await.unwrap().unwrap();

    let body = COMPLETE_EXAM.replace("duration=90", "duration=500");
    let resp = send(&app, post_form("/prova/1/editar", Some(&cookie), &body)).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(header(&resp, "HX-Redirect").is_none());
    assert!(body_text(resp).await.contains("entre 10 e 240 minutos"));
    assert_eq!(db.exam(1).await.unwrap().unwrap().title, before.title);
}

#[tokio::test]
async fn editing_an_exam_updates_and_redirects() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db.clone());

    let resp = send(&app, post_form("/prova/1/editar", Some(&cookie), COMPLETE_EXAM)).await;

    assert_eq!(header(&resp, "HX-Redirect"), Some("/prova?notice=exam-updated"));
    let exam = db.exam(1).await.unwrap().unwrap();
    assert_eq!(exam.title, "Simulado Final");
    assert_eq!(exam.duration_minutes, 90);
}

#[tokio::test]
async fn deleting_an_exam_removes_exactly_one() {
    let db = common::seeded_db();
    let cookie = common::session_cookie(&db, common::TEACHER_ID).await;
    let app = common::app(db.clone());
    let before: Vec<i32> = db
        .exam_summaries()
        .await
        .unwrap()
        .iter()
        .map(|s| s.exam.id)
        .collect();

    let resp = send(&app, post_form("/prova/3/excluir", Some(&cookie), "")).await;
    assert_eq!(header(&resp, "HX-Redirect"), Some("/prova?notice=exam-deleted"));

    let after: Vec<i32> = db
        .exam_summaries()
        .await
        .unwrap()
        .iter()
        .map(|s| s.exam.id)
        .collect();
    let expected: Vec<i32> = before.into_iter().filter(|id| *id != 3).collect();
    assert_eq!(after, expected);

    let resp = send(&app, post_form("/prova/3/excluir", Some(&cookie), "")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
