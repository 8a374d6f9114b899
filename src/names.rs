pub const LOGIN_URL: &str = "/login";
pub const REGISTER_URL: &str = "/register";
pub const LOGOUT_URL: &str = "/logout";
pub const DASHBOARD_URL: &str = "/dashboard";
pub const PROFILE_URL: &str = "/profile";
pub const SETTINGS_URL: &str = "/settings";
pub const SETTINGS_PROFILE_URL: &str = "/settings/perfil";
pub const SETTINGS_PASSWORD_URL: &str = "/settings/senha";

pub const QUESTIONS_URL: &str = "/questoes";
pub const CREATE_QUESTION_URL: &str = "/questoes/criar";

pub const EXAMS_URL: &str = "/prova";
pub const CREATE_EXAM_URL: &str = "/prova/criar";

pub const SOLVE_URL: &str = "/resolucao";
pub const SUBMIT_ANSWER_URL: &str = "/resolucao/responder";

pub fn question_url(id: i32) -> String {
    format!("/questoes/{id}")
}

pub fn edit_question_url(id: i32) -> String {
    format!("/questoes/{id}/editar")
}

pub fn question_stats_url(id: i32) -> String {
    format!("/questoes/{id}/dashboard")
}

pub fn delete_question_url(id: i32) -> String {
    format!("/questoes/{id}/excluir")
}

pub fn exam_url(id: i32) -> String {
    format!("/prova/{id}")
}

pub fn edit_exam_url(id: i32) -> String {
    format!("/prova/{id}/editar")
}

pub fn exam_results_url(id: i32) -> String {
    format!("/prova/{id}/resultados")
}

pub fn export_results_url(id: i32) -> String {
    format!("/prova/{id}/resultados/exportar")
}

pub fn print_results_url(id: i32) -> String {
    format!("/prova/{id}/resultados/imprimir")
}

pub fn delete_exam_url(id: i32) -> String {
    format!("/prova/{id}/excluir")
}

/// Solve page restricted to one exam's questions.
pub fn solve_exam_url(exam_id: i32) -> String {
    format!("{SOLVE_URL}?prova={exam_id}")
}

/// List page showing a flash notice after a successful submission.
pub fn with_notice(url: &str, notice: &str) -> String {
    format!("{url}?notice={notice}")
}

pub const USER_SESSION_COOKIE_NAME: &str = "user_session";

// Exam form limits
pub const MIN_EXAM_DURATION: u32 = 10;
pub const MAX_EXAM_DURATION: u32 = 240;
pub const DEFAULT_EXAM_DURATION: u32 = 60;

/// Exam subjects, also offered as question categories.
pub const SUBJECTS: &[&str] = &[
    "Matemática",
    "Português",
    "Ciências",
    "História",
    "Geografia",
    "Física",
    "Química",
    "Biologia",
    "Inglês",
];

pub const MIN_OPTIONS: usize = 2;
pub const DEFAULT_OPTION_COUNT: usize = 4;

// i18n
pub const LOCALE_COOKIE_NAME: &str = "lang";
pub const DEFAULT_LOCALE: &str = "pt-BR";
pub const SUPPORTED_LOCALES: &[&str] = &["pt-BR", "en"];
pub const SET_LOCALE_URL: &str = "/set-locale";
