use serde::Deserialize;

use crate::db::{Answer, Exam, Question};
use crate::names;

/// Question create/edit form as posted by the browser. Every field arrives
/// as text; `services::question::validate_question` turns it into a draft.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct QuestionForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_option: String,
    #[serde(default)]
    pub expected_answer: String,
    #[serde(default)]
    pub explanation: String,
}

impl QuestionForm {
    /// A blank form with the default number of empty option slots.
    pub fn blank() -> Self {
        Self {
            kind: "multiple-choice".to_string(),
            options: vec![String::new(); names::DEFAULT_OPTION_COUNT],
            correct_option: "0".to_string(),
            ..Self::default()
        }
    }

    pub fn is_essay(&self) -> bool {
        self.kind == "essay"
    }
}

impl From<&Question> for QuestionForm {
    fn from(question: &Question) -> Self {
        let (kind, options, correct_option, expected_answer) = match &question.answer {
            Answer::MultipleChoice { options, correct } => (
                "multiple-choice",
                options.clone(),
                correct.to_string(),
                String::new(),
            ),
            Answer::Essay { expected } => (
                "essay",
                vec![String::new(); names::DEFAULT_OPTION_COUNT],
                "0".to_string(),
                expected.clone(),
            ),
        };

        Self {
            title: question.title.clone(),
            category: question.category.clone(),
            difficulty: question.difficulty.label().to_string(),
            prompt: question.prompt.clone(),
            kind: kind.to_string(),
            options,
            correct_option,
            expected_answer,
            explanation: question.explanation.clone().unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExamForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub classes: Vec<i32>,
    #[serde(default)]
    pub questions: Vec<i32>,
}

impl ExamForm {
    pub fn blank() -> Self {
        Self {
            duration: names::DEFAULT_EXAM_DURATION.to_string(),
            ..Self::default()
        }
    }
}

impl From<&Exam> for ExamForm {
    fn from(exam: &Exam) -> Self {
        Self {
            title: exam.title.clone(),
            subject: exam.subject.clone(),
            description: exam.description.clone(),
            duration: exam.duration_minutes.to_string(),
            due_date: exam.due_date.format("%Y-%m-%d").to_string(),
            classes: exam.class_ids.clone(),
            questions: exam.question_ids.clone(),
        }
    }
}

/// One-shot message shown above a list after a redirect (`?notice=...`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    QuestionCreated,
    QuestionUpdated,
    QuestionDeleted,
    ExamCreated,
    ExamUpdated,
    ExamDeleted,
    ExportStarted,
    PrintStarted,
    ProfileUpdated,
    PasswordChanged,
}

impl Notice {
    const ALL: [Notice; 10] = [
        Notice::QuestionCreated,
        Notice::QuestionUpdated,
        Notice::QuestionDeleted,
        Notice::ExamCreated,
        Notice::ExamUpdated,
        Notice::ExamDeleted,
        Notice::ExportStarted,
        Notice::PrintStarted,
        Notice::ProfileUpdated,
        Notice::PasswordChanged,
    ];

    pub fn from_slug(slug: &str) -> Option<Notice> {
        Self::ALL.into_iter().find(|n| n.slug() == slug)
    }

    pub fn slug(self) -> &'static str {
        match self {
            Notice::QuestionCreated => "question-created",
            Notice::QuestionUpdated => "question-updated",
            Notice::QuestionDeleted => "question-deleted",
            Notice::ExamCreated => "exam-created",
            Notice::ExamUpdated => "exam-updated",
            Notice::ExamDeleted => "exam-deleted",
            Notice::ExportStarted => "export-started",
            Notice::PrintStarted => "print-started",
            Notice::ProfileUpdated => "profile-updated",
            Notice::PasswordChanged => "password-changed",
        }
    }

    /// Translation key of the message.
    pub fn key(self) -> &'static str {
        match self {
            Notice::QuestionCreated => "notice.question_created",
            Notice::QuestionUpdated => "notice.question_updated",
            Notice::QuestionDeleted => "notice.question_deleted",
            Notice::ExamCreated => "notice.exam_created",
            Notice::ExamUpdated => "notice.exam_updated",
            Notice::ExamDeleted => "notice.exam_deleted",
            Notice::ExportStarted => "notice.export_started",
            Notice::PrintStarted => "notice.print_started",
            Notice::ProfileUpdated => "notice.profile_updated",
            Notice::PasswordChanged => "notice.password_changed",
        }
    }

    /// `url` with this notice attached.
    pub fn url(self, url: &str) -> String {
        names::with_notice(url, self.slug())
    }
}

/// `?notice=` parameter of pages reached through a post-submit redirect.
/// Unknown slugs are ignored rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    #[serde(default)]
    notice: Option<String>,
}

impl NoticeQuery {
    pub fn notice(&self) -> Option<Notice> {
        self.notice.as_deref().and_then(Notice::from_slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_slug_round_trips_through_query() {
        let query: NoticeQuery =
            serde_json::from_value(serde_json::json!({ "notice": "exam-deleted" })).unwrap();
        assert_eq!(query.notice(), Some(Notice::ExamDeleted));
        assert_eq!(Notice::ExamDeleted.url("/prova"), "/prova?notice=exam-deleted");
    }

    #[test]
    fn unknown_notice_is_ignored() {
        let query: NoticeQuery =
            serde_json::from_value(serde_json::json!({ "notice": "<script>" })).unwrap();
        assert_eq!(query.notice(), None);
    }

    #[test]
    fn blank_question_form_has_option_slots() {
        let form = QuestionForm::blank();
        assert_eq!(form.options.len(), names::DEFAULT_OPTION_COUNT);
        assert!(!form.is_essay());
    }
}
