use color_eyre::Result;

use super::{Latency, SubmitOutcome};
use crate::db::models::{Answer, Difficulty, QuestionDraft};
use crate::db::Db;
use crate::models::QuestionForm;
use crate::names;

#[cfg_attr(test, mockall::automock)]
pub trait QuestionRepository: Send + Sync {
    fn insert_question(
        &self,
        draft: QuestionDraft,
    ) -> impl std::future::Future<Output = Result<i32>> + Send;

    fn update_question(
        &self,
        question_id: i32,
        draft: QuestionDraft,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    fn delete_question(
        &self,
        question_id: i32,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;
}

impl QuestionRepository for Db {
    async fn insert_question(&self, draft: QuestionDraft) -> Result<i32> {
        Db::insert_question(self, draft).await
    }

    async fn update_question(&self, question_id: i32, draft: QuestionDraft) -> Result<bool> {
        Db::update_question(self, question_id, draft).await
    }

    async fn delete_question(&self, question_id: i32) -> Result<bool> {
        Db::delete_question(self, question_id).await
    }
}

/// Why a question form was not accepted. Checked in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionRejection {
    MissingFields,
    IncompleteOptions,
    InvalidCorrectOption,
    MissingCorrectAnswer,
}

impl QuestionRejection {
    pub fn key(self) -> &'static str {
        match self {
            QuestionRejection::MissingFields => "question_form.missing_fields",
            QuestionRejection::IncompleteOptions => "question_form.incomplete_options",
            QuestionRejection::InvalidCorrectOption => "question_form.invalid_correct_option",
            QuestionRejection::MissingCorrectAnswer => "question_form.missing_correct_answer",
        }
    }
}

pub fn validate_question(form: &QuestionForm) -> Result<QuestionDraft, QuestionRejection> {
    let title = form.title.trim();
    let category = form.category.trim();
    let prompt = form.prompt.trim();
    let difficulty = Difficulty::parse(form.difficulty.trim());

    let Some(difficulty) = difficulty.filter(|_| {
        !title.is_empty() && !category.is_empty() && !prompt.is_empty()
    }) else {
        return Err(QuestionRejection::MissingFields);
    };

    let answer = if form.is_essay() {
        let expected = form.expected_answer.trim();
        if expected.is_empty() {
            return Err(QuestionRejection::MissingCorrectAnswer);
        }
        Answer::Essay {
            expected: expected.to_string(),
        }
    } else {
        let options: Vec<String> = form.options.iter().map(|o| o.trim().to_string()).collect();
        if options.len() < names::MIN_OPTIONS || options.iter().any(String::is_empty) {
            return Err(QuestionRejection::IncompleteOptions);
        }

        let correct = form
            .correct_option
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|idx| *idx < options.len())
            .ok_or(QuestionRejection::InvalidCorrectOption)?;

        Answer::MultipleChoice { options, correct }
    };

    let explanation = Some(form.explanation.trim())
        .filter(|e| !e.is_empty())
        .map(str::to_string);

    Ok(QuestionDraft {
        title: title.to_string(),
        category: category.to_string(),
        difficulty,
        prompt: prompt.to_string(),
        answer,
        explanation,
    })
}

#[derive(Clone)]
pub struct QuestionService<R: QuestionRepository = Db> {
    repo: R,
    latency: Latency,
}

impl<R: QuestionRepository> QuestionService<R> {
    pub fn new(repo: R, latency: Latency) -> Self {
        Self { repo, latency }
    }

    pub async fn create(&self, form: &QuestionForm) -> Result<SubmitOutcome<QuestionRejection>> {
        let draft = match validate_question(form) {
            Ok(draft) => draft,
            Err(rejection) => return Ok(SubmitOutcome::Rejected(rejection)),
        };

        self.latency.wait().await;
        let question_id = self.repo.insert_question(draft).await?;
        Ok(SubmitOutcome::Saved(question_id))
    }

    pub async fn update(
        &self,
        question_id: i32,
        form: &QuestionForm,
    ) -> Result<SubmitOutcome<QuestionRejection>> {
        let draft = match validate_question(form) {
            Ok(draft) => draft,
            Err(rejection) => return Ok(SubmitOutcome::Rejected(rejection)),
        };

        self.latency.wait().await;
        if self.repo.update_question(question_id, draft).await? {
            Ok(SubmitOutcome::Saved(question_id))
        } else {
            Ok(SubmitOutcome::NotFound)
        }
    }

    /// Returns `false` when no question had that id.
    pub async fn delete(&self, question_id: i32) -> Result<bool> {
        self.latency.wait().await;
        self.repo.delete_question(question_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn valid_form() -> QuestionForm {
        QuestionForm {
            title: "Equação do 2º grau".to_string(),
            category: "Matemática".to_string(),
            difficulty: "Médio".to_string(),
            prompt: "Quais são as raízes de x² - 5x + 6 = 0?".to_string(),
            kind: "multiple-choice".to_string(),
            options: vec!["2 e 3".into(), "1 e 6".into(), "-2 e -3".into(), "0 e 5".into()],
            correct_option: "0".to_string(),
            expected_answer: String::new(),
            explanation: "  ".to_string(),
        }
    }

    fn essay_form() -> QuestionForm {
        QuestionForm {
            kind: "essay".to_string(),
            options: Vec::new(),
            expected_answer: "Eu trouxe.".to_string(),
            ..valid_form()
        }
    }

    #[test]
    fn valid_multiple_choice_becomes_draft() {
        let draft = validate_question(&valid_form()).unwrap();
        assert_eq!(draft.difficulty, Difficulty::Medium);
        assert_eq!(draft.answer.correct_option(), Some(0));
        assert_eq!(draft.answer.options().len(), 4);
        assert_eq!(draft.explanation, None);
    }

    #[test]
    fn each_required_field_is_checked() {
        for blank in ["title", "category", "difficulty", "prompt"] {
            let mut form = valid_form();
            match blank {
                "title" => form.title = " ".into(),
                "category" => form.category.clear(),
                "difficulty" => form.difficulty.clear(),
                _ => form.prompt.clear(),
            }
            assert_eq!(
                validate_question(&form).unwrap_err(),
                QuestionRejection::MissingFields,
                "blank {blank}"
            );
        }
    }

    #[test]
    fn unknown_difficulty_counts_as_missing() {
        let form = QuestionForm {
            difficulty: "Impossível".into(),
            ..valid_form()
        };
        assert_eq!(
            validate_question(&form).unwrap_err(),
            QuestionRejection::MissingFields
        );
    }

    #[test]
    fn blank_option_is_rejected() {
        let mut form = valid_form();
        form.options[2] = "   ".into();
        assert_eq!(
            validate_question(&form).unwrap_err(),
            QuestionRejection::IncompleteOptions
        );
    }

    #[test]
    fn single_option_is_rejected() {
        let form = QuestionForm {
            options: vec!["só uma".into()],
            ..valid_form()
        };
        assert_eq!(
            validate_question(&form).unwrap_err(),
            QuestionRejection::IncompleteOptions
        );
    }

    #[test]
    fn correct_option_must_point_at_an_option() {
        for bad in ["4", "-1", "", "a"] {
            let form = QuestionForm {
                correct_option: bad.into(),
                ..valid_form()
            };
            assert_eq!(
                validate_question(&form).unwrap_err(),
                QuestionRejection::InvalidCorrectOption,
                "correct_option {bad:?}"
            );
        }
    }

    #[test]
    fn essay_needs_expected_answer_but_no_options() {
        let draft = validate_question(&essay_form()).unwrap();
        assert_eq!(
            draft.answer,
            Answer::Essay {
                expected: "Eu trouxe.".into()
            }
        );

        let form = QuestionForm {
            expected_answer: "\n".into(),
            ..essay_form()
        };
        assert_eq!(
            validate_question(&form).unwrap_err(),
            QuestionRejection::MissingCorrectAnswer
        );
    }

    #[test]
    fn missing_fields_wins_over_option_problems() {
        let form = QuestionForm {
            title: String::new(),
            options: Vec::new(),
            ..valid_form()
        };
        assert_eq!(
            validate_question(&form).unwrap_err(),
            QuestionRejection::MissingFields
        );
    }

    #[tokio::test]
    async fn create_persists_valid_form() {
        let mut mock = MockQuestionRepository::new();
        mock.expect_insert_question()
            .withf(|draft| draft.title == "Equação do 2º grau")
            .times(1)
            .returning(|_| Box::pin(async { Ok(42) }));

        let svc = QuestionService::new(mock, Latency::default());
        let outcome = svc.create(&valid_form()).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Saved(42));
    }

    #[tokio::test]
    async fn rejected_form_never_reaches_repository() {
        let mut mock = MockQuestionRepository::new();
        mock.expect_insert_question().never();

        let svc = QuestionService::new(mock, Latency::from_millis(1000));
        let form = QuestionForm {
            prompt: String::new(),
            ..valid_form()
        };
        let outcome = svc.create(&form).await.unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(QuestionRejection::MissingFields)
        );
    }

    #[tokio::test]
    async fn update_of_unknown_question_is_not_found() {
        let mut mock = MockQuestionRepository::new();
        mock.expect_update_question()
            .returning(|_, _| Box::pin(async { Ok(false) }));

        let svc = QuestionService::new(mock, Latency::default());
        let outcome = svc.update(99, &valid_form()).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn create_waits_for_latency_before_writing() {
        let mut mock = MockQuestionRepository::new();
        mock.expect_insert_question()
            .times(1)
            .returning(|_| Box::pin(async { Ok(1) }));

        let svc = QuestionService::new(mock, Latency::from_millis(1000));
        let start = tokio::time::Instant::now();
        svc.create(&valid_form()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_submission_never_writes() {
        let mut mock = MockQuestionRepository::new();
        mock.expect_insert_question().never();

        let svc = QuestionService::new(mock, Latency::from_millis(1000));
        let form = valid_form();
        let result = tokio::time::timeout(Duration::from_millis(500), svc.create(&form)).await;
        assert!(result.is_err(), "submission should still be waiting");
    }

    #[tokio::test(start_paused = true)]
    async fn delete_goes_through_latency_too() {
        let mut mock = MockQuestionRepository::new();
        mock.expect_delete_question()
            .withf(|id| *id == 3)
            .times(1)
            .returning(|_| Box::pin(async { Ok(true) }));

        let svc = QuestionService::new(mock, Latency::from_millis(800));
        let start = tokio::time::Instant::now();
        assert!(svc.delete(3).await.unwrap());
        assert!(start.elapsed() >= Duration::from_millis(800));
    }
}
