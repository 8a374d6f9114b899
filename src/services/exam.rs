use chrono::NaiveDate;
use color_eyre::Result;

use super::{Latency, SubmitOutcome};
use crate::db::models::ExamDraft;
use crate::db::Db;
use crate::models::ExamForm;
use crate::names;

#[cfg_attr(test, mockall::automock)]
pub trait ExamRepository: Send + Sync {
    fn insert_exam(&self, draft: ExamDraft)
        -> impl std::future::Future<Output = Result<i32>> + Send;

    fn update_exam(
        &self,
        exam_id: i32,
        draft: ExamDraft,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    fn delete_exam(&self, exam_id: i32) -> impl std::future::Future<Output = Result<bool>> + Send;
}

impl ExamRepository for Db {
    async fn insert_exam(&self, draft: ExamDraft) -> Result<i32> {
        Db::insert_exam(self, draft).await
    }

    async fn update_exam(&self, exam_id: i32, draft: ExamDraft) -> Result<bool> {
        Db::update_exam(self, exam_id, draft).await
    }

    async fn delete_exam(&self, exam_id: i32) -> Result<bool> {
        Db::delete_exam(self, exam_id).await
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExamRejection {
    MissingFields,
    InvalidDuration,
    InvalidDueDate,
}

impl ExamRejection {
    pub fn key(self) -> &'static str {
        match self {
            ExamRejection::MissingFields => "exam_form.missing_fields",
            ExamRejection::InvalidDuration => "exam_form.invalid_duration",
            ExamRejection::InvalidDueDate => "exam_form.invalid_due_date",
        }
    }
}

pub fn validate_exam(form: &ExamForm) -> Result<ExamDraft, ExamRejection> {
    let title = form.title.trim();
    let subject = form.subject.trim();
    let due_date = form.due_date.trim();

    if title.is_empty()
        || subject.is_empty()
        || due_date.is_empty()
        || form.classes.is_empty()
        || form.questions.is_empty()
    {
        return Err(ExamRejection::MissingFields);
    }

    let duration_minutes = form
        .duration
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|d| (names::MIN_EXAM_DURATION..=names::MAX_EXAM_DURATION).contains(d))
        .ok_or(ExamRejection::InvalidDuration)?;

    let due_date = NaiveDate::parse_from_str(due_date, "%Y-%m-%d")
        .map_err(|_| ExamRejection::InvalidDueDate)?;

    Ok(ExamDraft {
        title: title.to_string(),
        subject: subject.to_string(),
        description: form.description.trim().to_string(),
        duration_minutes,
        due_date,
        class_ids: form.classes.clone(),
        question_ids: form.questions.clone(),
    })
}

#[derive(Clone)]
pub struct ExamService<R: ExamRepository = Db> {
    repo: R,
    latency: Latency,
}

impl<R: ExamRepository> ExamService<R> {
    pub fn new(repo: R, latency: Latency) -> Self {
        Self { repo, latency }
    }

    pub async fn create(&self, form: &ExamForm) -> Result<SubmitOutcome<ExamRejection>> {
        let draft = match validate_exam(form) {
            Ok(draft) => draft,
            Err(rejection) => return Ok(SubmitOutcome::Rejected(rejection)),
        };

        self.latency.wait().await;
        let exam_id = self.repo.insert_exam(draft).await?;
        Ok(SubmitOutcome::Saved(exam_id))
    }

    pub async fn update(
        &self,
        exam_id: i32,
        form: &ExamForm,
    ) -> Result<SubmitOutcome<ExamRejection>> {
        let draft = match validate_exam(form) {
            Ok(draft) => draft,
            Err(rejection) => return Ok(SubmitOutcome::Rejected(rejection)),
        };

        self.latency.wait().await;
        if self.repo.update_exam(exam_id, draft).await? {
            Ok(SubmitOutcome::Saved(exam_id))
        } else {
            Ok(SubmitOutcome::NotFound)
        }
    }

    /// Removes the exam and its results. Returns `false` for an unknown id.
    pub async fn delete(&self, exam_id: i32) -> Result<bool> {
        self.latency.wait().await;
        self.repo.delete_exam(exam_id).await
    }
}
