use std::collections::HashMap;

use color_eyre::Result;

use super::models::{Question, QuestionDraft};
use super::{today, Db};

impl Db {
    /// All questions, newest first.
    pub async fn questions(&self) -> Result<Vec<Question>> {
        let tables = self.read()?;
        let mut questions = tables.questions.clone();
        questions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(questions)
    }

    pub async fn question(&self, question_id: i32) -> Result<Option<Question>> {
        let tables = self.read()?;
        Ok(tables
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .cloned())
    }

    pub async fn insert_question(&self, draft: QuestionDraft) -> Result<i32> {
        let mut tables = self.write()?;
        let question_id = tables.allocate_id();
        let now = today();

        tables.questions.push(Question {
            id: question_id,
            title: draft.title,
            category: draft.category,
            difficulty: draft.difficulty,
            prompt: draft.prompt,
            answer: draft.answer,
            explanation: draft.explanation,
            created_at: now,
            updated_at: now,
        });

        tracing::info!("question created: id={question_id}");
        Ok(question_id)
    }

    /// Returns `false` when no question has the given id.
    pub async fn update_question(&self, question_id: i32, draft: QuestionDraft) -> Result<bool> {
        let mut tables = self.write()?;
        let Some(question) = tables.questions.iter_mut().find(|q| q.id == question_id) else {
            return Ok(false);
        };

        question.title = draft.title;
        question.category = draft.category;
        question.difficulty = draft.difficulty;
        question.prompt = draft.prompt;
        question.answer = draft.answer;
        question.explanation = draft.explanation;
        question.updated_at = today();

        tracing::info!("question updated: id={question_id}");
        Ok(true)
    }

    /// Exams keep referencing a deleted id; readers skip ids they cannot resolve.
    pub async fn delete_question(&self, question_id: i32) -> Result<bool> {
        let mut tables = self.write()?;
        let removed = crate::listing::remove_by_id(&mut tables.questions, question_id).is_some();

        if removed {
            tracing::info!("question deleted: id={question_id}");
        }
        Ok(removed)
    }

    /// How many exams include each question. Questions in no exam are absent.
    pub async fn question_usage(&self) -> Result<HashMap<i32, usize>> {
        let tables = self.read()?;
        let mut usage = HashMap::new();
        for question_id in tables.exams.iter().flat_map(|e| &e.question_ids) {
            *usage.entry(*question_id).or_insert(0) += 1;
        }
        Ok(usage)
    }
}
