use std::collections::BTreeMap;

use color_eyre::Result;

use super::models::{
    ActivityEntry, Attempt, AttemptTally, CategoryStats, OptionStats, QuestionStats, Role,
    StudentStats,
};
use super::{today, Db};

impl Db {
    /// Records an answer to a multiple-choice question. Returns `None` when
    /// the question does not exist, is not multiple-choice, or the option is
    /// out of range.
    pub async fn record_attempt(
        &self,
        user_id: i32,
        question_id: i32,
        option: usize,
    ) -> Result<Option<Attempt>> {
        let mut tables = self.write()?;
        let Some(correct) = tables
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .and_then(|q| q.answer.grade(option))
        else {
            return Ok(None);
        };

        let attempt = Attempt {
            user_id,
            question_id,
            option,
            correct,
            answered_on: today(),
        };
        tables.attempts.push(attempt.clone());

        tracing::debug!("attempt recorded: user_id={user_id}, question_id={question_id}, correct={correct}");
        Ok(Some(attempt))
    }

    pub async fn user_tally(&self, user_id: i32) -> Result<AttemptTally> {
        let tables = self.read()?;
        Ok(tally(tables.attempts.iter().filter(|a| a.user_id == user_id)))
    }

    pub async fn overall_tally(&self) -> Result<AttemptTally> {
        let tables = self.read()?;
        Ok(tally(tables.attempts.iter()))
    }

    pub async fn student_stats(&self) -> Result<Vec<StudentStats>> {
        let tables = self.read()?;
        Ok(tables
            .users
            .iter()
            .filter(|row| row.user.role == Role::Aluno)
            .map(|row| StudentStats {
                user_id: row.user.id,
                name: row.user.display_name.clone(),
                tally: tally(tables.attempts.iter().filter(|a| a.user_id == row.user.id)),
            })
            .collect())
    }

    /// Per-category progress, restricted to one user's attempts when
    /// `user_id` is given. Categories are ordered by name.
    pub async fn category_stats(&self, user_id: Option<i32>) -> Result<Vec<CategoryStats>> {
        let tables = self.read()?;
        let mut by_category: BTreeMap<&str, CategoryStats> = BTreeMap::new();

        for question in &tables.questions {
            let attempts: Vec<&Attempt> = tables
                .attempts
                .iter()
                .filter(|a| a.question_id == question.id)
                .filter(|a| user_id.is_none_or(|id| a.user_id == id))
                .collect();

            let entry = by_category
                .entry(question.category.as_str())
                .or_insert_with(|| CategoryStats {
                    category: question.category.clone(),
                    total_questions: 0,
                    answered_questions: 0,
                    tally: AttemptTally {
                        answered: 0,
                        correct: 0,
                    },
                });

            entry.total_questions += 1;
            if !attempts.is_empty() {
                entry.answered_questions += 1;
            }
            let question_tally = tally(attempts.into_iter());
            entry.tally.answered += question_tally.answered;
            entry.tally.correct += question_tally.correct;
        }

        Ok(by_category.into_values().collect())
    }

    pub async fn question_stats(&self, question_id: i32) -> Result<Option<QuestionStats>> {
        let tables = self.read()?;
        let Some(question) = tables.questions.iter().find(|q| q.id == question_id) else {
            return Ok(None);
        };

        let attempts: Vec<&Attempt> = tables
            .attempts
            .iter()
            .filter(|a| a.question_id == question_id)
            .collect();

        let options = question
            .answer
            .options()
            .iter()
            .enumerate()
            .map(|(idx, option)| OptionStats {
                option: option.clone(),
                count: count_u32(attempts.iter().filter(|a| a.option == idx).count()),
                is_correct: question.answer.correct_option() == Some(idx),
            })
            .collect();

        let exams = tables
            .exams
            .iter()
            .filter(|e| e.question_ids.contains(&question_id))
            .cloned()
            .collect();

        Ok(Some(QuestionStats {
            tally: tally(attempts.into_iter()),
            options,
            exams,
        }))
    }

    /// Latest attempts of a user, most recent first.
    pub async fn recent_activity(&self, user_id: i32, limit: usize) -> Result<Vec<ActivityEntry>> {
        let tables = self.read()?;
        Ok(tables
            .attempts
            .iter()
            .rev()
            .filter(|a| a.user_id == user_id)
            .filter_map(|a| {
                let question = tables.questions.iter().find(|q| q.id == a.question_id)?;
                Some(ActivityEntry {
                    question_id: question.id,
                    title: question.title.clone(),
                    category: question.category.clone(),
                    answered_on: a.answered_on,
                    correct: a.correct,
                })
            })
            .take(limit)
            .collect())
    }
}

fn tally<'a>(attempts: impl Iterator<Item = &'a Attempt>) -> AttemptTally {
    attempts.fold(
        AttemptTally {
            answered: 0,
            correct: 0,
        },
        |mut acc, attempt| {
            acc.answered += 1;
            if attempt.correct {
                acc.correct += 1;
            }
            acc
        },
    )
}

fn count_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
