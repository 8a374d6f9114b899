// Database model structs

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Professor,
    #[default]
    Aluno,
}

impl Role {
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "professor" => Some(Role::Professor),
            "aluno" => Some(Role::Aluno),
            _ => None,
        }
    }

    /// Missing or unknown role strings fall back to the student role.
    pub fn resolve(value: Option<&str>) -> Role {
        value.and_then(Role::parse).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Professor => "professor",
            Role::Aluno => "aluno",
        }
    }

    pub fn is_teacher(self) -> bool {
        self == Role::Professor
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "Fácil")]
    Easy,
    #[serde(rename = "Médio")]
    Medium,
    #[serde(rename = "Difícil")]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn parse(value: &str) -> Option<Difficulty> {
        Self::ALL.into_iter().find(|d| d.label() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Fácil",
            Difficulty::Medium => "Médio",
            Difficulty::Hard => "Difícil",
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    MultipleChoice { options: Vec<String>, correct: usize },
    Essay { expected: String },
}

impl Answer {
    pub fn kind(&self) -> &'static str {
        match self {
            Answer::MultipleChoice { .. } => "multiple-choice",
            Answer::Essay { .. } => "essay",
        }
    }

    pub fn options(&self) -> &[String] {
        match self {
            Answer::MultipleChoice { options, .. } => options,
            Answer::Essay { .. } => &[],
        }
    }

    pub fn correct_option(&self) -> Option<usize> {
        match self {
            Answer::MultipleChoice { correct, .. } => Some(*correct),
            Answer::Essay { .. } => None,
        }
    }

    /// Whether `option` is the right pick. `None` for essays and for
    /// indices past the last option.
    pub fn grade(&self, option: usize) -> Option<bool> {
        match self {
            Answer::MultipleChoice { options, correct } if option < options.len() => {
                Some(option == *correct)
            }
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub class_id: Option<i32>,
}

/// Validated question fields, ready to be stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionDraft {
    pub title: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub prompt: String,
    pub answer: Answer,
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub prompt: String,
    pub answer: Answer,
    pub explanation: Option<String>,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

/// Validated exam fields, ready to be stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExamDraft {
    pub title: String,
    pub subject: String,
    pub description: String,
    pub duration_minutes: u32,
    pub due_date: NaiveDate,
    pub class_ids: Vec<i32>,
    pub question_ids: Vec<i32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exam {
    pub id: i32,
    pub title: String,
    pub subject: String,
    pub description: String,
    pub duration_minutes: u32,
    pub due_date: NaiveDate,
    pub created_at: NaiveDate,
    pub class_ids: Vec<i32>,
    pub question_ids: Vec<i32>,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Class {
    pub id: i32,
    pub name: String,
    pub student_count: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StudentResult {
    pub id: i32,
    pub exam_id: i32,
    pub user_id: Option<i32>,
    pub student_name: String,
    pub class_id: i32,
    pub class_name: String,
    pub score: u32,
    pub completion_minutes: u32,
}

impl StudentResult {
    pub const PASSING_SCORE: u32 = 60;

    pub fn passed(&self) -> bool {
        self.score >= Self::PASSING_SCORE
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attempt {
    pub user_id: i32,
    pub question_id: i32,
    pub option: usize,
    pub correct: bool,
    pub answered_on: NaiveDate,
}

/// Per-class completion figures for one exam.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassProgress {
    pub class_id: i32,
    pub name: String,
    pub student_count: u32,
    pub completed: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExamSummary {
    pub exam: Exam,
    pub classes: Vec<ClassProgress>,
    pub average_score: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptTally {
    pub answered: u32,
    pub correct: u32,
}

impl AttemptTally {
    pub fn accuracy(&self) -> f64 {
        if self.answered == 0 {
            0.0
        } else {
            f64::from(self.correct) * 100.0 / f64::from(self.answered)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentStats {
    pub user_id: i32,
    pub name: String,
    pub tally: AttemptTally,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryStats {
    pub category: String,
    pub total_questions: u32,
    pub answered_questions: u32,
    pub tally: AttemptTally,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionStats {
    pub option: String,
    pub count: u32,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionStats {
    pub tally: AttemptTally,
    pub options: Vec<OptionStats>,
    pub exams: Vec<Exam>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityEntry {
    pub question_id: i32,
    pub title: String,
    pub category: String,
    pub answered_on: NaiveDate,
    pub correct: bool,
}
