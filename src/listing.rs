//! Filtering, sorting and removal shared by every list page.
//!
//! A [`ListQuery`] is deserialized straight from the page's query string.
//! Empty values and the `all` / `Todas` sentinels leave a filter inactive.

use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::Datelike;
use serde::Deserialize;

use crate::db::{Exam, ExamSummary, Question, StudentResult, StudentStats};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facet {
    Category,
    Difficulty,
    Subject,
    Status,
    Kind,
    Class,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub sort: String,
    #[serde(default)]
    pub dir: SortDirection,
}

fn active(value: &str) -> Option<&str> {
    match value.trim() {
        "" | "all" | "Todas" => None,
        v => Some(v),
    }
}

impl ListQuery {
    pub fn search(&self) -> Option<&str> {
        active(&self.q)
    }

    pub fn facet_value(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Category => active(&self.category),
            Facet::Difficulty => active(&self.difficulty),
            Facet::Subject => active(&self.subject),
            Facet::Status => active(&self.status),
            Facet::Kind => active(&self.kind),
            Facet::Class => active(&self.class),
        }
    }

    /// True when the item passes every active predicate.
    pub fn matches<T: Listable>(&self, item: &T) -> bool {
        if let Some(needle) = self.search() {
            let needle = needle.to_lowercase();
            let hit = item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        const FACETS: [Facet; 6] = [
            Facet::Category,
            Facet::Difficulty,
            Facet::Subject,
            Facet::Status,
            Facet::Kind,
            Facet::Class,
        ];
        FACETS.into_iter().all(|facet| match self.facet_value(facet) {
            Some(wanted) => item.facet(facet).is_some_and(|value| value == wanted),
            None => true,
        })
    }

    pub fn filter<T: Listable + Clone>(&self, items: &[T]) -> Vec<T> {
        items.iter().filter(|item| self.matches(*item)).cloned().collect()
    }

    /// Filters, then sorts by the requested column when the item type knows it.
    pub fn apply<T: Sortable + Clone>(&self, items: &[T]) -> Vec<T> {
        let mut filtered = self.filter(items);
        if let Some(column) = T::column(&self.sort) {
            sort_by_column(&mut filtered, column, self.dir);
        }
        filtered
    }
}

/// A row that can be searched and faceted.
pub trait Listable {
    fn id(&self) -> i32;
    fn search_fields(&self) -> Vec<&str>;
    fn facet(&self, facet: Facet) -> Option<Cow<'_, str>>;
}

pub enum SortValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl SortValue<'_> {
    fn compare(&self, other: &SortValue<'_>) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortValue::Text(a), SortValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// A row with named sortable columns.
pub trait Sortable: Listable {
    type Column: Copy;

    fn column(name: &str) -> Option<Self::Column>;
    fn sort_value(&self, column: Self::Column) -> SortValue<'_>;
}

/// Stable sort: rows with equal keys keep their relative order in both
/// directions, rows with distinct keys swap when the direction flips.
pub fn sort_by_column<T: Sortable>(items: &mut [T], column: T::Column, dir: SortDirection) {
    items.sort_by(|a, b| {
        let ord = a.sort_value(column).compare(&b.sort_value(column));
        match dir {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Removes the row with the given id, keeping the others in order.
pub fn remove_by_id<T: Listable>(items: &mut Vec<T>, id: i32) -> Option<T> {
    let idx = items.iter().position(|item| item.id() == id)?;
    Some(items.remove(idx))
}

impl Listable for Question {
    fn id(&self) -> i32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.category]
    }

    fn facet(&self, facet: Facet) -> Option<Cow<'_, str>> {
        match facet {
            Facet::Category => Some(Cow::Borrowed(&self.category)),
            Facet::Difficulty => Some(Cow::Borrowed(self.difficulty.label())),
            Facet::Kind => Some(Cow::Borrowed(self.answer.kind())),
            Facet::Subject | Facet::Status | Facet::Class => None,
        }
    }
}

#[derive(Clone, Copy)]
pub enum QuestionColumn {
    Title,
    Category,
    Difficulty,
    Created,
}

impl Sortable for Question {
    type Column = QuestionColumn;

    fn column(name: &str) -> Option<QuestionColumn> {
        match name {
            "title" => Some(QuestionColumn::Title),
            "category" => Some(QuestionColumn::Category),
            "difficulty" => Some(QuestionColumn::Difficulty),
            "created" => Some(QuestionColumn::Created),
            _ => None,
        }
    }

    fn sort_value(&self, column: QuestionColumn) -> SortValue<'_> {
        match column {
            QuestionColumn::Title => SortValue::Text(&self.title),
            QuestionColumn::Category => SortValue::Text(&self.category),
            QuestionColumn::Difficulty => SortValue::Number(f64::from(self.difficulty.rank())),
            QuestionColumn::Created => {
                SortValue::Number(f64::from(self.created_at.num_days_from_ce()))
            }
        }
    }
}

impl Listable for Exam {
    fn id(&self) -> i32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.subject]
    }

    fn facet(&self, facet: Facet) -> Option<Cow<'_, str>> {
        match facet {
            Facet::Subject => Some(Cow::Borrowed(&self.subject)),
            Facet::Status => Some(Cow::Borrowed(if self.completed {
                "completed"
            } else {
                "active"
            })),
            Facet::Category | Facet::Difficulty | Facet::Kind | Facet::Class => None,
        }
    }
}

impl Listable for ExamSummary {
    fn id(&self) -> i32 {
        self.exam.id
    }

    fn search_fields(&self) -> Vec<&str> {
        self.exam.search_fields()
    }

    fn facet(&self, facet: Facet) -> Option<Cow<'_, str>> {
        self.exam.facet(facet)
    }
}

#[derive(Clone, Copy)]
pub enum ExamColumn {
    Title,
    Subject,
    Due,
    Score,
}

impl Sortable for ExamSummary {
    type Column = ExamColumn;

    fn column(name: &str) -> Option<ExamColumn> {
        match name {
            "title" => Some(ExamColumn::Title),
            "subject" => Some(ExamColumn::Subject),
            "due" => Some(ExamColumn::Due),
            "score" => Some(ExamColumn::Score),
            _ => None,
        }
    }

    fn sort_value(&self, column: ExamColumn) -> SortValue<'_> {
        match column {
            ExamColumn::Title => SortValue::Text(&self.exam.title),
            ExamColumn::Subject => SortValue::Text(&self.exam.subject),
            ExamColumn::Due => SortValue::Number(f64::from(self.exam.due_date.num_days_from_ce())),
            ExamColumn::Score => SortValue::Number(self.average_score.unwrap_or(-1.0)),
        }
    }
}

impl Listable for StudentResult {
    fn id(&self) -> i32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.student_name]
    }

    fn facet(&self, facet: Facet) -> Option<Cow<'_, str>> {
        match facet {
            Facet::Class => Some(Cow::Borrowed(&self.class_name)),
            Facet::Status => Some(Cow::Borrowed(if self.passed() { "passed" } else { "failed" })),
            Facet::Category | Facet::Difficulty | Facet::Subject | Facet::Kind => None,
        }
    }
}

#[derive(Clone, Copy)]
pub enum ResultColumn {
    Name,
    Class,
    Score,
    Time,
}

impl Sortable for StudentResult {
    type Column = ResultColumn;

    fn column(name: &str) -> Option<ResultColumn> {
        match name {
            "name" => Some(ResultColumn::Name),
            "class" => Some(ResultColumn::Class),
            "score" => Some(ResultColumn::Score),
            "time" => Some(ResultColumn::Time),
            _ => None,
        }
    }

    fn sort_value(&self, column: ResultColumn) -> SortValue<'_> {
        match column {
            ResultColumn::Name => SortValue::Text(&self.student_name),
            ResultColumn::Class => SortValue::Text(&self.class_name),
            ResultColumn::Score => SortValue::Number(f64::from(self.score)),
            ResultColumn::Time => SortValue::Number(f64::from(self.completion_minutes)),
        }
    }
}

impl Listable for StudentStats {
    fn id(&self) -> i32 {
        self.user_id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name]
    }

    fn facet(&self, _facet: Facet) -> Option<Cow<'_, str>> {
        None
    }
}

#[derive(Clone, Copy)]
pub enum StudentColumn {
    Name,
    Answered,
    Accuracy,
}

impl Sortable for StudentStats {
    type Column = StudentColumn;

    fn column(name: &str) -> Option<StudentColumn> {
        match name {
            "name" => Some(StudentColumn::Name),
            "answered" => Some(StudentColumn::Answered),
            "accuracy" => Some(StudentColumn::Accuracy),
            _ => None,
        }
    }

    fn sort_value(&self, column: StudentColumn) -> SortValue<'_> {
        match column {
            StudentColumn::Name => SortValue::Text(&self.name),
            StudentColumn::Answered => SortValue::Number(f64::from(self.tally.answered)),
            StudentColumn::Accuracy => SortValue::Number(self.tally.accuracy()),
        }
    }
}
