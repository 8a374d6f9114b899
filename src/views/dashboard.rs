use maud::{html, Markup};
use rust_i18n::t;

use super::components;
use crate::{
    db::{AttemptTally, CategoryStats, StudentStats},
    listing::ListQuery,
    names,
};

pub struct Overview {
    pub students: usize,
    pub questions: usize,
    pub exams: usize,
    pub tally: AttemptTally,
}

pub fn dashboard(
    overview: &Overview,
    students: &[StudentStats],
    categories: &[CategoryStats],
    query: &ListQuery,
    locale: &str,
) -> Markup {
    html! {
        h1 { (t!("dashboard.title", locale = locale)) }

        div.stat-grid {
            (components::stat_card("groups", &t!("dashboard.students", locale = locale), &overview.students.to_string()))
            (components::stat_card("description", &t!("dashboard.questions", locale = locale), &overview.questions.to_string()))
            (components::stat_card("assignment", &t!("dashboard.exams", locale = locale), &overview.exams.to_string()))
            (components::stat_card("percent", &t!("stats.accuracy", locale = locale), &components::percent(overview.tally.accuracy())))
            (components::stat_card("done_all", &t!("stats.answered", locale = locale), &overview.tally.answered.to_string()))
        }

        article {
            h4 { (t!("dashboard.student_table", locale = locale)) }
            (components::filter_form(names::DASHBOARD_URL, query, html! {
                (components::search_input(query, &t!("dashboard.search", locale = locale)))
            }))
            @if students.is_empty() {
                (components::empty_state(&t!("dashboard.no_students", locale = locale)))
            } @else {
                table.striped {
                    thead {
                        tr {
                            (components::sort_header(names::DASHBOARD_URL, query, "name", &t!("dashboard.student", locale = locale)))
                            (components::sort_header(names::DASHBOARD_URL, query, "answered", &t!("stats.answered", locale = locale)))
                            th scope="col" { (t!("stats.correct", locale = locale)) }
                            (components::sort_header(names::DASHBOARD_URL, query, "accuracy", &t!("stats.accuracy", locale = locale)))
                        }
                    }
                    tbody {
                        @for student in students {
                            tr {
                                td { (student.name) }
                                td { (student.tally.answered) }
                                td { (student.tally.correct) }
                                td { (components::percent(student.tally.accuracy())) }
                            }
                        }
                    }
                }
            }
        }

        article {
            h4 { (t!("dashboard.category_table", locale = locale)) }
            (category_table(categories, locale))
        }
    }
}

/// Per-category coverage, shared with the student profile.
pub fn category_table(categories: &[CategoryStats], locale: &str) -> Markup {
    html! {
        table {
            thead {
                tr {
                    th { (t!("question.category", locale = locale)) }
                    th { (t!("dashboard.coverage", locale = locale)) }
                    th { (t!("stats.accuracy", locale = locale)) }
                }
            }
            tbody {
                @for category in categories {
                    tr {
                        td { (category.category) }
                        td { (components::progress(category.answered_questions, category.total_questions)) }
                        td {
                            @if category.tally.answered == 0 {
                                "-"
                            } @else {
                                (components::percent(category.tally.accuracy()))
                            }
                        }
                    }
                }
            }
        }
    }
}
