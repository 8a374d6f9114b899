use chrono::NaiveDate;
use maud::{html, Markup};
use rust_i18n::t;

use crate::{
    db::{Difficulty, Role},
    listing::{ListQuery, SortDirection},
    models::Notice,
};

/// htmx navigation link with href fallback + hx-get for in-page swap.
pub fn nav_link(href: &str, body: Markup) -> Markup {
    html! {
        a href=(href)
          hx-get=(href)
          hx-target="main"
          hx-push-url="true"
          hx-swap="innerHTML" {
            (body)
        }
    }
}

pub fn role_label(role: Role, locale: &str) -> String {
    match role {
        Role::Professor => t!("role.professor", locale = locale).to_string(),
        Role::Aluno => t!("role.aluno", locale = locale).to_string(),
    }
}

/// Success message carried over a redirect.
pub fn notice(notice: Option<Notice>, locale: &str) -> Markup {
    html! {
        @if let Some(notice) = notice {
            p.notice.notice-success role="status" { (t!(notice.key(), locale = locale)) }
        }
    }
}

/// Inline message for a rejected form.
pub fn rejection(key: Option<&'static str>, locale: &str) -> Markup {
    html! {
        @if let Some(key) = key {
            p.notice.notice-error role="alert" { (t!(key, locale = locale)) }
        }
    }
}

pub fn date(value: NaiveDate) -> String {
    value.format("%d/%m/%Y").to_string()
}

pub fn difficulty_badge(difficulty: Difficulty) -> Markup {
    let class = match difficulty {
        Difficulty::Easy => "badge badge-easy",
        Difficulty::Medium => "badge badge-medium",
        Difficulty::Hard => "badge badge-hard",
    };
    html! {
        span class=(class) { (difficulty.label()) }
    }
}

pub fn percent(value: f64) -> String {
    format!("{value:.0}%")
}

pub fn progress(done: u32, total: u32) -> Markup {
    html! {
        progress value=(done) max=(total.max(1)) {}
        small { (done) "/" (total) }
    }
}

pub fn stat_card(icon: &str, label: &str, value: &str) -> Markup {
    html! {
        article.stat-card {
            span."material-symbols-rounded stat-icon" aria-hidden="true" { (icon) }
            div {
                small { (label) }
                p.stat-value { (value) }
            }
        }
    }
}

pub fn empty_state(message: &str) -> Markup {
    html! {
        p.empty-state { (message) }
    }
}

/// Filter bar wrapper. Every input change re-fetches the list; `#filters`
/// is also pulled into sort-header requests so both compose.
pub fn filter_form(action: &str, query: &ListQuery, fields: Markup) -> Markup {
    html! {
        form #filters.filter-bar
             action=(action)
             method="get"
             hx-get=(action)
             hx-target="main"
             hx-push-url="true"
             hx-trigger="input changed delay:300ms from:input[type=search], change" {
            (fields)
            input type="hidden" name="sort" value=(query.sort);
            input type="hidden" name="dir" value=(query.dir.as_str());
        }
    }
}

pub fn search_input(query: &ListQuery, placeholder: &str) -> Markup {
    html! {
        input type="search"
              name="q"
              value=(query.q)
              placeholder=(placeholder)
              aria-label=(placeholder);
    }
}

/// `<select>` whose first entry switches the filter off.
pub fn select_filter(
    name: &str,
    selected: &str,
    all_label: &str,
    options: &[(&str, String)],
) -> Markup {
    html! {
        select name=(name) aria-label=(all_label) {
            option value="all" selected[selected.is_empty() || selected == "all"] { (all_label) }
            @for (value, label) in options {
                option value=(value) selected[selected == *value] { (label) }
            }
        }
    }
}

/// Column header that sorts by `column`, flipping direction when the list
/// is already sorted by it.
pub fn sort_header(action: &str, query: &ListQuery, column: &str, label: &str) -> Markup {
    let active = query.sort == column;
    let dir = if active {
        query.dir.toggled()
    } else {
        SortDirection::Asc
    };
    let href = format!("{action}?sort={column}&dir={}", dir.as_str());
    let arrow = match (active, query.dir) {
        (false, _) => "",
        (true, SortDirection::Asc) => " ▲",
        (true, SortDirection::Desc) => " ▼",
    };

    html! {
        th scope="col" aria-sort=[active.then(|| if query.dir == SortDirection::Asc { "ascending" } else { "descending" })] {
            a href=(href)
              hx-get=(href)
              hx-include="#filters input[type=search], #filters select"
              hx-target="main"
              hx-push-url="true" {
                (label) (arrow)
            }
        }
    }
}

/// Whether a form creates a new record or edits the one with this id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i32),
}
