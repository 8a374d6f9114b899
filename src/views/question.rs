use std::collections::HashMap;

use maud::{html, Markup};
use rust_i18n::t;

use super::components::{self, FormMode};
use super::solve::{self, SolveContext};
use crate::{
    db::{Difficulty, Question, QuestionStats},
    listing::ListQuery,
    models::{Notice, QuestionForm},
    names,
    services::question::QuestionRejection,
};

pub fn question_list(
    questions: &[Question],
    usage: &HashMap<i32, usize>,
    categories: &[String],
    query: &ListQuery,
    notice: Option<Notice>,
    locale: &str,
) -> Markup {
    let difficulties: Vec<(&str, String)> = Difficulty::ALL
        .iter()
        .map(|d| (d.label(), d.label().to_string()))
        .collect();
    let categories: Vec<(&str, String)> =
        categories.iter().map(|c| (c.as_str(), c.clone())).collect();
    let kinds = [
        ("multiple-choice", t!("question.kind_multiple_choice", locale = locale).to_string()),
        ("essay", t!("question.kind_essay", locale = locale).to_string()),
    ];

    html! {
        div.page-header {
            h1 { (t!("question.list_title", locale = locale)) }
            (components::nav_link(names::CREATE_QUESTION_URL, html! {
                span role="button" { (t!("question.new", locale = locale)) }
            }))
        }

        (components::notice(notice, locale))

        (components::filter_form(names::QUESTIONS_URL, query, html! {
            (components::search_input(query, &t!("question.search", locale = locale)))
            (components::select_filter("category", &query.category, &t!("question.all_categories", locale = locale), &categories))
            (components::select_filter("difficulty", &query.difficulty, &t!("question.all_difficulties", locale = locale), &difficulties))
            (components::select_filter("kind", &query.kind, &t!("question.all_kinds", locale = locale), &kinds))
        }))

        @if questions.is_empty() {
            (components::empty_state(&t!("question.empty", locale = locale)))
        } @else {
            figure {
                table.striped {
                    thead {
                        tr {
                            (components::sort_header(names::QUESTIONS_URL, query, "title", &t!("question.title", locale = locale)))
                            (components::sort_header(names::QUESTIONS_URL, query, "category", &t!("question.category", locale = locale)))
                            (components::sort_header(names::QUESTIONS_URL, query, "difficulty", &t!("question.difficulty", locale = locale)))
                            th scope="col" { (t!("question.kind", locale = locale)) }
                            th scope="col" { (t!("question.usage", locale = locale)) }
                            (components::sort_header(names::QUESTIONS_URL, query, "created", &t!("question.created", locale = locale)))
                            th scope="col" { (t!("common.actions", locale = locale)) }
                        }
                    }
                    tbody {
                        @for question in questions {
                            tr {
                                td {
                                    (components::nav_link(&names::question_url(question.id), html! { (question.title) }))
                                }
                                td { (question.category) }
                                td { (components::difficulty_badge(question.difficulty)) }
                                td { (kind_label(question, locale)) }
                                td { (usage.get(&question.id).copied().unwrap_or(0)) }
                                td { (components::date(question.created_at)) }
                                td.actions {
                                    (components::nav_link(&names::question_stats_url(question.id), html! {
                                        span."material-symbols-rounded" title=(t!("question.stats", locale = locale)) { "bar_chart" }
                                    }))
                                    (components::nav_link(&names::edit_question_url(question.id), html! {
                                        span."material-symbols-rounded" title=(t!("common.edit", locale = locale)) { "edit" }
                                    }))
                                    (delete_button(question.id, locale))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn kind_label(question: &Question, locale: &str) -> String {
    match question.answer.kind() {
        "essay" => t!("question.kind_essay", locale = locale).to_string(),
        _ => t!("question.kind_multiple_choice", locale = locale).to_string(),
    }
}

fn delete_button(question_id: i32, locale: &str) -> Markup {
    html! {
        a href="#"
          hx-post=(names::delete_question_url(question_id))
          hx-confirm=(t!("question.delete_confirm", locale = locale))
          title=(t!("common.delete", locale = locale)) {
            span."material-symbols-rounded" { "delete" }
        }
    }
}

pub fn question_form(
    mode: FormMode,
    form: &QuestionForm,
    rejection: Option<QuestionRejection>,
    locale: &str,
) -> Markup {
    let (title, action, submit) = match mode {
        FormMode::Create => (
            t!("question.create_title", locale = locale),
            names::CREATE_QUESTION_URL.to_string(),
            t!("question.create_btn", locale = locale),
        ),
        FormMode::Edit(id) => (
            t!("question.edit_title", locale = locale),
            names::edit_question_url(id),
            t!("common.save", locale = locale),
        ),
    };
    let correct = form.correct_option.trim().parse::<usize>().ok();

    html! {
        h1 { (title) }
        (components::rejection(rejection.map(QuestionRejection::key), locale))

        form.question-form
             hx-post=(action)
             hx-target="main"
             hx-disabled-elt="find button" {
            label {
                (t!("question.title", locale = locale))
                input type="text" name="title" value=(form.title) required;
            }
            div.grid {
                label {
                    (t!("question.category", locale = locale))
                    select name="category" required {
                        option value="" { "-" }
                        @for category in names::SUBJECTS {
                            option value=(category) selected[form.category == *category] { (category) }
                        }
                    }
                }
                label {
                    (t!("question.difficulty", locale = locale))
                    select name="difficulty" required {
                        option value="" { "-" }
                        @for difficulty in Difficulty::ALL {
                            option value=(difficulty.label()) selected[form.difficulty == difficulty.label()] {
                                (difficulty.label())
                            }
                        }
                    }
                }
            }
            label {
                (t!("question.prompt", locale = locale))
                textarea name="prompt" rows="4" required { (form.prompt) }
            }

            fieldset.kind-picker {
                legend { (t!("question.kind", locale = locale)) }
                label {
                    input type="radio" name="kind" value="multiple-choice" checked[!form.is_essay()];
                    (t!("question.kind_multiple_choice", locale = locale))
                }
                label {
                    input type="radio" name="kind" value="essay" checked[form.is_essay()];
                    (t!("question.kind_essay", locale = locale))
                }
            }

            fieldset.mc-fields {
                legend { (t!("question.options", locale = locale)) }
                @for (idx, option) in form.options.iter().enumerate() {
                    div.option-row {
                        input type="radio"
                              name="correct_option"
                              value=(idx)
                              checked[correct == Some(idx)]
                              aria-label=(t!("question.mark_correct", locale = locale));
                        input type="text"
                              name="options"
                              value=(option)
                              placeholder=(format!("{} {}", t!("question.option", locale = locale), idx + 1));
                    }
                }
                small { (t!("question.options_hint", locale = locale)) }
            }

            fieldset.essay-fields {
                label {
                    (t!("question.expected_answer", locale = locale))
                    textarea name="expected_answer" rows="3" { (form.expected_answer) }
                }
            }

            label {
                (t!("question.explanation", locale = locale))
                textarea name="explanation" rows="2" { (form.explanation) }
            }

            div.form-actions {
                (components::nav_link(names::QUESTIONS_URL, html! {
                    span role="button" class="secondary outline" { (t!("common.cancel", locale = locale)) }
                }))
                button type="submit" { (submit) }
            }
        }
    }
}

pub fn question_detail(question: &Question, usage: usize, locale: &str) -> Markup {
    html! {
        div.page-header {
            h1 { (question.title) }
            div {
                (components::nav_link(&names::question_stats_url(question.id), html! {
                    span role="button" class="secondary outline" { (t!("question.stats", locale = locale)) }
                }))
                " "
                (components::nav_link(&names::edit_question_url(question.id), html! {
                    span role="button" { (t!("common.edit", locale = locale)) }
                }))
            }
        }

        p {
            span.badge { (question.category) }
            " "
            (components::difficulty_badge(question.difficulty))
            " "
            span.badge { (kind_label(question, locale)) }
        }
        p {
            small {
                (t!("question.created", locale = locale)) ": " (components::date(question.created_at))
                " · "
                (t!("question.updated", locale = locale)) ": " (components::date(question.updated_at))
                " · "
                (t!("question.used_in", locale = locale, count = usage))
            }
        }

        @match &question.answer {
            crate::db::Answer::MultipleChoice { .. } => {
                (solve::solve_card(question, &SolveContext::Preview, None, locale))
            }
            crate::db::Answer::Essay { expected } => {
                article {
                    p.prompt { (question.prompt) }
                    h4 { (t!("question.expected_answer", locale = locale)) }
                    p { (expected) }
                    @if let Some(explanation) = &question.explanation {
                        h4 { (t!("question.explanation", locale = locale)) }
                        p { (explanation) }
                    }
                }
            }
        }
    }
}

pub fn question_stats(question: &Question, stats: &QuestionStats, locale: &str) -> Markup {
    let total = stats.options.iter().map(|o| o.count).sum::<u32>();

    html! {
        h1 { (t!("question.stats_title", locale = locale)) }
        p {
            (components::nav_link(&names::question_url(question.id), html! { (question.title) }))
        }

        div.stat-grid {
            (components::stat_card("done_all", &t!("stats.answered", locale = locale), &stats.tally.answered.to_string()))
            (components::stat_card("check_circle", &t!("stats.correct", locale = locale), &stats.tally.correct.to_string()))
            (components::stat_card("percent", &t!("stats.accuracy", locale = locale), &components::percent(stats.tally.accuracy())))
        }

        @if !stats.options.is_empty() {
            article {
                h4 { (t!("question.option_distribution", locale = locale)) }
                @for option in &stats.options {
                    div.option-stat.correct[option.is_correct] {
                        span { (option.option) }
                        (components::progress(option.count, total))
                    }
                }
            }
        }

        article {
            h4 { (t!("question.in_exams", locale = locale)) }
            @if stats.exams.is_empty() {
                (components::empty_state(&t!("question.in_no_exam", locale = locale)))
            } @else {
                ul {
                    @for exam in &stats.exams {
                        li {
                            (components::nav_link(&names::exam_url(exam.id), html! { (exam.title) }))
                        }
                    }
                }
            }
        }
    }
}
