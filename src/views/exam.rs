use maud::{html, Markup};
use rust_i18n::t;

use super::components::{self, FormMode};
use crate::{
    db::{Class, ExamSummary, Question, StudentResult},
    listing::ListQuery,
    models::{ExamForm, Notice},
    names,
    services::exam::ExamRejection,
};

fn subject_options() -> Vec<(&'static str, String)> {
    names::SUBJECTS.iter().map(|s| (*s, s.to_string())).collect()
}

fn status_badge(summary: &ExamSummary, locale: &str) -> Markup {
    html! {
        @if summary.exam.completed {
            span.badge.badge-done { (t!("exam.status_completed", locale = locale)) }
        } @else {
            span.badge.badge-active { (t!("exam.status_active", locale = locale)) }
        }
    }
}

fn completion(summary: &ExamSummary) -> (u32, u32) {
    summary.classes.iter().fold((0, 0), |(done, total), class| {
        (done + class.completed, total + class.student_count)
    })
}

pub fn teacher_exam_list(
    exams: &[ExamSummary],
    query: &ListQuery,
    notice: Option<Notice>,
    locale: &str,
) -> Markup {
    let statuses = [
        ("active", t!("exam.status_active", locale = locale).to_string()),
        ("completed", t!("exam.status_completed", locale = locale).to_string()),
    ];

    html! {
        div.page-header {
            h1 { (t!("exam.list_title", locale = locale)) }
            (components::nav_link(names::CREATE_EXAM_URL, html! {
                span role="button" { (t!("exam.new", locale = locale)) }
            }))
        }

        (components::notice(notice, locale))

        (components::filter_form(names::EXAMS_URL, query, html! {
            (components::search_input(query, &t!("exam.search", locale = locale)))
            (components::select_filter("subject", &query.subject, &t!("exam.all_subjects", locale = locale), &subject_options()))
            (components::select_filter("status", &query.status, &t!("exam.all_statuses", locale = locale), &statuses))
        }))

        @if exams.is_empty() {
            (components::empty_state(&t!("exam.empty", locale = locale)))
        } @else {
            figure {
                table.striped {
                    thead {
                        tr {
                            (components::sort_header(names::EXAMS_URL, query, "title", &t!("exam.title", locale = locale)))
                            (components::sort_header(names::EXAMS_URL, query, "subject", &t!("exam.subject", locale = locale)))
                            (components::sort_header(names::EXAMS_URL, query, "due", &t!("exam.due_date", locale = locale)))
                            th scope="col" { (t!("exam.completion", locale = locale)) }
                            (components::sort_header(names::EXAMS_URL, query, "score", &t!("exam.average", locale = locale)))
                            th scope="col" { (t!("exam.status", locale = locale)) }
                            th scope="col" { (t!("common.actions", locale = locale)) }
                        }
                    }
                    tbody {
                        @for summary in exams {
                            @let (done, total) = completion(summary);
                            tr {
                                td {
                                    (components::nav_link(&names::exam_url(summary.exam.id), html! { (summary.exam.title) }))
                                }
                                td { (summary.exam.subject) }
                                td { (components::date(summary.exam.due_date)) }
                                td { (components::progress(done, total)) }
                                td {
                                    @match summary.average_score {
                                        Some(score) => { (components::percent(score)) }
                                        None => { "-" }
                                    }
                                }
                                td { (status_badge(summary, locale)) }
                                td.actions {
                                    (components::nav_link(&names::exam_results_url(summary.exam.id), html! {
                                        span."material-symbols-rounded" title=(t!("exam.results", locale = locale)) { "leaderboard" }
                                    }))
                                    (components::nav_link(&names::edit_exam_url(summary.exam.id), html! {
                                        span."material-symbols-rounded" title=(t!("common.edit", locale = locale)) { "edit" }
                                    }))
                                    a href="#"
                                      hx-post=(names::delete_exam_url(summary.exam.id))
                                      hx-confirm=(t!("exam.delete_confirm", locale = locale))
                                      title=(t!("common.delete", locale = locale)) {
                                        span."material-symbols-rounded" { "delete" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum StudentTab {
    Pending,
    Completed,
}

impl StudentTab {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("completed") => StudentTab::Completed,
            _ => StudentTab::Pending,
        }
    }
}

pub fn student_exam_list(
    pending: &[ExamSummary],
    completed: &[(ExamSummary, StudentResult)],
    tab: StudentTab,
    query: &ListQuery,
    locale: &str,
) -> Markup {
    let tab_link = |target: StudentTab, key: &str, count: usize| {
        let href = match target {
            StudentTab::Pending => format!("{}?tab=pending", names::EXAMS_URL),
            StudentTab::Completed => format!("{}?tab=completed", names::EXAMS_URL),
        };
        html! {
            li {
                a href=(href)
                  hx-get=(href)
                  hx-target="main"
                  hx-push-url="true"
                  aria-current=[(tab == target).then_some("page")] {
                    (t!(key, locale = locale)) " (" (count) ")"
                }
            }
        }
    };

    html! {
        h1 { (t!("exam.my_exams", locale = locale)) }

        nav.tabs {
            ul {
                (tab_link(StudentTab::Pending, "exam.tab_pending", pending.len()))
                (tab_link(StudentTab::Completed, "exam.tab_completed", completed.len()))
            }
        }

        (components::filter_form(names::EXAMS_URL, query, html! {
            input type="hidden" name="tab" value=(if tab == StudentTab::Completed { "completed" } else { "pending" });
            (components::search_input(query, &t!("exam.search", locale = locale)))
            (components::select_filter("subject", &query.subject, &t!("exam.all_subjects", locale = locale), &subject_options()))
        }))

        @match tab {
            StudentTab::Pending => {
                @if pending.is_empty() {
                    (components::empty_state(&t!("exam.no_pending", locale = locale)))
                }
                div.card-grid {
                    @for summary in pending {
                        article.exam-card {
                            header {
                                strong { (summary.exam.title) }
                                br;
                                small { (summary.exam.subject) }
                            }
                            p {
                                span."material-symbols-rounded" aria-hidden="true" { "schedule" }
                                " " (t!("exam.duration_minutes", locale = locale, minutes = summary.exam.duration_minutes))
                            }
                            p {
                                span."material-symbols-rounded" aria-hidden="true" { "event" }
                                " " (t!("exam.due_on", locale = locale, date = components::date(summary.exam.due_date)))
                            }
                            footer {
                                (components::nav_link(&names::exam_url(summary.exam.id), html! {
                                    span role="button" { (t!("exam.open", locale = locale)) }
                                }))
                            }
                        }
                    }
                }
            }
            StudentTab::Completed => {
                @if completed.is_empty() {
                    (components::empty_state(&t!("exam.no_completed", locale = locale)))
                } @else {
                    table.striped {
                        thead {
                            tr {
                                th { (t!("exam.title", locale = locale)) }
                                th { (t!("exam.subject", locale = locale)) }
                                th { (t!("results.score", locale = locale)) }
                                th { (t!("results.status", locale = locale)) }
                            }
                        }
                        tbody {
                            @for (summary, result) in completed {
                                tr {
                                    td {
                                        (components::nav_link(&names::exam_url(summary.exam.id), html! { (summary.exam.title) }))
                                    }
                                    td { (summary.exam.subject) }
                                    td { (result.score) }
                                    td { (pass_badge(result, locale)) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn pass_badge(result: &StudentResult, locale: &str) -> Markup {
    html! {
        @if result.passed() {
            span.badge.badge-easy { (t!("results.passed", locale = locale)) }
        } @else {
            span.badge.badge-hard { (t!("results.failed", locale = locale)) }
        }
    }
}

pub fn exam_form(
    mode: FormMode,
    form: &ExamForm,
    classes: &[Class],
    questions: &[Question],
    rejection: Option<ExamRejection>,
    locale: &str,
) -> Markup {
    let (title, action, submit) = match mode {
        FormMode::Create => (
            t!("exam.create_title", locale = locale),
            names::CREATE_EXAM_URL.to_string(),
            t!("exam.create_btn", locale = locale),
        ),
        FormMode::Edit(id) => (
            t!("exam.edit_title", locale = locale),
            names::edit_exam_url(id),
            t!("common.save", locale = locale),
        ),
    };

    html! {
        h1 { (title) }
        (components::rejection(rejection.map(ExamRejection::key), locale))

        form.exam-form
             hx-post=(action)
             hx-target="main"
             hx-disabled-elt="find button" {
            label {
                (t!("exam.title", locale = locale))
                input type="text" name="title" value=(form.title) required;
            }
            div.grid {
                label {
                    (t!("exam.subject", locale = locale))
                    select name="subject" required {
                        option value="" { "-" }
                        @for subject in names::SUBJECTS {
                            option value=(subject) selected[form.subject == *subject] { (subject) }
                        }
                    }
                }
                label {
                    (t!("exam.duration", locale = locale))
                    input type="number"
                          name="duration"
                          min=(names::MIN_EXAM_DURATION)
                          max=(names::MAX_EXAM_DURATION)
                          value=(form.duration)
                          required;
                }
                label {
                    (t!("exam.due_date", locale = locale))
                    input type="date" name="due_date" value=(form.due_date) required;
                }
            }
            label {
                (t!("exam.description", locale = locale))
                textarea name="description" rows="3" { (form.description) }
            }

            fieldset {
                legend { (t!("exam.classes", locale = locale)) }
                div.checkbox-grid {
                    @for class in classes {
                        label {
                            input type="checkbox"
                                  name="classes"
                                  value=(class.id)
                                  checked[form.classes.contains(&class.id)];
                            (class.name) " "
                            small { (t!("exam.student_count", locale = locale, count = class.student_count)) }
                        }
                    }
                }
            }

            fieldset {
                legend { (t!("exam.questions", locale = locale)) }
                @for question in questions {
                    label {
                        input type="checkbox"
                              name="questions"
                              value=(question.id)
                              checked[form.questions.contains(&question.id)];
                        (question.title) " "
                        small { (question.category) " · " (question.difficulty.label()) }
                    }
                }
                small { (t!("exam.selected_questions", locale = locale, count = form.questions.len())) }
            }

            div.form-actions {
                (components::nav_link(names::EXAMS_URL, html! {
                    span role="button" class="secondary outline" { (t!("common.cancel", locale = locale)) }
                }))
                button type="submit" { (submit) }
            }
        }
    }
}

pub fn exam_detail(
    summary: &ExamSummary,
    questions: &[Question],
    is_teacher: bool,
    locale: &str,
) -> Markup {
    let exam = &summary.exam;
    let (done, total) = completion(summary);

    html! {
        div.page-header {
            h1 { (exam.title) }
            div {
                @if is_teacher {
                    (components::nav_link(&names::exam_results_url(exam.id), html! {
                        span role="button" class="secondary outline" { (t!("exam.results", locale = locale)) }
                    }))
                    " "
                    (components::nav_link(&names::edit_exam_url(exam.id), html! {
                        span role="button" { (t!("common.edit", locale = locale)) }
                    }))
                } @else if !exam.completed {
                    (components::nav_link(&names::solve_exam_url(exam.id), html! {
                        span role="button" { (t!("exam.start", locale = locale)) }
                    }))
                }
            }
        }

        p { span.badge { (exam.subject) } " " (status_badge(summary, locale)) }
        @if !exam.description.is_empty() {
            p { (exam.description) }
        }

        div.stat-grid {
            (components::stat_card("schedule", &t!("exam.duration", locale = locale), &exam.duration_minutes.to_string()))
            (components::stat_card("event", &t!("exam.due_date", locale = locale), &components::date(exam.due_date)))
            (components::stat_card("help", &t!("exam.questions", locale = locale), &questions.len().to_string()))
            @if is_teacher {
                (components::stat_card("grading", &t!("exam.average", locale = locale),
                    &summary.average_score.map_or_else(|| "-".to_string(), components::percent)))
            }
        }

        @if is_teacher {
            article {
                h4 { (t!("exam.class_progress", locale = locale)) }
                table {
                    tbody {
                        @for class in &summary.classes {
                            tr {
                                td { (class.name) }
                                td { (components::progress(class.completed, class.student_count)) }
                            }
                        }
                        tr {
                            th { (t!("exam.total", locale = locale)) }
                            th { (components::progress(done, total)) }
                        }
                    }
                }
            }
        }

        article {
            h4 { (t!("exam.questions", locale = locale)) }
            ol {
                @for question in questions {
                    li {
                        @if is_teacher {
                            (components::nav_link(&names::question_url(question.id), html! { (question.title) }))
                        } @else {
                            (question.title)
                        }
                        " "
                        (components::difficulty_badge(question.difficulty))
                    }
                }
            }
        }
    }
}

pub struct ResultsData<'a> {
    pub summary: &'a ExamSummary,
    pub results: &'a [StudentResult],
    pub total_results: usize,
    pub average: Option<f64>,
    pub pass_rate: Option<f64>,
}

pub fn exam_results(
    data: ResultsData<'_>,
    query: &ListQuery,
    notice: Option<Notice>,
    locale: &str,
) -> Markup {
    let exam = &data.summary.exam;
    let action = names::exam_results_url(exam.id);
    let classes: Vec<(&str, String)> = data
        .summary
        .classes
        .iter()
        .map(|c| (c.name.as_str(), c.name.clone()))
        .collect();
    let statuses = [
        ("passed", t!("results.passed", locale = locale).to_string()),
        ("failed", t!("results.failed", locale = locale).to_string()),
    ];

    html! {
        div.page-header {
            div {
                h1 { (t!("results.title", locale = locale)) }
                p { (components::nav_link(&names::exam_url(exam.id), html! { (exam.title) })) }
            }
            div {
                button.secondary.outline hx-post=(names::print_results_url(exam.id)) { (t!("results.print", locale = locale)) }
                " "
                button hx-post=(names::export_results_url(exam.id)) { (t!("results.export", locale = locale)) }
            }
        }

        (components::notice(notice, locale))

        div.stat-grid {
            (components::stat_card("groups", &t!("results.submissions", locale = locale), &data.total_results.to_string()))
            (components::stat_card("grading", &t!("exam.average", locale = locale),
                &data.average.map_or_else(|| "-".to_string(), components::percent)))
            (components::stat_card("verified", &t!("results.pass_rate", locale = locale),
                &data.pass_rate.map_or_else(|| "-".to_string(), components::percent)))
        }

        (components::filter_form(&action, query, html! {
            (components::search_input(query, &t!("results.search", locale = locale)))
            (components::select_filter("class", &query.class, &t!("results.all_classes", locale = locale), &classes))
            (components::select_filter("status", &query.status, &t!("results.all_statuses", locale = locale), &statuses))
        }))

        @if data.results.is_empty() {
            (components::empty_state(&t!("results.empty", locale = locale)))
        } @else {
            figure {
                table.striped {
                    thead {
                        tr {
                            (components::sort_header(&action, query, "name", &t!("results.student", locale = locale)))
                            (components::sort_header(&action, query, "class", &t!("results.class", locale = locale)))
                            (components::sort_header(&action, query, "score", &t!("results.score", locale = locale)))
                            (components::sort_header(&action, query, "time", &t!("results.time", locale = locale)))
                            th scope="col" { (t!("results.status", locale = locale)) }
                        }
                    }
                    tbody {
                        @for result in data.results {
                            tr {
                                td { (result.student_name) }
                                td { (result.class_name) }
                                td { (result.score) }
                                td { (t!("exam.duration_minutes", locale = locale, minutes = result.completion_minutes)) }
                                td { (pass_badge(result, locale)) }
                            }
                        }
                    }
                }
            }
        }
    }
}
