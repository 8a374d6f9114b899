use maud::{html, Markup};
use rust_i18n::t;

use super::components;
use crate::{
    db::{AttemptTally, Exam, Question},
    names,
};

/// Where the card is shown: inside the practice run, or as a preview on the
/// question page (answers there are not recorded).
pub enum SolveContext {
    Practice {
        idx: usize,
        total: usize,
        exam_id: Option<i32>,
        tally: AttemptTally,
    },
    Preview,
}

pub enum SolveOutcome {
    NoChoice,
    Answered { chosen: usize, correct: bool },
}

fn next_url(idx: usize, total: usize, exam_id: Option<i32>) -> String {
    let next = if idx.saturating_add(1) >= total { 0 } else { idx + 1 };
    match exam_id {
        Some(exam_id) => format!("{}&idx={next}", names::solve_exam_url(exam_id)),
        None => format!("{}?idx={next}", names::SOLVE_URL),
    }
}

pub fn solve_page(
    question: Option<&Question>,
    context: &SolveContext,
    exam: Option<&Exam>,
    locale: &str,
) -> Markup {
    html! {
        h1 { (t!("solve.title", locale = locale)) }
        @if let Some(exam) = exam {
            p {
                (t!("solve.exam", locale = locale)) ": "
                (components::nav_link(&names::exam_url(exam.id), html! { strong { (exam.title) } }))
            }
        }

        @match question {
            Some(question) => {
                (solve_card(question, context, None, locale))
            }
            None => {
                (components::empty_state(&t!("solve.empty", locale = locale)))
            }
        }
    }
}

pub fn solve_card(
    question: &Question,
    context: &SolveContext,
    outcome: Option<&SolveOutcome>,
    locale: &str,
) -> Markup {
    let answered = match outcome {
        Some(SolveOutcome::Answered { chosen, correct }) => Some((*chosen, *correct)),
        _ => None,
    };
    let right = question.answer.correct_option();

    html! {
        article #solve-card {
            @if let SolveContext::Practice { idx, total, tally, .. } = context {
                header.solve-header {
                    small { (t!("solve.position", locale = locale, current = idx + 1, total = total)) }
                    small { (t!("solve.score", locale = locale, correct = tally.correct, answered = tally.answered)) }
                }
            }

            p.prompt { (question.prompt) }

            @if let Some(SolveOutcome::NoChoice) = outcome {
                p.notice.notice-error role="alert" { (t!("solve.select_option", locale = locale)) }
            }

            @if let Some((chosen, correct)) = answered {
                ul.options.answered {
                    @for (idx, option) in question.answer.options().iter().enumerate() {
                        li.correct[right == Some(idx)].wrong[idx == chosen && !correct] {
                            (option)
                        }
                    }
                }
                @if correct {
                    p.notice.notice-success role="status" { (t!("solve.correct", locale = locale)) }
                } @else {
                    p.notice.notice-error role="status" { (t!("solve.incorrect", locale = locale)) }
                }
                @if let Some(explanation) = &question.explanation {
                    p.explanation { (explanation) }
                }
                @match context {
                    SolveContext::Practice { idx, total, exam_id, .. } => {
                        (components::nav_link(&next_url(*idx, *total, *exam_id), html! {
                            span role="button" { (t!("solve.next", locale = locale)) }
                        }))
                    }
                    SolveContext::Preview => {
                        (components::nav_link(&names::question_url(question.id), html! {
                            span role="button" class="secondary outline" { (t!("solve.try_again", locale = locale)) }
                        }))
                    }
                }
            } @else {
                form hx-post=(names::SUBMIT_ANSWER_URL)
                     hx-target="#solve-card"
                     hx-swap="outerHTML"
                     hx-disabled-elt="find button" {
                    input type="hidden" name="question_id" value=(question.id);
                    @if let SolveContext::Practice { idx, exam_id, .. } = context {
                        input type="hidden" name="idx" value=(idx);
                        @if let Some(exam_id) = exam_id {
                            input type="hidden" name="prova" value=(exam_id);
                        }
                    }
                    fieldset {
                        @for (idx, option) in question.answer.options().iter().enumerate() {
                            label {
                                input type="radio" name="option" value=(idx);
                                (option)
                            }
                        }
                    }
                    button type="submit" { (t!("solve.submit", locale = locale)) }
                }
            }
        }
    }
}
