use maud::{html, Markup};
use rust_i18n::t;

use super::{components, dashboard, layout};
use crate::{
    db::{ActivityEntry, AttemptTally, AuthUser, CategoryStats, ExamSummary, StudentResult},
    models::Notice,
    names,
    services::auth::MIN_PASSWORD_LENGTH,
};

pub struct ProfileData<'a> {
    pub tally: &'a AttemptTally,
    pub categories: &'a [CategoryStats],
    pub activity: &'a [ActivityEntry],
    pub completed: &'a [(ExamSummary, StudentResult)],
}

pub fn profile_page(user: &AuthUser, data: ProfileData<'_>, locale: &str) -> Markup {
    let average = if data.completed.is_empty() {
        None
    } else {
        let total: u32 = data.completed.iter().map(|(_, r)| r.score).sum();
        Some(f64::from(total) / data.completed.len() as f64)
    };

    html! {
        h1 { (user.display_name) }
        p { small { (user.email) " · " (components::role_label(user.role, locale)) } }

        div.stat-grid {
            (components::stat_card("done_all", &t!("stats.answered", locale = locale), &data.tally.answered.to_string()))
            (components::stat_card("check_circle", &t!("stats.correct", locale = locale), &data.tally.correct.to_string()))
            (components::stat_card("percent", &t!("stats.accuracy", locale = locale), &components::percent(data.tally.accuracy())))
            (components::stat_card("grading", &t!("profile.exam_average", locale = locale),
                &average.map_or_else(|| "-".to_string(), components::percent)))
        }

        article {
            h4 { (t!("profile.progress", locale = locale)) }
            (dashboard::category_table(data.categories, locale))
        }

        article {
            h4 { (t!("profile.recent_activity", locale = locale)) }
            @if data.activity.is_empty() {
                (components::empty_state(&t!("profile.no_activity", locale = locale)))
            } @else {
                ul.activity {
                    @for entry in data.activity {
                        li {
                            @if entry.correct {
                                span."material-symbols-rounded text-success" aria-hidden="true" { "check_circle" }
                            } @else {
                                span."material-symbols-rounded text-error" aria-hidden="true" { "cancel" }
                            }
                            " " (entry.title) " "
                            small { (entry.category) " · " (components::date(entry.answered_on)) }
                        }
                    }
                }
            }
        }

        article {
            h4 { (t!("profile.completed_exams", locale = locale)) }
            @if data.completed.is_empty() {
                (components::empty_state(&t!("exam.no_completed", locale = locale)))
            } @else {
                table {
                    tbody {
                        @for (summary, result) in data.completed {
                            tr {
                                td {
                                    (components::nav_link(&names::exam_url(summary.exam.id), html! { (summary.exam.title) }))
                                }
                                td { (result.score) }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub enum ProfileState {
    NoError,
    EmptyName,
}

pub enum PasswordState {
    NoError,
    EmptyFields,
    Mismatch,
    WeakPassword,
    IncorrectPassword,
}

impl PasswordState {
    fn message(&self, locale: &str) -> Option<String> {
        let msg = match self {
            PasswordState::NoError => return None,
            PasswordState::EmptyFields => t!("settings.empty_fields", locale = locale),
            PasswordState::Mismatch => t!("settings.password_mismatch", locale = locale),
            PasswordState::WeakPassword => {
                t!("settings.weak_password", locale = locale, min = MIN_PASSWORD_LENGTH)
            }
            PasswordState::IncorrectPassword => {
                t!("settings.incorrect_password", locale = locale)
            }
        };
        Some(msg.to_string())
    }
}

pub fn settings_page(
    user: &AuthUser,
    profile: ProfileState,
    password: PasswordState,
    notice: Option<Notice>,
    locale: &str,
) -> Markup {
    let password_error = password.message(locale);

    html! {
        h1 { (t!("settings.title", locale = locale)) }
        (components::notice(notice, locale))

        article {
            h4 { (t!("settings.profile_title", locale = locale)) }
            form hx-post=(names::SETTINGS_PROFILE_URL)
                 hx-target="main"
                 hx-disabled-elt="find input, find button" {
                label {
                    (t!("homepage.email", locale = locale))
                    input type="email" value=(user.email) disabled;
                }
                label {
                    (t!("homepage.display_name", locale = locale))
                    @match profile {
                        ProfileState::EmptyName => {
                            input name="display_name" type="text" value=(user.display_name) aria-invalid="true";
                            small { (t!("settings.empty_name", locale = locale)) }
                        }
                        ProfileState::NoError => {
                            input name="display_name" type="text" value=(user.display_name) required;
                        }
                    }
                }
                button type="submit" { (t!("common.save", locale = locale)) }
            }
        }

        article {
            h4 { (t!("settings.password_title", locale = locale)) }
            form hx-post=(names::SETTINGS_PASSWORD_URL)
                 hx-target="main"
                 hx-disabled-elt="find input, find button" {
                label {
                    (t!("settings.current_password", locale = locale))
                    input name="current_password"
                          type="password"
                          autocomplete="current-password"
                          aria-invalid=[password_error.as_ref().map(|_| "true")];
                }
                label {
                    (t!("settings.new_password", locale = locale))
                    input name="new_password"
                          type="password"
                          autocomplete="new-password"
                          minlength=(MIN_PASSWORD_LENGTH);
                }
                label {
                    (t!("settings.confirm_password", locale = locale))
                    input name="confirm_password"
                          type="password"
                          autocomplete="new-password";
                    @if let Some(msg) = &password_error {
                        small.text-error { (msg) }
                    }
                }
                button type="submit" { (t!("settings.change_password_btn", locale = locale)) }
            }
        }

        article {
            h4 { (t!("layout.language", locale = locale)) }
            (layout::language_picker(locale))
        }
    }
}
