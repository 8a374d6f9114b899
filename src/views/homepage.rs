use maud::{html, Markup};
use rust_i18n::t;

use crate::names;

pub fn landing_page(locale: &str) -> Markup {
    html! {
        section.landing-hero {
            h1 { (t!("landing.tagline", locale = locale)) }
            p.landing-hero-desc { (t!("landing.description", locale = locale)) }
            div.landing-cta {
                a role="button" href=(names::LOGIN_URL) {
                    (t!("landing.log_in", locale = locale))
                }
                a role="button" href=(names::REGISTER_URL) class="outline" {
                    (t!("landing.sign_up", locale = locale))
                }
            }
        }

        section.landing-features {
            div.landing-features-grid {
                article.landing-feature-card {
                    span."material-symbols-rounded landing-feature-icon" { "description" }
                    h3 { (t!("landing.feature_bank_title", locale = locale)) }
                    p { (t!("landing.feature_bank_desc", locale = locale)) }
                }
                article.landing-feature-card {
                    span."material-symbols-rounded landing-feature-icon" { "assignment" }
                    h3 { (t!("landing.feature_exams_title", locale = locale)) }
                    p { (t!("landing.feature_exams_desc", locale = locale)) }
                }
                article.landing-feature-card {
                    span."material-symbols-rounded landing-feature-icon" { "quiz" }
                    h3 { (t!("landing.feature_practice_title", locale = locale)) }
                    p { (t!("landing.feature_practice_desc", locale = locale)) }
                }
                article.landing-feature-card {
                    span."material-symbols-rounded landing-feature-icon" { "analytics" }
                    h3 { (t!("landing.feature_results_title", locale = locale)) }
                    p { (t!("landing.feature_results_desc", locale = locale)) }
                }
            }
        }
    }
}

pub enum LoginState {
    NoError,
    EmptyFields,
    IncorrectPassword,
}

pub fn login(state: LoginState, locale: &str) -> Markup {
    let error_msg = match state {
        LoginState::NoError => None,
        LoginState::EmptyFields => Some(t!("homepage.empty_fields", locale = locale)),
        LoginState::IncorrectPassword => {
            Some(t!("homepage.incorrect_password", locale = locale))
        }
    };

    html! {
        h1 { (t!("homepage.login_title", locale = locale)) }
        article style="width: fit-content;" {
            form hx-post=(names::LOGIN_URL)
                 hx-target="main"
                 hx-disabled-elt="find input, find button"
                 hx-swap="innerHTML" {
                label {
                    (t!("homepage.email", locale = locale))
                    input name="email"
                          type="email"
                          autocomplete="email"
                          required="true"
                          placeholder=(t!("homepage.email", locale = locale))
                          aria-label=(t!("homepage.email", locale = locale));
                }
                label {
                    (t!("homepage.password", locale = locale))
                    @if let Some(ref msg) = error_msg {
                        input name="password"
                              type="password"
                              autocomplete="current-password"
                              required="true"
                              placeholder=(t!("homepage.password", locale = locale))
                              aria-invalid="true"
                              aria-label=(t!("homepage.password", locale = locale));
                        small { (msg) }
                    } @else {
                        input name="password"
                              type="password"
                              autocomplete="current-password"
                              required="true"
                              placeholder=(t!("homepage.password", locale = locale))
                              aria-label=(t!("homepage.password", locale = locale));
                    }
                }
                button type="submit" { (t!("homepage.login_btn", locale = locale)) }
            }
            p {
                (t!("homepage.no_account", locale = locale))
                " "
                a href=(names::REGISTER_URL) { (t!("homepage.register", locale = locale)) }
            }
            p {
                small { (t!("homepage.demo_accounts", locale = locale)) }
            }
        }
    }
}

pub enum RegisterState {
    NoError,
    EmailTaken,
    EmptyFields,
    WeakPassword,
}

pub fn register(state: RegisterState, locale: &str) -> Markup {
    let error_msg = match state {
        RegisterState::NoError => None,
        RegisterState::EmailTaken => Some(t!("homepage.email_taken", locale = locale)),
        RegisterState::EmptyFields => Some(t!("homepage.empty_fields", locale = locale)),
        RegisterState::WeakPassword => Some(t!("homepage.weak_password", locale = locale)),
    };

    html! {
        h1 { (t!("homepage.register_title", locale = locale)) }
        p { (t!("homepage.register_desc", locale = locale)) }
        article style="width: fit-content;" {
            form hx-post=(names::REGISTER_URL)
                 hx-target="main"
                 hx-disabled-elt="find input, find button"
                 hx-swap="innerHTML" {
                label {
                    (t!("homepage.email", locale = locale))
                    input name="email"
                          type="email"
                          autocomplete="email"
                          required="true"
                          placeholder=(t!("homepage.email", locale = locale))
                          aria-label=(t!("homepage.email", locale = locale));
                }
                label {
                    (t!("homepage.display_name", locale = locale))
                    input name="display_name"
                          type="text"
                          autocomplete="name"
                          required="true"
                          placeholder=(t!("homepage.display_name", locale = locale))
                          aria-label=(t!("homepage.display_name", locale = locale));
                }
                fieldset {
                    legend { (t!("homepage.role", locale = locale)) }
                    label {
                        input type="radio" name="role" value="aluno" checked;
                        (t!("role.aluno", locale = locale))
                    }
                    label {
                        input type="radio" name="role" value="professor";
                        (t!("role.professor", locale = locale))
                    }
                }
                label {
                    (t!("homepage.password", locale = locale))
                    @if let Some(ref msg) = error_msg {
                        input name="password"
                              type="password"
                              autocomplete="new-password"
                              required="true"
                              placeholder=(t!("homepage.password", locale = locale))
                              aria-invalid="true"
                              aria-label=(t!("homepage.password", locale = locale));
                        small { (msg) }
                    } @else {
                        input name="password"
                              type="password"
                              autocomplete="new-password"
                              required="true"
                              placeholder=(t!("homepage.password", locale = locale))
                              aria-label=(t!("homepage.password", locale = locale));
                    }
                }
                button type="submit" { (t!("homepage.register_btn", locale = locale)) }
            }
            p {
                (t!("homepage.already_have_account", locale = locale))
                " "
                a href=(names::LOGIN_URL) { (t!("homepage.log_in", locale = locale)) }
            }
        }
    }
}
