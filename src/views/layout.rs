use maud::{html, Markup, DOCTYPE};
use rust_i18n::t;

use crate::{
    db::models::AuthUser,
    names,
    navigation::{self, NavItem},
    utils,
    views::components,
};

const PICO_CSS: &str = "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css";
const MATERIAL_SYMBOLS: &str =
    "https://fonts.googleapis.com/css2?family=Material+Symbols+Rounded:opsz,wght,FILL,GRAD@24,400,0,0";
const HTMX_JS: &str = "https://unpkg.com/htmx.org@2.0.4/dist/htmx.min.js";

fn css() -> Markup {
    html! {
        link rel="stylesheet" href=(PICO_CSS);
        link rel="stylesheet" href=(MATERIAL_SYMBOLS);
        link rel="stylesheet" href="/static/index.css";
    }
}

fn js() -> Markup {
    html! {
        script src=(HTMX_JS) {}
    }
}

fn icon() -> Markup {
    html! {
        link rel="icon" href="/static/img/icon.svg" type="image/svg+xml" {}
    }
}

fn head(title: &str) -> Markup {
    html! {
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            meta name="color-scheme" content="light dark";

            (css())
            (js())
            (icon())

            title { (format!("{title} - Quest Lab")) }
        }
    }
}

fn header(locale: &str) -> Markup {
    html! {
        header {
            nav {
                ul {
                    li."secondary" {
                        a href="/" {
                            strong { "Quest Lab" }
                        }
                    }
                }
                ul {
                    li { (language_picker(locale)) }
                    li."secondary" { (utils::VERSION) }
                }
            }
        }
    }
}

pub fn language_picker(locale: &str) -> Markup {
    html! {
        form.language-picker hx-post=(names::SET_LOCALE_URL) hx-trigger="change" {
            select name="locale" aria-label=(t!("layout.language", locale = locale)) {
                @for code in names::SUPPORTED_LOCALES {
                    option value=(code) selected[*code == locale] {
                        (locale_label(code))
                    }
                }
            }
        }
    }
}

fn locale_label(locale: &str) -> &'static str {
    match locale {
        "en" => "English",
        _ => "Português",
    }
}

fn nav_entry(item: &NavItem, locale: &str) -> Markup {
    html! {
        li {
            (components::nav_link(item.path, html! {
                span."material-symbols-rounded" aria-hidden="true" { (item.icon) }
                " "
                (t!(item.label, locale = locale))
            }))
        }
    }
}

fn sidebar(user: &AuthUser, locale: &str) -> Markup {
    html! {
        aside.sidebar {
            nav {
                ul {
                    @for item in navigation::nav_items(user.role) {
                        (nav_entry(&item, locale))
                    }
                }
            }
            hr;
            nav.sidebar-footer {
                ul {
                    @for item in navigation::FOOTER {
                        (nav_entry(item, locale))
                    }
                    li {
                        a href="#" hx-post=(names::LOGOUT_URL) {
                            span."material-symbols-rounded" aria-hidden="true" { "logout" }
                            " "
                            (t!("nav.logout", locale = locale))
                        }
                    }
                }
            }
            p.sidebar-user {
                strong { (user.display_name) }
                br;
                small { (components::role_label(user.role, locale)) }
            }
        }
    }
}

/// Full document without the signed-in shell: landing, login, error pages.
pub fn page(title: &str, body: Markup, locale: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(locale) {
            (head(title))

            body."container" {
                (header(locale))
                main { (body) }
            }
        }
    }
}

/// Full document with the role-dependent sidebar.
pub fn page_with_user(title: &str, body: Markup, locale: &str, user: &AuthUser) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(locale) {
            (head(title))

            body."container-fluid" {
                (header(locale))
                div.shell {
                    (sidebar(user, locale))
                    main { (body) }
                }
            }
        }
    }
}

/// Fragment for htmx swaps into `main`; htmx picks up the title element.
pub fn titled(title: &str, body: Markup) -> Markup {
    html! {
        title { (title) " - Quest Lab" }
        (body)
    }
}

/// Full page for a normal navigation, fragment for an htmx one.
pub fn render(
    is_htmx: bool,
    title: &str,
    body: Markup,
    locale: &str,
    user: Option<&AuthUser>,
) -> Markup {
    match (is_htmx, user) {
        (true, _) => titled(title, body),
        (false, Some(user)) => page_with_user(title, body, locale, user),
        (false, None) => page(title, body, locale),
    }
}
