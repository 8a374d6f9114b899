use crate::{db::Role, names};

/// One sidebar entry. `label` is a translation key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
}

const COMMON: &[NavItem] = &[NavItem {
    label: "nav.exams",
    path: names::EXAMS_URL,
    icon: "assignment",
}];

const TEACHER: &[NavItem] = &[
    NavItem {
        label: "nav.dashboard",
        path: names::DASHBOARD_URL,
        icon: "home",
    },
    NavItem {
        label: "nav.questions",
        path: names::QUESTIONS_URL,
        icon: "description",
    },
];

const STUDENT: &[NavItem] = &[
    NavItem {
        label: "nav.solve",
        path: names::SOLVE_URL,
        icon: "quiz",
    },
    NavItem {
        label: "nav.profile",
        path: names::PROFILE_URL,
        icon: "person",
    },
];

/// Entries shown under the role-specific ones regardless of role.
pub const FOOTER: &[NavItem] = &[NavItem {
    label: "nav.settings",
    path: names::SETTINGS_URL,
    icon: "settings",
}];

pub fn nav_items(role: Role) -> Vec<NavItem> {
    let specific = match role {
        Role::Professor => TEACHER,
        Role::Aluno => STUDENT,
    };
    COMMON.iter().chain(specific).copied().collect()
}

/// Page a user lands on after login, or when a guard turns them away.
pub fn home_for(role: Role) -> &'static str {
    match role {
        Role::Professor => names::DASHBOARD_URL,
        Role::Aluno => names::EXAMS_URL,
    }
}
