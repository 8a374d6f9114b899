// Database module - provides data access layer

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use color_eyre::{eyre::eyre, Result};

// Re-export models for convenience
pub mod models;
pub use models::*;

// Internal modules
mod attempt;
mod exam;
mod question;
mod seed;
mod session;
mod user;

struct UserRow {
    user: AuthUser,
    password_hash: String,
}

#[derive(Default)]
struct Tables {
    users: Vec<UserRow>,
    sessions: HashMap<String, i32>,
    classes: Vec<Class>,
    questions: Vec<Question>,
    exams: Vec<Exam>,
    results: Vec<StudentResult>,
    attempts: Vec<Attempt>,
    next_id: i32,
}

impl Tables {
    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

// Main database handle
#[derive(Clone)]
pub struct Db {
    tables: Arc<RwLock<Tables>>,
}

impl Db {
    /// Builds the in-memory store and loads the demo data set.
    pub fn new() -> Result<Self> {
        let mut tables = Tables::default();
        seed::populate(&mut tables)?;

        tracing::info!(
            users = tables.users.len(),
            questions = tables.questions.len(),
            exams = tables.exams.len(),
            "in-memory store has been seeded"
        );

        Ok(Self {
            tables: Arc::new(RwLock::new(tables)),
        })
    }

    /// A store with no rows at all.
    pub fn empty() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| eyre!("database lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| eyre!("database lock poisoned"))
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
