// Demo data set loaded into a fresh store.

use std::sync::OnceLock;

use chrono::{Days, NaiveDate};
use color_eyre::{
    eyre::{eyre, OptionExt},
    Result,
};

use super::models::{Answer, Attempt, AuthUser, Class, Difficulty, Exam, Question, Role, StudentResult};
use super::{user::hash_password, Tables, UserRow};

const DEMO_PASSWORD: &str = "password";

const FIRST_NAMES: &[&str] = &[
    "Ana", "Bruno", "Carla", "Daniel", "Elena", "Felipe", "Gabriela", "Henrique", "Isabela",
    "Jorge", "Larissa", "Marcos", "Natália", "Otávio",
];
const LAST_NAMES: &[&str] = &["Silva", "Costa", "Oliveira", "Santos", "Martins", "Souza", "Lima"];

fn date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| eyre!("bad seed date {value}: {e}"))
}

/// Every demo account shares one password, so it is hashed once per process.
fn demo_hash() -> Result<String> {
    static HASH: OnceLock<String> = OnceLock::new();
    if let Some(hash) = HASH.get() {
        return Ok(hash.clone());
    }
    let hash = hash_password(DEMO_PASSWORD)?;
    Ok(HASH.get_or_init(|| hash).clone())
}

pub(super) fn populate(tables: &mut Tables) -> Result<()> {
    classes(tables);
    users(tables)?;
    questions(tables)?;
    exams(tables)?;
    results(tables);
    attempts(tables)?;

    tables.next_id = tables
        .users
        .iter()
        .map(|row| row.user.id)
        .chain(tables.classes.iter().map(|c| c.id))
        .chain(tables.questions.iter().map(|q| q.id))
        .chain(tables.exams.iter().map(|e| e.id))
        .chain(tables.results.iter().map(|r| r.id))
        .max()
        .unwrap_or(0);

    Ok(())
}

fn classes(tables: &mut Tables) {
    let rows = [
        (1, "1º Ano A", 32),
        (2, "1º Ano B", 30),
        (3, "2º Ano A", 30),
        (4, "2º Ano B", 28),
        (5, "2º Ano C", 27),
        (6, "3º Ano A", 28),
        (7, "3º Ano B", 25),
    ];
    tables.classes = rows
        .into_iter()
        .map(|(id, name, student_count)| Class {
            id,
            name: name.to_string(),
            student_count,
        })
        .collect();
}

fn users(tables: &mut Tables) -> Result<()> {
    let hash = demo_hash()?;
    let rows = [
        (101, "professor@example.com", "Maria Silva", Role::Professor, None),
        (102, "aluno@example.com", "João Pereira", Role::Aluno, Some(6)),
        (103, "ana@example.com", "Ana Silva", Role::Aluno, Some(6)),
        (104, "bruno@example.com", "Bruno Costa", Role::Aluno, Some(7)),
        (105, "carla@example.com", "Carla Oliveira", Role::Aluno, Some(3)),
        (106, "daniel@example.com", "Daniel Santos", Role::Aluno, Some(4)),
        (107, "elena@example.com", "Elena Martins", Role::Aluno, Some(1)),
    ];
    tables.users = rows
        .into_iter()
        .map(|(id, email, display_name, role, class_id)| UserRow {
            user: AuthUser {
                id,
                email: email.to_string(),
                display_name: display_name.to_string(),
                role,
                class_id,
            },
            password_hash: hash.clone(),
        })
        .collect();
    Ok(())
}

fn multiple_choice(options: &[&str], correct: usize) -> Answer {
    Answer::MultipleChoice {
        options: options.iter().map(|o| (*o).to_string()).collect(),
        correct,
    }
}

fn questions(tables: &mut Tables) -> Result<()> {
    let rows = [
        (
            1,
            "Equação do segundo grau",
            "Matemática",
            Difficulty::Medium,
            "Qual é a fórmula para resolver uma equação do segundo grau ax² + bx + c = 0?",
            multiple_choice(
                &[
                    "x = (-b ± √(b² - 4ac)) / 2a",
                    "x = (-b ± √(b² + 4ac)) / 2a",
                    "x = (b ± √(b² - 4ac)) / 2a",
                    "x = (-b ± √(b² - 4ac)) / a",
                ],
                0,
            ),
            Some("A fórmula de Bhaskara resolve ax² + bx + c = 0; o discriminante b² - 4ac determina o número de raízes reais."),
            "2023-10-15",
        ),
        (
            2,
            "Análise sintática",
            "Português",
            Difficulty::Hard,
            "Na frase 'O aluno estudou para a prova', qual é o sujeito?",
            multiple_choice(&["O aluno", "estudou", "para a prova", "a prova"], 0),
            None,
            "2023-10-12",
        ),
        (
            3,
            "Sistema solar",
            "Ciências",
            Difficulty::Easy,
            "Qual é o planeta mais próximo do Sol?",
            multiple_choice(&["Vênus", "Terra", "Mercúrio", "Marte"], 2),
            None,
            "2023-10-10",
        ),
        (
            4,
            "Segunda Guerra Mundial",
            "História",
            Difficulty::Medium,
            "Em que ano terminou a Segunda Guerra Mundial?",
            multiple_choice(&["1943", "1944", "1945", "1946"], 2),
            None,
            "2023-10-08",
        ),
        (
            5,
            "Capitais da Europa",
            "Geografia",
            Difficulty::Medium,
            "Qual é a capital da Espanha?",
            multiple_choice(&["Lisboa", "Barcelona", "Madri", "Valência"], 2),
            None,
            "2023-10-05",
        ),
        (
            6,
            "Verbos irregulares",
            "Português",
            Difficulty::Hard,
            "Conjugue o verbo 'trazer' na primeira pessoa do singular do pretérito perfeito.",
            Answer::Essay {
                expected: "Eu trouxe.".to_string(),
            },
            None,
            "2023-10-03",
        ),
        (
            7,
            "Funções trigonométricas",
            "Matemática",
            Difficulty::Hard,
            "Qual é o valor de sen(30°)?",
            multiple_choice(&["1/2", "√2/2", "√3/2", "1"], 0),
            None,
            "2023-10-01",
        ),
        (
            8,
            "Tabela periódica",
            "Química",
            Difficulty::Medium,
            "Qual é o símbolo químico do sódio?",
            multiple_choice(&["S", "So", "Na", "Sd"], 2),
            None,
            "2023-09-28",
        ),
    ];

    let mut questions = Vec::with_capacity(rows.len());
    for (id, title, category, difficulty, prompt, answer, explanation, created) in rows {
        let created_at = date(created)?;
        questions.push(Question {
            id,
            title: title.to_string(),
            category: category.to_string(),
            difficulty,
            prompt: prompt.to_string(),
            answer,
            explanation: explanation.map(str::to_string),
            created_at,
            updated_at: created_at,
        });
    }
    tables.questions = questions;
    Ok(())
}

fn exams(tables: &mut Tables) -> Result<()> {
    let rows = [
        (1, "Simulado Nacional de Matemática", "Matemática", 120, "2024-05-01", "2024-06-15", vec![6, 7], vec![1, 7], false),
        (2, "Avaliação Trimestral de Português", "Português", 90, "2024-05-05", "2024-06-10", vec![3, 4], vec![2, 6], false),
        (3, "Simulado de Ciências Naturais", "Ciências", 60, "2024-05-10", "2024-06-20", vec![1, 2], vec![3, 8], false),
        (4, "Avaliação Bimestral de História", "História", 90, "2024-04-15", "2024-05-20", vec![6, 7], vec![4], true),
        (5, "Simulado de Geografia", "Geografia", 60, "2024-04-10", "2024-05-15", vec![3, 4], vec![5], true),
    ];

    let mut exams = Vec::with_capacity(rows.len());
    for (id, title, subject, duration_minutes, created, due, class_ids, question_ids, completed) in rows {
        exams.push(Exam {
            id,
            title: title.to_string(),
            subject: subject.to_string(),
            description: format!("{title}: avaliação de {subject} para as turmas selecionadas."),
            duration_minutes,
            due_date: date(due)?,
            created_at: date(created)?,
            class_ids,
            question_ids,
            completed,
        });
    }
    tables.exams = exams;
    Ok(())
}

/// Completion counts and average score per (exam, class).
const RESULT_PLAN: &[(i32, i32, usize, u32)] = &[
    (1, 6, 20, 76),
    (1, 7, 18, 76),
    (2, 3, 25, 68),
    (2, 4, 22, 68),
    (3, 1, 28, 82),
    (3, 2, 25, 82),
    (4, 6, 28, 74),
    (4, 7, 25, 74),
    (5, 3, 30, 79),
    (5, 4, 28, 79),
];

fn results(tables: &mut Tables) {
    let mut next_id = 1000;
    let mut rows = Vec::new();

    for &(exam_id, class_id, completed, average) in RESULT_PLAN {
        let duration = tables
            .exams
            .iter()
            .find(|e| e.id == exam_id)
            .map_or(60, |e| e.duration_minutes);
        let class_name = tables
            .classes
            .iter()
            .find(|c| c.id == class_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();

        for i in 0..completed {
            next_id += 1;
            let spread = u32::try_from((i * 7) % 21).unwrap_or(0);
            let pace = u32::try_from((i * 13) % 45).unwrap_or(0);
            let mut result = StudentResult {
                id: next_id,
                exam_id,
                user_id: None,
                student_name: format!(
                    "{} {}",
                    FIRST_NAMES[i % FIRST_NAMES.len()],
                    LAST_NAMES[(i / FIRST_NAMES.len() + exam_id as usize) % LAST_NAMES.len()]
                ),
                class_id,
                class_name: class_name.clone(),
                score: (average + spread).saturating_sub(10).min(100),
                completion_minutes: duration * (50 + pace) / 100,
            };

            // The demo student's own graded exam.
            if exam_id == 4 && class_id == 6 && i == 0 {
                result.user_id = Some(102);
                result.student_name = "João Pereira".to_string();
                result.score = 72;
            }
            rows.push(result);
        }
    }

    tables.results = rows;
}

/// (user, answered, correct) for the dashboard demo figures.
const ATTEMPT_PLAN: &[(i32, usize, usize)] = &[
    (102, 10, 7),
    (103, 24, 18),
    (104, 18, 12),
    (105, 30, 25),
    (106, 15, 9),
    (107, 22, 20),
];

fn attempts(tables: &mut Tables) -> Result<()> {
    let start = date("2024-05-01")?;
    let choices: Vec<(i32, usize, usize)> = tables
        .questions
        .iter()
        .filter_map(|q| match &q.answer {
            Answer::MultipleChoice { options, correct } => Some((q.id, *correct, options.len())),
            Answer::Essay { .. } => None,
        })
        .collect();

    if choices.is_empty() {
        return Ok(());
    }

    for &(user_id, answered, correct) in ATTEMPT_PLAN {
        for i in 0..answered {
            let (question_id, right, len) = choices[(i + user_id as usize) % choices.len()];
            let is_correct = i < correct;
            let answered_on = start
                .checked_add_days(Days::new(i as u64))
                .ok_or_eyre("seed date overflow")?;
            tables.attempts.push(Attempt {
                user_id,
                question_id,
                option: if is_correct { right } else { (right + 1) % len },
                correct: is_correct,
                answered_on,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_ids_are_unique_per_table() {
        let mut tables = Tables::default();
        classes(&mut tables);
        questions(&mut tables).unwrap();
        exams(&mut tables).unwrap();
        results(&mut tables);

        let mut ids: Vec<i32> = tables.results.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), tables.results.len());
    }

    #[test]
    fn result_plan_matches_class_sizes() {
        let mut tables = Tables::default();
        classes(&mut tables);
        for &(_, class_id, completed, _) in RESULT_PLAN {
            let class = tables.classes.iter().find(|c| c.id == class_id).unwrap();
            assert!(completed as u32 <= class.student_count);
        }
    }

    #[test]
    fn scores_stay_in_range() {
        let mut tables = Tables::default();
        classes(&mut tables);
        exams(&mut tables).unwrap();
        results(&mut tables);
        assert!(tables.results.iter().all(|r| r.score <= 100));
        assert!(tables
            .results
            .iter()
            .any(|r| r.user_id == Some(102) && r.exam_id == 4));
    }
}
