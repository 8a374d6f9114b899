use color_eyre::Result;

use super::models::{AuthUser, Class, ClassProgress, Exam, ExamDraft, ExamSummary, StudentResult};
use super::{today, Db, Tables};

impl Db {
    pub async fn classes(&self) -> Result<Vec<Class>> {
        let tables = self.read()?;
        Ok(tables.classes.clone())
    }

    /// Every exam with its per-class completion figures, newest first.
    pub async fn exam_summaries(&self) -> Result<Vec<ExamSummary>> {
        let tables = self.read()?;
        let mut summaries: Vec<ExamSummary> = tables
            .exams
            .iter()
            .map(|exam| summarize(&tables, exam))
            .collect();
        summaries.sort_by(|a, b| b.exam.created_at.cmp(&a.exam.created_at));
        Ok(summaries)
    }

    pub async fn exam_summary(&self, exam_id: i32) -> Result<Option<ExamSummary>> {
        let tables = self.read()?;
        Ok(tables
            .exams
            .iter()
            .find(|e| e.id == exam_id)
            .map(|exam| summarize(&tables, exam)))
    }

    pub async fn exam(&self, exam_id: i32) -> Result<Option<Exam>> {
        let tables = self.read()?;
        Ok(tables.exams.iter().find(|e| e.id == exam_id).cloned())
    }

    pub async fn insert_exam(&self, draft: ExamDraft) -> Result<i32> {
        let mut tables = self.write()?;
        let exam_id = tables.allocate_id();

        tables.exams.push(Exam {
            id: exam_id,
            title: draft.title,
            subject: draft.subject,
            description: draft.description,
            duration_minutes: draft.duration_minutes,
            due_date: draft.due_date,
            created_at: today(),
            class_ids: draft.class_ids,
            question_ids: draft.question_ids,
            completed: false,
        });

        tracing::info!("exam created: id={exam_id}");
        Ok(exam_id)
    }

    /// Returns `false` when no exam has the given id.
    pub async fn update_exam(&self, exam_id: i32, draft: ExamDraft) -> Result<bool> {
        let mut tables = self.write()?;
        let Some(exam) = tables.exams.iter_mut().find(|e| e.id == exam_id) else {
            return Ok(false);
        };

        exam.title = draft.title;
        exam.subject = draft.subject;
        exam.description = draft.description;
        exam.duration_minutes = draft.duration_minutes;
        exam.due_date = draft.due_date;
        exam.class_ids = draft.class_ids;
        exam.question_ids = draft.question_ids;

        tracing::info!("exam updated: id={exam_id}");
        Ok(true)
    }

    pub async fn delete_exam(&self, exam_id: i32) -> Result<bool> {
        let mut tables = self.write()?;
        let removed = crate::listing::remove_by_id(&mut tables.exams, exam_id).is_some();

        if removed {
            tables.results.retain(|r| r.exam_id != exam_id);
            tracing::info!("exam deleted: id={exam_id}");
        }
        Ok(removed)
    }

    pub async fn exam_results(&self, exam_id: i32) -> Result<Vec<StudentResult>> {
        let tables = self.read()?;
        Ok(tables
            .results
            .iter()
            .filter(|r| r.exam_id == exam_id)
            .cloned()
            .collect())
    }

    /// Exams assigned to the student's class, split into pending ones and
    /// ones the student already has a result for.
    pub async fn student_exams(
        &self,
        student: &AuthUser,
    ) -> Result<(Vec<ExamSummary>, Vec<(ExamSummary, StudentResult)>)> {
        let tables = self.read()?;
        let mut pending = Vec::new();
        let mut completed = Vec::new();

        for exam in &tables.exams {
            let result = tables
                .results
                .iter()
                .find(|r| r.exam_id == exam.id && r.user_id == Some(student.id));

            match result {
                Some(result) => completed.push((summarize(&tables, exam), result.clone())),
                None => {
                    let assigned = student
                        .class_id
                        .is_some_and(|class_id| exam.class_ids.contains(&class_id));
                    if assigned && !exam.completed {
                        pending.push(summarize(&tables, exam));
                    }
                }
            }
        }

        pending.sort_by(|a, b| a.exam.due_date.cmp(&b.exam.due_date));
        Ok((pending, completed))
    }
}

fn summarize(tables: &Tables, exam: &Exam) -> ExamSummary {
    let results: Vec<&StudentResult> = tables
        .results
        .iter()
        .filter(|r| r.exam_id == exam.id)
        .collect();

    let classes = exam
        .class_ids
        .iter()
        .filter_map(|class_id| tables.classes.iter().find(|c| c.id == *class_id))
        .map(|class| ClassProgress {
            class_id: class.id,
            name: class.name.clone(),
            student_count: class.student_count,
            completed: u32::try_from(results.iter().filter(|r| r.class_id == class.id).count())
                .unwrap_or(u32::MAX),
        })
        .collect();

    let average_score = if results.is_empty() {
        None
    } else {
        let total: u32 = results.iter().map(|r| r.score).sum();
        Some(f64::from(total) / results.len() as f64)
    };

    ExamSummary {
        exam: exam.clone(),
        classes,
        average_score,
    }
}
