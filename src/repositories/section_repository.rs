use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{batch, course, section, semester};
use crate::error::{AppError, AppResult, DbResultExt};

const DUPLICATE_SECTION: &str = "Section already exists in this semester";

pub struct SectionRepository<'a> {
    db: &'a DatabaseConnection,
}

#[derive(Debug, Clone)]
pub struct SectionWithCount {
    pub section: section::Model,
    pub student_count: i64,
}

/// A section with enough context to label it in a dropdown.
#[derive(Debug, Clone)]
pub struct SectionOption {
    pub section: section::Model,
    pub semester: semester::Model,
    pub batch: batch::Model,
    pub course: Option<course::Model>,
}

impl<'a> SectionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, section_id: Uuid) -> AppResult<Option<section::Model>> {
        let section = section::Entity::find_by_id(section_id)
            .one(self.db)
            .await
            .db_context("Failed to fetch section")?;
        Ok(section)
    }

    /// Every section with its semester, batch and course, ordered by course
    /// code, batch start year, semester number and section name.
    pub async fn find_all_options(&self) -> AppResult<Vec<SectionOption>> {
        let sections = section::Entity::find()
            .find_also_related(semester::Entity)
            .order_by_asc(section::Column::Name)
            .all(self.db)
            .await
            .db_context("Failed to fetch sections")?;

        let batches: HashMap<Uuid, batch::Model> = batch::Entity::find()
            .all(self.db)
            .await
            .db_context("Failed to fetch sections")?
            .into_iter()
            .map(|b| (b.batch_id, b))
            .collect();

        let courses: HashMap<Uuid, course::Model> = course::Entity::find()
            .all(self.db)
            .await
            .db_context("Failed to fetch sections")?
            .into_iter()
            .map(|c| (c.course_id, c))
            .collect();

        let mut options: Vec<SectionOption> = sections
            .into_iter()
            .filter_map(|(section, semester)| {
                let semester = semester?;
                let batch = batches.get(&semester.batch_id)?.clone();
                let course = courses.get(&batch.course_id).cloned();
                Some(SectionOption {
                    section,
                    semester,
                    batch,
                    course,
                })
            })
            .collect();

        options.sort_by(|a, b| {
            let course_code = |o: &SectionOption| o.course.as_ref().map(|c| c.code.clone());
            course_code(a)
                .cmp(&course_code(b))
                .then(a.batch.start_year.cmp(&b.batch.start_year))
                .then(a.semester.semester_number.cmp(&b.semester.semester_number))
                .then(a.section.name.cmp(&b.section.name))
        });

        Ok(options)
    }

    async fn name_taken(&self, semester_id: Uuid, name: &str) -> AppResult<bool> {
        let existing = section::Entity::find()
            .filter(section::Column::SemesterId.eq(semester_id))
            .filter(section::Column::Name.eq(name))
            .one(self.db)
            .await
            .db_context("Failed to check section")?;
        Ok(existing.is_some())
    }

    pub async fn create(&self, semester_id: Uuid, name: String) -> AppResult<section::Model> {
        semester::Entity::find_by_id(semester_id)
            .one(self.db)
            .await
            .db_context("Failed to fetch semester")?
            .ok_or_else(|| AppError::not_found("Semester"))?;

        if self.name_taken(semester_id, &name).await? {
            return Err(AppError::Conflict(DUPLICATE_SECTION.to_string()));
        }

        let now = Utc::now().naive_utc();
        let section_model = section::ActiveModel {
            section_id: Set(Uuid::new_v4()),
            semester_id: Set(semester_id),
            name: Set(name),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = section_model
            .insert(self.db)
            .await
            .on_duplicate(DUPLICATE_SECTION, "Failed to create section")?;

        tracing::info!(section_id = %result.section_id, %semester_id, name = %result.name, "Section created");
        Ok(result)
    }

    pub async fn delete(&self, section_id: Uuid) -> AppResult<()> {
        let result = section::Entity::delete_by_id(section_id)
            .exec(self.db)
            .await
            .on_in_use("Failed to delete section. It might have related students or subjects.")?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Section"));
        }
        tracing::info!(%section_id, "Section deleted");
        Ok(())
    }
}
