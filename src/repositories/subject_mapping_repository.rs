use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{batch, course, section, semester, subject, subject_mapping, user};
use crate::error::{AppError, AppResult, DbResultExt};

const DUPLICATE_MAPPING: &str = "Subject is already assigned to this section";

pub struct SubjectMappingRepository<'a> {
    db: &'a DatabaseConnection,
}

#[derive(Debug, Clone, Copy)]
pub struct MappingInput {
    pub subject_id: Uuid,
    pub section_id: Uuid,
    pub teacher_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct MappingDetails {
    pub mapping: subject_mapping::Model,
    pub subject: Option<subject::Model>,
    pub teacher: Option<user::Model>,
}

#[derive(Debug, Clone)]
pub struct SemesterNode {
    pub semester: semester::Model,
    pub sections: Vec<section::Model>,
}

#[derive(Debug, Clone)]
pub struct BatchNode {
    pub batch: batch::Model,
    pub semesters: Vec<SemesterNode>,
}

/// One course with every batch, semester and section under it.
#[derive(Debug, Clone)]
pub struct CourseNode {
    pub course: course::Model,
    pub batches: Vec<BatchNode>,
}

impl<'a> SubjectMappingRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, mapping_id: Uuid) -> AppResult<Option<subject_mapping::Model>> {
        let mapping = subject_mapping::Entity::find_by_id(mapping_id)
            .one(self.db)
            .await
            .db_context("Failed to fetch subject assignment")?;
        Ok(mapping)
    }

    /// Assignments of one section, ordered by subject name.
    pub async fn find_for_section(&self, section_id: Uuid) -> AppResult<Vec<MappingDetails>> {
        let mappings = subject_mapping::Entity::find()
            .filter(subject_mapping::Column::SectionId.eq(section_id))
            .find_also_related(subject::Entity)
            .all(self.db)
            .await
            .db_context("Failed to fetch subject assignments")?;

        let teacher_ids: Vec<Uuid> = mappings.iter().map(|(m, _)| m.teacher_id).collect();
        let teachers: HashMap<Uuid, user::Model> = user::Entity::find()
            .filter(user::Column::UserId.is_in(teacher_ids))
            .all(self.db)
            .await
            .db_context("Failed to fetch subject assignments")?
            .into_iter()
            .map(|u| (u.user_id, u))
            .collect();

        let mut details: Vec<MappingDetails> = mappings
            .into_iter()
            .map(|(mapping, subject)| MappingDetails {
                teacher: teachers.get(&mapping.teacher_id).cloned(),
                subject,
                mapping,
            })
            .collect();
        details.sort_by(|a, b| {
            let name = |d: &MappingDetails| d.subject.as_ref().map(|s| s.name.clone());
            name(a).cmp(&name(b))
        });

        Ok(details)
    }

    pub async fn create(&self, input: MappingInput) -> AppResult<subject_mapping::Model> {
        subject::Entity::find_by_id(input.subject_id)
            .one(self.db)
            .await
            .db_context("Failed to fetch subject")?
            .ok_or_else(|| AppError::not_found("Subject"))?;

        section::Entity::find_by_id(input.section_id)
            .one(self.db)
            .await
            .db_context("Failed to fetch section")?
            .ok_or_else(|| AppError::not_found("Section"))?;

        let teacher = user::Entity::find_by_id(input.teacher_id)
            .one(self.db)
            .await
            .db_context("Failed to fetch teacher")?
            .ok_or_else(|| AppError::not_found("Teacher"))?;
        if teacher.role != RoleEnum::Teacher {
            return Err(AppError::BadRequest("Selected user is not a teacher".to_string()));
        }

        let existing = subject_mapping::Entity::find()
            .filter(subject_mapping::Column::SectionId.eq(input.section_id))
            .filter(subject_mapping::Column::SubjectId.eq(input.subject_id))
            .one(self.db)
            .await
            .db_context("Failed to check subject assignment")?;
        if existing.is_some() {
            return Err(AppError::Conflict(DUPLICATE_MAPPING.to_string()));
        }

        let now = Utc::now().naive_utc();
        let mapping_model = subject_mapping::ActiveModel {
            subject_mapping_id: Set(Uuid::new_v4()),
            subject_id: Set(input.subject_id),
            section_id: Set(input.section_id),
            teacher_id: Set(input.teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = mapping_model
            .insert(self.db)
            .await
            .on_duplicate(DUPLICATE_MAPPING, "Failed to assign subject")?;

        tracing::info!(
            subject_mapping_id = %result.subject_mapping_id,
            subject_id = %result.subject_id,
            section_id = %result.section_id,
            teacher_id = %result.teacher_id,
            "Subject assigned"
        );
        Ok(result)
    }

    /// Timetable slots of the assignment are removed with it.
    pub async fn delete(&self, mapping_id: Uuid) -> AppResult<()> {
        let result = subject_mapping::Entity::delete_by_id(mapping_id)
            .exec(self.db)
            .await
            .on_in_use("Failed to remove subject assignment")?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Subject assignment"));
        }
        tracing::info!(subject_mapping_id = %mapping_id, "Subject assignment removed");
        Ok(())
    }

    /// Courses by name, batches by start year, semesters ascending and
    /// sections by name.
    pub async fn hierarchy(&self) -> AppResult<Vec<CourseNode>> {
        let courses = course::Entity::find()
            .order_by_asc(course::Column::Name)
            .all(self.db)
            .await
            .db_context("Failed to fetch hierarchy")?;
        let batches = batch::Entity::find()
            .order_by_asc(batch::Column::StartYear)
            .all(self.db)
            .await
            .db_context("Failed to fetch hierarchy")?;
        let semesters = semester::Entity::find()
            .order_by_asc(semester::Column::SemesterNumber)
            .all(self.db)
            .await
            .db_context("Failed to fetch hierarchy")?;
        let sections = section::Entity::find()
            .order_by_asc(section::Column::Name)
            .all(self.db)
            .await
            .db_context("Failed to fetch hierarchy")?;

        let mut sections_by_semester: HashMap<Uuid, Vec<section::Model>> = HashMap::new();
        for section in sections {
            sections_by_semester
                .entry(section.semester_id)
                .or_default()
                .push(section);
        }

        let mut semesters_by_batch: HashMap<Uuid, Vec<SemesterNode>> = HashMap::new();
        for semester in semesters {
            let sections = sections_by_semester
                .remove(&semester.semester_id)
                .unwrap_or_default();
            semesters_by_batch
                .entry(semester.batch_id)
                .or_default()
                .push(SemesterNode { semester, sections });
        }

        let mut batches_by_course: HashMap<Uuid, Vec<BatchNode>> = HashMap::new();
        for batch in batches {
            let semesters = semesters_by_batch.remove(&batch.batch_id).unwrap_or_default();
            batches_by_course
                .entry(batch.course_id)
                .or_default()
                .push(BatchNode { batch, semesters });
        }

        Ok(courses
            .into_iter()
            .map(|course| CourseNode {
                batches: batches_by_course.remove(&course.course_id).unwrap_or_default(),
                course,
            })
            .collect())
    }
}
