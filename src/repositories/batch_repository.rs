use std::collections::{BTreeSet, HashMap};

use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::count_grouped;
use crate::config::SEMESTERS_PER_YEAR;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{batch, course, section, semester, user};
use crate::error::{AppError, AppResult, DbResultExt};

const DUPLICATE_BATCH: &str = "Batch already exists for this course";

pub struct BatchRepository<'a> {
    db: &'a DatabaseConnection,
}

/// Validated batch fields; `end_year > start_year` holds.
#[derive(Debug, Clone, Copy)]
pub struct BatchInput {
    pub course_id: Uuid,
    pub start_year: i32,
    pub end_year: i32,
}

impl BatchInput {
    pub fn total_semesters(&self) -> i32 {
        (self.end_year - self.start_year) * SEMESTERS_PER_YEAR
    }
}

#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub batch: batch::Model,
    pub course: Option<course::Model>,
    pub semester_count: i64,
    pub user_count: i64,
}

#[derive(Debug, Clone)]
pub struct SemesterDetails {
    pub semester: semester::Model,
    pub sections: Vec<super::SectionWithCount>,
}

#[derive(Debug, Clone)]
pub struct BatchDetails {
    pub batch: batch::Model,
    pub course: Option<course::Model>,
    pub semesters: Vec<SemesterDetails>,
}

fn semester_row(batch_id: Uuid, semester_number: i32, now: NaiveDateTime) -> semester::ActiveModel {
    semester::ActiveModel {
        semester_id: Set(Uuid::new_v4()),
        batch_id: Set(batch_id),
        semester_number: Set(semester_number),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

impl<'a> BatchRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Batches, newest intake first, with semester and user counts.
    pub async fn find_all_with_details(&self) -> AppResult<Vec<BatchSummary>> {
        let batches = batch::Entity::find()
            .find_also_related(course::Entity)
            .order_by_desc(batch::Column::StartYear)
            .all(self.db)
            .await
            .db_context("Failed to fetch batches")?;

        let semester_counts =
            count_grouped(self.db, semester::Entity::find(), semester::Column::BatchId)
                .await
                .db_context("Failed to fetch batches")?;
        let user_counts = count_grouped(self.db, user::Entity::find(), user::Column::BatchId)
            .await
            .db_context("Failed to fetch batches")?;

        Ok(batches
            .into_iter()
            .map(|(batch, course)| BatchSummary {
                semester_count: semester_counts.get(&batch.batch_id).copied().unwrap_or(0),
                user_count: user_counts.get(&batch.batch_id).copied().unwrap_or(0),
                batch,
                course,
            })
            .collect())
    }

    pub async fn find_by_id(&self, batch_id: Uuid) -> AppResult<Option<batch::Model>> {
        let batch = batch::Entity::find_by_id(batch_id)
            .one(self.db)
            .await
            .db_context("Failed to fetch batch")?;
        Ok(batch)
    }

    /// Batch with its semesters in order and each semester's sections.
    pub async fn find_details(&self, batch_id: Uuid) -> AppResult<BatchDetails> {
        let (batch, course) = batch::Entity::find_by_id(batch_id)
            .find_also_related(course::Entity)
            .one(self.db)
            .await
            .db_context("Failed to fetch batch")?
            .ok_or_else(|| AppError::not_found("Batch"))?;

        let semesters = semester::Entity::find()
            .filter(semester::Column::BatchId.eq(batch_id))
            .order_by_asc(semester::Column::SemesterNumber)
            .all(self.db)
            .await
            .db_context("Failed to fetch batch")?;

        let semester_ids: Vec<Uuid> = semesters.iter().map(|s| s.semester_id).collect();
        let sections = section::Entity::find()
            .filter(section::Column::SemesterId.is_in(semester_ids))
            .order_by_asc(section::Column::Name)
            .all(self.db)
            .await
            .db_context("Failed to fetch batch")?;

        let student_counts = count_grouped(
            self.db,
            user::Entity::find().filter(user::Column::Role.eq(RoleEnum::Student)),
            user::Column::SectionId,
        )
        .await
        .db_context("Failed to fetch batch")?;

        let mut by_semester: HashMap<Uuid, Vec<super::SectionWithCount>> = HashMap::new();
        for section in sections {
            let student_count = student_counts.get(&section.section_id).copied().unwrap_or(0);
            by_semester
                .entry(section.semester_id)
                .or_default()
                .push(super::SectionWithCount {
                    section,
                    student_count,
                });
        }

        let semesters = semesters
            .into_iter()
            .map(|semester| SemesterDetails {
                sections: by_semester.remove(&semester.semester_id).unwrap_or_default(),
                semester,
            })
            .collect();

        Ok(BatchDetails {
            batch,
            course,
            semesters,
        })
    }

    async fn duplicate_exists<C: ConnectionTrait>(
        conn: &C,
        input: &BatchInput,
        exclude: Option<Uuid>,
    ) -> AppResult<bool> {
        let mut query = batch::Entity::find()
            .filter(batch::Column::CourseId.eq(input.course_id))
            .filter(batch::Column::StartYear.eq(input.start_year))
            .filter(batch::Column::EndYear.eq(input.end_year));
        if let Some(id) = exclude {
            query = query.filter(batch::Column::BatchId.ne(id));
        }
        let existing = query
            .one(conn)
            .await
            .db_context("Failed to check batch")?;
        Ok(existing.is_some())
    }

    async fn ensure_course<C: ConnectionTrait>(conn: &C, course_id: Uuid) -> AppResult<()> {
        course::Entity::find_by_id(course_id)
            .one(conn)
            .await
            .db_context("Failed to fetch course")?
            .ok_or_else(|| AppError::not_found("Course"))?;
        Ok(())
    }

    /// Creates the batch and its `(end - start) * 2` semesters, numbered
    /// from 1, in a single transaction. Nothing is left behind on failure.
    pub async fn create(&self, input: BatchInput) -> AppResult<(batch::Model, Vec<semester::Model>)> {
        let txn = self
            .db
            .begin()
            .await
            .db_context("Failed to create batch")?;

        Self::ensure_course(&txn, input.course_id).await?;
        if Self::duplicate_exists(&txn, &input, None).await? {
            return Err(AppError::Conflict(DUPLICATE_BATCH.to_string()));
        }

        let now = Utc::now().naive_utc();
        let batch_id = Uuid::new_v4();
        let batch_model = batch::ActiveModel {
            batch_id: Set(batch_id),
            course_id: Set(input.course_id),
            start_year: Set(input.start_year),
            end_year: Set(input.end_year),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let batch = batch_model
            .insert(&txn)
            .await
            .on_duplicate(DUPLICATE_BATCH, "Failed to create batch")?;

        let total_semesters = input.total_semesters();
        let semesters = Self::insert_semesters(&txn, batch_id, 1..=total_semesters, now).await?;

        txn.commit().await.db_context("Failed to create batch")?;

        tracing::info!(
            %batch_id,
            course_id = %input.course_id,
            start_year = input.start_year,
            end_year = input.end_year,
            total_semesters,
            "Batch created with semesters"
        );
        Ok((batch, semesters))
    }

    async fn insert_semesters(
        txn: &DatabaseTransaction,
        batch_id: Uuid,
        numbers: impl IntoIterator<Item = i32>,
        now: NaiveDateTime,
    ) -> AppResult<Vec<semester::Model>> {
        let mut created = Vec::new();
        for number in numbers {
            let semester = semester_row(batch_id, number, now)
                .insert(txn)
                .await
                .db_context("Failed to create semesters")?;
            created.push(semester);
        }
        Ok(created)
    }

    /// Updates course/years and reconciles the semester set in one
    /// transaction. Missing semesters are appended; surplus semesters are
    /// removed only while they hold no sections.
    pub async fn update(&self, batch_id: Uuid, input: BatchInput) -> AppResult<batch::Model> {
        let txn = self
            .db
            .begin()
            .await
            .db_context("Failed to update batch")?;

        let batch = batch::Entity::find_by_id(batch_id)
            .one(&txn)
            .await
            .db_context("Failed to fetch batch")?
            .ok_or_else(|| AppError::not_found("Batch"))?;

        Self::ensure_course(&txn, input.course_id).await?;
        if Self::duplicate_exists(&txn, &input, Some(batch_id)).await? {
            return Err(AppError::Conflict(DUPLICATE_BATCH.to_string()));
        }

        let existing = semester::Entity::find()
            .filter(semester::Column::BatchId.eq(batch_id))
            .all(&txn)
            .await
            .db_context("Failed to update batch")?;

        let total_semesters = input.total_semesters();
        let surplus: Vec<&semester::Model> = existing
            .iter()
            .filter(|s| s.semester_number > total_semesters)
            .collect();

        if !surplus.is_empty() {
            let surplus_ids: Vec<Uuid> = surplus.iter().map(|s| s.semester_id).collect();
            let occupied = section::Entity::find()
                .filter(section::Column::SemesterId.is_in(surplus_ids.clone()))
                .count(&txn)
                .await
                .db_context("Failed to update batch")?;
            if occupied > 0 {
                return Err(AppError::Conflict(format!(
                    "Cannot shorten batch to {} semesters: later semesters already have sections",
                    total_semesters
                )));
            }

            semester::Entity::delete_many()
                .filter(semester::Column::SemesterId.is_in(surplus_ids))
                .exec(&txn)
                .await
                .db_context("Failed to update batch")?;
        }

        let present: BTreeSet<i32> = existing.iter().map(|s| s.semester_number).collect();
        let now = Utc::now().naive_utc();
        let missing: Vec<i32> = (1..=total_semesters)
            .filter(|n| !present.contains(n))
            .collect();
        Self::insert_semesters(&txn, batch_id, missing, now).await?;

        let mut active_model: batch::ActiveModel = batch.into();
        active_model.course_id = Set(input.course_id);
        active_model.start_year = Set(input.start_year);
        active_model.end_year = Set(input.end_year);
        active_model.updated_at = Set(now);

        let updated = active_model
            .update(&txn)
            .await
            .on_duplicate(DUPLICATE_BATCH, "Failed to update batch")?;

        txn.commit().await.db_context("Failed to update batch")?;
        Ok(updated)
    }

    /// Semesters and their sections go with the batch; students or subject
    /// assignments still pointing at it block the delete.
    pub async fn delete(&self, batch_id: Uuid) -> AppResult<()> {
        let result = batch::Entity::delete_by_id(batch_id)
            .exec(self.db)
            .await
            .on_in_use("Failed to delete batch. It might have related users or semesters.")?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Batch"));
        }
        tracing::info!(%batch_id, "Batch deleted");
        Ok(())
    }
}
