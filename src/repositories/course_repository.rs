use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::count_grouped;
use crate::entities::{batch, course, department};
use crate::error::{AppError, AppResult, DbResultExt};

const DUPLICATE_CODE: &str = "Course code already exists";

pub struct CourseRepository<'a> {
    db: &'a DatabaseConnection,
}

#[derive(Debug, Clone)]
pub struct CourseInput {
    pub name: String,
    pub code: String,
    pub department_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct CourseSummary {
    pub course: course::Model,
    pub department: Option<department::Model>,
    pub batch_count: i64,
}

impl<'a> CourseRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all_with_details(&self) -> AppResult<Vec<CourseSummary>> {
        let courses = course::Entity::find()
            .find_also_related(department::Entity)
            .order_by_asc(course::Column::Name)
            .all(self.db)
            .await
            .db_context("Failed to fetch courses")?;

        let batch_counts = count_grouped(self.db, batch::Entity::find(), batch::Column::CourseId)
            .await
            .db_context("Failed to fetch courses")?;

        Ok(courses
            .into_iter()
            .map(|(course, department)| CourseSummary {
                batch_count: batch_counts.get(&course.course_id).copied().unwrap_or(0),
                course,
                department,
            })
            .collect())
    }

    pub async fn find_by_id(&self, course_id: Uuid) -> AppResult<Option<course::Model>> {
        let course = course::Entity::find_by_id(course_id)
            .one(self.db)
            .await
            .db_context("Failed to fetch course")?;
        Ok(course)
    }

    async fn code_taken(&self, code: &str, exclude: Option<Uuid>) -> AppResult<bool> {
        let mut query = course::Entity::find().filter(course::Column::Code.eq(code));
        if let Some(id) = exclude {
            query = query.filter(course::Column::CourseId.ne(id));
        }
        let existing = query
            .one(self.db)
            .await
            .db_context("Failed to check course code")?;
        Ok(existing.is_some())
    }

    async fn ensure_department(&self, department_id: Uuid) -> AppResult<()> {
        department::Entity::find_by_id(department_id)
            .one(self.db)
            .await
            .db_context("Failed to fetch department")?
            .ok_or_else(|| AppError::not_found("Department"))?;
        Ok(())
    }

    pub async fn create(&self, input: CourseInput) -> AppResult<course::Model> {
        if self.code_taken(&input.code, None).await? {
            return Err(AppError::Conflict(DUPLICATE_CODE.to_string()));
        }
        self.ensure_department(input.department_id).await?;

        let now = Utc::now().naive_utc();
        let course_model = course::ActiveModel {
            course_id: Set(Uuid::new_v4()),
            name: Set(input.name),
            code: Set(input.code),
            department_id: Set(input.department_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = course_model
            .insert(self.db)
            .await
            .on_duplicate(DUPLICATE_CODE, "Failed to create course")?;

        tracing::info!(course_id = %result.course_id, code = %result.code, "Course created");
        Ok(result)
    }

    pub async fn update(&self, course_id: Uuid, input: CourseInput) -> AppResult<course::Model> {
        let course = self
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course"))?;

        if self.code_taken(&input.code, Some(course_id)).await? {
            return Err(AppError::Conflict(DUPLICATE_CODE.to_string()));
        }
        self.ensure_department(input.department_id).await?;

        let mut active_model: course::ActiveModel = course.into();
        active_model.name = Set(input.name);
        active_model.code = Set(input.code);
        active_model.department_id = Set(input.department_id);
        active_model.updated_at = Set(Utc::now().naive_utc());

        let result = active_model
            .update(self.db)
            .await
            .on_duplicate(DUPLICATE_CODE, "Failed to update course")?;
        Ok(result)
    }

    pub async fn delete(&self, course_id: Uuid) -> AppResult<()> {
        let result = course::Entity::delete_by_id(course_id)
            .exec(self.db)
            .await
            .on_in_use("Failed to delete course. It might have related batches.")?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Course"));
        }
        tracing::info!(%course_id, "Course deleted");
        Ok(())
    }
}
