use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::count_grouped;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{course, department, user};
use crate::error::{AppError, AppResult, DbResultExt};

const DUPLICATE_CODE: &str = "Department code already exists";

pub struct DepartmentRepository<'a> {
    db: &'a DatabaseConnection,
}

/// Validated department fields; `code` is already upper-cased.
#[derive(Debug, Clone)]
pub struct DepartmentInput {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone)]
pub struct DepartmentSummary {
    pub department: department::Model,
    pub course_count: i64,
    pub teacher_count: i64,
}

impl<'a> DepartmentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> AppResult<Vec<department::Model>> {
        let departments = department::Entity::find()
            .order_by_asc(department::Column::Name)
            .all(self.db)
            .await
            .db_context("Failed to fetch departments")?;
        Ok(departments)
    }

    /// Departments by name with their course and teacher counts.
    pub async fn find_all_with_counts(&self) -> AppResult<Vec<DepartmentSummary>> {
        let departments = self.find_all().await?;

        let course_counts = count_grouped(
            self.db,
            course::Entity::find(),
            course::Column::DepartmentId,
        )
        .await
        .db_context("Failed to fetch departments")?;

        let teacher_counts = count_grouped(
            self.db,
            user::Entity::find().filter(user::Column::Role.eq(RoleEnum::Teacher)),
            user::Column::DepartmentId,
        )
        .await
        .db_context("Failed to fetch departments")?;

        Ok(departments
            .into_iter()
            .map(|d| DepartmentSummary {
                course_count: course_counts.get(&d.department_id).copied().unwrap_or(0),
                teacher_count: teacher_counts.get(&d.department_id).copied().unwrap_or(0),
                department: d,
            })
            .collect())
    }

    pub async fn find_by_id(&self, department_id: Uuid) -> AppResult<Option<department::Model>> {
        let department = department::Entity::find_by_id(department_id)
            .one(self.db)
            .await
            .db_context("Failed to fetch department")?;
        Ok(department)
    }

    /// Another department already using `code`, ignoring `exclude`.
    async fn code_taken(&self, code: &str, exclude: Option<Uuid>) -> AppResult<bool> {
        let mut query = department::Entity::find().filter(department::Column::Code.eq(code));
        if let Some(id) = exclude {
            query = query.filter(department::Column::DepartmentId.ne(id));
        }
        let existing = query
            .one(self.db)
            .await
            .db_context("Failed to check department code")?;
        Ok(existing.is_some())
    }

    pub async fn create(&self, input: DepartmentInput) -> AppResult<department::Model> {
        if self.code_taken(&input.code, None).await? {
            return Err(AppError::Conflict(DUPLICATE_CODE.to_string()));
        }

        let now = Utc::now().naive_utc();
        let department_model = department::ActiveModel {
            department_id: Set(Uuid::new_v4()),
            name: Set(input.name),
            code: Set(input.code),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = department_model
            .insert(self.db)
            .await
            .on_duplicate(DUPLICATE_CODE, "Failed to create department")?;

        tracing::info!(department_id = %result.department_id, code = %result.code, "Department created");
        Ok(result)
    }

    pub async fn update(
        &self,
        department_id: Uuid,
        input: DepartmentInput,
    ) -> AppResult<department::Model> {
        let department = self
            .find_by_id(department_id)
            .await?
            .ok_or_else(|| AppError::not_found("Department"))?;

        if self.code_taken(&input.code, Some(department_id)).await? {
            return Err(AppError::Conflict(DUPLICATE_CODE.to_string()));
        }

        let mut active_model: department::ActiveModel = department.into();
        active_model.name = Set(input.name);
        active_model.code = Set(input.code);
        active_model.updated_at = Set(Utc::now().naive_utc());

        let result = active_model
            .update(self.db)
            .await
            .on_duplicate(DUPLICATE_CODE, "Failed to update department")?;
        Ok(result)
    }

    pub async fn delete(&self, department_id: Uuid) -> AppResult<()> {
        let result = department::Entity::delete_by_id(department_id)
            .exec(self.db)
            .await
            .on_in_use("Failed to delete department. It might have related courses or users.")?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Department"));
        }
        tracing::info!(%department_id, "Department deleted");
        Ok(())
    }
}
