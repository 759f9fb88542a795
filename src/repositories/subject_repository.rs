use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{department, subject};
use crate::error::{AppError, AppResult, DbResultExt};

const DUPLICATE_CODE: &str = "Subject code must be unique";

pub struct SubjectRepository<'a> {
    db: &'a DatabaseConnection,
}

#[derive(Debug, Clone)]
pub struct SubjectInput {
    pub name: String,
    pub code: String,
    pub credits: i32,
    pub department_id: Uuid,
}

impl<'a> SubjectRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Subjects by code, optionally limited to one department.
    pub async fn find_all_with_department(
        &self,
        department_id: Option<Uuid>,
    ) -> AppResult<Vec<(subject::Model, Option<department::Model>)>> {
        let mut query = subject::Entity::find().find_also_related(department::Entity);
        if let Some(id) = department_id {
            query = query.filter(subject::Column::DepartmentId.eq(id));
        }
        let subjects = query
            .order_by_asc(subject::Column::Code)
            .all(self.db)
            .await
            .db_context("Failed to fetch subjects")?;
        Ok(subjects)
    }

    pub async fn find_by_id(&self, subject_id: Uuid) -> AppResult<Option<subject::Model>> {
        let subject = subject::Entity::find_by_id(subject_id)
            .one(self.db)
            .await
            .db_context("Failed to fetch subject")?;
        Ok(subject)
    }

    async fn code_taken(&self, code: &str, exclude: Option<Uuid>) -> AppResult<bool> {
        let mut query = subject::Entity::find().filter(subject::Column::Code.eq(code));
        if let Some(id) = exclude {
            query = query.filter(subject::Column::SubjectId.ne(id));
        }
        let existing = query
            .one(self.db)
            .await
            .db_context("Failed to check subject code")?;
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

    pub async fn create(&self, input: SubjectInput) -> AppResult<subject::Model> {
        self.ensure_department(input.department_id).await?;
        if self.code_taken(&input.code, None).await? {
            return Err(AppError::Conflict(DUPLICATE_CODE.to_string()));
        }

        let now = Utc::now().naive_utc();
        let subject_model = subject::ActiveModel {
            subject_id: Set(Uuid::new_v4()),
            name: Set(input.name),
            code: Set(input.code),
            credits: Set(input.credits),
            department_id: Set(input.department_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = subject_model
            .insert(self.db)
            .await
            .on_duplicate(DUPLICATE_CODE, "Failed to create subject")?;

        tracing::info!(subject_id = %result.subject_id, code = %result.code, "Subject created");
        Ok(result)
    }

    pub async fn update(&self, subject_id: Uuid, input: SubjectInput) -> AppResult<subject::Model> {
        let subject = self
            .find_by_id(subject_id)
            .await?
            .ok_or_else(|| AppError::not_found("Subject"))?;

        self.ensure_department(input.department_id).await?;
        if self.code_taken(&input.code, Some(subject_id)).await? {
            return Err(AppError::Conflict(DUPLICATE_CODE.to_string()));
        }

        let mut active_model: subject::ActiveModel = subject.into();
        active_model.name = Set(input.name);
        active_model.code = Set(input.code);
        active_model.credits = Set(input.credits);
        active_model.department_id = Set(input.department_id);
        active_model.updated_at = Set(Utc::now().naive_utc());

        let result = active_model
            .update(self.db)
            .await
            .on_duplicate(DUPLICATE_CODE, "Failed to update subject")?;
        Ok(result)
    }

    pub async fn delete(&self, subject_id: Uuid) -> AppResult<()> {
        let result = subject::Entity::delete_by_id(subject_id)
            .exec(self.db)
            .await
            .on_in_use("Failed to delete subject. It might be assigned to sections.")?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Subject"));
        }
        tracing::info!(%subject_id, "Subject deleted");
        Ok(())
    }
}
