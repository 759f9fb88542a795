use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{batch, department, user};
use crate::error::{AppResult, DbResultExt};

pub struct StatsRepository<'a> {
    db: &'a DatabaseConnection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub students: u64,
    pub teachers: u64,
    pub departments: u64,
    pub batches: u64,
}

impl<'a> StatsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn count_role(&self, role: RoleEnum) -> AppResult<u64> {
        let count = user::Entity::find()
            .filter(user::Column::Role.eq(role))
            .count(self.db)
            .await
            .db_context("Failed to fetch statistics")?;
        Ok(count)
    }

    pub async fn dashboard(&self) -> AppResult<DashboardStats> {
        let students = self.count_role(RoleEnum::Student).await?;
        let teachers = self.count_role(RoleEnum::Teacher).await?;
        let departments = department::Entity::find()
            .count(self.db)
            .await
            .db_context("Failed to fetch statistics")?;
        let batches = batch::Entity::find()
            .count(self.db)
            .await
            .db_context("Failed to fetch statistics")?;

        Ok(DashboardStats {
            students,
            teachers,
            departments,
            batches,
        })
    }
}
