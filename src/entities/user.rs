//! `SeaORM` Entity for user table

use super::sea_orm_active_enums::RoleEnum;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "user"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: RoleEnum,
    pub department_id: Option<Uuid>,
    pub batch_id: Option<Uuid>,
    pub section_id: Option<Uuid>,
    pub roll_number: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    UserId,
    Name,
    Email,
    PasswordHash,
    Role,
    DepartmentId,
    BatchId,
    SectionId,
    RollNumber,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    UserId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Department,
    Batch,
    Section,
    SubjectMapping,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::UserId => ColumnType::Uuid.def(),
            Self::Name => ColumnType::String(StringLen::None).def(),
            Self::Email => ColumnType::String(StringLen::None).def().unique(),
            Self::PasswordHash => ColumnType::String(StringLen::None).def(),
            Self::Role => ColumnType::String(StringLen::N(16)).def(),
            Self::DepartmentId => ColumnType::Uuid.def().null(),
            Self::BatchId => ColumnType::Uuid.def().null(),
            Self::SectionId => ColumnType::Uuid.def().null(),
            Self::RollNumber => ColumnType::String(StringLen::None).def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Department => Entity::belongs_to(super::department::Entity)
                .from(Column::DepartmentId)
                .to(super::department::Column::DepartmentId)
                .into(),
            Self::Batch => Entity::belongs_to(super::batch::Entity)
                .from(Column::BatchId)
                .to(super::batch::Column::BatchId)
                .into(),
            Self::Section => Entity::belongs_to(super::section::Entity)
                .from(Column::SectionId)
                .to(super::section::Column::SectionId)
                .into(),
            Self::SubjectMapping => Entity::has_many(super::subject_mapping::Entity).into(),
        }
    }
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::batch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Batch.def()
    }
}

impl Related<super::section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl Related<super::subject_mapping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectMapping.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
