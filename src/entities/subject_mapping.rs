//! `SeaORM` Entity for subject_mapping table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "subject_mapping"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub subject_mapping_id: Uuid,
    pub subject_id: Uuid,
    pub section_id: Uuid,
    pub teacher_id: Uuid,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    SubjectMappingId,
    SubjectId,
    SectionId,
    TeacherId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    SubjectMappingId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Subject,
    Section,
    Teacher,
    TimeTable,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::SubjectMappingId => ColumnType::Uuid.def(),
            Self::SubjectId => ColumnType::Uuid.def(),
            Self::SectionId => ColumnType::Uuid.def(),
            Self::TeacherId => ColumnType::Uuid.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Subject => Entity::belongs_to(super::subject::Entity)
                .from(Column::SubjectId)
                .to(super::subject::Column::SubjectId)
                .into(),
            Self::Section => Entity::belongs_to(super::section::Entity)
                .from(Column::SectionId)
                .to(super::section::Column::SectionId)
                .into(),
            Self::Teacher => Entity::belongs_to(super::user::Entity)
                .from(Column::TeacherId)
                .to(super::user::Column::UserId)
                .into(),
            Self::TimeTable => Entity::has_many(super::time_table::Entity).into(),
        }
    }
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::time_table::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimeTable.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
