//! `SeaORM` Entity for time_table table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "time_table"
    }
}

/// `start_time` / `end_time` are stored zero-padded (`HH:MM`).
#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub time_table_id: Uuid,
    pub subject_mapping_id: Uuid,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub room_number: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    TimeTableId,
    SubjectMappingId,
    DayOfWeek,
    StartTime,
    EndTime,
    RoomNumber,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    TimeTableId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    SubjectMapping,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::TimeTableId => ColumnType::Uuid.def(),
            Self::SubjectMappingId => ColumnType::Uuid.def(),
            Self::DayOfWeek => ColumnType::Integer.def(),
            Self::StartTime => ColumnType::String(StringLen::N(5)).def(),
            Self::EndTime => ColumnType::String(StringLen::N(5)).def(),
            Self::RoomNumber => ColumnType::String(StringLen::None).def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::SubjectMapping => Entity::belongs_to(super::subject_mapping::Entity)
                .from(Column::SubjectMappingId)
                .to(super::subject_mapping::Column::SubjectMappingId)
                .into(),
        }
    }
}

impl Related<super::subject_mapping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectMapping.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
