//! `SeaORM` entities for the academic records schema

pub mod batch;
pub mod course;
pub mod department;
pub mod sea_orm_active_enums;
pub mod section;
pub mod semester;
pub mod subject;
pub mod subject_mapping;
pub mod time_table;
pub mod user;
