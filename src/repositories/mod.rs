pub mod batch_repository;
pub mod course_repository;
pub mod department_repository;
pub mod section_repository;
pub mod stats_repository;
pub mod subject_mapping_repository;
pub mod subject_repository;
pub mod time_table_repository;
pub mod user_repository;

pub use batch_repository::{BatchDetails, BatchInput, BatchRepository, BatchSummary, SemesterDetails};
pub use course_repository::{CourseInput, CourseRepository, CourseSummary};
pub use department_repository::{DepartmentInput, DepartmentRepository, DepartmentSummary};
pub use section_repository::{SectionOption, SectionRepository, SectionWithCount};
pub use stats_repository::{DashboardStats, StatsRepository};
pub use subject_mapping_repository::{
    BatchNode, CourseNode, MappingDetails, MappingInput, SemesterNode, SubjectMappingRepository,
};
pub use subject_repository::{SubjectInput, SubjectRepository};
pub use time_table_repository::{TimeSlotDetails, TimeSlotInput, TimeTableRepository};
pub use user_repository::{UserDetails, UserInput, UserProfile, UserRepository};

use std::collections::HashMap;

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect, Select};
use uuid::Uuid;

/// Row counts of `select` grouped by the foreign key `key`.
pub(crate) async fn count_grouped<E, C>(
    db: &C,
    select: Select<E>,
    key: E::Column,
) -> Result<HashMap<Uuid, i64>, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let rows: Vec<(Uuid, i64)> = select
        .filter(key.is_not_null())
        .select_only()
        .column(key)
        .column_as(Expr::col(key).count(), "count")
        .group_by(key)
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows.into_iter().collect())
}
