use serde::Serialize;
use utoipa::ToSchema;

use crate::repositories::DashboardStats;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
    pub total_students: u64,
    pub total_teachers: u64,
    pub total_departments: u64,
    pub total_batches: u64,
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(s: DashboardStats) -> Self {
        Self {
            total_students: s.students,
            total_teachers: s.teachers,
            total_departments: s.departments,
            total_batches: s.batches,
        }
    }
}
