use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::department;
use crate::repositories::{DepartmentInput, DepartmentSummary};
use crate::validation::FieldErrors;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRequest {
    #[serde(default)]
    #[schema(example = "Computer Science and Engineering")]
    pub name: String,

    /// Stored upper-cased
    #[serde(default)]
    #[schema(example = "CSE")]
    pub code: String,
}

impl DepartmentRequest {
    pub fn validate(self) -> Result<DepartmentInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.required("name", &self.name, "Name is required");
        let code = errors
            .required("code", &self.code, "Code is required")
            .to_uppercase();
        errors.finish(DepartmentInput { name, code })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentResponse {
    pub department_id: Uuid,
    pub name: String,
    pub code: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<department::Model> for DepartmentResponse {
    fn from(d: department::Model) -> Self {
        Self {
            department_id: d.department_id,
            name: d.name,
            code: d.code,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummaryResponse {
    #[serde(flatten)]
    pub department: DepartmentResponse,
    pub course_count: i64,
    pub teacher_count: i64,
}

impl From<DepartmentSummary> for DepartmentSummaryResponse {
    fn from(s: DepartmentSummary) -> Self {
        Self {
            department: s.department.into(),
            course_count: s.course_count,
            teacher_count: s.teacher_count,
        }
    }
}
