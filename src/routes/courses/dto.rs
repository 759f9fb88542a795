use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::course;
use crate::repositories::{CourseInput, CourseSummary};
use crate::routes::departments::dto::DepartmentResponse;
use crate::validation::FieldErrors;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    #[serde(default)]
    #[schema(example = "Bachelor of Technology")]
    pub name: String,

    #[serde(default)]
    #[schema(example = "BTECH")]
    pub code: String,

    pub department_id: Option<Uuid>,
}

impl CourseRequest {
    pub fn validate(self) -> Result<CourseInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.required("name", &self.name, "Name is required");
        let code = errors
            .required("code", &self.code, "Code is required")
            .to_uppercase();
        let department_id =
            errors.required_id("departmentId", self.department_id, "Department is required");
        errors.finish(CourseInput {
            name,
            code,
            department_id,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub course_id: Uuid,
    pub name: String,
    pub code: String,
    pub department_id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<course::Model> for CourseResponse {
    fn from(c: course::Model) -> Self {
        Self {
            course_id: c.course_id,
            name: c.name,
            code: c.code,
            department_id: c.department_id,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummaryResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub department: Option<DepartmentResponse>,
    pub batch_count: i64,
}

impl From<CourseSummary> for CourseSummaryResponse {
    fn from(s: CourseSummary) -> Self {
        Self {
            course: s.course.into(),
            department: s.department.map(Into::into),
            batch_count: s.batch_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_department_is_reported() {
        let errors = CourseRequest {
            name: "B.Tech".into(),
            code: "btech".into(),
            department_id: None,
        }
        .validate()
        .unwrap_err();

        assert!(errors.contains("departmentId"));
        assert!(!errors.contains("code"));
    }
}
