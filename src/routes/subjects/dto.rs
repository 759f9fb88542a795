use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entities::{department, subject};
use crate::repositories::SubjectInput;
use crate::routes::departments::dto::DepartmentResponse;
use crate::validation::FieldErrors;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRequest {
    #[serde(default)]
    #[schema(example = "Data Structures")]
    pub name: String,

    /// Stored as entered, trimmed
    #[serde(default)]
    #[schema(example = "CS201")]
    pub code: String,

    /// Defaults to 0
    #[schema(example = 4)]
    pub credits: Option<i64>,

    pub department_id: Option<Uuid>,
}

impl SubjectRequest {
    pub fn validate(self) -> Result<SubjectInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.required("name", &self.name, "Name is required");
        let code = errors.required("code", &self.code, "Code is required");

        let credits = match self.credits.unwrap_or(0) {
            c if c < 0 => {
                errors.add("credits", "Credits cannot be negative");
                0
            }
            c => i32::try_from(c).unwrap_or_else(|_| {
                errors.add("credits", "Credits out of range");
                0
            }),
        };

        let department_id =
            errors.required_id("departmentId", self.department_id, "Department is required");

        errors.finish(SubjectInput {
            name,
            code,
            credits,
            department_id,
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SubjectQuery {
    /// Only subjects of this department
    pub department_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResponse {
    pub subject_id: Uuid,
    pub name: String,
    pub code: String,
    pub credits: i32,
    pub department_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<DepartmentResponse>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<subject::Model> for SubjectResponse {
    fn from(s: subject::Model) -> Self {
        Self {
            subject_id: s.subject_id,
            name: s.name,
            code: s.code,
            credits: s.credits,
            department_id: s.department_id,
            department: None,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

impl From<(subject::Model, Option<department::Model>)> for SubjectResponse {
    fn from((s, department): (subject::Model, Option<department::Model>)) -> Self {
        Self {
            department: department.map(Into::into),
            ..s.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credits_default_to_zero_and_code_keeps_case() {
        let input = SubjectRequest {
            name: "Data Structures".into(),
            code: " cs201 ".into(),
            credits: None,
            department_id: Some(Uuid::new_v4()),
        }
        .validate()
        .unwrap();

        assert_eq!(input.credits, 0);
        assert_eq!(input.code, "cs201");
    }

    #[test]
    fn negative_credits_are_rejected() {
        let errors = SubjectRequest {
            name: "Data Structures".into(),
            code: "CS201".into(),
            credits: Some(-1),
            department_id: Some(Uuid::new_v4()),
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            errors.get("credits"),
            Some(&["Credits cannot be negative".to_string()][..])
        );
    }
}
