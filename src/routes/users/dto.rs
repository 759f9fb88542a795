use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::config::MIN_PASSWORD_LENGTH;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::user;
use crate::repositories::{UserDetails, UserInput, UserProfile};
use crate::routes::batches::dto::{BatchResponse, SectionResponse};
use crate::routes::departments::dto::DepartmentResponse;
use crate::validation::{FieldErrors, is_valid_email, optional_text};

/// Create/update payload. Which of the id fields are required depends on
/// `role`: teachers need `departmentId`, students need `batchId` and
/// `sectionId`. Fields that do not apply to the role are ignored.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[serde(default)]
    #[schema(example = "Asha Rao")]
    pub name: String,

    #[serde(default)]
    #[schema(example = "asha.rao@college.edu")]
    pub email: String,

    /// Required on create; on update the stored password is kept when omitted
    #[schema(example = "secret123")]
    pub password: Option<String>,

    pub role: Option<RoleEnum>,

    pub department_id: Option<Uuid>,
    pub batch_id: Option<Uuid>,
    pub section_id: Option<Uuid>,

    #[schema(example = "CSE24-017")]
    pub roll_number: Option<String>,
}

impl UserRequest {
    pub fn validate(self, password_required: bool) -> Result<UserInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = errors.required("name", &self.name, "Name is required");

        let email = self.email.trim().to_string();
        if !is_valid_email(&email) {
            errors.add("email", "Invalid email address");
        }

        let password = self.password.filter(|p| !p.is_empty());
        match &password {
            Some(p) if p.chars().count() < MIN_PASSWORD_LENGTH => errors.add(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
            ),
            None if password_required => errors.add("password", "Password is required"),
            _ => {}
        }

        let profile = match self.role {
            None => {
                errors.add("role", "Role is required");
                UserProfile::Admin
            }
            Some(RoleEnum::Admin) => UserProfile::Admin,
            Some(RoleEnum::Teacher) => UserProfile::Teacher {
                department_id: errors.required_id(
                    "departmentId",
                    self.department_id,
                    "Department is required for teachers",
                ),
            },
            Some(RoleEnum::Student) => UserProfile::Student {
                batch_id: errors.required_id(
                    "batchId",
                    self.batch_id,
                    "Batch is required for students",
                ),
                section_id: errors.required_id(
                    "sectionId",
                    self.section_id,
                    "Section is required for students",
                ),
                roll_number: optional_text(self.roll_number),
            },
        };

        errors.finish(UserInput {
            name,
            email,
            password,
            profile,
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    pub role: Option<RoleEnum>,
    /// Case-insensitive match on name or email
    pub query: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: RoleEnum,
    pub department_id: Option<Uuid>,
    pub batch_id: Option<Uuid>,
    pub section_id: Option<Uuid>,
    pub roll_number: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            user_id: u.user_id,
            name: u.name,
            email: u.email,
            role: u.role,
            department_id: u.department_id,
            batch_id: u.batch_id,
            section_id: u.section_id,
            roll_number: u.roll_number,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailsResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub department: Option<DepartmentResponse>,
    pub batch: Option<BatchResponse>,
    pub section: Option<SectionResponse>,
}

impl From<UserDetails> for UserDetailsResponse {
    fn from(d: UserDetails) -> Self {
        Self {
            user: d.user.into(),
            department: d.department.map(Into::into),
            batch: d.batch.map(Into::into),
            section: d.section.map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(role: RoleEnum) -> UserRequest {
        UserRequest {
            name: "Asha Rao".into(),
            email: "asha@college.edu".into(),
            password: Some("secret123".into()),
            role: Some(role),
            department_id: None,
            batch_id: None,
            section_id: None,
            roll_number: None,
        }
    }

    #[test]
    fn teacher_needs_a_department() {
        let errors = base(RoleEnum::Teacher).validate(true).unwrap_err();
        assert!(errors.contains("departmentId"));

        let department_id = Uuid::new_v4();
        let input = UserRequest {
            department_id: Some(department_id),
            batch_id: Some(Uuid::new_v4()),
            ..base(RoleEnum::Teacher)
        }
        .validate(true)
        .unwrap();
        assert_eq!(input.profile, UserProfile::Teacher { department_id });
    }

    #[test]
    fn student_needs_batch_and_section() {
        let errors = base(RoleEnum::Student).validate(true).unwrap_err();
        assert!(errors.contains("batchId"));
        assert!(errors.contains("sectionId"));
    }

    #[test]
    fn blank_roll_number_is_dropped() {
        let input = UserRequest {
            batch_id: Some(Uuid::new_v4()),
            section_id: Some(Uuid::new_v4()),
            roll_number: Some("   ".into()),
            ..base(RoleEnum::Student)
        }
        .validate(true)
        .unwrap();
        assert!(matches!(
            input.profile,
            UserProfile::Student {
                roll_number: None,
                ..
            }
        ));
    }

    #[test]
    fn password_rules() {
        let short = UserRequest {
            password: Some("12345".into()),
            ..base(RoleEnum::Admin)
        };
        assert_eq!(
            short.validate(false).unwrap_err().get("password"),
            Some(&["Password must be at least 6 characters".to_string()][..])
        );

        let missing = UserRequest {
            password: None,
            ..base(RoleEnum::Admin)
        };
        assert!(missing.validate(true).unwrap_err().contains("password"));

        let kept = UserRequest {
            password: None,
            ..base(RoleEnum::Admin)
        };
        assert_eq!(kept.validate(false).unwrap().password, None);
    }

    #[test]
    fn email_and_role_are_checked() {
        let errors = UserRequest {
            email: "not-an-email".into(),
            role: None,
            ..base(RoleEnum::Admin)
        }
        .validate(true)
        .unwrap_err();
        assert!(errors.contains("email"));
        assert!(errors.contains("role"));
    }
}
