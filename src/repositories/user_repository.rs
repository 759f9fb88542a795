use std::collections::HashMap;

use anyhow::anyhow;
use chrono::Utc;
use sea_orm::sea_query::{Condition, Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{batch, department, section, semester, user};
use crate::error::{AppError, AppResult, DbResultExt};
use crate::validation::FieldErrors;

const DUPLICATE_EMAIL: &str = "Email already exists";
const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

/// Role plus the fields that only make sense for that role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserProfile {
    Admin,
    Teacher {
        department_id: Uuid,
    },
    Student {
        batch_id: Uuid,
        section_id: Uuid,
        roll_number: Option<String>,
    },
}

impl UserProfile {
    pub fn role(&self) -> RoleEnum {
        match self {
            UserProfile::Admin => RoleEnum::Admin,
            UserProfile::Teacher { .. } => RoleEnum::Teacher,
            UserProfile::Student { .. } => RoleEnum::Student,
        }
    }

    fn apply(self, active_model: &mut user::ActiveModel) {
        active_model.role = Set(self.role());
        let (department_id, batch_id, section_id, roll_number) = match self {
            UserProfile::Admin => (None, None, None, None),
            UserProfile::Teacher { department_id } => (Some(department_id), None, None, None),
            UserProfile::Student {
                batch_id,
                section_id,
                roll_number,
            } => (None, Some(batch_id), Some(section_id), roll_number),
        };
        active_model.department_id = Set(department_id);
        active_model.batch_id = Set(batch_id);
        active_model.section_id = Set(section_id);
        active_model.roll_number = Set(roll_number);
    }
}

/// Validated user fields. `password` is mandatory on create and replaces
/// the stored hash on update only when present.
#[derive(Debug, Clone)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub profile: UserProfile,
}

#[derive(Debug, Clone)]
pub struct UserDetails {
    pub user: user::Model,
    pub department: Option<department::Model>,
    pub batch: Option<batch::Model>,
    pub section: Option<section::Model>,
}

fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    bcrypt::hash(password, cost).map_err(|e| AppError::Internal(anyhow!("Failed to hash password: {}", e)))
}

/// Makes `\`, `%` and `_` match themselves in a `LIKE` pattern escaped with `\`.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<user::Model>> {
        let user = user::Entity::find_by_id(user_id)
            .one(self.db)
            .await
            .db_context("Failed to fetch user")?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        let user = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db)
            .await
            .db_context("Failed to fetch user")?;
        Ok(user)
    }

    pub async fn find_details(&self, user_id: Uuid) -> AppResult<UserDetails> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;
        let mut details = self.with_relations(vec![user]).await?;
        details
            .pop()
            .ok_or_else(|| AppError::not_found("User"))
    }

    /// Newest first. `search` matches name or email, ignoring case.
    pub async fn find_all(
        &self,
        role: Option<RoleEnum>,
        search: Option<String>,
    ) -> AppResult<Vec<UserDetails>> {
        let mut query = user::Entity::find();

        if let Some(role) = role {
            query = query.filter(user::Column::Role.eq(role));
        }

        if let Some(term) = search {
            let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
            query = query.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(user::Column::Name)))
                            .like(LikeExpr::new(pattern.clone()).escape('\\')),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(user::Column::Email)))
                            .like(LikeExpr::new(pattern).escape('\\')),
                    ),
            );
        }

        let users = query
            .order_by_desc(user::Column::CreatedAt)
            .all(self.db)
            .await
            .db_context("Failed to fetch users")?;

        self.with_relations(users).await
    }

    async fn with_relations(&self, users: Vec<user::Model>) -> AppResult<Vec<UserDetails>> {
        let department_ids: Vec<Uuid> = users.iter().filter_map(|u| u.department_id).collect();
        let batch_ids: Vec<Uuid> = users.iter().filter_map(|u| u.batch_id).collect();
        let section_ids: Vec<Uuid> = users.iter().filter_map(|u| u.section_id).collect();

        let departments: HashMap<Uuid, department::Model> = department::Entity::find()
            .filter(department::Column::DepartmentId.is_in(department_ids))
            .all(self.db)
            .await
            .db_context("Failed to fetch users")?
            .into_iter()
            .map(|d| (d.department_id, d))
            .collect();
        let batches: HashMap<Uuid, batch::Model> = batch::Entity::find()
            .filter(batch::Column::BatchId.is_in(batch_ids))
            .all(self.db)
            .await
            .db_context("Failed to fetch users")?
            .into_iter()
            .map(|b| (b.batch_id, b))
            .collect();
        let sections: HashMap<Uuid, section::Model> = section::Entity::find()
            .filter(section::Column::SectionId.is_in(section_ids))
            .all(self.db)
            .await
            .db_context("Failed to fetch users")?
            .into_iter()
            .map(|s| (s.section_id, s))
            .collect();

        Ok(users
            .into_iter()
            .map(|user| UserDetails {
                department: user.department_id.and_then(|id| departments.get(&id).cloned()),
                batch: user.batch_id.and_then(|id| batches.get(&id).cloned()),
                section: user.section_id.and_then(|id| sections.get(&id).cloned()),
                user,
            })
            .collect())
    }

    async fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> AppResult<bool> {
        let mut query = user::Entity::find().filter(user::Column::Email.eq(email));
        if let Some(id) = exclude {
            query = query.filter(user::Column::UserId.ne(id));
        }
        let existing = query
            .one(self.db)
            .await
            .db_context("Failed to check email")?;
        Ok(existing.is_some())
    }

    /// Referenced department, batch and section must exist, and a student's
    /// section must sit in one of their batch's semesters.
    async fn check_profile(&self, profile: &UserProfile) -> AppResult<()> {
        match profile {
            UserProfile::Admin => Ok(()),
            UserProfile::Teacher { department_id } => {
                department::Entity::find_by_id(*department_id)
                    .one(self.db)
                    .await
                    .db_context("Failed to fetch department")?
                    .ok_or_else(|| AppError::not_found("Department"))?;
                Ok(())
            }
            UserProfile::Student {
                batch_id,
                section_id,
                ..
            } => {
                batch::Entity::find_by_id(*batch_id)
                    .one(self.db)
                    .await
                    .db_context("Failed to fetch batch")?
                    .ok_or_else(|| AppError::not_found("Batch"))?;

                let (_, semester) = section::Entity::find_by_id(*section_id)
                    .find_also_related(semester::Entity)
                    .one(self.db)
                    .await
                    .db_context("Failed to fetch section")?
                    .ok_or_else(|| AppError::not_found("Section"))?;

                if semester.map(|s| s.batch_id) != Some(*batch_id) {
                    let mut errors = FieldErrors::new();
                    errors.add("sectionId", "Section does not belong to the selected batch");
                    return Err(errors.into());
                }
                Ok(())
            }
        }
    }

    pub async fn create(&self, input: UserInput, hash_cost: u32) -> AppResult<user::Model> {
        let Some(password) = input.password else {
            let mut errors = FieldErrors::new();
            errors.add("password", "Password is required");
            return Err(errors.into());
        };

        self.check_profile(&input.profile).await?;
        if self.email_taken(&input.email, None).await? {
            return Err(AppError::Conflict(DUPLICATE_EMAIL.to_string()));
        }

        let now = Utc::now().naive_utc();
        let mut user_model = user::ActiveModel {
            user_id: Set(Uuid::new_v4()),
            name: Set(input.name),
            email: Set(input.email),
            password_hash: Set(hash_password(&password, hash_cost)?),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        input.profile.apply(&mut user_model);

        let result = user_model
            .insert(self.db)
            .await
            .on_duplicate(DUPLICATE_EMAIL, "Failed to create user")?;

        tracing::info!(user_id = %result.user_id, role = %result.role, "User created");
        Ok(result)
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        input: UserInput,
        hash_cost: u32,
    ) -> AppResult<user::Model> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        self.check_profile(&input.profile).await?;
        if self.email_taken(&input.email, Some(user_id)).await? {
            return Err(AppError::Conflict(DUPLICATE_EMAIL.to_string()));
        }

        let mut active_model: user::ActiveModel = user.into();
        active_model.name = Set(input.name);
        active_model.email = Set(input.email);
        if let Some(password) = input.password {
            active_model.password_hash = Set(hash_password(&password, hash_cost)?);
        }
        input.profile.apply(&mut active_model);
        active_model.updated_at = Set(Utc::now().naive_utc());

        let result = active_model
            .update(self.db)
            .await
            .on_duplicate(DUPLICATE_EMAIL, "Failed to update user")?;
        Ok(result)
    }

    /// `acting_user_id` is the caller; removing your own account is refused.
    pub async fn delete(&self, user_id: Uuid, acting_user_id: Uuid) -> AppResult<()> {
        if user_id == acting_user_id {
            return Err(AppError::BadRequest(
                "You cannot delete your own account".to_string(),
            ));
        }

        let result = user::Entity::delete_by_id(user_id)
            .exec(self.db)
            .await
            .on_in_use("Failed to delete user. It might have related subject assignments.")?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("User"));
        }
        tracing::info!(%user_id, "User deleted");
        Ok(())
    }

    /// Email + password check for login.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<user::Model> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        let valid = bcrypt::verify(password, &user.password_hash).map_err(|e| {
            tracing::warn!(user_id = %user.user_id, "Unreadable password hash: {}", e);
            AppError::Unauthorized(INVALID_CREDENTIALS.to_string())
        })?;
        if !valid {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
        Ok(user)
    }

    /// Creates the admin account unless the email is already registered.
    /// Returns `true` when a row was inserted.
    pub async fn ensure_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
        hash_cost: u32,
    ) -> AppResult<bool> {
        if self.find_by_email(email).await?.is_some() {
            tracing::info!(email, "Admin user already exists");
            return Ok(false);
        }

        let input = UserInput {
            name: name.to_string(),
            email: email.to_string(),
            password: Some(password.to_string()),
            profile: UserProfile::Admin,
        };
        self.create(input, hash_cost).await?;
        Ok(true)
    }

    /// Like `ensure_admin`, but an existing account with this email is
    /// promoted to admin and gets the new password.
    pub async fn upsert_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
        hash_cost: u32,
    ) -> AppResult<user::Model> {
        let input = UserInput {
            name: name.to_string(),
            email: email.to_string(),
            password: Some(password.to_string()),
            profile: UserProfile::Admin,
        };

        match self.find_by_email(email).await? {
            Some(existing) => self.update(existing.user_id, input, hash_cost).await,
            None => self.create(input, hash_cost).await,
        }
    }
}
