#![allow(dead_code)]

use cams_service::entities::{batch, course, department, section, semester, subject, subject_mapping, user};
use cams_service::jwt::JwtManager;
use cams_service::repositories::{
    BatchInput, BatchRepository, CourseInput, CourseRepository, DepartmentInput,
    DepartmentRepository, MappingInput, SectionRepository, SubjectInput, SubjectMappingRepository,
    SubjectRepository, UserInput, UserProfile, UserRepository,
};
use cams_service::state::AppState;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

/// Lowest cost bcrypt accepts; keeps user tests fast.
pub const TEST_HASH_COST: u32 = 4;
pub const TEST_JWT_SECRET: &str = "test-secret";
pub const TEST_PASSWORD: &str = "secret123";

pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub fn test_state(db: DatabaseConnection) -> AppState {
    AppState::new(db, JwtManager::new(TEST_JWT_SECRET, 3600), TEST_HASH_COST)
}

pub async fn department(db: &DatabaseConnection, code: &str) -> department::Model {
    DepartmentRepository::new(db)
        .create(DepartmentInput {
            name: format!("Department of {code}"),
            code: code.to_string(),
        })
        .await
        .unwrap()
}

pub async fn course(db: &DatabaseConnection, department_id: Uuid, code: &str) -> course::Model {
    CourseRepository::new(db)
        .create(CourseInput {
            name: format!("Course {code}"),
            code: code.to_string(),
            department_id,
        })
        .await
        .unwrap()
}

pub async fn batch(
    db: &DatabaseConnection,
    course_id: Uuid,
    start_year: i32,
    end_year: i32,
) -> (batch::Model, Vec<semester::Model>) {
    BatchRepository::new(db)
        .create(BatchInput {
            course_id,
            start_year,
            end_year,
        })
        .await
        .unwrap()
}

pub async fn section(db: &DatabaseConnection, semester_id: Uuid, name: &str) -> section::Model {
    SectionRepository::new(db)
        .create(semester_id, name.to_string())
        .await
        .unwrap()
}

pub async fn subject(db: &DatabaseConnection, department_id: Uuid, code: &str) -> subject::Model {
    SubjectRepository::new(db)
        .create(SubjectInput {
            name: format!("Subject {code}"),
            code: code.to_string(),
            credits: 4,
            department_id,
        })
        .await
        .unwrap()
}

pub async fn user(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    profile: UserProfile,
) -> user::Model {
    UserRepository::new(db)
        .create(
            UserInput {
                name: name.to_string(),
                email: email.to_string(),
                password: Some(TEST_PASSWORD.to_string()),
                profile,
            },
            TEST_HASH_COST,
        )
        .await
        .unwrap()
}

pub async fn teacher(db: &DatabaseConnection, department_id: Uuid, name: &str) -> user::Model {
    let email = format!("{}@college.edu", name.to_lowercase().replace(' ', "."));
    user(db, name, &email, UserProfile::Teacher { department_id }).await
}

pub async fn admin(db: &DatabaseConnection) -> user::Model {
    user(db, "Admin", "admin@college.edu", UserProfile::Admin).await
}

pub async fn mapping(
    db: &DatabaseConnection,
    subject_id: Uuid,
    section_id: Uuid,
    teacher_id: Uuid,
) -> subject_mapping::Model {
    SubjectMappingRepository::new(db)
        .create(MappingInput {
            subject_id,
            section_id,
            teacher_id,
        })
        .await
        .unwrap()
}

/// Department CSE, course BTECH, batch 2024-2028 with sections A and B in
/// semester 1, and one teacher.
pub struct Campus {
    pub department: department::Model,
    pub course: course::Model,
    pub batch: batch::Model,
    pub semesters: Vec<semester::Model>,
    pub section_a: section::Model,
    pub section_b: section::Model,
    pub teacher: user::Model,
}

pub async fn campus(db: &DatabaseConnection) -> Campus {
    let department = department(db, "CSE").await;
    let course = course(db, department.department_id, "BTECH").await;
    let (batch, semesters) = batch(db, course.course_id, 2024, 2028).await;
    let section_a = section(db, semesters[0].semester_id, "A").await;
    let section_b = section(db, semesters[0].semester_id, "B").await;
    let teacher = teacher(db, department.department_id, "Asha Rao").await;

    Campus {
        department,
        course,
        batch,
        semesters,
        section_a,
        section_b,
        teacher,
    }
}
