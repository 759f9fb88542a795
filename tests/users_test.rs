mod common;

use cams_service::entities::sea_orm_active_enums::RoleEnum;
use cams_service::error::AppError;
use cams_service::repositories::{UserInput, UserProfile, UserRepository};
use uuid::Uuid;

use common::{TEST_HASH_COST, TEST_PASSWORD, campus, section, setup_test_db, user};

fn student_input(email: &str, batch_id: Uuid, section_id: Uuid) -> UserInput {
    UserInput {
        name: "Ravi Kumar".into(),
        email: email.into(),
        password: Some(TEST_PASSWORD.into()),
        profile: UserProfile::Student {
            batch_id,
            section_id,
            roll_number: Some("CSE24001".into()),
        },
    }
}

#[tokio::test]
async fn student_section_must_belong_to_their_batch() {
    let db = setup_test_db().await;
    let c = campus(&db).await;
    let (other_batch, other_semesters) = common::batch(&db, c.course.course_id, 2025, 2029).await;
    let foreign_section = section(&db, other_semesters[0].semester_id, "A").await;

    let repo = UserRepository::new(&db);
    let err = repo
        .create(
            student_input("ravi@college.edu", c.batch.batch_id, foreign_section.section_id),
            TEST_HASH_COST,
        )
        .await
        .unwrap_err();
    match err {
        AppError::Validation(errors) => assert_eq!(
            errors.get("sectionId"),
            Some(&["Section does not belong to the selected batch".to_string()][..])
        ),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(repo.find_by_email("ravi@college.edu").await.unwrap().is_none());

    let student = repo
        .create(
            student_input("ravi@college.edu", other_batch.batch_id, foreign_section.section_id),
            TEST_HASH_COST,
        )
        .await
        .unwrap();
    assert_eq!(student.role, RoleEnum::Student);
    assert_eq!(student.department_id, None);
    assert_eq!(student.roll_number.as_deref(), Some("CSE24001"));
}

#[tokio::test]
async fn email_is_unique_across_create_and_update() {
    let db = setup_test_db().await;
    let c = campus(&db).await;
    let repo = UserRepository::new(&db);

    let err = repo
        .create(
            student_input(&c.teacher.email, c.batch.batch_id, c.section_a.section_id),
            TEST_HASH_COST,
        )
        .await
        .unwrap_err();
    match err {
        AppError::Conflict(message) => assert_eq!(message, "Email already exists"),
        other => panic!("expected conflict, got {other:?}"),
    }

    let student = repo
        .create(
            student_input("ravi@college.edu", c.batch.batch_id, c.section_a.section_id),
            TEST_HASH_COST,
        )
        .await
        .unwrap();

    let mut taken = student_input(&c.teacher.email, c.batch.batch_id, c.section_a.section_id);
    taken.password = None;
    let err = repo
        .update(student.user_id, taken, TEST_HASH_COST)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn update_switches_role_fields_and_keeps_password_when_omitted() {
    let db = setup_test_db().await;
    let c = campus(&db).await;
    let repo = UserRepository::new(&db);
    let student = repo
        .create(
            student_input("ravi@college.edu", c.batch.batch_id, c.section_a.section_id),
            TEST_HASH_COST,
        )
        .await
        .unwrap();

    let promoted = repo
        .update(
            student.user_id,
            UserInput {
                name: "Ravi Kumar".into(),
                email: "ravi@college.edu".into(),
                password: None,
                profile: UserProfile::Teacher {
                    department_id: c.department.department_id,
                },
            },
            TEST_HASH_COST,
        )
        .await
        .unwrap();

    assert_eq!(promoted.role, RoleEnum::Teacher);
    assert_eq!(promoted.department_id, Some(c.department.department_id));
    assert_eq!(promoted.batch_id, None);
    assert_eq!(promoted.section_id, None);
    assert_eq!(promoted.roll_number, None);
    assert_eq!(promoted.password_hash, student.password_hash);

    repo.authenticate("ravi@college.edu", TEST_PASSWORD)
        .await
        .unwrap();
}

#[tokio::test]
async fn authentication_rejects_wrong_credentials_alike() {
    let db = setup_test_db().await;
    let admin = common::admin(&db).await;
    let repo = UserRepository::new(&db);

    assert_ne!(admin.password_hash, TEST_PASSWORD);
    let ok = repo
        .authenticate("admin@college.edu", TEST_PASSWORD)
        .await
        .unwrap();
    assert_eq!(ok.user_id, admin.user_id);

    for (email, password) in [
        ("admin@college.edu", "wrong-password"),
        ("nobody@college.edu", TEST_PASSWORD),
    ] {
        match repo.authenticate(email, password).await.unwrap_err() {
            AppError::Unauthorized(message) => assert_eq!(message, "Invalid email or password"),
            other => panic!("expected unauthorized, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn list_filters_by_role_and_search() {
    let db = setup_test_db().await;
    let c = campus(&db).await;
    common::admin(&db).await;
    user(
        &db,
        "Meera Nair",
        "meera@college.edu",
        UserProfile::Student {
            batch_id: c.batch.batch_id,
            section_id: c.section_b.section_id,
            roll_number: None,
        },
    )
    .await;
    let repo = UserRepository::new(&db);

    let teachers = repo.find_all(Some(RoleEnum::Teacher), None).await.unwrap();
    assert_eq!(teachers.len(), 1);
    assert_eq!(
        teachers[0].department.as_ref().map(|d| d.code.as_str()),
        Some("CSE")
    );

    let found = repo.find_all(None, Some("MEERA".into())).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].section.as_ref().map(|s| s.name.as_str()), Some("B"));
    assert_eq!(found[0].batch.as_ref().map(|b| b.start_year), Some(2024));

    let by_email = repo.find_all(None, Some("college.edu".into())).await.unwrap();
    assert_eq!(by_email.len(), 3);

    for literal in ["_", "%", "a_r", "\\"] {
        let matched = repo.find_all(None, Some(literal.into())).await.unwrap();
        assert!(matched.is_empty(), "{literal:?} matched {} users", matched.len());
    }
    let with_space = repo.find_all(None, Some("a r".into())).await.unwrap();
    assert_eq!(with_space.len(), 1);
    assert_eq!(with_space[0].user.name, "Asha Rao");
}

#[tokio::test]
async fn users_cannot_delete_themselves_or_assigned_teachers() {
    let db = setup_test_db().await;
    let c = campus(&db).await;
    let admin = common::admin(&db).await;
    let math = common::subject(&db, c.department.department_id, "MA101").await;
    common::mapping(&db, math.subject_id, c.section_a.section_id, c.teacher.user_id).await;
    let repo = UserRepository::new(&db);

    match repo.delete(admin.user_id, admin.user_id).await.unwrap_err() {
        AppError::BadRequest(message) => assert_eq!(message, "You cannot delete your own account"),
        other => panic!("expected bad request, got {other:?}"),
    }

    assert!(repo.delete(c.teacher.user_id, admin.user_id).await.is_err());
    assert!(repo.find_by_id(c.teacher.user_id).await.unwrap().is_some());
}

#[tokio::test]
async fn admin_bootstrap_is_idempotent_and_upsert_resets() {
    let db = setup_test_db().await;
    let repo = UserRepository::new(&db);

    let created = repo
        .ensure_admin("System Administrator", "root@college.edu", "first-pass", TEST_HASH_COST)
        .await
        .unwrap();
    assert!(created);
    let again = repo
        .ensure_admin("System Administrator", "root@college.edu", "other-pass", TEST_HASH_COST)
        .await
        .unwrap();
    assert!(!again);
    repo.authenticate("root@college.edu", "first-pass")
        .await
        .unwrap();

    let reset = repo
        .upsert_admin("System Administrator", "root@college.edu", "second-pass", TEST_HASH_COST)
        .await
        .unwrap();
    assert_eq!(reset.role, RoleEnum::Admin);
    repo.authenticate("root@college.edu", "second-pass")
        .await
        .unwrap();
    assert!(repo.authenticate("root@college.edu", "first-pass").await.is_err());
}
