mod common;

use cams_service::entities::time_table;
use cams_service::error::AppError;
use cams_service::repositories::{
    SubjectMappingRepository, TimeSlotInput, TimeTableRepository, UserProfile,
};
use cams_service::scheduling::{DayOfWeek, TimeRange};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use uuid::Uuid;

use common::{campus, mapping, setup_test_db, subject, teacher};

fn slot(subject_mapping_id: Uuid, day: i64, start: &str, end: &str) -> TimeSlotInput {
    TimeSlotInput {
        subject_mapping_id,
        day: DayOfWeek::new(day).unwrap(),
        range: TimeRange::parse(start, end).unwrap(),
        room_number: None,
    }
}

async fn schedule(
    db: &DatabaseConnection,
    subject_mapping_id: Uuid,
    day: i64,
    start: &str,
    end: &str,
) -> Result<time_table::Model, AppError> {
    TimeTableRepository::new(db)
        .create(slot(subject_mapping_id, day, start, end))
        .await
}

#[tokio::test]
async fn section_overlap_on_same_day_is_rejected() {
    let db = setup_test_db().await;
    let c = campus(&db).await;
    let math = subject(&db, c.department.department_id, "MA101").await;
    let physics = subject(&db, c.department.department_id, "PH101").await;
    let other_teacher = teacher(&db, c.department.department_id, "Vikram Das").await;

    let math_a = mapping(&db, math.subject_id, c.section_a.section_id, c.teacher.user_id).await;
    let physics_a = mapping(
        &db,
        physics.subject_id,
        c.section_a.section_id,
        other_teacher.user_id,
    )
    .await;

    schedule(&db, math_a.subject_mapping_id, 1, "09:00", "10:00")
        .await
        .unwrap();

    let err = schedule(&db, physics_a.subject_mapping_id, 1, "09:30", "10:30")
        .await
        .unwrap_err();
    match err {
        AppError::Conflict(message) => {
            assert_eq!(message, "Section A already has a class scheduled at this time.")
        }
        other => panic!("expected section conflict, got {other:?}"),
    }

    assert_eq!(time_table::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn teacher_overlap_across_sections_is_rejected() {
    let db = setup_test_db().await;
    let c = campus(&db).await;
    let math = subject(&db, c.department.department_id, "MA101").await;

    let math_a = mapping(&db, math.subject_id, c.section_a.section_id, c.teacher.user_id).await;
    let math_b = mapping(&db, math.subject_id, c.section_b.section_id, c.teacher.user_id).await;

    schedule(&db, math_a.subject_mapping_id, 2, "11:00", "12:00")
        .await
        .unwrap();

    let err = schedule(&db, math_b.subject_mapping_id, 2, "11:59", "12:30")
        .await
        .unwrap_err();
    match err {
        AppError::Conflict(message) => assert_eq!(
            message,
            "Teacher Asha Rao is already teaching elsewhere at this time."
        ),
        other => panic!("expected teacher conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn back_to_back_and_other_day_slots_are_accepted() {
    let db = setup_test_db().await;
    let c = campus(&db).await;
    let math = subject(&db, c.department.department_id, "MA101").await;
    let math_a = mapping(&db, math.subject_id, c.section_a.section_id, c.teacher.user_id).await;

    schedule(&db, math_a.subject_mapping_id, 1, "09:00", "10:00")
        .await
        .unwrap();
    schedule(&db, math_a.subject_mapping_id, 1, "10:00", "11:00")
        .await
        .unwrap();
    schedule(&db, math_a.subject_mapping_id, 3, "09:00", "10:00")
        .await
        .unwrap();

    assert_eq!(time_table::Entity::find().count(&db).await.unwrap(), 3);
}

#[tokio::test]
async fn unpadded_times_are_stored_zero_padded() {
    let db = setup_test_db().await;
    let c = campus(&db).await;
    let math = subject(&db, c.department.department_id, "MA101").await;
    let math_a = mapping(&db, math.subject_id, c.section_a.section_id, c.teacher.user_id).await;

    let created = schedule(&db, math_a.subject_mapping_id, 4, "9:00", "9:45")
        .await
        .unwrap();
    assert_eq!(created.start_time, "09:00");
    assert_eq!(created.end_time, "09:45");

    // Would wrongly pass a string comparison ("10:00" < "9:30")
    let err = schedule(&db, math_a.subject_mapping_id, 4, "9:30", "10:00")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn unknown_assignment_is_rejected() {
    let db = setup_test_db().await;

    let err = schedule(&db, Uuid::new_v4(), 1, "09:00", "10:00")
        .await
        .unwrap_err();
    match err {
        AppError::BadRequest(message) => assert_eq!(message, "Invalid Subject Assignment"),
        other => panic!("expected bad request, got {other:?}"),
    }
}

#[tokio::test]
async fn personal_timetable_follows_role() {
    let db = setup_test_db().await;
    let c = campus(&db).await;
    let math = subject(&db, c.department.department_id, "MA101").await;
    let math_a = mapping(&db, math.subject_id, c.section_a.section_id, c.teacher.user_id).await;
    let math_b = mapping(&db, math.subject_id, c.section_b.section_id, c.teacher.user_id).await;

    schedule(&db, math_b.subject_mapping_id, 1, "13:00", "14:00")
        .await
        .unwrap();
    schedule(&db, math_a.subject_mapping_id, 1, "09:00", "10:00")
        .await
        .unwrap();
    schedule(&db, math_a.subject_mapping_id, 0, "15:00", "16:00")
        .await
        .unwrap();

    let repo = TimeTableRepository::new(&db);

    let for_teacher = repo.find_for_user(&c.teacher).await.unwrap();
    let order: Vec<(i32, &str)> = for_teacher
        .iter()
        .map(|d| (d.slot.day_of_week, d.slot.start_time.as_str()))
        .collect();
    assert_eq!(order, vec![(0, "15:00"), (1, "09:00"), (1, "13:00")]);

    let student = common::user(
        &db,
        "Ravi Kumar",
        "ravi@college.edu",
        UserProfile::Student {
            batch_id: c.batch.batch_id,
            section_id: c.section_a.section_id,
            roll_number: Some("CSE24001".into()),
        },
    )
    .await;
    let for_student = repo.find_for_user(&student).await.unwrap();
    assert_eq!(for_student.len(), 2);
    assert!(
        for_student
            .iter()
            .all(|d| d.section.as_ref().map(|s| s.section_id) == Some(c.section_a.section_id))
    );
    assert_eq!(
        for_student[0].subject.as_ref().map(|s| s.code.as_str()),
        Some("MA101")
    );
    assert_eq!(
        for_student[0].teacher.as_ref().map(|t| t.name.as_str()),
        Some("Asha Rao")
    );

    let admin = common::admin(&db).await;
    assert!(repo.find_for_user(&admin).await.unwrap().is_empty());
}

#[tokio::test]
async fn removing_assignment_clears_its_slots() {
    let db = setup_test_db().await;
    let c = campus(&db).await;
    let math = subject(&db, c.department.department_id, "MA101").await;
    let math_a = mapping(&db, math.subject_id, c.section_a.section_id, c.teacher.user_id).await;

    let created = schedule(&db, math_a.subject_mapping_id, 5, "09:00", "10:00")
        .await
        .unwrap();

    SubjectMappingRepository::new(&db)
        .delete(math_a.subject_mapping_id)
        .await
        .unwrap();

    assert!(
        time_table::Entity::find_by_id(created.time_table_id)
            .one(&db)
            .await
            .unwrap()
            .is_none()
    );

    let err = TimeTableRepository::new(&db)
        .delete(created.time_table_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
