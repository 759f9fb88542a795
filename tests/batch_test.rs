mod common;

use cams_service::entities::{batch, section, semester};
use cams_service::error::AppError;
use cams_service::repositories::{BatchInput, BatchRepository, SectionRepository, UserProfile};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};
use uuid::Uuid;

use common::{campus, course, department, section, setup_test_db, user};

#[tokio::test]
async fn four_year_batch_gets_eight_numbered_semesters() {
    let db = setup_test_db().await;
    let cse = department(&db, "CSE").await;
    let btech = course(&db, cse.department_id, "BTECH").await;

    let (created, semesters) = common::batch(&db, btech.course_id, 2024, 2028).await;

    let numbers: Vec<i32> = semesters.iter().map(|s| s.semester_number).collect();
    assert_eq!(numbers, (1..=8).collect::<Vec<_>>());
    assert!(semesters.iter().all(|s| s.batch_id == created.batch_id));

    let stored = semester::Entity::find()
        .filter(semester::Column::BatchId.eq(created.batch_id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(stored, 8);
}

#[tokio::test]
async fn failed_batch_create_leaves_nothing_behind() {
    let db = setup_test_db().await;
    let cse = department(&db, "CSE").await;
    let btech = course(&db, cse.department_id, "BTECH").await;
    common::batch(&db, btech.course_id, 2024, 2028).await;

    let repo = BatchRepository::new(&db);
    let duplicate = repo
        .create(BatchInput {
            course_id: btech.course_id,
            start_year: 2024,
            end_year: 2028,
        })
        .await
        .unwrap_err();
    match duplicate {
        AppError::Conflict(message) => {
            assert_eq!(message, "Batch already exists for this course")
        }
        other => panic!("expected conflict, got {other:?}"),
    }

    let unknown_course = repo
        .create(BatchInput {
            course_id: Uuid::new_v4(),
            start_year: 2025,
            end_year: 2029,
        })
        .await
        .unwrap_err();
    assert!(matches!(unknown_course, AppError::NotFound(_)));

    assert_eq!(batch::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(semester::Entity::find().count(&db).await.unwrap(), 8);
}

#[tokio::test]
async fn batch_create_rolls_back_when_a_semester_insert_fails() {
    let db = setup_test_db().await;
    let cse = department(&db, "CSE").await;
    let btech = course(&db, cse.department_id, "BTECH").await;
    db.execute_unprepared(
        "CREATE TRIGGER reject_fifth_semester BEFORE INSERT ON semester \
         WHEN NEW.semester_number = 5 BEGIN SELECT RAISE(ABORT, 'semester rejected'); END",
    )
    .await
    .unwrap();

    let result = BatchRepository::new(&db)
        .create(BatchInput {
            course_id: btech.course_id,
            start_year: 2024,
            end_year: 2028,
        })
        .await;
    assert!(result.is_err());

    assert_eq!(batch::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(semester::Entity::find().count(&db).await.unwrap(), 0);
}

async fn semesters_of(db: &DatabaseConnection, batch_id: Uuid) -> Vec<i32> {
    let mut numbers: Vec<i32> = semester::Entity::find()
        .filter(semester::Column::BatchId.eq(batch_id))
        .all(db)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.semester_number)
        .collect();
    numbers.sort();
    numbers
}

#[tokio::test]
async fn update_reconciles_semesters() {
    let db = setup_test_db().await;
    let c = campus(&db).await;
    let repo = BatchRepository::new(&db);
    // Extending appends the missing semesters and keeps existing ones
    repo.update(
        c.batch.batch_id,
        BatchInput {
            course_id: c.course.course_id,
            start_year: 2024,
            end_year: 2029,
        },
    )
    .await
    .unwrap();
    assert_eq!(semesters_of(&db, c.batch.batch_id).await, (1..=10).collect::<Vec<_>>());
    assert!(
        semester::Entity::find_by_id(c.semesters[0].semester_id)
            .one(&db)
            .await
            .unwrap()
            .is_some()
    );

    // A section in semester 9 blocks shrinking back to 8
    let ninth = semester::Entity::find()
        .filter(semester::Column::BatchId.eq(c.batch.batch_id))
        .filter(semester::Column::SemesterNumber.eq(9))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    let late_section = section(&db, ninth.semester_id, "X").await;

    let shrink = BatchInput {
        course_id: c.course.course_id,
        start_year: 2024,
        end_year: 2028,
    };
    let err = repo.update(c.batch.batch_id, shrink).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(semesters_of(&db, c.batch.batch_id).await.len(), 10);
    let unchanged = repo.find_by_id(c.batch.batch_id).await.unwrap().unwrap();
    assert_eq!(unchanged.end_year, 2029);

    SectionRepository::new(&db)
        .delete(late_section.section_id)
        .await
        .unwrap();
    let updated = repo.update(c.batch.batch_id, shrink).await.unwrap();
    assert_eq!(updated.end_year, 2028);
    assert_eq!(semesters_of(&db, c.batch.batch_id).await, (1..=8).collect::<Vec<_>>());
}

#[tokio::test]
async fn update_to_an_existing_batch_is_rejected() {
    let db = setup_test_db().await;
    let c = campus(&db).await;
    let (later, _) = common::batch(&db, c.course.course_id, 2025, 2029).await;

    let err = BatchRepository::new(&db)
        .update(
            later.batch_id,
            BatchInput {
                course_id: c.course.course_id,
                start_year: 2024,
                end_year: 2028,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn deleting_batch_removes_semesters_and_sections() {
    let db = setup_test_db().await;
    let c = campus(&db).await;

    BatchRepository::new(&db)
        .delete(c.batch.batch_id)
        .await
        .unwrap();

    assert_eq!(semester::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(section::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn batch_with_students_cannot_be_deleted() {
    let db = setup_test_db().await;
    let c = campus(&db).await;
    user(
        &db,
        "Ravi Kumar",
        "ravi@college.edu",
        UserProfile::Student {
            batch_id: c.batch.batch_id,
            section_id: c.section_a.section_id,
            roll_number: None,
        },
    )
    .await;

    let repo = BatchRepository::new(&db);
    let result = repo.delete(c.batch.batch_id).await;
    assert!(result.is_err());
    assert!(repo.find_by_id(c.batch.batch_id).await.unwrap().is_some());
    assert_eq!(semester::Entity::find().count(&db).await.unwrap(), 8);
}

#[tokio::test]
async fn details_list_semesters_with_sections_and_student_counts() {
    let db = setup_test_db().await;
    let c = campus(&db).await;
    user(
        &db,
        "Ravi Kumar",
        "ravi@college.edu",
        UserProfile::Student {
            batch_id: c.batch.batch_id,
            section_id: c.section_b.section_id,
            roll_number: None,
        },
    )
    .await;

    let details = BatchRepository::new(&db)
        .find_details(c.batch.batch_id)
        .await
        .unwrap();

    assert_eq!(details.course.map(|c| c.code), Some("BTECH".to_string()));
    assert_eq!(details.semesters.len(), 8);
    assert_eq!(details.semesters[0].semester.semester_number, 1);

    let first: Vec<(&str, i64)> = details.semesters[0]
        .sections
        .iter()
        .map(|s| (s.section.name.as_str(), s.student_count))
        .collect();
    assert_eq!(first, vec![("A", 0), ("B", 1)]);
    assert!(details.semesters[1].sections.is_empty());

    let missing = BatchRepository::new(&db)
        .find_details(Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(missing, AppError::NotFound(_)));
}

#[tokio::test]
async fn section_names_are_unique_within_a_semester() {
    let db = setup_test_db().await;
    let c = campus(&db).await;
    let repo = SectionRepository::new(&db);

    let err = repo
        .create(c.semesters[0].semester_id, "A".to_string())
        .await
        .unwrap_err();
    match err {
        AppError::Conflict(message) => {
            assert_eq!(message, "Section already exists in this semester")
        }
        other => panic!("expected conflict, got {other:?}"),
    }

    // Same name in another semester is fine
    repo.create(c.semesters[1].semester_id, "A".to_string())
        .await
        .unwrap();

    let options = repo.find_all_options().await.unwrap();
    let labels: Vec<(i32, &str)> = options
        .iter()
        .map(|o| (o.semester.semester_number, o.section.name.as_str()))
        .collect();
    assert_eq!(labels, vec![(1, "A"), (1, "B"), (2, "A")]);
}
