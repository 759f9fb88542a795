mod common;

use cams_service::entities::department;
use cams_service::error::AppError;
use cams_service::repositories::{
    CourseRepository, DepartmentInput, DepartmentRepository, MappingInput, StatsRepository,
    SubjectInput, SubjectMappingRepository, SubjectRepository, UserProfile,
};
use sea_orm::{EntityTrait, PaginatorTrait};
use uuid::Uuid;

use common::{campus, course, department, mapping, setup_test_db, subject, teacher, user};

fn assert_conflict(err: AppError, expected: &str) {
    match err {
        AppError::Conflict(message) => assert_eq!(message, expected),
        other => panic!("expected conflict {expected:?}, got {other:?}"),
    }
}

#[tokio::test]
async fn department_code_is_unique() {
    let db = setup_test_db().await;
    let repo = DepartmentRepository::new(&db);
    let cse = department(&db, "CSE").await;

    let err = repo
        .create(DepartmentInput {
            name: "Computer Science".into(),
            code: "CSE".into(),
        })
        .await
        .unwrap_err();
    assert_conflict(err, "Department code already exists");

    // Keeping its own code is not a duplicate
    let renamed = repo
        .update(
            cse.department_id,
            DepartmentInput {
                name: "Computer Science & Engineering".into(),
                code: "CSE".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Computer Science & Engineering");

    let ece = department(&db, "ECE").await;
    let err = repo
        .update(
            ece.department_id,
            DepartmentInput {
                name: "Electronics".into(),
                code: "CSE".into(),
            },
        )
        .await
        .unwrap_err();
    assert_conflict(err, "Department code already exists");

    assert_eq!(department::Entity::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn department_list_counts_courses_and_teachers() {
    let db = setup_test_db().await;
    let cse = department(&db, "CSE").await;
    let ece = department(&db, "ECE").await;
    course(&db, cse.department_id, "BTECH").await;
    course(&db, cse.department_id, "MTECH").await;
    teacher(&db, cse.department_id, "Asha Rao").await;

    let summaries = DepartmentRepository::new(&db)
        .find_all_with_counts()
        .await
        .unwrap();

    let counts: Vec<(&str, i64, i64)> = summaries
        .iter()
        .map(|s| (s.department.code.as_str(), s.course_count, s.teacher_count))
        .collect();
    assert_eq!(counts, vec![("CSE", 2, 1), ("ECE", 0, 0)]);
    assert!(summaries.iter().any(|s| s.department.department_id == ece.department_id));
}

#[tokio::test]
async fn referenced_department_cannot_be_deleted() {
    let db = setup_test_db().await;
    let cse = department(&db, "CSE").await;
    course(&db, cse.department_id, "BTECH").await;

    let repo = DepartmentRepository::new(&db);
    assert!(repo.delete(cse.department_id).await.is_err());
    assert!(repo.find_by_id(cse.department_id).await.unwrap().is_some());

    let err = repo.delete(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn course_needs_existing_department_and_unique_code() {
    let db = setup_test_db().await;
    let cse = department(&db, "CSE").await;
    course(&db, cse.department_id, "BTECH").await;
    let repo = CourseRepository::new(&db);

    let err = repo
        .create(cams_service::repositories::CourseInput {
            name: "B.Tech again".into(),
            code: "BTECH".into(),
            department_id: cse.department_id,
        })
        .await
        .unwrap_err();
    assert_conflict(err, "Course code already exists");

    let err = repo
        .create(cams_service::repositories::CourseInput {
            name: "Orphan".into(),
            code: "ORPH".into(),
            department_id: Uuid::new_v4(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn subjects_filter_by_department_and_keep_unique_codes() {
    let db = setup_test_db().await;
    let cse = department(&db, "CSE").await;
    let ece = department(&db, "ECE").await;
    subject(&db, cse.department_id, "CS102").await;
    subject(&db, cse.department_id, "CS101").await;
    let signals = subject(&db, ece.department_id, "EC101").await;
    let repo = SubjectRepository::new(&db);

    let err = repo
        .create(SubjectInput {
            name: "Duplicate".into(),
            code: "CS101".into(),
            credits: 3,
            department_id: ece.department_id,
        })
        .await
        .unwrap_err();
    assert_conflict(err, "Subject code must be unique");

    let cse_subjects = repo
        .find_all_with_department(Some(cse.department_id))
        .await
        .unwrap();
    let codes: Vec<&str> = cse_subjects.iter().map(|(s, _)| s.code.as_str()).collect();
    assert_eq!(codes, vec!["CS101", "CS102"]);
    assert!(
        cse_subjects
            .iter()
            .all(|(_, d)| d.as_ref().map(|d| d.code.as_str()) == Some("CSE"))
    );

    let all = repo.find_all_with_department(None).await.unwrap();
    assert_eq!(all.len(), 3);

    let updated = repo
        .update(
            signals.subject_id,
            SubjectInput {
                name: "Signals & Systems".into(),
                code: "EC101".into(),
                credits: 4,
                department_id: ece.department_id,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Signals & Systems");
}

#[tokio::test]
async fn subject_is_assigned_once_per_section() {
    let db = setup_test_db().await;
    let c = campus(&db).await;
    let math = subject(&db, c.department.department_id, "MA101").await;
    let other_teacher = teacher(&db, c.department.department_id, "Vikram Das").await;
    mapping(&db, math.subject_id, c.section_a.section_id, c.teacher.user_id).await;

    let repo = SubjectMappingRepository::new(&db);
    let err = repo
        .create(MappingInput {
            subject_id: math.subject_id,
            section_id: c.section_a.section_id,
            teacher_id: other_teacher.user_id,
        })
        .await
        .unwrap_err();
    assert_conflict(err, "Subject is already assigned to this section");

    // Same subject in another section is a separate assignment
    repo.create(MappingInput {
        subject_id: math.subject_id,
        section_id: c.section_b.section_id,
        teacher_id: other_teacher.user_id,
    })
    .await
    .unwrap();

    let in_a = repo.find_for_section(c.section_a.section_id).await.unwrap();
    assert_eq!(in_a.len(), 1);
    assert_eq!(
        in_a[0].teacher.as_ref().map(|t| t.name.as_str()),
        Some("Asha Rao")
    );

    // Assigned subjects cannot be deleted
    let subjects = SubjectRepository::new(&db);
    assert!(subjects.delete(math.subject_id).await.is_err());
    assert!(subjects.find_by_id(math.subject_id).await.unwrap().is_some());
}

#[tokio::test]
async fn only_teachers_can_be_assigned() {
    let db = setup_test_db().await;
    let c = campus(&db).await;
    let math = subject(&db, c.department.department_id, "MA101").await;
    let admin = common::admin(&db).await;

    let err = SubjectMappingRepository::new(&db)
        .create(MappingInput {
            subject_id: math.subject_id,
            section_id: c.section_a.section_id,
            teacher_id: admin.user_id,
        })
        .await
        .unwrap_err();
    match err {
        AppError::BadRequest(message) => assert_eq!(message, "Selected user is not a teacher"),
        other => panic!("expected bad request, got {other:?}"),
    }
}

#[tokio::test]
async fn hierarchy_nests_courses_down_to_sections() {
    let db = setup_test_db().await;
    let c = campus(&db).await;

    let tree = SubjectMappingRepository::new(&db).hierarchy().await.unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].course.course_id, c.course.course_id);
    assert_eq!(tree[0].batches.len(), 1);

    let semesters = &tree[0].batches[0].semesters;
    assert_eq!(semesters.len(), 8);
    let first: Vec<&str> = semesters[0].sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(first, vec!["A", "B"]);
}

#[tokio::test]
async fn dashboard_counts_by_role() {
    let db = setup_test_db().await;
    let c = campus(&db).await;
    common::admin(&db).await;
    for (name, email) in [("Ravi", "ravi@college.edu"), ("Meera", "meera@college.edu")] {
        user(
            &db,
            name,
            email,
            UserProfile::Student {
                batch_id: c.batch.batch_id,
                section_id: c.section_a.section_id,
                roll_number: None,
            },
        )
        .await;
    }

    let stats = StatsRepository::new(&db).dashboard().await.unwrap();
    assert_eq!(stats.students, 2);
    assert_eq!(stats.teachers, 1);
    assert_eq!(stats.departments, 1);
    assert_eq!(stats.batches, 1);
}
