use axum::{
    Router,
    extract::State,
    routing::{get, put},
};
use uuid::Uuid;

use super::dto::{CourseRequest, CourseResponse, CourseSummaryResponse};
use crate::extractor::{AdminClaims, AppJson, AppPath};
use crate::repositories::CourseRepository;
use crate::response::{ApiResult, ApiSuccess, DeletedResponse, created, ok};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/admin/courses",
            get(get_all_courses).post(create_course),
        )
        .route(
            "/api/v1/admin/courses/{course_id}",
            put(update_course).delete(delete_course),
        )
}

/// Get all courses with their department and batch count (Admin only)
#[utoipa::path(
    get,
    path = "/api/v1/admin/courses",
    responses(
        (status = 200, description = "Courses retrieved", body = ApiSuccess<Vec<CourseSummaryResponse>>),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn get_all_courses(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
) -> ApiResult<Vec<CourseSummaryResponse>> {
    let courses = CourseRepository::new(&state.db)
        .find_all_with_details()
        .await?;

    ok(courses.into_iter().map(Into::into).collect())
}

/// Create a new course (Admin only)
#[utoipa::path(
    post,
    path = "/api/v1/admin/courses",
    request_body = CourseRequest,
    responses(
        (status = 201, description = "Course created", body = ApiSuccess<CourseResponse>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Course code already exists"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn create_course(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CourseRequest>,
) -> ApiResult<CourseResponse> {
    let input = payload.validate()?;
    let course = CourseRepository::new(&state.db).create(input).await?;

    created(course.into())
}

/// Update course (Admin only)
#[utoipa::path(
    put,
    path = "/api/v1/admin/courses/{course_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    request_body = CourseRequest,
    responses(
        (status = 200, description = "Course updated", body = ApiSuccess<CourseResponse>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Course or department not found"),
        (status = 409, description = "Course code already exists"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn update_course(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppPath(course_id): AppPath<Uuid>,
    AppJson(payload): AppJson<CourseRequest>,
) -> ApiResult<CourseResponse> {
    let input = payload.validate()?;
    let course = CourseRepository::new(&state.db)
        .update(course_id, input)
        .await?;

    ok(course.into())
}

/// Delete course (Admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/admin/courses/{course_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course deleted", body = ApiSuccess<DeletedResponse>),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Course still has batches"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn delete_course(
    AdminClaims(_claims): AdminClaims,
    State(state): State<AppState>,
    AppPath(course_id): AppPath<Uuid>,
) -> ApiResult<DeletedResponse> {
    CourseRepository::new(&state.db).delete(course_id).await?;

    ok(DeletedResponse { id: course_id })
}
