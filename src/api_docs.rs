use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::routes;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CAMS Academic Records API",
        description = "Departments, courses, batches, subjects, teacher assignments, users and timetables"
    ),
    paths(
        routes::health::route::health,
        routes::auth::route::login,
        routes::profile::route::get_profile,
        routes::stats::route::get_dashboard_stats,
        routes::departments::route::get_all_departments,
        routes::departments::route::create_department,
        routes::departments::route::update_department,
        routes::departments::route::delete_department,
        routes::courses::route::get_all_courses,
        routes::courses::route::create_course,
        routes::courses::route::update_course,
        routes::courses::route::delete_course,
        routes::batches::route::get_all_batches,
        routes::batches::route::create_batch,
        routes::batches::route::get_batch,
        routes::batches::route::update_batch,
        routes::batches::route::delete_batch,
        routes::batches::route::get_all_sections,
        routes::batches::route::create_section,
        routes::batches::route::delete_section,
        routes::subjects::route::get_all_subjects,
        routes::subjects::route::create_subject,
        routes::subjects::route::update_subject,
        routes::subjects::route::delete_subject,
        routes::subject_mappings::route::get_hierarchy,
        routes::subject_mappings::route::get_section_mappings,
        routes::subject_mappings::route::create_mapping,
        routes::subject_mappings::route::delete_mapping,
        routes::timetable::route::get_section_timetable,
        routes::timetable::route::create_time_slot,
        routes::timetable::route::delete_time_slot,
        routes::timetable::route::get_my_timetable,
        routes::users::route::get_all_users,
        routes::users::route::create_user,
        routes::users::route::update_user,
        routes::users::route::delete_user,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health"),
        (name = "Authentication"),
        (name = "Profile"),
        (name = "Statistics"),
        (name = "Departments"),
        (name = "Courses"),
        (name = "Batches"),
        (name = "Sections"),
        (name = "Subjects"),
        (name = "Subject Mappings"),
        (name = "Timetable"),
        (name = "Users"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
