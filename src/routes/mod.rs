pub mod auth;
pub mod batches;
pub mod courses;
pub mod departments;
pub mod health;
pub mod profile;
pub mod stats;
pub mod subject_mappings;
pub mod subjects;
pub mod timetable;
pub mod users;
