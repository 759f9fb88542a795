use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{MAX_BATCH_YEAR, MIN_BATCH_YEAR};
use crate::entities::{batch, section, semester};
use crate::repositories::{
    BatchDetails, BatchInput, BatchSummary, SectionOption, SectionWithCount, SemesterDetails,
};
use crate::routes::courses::dto::CourseResponse;
use crate::validation::FieldErrors;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub course_id: Option<Uuid>,

    #[schema(example = 2024)]
    pub start_year: Option<i64>,

    #[schema(example = 2028)]
    pub end_year: Option<i64>,
}

fn year(errors: &mut FieldErrors, field: &str, value: Option<i64>) -> Option<i32> {
    let year = value
        .filter(|y| (i64::from(MIN_BATCH_YEAR)..=i64::from(MAX_BATCH_YEAR)).contains(y))
        .and_then(|y| i32::try_from(y).ok());
    if year.is_none() {
        errors.add(field, "Invalid year");
    }
    year
}

impl BatchRequest {
    pub fn validate(self) -> Result<BatchInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        let course_id = errors.required_id("courseId", self.course_id, "Course is required");
        let start_year = year(&mut errors, "startYear", self.start_year);
        let end_year = year(&mut errors, "endYear", self.end_year);

        match (start_year, end_year) {
            (Some(start_year), Some(end_year)) => {
                if end_year <= start_year {
                    errors.add("endYear", "End year must be after start year");
                }
                errors.finish(BatchInput {
                    course_id,
                    start_year,
                    end_year,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub batch_id: Uuid,
    pub course_id: Uuid,
    pub start_year: i32,
    pub end_year: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<batch::Model> for BatchResponse {
    fn from(b: batch::Model) -> Self {
        Self {
            batch_id: b.batch_id,
            course_id: b.course_id,
            start_year: b.start_year,
            end_year: b.end_year,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SemesterResponse {
    pub semester_id: Uuid,
    pub batch_id: Uuid,
    pub semester_number: i32,
}

impl From<semester::Model> for SemesterResponse {
    fn from(s: semester::Model) -> Self {
        Self {
            semester_id: s.semester_id,
            batch_id: s.batch_id,
            semester_number: s.semester_number,
        }
    }
}

/// A new batch and the semesters generated for it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreatedResponse {
    #[serde(flatten)]
    pub batch: BatchResponse,
    pub semesters: Vec<SemesterResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummaryResponse {
    #[serde(flatten)]
    pub batch: BatchResponse,
    pub course: Option<CourseResponse>,
    pub semester_count: i64,
    pub user_count: i64,
}

impl From<BatchSummary> for BatchSummaryResponse {
    fn from(s: BatchSummary) -> Self {
        Self {
            batch: s.batch.into(),
            course: s.course.map(Into::into),
            semester_count: s.semester_count,
            user_count: s.user_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    pub section_id: Uuid,
    pub semester_id: Uuid,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<section::Model> for SectionResponse {
    fn from(s: section::Model) -> Self {
        Self {
            section_id: s.section_id,
            semester_id: s.semester_id,
            name: s.name,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionWithCountResponse {
    #[serde(flatten)]
    pub section: SectionResponse,
    pub student_count: i64,
}

impl From<SectionWithCount> for SectionWithCountResponse {
    fn from(s: SectionWithCount) -> Self {
        Self {
            section: s.section.into(),
            student_count: s.student_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SemesterDetailsResponse {
    #[serde(flatten)]
    pub semester: SemesterResponse,
    pub sections: Vec<SectionWithCountResponse>,
}

impl From<SemesterDetails> for SemesterDetailsResponse {
    fn from(s: SemesterDetails) -> Self {
        Self {
            semester: s.semester.into(),
            sections: s.sections.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchDetailsResponse {
    #[serde(flatten)]
    pub batch: BatchResponse,
    pub course: Option<CourseResponse>,
    pub semesters: Vec<SemesterDetailsResponse>,
}

impl From<BatchDetails> for BatchDetailsResponse {
    fn from(d: BatchDetails) -> Self {
        Self {
            batch: d.batch.into(),
            course: d.course.map(Into::into),
            semesters: d.semesters.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionRequest {
    #[serde(default)]
    #[schema(example = "A")]
    pub name: String,
}

impl SectionRequest {
    pub fn validate(self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.required("name", &self.name, "Name is required");
        errors.finish(name)
    }
}

/// Section entry for pickers, e.g. `BTECH 2024-2028 / Sem 3 / A`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionOptionResponse {
    pub section_id: Uuid,
    pub name: String,
    pub semester_id: Uuid,
    pub semester_number: i32,
    pub batch_id: Uuid,
    pub start_year: i32,
    pub end_year: i32,
    pub course: Option<CourseResponse>,
    pub label: String,
}

impl From<SectionOption> for SectionOptionResponse {
    fn from(o: SectionOption) -> Self {
        let course_code = o.course.as_ref().map(|c| c.code.as_str()).unwrap_or("-");
        let label = format!(
            "{} {}-{} / Sem {} / {}",
            course_code,
            o.batch.start_year,
            o.batch.end_year,
            o.semester.semester_number,
            o.section.name
        );
        Self {
            section_id: o.section.section_id,
            name: o.section.name,
            semester_id: o.semester.semester_id,
            semester_number: o.semester.semester_number,
            batch_id: o.batch.batch_id,
            start_year: o.batch.start_year,
            end_year: o.batch.end_year,
            course: o.course.map(Into::into),
            label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(start: Option<i64>, end: Option<i64>) -> BatchRequest {
        BatchRequest {
            course_id: Some(Uuid::new_v4()),
            start_year: start,
            end_year: end,
        }
    }

    #[test]
    fn valid_range_passes() {
        let input = request(Some(2024), Some(2028)).validate().unwrap();
        assert_eq!(input.total_semesters(), 8);
    }

    #[test]
    fn end_year_must_follow_start_year() {
        let errors = request(Some(2024), Some(2024)).validate().unwrap_err();
        assert_eq!(
            errors.get("endYear"),
            Some(&["End year must be after start year".to_string()][..])
        );
    }

    #[test]
    fn years_outside_bounds_are_invalid() {
        let errors = request(Some(1999), Some(2101)).validate().unwrap_err();
        assert_eq!(errors.get("startYear"), Some(&["Invalid year".to_string()][..]));
        assert_eq!(errors.get("endYear"), Some(&["Invalid year".to_string()][..]));
    }

    #[test]
    fn course_is_required() {
        let errors = BatchRequest {
            course_id: None,
            start_year: Some(2024),
            end_year: Some(2028),
        }
        .validate()
        .unwrap_err();
        assert!(errors.contains("courseId"));
    }
}
