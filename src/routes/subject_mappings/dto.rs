use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{section, subject_mapping, user};
use crate::repositories::{BatchNode, CourseNode, MappingDetails, MappingInput, SemesterNode};
use crate::routes::subjects::dto::SubjectResponse;
use crate::validation::FieldErrors;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MappingRequest {
    pub subject_id: Option<Uuid>,
    pub section_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
}

impl MappingRequest {
    pub fn validate(self) -> Result<MappingInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        let subject_id = errors.required_id("subjectId", self.subject_id, "Subject is required");
        let section_id = errors.required_id("sectionId", self.section_id, "Section is required");
        let teacher_id = errors.required_id("teacherId", self.teacher_id, "Teacher is required");
        errors.finish(MappingInput {
            subject_id,
            section_id,
            teacher_id,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MappingResponse {
    pub subject_mapping_id: Uuid,
    pub subject_id: Uuid,
    pub section_id: Uuid,
    pub teacher_id: Uuid,
    pub created_at: NaiveDateTime,
}

impl From<subject_mapping::Model> for MappingResponse {
    fn from(m: subject_mapping::Model) -> Self {
        Self {
            subject_mapping_id: m.subject_mapping_id,
            subject_id: m.subject_id,
            section_id: m.section_id,
            teacher_id: m.teacher_id,
            created_at: m.created_at,
        }
    }
}

/// Name and email of the teacher behind an assignment or slot.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherSummary {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<user::Model> for TeacherSummary {
    fn from(u: user::Model) -> Self {
        Self {
            user_id: u.user_id,
            name: u.name,
            email: u.email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MappingDetailsResponse {
    #[serde(flatten)]
    pub mapping: MappingResponse,
    pub subject: Option<SubjectResponse>,
    pub teacher: Option<TeacherSummary>,
}

impl From<MappingDetails> for MappingDetailsResponse {
    fn from(d: MappingDetails) -> Self {
        Self {
            mapping: d.mapping.into(),
            subject: d.subject.map(Into::into),
            teacher: d.teacher.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionNodeResponse {
    pub section_id: Uuid,
    pub name: String,
}

impl From<section::Model> for SectionNodeResponse {
    fn from(s: section::Model) -> Self {
        Self {
            section_id: s.section_id,
            name: s.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SemesterNodeResponse {
    pub semester_id: Uuid,
    pub semester_number: i32,
    pub sections: Vec<SectionNodeResponse>,
}

impl From<SemesterNode> for SemesterNodeResponse {
    fn from(n: SemesterNode) -> Self {
        Self {
            semester_id: n.semester.semester_id,
            semester_number: n.semester.semester_number,
            sections: n.sections.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchNodeResponse {
    pub batch_id: Uuid,
    pub start_year: i32,
    pub end_year: i32,
    pub semesters: Vec<SemesterNodeResponse>,
}

impl From<BatchNode> for BatchNodeResponse {
    fn from(n: BatchNode) -> Self {
        Self {
            batch_id: n.batch.batch_id,
            start_year: n.batch.start_year,
            end_year: n.batch.end_year,
            semesters: n.semesters.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseNodeResponse {
    pub course_id: Uuid,
    pub name: String,
    pub code: String,
    pub batches: Vec<BatchNodeResponse>,
}

impl From<CourseNode> for CourseNodeResponse {
    fn from(n: CourseNode) -> Self {
        Self {
            course_id: n.course.course_id,
            name: n.course.name,
            code: n.course.code,
            batches: n.batches.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_is_required() {
        let errors = MappingRequest {
            subject_id: None,
            section_id: None,
            teacher_id: Some(Uuid::new_v4()),
        }
        .validate()
        .unwrap_err();

        assert!(errors.contains("subjectId"));
        assert!(errors.contains("sectionId"));
        assert!(!errors.contains("teacherId"));
    }
}
