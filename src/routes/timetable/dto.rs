use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{section, subject, time_table};
use crate::repositories::{TimeSlotDetails, TimeSlotInput};
use crate::routes::subject_mappings::dto::TeacherSummary;
use crate::scheduling::{ClockTime, DayOfWeek, TimeRange};
use crate::validation::{FieldErrors, optional_text};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotRequest {
    pub subject_mapping_id: Option<Uuid>,

    /// 0 = Sunday through 6 = Saturday
    #[schema(example = 1)]
    pub day_of_week: Option<i64>,

    /// `H:MM` or `HH:MM`, 24-hour
    #[serde(default)]
    #[schema(example = "09:00")]
    pub start_time: String,

    #[serde(default)]
    #[schema(example = "10:00")]
    pub end_time: String,

    #[schema(example = "B-204")]
    pub room_number: Option<String>,
}

impl TimeSlotRequest {
    pub fn validate(self) -> Result<TimeSlotInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let subject_mapping_id = errors.required_id(
            "subjectMappingId",
            self.subject_mapping_id,
            "Subject is required",
        );

        let day = match self.day_of_week.map(DayOfWeek::new) {
            Some(Ok(day)) => Some(day),
            Some(Err(e)) => {
                errors.add("dayOfWeek", e.to_string());
                None
            }
            None => {
                errors.add("dayOfWeek", "Day of week is required");
                None
            }
        };

        let mut clock = |field: &str, value: &str| match value.trim().parse::<ClockTime>() {
            Ok(time) => Some(time),
            Err(e) => {
                errors.add(field, e.to_string());
                None
            }
        };
        let start = clock("startTime", &self.start_time);
        let end = clock("endTime", &self.end_time);

        let range = match (start, end) {
            (Some(start), Some(end)) => match TimeRange::new(start, end) {
                Ok(range) => Some(range),
                Err(e) => {
                    errors.add("endTime", e.to_string());
                    None
                }
            },
            _ => None,
        };

        match (day, range) {
            (Some(day), Some(range)) => errors.finish(TimeSlotInput {
                subject_mapping_id,
                day,
                range,
                room_number: optional_text(self.room_number),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotResponse {
    pub time_table_id: Uuid,
    pub subject_mapping_id: Uuid,
    pub day_of_week: i32,
    pub day_name: String,
    pub start_time: String,
    pub end_time: String,
    pub room_number: Option<String>,
}

impl From<time_table::Model> for TimeSlotResponse {
    fn from(t: time_table::Model) -> Self {
        let day_name = DayOfWeek::new(i64::from(t.day_of_week))
            .map(|d| d.name().to_string())
            .unwrap_or_default();
        Self {
            time_table_id: t.time_table_id,
            subject_mapping_id: t.subject_mapping_id,
            day_of_week: t.day_of_week,
            day_name,
            start_time: t.start_time,
            end_time: t.end_time,
            room_number: t.room_number,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSummary {
    pub subject_id: Uuid,
    pub name: String,
    pub code: String,
}

impl From<subject::Model> for SubjectSummary {
    fn from(s: subject::Model) -> Self {
        Self {
            subject_id: s.subject_id,
            name: s.name,
            code: s.code,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionSummary {
    pub section_id: Uuid,
    pub name: String,
}

impl From<section::Model> for SectionSummary {
    fn from(s: section::Model) -> Self {
        Self {
            section_id: s.section_id,
            name: s.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotDetailsResponse {
    #[serde(flatten)]
    pub slot: TimeSlotResponse,
    pub subject: Option<SubjectSummary>,
    pub teacher: Option<TeacherSummary>,
    pub section: Option<SectionSummary>,
}

impl From<TimeSlotDetails> for TimeSlotDetailsResponse {
    fn from(d: TimeSlotDetails) -> Self {
        Self {
            slot: d.slot.into(),
            subject: d.subject.map(Into::into),
            teacher: d.teacher.map(Into::into),
            section: d.section.map(Into::into),
        }
    }
}
