use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{section, subject, subject_mapping, time_table, user};
use crate::error::{AppError, AppResult, DbResultExt};
use crate::scheduling::{DayOfWeek, TimeRange, find_overlap};

pub struct TimeTableRepository<'a> {
    db: &'a DatabaseConnection,
}

fn section_booked_message(name: Option<String>) -> String {
    match name {
        Some(name) => format!("Section {name} already has a class scheduled at this time."),
        None => "This section already has a class scheduled at this time.".to_string(),
    }
}

fn teacher_booked_message(name: Option<String>) -> String {
    match name {
        Some(name) => format!("Teacher {name} is already teaching elsewhere at this time."),
        None => "This teacher is already teaching elsewhere at this time.".to_string(),
    }
}

/// A slot request that already passed format, day and range checks.
#[derive(Debug, Clone)]
pub struct TimeSlotInput {
    pub subject_mapping_id: Uuid,
    pub day: DayOfWeek,
    pub range: TimeRange,
    pub room_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TimeSlotDetails {
    pub slot: time_table::Model,
    pub subject: Option<subject::Model>,
    pub teacher: Option<user::Model>,
    pub section: Option<section::Model>,
}

impl<'a> TimeTableRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Slots on `day` whose assignment matches `filter`.
    async fn slots_on_day(
        &self,
        day: DayOfWeek,
        filter: impl sea_orm::sea_query::IntoCondition,
    ) -> AppResult<Vec<time_table::Model>> {
        let slots = time_table::Entity::find()
            .inner_join(subject_mapping::Entity)
            .filter(time_table::Column::DayOfWeek.eq(day.index()))
            .filter(filter)
            .all(self.db)
            .await
            .db_context("Failed to check schedule conflicts")?;
        Ok(slots)
    }

    /// Schedules a slot after checking the section and then the teacher for
    /// overlapping classes on the same day.
    pub async fn create(&self, input: TimeSlotInput) -> AppResult<time_table::Model> {
        let mapping = subject_mapping::Entity::find_by_id(input.subject_mapping_id)
            .one(self.db)
            .await
            .db_context("Failed to fetch subject assignment")?
            .ok_or_else(|| AppError::BadRequest("Invalid Subject Assignment".to_string()))?;

        let section_slots = self
            .slots_on_day(
                input.day,
                subject_mapping::Column::SectionId.eq(mapping.section_id),
            )
            .await?;
        if let Some(clash) = find_overlap(&input.range, &section_slots) {
            let section_name = section::Entity::find_by_id(mapping.section_id)
                .one(self.db)
                .await
                .db_context("Failed to fetch section")?
                .map(|s| s.name);
            tracing::info!(
                section_id = %mapping.section_id,
                clash = %clash.time_table_id,
                day = input.day.name(),
                "Section already booked"
            );
            return Err(AppError::Conflict(section_booked_message(section_name)));
        }

        let teacher_slots = self
            .slots_on_day(
                input.day,
                subject_mapping::Column::TeacherId.eq(mapping.teacher_id),
            )
            .await?;
        if let Some(clash) = find_overlap(&input.range, &teacher_slots) {
            let teacher_name = user::Entity::find_by_id(mapping.teacher_id)
                .one(self.db)
                .await
                .db_context("Failed to fetch teacher")?
                .map(|u| u.name);
            tracing::info!(
                teacher_id = %mapping.teacher_id,
                clash = %clash.time_table_id,
                day = input.day.name(),
                "Teacher already booked"
            );
            return Err(AppError::Conflict(teacher_booked_message(teacher_name)));
        }

        let now = Utc::now().naive_utc();
        let slot_model = time_table::ActiveModel {
            time_table_id: Set(Uuid::new_v4()),
            subject_mapping_id: Set(mapping.subject_mapping_id),
            day_of_week: Set(input.day.index()),
            start_time: Set(input.range.start().to_string()),
            end_time: Set(input.range.end().to_string()),
            room_number: Set(input.room_number),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = slot_model
            .insert(self.db)
            .await
            .db_context("Failed to create timetable slot")?;

        tracing::info!(
            time_table_id = %result.time_table_id,
            subject_mapping_id = %result.subject_mapping_id,
            day = input.day.name(),
            start_time = %result.start_time,
            end_time = %result.end_time,
            "Timetable slot created"
        );
        Ok(result)
    }

    pub async fn delete(&self, time_table_id: Uuid) -> AppResult<()> {
        let result = time_table::Entity::delete_by_id(time_table_id)
            .exec(self.db)
            .await
            .db_context("Failed to delete timetable slot")?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Timetable slot"));
        }
        tracing::info!(%time_table_id, "Timetable slot deleted");
        Ok(())
    }

    pub async fn find_for_section(&self, section_id: Uuid) -> AppResult<Vec<TimeSlotDetails>> {
        self.find_where(subject_mapping::Column::SectionId.eq(section_id))
            .await
    }

    pub async fn find_for_teacher(&self, teacher_id: Uuid) -> AppResult<Vec<TimeSlotDetails>> {
        self.find_where(subject_mapping::Column::TeacherId.eq(teacher_id))
            .await
    }

    /// Teachers get their own classes, students their section's. Admins
    /// and students without a section get nothing.
    pub async fn find_for_user(&self, user: &user::Model) -> AppResult<Vec<TimeSlotDetails>> {
        match (user.role, user.section_id) {
            (RoleEnum::Teacher, _) => self.find_for_teacher(user.user_id).await,
            (RoleEnum::Student, Some(section_id)) => self.find_for_section(section_id).await,
            _ => Ok(Vec::new()),
        }
    }

    /// Slots ordered by day then start time, with subject, teacher and section.
    async fn find_where(
        &self,
        filter: impl sea_orm::sea_query::IntoCondition,
    ) -> AppResult<Vec<TimeSlotDetails>> {
        let rows = time_table::Entity::find()
            .find_also_related(subject_mapping::Entity)
            .filter(filter)
            .order_by_asc(time_table::Column::DayOfWeek)
            .order_by_asc(time_table::Column::StartTime)
            .all(self.db)
            .await
            .db_context("Failed to fetch timetable")?;

        let mappings: Vec<&subject_mapping::Model> =
            rows.iter().filter_map(|(_, m)| m.as_ref()).collect();

        let subject_ids: Vec<Uuid> = mappings.iter().map(|m| m.subject_id).collect();
        let teacher_ids: Vec<Uuid> = mappings.iter().map(|m| m.teacher_id).collect();
        let section_ids: Vec<Uuid> = mappings.iter().map(|m| m.section_id).collect();

        let subjects: HashMap<Uuid, subject::Model> = subject::Entity::find()
            .filter(subject::Column::SubjectId.is_in(subject_ids))
            .all(self.db)
            .await
            .db_context("Failed to fetch timetable")?
            .into_iter()
            .map(|s| (s.subject_id, s))
            .collect();
        let teachers: HashMap<Uuid, user::Model> = user::Entity::find()
            .filter(user::Column::UserId.is_in(teacher_ids))
            .all(self.db)
            .await
            .db_context("Failed to fetch timetable")?
            .into_iter()
            .map(|u| (u.user_id, u))
            .collect();
        let sections: HashMap<Uuid, section::Model> = section::Entity::find()
            .filter(section::Column::SectionId.is_in(section_ids))
            .all(self.db)
            .await
            .db_context("Failed to fetch timetable")?
            .into_iter()
            .map(|s| (s.section_id, s))
            .collect();

        Ok(rows
            .into_iter()
            .map(|(slot, mapping)| {
                let (subject, teacher, section) = match mapping {
                    Some(m) => (
                        subjects.get(&m.subject_id).cloned(),
                        teachers.get(&m.teacher_id).cloned(),
                        sections.get(&m.section_id).cloned(),
                    ),
                    None => (None, None, None),
                };
                TimeSlotDetails {
                    slot,
                    subject,
                    teacher,
                    section,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_messages_name_the_booked_party() {
        assert_eq!(
            section_booked_message(Some("A".into())),
            "Section A already has a class scheduled at this time."
        );
        assert_eq!(
            teacher_booked_message(Some("Asha Rao".into())),
            "Teacher Asha Rao is already teaching elsewhere at this time."
        );
    }

    #[test]
    fn conflict_messages_fall_back_when_the_name_is_gone() {
        assert_eq!(
            section_booked_message(None),
            "This section already has a class scheduled at this time."
        );
        assert_eq!(
            teacher_booked_message(None),
            "This teacher is already teaching elsewhere at this time."
        );
    }
}
