use super::clock::TimeRange;
use crate::entities::time_table;

/// Returns the first stored slot whose interval overlaps `candidate`.
///
/// Callers pass slots already narrowed to one day and one section or teacher.
/// Rows whose stored times no longer parse are skipped with a warning.
pub fn find_overlap<'a, I>(candidate: &TimeRange, existing: I) -> Option<&'a time_table::Model>
where
    I: IntoIterator<Item = &'a time_table::Model>,
{
    existing.into_iter().find(|slot| {
        match TimeRange::parse(&slot.start_time, &slot.end_time) {
            Ok(range) => range.overlaps(candidate),
            Err(e) => {
                tracing::warn!(
                    time_table_id = %slot.time_table_id,
                    start_time = %slot.start_time,
                    end_time = %slot.end_time,
                    "Skipping slot with unreadable times: {}",
                    e
                );
                false
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn slot(start: &str, end: &str) -> time_table::Model {
        let now = Utc::now().naive_utc();
        time_table::Model {
            time_table_id: Uuid::new_v4(),
            subject_mapping_id: Uuid::new_v4(),
            day_of_week: 1,
            start_time: start.to_string(),
            end_time: end.to_string(),
            room_number: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn reports_the_overlapping_slot() {
        let existing = vec![slot("08:00", "09:00"), slot("10:00", "11:00")];
        let candidate = TimeRange::parse("10:30", "11:30").unwrap();

        let hit = find_overlap(&candidate, &existing).unwrap();
        assert_eq!(hit.start_time, "10:00");
    }

    #[test]
    fn back_to_back_slots_are_free() {
        let existing = vec![slot("08:00", "09:00"), slot("10:00", "11:00")];
        let candidate = TimeRange::parse("09:00", "10:00").unwrap();

        assert!(find_overlap(&candidate, &existing).is_none());
    }

    #[test]
    fn unreadable_rows_are_ignored() {
        let existing = vec![slot("bogus", "09:00")];
        let candidate = TimeRange::parse("08:00", "10:00").unwrap();

        assert!(find_overlap(&candidate, &existing).is_none());
    }
}
