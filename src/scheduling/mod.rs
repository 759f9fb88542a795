//! Weekly timetable primitives: wall-clock times, day-of-week and the
//! interval overlap test used to reject clashing slots.

pub mod clock;
pub mod conflict;

pub use clock::{ClockTime, ClockTimeError, DayOfWeek, TimeRange};
pub use conflict::find_overlap;
