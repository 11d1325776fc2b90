//! Timetable domain models.
//!
//! Input records (slots, lessons, fragments, days, reference entities)
//! arrive from a data-access layer; output records (events, day layouts,
//! diagnostics) go to a rendering layer. All of them are plain serde data.
//!
//! # Domain Mappings
//!
//! | u-timetable | School | University | Clinic |
//! |-------------|--------|------------|--------|
//! | TimeSlot | Period | Lecture block | Appointment slot |
//! | Lesson | Class lesson | Course section | Recurring session |
//! | ScheduleFragment | Period assignment | Room booking | Slot booking |
//! | Event | Double period | Lecture | Session |
//! | Track | Grid lane | Grid lane | Grid lane |

mod day;
mod fragment;
mod layout;
mod lesson;
mod reference;
mod slot;

pub use day::Day;
pub use fragment::ScheduleFragment;
pub use layout::{DayLayout, Diagnostic, DiagnosticKind, Event, TimetableLayout};
pub use lesson::Lesson;
pub use reference::{Reference, ReferenceData, ReferenceKind};
pub use slot::{minute_of_day, TimeSlot};
