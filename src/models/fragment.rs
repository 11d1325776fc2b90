//! Schedule fragment model.
//!
//! A fragment is the atomic raw record produced by a data-access layer:
//! one lesson on one day in one slot (or at an explicit minute range).
//! Several fragments sharing `(lesson_id, day_id)` are pieces of one
//! logical occurrence, e.g. a double period stored as two single periods.

use serde::{Deserialize, Serialize};

/// One raw lesson-day-slot record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleFragment {
    /// Unique fragment identifier.
    pub id: String,
    /// Lesson this fragment belongs to.
    pub lesson_id: String,
    /// Day this fragment is placed on.
    pub day_id: String,
    /// Slot this fragment occupies. `None` = placed by explicit minutes.
    pub slot_id: Option<String>,
    /// Explicit start in minutes since midnight. Overrides slot times.
    pub start_minute: Option<i64>,
    /// Explicit end in minutes since midnight (exclusive).
    pub end_minute: Option<i64>,
    /// Rooms used by this fragment. Blank ids are ignored.
    pub room_ids: Vec<String>,
    /// Extra teachers for this occurrence only (e.g., a substitute).
    pub teacher_ids: Vec<String>,
}

impl ScheduleFragment {
    /// Creates an unplaced fragment for a lesson on a day.
    pub fn new(
        id: impl Into<String>,
        lesson_id: impl Into<String>,
        day_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            lesson_id: lesson_id.into(),
            day_id: day_id.into(),
            slot_id: None,
            start_minute: None,
            end_minute: None,
            room_ids: Vec::new(),
            teacher_ids: Vec::new(),
        }
    }

    /// Places the fragment in a slot.
    pub fn in_slot(mut self, slot_id: impl Into<String>) -> Self {
        self.slot_id = Some(slot_id.into());
        self
    }

    /// Places the fragment at an explicit minute range `[start, end)`.
    pub fn at_minutes(mut self, start_minute: i64, end_minute: i64) -> Self {
        self.start_minute = Some(start_minute);
        self.end_minute = Some(end_minute);
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_ids.push(room_id.into());
        self
    }

    /// Adds an occurrence-specific teacher.
    pub fn with_teacher(mut self, teacher_id: impl Into<String>) -> Self {
        self.teacher_ids.push(teacher_id.into());
        self
    }

    /// The explicit minute range, if both bounds are present.
    pub fn explicit_minutes(&self) -> Option<(i64, i64)> {
        self.start_minute.zip(self.end_minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_builder() {
        let f = ScheduleFragment::new("F1", "L1", "MON")
            .in_slot("P1")
            .with_room("R1")
            .with_room("")
            .with_teacher("T9");

        assert_eq!(f.lesson_id, "L1");
        assert_eq!(f.day_id, "MON");
        assert_eq!(f.slot_id.as_deref(), Some("P1"));
        assert_eq!(f.room_ids.len(), 2);
        assert_eq!(f.teacher_ids, vec!["T9"]);
        assert_eq!(f.explicit_minutes(), None);
    }

    #[test]
    fn test_explicit_minutes_needs_both_bounds() {
        let f = ScheduleFragment::new("F1", "L1", "MON").at_minutes(480, 525);
        assert_eq!(f.explicit_minutes(), Some((480, 525)));

        let mut partial = ScheduleFragment::new("F2", "L1", "MON");
        partial.start_minute = Some(480);
        assert_eq!(partial.explicit_minutes(), None);
    }
}
