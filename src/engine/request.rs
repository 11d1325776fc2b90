//! Layout input and configuration.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::coordinates::CoordinateSystem;
use crate::models::{Day, Lesson, Reference, ReferenceData, ScheduleFragment, TimeSlot};

/// Input container for one layout call.
///
/// Everything the engine reads; nothing else is consulted. Selection,
/// filtering and similar view state belong here as plain data (e.g. a
/// filtered `days` list), never as ambient state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutRequest {
    /// Slot definitions (day-independent).
    pub slots: Vec<TimeSlot>,
    /// Lesson definitions.
    pub lessons: Vec<Lesson>,
    /// Raw placement fragments.
    pub fragments: Vec<ScheduleFragment>,
    /// Days to render, in display order.
    pub days: Vec<Day>,
    /// Subjects, teachers and rooms.
    pub references: ReferenceData,
}

impl LayoutRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the slots.
    pub fn with_slots(mut self, slots: Vec<TimeSlot>) -> Self {
        self.slots = slots;
        self
    }

    /// Sets the lessons.
    pub fn with_lessons(mut self, lessons: Vec<Lesson>) -> Self {
        self.lessons = lessons;
        self
    }

    /// Sets the fragments.
    pub fn with_fragments(mut self, fragments: Vec<ScheduleFragment>) -> Self {
        self.fragments = fragments;
        self
    }

    /// Sets the days.
    pub fn with_days(mut self, days: Vec<Day>) -> Self {
        self.days = days;
        self
    }

    /// Sets the reference lookup.
    pub fn with_references(mut self, references: ReferenceData) -> Self {
        self.references = references;
        self
    }

    /// Adds one reference record.
    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.references.insert(reference);
        self
    }
}

/// Engine configuration.
///
/// Missing fields take their defaults when deserialized, so a partial
/// JSON/TOML document such as `{"coordinate_system": "Minutes"}` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Axis for offsets and spans.
    pub coordinate_system: CoordinateSystem,
    /// Origin of the minutes axis (default midnight).
    pub day_start: NaiveTime,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            coordinate_system: CoordinateSystem::Period,
            day_start: NaiveTime::MIN,
        }
    }
}

impl LayoutConfig {
    /// Period-index layout.
    pub fn periods() -> Self {
        Self::default()
    }

    /// Clock-minutes layout with offsets measured from `day_start`.
    pub fn minutes(day_start: NaiveTime) -> Self {
        Self {
            coordinate_system: CoordinateSystem::Minutes,
            day_start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = LayoutRequest::new()
            .with_slots(vec![TimeSlot::new("P1").with_order(1)])
            .with_lessons(vec![Lesson::new("L1", "MATH")])
            .with_fragments(vec![ScheduleFragment::new("F1", "L1", "MON").in_slot("P1")])
            .with_days(Day::weekdays())
            .with_reference(Reference::subject("MATH"));

        assert_eq!(req.slots.len(), 1);
        assert_eq!(req.days.len(), 5);
        assert!(!req.references.is_empty());
    }

    #[test]
    fn test_config_defaults() {
        let c = LayoutConfig::default();
        assert_eq!(c.coordinate_system, CoordinateSystem::Period);
        assert_eq!(c.day_start, NaiveTime::MIN);
        assert_eq!(LayoutConfig::periods(), c);
    }

    #[test]
    fn test_config_partial_json() {
        let c: LayoutConfig = serde_json::from_str(r#"{"coordinate_system":"Minutes"}"#).unwrap();
        assert_eq!(c.coordinate_system, CoordinateSystem::Minutes);
        assert_eq!(c.day_start, NaiveTime::MIN);

        let c: LayoutConfig =
            serde_json::from_str(r#"{"coordinate_system":"Minutes","day_start":"07:30:00"}"#)
                .unwrap();
        assert_eq!(c, LayoutConfig::minutes(NaiveTime::from_hms_opt(7, 30, 0).unwrap()));
    }
}
