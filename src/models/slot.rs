//! Time slot model.
//!
//! A slot is a named unit of time: a class period ("Period 3") or a
//! clock-time range ("08:00-08:45"). Slots carry an optional explicit
//! `order` and optional wall-clock `start`/`end`.
//!
//! # Ordering
//! Within one layout request all slots must be comparable by a single
//! total order. Wall-clock start times take precedence, then the explicit
//! order, then the identifier. See [`crate::coordinates`].

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// A named, orderable unit of time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Unique slot identifier.
    pub id: String,
    /// Human-readable name (e.g., "Period 1").
    pub name: String,
    /// Explicit position in the day. `None` = not provided.
    pub order: Option<i32>,
    /// Wall-clock start. `None` = not provided.
    pub start: Option<NaiveTime>,
    /// Wall-clock end (exclusive). `None` = not provided.
    pub end: Option<NaiveTime>,
}

impl TimeSlot {
    /// Creates a slot with the given ID and no ordering information.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            order: None,
            start: None,
            end: None,
        }
    }

    /// Sets the slot name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the explicit order.
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Sets the wall-clock range `[start, end)`.
    pub fn with_times(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Convenience for `with_times` from hour/minute pairs.
    ///
    /// Invalid clock values leave the slot without wall-clock times.
    pub fn with_hm(self, start: (u32, u32), end: (u32, u32)) -> Self {
        match (
            NaiveTime::from_hms_opt(start.0, start.1, 0),
            NaiveTime::from_hms_opt(end.0, end.1, 0),
        ) {
            (Some(s), Some(e)) => self.with_times(s, e),
            _ => self,
        }
    }

    /// Start as minutes since midnight, if known.
    pub fn start_minute(&self) -> Option<i64> {
        self.start.map(minute_of_day)
    }

    /// End as minutes since midnight, if known.
    pub fn end_minute(&self) -> Option<i64> {
        self.end.map(minute_of_day)
    }

    /// Whether both wall-clock bounds are present.
    pub fn has_wall_clock(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

/// Minutes elapsed since midnight (seconds truncated).
#[inline]
pub fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight() / 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_builder() {
        let slot = TimeSlot::new("P1")
            .with_name("Period 1")
            .with_order(1)
            .with_hm((8, 0), (8, 45));

        assert_eq!(slot.id, "P1");
        assert_eq!(slot.name, "Period 1");
        assert_eq!(slot.order, Some(1));
        assert_eq!(slot.start_minute(), Some(480));
        assert_eq!(slot.end_minute(), Some(525));
        assert!(slot.has_wall_clock());
    }

    #[test]
    fn test_slot_invalid_clock_ignored() {
        let slot = TimeSlot::new("P1").with_hm((25, 0), (26, 0));
        assert!(!slot.has_wall_clock());
        assert_eq!(slot.start_minute(), None);
    }

    #[test]
    fn test_minute_of_day_truncates_seconds() {
        let t = NaiveTime::from_hms_opt(9, 30, 59).unwrap();
        assert_eq!(minute_of_day(t), 570);
    }
}
