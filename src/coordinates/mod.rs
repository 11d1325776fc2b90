//! Coordinate normalization.
//!
//! Maps domain time representations onto one linear axis so a single
//! interval packer serves every timetable view:
//!
//! - **Period**: discrete slot positions `0..n` from the slot ordering.
//!   Suits a single class's grid where every lesson snaps to periods.
//! - **Minutes**: continuous clock time, minutes after the configured day
//!   start. Suits a multi-section grid where period boundaries differ.
//!
//! The choice of axis is made here, never in the packer.

mod slot_index;

pub use slot_index::{OrderingBasis, SlotIndex};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::{minute_of_day, ScheduleFragment, TimeSlot};

/// Unit of `start_offset` and `span`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateSystem {
    /// Zero-based slot index.
    #[default]
    Period,
    /// Minutes after the day start.
    Minutes,
}

/// Position of one fragment on the linear axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Start offset.
    pub start: i64,
    /// Exclusive end offset.
    pub end: i64,
    /// Normalized index of the fragment's slot, if it references a known one.
    pub slot_index: Option<usize>,
}

/// Slot ordering bound to a coordinate system.
#[derive(Debug, Clone)]
pub struct Coordinates {
    system: CoordinateSystem,
    origin_minute: i64,
    slots: SlotIndex,
}

impl Coordinates {
    /// Orders `slots` and binds them to `system`.
    ///
    /// `day_start` is the minutes-mode origin; ignored in period mode.
    pub fn new(slots: &[TimeSlot], system: CoordinateSystem, day_start: NaiveTime) -> Self {
        Self {
            system,
            origin_minute: minute_of_day(day_start),
            slots: SlotIndex::build(slots),
        }
    }

    /// Active coordinate system.
    pub fn system(&self) -> CoordinateSystem {
        self.system
    }

    /// The underlying slot ordering.
    pub fn slots(&self) -> &SlotIndex {
        &self.slots
    }

    /// Places a fragment on the axis.
    ///
    /// Returns `None` when the fragment has no usable position:
    /// - period mode: no slot, or a slot that is not in the ordering;
    /// - minutes mode: neither explicit minutes nor a slot with wall-clock
    ///   times, or minutes that leave the `i64` axis once shifted by the origin.
    pub fn place(&self, fragment: &ScheduleFragment) -> Option<Placement> {
        let slot_index = fragment
            .slot_id
            .as_deref()
            .and_then(|id| self.slots.index_of(id));

        match self.system {
            CoordinateSystem::Period => {
                let idx = slot_index? as i64;
                Some(Placement {
                    start: idx,
                    end: idx + 1,
                    slot_index,
                })
            }
            CoordinateSystem::Minutes => {
                let (start, end) = match fragment.explicit_minutes() {
                    Some(range) => range,
                    None => {
                        let slot = self.slots.slot_at(slot_index?)?;
                        (slot.start_minute()?, slot.end_minute()?)
                    }
                };
                Some(Placement {
                    start: start.checked_sub(self.origin_minute)?,
                    end: end.checked_sub(self.origin_minute)?,
                    slot_index,
                })
            }
        }
    }

    /// End offset of an event covering `count` slots from position `first`.
    ///
    /// Period mode: `first + count`. Minutes mode: the wall-clock end of the
    /// slot `count - 1` positions later, clamped to the last slot; `None`
    /// if that slot has no end time.
    pub fn end_after_slots(&self, first: usize, count: i64) -> Option<i64> {
        if count <= 0 {
            return None;
        }
        match self.system {
            CoordinateSystem::Period => Some(first as i64 + count),
            CoordinateSystem::Minutes => {
                let total = self.slots.total_slots();
                if total == 0 {
                    return None;
                }
                let last = (first as i64 + count - 1).min(total as i64 - 1) as usize;
                self.slots
                    .slot_at(last)
                    .and_then(TimeSlot::end_minute)
                    .and_then(|m| m.checked_sub(self.origin_minute))
            }
        }
    }
}
