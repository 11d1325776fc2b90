//! Layout (output) model.
//!
//! Events and day layouts are derived records: recomputed on every layout
//! call, never persisted, and free of behavior beyond simple queries so a
//! rendering layer can consume them without knowing the engine.
//!
//! # Coordinates
//! `start_offset` and `span` share one linear unit per layout: slot index
//! in period mode, minutes from the configured day start in minutes mode.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Reference;
use crate::coordinates::CoordinateSystem;

/// A merged, renderable lesson occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Derived from lesson and day: `"{lesson_id}@{day_id}"`.
    pub id: String,
    /// Source lesson.
    pub lesson_id: String,
    /// Day the event is placed on.
    pub day_id: String,
    /// Start position (slot index or minutes).
    pub start_offset: i64,
    /// Length (same unit as `start_offset`).
    pub span: i64,
    /// Subject taught.
    pub subject: Reference,
    /// Teachers, deduplicated by id in first-seen order.
    pub teachers: Vec<Reference>,
    /// Rooms, deduplicated by id in first-seen order; blank ids dropped.
    pub rooms: Vec<Reference>,
    /// Class or section of the lesson.
    pub group: Option<String>,
    /// Fragments merged into this event, in slot order.
    pub fragment_ids: Vec<String>,
    /// Vertical lane within the day (0 before packing).
    pub track_index: usize,
    /// Number of lanes the day needs (0 before packing).
    pub total_tracks_for_day: usize,
}

impl Event {
    /// Builds the event id for a lesson occurrence on a day.
    pub fn derive_id(lesson_id: &str, day_id: &str) -> String {
        format!("{lesson_id}@{day_id}")
    }

    /// Exclusive end offset.
    #[inline]
    pub fn end_offset(&self) -> i64 {
        self.start_offset.saturating_add(self.span)
    }

    /// Whether two events' `[start, end)` intervals intersect.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_offset < other.end_offset() && other.start_offset < self.end_offset()
    }
}

/// All positioned events of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLayout {
    /// Day identifier.
    pub day_id: String,
    /// Events ordered by start, then longer first, then id.
    pub events: Vec<Event>,
    /// Lanes needed to render the day without overlap (at least 1).
    pub needed_tracks: usize,
}

impl DayLayout {
    /// An empty day (one lane, no events).
    pub fn empty(day_id: impl Into<String>) -> Self {
        Self {
            day_id: day_id.into(),
            events: Vec::new(),
            needed_tracks: 1,
        }
    }

    /// Whether the day has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events placed on a given lane.
    pub fn events_on_track(&self, track: usize) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.track_index == track)
            .collect()
    }

    /// Finds an event by id.
    pub fn event(&self, event_id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == event_id)
    }
}

/// A non-fatal condition observed while building a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Condition category.
    pub kind: DiagnosticKind,
    /// Related entity (fragment, event or slot id).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of layout diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Fragment references a lesson that does not exist; dropped.
    UnknownLesson,
    /// Fragment references a day outside the requested day set; dropped.
    UnknownDay,
    /// Fragment has no usable position in the active coordinate system; dropped.
    UnplaceableFragment,
    /// Slots carry neither a complete wall-clock nor explicit order; ids were used.
    AmbiguousOrdering,
    /// Merged event has a non-positive span; excluded from its day.
    InvalidSpan,
}

impl DiagnosticKind {
    /// Whether the condition removed input from the output.
    pub fn is_drop(self) -> bool {
        !matches!(self, DiagnosticKind::AmbiguousOrdering)
    }
}

impl Diagnostic {
    /// Creates a diagnostic.
    pub fn new(
        kind: DiagnosticKind,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

/// Full output of one layout call, in request day order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableLayout {
    /// Unit of every `start_offset` / `span` in this layout.
    pub coordinate_system: CoordinateSystem,
    /// One entry per requested day, in request order.
    pub days: Vec<DayLayout>,
    /// Non-fatal conditions, in detection order.
    pub diagnostics: Vec<Diagnostic>,
}

impl TimetableLayout {
    /// Finds a day's layout.
    pub fn day(&self, day_id: &str) -> Option<&DayLayout> {
        self.days.iter().find(|d| d.day_id == day_id)
    }

    /// Total events across all days.
    pub fn event_count(&self) -> usize {
        self.days.iter().map(|d| d.events.len()).sum()
    }

    /// Diagnostics of a given kind.
    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.kind == kind).collect()
    }

    /// Converts to the id-keyed map form.
    pub fn into_map(self) -> BTreeMap<String, DayLayout> {
        self.days
            .into_iter()
            .map(|d| (d.day_id.clone(), d))
            .collect()
    }
}
