//! Layout orchestration.
//!
//! # Algorithm
//!
//! 1. Normalize slots once (they are day-independent); flag an
//!    identifier-only ordering.
//! 2. Bucket fragments by day; drop fragments for days outside the request.
//! 3. Per requested day: merge fragments into events, then pack them,
//!    excluding any event the packer rejects for a non-positive span.
//! 4. Emit every requested day, empty days included (one track, no events).
//!
//! Pure and deterministic: identical requests yield identical layouts.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::{LayoutConfig, LayoutRequest};
use crate::coordinates::Coordinates;
use crate::error::PackError;
use crate::merge::EventMerger;
use crate::models::{
    Day, DayLayout, Diagnostic, DiagnosticKind, Event, Lesson, ReferenceData, ScheduleFragment,
    TimeSlot, TimetableLayout,
};
use crate::packing;

/// Timetable layout engine.
///
/// # Example
///
/// ```
/// use u_timetable::engine::{LayoutEngine, LayoutRequest};
/// use u_timetable::models::{Day, Lesson, ScheduleFragment, TimeSlot};
///
/// let request = LayoutRequest::new()
///     .with_slots(vec![
///         TimeSlot::new("P1").with_order(1),
///         TimeSlot::new("P2").with_order(2),
///     ])
///     .with_lessons(vec![Lesson::new("L1", "MATH")])
///     .with_fragments(vec![
///         ScheduleFragment::new("F1", "L1", "MON").in_slot("P1"),
///         ScheduleFragment::new("F2", "L1", "MON").in_slot("P2"),
///     ])
///     .with_days(vec![Day::new("MON"), Day::new("TUE")]);
///
/// let layout = LayoutEngine::new().layout(&request);
/// assert_eq!(layout["MON"].events[0].span, 2);
/// assert!(layout["TUE"].events.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Creates an engine with the default (period) configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given configuration.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out every requested day, keyed by day id.
    pub fn layout(&self, request: &LayoutRequest) -> BTreeMap<String, DayLayout> {
        self.layout_report(request).into_map()
    }

    /// Lays out every requested day in request order, with diagnostics.
    pub fn layout_report(&self, request: &LayoutRequest) -> TimetableLayout {
        let coordinates = Coordinates::new(
            &request.slots,
            self.config.coordinate_system,
            self.config.day_start,
        );
        let mut diagnostics = Vec::new();

        if coordinates.slots().is_ambiguous() {
            log::warn!(
                "Slots carry neither wall-clock times nor explicit order; ordering {} slots by id",
                coordinates.slots().total_slots()
            );
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::AmbiguousOrdering,
                "",
                "Slot order fell back to identifiers and may not be chronological",
            ));
        }

        let days = unique_days(&request.days);
        let buckets = bucket_by_day(&request.fragments, &days, &mut diagnostics);
        let merger = EventMerger::new(&coordinates, &request.lessons, &request.references);

        let mut layouts = Vec::with_capacity(days.len());
        for day in days {
            let fragments = buckets.get(day.id.as_str()).into_iter().flatten().copied();
            let outcome = merger.merge_day(&day.id, fragments);
            diagnostics.extend(outcome.diagnostics);

            let (events, needed_tracks) = pack_day(outcome.events, &mut diagnostics);
            log::debug!(
                "Day {}: {} events on {} tracks",
                day.id,
                events.len(),
                needed_tracks
            );
            layouts.push(DayLayout {
                day_id: day.id.clone(),
                events,
                needed_tracks,
            });
        }

        TimetableLayout {
            coordinate_system: coordinates.system(),
            days: layouts,
            diagnostics,
        }
    }
}

/// Lays out a timetable with the default configuration.
///
/// Convenience over [`LayoutEngine::layout`] taking the inputs directly.
pub fn layout(
    fragments: &[ScheduleFragment],
    lessons: &[Lesson],
    references: &ReferenceData,
    days: &[Day],
    slots: &[TimeSlot],
) -> BTreeMap<String, DayLayout> {
    let request = LayoutRequest {
        slots: slots.to_vec(),
        lessons: lessons.to_vec(),
        fragments: fragments.to_vec(),
        days: days.to_vec(),
        references: references.clone(),
    };
    LayoutEngine::new().layout(&request)
}

/// Requested days with repeated ids removed (first occurrence kept).
fn unique_days(days: &[Day]) -> Vec<&Day> {
    let mut seen = HashSet::with_capacity(days.len());
    days.iter().filter(|d| seen.insert(d.id.as_str())).collect()
}

/// Groups fragments by day id, dropping those for unrequested days.
fn bucket_by_day<'a>(
    fragments: &'a [ScheduleFragment],
    days: &[&Day],
    diagnostics: &mut Vec<Diagnostic>,
) -> HashMap<&'a str, Vec<&'a ScheduleFragment>> {
    let valid: HashSet<&str> = days.iter().map(|d| d.id.as_str()).collect();
    let mut buckets: HashMap<&str, Vec<&ScheduleFragment>> = HashMap::new();

    for fragment in fragments {
        if valid.contains(fragment.day_id.as_str()) {
            buckets
                .entry(fragment.day_id.as_str())
                .or_default()
                .push(fragment);
        } else {
            log::warn!(
                "Dropping fragment {}: day '{}' is not in the requested day set",
                fragment.id,
                fragment.day_id
            );
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::UnknownDay,
                &fragment.id,
                format!("Fragment references unknown day '{}'", fragment.day_id),
            ));
        }
    }

    buckets
}

/// Packs one day, excluding each event the packer rejects.
fn pack_day(mut events: Vec<Event>, diagnostics: &mut Vec<Diagnostic>) -> (Vec<Event>, usize) {
    loop {
        match packing::assign_tracks(&mut events) {
            Ok(needed) => return (events, needed),
            Err(err) => {
                let (index, kind) = match err {
                    PackError::InvalidSpan { index, .. } => (index, DiagnosticKind::InvalidSpan),
                    PackError::OutOfRange { index, .. } => {
                        (index, DiagnosticKind::UnplaceableFragment)
                    }
                };
                let rejected = events.remove(index);
                log::warn!("Excluding event {}: {}", rejected.id, err);
                diagnostics.push(Diagnostic::new(kind, rejected.id, err.to_string()));
            }
        }
    }
}
