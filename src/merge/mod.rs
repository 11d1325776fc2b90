//! Event merging.
//!
//! Collapses the fragments of one day into events, one per lesson:
//!
//! 1. Drop fragments whose lesson is unknown or that cannot be placed on
//!    the active axis (see [`Coordinates::place`]).
//! 2. Group the rest by lesson. Every fragment of a group shares the day,
//!    so the group key is effectively `(lesson_id, day_id)`.
//! 3. Sort each group by position; the first fragment fixes `start_offset`.
//! 4. Resolve `span`: the lesson's explicit positive duration if present,
//!    otherwise the number of distinct positions the fragments cover
//!    (period mode) or the latest end minus the earliest start (minutes mode).
//! 5. Union teachers (lesson first, then per-fragment extras) and rooms,
//!    deduplicated by id, blank ids dropped.
//!
//! A lesson whose extent cannot be represented on the `i64` axis is
//! dropped whole, each of its fragments reported as unplaceable.
//!
//! Explicit duration is authoritative because fragments may be missing
//! upstream; the fragment-derived fallback can under-report a lesson whose
//! fragments were partially dropped.
//!
//! Output events are ordered by lesson id. `track_index` and
//! `total_tracks_for_day` are left at 0 for the packer.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::coordinates::{CoordinateSystem, Coordinates, Placement};
use crate::models::{
    Diagnostic, DiagnosticKind, Event, Lesson, Reference, ReferenceData, ReferenceKind,
    ScheduleFragment,
};

/// Events and dropped-input diagnostics for one day.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// Merged events, ordered by lesson id.
    pub events: Vec<Event>,
    /// Fragments dropped while merging.
    pub diagnostics: Vec<Diagnostic>,
}

/// Merges fragments into events against fixed lessons and references.
#[derive(Debug)]
pub struct EventMerger<'a> {
    coordinates: &'a Coordinates,
    lessons: HashMap<&'a str, &'a Lesson>,
    references: &'a ReferenceData,
}

struct Placed<'a> {
    placement: Placement,
    fragment: &'a ScheduleFragment,
}

impl<'a> EventMerger<'a> {
    /// Creates a merger. Duplicate lesson ids keep their first occurrence.
    pub fn new(
        coordinates: &'a Coordinates,
        lessons: &'a [Lesson],
        references: &'a ReferenceData,
    ) -> Self {
        let mut by_id = HashMap::with_capacity(lessons.len());
        for lesson in lessons {
            by_id.entry(lesson.id.as_str()).or_insert(lesson);
        }
        Self {
            coordinates,
            lessons: by_id,
            references,
        }
    }

    /// Whether a lesson id is known.
    pub fn knows_lesson(&self, lesson_id: &str) -> bool {
        self.lessons.contains_key(lesson_id)
    }

    /// Merges one day's fragments.
    ///
    /// Fragments whose `day_id` differs from `day_id` are ignored; the
    /// caller is expected to bucket fragments by day beforehand.
    pub fn merge_day<'f>(
        &self,
        day_id: &str,
        fragments: impl IntoIterator<Item = &'f ScheduleFragment>,
    ) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        let mut groups: BTreeMap<&str, Vec<Placed<'f>>> = BTreeMap::new();

        for fragment in fragments.into_iter().filter(|f| f.day_id == day_id) {
            if !self.knows_lesson(&fragment.lesson_id) {
                log::warn!(
                    "Dropping fragment {}: unknown lesson '{}'",
                    fragment.id,
                    fragment.lesson_id
                );
                outcome.diagnostics.push(Diagnostic::new(
                    DiagnosticKind::UnknownLesson,
                    &fragment.id,
                    format!("Fragment references unknown lesson '{}'", fragment.lesson_id),
                ));
                continue;
            }

            match self.coordinates.place(fragment) {
                Some(placement) => groups
                    .entry(fragment.lesson_id.as_str())
                    .or_default()
                    .push(Placed {
                        placement,
                        fragment,
                    }),
                None => {
                    log::warn!(
                        "Dropping fragment {}: no {:?} position (slot {:?})",
                        fragment.id,
                        self.coordinates.system(),
                        fragment.slot_id
                    );
                    outcome.diagnostics.push(Diagnostic::new(
                        DiagnosticKind::UnplaceableFragment,
                        &fragment.id,
                        format!(
                            "Fragment has no {:?} position (slot {:?})",
                            self.coordinates.system(),
                            fragment.slot_id
                        ),
                    ));
                }
            }
        }

        for (lesson_id, mut placed) in groups {
            let Some(lesson) = self.lessons.get(lesson_id) else {
                continue;
            };
            // Stable: fragments at the same position keep input order.
            placed.sort_by_key(|p| p.placement.start);
            match self.build_event(lesson, day_id, &placed) {
                Some(event) => outcome.events.push(event),
                None => {
                    log::warn!(
                        "Dropping lesson {} on {}: extent overflows the axis",
                        lesson_id,
                        day_id
                    );
                    outcome.diagnostics.extend(placed.iter().map(|p| {
                        Diagnostic::new(
                            DiagnosticKind::UnplaceableFragment,
                            &p.fragment.id,
                            format!("Lesson '{lesson_id}' extent overflows the axis"),
                        )
                    }));
                }
            }
        }

        outcome
    }

    /// `None` when the span or the event end overflows `i64`.
    fn build_event(&self, lesson: &Lesson, day_id: &str, placed: &[Placed<'_>]) -> Option<Event> {
        let first = placed.first()?.placement;
        let start_offset = first.start;
        let span = match lesson
            .explicit_duration()
            .and_then(|duration| self.explicit_span(first, duration))
        {
            Some(span) => span,
            None => self.derived_span(placed)?,
        };
        start_offset.checked_add(span)?;

        let teacher_ids = lesson
            .teacher_ids
            .iter()
            .chain(placed.iter().flat_map(|p| p.fragment.teacher_ids.iter()));
        let room_ids = placed.iter().flat_map(|p| p.fragment.room_ids.iter());

        Some(Event {
            id: Event::derive_id(&lesson.id, day_id),
            lesson_id: lesson.id.clone(),
            day_id: day_id.to_string(),
            start_offset,
            span,
            subject: self
                .references
                .resolve(ReferenceKind::Subject, &lesson.subject_id),
            teachers: self.resolve_unique(ReferenceKind::Teacher, teacher_ids),
            rooms: self.resolve_unique(ReferenceKind::Room, room_ids),
            group: lesson.group.clone(),
            fragment_ids: placed.iter().map(|p| p.fragment.id.clone()).collect(),
            track_index: 0,
            total_tracks_for_day: 0,
        })
    }

    /// Span from the lesson's explicit slot count.
    fn explicit_span(&self, first: Placement, duration: i64) -> Option<i64> {
        match self.coordinates.system() {
            CoordinateSystem::Period => Some(duration),
            CoordinateSystem::Minutes => {
                let end = self
                    .coordinates
                    .end_after_slots(first.slot_index?, duration)?;
                end.checked_sub(first.start)
            }
        }
    }

    /// Span from the fragments themselves.
    fn derived_span(&self, placed: &[Placed<'_>]) -> Option<i64> {
        match self.coordinates.system() {
            CoordinateSystem::Period => Some(
                placed
                    .iter()
                    .map(|p| p.placement.start)
                    .collect::<HashSet<_>>()
                    .len() as i64,
            ),
            CoordinateSystem::Minutes => {
                let start = placed.first()?.placement.start;
                let end = placed
                    .iter()
                    .map(|p| p.placement.end)
                    .max()
                    .unwrap_or(start);
                end.checked_sub(start)
            }
        }
    }

    fn resolve_unique<'s>(
        &self,
        kind: ReferenceKind,
        ids: impl Iterator<Item = &'s String>,
    ) -> Vec<Reference> {
        let mut seen = HashSet::new();
        ids.map(|id| id.trim())
            .filter(|id| !id.is_empty() && seen.insert(*id))
            .map(|id| self.references.resolve(kind, id))
            .collect()
    }
}
