//! Layout metrics.
//!
//! Summarizes a computed layout for operators and renderers.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Needed tracks | Lanes assigned by the packer |
//! | Peak concurrency | Max events active at one offset (sweep-line) |
//! | Extent | `[earliest start, latest end)` of the day's events |
//! | Occupied | Sum of event spans |
//! | Track fill | Occupied / (needed tracks x extent length) |
//! | Dropped | Diagnostics that removed input |
//!
//! Peak concurrency is computed independently of the packer; it equals
//! needed tracks for every non-empty day.

use crate::models::{DayLayout, TimetableLayout};
use crate::packing::peak_overlap;

/// Metrics for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayStats {
    /// Day identifier.
    pub day_id: String,
    /// Events laid out.
    pub event_count: usize,
    /// Lanes assigned.
    pub needed_tracks: usize,
    /// Max simultaneously active events.
    pub peak_concurrency: usize,
    /// Earliest event start. `None` for an empty day.
    pub earliest_start: Option<i64>,
    /// Latest event end. `None` for an empty day.
    pub latest_end: Option<i64>,
    /// Sum of event spans.
    pub occupied: i64,
    /// Fraction of the lane-extent rectangle covered by events (0.0..1.0).
    pub track_fill: f64,
}

impl DayStats {
    /// Computes metrics for a day.
    pub fn calculate(day: &DayLayout) -> Self {
        let earliest_start = day.events.iter().map(|e| e.start_offset).min();
        let latest_end = day.events.iter().map(|e| e.end_offset()).max();
        let occupied = day
            .events
            .iter()
            .fold(0i64, |acc, e| acc.saturating_add(e.span));

        let track_fill = match (earliest_start, latest_end) {
            (Some(s), Some(e)) if e > s => {
                occupied as f64 / (day.needed_tracks as f64 * (e as f64 - s as f64))
            }
            _ => 0.0,
        };

        Self {
            day_id: day.day_id.clone(),
            event_count: day.events.len(),
            needed_tracks: day.needed_tracks,
            peak_concurrency: peak_overlap(&day.events),
            earliest_start,
            latest_end,
            occupied,
            track_fill,
        }
    }
}

/// Metrics for a whole layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutStats {
    /// Per-day metrics, in layout order.
    pub days: Vec<DayStats>,
    /// Events across all days.
    pub total_events: usize,
    /// Largest lane count of any day.
    pub max_tracks: usize,
    /// Day with the most lanes (first on ties). `None` if there are no days.
    pub busiest_day: Option<String>,
    /// Diagnostics that removed input (fragments or events).
    pub dropped: usize,
}

impl LayoutStats {
    /// Computes metrics for a layout.
    pub fn calculate(layout: &TimetableLayout) -> Self {
        let days: Vec<DayStats> = layout.days.iter().map(DayStats::calculate).collect();
        let total_events = days.iter().map(|d| d.event_count).sum();

        let mut busiest: Option<&DayStats> = None;
        for d in &days {
            if busiest.map_or(true, |b| d.needed_tracks > b.needed_tracks) {
                busiest = Some(d);
            }
        }

        let max_tracks = busiest.map_or(0, |b| b.needed_tracks);
        let busiest_day = busiest.map(|b| b.day_id.clone());
        let dropped = layout
            .diagnostics
            .iter()
            .filter(|d| d.kind.is_drop())
            .count();

        Self {
            days,
            total_events,
            max_tracks,
            busiest_day,
            dropped,
        }
    }

    /// Whether every day fits within `max_tracks` lanes.
    pub fn fits_tracks(&self, max_tracks: usize) -> bool {
        self.max_tracks <= max_tracks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::CoordinateSystem;
    use crate::models::{Diagnostic, DiagnosticKind, Event, Reference};

    fn event(id: &str, start: i64, span: i64, track: usize) -> Event {
        Event {
            id: id.into(),
            lesson_id: id.into(),
            day_id: "MON".into(),
            start_offset: start,
            span,
            subject: Reference::subject("S"),
            teachers: Vec::new(),
            rooms: Vec::new(),
            group: None,
            fragment_ids: Vec::new(),
            track_index: track,
            total_tracks_for_day: 2,
        }
    }

    fn sample() -> TimetableLayout {
        TimetableLayout {
            coordinate_system: CoordinateSystem::Period,
            days: vec![
                DayLayout {
                    day_id: "MON".into(),
                    events: vec![event("a", 0, 2, 0), event("b", 1, 2, 1), event("c", 2, 2, 0)],
                    needed_tracks: 2,
                },
                DayLayout::empty("TUE"),
            ],
            diagnostics: vec![
                Diagnostic::new(DiagnosticKind::UnknownLesson, "F9", "dropped"),
                Diagnostic::new(DiagnosticKind::AmbiguousOrdering, "", "flag"),
            ],
        }
    }

    #[test]
    fn test_day_stats() {
        let layout = sample();
        let mon = DayStats::calculate(&layout.days[0]);
        assert_eq!(mon.event_count, 3);
        assert_eq!(mon.peak_concurrency, 2);
        assert_eq!(mon.earliest_start, Some(0));
        assert_eq!(mon.latest_end, Some(4));
        assert_eq!(mon.occupied, 6);
        // 6 / (2 tracks * 4 units)
        assert!((mon.track_fill - 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_empty_day_stats() {
        let tue = DayStats::calculate(&DayLayout::empty("TUE"));
        assert_eq!(tue.event_count, 0);
        assert_eq!(tue.needed_tracks, 1);
        assert_eq!(tue.peak_concurrency, 0);
        assert_eq!(tue.earliest_start, None);
        assert!((tue.track_fill - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_layout_stats() {
        let stats = LayoutStats::calculate(&sample());
        assert_eq!(stats.total_events, 3);
        assert_eq!(stats.max_tracks, 2);
        assert_eq!(stats.busiest_day.as_deref(), Some("MON"));
        assert_eq!(stats.dropped, 1); // ambiguity is not a drop
        assert!(stats.fits_tracks(2));
        assert!(!stats.fits_tracks(1));
    }

    #[test]
    fn test_no_days() {
        let stats = LayoutStats::calculate(&TimetableLayout {
            coordinate_system: CoordinateSystem::Period,
            days: Vec::new(),
            diagnostics: Vec::new(),
        });
        assert_eq!(stats.max_tracks, 0);
        assert_eq!(stats.busiest_day, None);
    }
}
