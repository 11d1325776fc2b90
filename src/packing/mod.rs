//! Interval packing (track assignment).
//!
//! Assigns each half-open interval `[start, start + span)` of one day to a
//! track so that intervals on the same track never overlap, using as few
//! tracks as possible.
//!
//! # Algorithm
//!
//! Greedy first-fit in start order (interval-graph coloring):
//! 1. Sort by start ascending; ties by span descending; remaining ties by
//!    input position.
//! 2. Keep `track_ends[i]`, the end of the last interval placed on track `i`.
//! 3. Place each interval on the first track with `track_ends[i] <= start`,
//!    or open a new track.
//! 4. `needed_tracks = max(1, track_ends.len())`.
//!
//! Processing in start order makes first-fit optimal: a new track opens only
//! when every existing track is busy at `start`, so the track count equals
//! the peak number of simultaneously active intervals.
//!
//! # Complexity
//! O(n log n) for the sort, O(n * t) for the scan where t = tracks in use.
//!
//! # Reference
//! Golumbic (2004), "Algorithmic Graph Theory and Perfect Graphs", Ch. 8

use crate::error::{PackError, PackResult};
use crate::models::Event;

/// A half-open interval on a linear axis.
pub trait Interval {
    /// Start offset (inclusive).
    fn start(&self) -> i64;

    /// Length. Must be positive to be packable.
    fn span(&self) -> i64;

    /// End offset (exclusive), saturating at the axis bounds.
    fn end(&self) -> i64 {
        self.start().saturating_add(self.span())
    }
}

impl Interval for Event {
    fn start(&self) -> i64 {
        self.start_offset
    }

    fn span(&self) -> i64 {
        self.span
    }
}

/// `(start, span)` pairs.
impl Interval for (i64, i64) {
    fn start(&self) -> i64 {
        self.0
    }

    fn span(&self) -> i64 {
        self.1
    }
}

/// Result of packing a slice of intervals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packing {
    /// Track of each interval, by input position.
    pub tracks: Vec<usize>,
    /// Input positions in placement order.
    pub order: Vec<usize>,
    /// Tracks used (at least 1).
    pub needed_tracks: usize,
}

/// Packs intervals onto the fewest tracks.
///
/// # Errors
/// For the first offending interval by input position, nothing packed:
/// - [`PackError::InvalidSpan`] if its span is zero or negative;
/// - [`PackError::OutOfRange`] if `start + span` overflows `i64`.
pub fn pack<T: Interval>(items: &[T]) -> PackResult<Packing> {
    for (index, item) in items.iter().enumerate() {
        let (start, span) = (item.start(), item.span());
        if span <= 0 {
            return Err(PackError::InvalidSpan { index, span });
        }
        if start.checked_add(span).is_none() {
            return Err(PackError::OutOfRange { index, start, span });
        }
    }

    let mut order: Vec<usize> = (0..items.len()).collect();
    // Stable: equal (start, span) keep input order.
    order.sort_by(|&a, &b| {
        items[a]
            .start()
            .cmp(&items[b].start())
            .then_with(|| items[b].span().cmp(&items[a].span()))
    });

    let mut tracks = vec![0; items.len()];
    let mut track_ends: Vec<i64> = Vec::new();

    for &idx in &order {
        let item = &items[idx];
        match track_ends.iter().position(|&end| end <= item.start()) {
            Some(t) => {
                track_ends[t] = item.end();
                tracks[idx] = t;
            }
            None => {
                tracks[idx] = track_ends.len();
                track_ends.push(item.end());
            }
        }
    }

    Ok(Packing {
        tracks,
        order,
        needed_tracks: track_ends.len().max(1),
    })
}

/// Packs a day's events in place.
///
/// Reorders `events` into placement order, sets every `track_index` and
/// `total_tracks_for_day`, and returns the needed track count.
///
/// # Errors
/// As [`pack`]; `events` is left untouched.
pub fn assign_tracks(events: &mut Vec<Event>) -> PackResult<usize> {
    let packing = pack(events.as_slice())?;
    let needed = packing.needed_tracks;

    let mut slots: Vec<Option<Event>> = std::mem::take(events).into_iter().map(Some).collect();
    for &idx in &packing.order {
        if let Some(mut event) = slots[idx].take() {
            event.track_index = packing.tracks[idx];
            event.total_tracks_for_day = needed;
            events.push(event);
        }
    }

    Ok(needed)
}

/// Maximum number of intervals active at any single point.
///
/// Sweep-line over start/end points, ends before starts at equal offsets
/// (half-open intervals that merely touch do not overlap). Intervals with
/// non-positive span are ignored. Equals [`Packing::needed_tracks`] for
/// any non-empty valid input.
pub fn peak_overlap<T: Interval>(items: &[T]) -> usize {
    let mut points: Vec<(i64, i32)> = Vec::with_capacity(items.len() * 2);
    for item in items.iter().filter(|i| i.span() > 0) {
        points.push((item.start(), 1));
        points.push((item.end(), -1));
    }
    // -1 sorts before +1 at the same offset.
    points.sort_unstable();

    let mut active: i64 = 0;
    let mut peak: i64 = 0;
    for (_, delta) in points {
        active += i64::from(delta);
        peak = peak.max(active);
    }
    peak as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staircase_reuses_freed_track() {
        // [0,2) [1,3) [2,4)
        let items: Vec<(i64, i64)> = vec![(0, 2), (1, 2), (2, 2)];
        let p = pack(&items).unwrap();
        assert_eq!(p.tracks, vec![0, 1, 0]);
        assert_eq!(p.needed_tracks, 2);
    }

    #[test]
    fn test_empty_needs_one_track() {
        let items: Vec<(i64, i64)> = Vec::new();
        let p = pack(&items).unwrap();
        assert!(p.tracks.is_empty());
        assert_eq!(p.needed_tracks, 1);
        assert_eq!(peak_overlap(&items), 0);
    }

    #[test]
    fn test_longer_first_on_equal_start() {
        let items: Vec<(i64, i64)> = vec![(0, 1), (0, 3), (1, 1)];
        let p = pack(&items).unwrap();
        // (0,3) placed first on track 0; (0,1) on track 1; (1,1) reuses track 1.
        assert_eq!(p.order, vec![1, 0, 2]);
        assert_eq!(p.tracks, vec![1, 0, 1]);
        assert_eq!(p.needed_tracks, 2);
    }

    #[test]
    fn test_exact_duplicates_get_distinct_tracks() {
        let items: Vec<(i64, i64)> = vec![(3, 2), (3, 2), (3, 2)];
        let p = pack(&items).unwrap();
        assert_eq!(p.tracks, vec![0, 1, 2]);
        assert_eq!(p.needed_tracks, 3);
    }

    #[test]
    fn test_invalid_span_rejected() {
        let items: Vec<(i64, i64)> = vec![(0, 2), (1, 0), (2, -1)];
        assert_eq!(
            pack(&items),
            Err(PackError::InvalidSpan { index: 1, span: 0 })
        );
    }

    #[test]
    fn test_end_past_axis_rejected() {
        let items: Vec<(i64, i64)> = vec![(0, 2), (i64::MAX - 1, 5)];
        assert_eq!(
            pack(&items),
            Err(PackError::OutOfRange {
                index: 1,
                start: i64::MAX - 1,
                span: 5
            })
        );

        // Ending exactly at the top of the axis is fine.
        let items: Vec<(i64, i64)> = vec![(i64::MAX - 5, 5), (i64::MIN, 1)];
        assert_eq!(pack(&items).unwrap().needed_tracks, 1);
    }

    #[test]
    fn test_first_fit_picks_lowest_free_track() {
        // Tracks 0 and 1 both free at 5; lowest index wins.
        let items: Vec<(i64, i64)> = vec![(0, 5), (0, 4), (5, 1)];
        let p = pack(&items).unwrap();
        assert_eq!(p.tracks[2], 0);
    }

    #[test]
    fn test_peak_overlap_matches_needed() {
        let items: Vec<(i64, i64)> = vec![(0, 10), (2, 3), (4, 4), (6, 1), (10, 2), (11, 1)];
        let p = pack(&items).unwrap();
        assert_eq!(peak_overlap(&items), 3);
        assert_eq!(p.needed_tracks, 3);
    }

    #[test]
    fn test_peak_overlap_touching() {
        let touching: Vec<(i64, i64)> = vec![(0, 2), (2, 2)];
        let with_empty: Vec<(i64, i64)> = vec![(0, 2), (0, 0)];
        assert_eq!(peak_overlap(&touching), 1);
        assert_eq!(peak_overlap(&with_empty), 1);
    }

    #[test]
    fn test_error_message() {
        let err = PackError::InvalidSpan { index: 4, span: -2 };
        assert_eq!(
            err.to_string(),
            "Invalid span -2 for interval #4: span must be positive"
        );
    }
}
