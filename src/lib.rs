//! Timetable aggregation and layout for the U-Engine ecosystem.
//!
//! Turns normalized, fragment-level timetable records into a renderable
//! weekly grid: one set of time-positioned events per day, each on the
//! lowest vertical track that keeps it clear of overlapping events.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeSlot`, `Lesson`, `ScheduleFragment`,
//!   `Day`, `Reference`, `Event`, `DayLayout`, `TimetableLayout`
//! - **`coordinates`**: Slot ordering and the period/minutes axis
//! - **`merge`**: Merging fragments into events
//! - **`packing`**: Minimal-track interval packing
//! - **`engine`**: `LayoutEngine`, the entry point composing the above
//! - **`stats`**: Layout metrics (tracks, concurrency, fill)
//! - **`validation`**: Input integrity checks (duplicate IDs, dangling refs)
//! - **`error`**: Packer error type
//!
//! # Architecture
//!
//! A pure, synchronous transformation: no I/O, no shared state, no
//! memoization. Safe to call from any number of threads at once; each
//! call only reads its request and allocates its own output.
//!
//! # References
//!
//! - Golumbic (2004), "Algorithmic Graph Theory and Perfect Graphs", Ch. 8
//! - Kleinberg & Tardos (2005), "Algorithm Design", Ch. 4.1 (Interval Partitioning)

pub mod coordinates;
pub mod engine;
pub mod error;
pub mod merge;
pub mod models;
pub mod packing;
pub mod stats;
pub mod validation;

pub use engine::{layout, LayoutConfig, LayoutEngine, LayoutRequest};
pub use error::PackError;
