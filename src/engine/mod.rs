//! Layout engine: the crate's entry point.
//!
//! Composes coordinate normalization, event merging and interval packing
//! into one pure transformation:
//!
//! ```text
//! slots ──► Coordinates ─┐
//! fragments ─► by day ───┼─► EventMerger ─► packing ─► DayLayout per day
//! lessons, references ───┘
//! ```
//!
//! # Failure model
//! Layout never fails. Bad records are dropped and reported as
//! [`Diagnostic`](crate::models::Diagnostic)s; an event with a non-positive
//! span is excluded from its day without affecting the rest.

mod layout;
mod request;

pub use layout::{layout, LayoutEngine};
pub use request::{LayoutConfig, LayoutRequest};
