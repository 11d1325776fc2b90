//! Error types.

/// Result type for interval packing.
pub type PackResult<T> = Result<T, PackError>;

/// Errors raised by the interval packer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackError {
    /// An interval has zero or negative length.
    #[error("Invalid span {span} for interval #{index}: span must be positive")]
    InvalidSpan {
        /// Position of the offending interval in the input.
        index: usize,
        /// The rejected span.
        span: i64,
    },

    /// An interval's end does not fit on the `i64` axis.
    #[error("Interval #{index} starting at {start} with span {span} ends beyond the axis")]
    OutOfRange {
        /// Position of the offending interval in the input.
        index: usize,
        /// The interval's start.
        start: i64,
        /// The interval's span.
        span: i64,
    },
}
