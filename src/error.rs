use thiserror::Error;

/// Errors surfaced by contour extraction.
///
/// `InvalidDimensions`, `ValueCountMismatch` and `InvalidComplexity` are
/// precondition violations and are returned before any work is done.
/// `InvalidCase` is an internal invariant violation: the classifier can only
/// produce case values in `0..=15`, so seeing anything else indicates a bug
/// and aborts the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The sample grid must be at least 3x3 for a cell grid to exist on every
    /// side of an interior sample.
    #[error("grid must be at least 3x3 samples, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// The flat sample slice does not match the declared grid dimensions.
    #[error("expected {expected} samples for a {width}x{height} grid, got {actual}")]
    ValueCountMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// Complexity must be non-negative and small enough that the up-sampled
    /// cell grid stays allocatable.
    #[error("complexity must be in 0..=12, got {0}")]
    InvalidComplexity(i32),

    /// A cell carried a case value outside `0..=15`.
    #[error("cell case {0} is outside 0..=15")]
    InvalidCase(u8),
}
