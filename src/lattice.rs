//! Integer sub-cell lattice.
//!
//! Every segment endpoint and witness is expressed on a lattice of 16
//! sub-units per cell edge. Adjacent cells derive a shared crossing from the
//! same two samples in the same order, so matching endpoints compare bit-exact
//! and the stitcher never needs an epsilon.

/// Lattice sub-units per cell edge. Side midpoints and witness insets must
/// stay addressable, so this must be divisible by 8.
pub(crate) const SUBUNITS: i64 = 16;

/// Offset that places a witness strictly inside its above region.
pub(crate) const INSET: i64 = SUBUNITS / 8;

/// A position on the sub-cell lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LatticePoint {
    pub x: i64,
    pub y: i64,
}

impl LatticePoint {
    pub(crate) fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Lattice offset along a cell edge where the field crosses `level`.
///
/// `a` and `b` are the edge's corner samples in lattice order (+x or +y).
/// Coincident corners take the midpoint; fractions outside the edge clamp to
/// its ends, which happens when one corner sits exactly on the level.
pub(crate) fn crossing(level: f64, a: f64, b: f64) -> i64 {
    let t = if a == b { 0.5 } else { (level - a) / (b - a) };
    (t.clamp(0.0, 1.0) * SUBUNITS as f64).round() as i64
}
