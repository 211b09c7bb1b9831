//! Per-cell segment emission.
//!
//! The sixteen marching-squares cases map to zero, one or two oriented
//! segments whose endpoints are interpolated along the cell edges. Each
//! segment carries a witness point just inside the above region next to it;
//! the witness survives stitching and later decides the path's winding.

use crate::error::Error;
use crate::grid::Cell;
use crate::lattice::{crossing, LatticePoint, INSET, SUBUNITS};

// Corner order inside `Cell::corners`.
const TL: usize = 0;
const TR: usize = 1;
const BR: usize = 2;
const BL: usize = 3;

/// An oriented contour segment on the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segment {
    pub a: LatticePoint,
    pub b: LatticePoint,
    /// A point known to lie in the above region beside this segment. Boundary
    /// closure segments have none.
    pub witness: Option<LatticePoint>,
}

fn endpoint_top(cell: &Cell, level: f64, x: usize, y: usize) -> LatticePoint {
    LatticePoint::new(
        x as i64 * SUBUNITS + crossing(level, cell.corners[TL], cell.corners[TR]),
        y as i64 * SUBUNITS,
    )
}

fn endpoint_right(cell: &Cell, level: f64, x: usize, y: usize) -> LatticePoint {
    LatticePoint::new(
        (x as i64 + 1) * SUBUNITS,
        y as i64 * SUBUNITS + crossing(level, cell.corners[TR], cell.corners[BR]),
    )
}

fn endpoint_bottom(cell: &Cell, level: f64, x: usize, y: usize) -> LatticePoint {
    LatticePoint::new(
        x as i64 * SUBUNITS + crossing(level, cell.corners[BL], cell.corners[BR]),
        (y as i64 + 1) * SUBUNITS,
    )
}

fn endpoint_left(cell: &Cell, level: f64, x: usize, y: usize) -> LatticePoint {
    LatticePoint::new(
        x as i64 * SUBUNITS,
        y as i64 * SUBUNITS + crossing(level, cell.corners[TL], cell.corners[BL]),
    )
}

/// Emits the contour segments for the cell at `(x, y)`.
///
/// Cases 0 and 15 emit nothing. Saddle cases 5 and 10 choose their pairing by
/// `center_above`. A segment whose interpolated endpoints coincide (a corner
/// sample sitting exactly on the level) carries no geometry and is dropped;
/// neighboring cells still meet at the shared lattice point.
pub(crate) fn segments_for_cell(
    cell: &Cell,
    level: f64,
    x: usize,
    y: usize,
) -> Result<Vec<Segment>, Error> {
    let lx = x as i64 * SUBUNITS;
    let rx = lx + SUBUNITS;
    let ty = y as i64 * SUBUNITS;
    let by = ty + SUBUNITS;
    let mx = lx + SUBUNITS / 2;
    let my = ty + SUBUNITS / 2;

    let top = endpoint_top(cell, level, x, y);
    let right = endpoint_right(cell, level, x, y);
    let bottom = endpoint_bottom(cell, level, x, y);
    let left = endpoint_left(cell, level, x, y);

    let mut segs = Vec::with_capacity(2);
    let mut push = |a: LatticePoint, b: LatticePoint, wx: i64, wy: i64| {
        if a != b {
            segs.push(Segment {
                a,
                b,
                witness: Some(LatticePoint::new(wx, wy)),
            });
        }
    };

    match cell.case {
        0 | 15 => {}
        1 => push(bottom, left, rx - INSET, ty + INSET),
        2 => push(right, bottom, lx + INSET, ty + INSET),
        3 => push(right, left, mx, ty + INSET),
        4 => push(top, right, lx + INSET, by - INSET),
        5 => {
            // Saddle: above corners at top-left and bottom-right. A below
            // center keeps the two lobes apart; an above center joins them.
            if !cell.center_above {
                push(top, left, lx + INSET, ty + INSET);
                push(bottom, right, rx - INSET, by - INSET);
            } else {
                push(top, right, lx + INSET, ty + INSET);
                push(bottom, left, rx - INSET, by - INSET);
            }
        }
        6 => push(top, bottom, lx + INSET, my),
        7 => push(top, left, lx + INSET, ty + INSET),
        8 => push(left, top, rx - INSET, by - INSET),
        9 => push(bottom, top, rx - INSET, my),
        10 => {
            // Saddle: above corners at top-right and bottom-left.
            if !cell.center_above {
                push(right, top, rx - INSET, ty + INSET);
                push(left, bottom, lx + INSET, by - INSET);
            } else {
                push(top, left, rx - INSET, ty + INSET);
                push(bottom, right, lx + INSET, by - INSET);
            }
        }
        11 => push(right, top, rx - INSET, ty + INSET),
        12 => push(left, right, mx, by - INSET),
        13 => push(bottom, right, rx - INSET, by - INSET),
        14 => push(left, bottom, lx + INSET, by - INSET),
        other => return Err(Error::InvalidCase(other)),
    }

    Ok(segs)
}

fn straddles(level: f64, a: f64, b: f64) -> bool {
    (a < level) != (b < level)
}

/// Lattice x where edge closure attaches on the cell's top side: the contour
/// crossing when the side straddles the level, the midpoint otherwise.
pub(crate) fn top_anchor(cell: &Cell, level: f64, x: usize) -> i64 {
    if straddles(level, cell.corners[TL], cell.corners[TR]) {
        x as i64 * SUBUNITS + crossing(level, cell.corners[TL], cell.corners[TR])
    } else {
        x as i64 * SUBUNITS + SUBUNITS / 2
    }
}

/// Lattice x of the closure attachment on the bottom side.
pub(crate) fn bottom_anchor(cell: &Cell, level: f64, x: usize) -> i64 {
    if straddles(level, cell.corners[BL], cell.corners[BR]) {
        x as i64 * SUBUNITS + crossing(level, cell.corners[BL], cell.corners[BR])
    } else {
        x as i64 * SUBUNITS + SUBUNITS / 2
    }
}

/// Lattice y of the closure attachment on the left side.
pub(crate) fn left_anchor(cell: &Cell, level: f64, y: usize) -> i64 {
    if straddles(level, cell.corners[TL], cell.corners[BL]) {
        y as i64 * SUBUNITS + crossing(level, cell.corners[TL], cell.corners[BL])
    } else {
        y as i64 * SUBUNITS + SUBUNITS / 2
    }
}

/// Lattice y of the closure attachment on the right side.
pub(crate) fn right_anchor(cell: &Cell, level: f64, y: usize) -> i64 {
    if straddles(level, cell.corners[TR], cell.corners[BR]) {
        y as i64 * SUBUNITS + crossing(level, cell.corners[TR], cell.corners[BR])
    } else {
        y as i64 * SUBUNITS + SUBUNITS / 2
    }
}
