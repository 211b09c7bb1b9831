//! Segment gathering and stitching.
//!
//! [`PathAssembler`] collects the contour segments of every cell, adds the
//! boundary-closure segments for cells on the grid edge, and then repeatedly
//! joins polylines whose endpoints coincide on the lattice until every
//! surviving polyline is a closed loop.

use std::time::Instant;

use tracing::debug;

use crate::error::Error;
use crate::grid::ContourGrid;
use crate::lattice::{LatticePoint, SUBUNITS};
use crate::segment::{
    bottom_anchor, left_anchor, right_anchor, segments_for_cell, top_anchor,
};

/// A chain of lattice points under construction.
///
/// Absorbed polylines are flagged deleted rather than removed so indices stay
/// stable within a stitching pass.
#[derive(Debug, Clone)]
pub(crate) struct Polyline {
    pub points: Vec<LatticePoint>,
    pub witness: Option<LatticePoint>,
    pub deleted: bool,
}

impl Polyline {
    fn first(&self) -> LatticePoint {
        self.points[0]
    }

    fn last(&self) -> LatticePoint {
        self.points[self.points.len() - 1]
    }
}

pub(crate) struct PathAssembler {
    lines: Vec<Polyline>,
    contour_cells: usize,
    has_above: bool,
}

impl PathAssembler {
    pub(crate) fn new() -> Self {
        Self {
            lines: Vec::new(),
            contour_cells: 0,
            has_above: false,
        }
    }

    /// Number of cells that produced contour segments (case 1..14).
    pub(crate) fn contour_cells(&self) -> usize {
        self.contour_cells
    }

    /// Whether any cell was entirely above the level.
    pub(crate) fn has_above(&self) -> bool {
        self.has_above
    }

    pub(crate) fn add_grid(&mut self, grid: &ContourGrid) -> Result<(), Error> {
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                self.add_cell(grid, x, y)?;
            }
        }
        debug!(
            segments = self.lines.len(),
            contour_cells = self.contour_cells,
            "gathered cell segments"
        );
        Ok(())
    }

    fn add_cell(&mut self, grid: &ContourGrid, x: usize, y: usize) -> Result<(), Error> {
        let cell = grid.cell(x, y);
        let level = grid.level();

        match cell.case {
            0 => self.has_above = true,
            15 => {}
            _ => {
                self.contour_cells += 1;
                for seg in segments_for_cell(cell, level, x, y)? {
                    self.lines.push(Polyline {
                        points: vec![seg.a, seg.b],
                        witness: seg.witness,
                        deleted: false,
                    });
                }
            }
        }

        // Boundary closure. Each above corner on the grid edge owns the piece
        // of boundary around it, spanning anchor to anchor; anchors on
        // straddling sides coincide with the contour crossing there, so the
        // chain meets the interior contour bit-exactly. Corner cells turn
        // through the grid corner with two orthogonal segments.
        let gw = grid.width();
        let gh = grid.height();
        let s = SUBUNITS;

        if y == 0 && cell.case & 0x8 == 0 {
            // Top-left corner above: walk the top boundary left to right.
            let bx = top_anchor(cell, level, x);
            if x == 0 {
                let ay = left_anchor(cell, level, 0);
                self.add_boundary(LatticePoint::new(0, ay), LatticePoint::new(0, 0));
                self.add_boundary(LatticePoint::new(0, 0), LatticePoint::new(bx, 0));
            } else {
                let ax = top_anchor(grid.cell(x - 1, 0), level, x - 1);
                self.add_boundary(LatticePoint::new(ax, 0), LatticePoint::new(bx, 0));
            }
        } else if y == gh - 1 && cell.case & 0x2 == 0 {
            // Bottom-right corner above: walk the bottom boundary right to
            // left.
            let by = gh as i64 * s;
            let bx = bottom_anchor(cell, level, x);
            if x == gw - 1 {
                let ay = right_anchor(cell, level, y);
                let rx = gw as i64 * s;
                self.add_boundary(LatticePoint::new(rx, ay), LatticePoint::new(rx, by));
                self.add_boundary(LatticePoint::new(rx, by), LatticePoint::new(bx, by));
            } else {
                let ax = bottom_anchor(grid.cell(x + 1, y), level, x + 1);
                self.add_boundary(LatticePoint::new(ax, by), LatticePoint::new(bx, by));
            }
        }

        if x == 0 && cell.case & 0x1 == 0 {
            // Bottom-left corner above: walk the left boundary bottom to top.
            let by = left_anchor(cell, level, y);
            if y == gh - 1 {
                let ax = bottom_anchor(cell, level, 0);
                let bys = gh as i64 * s;
                self.add_boundary(LatticePoint::new(ax, bys), LatticePoint::new(0, bys));
                self.add_boundary(LatticePoint::new(0, bys), LatticePoint::new(0, by));
            } else {
                let ay = left_anchor(grid.cell(0, y + 1), level, y + 1);
                self.add_boundary(LatticePoint::new(0, ay), LatticePoint::new(0, by));
            }
        } else if x == gw - 1 && cell.case & 0x4 == 0 {
            // Top-right corner above: walk the right boundary top to bottom.
            let rx = gw as i64 * s;
            let by = right_anchor(cell, level, y);
            if y == 0 {
                let ax = top_anchor(cell, level, x);
                self.add_boundary(LatticePoint::new(ax, 0), LatticePoint::new(rx, 0));
                self.add_boundary(LatticePoint::new(rx, 0), LatticePoint::new(rx, by));
            } else {
                let ay = right_anchor(grid.cell(x, y - 1), level, y - 1);
                self.add_boundary(LatticePoint::new(rx, ay), LatticePoint::new(rx, by));
            }
        }

        Ok(())
    }

    fn add_boundary(&mut self, a: LatticePoint, b: LatticePoint) {
        if a != b {
            self.lines.push(Polyline {
                points: vec![a, b],
                witness: None,
                deleted: false,
            });
        }
    }

    /// Stitches all gathered segments and returns the surviving closed
    /// polylines.
    pub(crate) fn assemble(mut self) -> Vec<Polyline> {
        let started = Instant::now();
        self.sort_lines();
        self.reduce();
        self.finalize();
        let kept: Vec<Polyline> = self.lines.into_iter().filter(|l| !l.deleted).collect();
        debug!(
            paths = kept.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "stitched polylines"
        );
        kept
    }

    /// Orders segments by endpoint position. Joining is order-independent;
    /// sorting only keeps neighboring segments near each other so passes
    /// connect early.
    fn sort_lines(&mut self) {
        self.lines.sort_by_key(|l| {
            let first = l.first();
            let last = l.last();
            (last.y, last.x, first.y, first.x)
        });
    }

    fn reduce(&mut self) {
        loop {
            let mut connected = false;
            for i in 0..self.lines.len() {
                if self.lines[i].deleted {
                    continue;
                }
                let mut j = 0;
                while j < self.lines.len() {
                    if j == i || self.lines[j].deleted {
                        j += 1;
                        continue;
                    }
                    if self.lines[i].deleted {
                        break;
                    }
                    let (i_first, i_last) = (self.lines[i].first(), self.lines[i].last());
                    let (j_first, j_last) = (self.lines[j].first(), self.lines[j].last());
                    if j_first == i_last {
                        self.join(i, j);
                        connected = true;
                    } else if j_last == i_first {
                        self.join(j, i);
                        connected = true;
                        break;
                    } else if j_last == i_last || j_first == i_first {
                        // Flip so a head-tail rule applies on the next look.
                        self.lines[j].points.reverse();
                        connected = true;
                        continue;
                    }
                    j += 1;
                }
            }
            if !connected {
                break;
            }
        }
    }

    /// Appends line `j` onto line `i` and marks `j` deleted. The absorber
    /// adopts the witness when it has none of its own.
    fn join(&mut self, i: usize, j: usize) {
        let absorbed = std::mem::take(&mut self.lines[j].points);
        if self.lines[i].witness.is_none() {
            self.lines[i].witness = self.lines[j].witness;
        }
        self.lines[i].points.extend_from_slice(&absorbed[1..]);
        self.lines[j].deleted = true;
    }

    /// Forces closure on every surviving polyline and drops the ones too
    /// short to enclose anything.
    fn finalize(&mut self) {
        for line in &mut self.lines {
            if line.deleted {
                continue;
            }
            if line.first() != line.last() {
                let first = line.points[0];
                line.points.push(first);
            }
            if line.points.len() < 3 {
                line.deleted = true;
            }
        }
    }
}
