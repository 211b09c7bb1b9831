//! Sample-grid classification.
//!
//! [`ContourGrid`] turns a flat row-major sample slice into a grid of
//! classified marching-squares cells. Each cell packs its four corners into a
//! 4-bit case index (bit set when the corner is below the level) and keeps the
//! corner values for endpoint interpolation later. A positive complexity
//! refines the cell grid by powers of two using bilinear interpolation.

use std::collections::HashMap;
use std::time::Instant;

use tracing::debug;

use crate::assembler::PathAssembler;
use crate::error::Error;
use crate::lattice::SUBUNITS;
use crate::path::{map_lattice, resolve_winding, Path, Point};

/// Largest accepted complexity; past this the up-sampled cell count is no
/// longer allocatable.
const MAX_COMPLEXITY: i32 = 12;

/// One classified 2x2 cell.
///
/// `corners` holds the sample values in top-left, top-right, bottom-right,
/// bottom-left order.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cell {
    pub case: u8,
    pub center_above: bool,
    pub corners: [f64; 4],
}

/// A grid of classified cells for one contour level.
///
/// The grid borrows nothing: classification copies the per-cell corner values
/// it needs, so the caller keeps ownership of the sample slice. `width` and
/// `height` are cell counts, one less than the sample dimensions (scaled by
/// `2^complexity` when up-sampling).
#[derive(Debug)]
pub struct ContourGrid {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
    level: f64,
}

impl ContourGrid {
    /// Classifies `samples` (row-major, `width * height` values) against
    /// `level`.
    ///
    /// A `complexity` of zero classifies the native grid; each additional step
    /// doubles the cell grid in both directions, with corner values taken from
    /// the bilinear interpolant of the enclosing coarse cell.
    pub fn new(
        samples: &[f64],
        width: usize,
        height: usize,
        level: f64,
        complexity: i32,
    ) -> Result<Self, Error> {
        if width < 3 || height < 3 {
            return Err(Error::InvalidDimensions { width, height });
        }
        if samples.len() != width * height {
            return Err(Error::ValueCountMismatch {
                width,
                height,
                expected: width * height,
                actual: samples.len(),
            });
        }
        if !(0..=MAX_COMPLEXITY).contains(&complexity) {
            return Err(Error::InvalidComplexity(complexity));
        }

        let started = Instant::now();
        let step = complexity as u32;
        let gwidth = (width - 1) << step;
        let gheight = (height - 1) << step;

        let mut cells = Vec::with_capacity(gwidth * gheight);
        for y in 0..gheight {
            for x in 0..gwidth {
                let corners = if step == 0 {
                    [
                        samples[y * width + x],
                        samples[y * width + x + 1],
                        samples[(y + 1) * width + x + 1],
                        samples[(y + 1) * width + x],
                    ]
                } else {
                    // Corner values of the fine cell, read off the bilinear
                    // interpolant of the enclosing coarse cell. The fractions
                    // are exact dyadics, so adjacent fine cells reproduce the
                    // same corner bit-for-bit.
                    let n = 1usize << step;
                    let (cx, cy) = (x >> step, y >> step);
                    let v00 = samples[cy * width + cx];
                    let v01 = samples[cy * width + cx + 1];
                    let v11 = samples[(cy + 1) * width + cx + 1];
                    let v10 = samples[(cy + 1) * width + cx];
                    let u0 = (x & (n - 1)) as f64 / n as f64;
                    let v0 = (y & (n - 1)) as f64 / n as f64;
                    let u1 = u0 + 1.0 / n as f64;
                    let v1 = v0 + 1.0 / n as f64;
                    [
                        bilinear(v00, v01, v11, v10, u0, v0),
                        bilinear(v00, v01, v11, v10, u1, v0),
                        bilinear(v00, v01, v11, v10, u1, v1),
                        bilinear(v00, v01, v11, v10, u0, v1),
                    ]
                };

                let mut case = 0u8;
                if corners[0] < level {
                    case |= 0x8;
                }
                if corners[1] < level {
                    case |= 0x4;
                }
                if corners[2] < level {
                    case |= 0x2;
                }
                if corners[3] < level {
                    case |= 0x1;
                }
                // The mean of the corners stands in for the bilinear center
                // and disambiguates saddle cases 5 and 10.
                let center_above =
                    (corners[0] + corners[1] + corners[2] + corners[3]) / 4.0 >= level;

                cells.push(Cell {
                    case,
                    center_above,
                    corners,
                });
            }
        }

        debug!(
            cells = cells.len(),
            gwidth,
            gheight,
            complexity,
            elapsed_us = started.elapsed().as_micros() as u64,
            "classified sample grid"
        );

        Ok(Self {
            cells,
            width: gwidth,
            height: gheight,
            level,
        })
    }

    /// Cell columns (one less than the sample width, scaled by complexity).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Cell rows (one less than the sample height, scaled by complexity).
    pub fn height(&self) -> usize {
        self.height
    }

    /// The contour level the grid was classified against.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// The 4-bit case of the cell at `(x, y)`.
    pub fn case_at(&self, x: usize, y: usize) -> u8 {
        self.cells[y * self.width + x].case
    }

    pub(crate) fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[y * self.width + x]
    }

    /// Extracts the closed contour paths, scaled onto the output rectangle
    /// `(0..width, 0..height)`.
    ///
    /// Clockwise paths enclose regions above the level; counter-clockwise
    /// paths are holes.
    pub fn paths(&self, width: f64, height: f64) -> Result<Vec<Path>, Error> {
        self.extract(width, height, None)
    }

    /// Like [`ContourGrid::paths`], additionally returning the witness point
    /// that resolved each path's winding, keyed by path index. Paths built
    /// purely from boundary closure carry no witness and have no entry.
    pub fn paths_with_witnesses(
        &self,
        width: f64,
        height: f64,
    ) -> Result<(Vec<Path>, HashMap<usize, Point>), Error> {
        let mut witnesses = HashMap::new();
        let paths = self.extract(width, height, Some(&mut witnesses))?;
        Ok((paths, witnesses))
    }

    fn extract(
        &self,
        width: f64,
        height: f64,
        mut witnesses: Option<&mut HashMap<usize, Point>>,
    ) -> Result<Vec<Path>, Error> {
        let started = Instant::now();
        let mut assembler = PathAssembler::new();
        assembler.add_grid(self)?;

        if assembler.contour_cells() == 0 {
            // The level never crosses the grid: either everything is above
            // (one clockwise rectangle) or everything is below (nothing).
            if assembler.has_above() {
                return Ok(vec![vec![
                    Point::new(0.0, 0.0),
                    Point::new(width, 0.0),
                    Point::new(width, height),
                    Point::new(0.0, height),
                    Point::new(0.0, 0.0),
                ]]);
            }
            return Ok(Vec::new());
        }

        let lat_w = (self.width as i64 * SUBUNITS) as f64;
        let lat_h = (self.height as i64 * SUBUNITS) as f64;

        let mut paths = Vec::new();
        for line in assembler.assemble() {
            let mut path: Path = line
                .points
                .iter()
                .map(|&p| map_lattice(p, lat_w, lat_h, width, height))
                .collect();
            if let Some(w) = line.witness {
                let w = map_lattice(w, lat_w, lat_h, width, height);
                resolve_winding(&mut path, w);
                if let Some(map) = witnesses.as_deref_mut() {
                    map.insert(paths.len(), w);
                }
            }
            paths.push(path);
        }

        debug!(
            paths = paths.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "extracted contour paths"
        );
        Ok(paths)
    }
}

/// Bilinear interpolation between four corner values at `(u, v)` in `[0,1]²`.
///
/// Corners are named after their position: `v00` top-left, `v01` top-right,
/// `v11` bottom-right, `v10` bottom-left.
pub fn bilinear(v00: f64, v01: f64, v11: f64, v10: f64, u: f64, v: f64) -> f64 {
    v10 * (1.0 - u) * v + v11 * u * v + v00 * (1.0 - u) * (1.0 - v) + v01 * u * (1.0 - v)
}
