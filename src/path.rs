//! Output paths and winding utilities.
//!
//! A [`Path`] is a closed sequence of real-valued points in the caller's
//! output rectangle. Winding follows screen conventions (y grows downward):
//! clockwise paths enclose regions above the contour level, counter-clockwise
//! paths are holes.

use crate::lattice::LatticePoint;

/// A point in the caller's output coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A closed polygonal path; the first and last points are equal.
pub type Path = Vec<Point>;

/// Returns true if the path winds clockwise in screen coordinates.
///
/// Uses the signed shoelace area; the duplicated closing point contributes
/// nothing, so open and closed representations agree.
pub fn is_clockwise(path: &[Point]) -> bool {
    let mut signed_area = 0.0;
    for i in 0..path.len() {
        let j = if i == path.len() - 1 { 0 } else { i + 1 };
        signed_area += path[i].x * path[j].y - path[j].x * path[i].y;
    }
    signed_area / 2.0 > 0.0
}

/// Reverses the winding of a path in place.
pub fn reverse_winding(path: &mut [Point]) {
    path.reverse();
}

/// Even-odd ray-casting containment test.
///
/// Casts a horizontal ray from `point` toward -x and toggles on every edge
/// crossing. Points on an edge may land on either side.
pub fn point_in_polygon(path: &[Point], point: Point) -> bool {
    if path.is_empty() {
        return false;
    }
    let mut inside = false;
    let mut j = path.len() - 1;
    for i in 0..path.len() {
        let (pi, pj) = (path[i], path[j]);
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Scales a lattice point onto the caller's output rectangle.
pub(crate) fn map_lattice(
    p: LatticePoint,
    lat_w: f64,
    lat_h: f64,
    width: f64,
    height: f64,
) -> Point {
    Point::new(
        p.x as f64 * width / lat_w,
        p.y as f64 * height / lat_h,
    )
}

/// Flips the path when its winding disagrees with the witness: a clockwise
/// path must contain its known-above witness, a counter-clockwise path must
/// not.
pub(crate) fn resolve_winding(path: &mut [Point], witness: Point) {
    if point_in_polygon(path, witness) != is_clockwise(path) {
        reverse_winding(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_cw() -> Path {
        vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
            Point::new(0.0, 0.0),
        ]
    }

    #[test]
    fn test_is_clockwise_screen_coordinates() {
        // In y-down coordinates, visiting top edge left-to-right first is
        // clockwise.
        let path = square_cw();
        assert!(is_clockwise(&path));

        let mut reversed = path.clone();
        reverse_winding(&mut reversed);
        assert!(!is_clockwise(&reversed));
    }

    #[test]
    fn test_is_clockwise_without_closing_point() {
        let mut path = square_cw();
        path.pop();
        assert!(is_clockwise(&path));
    }

    #[test]
    fn test_point_in_polygon() {
        let path = square_cw();
        assert!(point_in_polygon(&path, Point::new(2.0, 2.0)));
        assert!(point_in_polygon(&path, Point::new(3.9, 0.1)));
        assert!(!point_in_polygon(&path, Point::new(5.0, 2.0)));
        assert!(!point_in_polygon(&path, Point::new(-1.0, 2.0)));
        assert!(!point_in_polygon(&path, Point::new(2.0, 4.5)));
    }

    #[test]
    fn test_point_in_polygon_concave() {
        // L-shaped region; the notch is outside.
        let path = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 2.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, 4.0),
            Point::new(0.0, 4.0),
            Point::new(0.0, 0.0),
        ];
        assert!(point_in_polygon(&path, Point::new(1.0, 3.0)));
        assert!(point_in_polygon(&path, Point::new(3.0, 1.0)));
        assert!(!point_in_polygon(&path, Point::new(3.0, 3.0)));
    }

    #[test]
    fn test_resolve_winding_flips_only_on_disagreement() {
        let inside = Point::new(2.0, 2.0);

        let mut path = square_cw();
        resolve_winding(&mut path, inside);
        assert!(is_clockwise(&path));

        // A counter-clockwise path containing the witness gets flipped.
        reverse_winding(&mut path);
        resolve_winding(&mut path, inside);
        assert!(is_clockwise(&path));

        // A witness outside a counter-clockwise path is already consistent.
        let mut hole = square_cw();
        reverse_winding(&mut hole);
        resolve_winding(&mut hole, Point::new(10.0, 10.0));
        assert!(!is_clockwise(&hole));
    }

    #[test]
    fn test_map_lattice_scaling() {
        let p = map_lattice(LatticePoint::new(32, 16), 64.0, 64.0, 4.0, 8.0);
        assert_eq!(p, Point::new(2.0, 2.0));
    }
}
