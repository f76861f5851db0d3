//! The `O(n⁴)` detector, for checking the fast one.
//!
//! This looks at every set of four points. Whenever all four are collinear, the segment
//! between the extreme two is merged into whatever we've already found on the same line.

use robust::{orient2d, Coord};

use crate::{
    error::{check_distinct, Error},
    geom::{Point, Segment},
    segments::Segments,
};

fn coord(p: &Point) -> Coord<f64> {
    Coord {
        x: f64::from(p.x),
        y: f64::from(p.y),
    }
}

// The coordinates are all exactly representable as `f64`s, and `orient2d` is exact for
// exact inputs.
fn collinear(p: &Point, q: &Point, r: &Point) -> bool {
    orient2d(coord(p), coord(q), coord(r)) == 0.0
}

/// Finds all the maximal segments with at least four points on them, by brute force.
///
/// The result is the same as [`crate::detect`], just (much) slower.
pub fn detect(points: &[Point]) -> Result<Segments, Error> {
    check_distinct(points)?;

    // One entry per line, covering everything we've seen on that line so far.
    let mut lines: Vec<Segment> = Vec::new();
    let n = points.len();
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                let (p, q, r) = (&points[i], &points[j], &points[k]);
                if !collinear(p, q, r) {
                    continue;
                }
                for s in &points[(k + 1)..] {
                    if collinear(p, q, s) {
                        // unwrap: the points are distinct.
                        let seg = Segment::spanning([*p, *q, *r, *s]).unwrap();
                        merge(&mut lines, seg);
                    }
                }
            }
        }
    }

    Ok(lines.into_iter().collect())
}

fn merge(lines: &mut Vec<Segment>, seg: Segment) {
    match lines.iter_mut().find(|line| line.is_collinear_with(&seg)) {
        Some(line) => {
            line.start = line.start.min(seg.start);
            line.end = line.end.max(seg.end);
        }
        None => lines.push(seg),
    }
}
