use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{error::Error, num::Float};

// Points are sorted by `y` and then by `x`
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub y: i32,
    pub x: i32,
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// The slope of the line from `self` to `other`, as a plain `f64`.
    ///
    /// Formally, if the two points are `(x0, y0)` and `(x1, y1)` then the slope is
    /// `(y1 - y0) / (x1 - x0)`. Horizontal lines have slope `+0.0`, vertical lines have
    /// slope `+∞`, and the slope from a point to itself is `-∞`.
    pub fn slope_to(&self, other: &Point) -> f64 {
        if self == other {
            f64::NEG_INFINITY
        } else if self.y == other.y {
            0.0
        } else if self.x == other.x {
            f64::INFINITY
        } else {
            (f64::from(other.y) - f64::from(self.y)) / (f64::from(other.x) - f64::from(self.x))
        }
    }

    /// The slope of the line from `self` to `other`, with the same conventions as
    /// [`Point::slope_to`] but represented in `F`.
    pub fn slope<F: Float>(&self, other: &Point) -> Slope<F> {
        if self == other {
            Slope::Coincident
        } else if self.y == other.y {
            Slope::Finite(F::zero())
        } else if self.x == other.x {
            Slope::Vertical
        } else {
            // The differences of two i32s always fit in an i64.
            let dy = i64::from(other.y) - i64::from(self.y);
            let dx = i64::from(other.x) - i64::from(self.x);
            Slope::Finite(F::from_ratio(dy, dx))
        }
    }

    /// The slope between `self` and `other`, always measured from the smaller of the two.
    ///
    /// Unlike [`Point::slope`], this is symmetric in its arguments.
    pub fn normalized_slope<F: Float>(&self, other: &Point) -> Slope<F> {
        if self <= other {
            self.slope(other)
        } else {
            other.slope(self)
        }
    }

    /// An ordering of other points by the slope they make with `self`.
    ///
    /// Slopes closer than `eps` are considered equal by [`SlopeOrder::same_slope`].
    pub fn slope_order<F: Float>(&self, eps: F) -> SlopeOrder<F> {
        SlopeOrder { origin: *self, eps }
    }

    /// The twice-signed area of the triangle `self`, `b`, `c`. It's zero exactly when the
    /// three points are collinear.
    pub fn cross(&self, b: &Point, c: &Point) -> i128 {
        let (x0, y0) = (i128::from(self.x), i128::from(self.y));
        let (bx, by) = (i128::from(b.x) - x0, i128::from(b.y) - y0);
        let (cx, cy) = (i128::from(c.x) - x0, i128::from(c.y) - y0);
        bx * cy - by * cx
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A slope, together with the two degenerate values.
///
/// The derived order is the one we sort by: `Coincident` (the slope from a point to
/// itself, which behaves like `-∞`) comes first, then all finite slopes in increasing
/// order, and finally `Vertical` (`+∞`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slope<F: Float> {
    Coincident,
    Finite(F),
    Vertical,
}

impl<F: Float> Slope<F> {
    /// Are these two slopes the same, up to `eps`?
    ///
    /// The two degenerate slopes are only ever equal to themselves.
    pub fn approx_eq(&self, other: &Self, eps: &F) -> bool {
        match (self, other) {
            (Slope::Coincident, Slope::Coincident) | (Slope::Vertical, Slope::Vertical) => true,
            (Slope::Finite(a), Slope::Finite(b)) => a.approx_eq(b, eps),
            _ => false,
        }
    }
}

/// Compares points by the slope they make with a fixed origin.
///
/// The comparison itself ([`SlopeOrder::cmp`]) is a total order, so it's safe to sort with.
/// The tolerance only enters in [`SlopeOrder::same_slope`], which is what decides whether
/// two neighbors in the sorted order lie on the same line through the origin.
#[derive(Clone, Debug)]
pub struct SlopeOrder<F: Float> {
    origin: Point,
    eps: F,
}

impl<F: Float> SlopeOrder<F> {
    pub fn origin(&self) -> &Point {
        &self.origin
    }

    pub fn eps(&self) -> &F {
        &self.eps
    }

    pub fn key(&self, p: &Point) -> Slope<F> {
        self.origin.slope(p)
    }

    pub fn cmp(&self, p: &Point, q: &Point) -> Ordering {
        self.key(p).cmp(&self.key(q))
    }

    pub fn same_slope(&self, p: &Point, q: &Point) -> bool {
        self.key(p).approx_eq(&self.key(q), &self.eps)
    }
}

// The start point of a segment is always strictly less than its end point.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSegment")]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

// What we accept when deserializing: the endpoints in either order.
#[derive(Deserialize)]
struct RawSegment {
    start: Point,
    end: Point,
}

impl TryFrom<RawSegment> for Segment {
    type Error = Error;

    fn try_from(raw: RawSegment) -> Result<Self, Error> {
        if raw.start == raw.end {
            return Err(Error::DegenerateSegment { point: raw.start });
        }
        Ok(Segment::new(raw.start, raw.end))
    }
}

impl std::fmt::Debug for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -> {:?}", self.start, self.end)
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

impl Segment {
    /// The segment between two points, in either order.
    ///
    /// # Panics
    /// Panics if the points are equal.
    pub fn new(a: Point, b: Point) -> Self {
        assert!(a != b, "a segment needs two distinct endpoints");
        if a < b {
            Segment { start: a, end: b }
        } else {
            Segment { start: b, end: a }
        }
    }

    /// The segment between the smallest and largest of some points.
    ///
    /// Returns `None` if there are fewer than two distinct points.
    pub fn spanning(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (start, end) = points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        (start != end).then_some(Segment { start, end })
    }

    /// Is `p` on this segment (including the endpoints)?
    pub fn contains(&self, p: &Point) -> bool {
        // Along any line, our point order is monotonic. So once we know that `p` is on
        // the line, comparing with the endpoints is enough.
        self.start.cross(&self.end, p) == 0 && (&self.start..=&self.end).contains(&p)
    }

    /// Are `self` and `other` on the same line?
    pub fn is_collinear_with(&self, other: &Segment) -> bool {
        self.start.cross(&self.end, &other.start) == 0
            && self.start.cross(&self.end, &other.end) == 0
    }

    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y
    }

    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }
}
