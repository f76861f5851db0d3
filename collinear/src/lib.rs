//! Finding every line that passes through at least four points of a set.
//!
//! Given a set of distinct points with integer coordinates, [`detect`] returns one
//! [`Segment`] for every line containing four or more of them. Each segment runs between
//! the two extreme points on its line (in the `y`-then-`x` order of [`Point`]), so no
//! segment is ever reported together with a piece of itself.
//!
//! ```
//! use collinear::{detect, Point};
//!
//! let points = [(0, 0), (1, 1), (2, 2), (3, 3), (0, 10)].map(Point::from);
//! let segments = detect(&points).unwrap();
//! assert_eq!(segments.len(), 1);
//! assert_eq!(segments.as_slice()[0].to_string(), "(0, 0) -> (3, 3)");
//! ```
//!
//! By default slopes are compared exactly, using rational arithmetic. The floating-point
//! detector ([`detect_approx`]) divides in `f64` instead and treats slopes within a
//! configurable tolerance as equal.

mod error;
mod fast;
mod geom;
mod num;
mod segments;

pub mod brute;

pub use error::Error;
pub use fast::{detect, detect_approx, detect_entries, DetectorConfig, FastCollinear, MIN_POINTS};
pub use geom::{Point, Segment, Slope, SlopeOrder};
pub use num::Float;
pub use segments::Segments;
