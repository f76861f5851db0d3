use thiserror::Error;

use crate::geom::Point;

/// The ways in which a detection run can be rejected.
///
/// All of these are checked up front, before any segments are computed.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    #[error("point entry {index} is missing")]
    MissingPoint { index: usize },

    #[error("point {point} appears more than once")]
    DuplicatePoint { point: Point },

    #[error("segment starts and ends at {point}")]
    DegenerateSegment { point: Point },

    #[error("invalid slope tolerance {tolerance}")]
    InvalidTolerance { tolerance: f64 },
}

/// Checks that there are no repeated points, without reordering `points`.
pub(crate) fn check_distinct(points: &[Point]) -> Result<(), Error> {
    let mut sorted = points.to_vec();
    sorted.sort_unstable();
    match sorted.windows(2).find(|pair| pair[0] == pair[1]) {
        Some(pair) => Err(Error::DuplicatePoint { point: pair[0] }),
        None => Ok(()),
    }
}

/// Unwraps a list of possibly-missing points, reporting the first hole.
pub(crate) fn collect_entries(entries: &[Option<Point>]) -> Result<Vec<Point>, Error> {
    entries
        .iter()
        .enumerate()
        .map(|(index, p)| p.ok_or(Error::MissingPoint { index }))
        .collect()
}
