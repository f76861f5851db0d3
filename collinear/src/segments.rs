use serde::{Deserialize, Serialize};

use crate::geom::{Point, Segment};

/// A sorted collection of distinct segments.
///
/// This is what the detectors return: every line with at least four input points on it
/// shows up exactly once, as the segment between its two extreme points.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Segment>", into = "Vec<Segment>")]
pub struct Segments {
    segs: Vec<Segment>,
}

impl Segments {
    /// Sorts the candidates and throws away repeats.
    ///
    /// A line with `k` points on it gets found once from each of them, so we expect a lot
    /// of repeats.
    pub(crate) fn from_candidates(mut candidates: Vec<Segment>) -> Self {
        candidates.sort_unstable();
        candidates.dedup();
        Segments { segs: candidates }
    }

    /// The number of segments.
    pub fn len(&self) -> usize {
        self.segs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segs.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Segment> {
        self.segs.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segs.iter()
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.segs
    }

    pub fn contains(&self, seg: &Segment) -> bool {
        self.segs.binary_search(seg).is_ok()
    }

    /// All the segments that `p` lies on.
    pub fn through<'a>(&'a self, p: &'a Point) -> impl Iterator<Item = &'a Segment> + 'a {
        self.segs.iter().filter(move |s| s.contains(p))
    }

    pub fn into_vec(self) -> Vec<Segment> {
        self.segs
    }
}

impl From<Vec<Segment>> for Segments {
    fn from(segs: Vec<Segment>) -> Self {
        Segments::from_candidates(segs)
    }
}

impl From<Segments> for Vec<Segment> {
    fn from(segs: Segments) -> Self {
        segs.segs
    }
}

impl FromIterator<Segment> for Segments {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Self {
        Segments::from_candidates(iter.into_iter().collect())
    }
}

impl IntoIterator for Segments {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segs.into_iter()
    }
}

impl<'a> IntoIterator for &'a Segments {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segs.iter()
    }
}
