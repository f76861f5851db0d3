//! The `O(n² log n)` detector.
//!
//! For every origin point, we sort all the other points by the slope they make with the
//! origin. Points on a common line through the origin end up next to each other, so one
//! linear scan finds all of the origin's lines. A line with `k` points gets found once from
//! each of them; the duplicates are removed at the end.

use malachite::Rational;
use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::{
    error::{check_distinct, collect_entries, Error},
    geom::{Point, Segment, Slope},
    num::Float,
    segments::Segments,
};

/// The smallest number of points that we report as a segment.
pub const MIN_POINTS: usize = 4;

/// Settings for the floating-point detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Two slopes closer than this are treated as equal.
    pub tolerance: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig { tolerance: 1e-9 }
    }
}

/// Finds collinear points by sorting around each origin, comparing slopes in `F`.
#[derive(Clone, Debug)]
pub struct FastCollinear<F: Float> {
    eps: F,
}

impl FastCollinear<Rational> {
    /// A detector that compares slopes exactly.
    pub fn exact() -> Self {
        FastCollinear {
            eps: Rational::zero(),
        }
    }
}

impl<F: Float> FastCollinear<F> {
    /// A detector that treats slopes within `config.tolerance` of one another as equal.
    ///
    /// The tolerance must be finite and non-negative.
    pub fn new(config: &DetectorConfig) -> Result<Self, Error> {
        let invalid = Error::InvalidTolerance {
            tolerance: config.tolerance,
        };
        if config.tolerance < 0.0 {
            return Err(invalid);
        }
        let eps = F::from_f64(config.tolerance).ok_or(invalid)?;
        Ok(FastCollinear { eps })
    }

    pub fn eps(&self) -> &F {
        &self.eps
    }

    /// Finds all the maximal segments with at least four points on them.
    ///
    /// Fails if any point appears more than once. `points` is not modified, and its order
    /// has no effect on the result.
    pub fn detect(&self, points: &[Point]) -> Result<Segments, Error> {
        check_distinct(points)?;

        let candidates = self.candidates(points);
        let candidate_count = candidates.len();
        let segments = Segments::from_candidates(candidates);
        tracing::debug!(
            points = points.len(),
            candidates = candidate_count,
            segments = segments.len(),
            "detected collinear segments"
        );
        Ok(segments)
    }

    /// Like [`FastCollinear::detect`], but for input that might have holes in it.
    pub fn detect_entries(&self, entries: &[Option<Point>]) -> Result<Segments, Error> {
        let points = collect_entries(entries)?;
        self.detect(&points)
    }

    #[cfg(not(feature = "rayon"))]
    fn candidates(&self, points: &[Point]) -> Vec<Segment> {
        points
            .iter()
            .flat_map(|origin| self.scan_origin(origin, points))
            .collect()
    }

    // Each origin only reads the (shared, immutable) points and writes to its own
    // candidate list, so the origins can be scanned independently.
    #[cfg(feature = "rayon")]
    fn candidates(&self, points: &[Point]) -> Vec<Segment> {
        use rayon::prelude::*;

        points
            .par_iter()
            .flat_map_iter(|origin| self.scan_origin(origin, points))
            .collect()
    }

    /// Finds all the lines through `origin` that contain at least three other points.
    ///
    /// Assumes that the points are distinct, and that `origin` is one of them.
    fn scan_origin(&self, origin: &Point, points: &[Point]) -> Vec<Segment> {
        let order = origin.slope_order(self.eps.clone());

        // The keys are computed up front because they can be expensive (for `Rational`)
        // and the sort would otherwise recompute them O(n log n) times.
        let mut others: Vec<(Slope<F>, Point)> = points
            .iter()
            .filter(|p| *p != origin)
            .map(|p| (order.key(p), *p))
            .collect();
        others.sort_unstable_by(|(s0, _), (s1, _)| s0.cmp(s1));

        let mut ret = Vec::new();
        for run in slope_runs(&others, order.eps()) {
            if run.len() + 1 >= MIN_POINTS {
                let on_line = std::iter::once(*origin).chain(run.iter().map(|(_, p)| *p));
                // The points are distinct, so there's always a segment.
                ret.extend(Segment::spanning(on_line));
            }
        }

        tracing::trace!(%origin, candidates = ret.len(), "scanned origin");
        ret
    }
}

/// Splits a slope-sorted list into maximal runs of equal slopes.
///
/// Each run is anchored at its first element: a point joins the run if its slope is within
/// `eps` of the first slope in the run. With a zero `eps` this is the same as grouping
/// equal slopes.
fn slope_runs<'a, F: Float>(
    sorted: &'a [(Slope<F>, Point)],
    eps: &'a F,
) -> impl Iterator<Item = &'a [(Slope<F>, Point)]> + 'a {
    let mut rest = sorted;
    std::iter::from_fn(move || {
        let (first, _) = rest.first()?;
        let len = rest
            .iter()
            .take_while(|(slope, _)| slope.approx_eq(first, eps))
            .count();
        let (run, tail) = rest.split_at(len);
        rest = tail;
        Some(run)
    })
}

/// Finds all the maximal segments with at least four points on them, comparing slopes
/// exactly.
pub fn detect(points: &[Point]) -> Result<Segments, Error> {
    FastCollinear::exact().detect(points)
}

/// Like [`detect`], but for input that might have holes in it.
pub fn detect_entries(entries: &[Option<Point>]) -> Result<Segments, Error> {
    FastCollinear::exact().detect_entries(entries)
}

/// Finds all the maximal segments with at least four points on them, comparing slopes in
/// floating point up to the configured tolerance.
pub fn detect_approx(points: &[Point], config: &DetectorConfig) -> Result<Segments, Error> {
    FastCollinear::<NotNan<f64>>::new(config)?.detect(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geom::tests::p, num::tests::Reasonable};
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    fn seg(a: (i32, i32), b: (i32, i32)) -> Segment {
        Segment::new(a.into(), b.into())
    }

    fn points(ps: &[(i32, i32)]) -> Vec<Point> {
        ps.iter().map(|&q| q.into()).collect()
    }

    #[test]
    fn too_few_points() {
        assert!(detect(&[]).unwrap().is_empty());
        assert!(detect(&points(&[(0, 0)])).unwrap().is_empty());
        assert!(detect(&points(&[(0, 0), (1, 1), (2, 2)])).unwrap().is_empty());
    }

    #[test]
    fn four_collinear() {
        let segs = detect(&points(&[(3, 3), (0, 0), (2, 2), (1, 1)])).unwrap();
        assert_eq!(segs.as_slice(), &[seg((0, 0), (3, 3))]);
    }

    #[test]
    fn five_collinear() {
        let segs = detect(&points(&[(4, 8), (0, 0), (3, 6), (1, 2), (2, 4)])).unwrap();
        assert_eq!(segs.as_slice(), &[seg((0, 0), (4, 8))]);
    }

    #[test]
    fn horizontal() {
        let ps = points(&[(1000, 17000), (13000, 17000), (17000, 17000), (29000, 17000)]);
        let segs = detect(&ps).unwrap();
        assert_eq!(segs.as_slice(), &[seg((1000, 17000), (29000, 17000))]);
        assert!(segs.as_slice()[0].is_horizontal());

        let segs = detect_approx(&ps, &DetectorConfig::default()).unwrap();
        assert_eq!(segs.as_slice(), &[seg((1000, 17000), (29000, 17000))]);
    }

    #[test]
    fn vertical() {
        let segs = detect(&points(&[(5, -3), (5, 9), (5, 0), (5, 1), (6, 0)])).unwrap();
        assert_eq!(segs.as_slice(), &[seg((5, -3), (5, 9))]);
        assert!(segs.as_slice()[0].is_vertical());
    }

    #[test]
    fn off_line_point() {
        let segs = detect(&points(&[(0, 0), (1, 1), (2, 2), (3, 3), (0, 10)])).unwrap();
        assert_eq!(segs.as_slice(), &[seg((0, 0), (3, 3))]);
    }

    #[test]
    fn points_on_both_sides_of_origin() {
        // From (2, 2), the other points on the line are on both sides. They all have the
        // same slope, so they still form a single run.
        let segs = detect(&points(&[(2, 2), (0, 0), (4, 4), (1, 1), (9, 0)])).unwrap();
        assert_eq!(segs.as_slice(), &[seg((0, 0), (4, 4))]);
    }

    #[test]
    fn crossing_lines() {
        let ps = points(&[
            (0, 0),
            (1, 1),
            (2, 2),
            (3, 3),
            (0, 3),
            (1, 2),
            (2, 1),
            (3, 0),
            (4, 4),
        ]);
        let segs = detect(&ps).unwrap();
        assert_eq!(
            segs.as_slice(),
            &[seg((0, 0), (4, 4)), seg((3, 0), (0, 3))]
        );
    }

    #[test]
    fn duplicate_point() {
        let ps = points(&[(0, 0), (2, 2), (1, 1), (2, 2), (3, 3)]);
        assert_matches!(
            detect(&ps),
            Err(Error::DuplicatePoint { point }) if point == p(2, 2)
        );
    }

    #[test]
    fn missing_point() {
        let entries = [Some(p(0, 0)), Some(p(1, 1)), None, Some(p(3, 3))];
        assert_matches!(detect_entries(&entries), Err(Error::MissingPoint { index: 2 }));

        let entries = [Some(p(0, 0)), Some(p(1, 1)), Some(p(2, 2)), Some(p(3, 3))];
        assert_eq!(detect_entries(&entries).unwrap().len(), 1);
    }

    #[test]
    fn bad_tolerance() {
        for tolerance in [-1.0, f64::NAN, f64::INFINITY] {
            let config = DetectorConfig { tolerance };
            assert_matches!(
                FastCollinear::<NotNan<f64>>::new(&config),
                Err(Error::InvalidTolerance { .. })
            );
        }
        assert!(FastCollinear::<NotNan<f64>>::new(&DetectorConfig { tolerance: 0.0 }).is_ok());
    }

    #[test]
    fn tolerance_merges_close_slopes() {
        // Slopes 1 and 1 + 1e-4 (roughly) from the origin.
        let ps = points(&[(0, 0), (10_000, 10_000), (20_000, 20_000), (10_000, 10_001)]);
        assert!(detect(&ps).unwrap().is_empty());

        let loose = DetectorConfig { tolerance: 1e-3 };
        let segs = detect_approx(&ps, &loose).unwrap();
        assert!(!segs.is_empty());
    }

    #[test]
    fn slope_runs() {
        let origin = p(0, 0);
        let order = origin.slope_order(Rational::zero());
        let mut keyed: Vec<_> = points(&[(1, 1), (0, 3), (2, 2), (-1, 0), (0, -1), (3, 3)])
            .into_iter()
            .map(|q| (order.key(&q), q))
            .collect();
        keyed.sort();

        let lens: Vec<_> = super::slope_runs(&keyed, order.eps())
            .map(|run| run.len())
            .collect();
        assert_eq!(lens, vec![1, 3, 2]);
    }

    #[test]
    fn input_unchanged() {
        let ps = points(&[(3, 3), (0, 0), (2, 2), (1, 1)]);
        let copy = ps.clone();
        detect(&ps).unwrap();
        assert_eq!(ps, copy);
    }

    fn distinct_points() -> impl Strategy<Value = Vec<Point>> {
        prop::collection::btree_set(Point::reasonable(), 0..16)
            .prop_map(|ps| ps.into_iter().collect())
    }

    proptest! {
        #[test]
        fn agrees_with_brute_force(ps in distinct_points()) {
            let fast = detect(&ps).unwrap();
            let brute = crate::brute::detect(&ps).unwrap();
            prop_assert_eq!(fast, brute);
        }

        #[test]
        fn float_agrees_with_exact(ps in distinct_points()) {
            let exact = detect(&ps).unwrap();
            let approx = detect_approx(&ps, &DetectorConfig::default()).unwrap();
            prop_assert_eq!(exact, approx);
        }

        #[test]
        fn segments_are_maximal(ps in distinct_points()) {
            let segs = detect(&ps).unwrap();
            for s in &segs {
                prop_assert!(s.start < s.end);
                prop_assert!(ps.iter().filter(|q| s.contains(q)).count() >= MIN_POINTS);

                // Nothing else in the input extends the segment.
                let line: Vec<_> = ps.iter().filter(|q| s.start.cross(&s.end, q) == 0).collect();
                prop_assert!(line.iter().all(|q| s.contains(q)));
            }
        }

        #[test]
        fn order_independent(ps in distinct_points(), seed in any::<u64>()) {
            let mut shuffled = ps.clone();
            // A cheap deterministic shuffle is enough here.
            shuffled.sort_by_key(|q| (q.x as u64).wrapping_mul(seed) ^ (q.y as u64).wrapping_add(seed));
            prop_assert_eq!(detect(&ps).unwrap(), detect(&shuffled).unwrap());
        }

        #[test]
        fn idempotent(ps in distinct_points()) {
            prop_assert_eq!(detect(&ps).unwrap(), detect(&ps).unwrap());
        }
    }
}
