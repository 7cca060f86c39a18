//! Polylines of tagged coordinates, and their simplification.

use crate::Coordinate;

/// An ordered sequence of coordinates.
///
/// This is the output of every stage of the pipeline: a single traced edge
/// is an open polyline, and a stitched border is closed, meaning that its
/// last point repeats an earlier one.
#[derive(Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Path<Id> {
    coords: Vec<Coordinate<Id>>,
}

impl<Id: std::fmt::Debug> std::fmt::Debug for Path<Id> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.coords.iter()).finish()
    }
}

// Derived impls would require `Id: Default`.
impl<Id> Default for Path<Id> {
    fn default() -> Self {
        Path::new()
    }
}

impl<Id> From<Vec<Coordinate<Id>>> for Path<Id> {
    fn from(coords: Vec<Coordinate<Id>>) -> Self {
        Path { coords }
    }
}

impl<Id> FromIterator<Coordinate<Id>> for Path<Id> {
    fn from_iter<T: IntoIterator<Item = Coordinate<Id>>>(iter: T) -> Self {
        Path {
            coords: iter.into_iter().collect(),
        }
    }
}

/// Are these three points on a common horizontal or vertical line?
fn axis_collinear<Id>(a: &Coordinate<Id>, b: &Coordinate<Id>, c: &Coordinate<Id>) -> bool {
    (a.x == b.x && b.x == c.x) || (a.y == b.y && b.y == c.y)
}

impl<Id> Path<Id> {
    /// The empty path.
    pub fn new() -> Self {
        Path { coords: Vec::new() }
    }

    /// The number of coordinates.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Are we empty?
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// All the coordinates, in order.
    pub fn coords(&self) -> &[Coordinate<Id>] {
        &self.coords
    }

    /// Iterates over the coordinates.
    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate<Id>> {
        self.coords.iter()
    }

    /// Takes the coordinates out.
    pub fn into_vec(self) -> Vec<Coordinate<Id>> {
        self.coords
    }

    /// The first coordinate, if there is one.
    pub fn first(&self) -> Option<&Coordinate<Id>> {
        self.coords.first()
    }

    /// The last coordinate, if there is one.
    pub fn last(&self) -> Option<&Coordinate<Id>> {
        self.coords.last()
    }

    /// The coordinates as `kurbo` points, without their ids.
    pub fn points(&self) -> impl Iterator<Item = kurbo::Point> + '_ {
        self.coords.iter().map(Coordinate::to_kurbo)
    }

    /// Does the last point revisit an earlier one?
    pub fn is_closed(&self) -> bool {
        match self.coords.split_last() {
            Some((last, rest)) => rest.iter().any(|c| c.same_place(last)),
            None => false,
        }
    }

    /// Is this path free of redundant points?
    ///
    /// That is, no two consecutive points are at the same place, and no
    /// three consecutive points lie on a common horizontal or vertical line.
    /// This is what [`Path::dedup`] guarantees.
    pub fn is_simplified(&self) -> bool {
        self.coords.windows(2).all(|w| !w[0].same_place(&w[1]))
            && self
                .coords
                .windows(3)
                .all(|w| !axis_collinear(&w[0], &w[1], &w[2]))
    }

    /// Removes redundant points.
    ///
    /// Repeated points are dropped, and so is every point in the middle of a
    /// straight horizontal or vertical run. A run that doubles back on
    /// itself (a spike) is straight too, so spikes get cut back to where
    /// they started. The first point always survives, and so does the last
    /// point's position, so a closed path stays closed.
    ///
    /// Applying this twice gives the same result as applying it once.
    pub fn dedup(self) -> Path<Id> {
        let mut out: Vec<Coordinate<Id>> = Vec::with_capacity(self.coords.len());
        for c in self.coords {
            if out.last().is_some_and(|last| last.same_place(&c)) {
                continue;
            }
            while out.len() >= 2 && axis_collinear(&out[out.len() - 2], &out[out.len() - 1], &c) {
                out.pop();
            }
            // Popping can expose a point at the same place as `c`.
            if out.last().is_some_and(|last| last.same_place(&c)) {
                continue;
            }
            out.push(c);
        }
        Path { coords: out }
    }

    /// Swaps the axes of every coordinate.
    pub fn transposed(self) -> Path<Id> {
        self.coords.into_iter().map(Coordinate::transposed).collect()
    }

    /// Converts to a `kurbo::BezPath` made of straight lines.
    ///
    /// There's no `ClosePath` element: a closed path already ends where it
    /// started.
    pub fn to_bez_path(&self) -> kurbo::BezPath {
        let mut ret = kurbo::BezPath::new();
        let mut points = self.points();
        if let Some(p) = points.next() {
            ret.move_to(p);
            for q in points {
                ret.line_to(q);
            }
        }
        ret
    }
}

impl<'a, Id> IntoIterator for &'a Path<Id> {
    type Item = &'a Coordinate<Id>;
    type IntoIter = std::slice::Iter<'a, Coordinate<Id>>;

    fn into_iter(self) -> Self::IntoIter {
        self.coords.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::num::tests::Reasonable;
    use proptest::prelude::*;

    pub fn path(points: &[(f64, f64)]) -> Path<()> {
        points
            .iter()
            .map(|&(x, y)| Coordinate::new(x, y, ()))
            .collect()
    }

    pub fn xy<Id>(path: &Path<Id>) -> Vec<(f64, f64)> {
        path.iter().map(|c| (c.x, c.y)).collect()
    }

    #[test]
    fn duplicates() {
        let p = path(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (1.0, 1.0)]).dedup();
        assert_eq!(xy(&p), vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
    }

    #[test]
    fn collinear_runs() {
        let p = path(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (2.0, 3.0),
            (0.0, 3.0),
        ])
        .dedup();
        assert_eq!(xy(&p), vec![(0.0, 0.0), (2.0, 0.0), (2.0, 3.0), (0.0, 3.0)]);
    }

    #[test]
    fn spikes() {
        let p = path(&[(0.0, 0.0), (5.0, 0.0), (3.0, 0.0), (3.0, 4.0)]).dedup();
        assert_eq!(xy(&p), vec![(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]);

        // A spike that returns exactly to where it started.
        let p = path(&[(0.0, 0.0), (0.0, 5.0), (0.0, 0.0), (4.0, 0.0), (4.0, 4.0)]).dedup();
        assert_eq!(xy(&p), vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)]);
    }

    #[test]
    fn keeps_closed_loops_closed() {
        let p = path(&[
            (10.0, 50.0),
            (30.0, 50.0),
            (50.0, 50.0),
            (50.0, 10.0),
            (10.0, 10.0),
            (10.0, 50.0),
            (10.0, 50.0),
        ])
        .dedup();
        assert_eq!(
            xy(&p),
            vec![(10.0, 50.0), (50.0, 50.0), (50.0, 10.0), (10.0, 10.0), (10.0, 50.0)]
        );
        assert!(p.is_closed());
    }

    #[test]
    fn ids_ride_along() {
        let p: Path<u32> = vec![
            Coordinate::new(0.0, 0.0, 1),
            Coordinate::new(0.0, 0.0, 2),
            Coordinate::new(0.0, 1.0, 3),
        ]
        .into();
        let ids: Vec<_> = p.dedup().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn closedness() {
        assert!(!Path::<()>::new().is_closed());
        assert!(!path(&[(0.0, 0.0)]).is_closed());
        assert!(!path(&[(0.0, 0.0), (1.0, 0.0)]).is_closed());
        assert!(path(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (1.0, 0.0)]).is_closed());
    }

    #[test]
    fn bez_path() {
        let p = path(&[(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (0.0, 0.0)]);
        let bez = p.to_bez_path();
        assert_eq!(
            bez.elements(),
            &[
                kurbo::PathEl::MoveTo((0.0, 0.0).into()),
                kurbo::PathEl::LineTo((4.0, 0.0).into()),
                kurbo::PathEl::LineTo((4.0, 2.0).into()),
                kurbo::PathEl::LineTo((0.0, 0.0).into()),
            ]
        );
        assert!(Path::<()>::new().to_bez_path().elements().is_empty());
    }

    #[test]
    fn transposing() {
        let p = path(&[(1.0, 2.0), (3.0, 4.0)]).transposed();
        assert_eq!(xy(&p), vec![(2.0, 1.0), (4.0, 3.0)]);
    }

    fn manhattan_path() -> impl Strategy<Value = Path<()>> {
        // Small coordinates so that repeats and collinear runs are common.
        prop::collection::vec((0u8..4, 0u8..4), 0..30).prop_map(|pts| {
            pts.into_iter()
                .map(|(x, y)| Coordinate::new(f64::from(x), f64::from(y), ()))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn dedup_is_idempotent(p in manhattan_path()) {
            let once = p.dedup();
            prop_assert!(once.is_simplified());
            prop_assert_eq!(once.clone().dedup(), once);
        }

        #[test]
        fn dedup_keeps_the_ends(p in manhattan_path()) {
            let first = p.first().cloned();
            let last = p.last().cloned();
            let d = p.dedup();
            prop_assert_eq!(d.first().cloned(), first);
            match (d.last(), last) {
                (Some(a), Some(b)) => prop_assert!(a.same_place(&b)),
                (None, None) => {}
                _ => prop_assert!(false),
            }
        }

        #[test]
        fn dedup_never_grows(points in prop::collection::vec(<(f64, f64)>::reasonable(), 0..20)) {
            let p = path(&points);
            let n = p.len();
            prop_assert!(p.dedup().len() <= n);
        }
    }
}
