//! Filling in narrow notches.
//!
//! A traced edge of a ragged layout (think of a paragraph of text with one
//! short line in the middle) can have deep, narrow notches in it. When the
//! notch is narrower than some width, we'd rather pretend it isn't there.

use std::collections::BTreeMap;

use crate::{num::CheapOrderedFloat, orientation::Frame, Coordinate};

/// A vertex and its two neighbors, by index into the path.
#[derive(Clone, Copy, Debug)]
struct Step {
    before: usize,
    at: usize,
    after: usize,
}

/// The steps whose primary coordinate is in `[lo, hi)`, in increasing order.
fn window(
    steps: &BTreeMap<CheapOrderedFloat, Step>,
    lo: f64,
    hi: f64,
) -> impl DoubleEndedIterator<Item = Step> + '_ {
    // `BTreeMap::range` panics on backwards ranges.
    let range = (lo < hi).then(|| steps.range(CheapOrderedFloat::from(lo)..CheapOrderedFloat::from(hi)));
    range.into_iter().flatten().map(|(_, step)| *step)
}

/// Flattens notches narrower than `width`, in place.
///
/// The path should be a raw trace (in the frame's coordinates, before
/// deduplication). Whenever the path steps down, we look back along the
/// path for a step up within `width`; if we find one, everything in between
/// gets raised to the higher of the two levels. Only the secondary
/// coordinates change, so the path keeps its length and its primary
/// coordinates.
///
/// Distances are measured in whole units: a step up at `u` closes a notch
/// whose far side is at `c` when `c - width <= u < c` (or, for the edges
/// that sweep backwards, `c < u < c + width` with `u` at least one unit
/// past `c`).
pub fn flatten<Id>(path: &mut [Coordinate<Id>], frame: Frame, width: f64) {
    let reversed = frame.reversed_sweep();
    let mut upward = BTreeMap::new();
    let mut all = BTreeMap::new();

    for p in 1..path.len() {
        let (prev_y, x, y) = (path[p - 1].y, path[p].x, path[p].y);
        if frame.is_above(prev_y, y) {
            let (lo, hi) = if reversed {
                (x + 1.0, x + width)
            } else {
                (x - width, x)
            };
            // The step up furthest back along the sweep.
            let mut ups = window(&upward, lo, hi);
            let up = if reversed { ups.next_back() } else { ups.next() };

            if let Some(up) = up {
                let start = &path[up.before];
                let (start_x, level) = (start.x, frame.higher(y, start.y));
                let (lo, hi) = if reversed {
                    (x + 1.0, start_x + 1.0)
                } else {
                    (start_x - 1.0, x)
                };
                for step in window(&all, lo, hi) {
                    if frame.is_above(path[step.at].y, level) {
                        path[step.at].y = level;
                        if let Some(next) = path.get_mut(step.after) {
                            next.y = level;
                        }
                    }
                }
            }
        }

        // The flattening might have moved the current point.
        let (prev_y, x, y) = (path[p - 1].y, path[p].x, path[p].y);
        let step = Step {
            before: p - 1,
            at: p,
            after: p + 1,
        };
        if frame.is_above(y, prev_y) {
            upward.insert(CheapOrderedFloat::from(x), step);
        }
        all.insert(CheapOrderedFloat::from(x), step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        orientation::Edge,
        path::tests::{path, xy},
        Path,
    };
    use proptest::prelude::*;

    fn flattened(points: &[(f64, f64)], edge: Edge, width: f64) -> Vec<(f64, f64)> {
        let mut coords = path(points).into_vec();
        flatten(&mut coords, edge.frame(), width);
        xy(&Path::from(coords).dedup())
    }

    const NOTCH: [(f64, f64); 6] = [
        (0.0, 50.0),
        (10.0, 50.0),
        (10.0, 40.0),
        (15.0, 40.0),
        (15.0, 50.0),
        (30.0, 50.0),
    ];

    #[test]
    fn narrow_notch() {
        assert_eq!(
            flattened(&NOTCH, Edge::Bottom, 20.0),
            vec![(0.0, 50.0), (30.0, 50.0)]
        );
    }

    #[test]
    fn wide_notch() {
        assert_eq!(
            flattened(&NOTCH, Edge::Bottom, 3.0),
            xy(&path(&NOTCH).dedup())
        );
    }

    #[test]
    fn bump_is_not_a_notch() {
        // A bump sticking out towards the edge is part of the outline.
        let bump = [
            (0.0, 50.0),
            (10.0, 50.0),
            (10.0, 60.0),
            (15.0, 60.0),
            (15.0, 50.0),
            (30.0, 50.0),
        ];
        assert_eq!(flattened(&bump, Edge::Bottom, 20.0), bump.to_vec());
    }

    #[test]
    fn notch_in_the_top_edge() {
        // The top edge sweeps from right to left, and "up" is down.
        let notch = [
            (30.0, 10.0),
            (20.0, 10.0),
            (20.0, 20.0),
            (15.0, 20.0),
            (15.0, 10.0),
            (0.0, 10.0),
        ];
        assert_eq!(
            flattened(&notch, Edge::Top, 20.0),
            vec![(30.0, 10.0), (0.0, 10.0)]
        );
        assert_eq!(flattened(&notch, Edge::Top, 3.0), notch.to_vec());
    }

    #[test]
    fn uneven_notch_fills_to_the_lower_side() {
        // The notch's far side doesn't come all the way back down; the fill
        // goes up to whichever side is higher.
        let notch = [
            (0.0, 50.0),
            (10.0, 50.0),
            (10.0, 40.0),
            (15.0, 40.0),
            (15.0, 45.0),
            (30.0, 45.0),
        ];
        assert_eq!(
            flattened(&notch, Edge::Bottom, 20.0),
            vec![(0.0, 50.0), (10.0, 50.0), (10.0, 45.0), (30.0, 45.0)]
        );
    }

    #[test]
    fn tiny_widths() {
        // Degenerate windows mustn't panic.
        for edge in Edge::ALL {
            for width in [0.0, 0.5, 1.0] {
                let _ = flattened(&NOTCH, edge, width);
            }
        }
    }

    proptest! {
        #[test]
        fn keeps_primary_coordinates(
            points in prop::collection::vec((0u8..20, 0u8..20), 0..20),
            width in 0.0..30.0f64,
        ) {
            for edge in Edge::ALL {
                let mut coords: Vec<_> = points
                    .iter()
                    .map(|&(x, y)| Coordinate::new(f64::from(x), f64::from(y), ()))
                    .collect();
                let before: Vec<_> = coords.iter().map(|c| c.x).collect();
                flatten(&mut coords, edge.frame(), width);
                let after: Vec<_> = coords.iter().map(|c| c.x).collect();
                prop_assert_eq!(before, after);
            }
        }
    }
}
