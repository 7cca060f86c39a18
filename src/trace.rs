//! The edge tracer.
//!
//! This is a single sweep over the buckets of a [`BucketedIndex`], in sweep
//! order. At any moment, the outline is "on" some rectangle (the previous
//! one, `prev`), running along its near side. When the next bucket's
//! nearest rectangle sticks out further, the outline steps down onto it;
//! when the sweep runs past the end of `prev`, the outline has to climb back
//! up, either onto the next bucket or onto one of the rectangles it passed
//! over earlier.
//!
//! Those passed-over rectangles are kept in a "pending-above" set. They
//! are never removed: once the outline has climbed past one, the
//! "extends further than `prev`" test stops it from being used again.
//!
//! Everything here works in the edge's frame (see [`crate::orientation`]),
//! and the coordinates it produces are `(primary, secondary)` pairs, which
//! for the left and right edges means that `x` and `y` are swapped.

use std::collections::{btree_map, BTreeMap};

use crate::{
    bucket::{Bucket, BucketedIndex, Item},
    log::{debug, trace},
    num::CheapOrderedFloat,
    orientation::Frame,
    Coordinate, Path,
};

/// Rectangles that the outline skipped over, keyed by their near side.
///
/// Later insertions with the same key replace earlier ones.
struct PendingAbove<'a, Id> {
    frame: Frame,
    items: BTreeMap<CheapOrderedFloat, Item<'a, Id>>,
}

impl<'a, Id> PendingAbove<'a, Id> {
    fn new(frame: Frame) -> Self {
        PendingAbove {
            frame,
            items: BTreeMap::new(),
        }
    }

    fn insert(&mut self, item: Item<'a, Id>) {
        self.items.insert(item.bounds.near.into(), item);
    }

    /// Iterates from the rectangle nearest the edge to the one furthest
    /// inside the cluster.
    fn climbing(&self) -> Climbing<'_, 'a, Id> {
        Climbing {
            values: self.items.values(),
            from_the_back: self.frame.below_is_greater(),
        }
    }
}

/// The iterator returned by [`PendingAbove::climbing`].
struct Climbing<'p, 'a, Id> {
    values: btree_map::Values<'p, CheapOrderedFloat, Item<'a, Id>>,
    from_the_back: bool,
}

impl<'a, Id> Iterator for Climbing<'_, 'a, Id> {
    type Item = Item<'a, Id>;

    fn next(&mut self) -> Option<Item<'a, Id>> {
        if self.from_the_back {
            self.values.next_back().copied()
        } else {
            self.values.next().copied()
        }
    }
}

/// The outline under construction.
struct Route<'a, Id> {
    frame: Frame,
    prev: Item<'a, Id>,
    coords: Vec<Coordinate<Id>>,
}

impl<'a, Id: Clone> Route<'a, Id> {
    fn start(frame: Frame, first: Item<'a, Id>) -> Self {
        let mut ret = Route {
            frame,
            prev: first,
            coords: Vec::new(),
        };
        ret.push(first.bounds.leading, first.bounds.near, &first.rect.id);
        ret
    }

    fn push(&mut self, primary: f64, secondary: f64, id: &Id) {
        self.coords
            .push(Coordinate::new(primary, secondary, id.clone()));
    }

    /// Moves across to `item`'s leading side, then along it to `item`'s
    /// near side.
    fn step_down(&mut self, item: Item<'a, Id>) {
        let prev = self.prev.bounds;
        let id = &item.rect.id;
        debug!(edge = %self.frame.edge, at = item.bounds.leading, "stepping down");
        self.push(item.bounds.leading, prev.near, id);
        self.push(item.bounds.leading, item.bounds.near, id);
        self.prev = item;
    }

    /// Runs to the end of `prev`, then climbs up to `item`'s near side.
    ///
    /// The new points are tagged with `id`, which is the rectangle that the
    /// sweep is currently visiting and not necessarily `item`.
    fn step_up(&mut self, item: Item<'a, Id>, id: &Id) {
        let prev = self.prev.bounds;
        debug!(edge = %self.frame.edge, at = prev.trailing, "stepping up");
        self.push(prev.trailing, prev.near, id);
        self.push(prev.trailing, item.bounds.near, id);
        self.prev = item;
    }

    /// Climbs through pending rectangles that continue past the end of
    /// `prev`, for as long as `prev` ends before `current` begins.
    fn climb(&mut self, pending: &PendingAbove<'a, Id>, current: Item<'a, Id>) {
        let frame = self.frame;
        for candidate in pending.climbing() {
            if frame.is_after(self.prev.bounds.trailing, current.bounds.leading) {
                break;
            }
            if frame.is_after(candidate.bounds.trailing, self.prev.bounds.trailing) {
                self.step_up(candidate, &current.rect.id);
            } else {
                trace!(edge = %frame.edge, near = candidate.bounds.near, "skipping pending rect");
            }
        }
    }

    /// Handles every bucket after the first.
    fn visit(&mut self, pending: &mut PendingAbove<'a, Id>, bucket: &Bucket<'_, 'a, Id>) {
        let frame = self.frame;
        let item = bucket.nearest();
        trace!(edge = %frame.edge, primary = bucket.primary(), len = bucket.len(), "visiting bucket");

        if frame.is_before(item.bounds.leading, self.prev.bounds.trailing) {
            // This bucket starts underneath `prev`.
            if frame.is_below(item.bounds.near, self.prev.bounds.near) {
                self.step_down(item);
                for other in bucket.others() {
                    pending.insert(other);
                }
            } else {
                trace!(edge = %frame.edge, primary = bucket.primary(), "deferring bucket");
                for member in bucket.members() {
                    pending.insert(member);
                }
            }
        } else {
            self.climb(pending, item);
            let prev = self.prev.bounds;
            if frame.is_before(item.bounds.leading, prev.trailing)
                && frame.is_above(item.bounds.near, prev.near)
            {
                // Climbing brought us past this bucket; maybe it's needed later.
                pending.insert(item);
            } else if frame.is_above(item.bounds.near, prev.near) {
                self.step_up(item, &item.rect.id);
            } else {
                self.step_down(item);
            }
        }
    }

    /// Runs the outline out to the end of `last`, the nearest rectangle of
    /// the final bucket.
    fn finish(&mut self, pending: &PendingAbove<'a, Id>, last: Item<'a, Id>) {
        let frame = self.frame;
        let end = last.bounds;
        let id = &last.rect.id;

        if frame.is_below(end.near, self.prev.bounds.near) {
            self.step_down(last);
            self.push(end.trailing, end.near, id);
            return;
        }

        for candidate in pending.climbing() {
            if frame.is_after(candidate.bounds.trailing, self.prev.bounds.trailing) {
                self.step_up(candidate, id);
                if !frame.is_before(candidate.bounds.trailing, end.trailing) {
                    break;
                }
            }
        }

        let prev = self.prev.bounds;
        if !frame.is_before(end.trailing, prev.trailing) {
            self.push(prev.trailing, prev.near, id);
            self.push(prev.trailing, end.near, id);
            self.push(end.trailing, end.near, id);
        } else if frame.is_above(end.near, prev.near) {
            self.push(prev.trailing, prev.near, id);
        }
    }
}

/// Traces the outline of one edge.
///
/// The result is in the index's frame, and it isn't simplified: it usually
/// contains repeated points and collinear runs, which
/// [`Path::dedup`](crate::Path::dedup) cleans up. An empty index gives an
/// empty path.
pub fn trace<Id: Clone>(index: &BucketedIndex<'_, Id>) -> Path<Id> {
    let frame = index.frame();
    let buckets = index.buckets();
    let Some((first, rest)) = buckets.split_first() else {
        return Path::new();
    };

    debug!(edge = %frame.edge, buckets = buckets.len(), "tracing");
    let mut pending = PendingAbove::new(frame);
    let mut route = Route::start(frame, first.nearest());
    for other in first.others() {
        pending.insert(other);
    }

    for bucket in rest {
        route.visit(&mut pending, bucket);
    }

    let last = rest.last().unwrap_or(first);
    route.finish(&pending, last.nearest());
    route.coords.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{orientation::Edge, path::tests::xy, Rect};

    fn traced(rects: &[Rect<&'static str>], edge: Edge) -> Vec<(f64, f64)> {
        let index = BucketedIndex::new(rects, edge);
        xy(&trace(&index).dedup())
    }

    #[test]
    fn pending_climbs_from_the_edge_inwards() {
        let rects = [
            Rect::new("a", 0.0, 10.0, 5.0, 10.0),
            Rect::new("b", 0.0, 10.0, 0.0, 30.0),
            Rect::new("c", 0.0, 10.0, 2.0, 20.0),
        ];
        let climbed = |edge: Edge| {
            let frame = edge.frame();
            let mut pending = PendingAbove::new(frame);
            for r in &rects {
                pending.insert(Item {
                    bounds: frame.relabel(r),
                    rect: r,
                });
            }
            pending.climbing().map(|item| item.rect.id).collect::<Vec<_>>()
        };
        assert_eq!(climbed(Edge::Bottom), vec!["b", "c", "a"]);
        assert_eq!(climbed(Edge::Top), vec!["b", "c", "a"]);
    }

    #[test]
    fn empty() {
        let rects: Vec<Rect<&str>> = Vec::new();
        let index = BucketedIndex::new(&rects, Edge::Bottom);
        assert!(trace(&index).is_empty());
    }

    #[test]
    fn single_rect() {
        let rects = [Rect::new("a", 10.0, 50.0, 10.0, 50.0)];
        assert_eq!(traced(&rects, Edge::Bottom), vec![(10.0, 50.0), (50.0, 50.0)]);
        // The sides come out transposed.
        assert_eq!(traced(&rects, Edge::Right), vec![(50.0, 50.0), (10.0, 50.0)]);
        assert_eq!(traced(&rects, Edge::Top), vec![(50.0, 10.0), (10.0, 10.0)]);
        assert_eq!(traced(&rects, Edge::Left), vec![(10.0, 10.0), (50.0, 10.0)]);
    }

    #[test]
    fn side_by_side() {
        let rects = [
            Rect::new("a", 0.0, 10.0, 0.0, 10.0),
            Rect::new("b", 20.0, 30.0, 0.0, 10.0),
        ];
        assert_eq!(traced(&rects, Edge::Bottom), vec![(0.0, 10.0), (30.0, 10.0)]);
    }

    #[test]
    fn step_down() {
        let rects = [
            Rect::new("a", 0.0, 20.0, 0.0, 10.0),
            Rect::new("b", 10.0, 30.0, 0.0, 30.0),
        ];
        assert_eq!(
            traced(&rects, Edge::Bottom),
            vec![(0.0, 10.0), (10.0, 10.0), (10.0, 30.0), (30.0, 30.0)]
        );
    }

    #[test]
    fn climb_back_up() {
        // A tall rectangle in the middle of two short ones.
        let rects = [
            Rect::new("a", 0.0, 10.0, 0.0, 10.0),
            Rect::new("b", 10.0, 20.0, 0.0, 30.0),
            Rect::new("c", 20.0, 30.0, 0.0, 10.0),
        ];
        assert_eq!(
            traced(&rects, Edge::Bottom),
            vec![
                (0.0, 10.0),
                (10.0, 10.0),
                (10.0, 30.0),
                (20.0, 30.0),
                (20.0, 10.0),
                (30.0, 10.0)
            ]
        );
    }

    #[test]
    fn hidden_rect_routes_around() {
        // "b" sits entirely inside "a"'s shadow, and "c" starts under "a" but
        // reaches further down and further right.
        let rects = [
            Rect::new("a", 0.0, 30.0, 0.0, 20.0),
            Rect::new("b", 10.0, 20.0, 0.0, 10.0),
            Rect::new("c", 25.0, 40.0, 0.0, 25.0),
        ];
        assert_eq!(
            traced(&rects, Edge::Bottom),
            vec![(0.0, 20.0), (25.0, 20.0), (25.0, 25.0), (40.0, 25.0)]
        );
    }

    #[test]
    fn deferred_rect_is_climbed_onto() {
        // "b" starts under "a" but doesn't stick out below it; it's still
        // needed once "a" ends.
        let rects = [
            Rect::new("a", 0.0, 20.0, 0.0, 30.0),
            Rect::new("b", 10.0, 40.0, 0.0, 10.0),
        ];
        assert_eq!(
            traced(&rects, Edge::Bottom),
            vec![(0.0, 30.0), (20.0, 30.0), (20.0, 10.0), (40.0, 10.0)]
        );
    }

    #[test]
    fn stacked_column() {
        // Two rectangles sharing a left side: the lower one is the nearest,
        // and the outline climbs onto the wider one when the lower one ends.
        // It stops there, because the last bucket's rectangle is "b"; the
        // right edge picks up the rest.
        let rects = [
            Rect::new("a", 0.0, 30.0, 0.0, 10.0),
            Rect::new("b", 0.0, 10.0, 10.0, 20.0),
        ];
        assert_eq!(
            traced(&rects, Edge::Bottom),
            vec![(0.0, 20.0), (10.0, 20.0), (10.0, 10.0)]
        );
    }

    #[test]
    fn ids_follow_the_sweep() {
        let rects = [
            Rect::new("a", 0.0, 10.0, 0.0, 10.0),
            Rect::new("b", 10.0, 20.0, 0.0, 30.0),
        ];
        let index = BucketedIndex::new(&rects, Edge::Bottom);
        let path = trace(&index);
        assert_eq!(path.first().map(|c| c.id), Some("a"));
        // The corner where the outline leaves "a" is emitted while visiting "b".
        let ids: Vec<_> = path
            .iter()
            .filter(|c| c.x == 10.0)
            .map(|c| c.id)
            .collect();
        assert!(ids.iter().all(|id| *id == "b"));
    }
}
