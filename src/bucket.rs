//! Sparse two-level indices of rectangles, one per edge.
//!
//! For the bottom edge, rectangles are grouped by their left side and then
//! by their bottom side; the other edges use the same scheme in their own
//! [`Frame`]. The tracer walks the outer level in sweep order and, within
//! each group, only really cares about the rectangle that sticks out furthest
//! towards the edge.

use std::collections::BTreeMap;

use crate::{
    num::CheapOrderedFloat,
    orientation::{Edge, Frame, FrameRect},
    Rect,
};

/// A rectangle, together with its bounds in some frame.
#[derive(Debug)]
pub struct Item<'a, Id> {
    /// The bounds, relabeled.
    pub bounds: FrameRect,
    /// The (padded) rectangle itself.
    pub rect: &'a Rect<Id>,
}

// Derived impls would require `Id: Copy`.
impl<Id> Clone for Item<'_, Id> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Id> Copy for Item<'_, Id> {}

type Secondary<'a, Id> = BTreeMap<CheapOrderedFloat, Item<'a, Id>>;

/// Rectangles grouped by their leading side, then by their near side.
///
/// Two rectangles with the same leading *and* near sides collide; the later
/// one replaces the earlier one. Since the tracer only looks at those two
/// sides (and the trailing side of whichever rectangle it ends up routing
/// through), this is usually harmless, but it does mean that the outline
/// can ignore a rectangle that's completely hidden behind another one with
/// the same corner.
#[derive(Debug)]
pub struct BucketedIndex<'a, Id> {
    frame: Frame,
    buckets: BTreeMap<CheapOrderedFloat, Secondary<'a, Id>>,
}

impl<'a, Id> BucketedIndex<'a, Id> {
    /// Builds the index for `edge`.
    ///
    /// The rectangles are assumed to be valid (and already padded); this
    /// takes time `O(n log n)` in the number of rectangles, which for
    /// realistic layouts (with many rectangles sharing rows and columns)
    /// behaves like `O(n)`.
    pub fn new(rects: &'a [Rect<Id>], edge: Edge) -> Self {
        let mut ret = BucketedIndex {
            frame: edge.frame(),
            buckets: BTreeMap::new(),
        };
        for r in rects {
            ret.insert(r);
        }
        ret
    }

    fn insert(&mut self, rect: &'a Rect<Id>) {
        let bounds = self.frame.relabel(rect);
        self.buckets
            .entry(bounds.leading.into())
            .or_default()
            .insert(bounds.near.into(), Item { bounds, rect });
    }

    /// The frame that this index was built in.
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// The number of distinct primary coordinates.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Are we empty?
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// The total number of rectangles, after collisions were collapsed.
    pub fn rect_count(&self) -> usize {
        self.buckets.values().map(|b| b.len()).sum()
    }

    /// Returns all the buckets, in sweep order.
    pub fn buckets(&self) -> Vec<Bucket<'_, 'a, Id>> {
        let frame = self.frame;
        let mut ret: Vec<_> = self
            .buckets
            .iter()
            .filter_map(|(primary, members)| {
                let nearest = if frame.below_is_greater() {
                    members.values().next_back()
                } else {
                    members.values().next()
                };
                Some(Bucket {
                    frame,
                    primary: primary.into_inner(),
                    nearest: *nearest?,
                    members,
                })
            })
            .collect();
        if self.frame.reversed_sweep() {
            ret.reverse();
        }
        ret
    }
}

/// All the rectangles sharing one leading coordinate.
#[derive(Debug)]
pub struct Bucket<'b, 'a, Id> {
    frame: Frame,
    primary: f64,
    nearest: Item<'a, Id>,
    members: &'b Secondary<'a, Id>,
}

impl<'b, 'a, Id> Bucket<'b, 'a, Id> {
    /// The leading coordinate that all members share.
    pub fn primary(&self) -> f64 {
        self.primary
    }

    /// The member closest to the edge being traced.
    pub fn nearest(&self) -> Item<'a, Id> {
        self.nearest
    }

    /// All the members except the nearest one, in increasing order of their
    /// near coordinate.
    pub fn others(&self) -> impl Iterator<Item = Item<'a, Id>> + 'b {
        let skip_first = !self.frame.below_is_greater();
        let n = self.members.len();
        self.members
            .values()
            .enumerate()
            .filter(move |(i, _)| if skip_first { *i != 0 } else { *i + 1 != n })
            .map(|(_, item)| *item)
    }

    /// All the members, in increasing order of their near coordinate.
    pub fn members(&self) -> impl Iterator<Item = Item<'a, Id>> + 'b {
        self.members.values().copied()
    }

    /// The number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Buckets are never empty, but clippy wants this anyway.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
