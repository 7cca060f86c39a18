//! The four edges, and the coordinate frames that let one tracer serve them all.
//!
//! Every edge is traced as if it were the bottom edge: the tracer sweeps
//! "forward" through the rectangles and keeps the outline "below" them. A
//! [`Frame`] says what forward and below mean for a particular edge, and a
//! [`FrameRect`] is a rectangle whose four bounds have been relabeled
//! accordingly.
//!
//! ```text
//!            top: sweep right-to-left, "below" is up
//!          ┌───────────────────────────────┐
//!   left:  │                               │  right:
//!   sweep  │                               │  sweep
//!   down,  │                               │  up,
//!  "below" │                               │ "below"
//!  is left └───────────────────────────────┘ is right
//!            bottom: sweep left-to-right, "below" is down
//! ```
//!
//! The left and right edges are transposed: their "primary" coordinate (the
//! one they sweep along) is `y`, and so the points they produce have `x` and
//! `y` swapped until the very end.

use std::str::FromStr;

use arrayvec::ArrayVec;

use crate::Rect;

/// One of the four sides of the outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Edge {
    /// The bottom edge, traced left to right.
    Bottom,
    /// The right edge, traced bottom to top.
    Right,
    /// The top edge, traced right to left.
    Top,
    /// The left edge, traced top to bottom.
    Left,
}

impl Edge {
    /// All the edges, in stitching order.
    pub const ALL: [Edge; 4] = [Edge::Bottom, Edge::Right, Edge::Top, Edge::Left];

    /// The edge that follows this one, going around the outline.
    pub fn next(self) -> Edge {
        match self {
            Edge::Bottom => Edge::Right,
            Edge::Right => Edge::Top,
            Edge::Top => Edge::Left,
            Edge::Left => Edge::Bottom,
        }
    }

    /// The edge that comes before this one.
    pub fn prev(self) -> Edge {
        match self {
            Edge::Bottom => Edge::Left,
            Edge::Right => Edge::Bottom,
            Edge::Top => Edge::Right,
            Edge::Left => Edge::Top,
        }
    }

    /// Our position in [`Edge::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The name of this edge, as used in options.
    pub fn name(self) -> &'static str {
        match self {
            Edge::Bottom => "bottom",
            Edge::Right => "right",
            Edge::Top => "top",
            Edge::Left => "left",
        }
    }

    /// Is this one of the two vertical sides?
    pub fn is_side(self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }

    /// The coordinate frame that this edge is traced in.
    pub fn frame(self) -> Frame {
        match self {
            Edge::Bottom => Frame {
                edge: self,
                after_is_greater: true,
                below_is_greater: true,
                relabel: |r| FrameRect {
                    leading: r.left_x,
                    trailing: r.right_x,
                    near: r.bottom_y,
                    far: r.top_y,
                },
            },
            Edge::Right => Frame {
                edge: self,
                after_is_greater: false,
                below_is_greater: true,
                relabel: |r| FrameRect {
                    leading: r.bottom_y,
                    trailing: r.top_y,
                    near: r.right_x,
                    far: r.left_x,
                },
            },
            Edge::Top => Frame {
                edge: self,
                after_is_greater: false,
                below_is_greater: false,
                relabel: |r| FrameRect {
                    leading: r.right_x,
                    trailing: r.left_x,
                    near: r.top_y,
                    far: r.bottom_y,
                },
            },
            Edge::Left => Frame {
                edge: self,
                after_is_greater: true,
                below_is_greater: false,
                relabel: |r| FrameRect {
                    leading: r.top_y,
                    trailing: r.bottom_y,
                    near: r.left_x,
                    far: r.right_x,
                },
            },
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The input named something that isn't an edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownEdge(pub String);

impl std::fmt::Display for UnknownEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown edge {:?}", self.0)
    }
}

impl std::error::Error for UnknownEdge {}

impl FromStr for Edge {
    type Err = UnknownEdge;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bottom" => Ok(Edge::Bottom),
            "right" => Ok(Edge::Right),
            "top" => Ok(Edge::Top),
            "left" => Ok(Edge::Left),
            _ => Err(UnknownEdge(s.to_owned())),
        }
    }
}

/// A rectangle's bounds, relabeled for one edge's frame.
///
/// In the bottom edge's frame these are the rectangle's left, right, bottom
/// and top sides respectively.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameRect {
    /// The side that the sweep reaches first.
    pub leading: f64,
    /// The side that the sweep reaches last.
    pub trailing: f64,
    /// The side facing the edge being traced.
    pub near: f64,
    /// The side facing the interior of the cluster.
    pub far: f64,
}

/// The axis relabeling and comparators for one edge.
///
/// "After" is the sweep direction along the primary axis, and "below" is the
/// direction (along the secondary axis) away from the interior of the
/// cluster, towards the edge being traced.
#[derive(Clone, Copy)]
pub struct Frame {
    /// The edge this frame belongs to.
    pub edge: Edge,
    after_is_greater: bool,
    below_is_greater: bool,
    relabel: fn(&Bounds) -> FrameRect,
}

/// The four bounds of a rectangle, without its id.
///
/// This exists so that [`Frame`] can hold a plain function pointer for its
/// relabeling, regardless of the rectangles' id type.
struct Bounds {
    left_x: f64,
    right_x: f64,
    top_y: f64,
    bottom_y: f64,
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Frame({})", self.edge)
    }
}

impl Frame {
    /// Relabels a rectangle's bounds into this frame.
    pub fn relabel<Id>(&self, r: &Rect<Id>) -> FrameRect {
        (self.relabel)(&Bounds {
            left_x: r.left_x,
            right_x: r.right_x,
            top_y: r.top_y,
            bottom_y: r.bottom_y,
        })
    }

    /// Is `a` strictly after `b` in the sweep direction?
    #[inline]
    pub fn is_after(&self, a: f64, b: f64) -> bool {
        if self.after_is_greater {
            a > b
        } else {
            a < b
        }
    }

    /// Is `a` strictly before `b` in the sweep direction?
    #[inline]
    pub fn is_before(&self, a: f64, b: f64) -> bool {
        self.is_after(b, a)
    }

    /// Is `a` strictly below `b`, i.e. further from the interior of the cluster?
    #[inline]
    pub fn is_below(&self, a: f64, b: f64) -> bool {
        if self.below_is_greater {
            a > b
        } else {
            a < b
        }
    }

    /// Is `a` strictly above `b`, i.e. closer to the interior of the cluster?
    #[inline]
    pub fn is_above(&self, a: f64, b: f64) -> bool {
        self.is_below(b, a)
    }

    /// Of `a` and `b`, the one closer to the interior.
    pub fn higher(&self, a: f64, b: f64) -> f64 {
        if self.is_above(a, b) {
            a
        } else {
            b
        }
    }

    /// Does the sweep run against increasing coordinates?
    ///
    /// This is true for the right and top edges.
    pub fn reversed_sweep(&self) -> bool {
        !self.after_is_greater
    }

    /// Do larger secondary coordinates lie further below?
    ///
    /// This decides which end of a secondary-keyed map holds the rectangle
    /// closest to the edge.
    pub fn below_is_greater(&self) -> bool {
        self.below_is_greater
    }

    /// Are points in this frame stored with `x` and `y` swapped?
    pub fn transposed(&self) -> bool {
        self.edge.is_side()
    }

    /// The (primary, secondary) components of a real-space point.
    pub fn project(&self, x: f64, y: f64) -> (f64, f64) {
        if self.transposed() {
            (y, x)
        } else {
            (x, y)
        }
    }
}

/// A set of edges.
///
/// Iteration is always in stitching order (bottom, right, top, left),
/// whatever order the edges were added in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EdgeSet {
    edges: ArrayVec<Edge, 4>,
}

impl Default for EdgeSet {
    fn default() -> Self {
        EdgeSet::all()
    }
}

impl EdgeSet {
    /// All four edges.
    pub fn all() -> Self {
        EdgeSet {
            edges: ArrayVec::from(Edge::ALL),
        }
    }

    /// No edges at all.
    pub fn empty() -> Self {
        EdgeSet {
            edges: ArrayVec::new(),
        }
    }

    /// Just one edge.
    pub fn only(edge: Edge) -> Self {
        let mut edges = ArrayVec::new();
        edges.push(edge);
        EdgeSet { edges }
    }

    /// Adds an edge. Adding an edge that's already present does nothing.
    pub fn insert(&mut self, edge: Edge) {
        if let Err(pos) = self.edges.binary_search(&edge) {
            self.edges.insert(pos, edge);
        }
    }

    /// Is `edge` in this set?
    pub fn contains(&self, edge: Edge) -> bool {
        self.edges.contains(&edge)
    }

    /// The number of edges in this set.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Are we empty?
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// If this set has exactly one edge, returns it.
    pub fn single(&self) -> Option<Edge> {
        match self.edges.as_slice() {
            [edge] => Some(*edge),
            _ => None,
        }
    }

    /// Iterates over the edges, in stitching order.
    pub fn iter(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().copied()
    }
}

impl FromIterator<Edge> for EdgeSet {
    fn from_iter<T: IntoIterator<Item = Edge>>(iter: T) -> Self {
        let mut ret = EdgeSet::empty();
        for edge in iter {
            ret.insert(edge);
        }
        ret
    }
}

impl FromStr for EdgeSet {
    type Err = UnknownEdge;

    /// Parses either `"all"` or a comma-separated list of edge names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "all" {
            return Ok(EdgeSet::all());
        }
        s.split(',')
            .map(|name| name.trim().parse::<Edge>())
            .collect()
    }
}

impl serde::Serialize for EdgeSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.edges.iter())
    }
}

impl<'de> serde::Deserialize<'de> for EdgeSet {
    /// Accepts the string `"all"`, a comma-separated string of edge names,
    /// or a list of edge names (which may also contain `"all"`).
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Names(Vec<String>),
            Name(String),
        }

        let names = match Repr::deserialize(deserializer)? {
            Repr::Names(names) => names,
            Repr::Name(name) => vec![name],
        };
        let mut ret = EdgeSet::empty();
        for name in names {
            let parsed: EdgeSet = name.parse().map_err(serde::de::Error::custom)?;
            for edge in parsed.iter() {
                ret.insert(edge);
            }
        }
        Ok(ret)
    }
}
