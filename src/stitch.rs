//! Joining the four edges into one closed outline.
//!
//! The traced edges overlap: the end of the bottom edge usually runs along
//! the same points as the start of the right edge, and so on around the
//! outline. Stitching walks each edge until it meets the next one, follows
//! along while they agree, and then hands over.
//!
//! Where two consecutive edges disagree about the corner they share, one of
//! them has to win. We use a local test that only looks at the next couple
//! of points on each side; it handles the corners that rectangle layouts
//! actually produce, but it's a heuristic.

use crate::{log::debug, orientation::Edge, Coordinate, Path};

/// The traced paths of all four edges, in real coordinates.
///
/// Edges that weren't traced are empty.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgePaths<Id> {
    paths: [Path<Id>; 4],
}

// Derived impls would require `Id: Default`.
impl<Id> Default for EdgePaths<Id> {
    fn default() -> Self {
        EdgePaths {
            paths: std::array::from_fn(|_| Path::new()),
        }
    }
}

impl<Id> EdgePaths<Id> {
    /// Four empty paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// The path of one edge.
    pub fn get(&self, edge: Edge) -> &Path<Id> {
        &self.paths[edge.index()]
    }

    /// Replaces the path of one edge.
    pub fn set(&mut self, edge: Edge, path: Path<Id>) {
        self.paths[edge.index()] = path;
    }

    /// Iterates over the edges and their paths, in stitching order.
    pub fn iter(&self) -> impl Iterator<Item = (Edge, &Path<Id>)> + '_ {
        Edge::ALL.into_iter().zip(self.paths.iter())
    }

    /// Are all the paths empty?
    pub fn is_empty(&self) -> bool {
        self.paths.iter().all(Path::is_empty)
    }
}

impl<Id> std::ops::Index<Edge> for EdgePaths<Id> {
    type Output = Path<Id>;

    fn index(&self, edge: Edge) -> &Path<Id> {
        self.get(edge)
    }
}

impl<Id> std::ops::IndexMut<Edge> for EdgePaths<Id> {
    fn index_mut(&mut self, edge: Edge) -> &mut Path<Id> {
        &mut self.paths[edge.index()]
    }
}

/// Joins the edges into a single closed path.
///
/// Edges are joined in the order bottom, right, top, left, starting over at
/// the bottom. Empty edges are skipped: the edges on either side of a gap
/// are joined by a straight line, and so are the last and first edges when
/// they aren't neighbors. A lone edge gets closed the same way.
pub fn stitch<Id: Clone>(paths: &EdgePaths<Id>) -> Path<Id> {
    let after_gap = Edge::ALL
        .into_iter()
        .find(|&edge| !paths[edge].is_empty() && paths[edge.prev()].is_empty());
    match after_gap {
        Some(first) => chain(paths, first),
        None if paths.is_empty() => Path::new(),
        None => around(paths),
    }
}

/// Stitches all four edges, which goes around a bit more than once.
fn around<Id: Clone>(paths: &EdgePaths<Id>) -> Path<Id> {
    let mut out = Vec::new();
    let mut start = 0;
    for edge in Edge::ALL {
        start = hand_over(
            edge,
            paths[edge].coords(),
            paths[edge.next()].coords(),
            start,
            &mut out,
        );
    }

    // Start the loop where it ends, unless that leaves nothing but copies of
    // the last point.
    let head = out.last().and_then(|last| {
        let head = out.iter().position(|c| c.same_place(last))?;
        out[head..].iter().any(|c| !c.same_place(last)).then_some(head)
    });
    match head {
        Some(head) => {
            out.drain(..head);
        }
        // The edges never met up again.
        None => close(&mut out),
    }
    Path::from(out).dedup()
}

/// Stitches the non-empty edges, going around from `first`, which must
/// follow an empty edge.
fn chain<Id: Clone>(paths: &EdgePaths<Id>, first: Edge) -> Path<Id> {
    let edges: Vec<Edge> = std::iter::successors(Some(first), |edge| Some(edge.next()))
        .take(4)
        .filter(|&edge| !paths[edge].is_empty())
        .collect();

    let mut out = Vec::new();
    let mut start = 0;
    for (i, &edge) in edges.iter().enumerate() {
        let coords = paths[edge].coords();
        match edges.get(i + 1) {
            Some(&next) if next == edge.next() => {
                start = hand_over(edge, coords, paths[next].coords(), start, &mut out);
            }
            _ => {
                debug!(%edge, "no next edge, bridging the gap");
                out.extend(coords.iter().skip(start).cloned());
                start = 0;
            }
        }
    }
    close(&mut out);
    Path::from(out).dedup()
}

/// Finishes with a straight line back to the first point, unless we're
/// already there.
fn close<Id: Clone>(out: &mut Vec<Coordinate<Id>>) {
    let first = match out.first() {
        Some(first) => first.clone(),
        None => return,
    };
    let closed = out.len() > 1 && out.last().is_some_and(|last| last.same_place(&first));
    if !closed {
        out.push(first);
    }
}

/// Appends the part of `coords` (starting at `start`) that comes before
/// `next` takes over, along with the overlap between them.
///
/// Returns the position in `next` where the overlap ended, which is where
/// the next call should start.
fn hand_over<Id: Clone>(
    edge: Edge,
    coords: &[Coordinate<Id>],
    next: &[Coordinate<Id>],
    start: usize,
    out: &mut Vec<Coordinate<Id>>,
) -> usize {
    let frame = edge.frame();
    let xy = |c: &Coordinate<Id>| frame.project(c.x, c.y);

    let mut n = 0;
    let mut overlapping = false;
    let mut diverged = false;
    let mut rejoin = None;
    let mut next_next = None;
    let mut following = None;

    for c in start..coords.len() {
        let current = &coords[c];
        let (cx, cy) = xy(current);
        let nc = next.get(n).map(xy);

        if !overlapping {
            out.push(current.clone());
        }

        if nc == Some((cx, cy)) {
            overlapping = true;
            if diverged && rejoin == Some((cx, cy)) {
                debug!(%edge, x = current.x, y = current.y, "rejoined");
                rejoin = None;
                diverged = false;
            }
            out.push(current.clone());
            n += 1;
            continue;
        }

        if overlapping && !diverged {
            if let Some(p) = next.get(n + 1) {
                next_next = Some(xy(p));
            }
            if let Some(p) = coords.get(c + 1) {
                following = Some(xy(p));
            }

            if let (Some((nx, ny)), Some((nnx, _)), Some((_, fy))) = (nc, next_next, following) {
                // The next edge turns off ahead, while we go up.
                let turns_ahead = cx == nx && frame.is_after(nnx, nx) && frame.is_above(cy, ny);
                // We turn up before reaching the next edge's point.
                let turns_up = cy == ny && frame.is_before(cx, nx) && frame.is_above(fy, cy);
                if turns_ahead || turns_up {
                    debug!(%edge, x = current.x, y = current.y, "diverged");
                    diverged = true;
                    n += 1;
                    rejoin = next.get(n).map(xy);
                }
            }

            if let (Some((nx, ny)), Some((nnx, _))) = (nc, next_next) {
                if c + 1 < coords.len()
                    && cx == nx
                    && frame.is_before(nnx, nx)
                    && frame.is_below(ny, cy)
                {
                    // The next edge makes a detour below us. Take it, until it
                    // comes back to where we're going.
                    debug!(%edge, x = current.x, y = current.y, "following detour");
                    let target = xy(&coords[c + 1]);
                    while let Some(p) = next.get(n) {
                        out.push(p.clone());
                        n += 1;
                        if xy(p) == target {
                            break;
                        }
                    }
                }
            }
        }

        if overlapping && diverged {
            out.push(current.clone());
        }
    }
    n
}
