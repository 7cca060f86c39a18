#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;
#[cfg(any(test, feature = "arbitrary"))]
pub mod arbtests;
pub mod bucket;
#[cfg(feature = "debug-svg")]
pub mod debug_svg;
pub mod flatten;
#[cfg(feature = "generators")]
pub mod generators;
mod geom;
mod log;
mod num;
mod options;
pub mod orientation;
mod path;
pub mod stitch;
pub mod trace;

pub use geom::{pad_rects, Coordinate, Rect};
pub use options::{BorderOptions, OptionName};
pub use orientation::{Edge, EdgeSet};
pub use path::Path;
pub use stitch::{stitch, EdgePaths};

use bucket::BucketedIndex;

#[derive(Clone, Copy, Debug, PartialEq)]
/// The input rectangles or options were faulty.
pub enum Error {
    /// At least one of the inputs was infinite.
    Infinity,
    /// At least one of the inputs was not a number.
    NaN,
    /// A rectangle's sides were the wrong way around.
    MalformedRect {
        /// The position of the offending rectangle in the input.
        index: usize,
    },
    /// A numeric option was negative.
    NegativeOption(OptionName),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Infinity => write!(f, "one of the inputs was infinite"),
            Error::NaN => write!(f, "one of the inputs had a NaN"),
            Error::MalformedRect { index } => {
                write!(f, "rectangle {index} has its sides the wrong way around")
            }
            Error::NegativeOption(name) => write!(f, "option {name} was negative"),
        }
    }
}

impl std::error::Error for Error {}

/// Validates everything, and applies the padding and end margin.
fn prepare<Id: Clone>(rects: &[Rect<Id>], options: &BorderOptions) -> Result<Vec<Rect<Id>>, Error> {
    options.validate()?;
    for (index, r) in rects.iter().enumerate() {
        r.validate(index)?;
    }
    Ok(pad_rects(rects, options.padding, options.end_margin))
}

/// Traces, flattens and simplifies one edge of already-padded rectangles,
/// and puts it back in real coordinates.
fn finished_edge<Id: Clone>(padded: &[Rect<Id>], edge: Edge, options: &BorderOptions) -> Path<Id> {
    let index = BucketedIndex::new(padded, edge);
    let frame = index.frame();
    let mut coords = trace::trace(&index).into_vec();
    if options.flatten {
        flatten::flatten(&mut coords, frame, options.flatten_width(edge));
    }
    let path = Path::from(coords).dedup();
    log::debug!(%edge, len = path.len(), "traced edge");
    if frame.transposed() {
        path.transposed()
    } else {
        path
    }
}

/// Computes the outline of one edge of a cluster of rectangles.
///
/// This pads the rectangles according to `options` and traces `edge`,
/// whether or not `options.edges` includes it. The result is an open path
/// in real coordinates.
pub fn edge_path<Id: Clone>(
    rects: &[Rect<Id>],
    edge: Edge,
    options: &BorderOptions,
) -> Result<Path<Id>, Error> {
    let padded = prepare(rects, options)?;
    Ok(finished_edge(&padded, edge, options))
}

/// Computes the outlines of all the edges selected by `options.edges`.
///
/// The edges that weren't selected are left empty.
pub fn edge_paths<Id: Clone>(
    rects: &[Rect<Id>],
    options: &BorderOptions,
) -> Result<EdgePaths<Id>, Error> {
    let padded = prepare(rects, options)?;
    let mut ret = EdgePaths::new();
    for edge in options.edges.iter() {
        ret.set(edge, finished_edge(&padded, edge, options));
    }
    Ok(ret)
}

/// Computes the border of a cluster of rectangles.
///
/// If `options.edges` selects just one edge, this is that edge's open path.
/// Otherwise, the selected edges are stitched into a closed outline.
///
/// ```
/// use bordersweeper::{border, BorderOptions, Rect};
///
/// let rects = [Rect::new("a", 10.0, 50.0, 10.0, 50.0)];
/// let outline = border(&rects, &BorderOptions::default().with_padding(0.0)).unwrap();
/// let points: Vec<_> = outline.iter().map(|c| (c.x, c.y)).collect();
/// assert_eq!(
///     points,
///     vec![(10.0, 50.0), (50.0, 50.0), (50.0, 10.0), (10.0, 10.0), (10.0, 50.0)]
/// );
/// ```
pub fn border<Id: Clone>(rects: &[Rect<Id>], options: &BorderOptions) -> Result<Path<Id>, Error> {
    let mut paths = edge_paths(rects, options)?;
    if let Some(edge) = options.edges.single() {
        return Ok(std::mem::take(&mut paths[edge]));
    }
    Ok(stitch(&paths))
}
