//! Property checks over arbitrary inputs.
//!
//! Each check panics if the property fails, and returns an error only if it
//! ran out of input. They're run by the unit tests (through `arbtest`) and by
//! the fuzz targets.

use arbitrary::Unstructured;

use crate::{arbitrary as arb, flatten, pad_rects, Edge, Path, Rect};

fn assert_in_bounds(path: &Path<usize>, rects: &[Rect<usize>]) {
    let left = rects.iter().map(|r| r.left_x).fold(f64::INFINITY, f64::min);
    let right = rects.iter().map(|r| r.right_x).fold(f64::NEG_INFINITY, f64::max);
    let top = rects.iter().map(|r| r.top_y).fold(f64::INFINITY, f64::min);
    let bottom = rects.iter().map(|r| r.bottom_y).fold(f64::NEG_INFINITY, f64::max);
    for c in path {
        assert!(left <= c.x && c.x <= right, "{c:?} outside [{left}, {right}]");
        assert!(top <= c.y && c.y <= bottom, "{c:?} outside [{top}, {bottom}]");
        assert!(c.id < rects.len(), "{c:?} has an unknown id");
    }
}

/// Traces every edge of an arbitrary layout, and stitches them.
///
/// Every path should be simplified and inside the padded bounding box. As
/// long as some rectangle has an area, a stitched outline should end where
/// it starts, whichever edges it was stitched from.
pub fn border(u: &mut Unstructured<'_>) -> Result<(), arbitrary::Error> {
    let rects = arb::layout(u)?;
    let opts = arb::options(u)?;
    let padded = pad_rects(&rects, opts.padding, opts.end_margin);

    let paths = crate::edge_paths(&rects, &opts).expect("valid input");
    for (edge, path) in paths.iter() {
        assert!(path.is_simplified(), "{edge}: {path:?}");
        assert_in_bounds(path, &padded);
        assert_eq!(path.is_empty(), rects.is_empty() || !opts.edges.contains(edge));
    }

    let outline = crate::border(&rects, &opts).expect("valid input");
    assert!(outline.is_simplified(), "{outline:?}");
    assert_in_bounds(&outline, &padded);
    assert_eq!(outline.clone().dedup(), outline);
    let has_area = padded.iter().any(|r| r.width() > 0.0 && r.height() > 0.0);
    if has_area && opts.edges.len() > 1 {
        assert!(outline.len() >= 3, "{:?}: {outline:?}", opts.edges);
        assert!(outline.is_closed(), "{:?}: {outline:?}", opts.edges);
    }
    Ok(())
}

/// Simplifies an arbitrary path.
pub fn dedup(u: &mut Unstructured<'_>) -> Result<(), arbitrary::Error> {
    let path = arb::manhattan_path(u)?;
    let orig_len = path.len();
    let first = path.first().cloned();
    let once = path.dedup();
    assert!(once.is_simplified(), "{once:?}");
    assert!(once.len() <= orig_len);
    assert_eq!(once.first().cloned(), first);
    assert_eq!(once.clone().dedup(), once);
    Ok(())
}

/// Flattens an arbitrary path along an arbitrary edge.
///
/// Flattening only ever moves points along the secondary axis, to levels
/// that were already in the path.
pub fn flatten(u: &mut Unstructured<'_>) -> Result<(), arbitrary::Error> {
    let path = arb::manhattan_path(u)?;
    let edge = *u.choose(&Edge::ALL)?;
    let width = arb::float_in_range(0.0, 40.0, u)?;

    let before = path.into_vec();
    let mut after = before.clone();
    flatten::flatten(&mut after, edge.frame(), width);

    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(&after) {
        assert_eq!(b.x, a.x);
        assert_eq!(b.id, a.id);
        assert!(before.iter().any(|c| c.y == a.y));
    }
    Ok(())
}
