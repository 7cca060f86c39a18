//! Utilities for fuzz and/or property testing using `arbitrary`.

use arbitrary::Unstructured;

use crate::{BorderOptions, Coordinate, Edge, EdgeSet, Path, Rect};

/// Generate an arbitrary float in some range.
pub fn float_in_range(
    start: f64,
    end: f64,
    u: &mut Unstructured<'_>,
) -> Result<f64, arbitrary::Error> {
    let num: u32 = u.arbitrary()?;
    let t = num as f64 / u32::MAX as f64;
    Ok((1.0 - t) * start + t * end)
}

/// Generate a float on a coarse grid.
///
/// The tracer only does interesting things when rectangles share sides,
/// which almost never happens with uniformly random floats.
fn grid_float(max_steps: u16, u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    Ok(f64::from(u.int_in_range(0..=max_steps)?) * 2.5)
}

/// Generate an arbitrary (valid) rectangle.
pub fn rect(id: usize, u: &mut Unstructured<'_>) -> Result<Rect<usize>, arbitrary::Error> {
    let left_x = grid_float(128, u)?;
    let top_y = grid_float(128, u)?;
    let width = grid_float(32, u)?;
    let height = grid_float(32, u)?;
    Ok(Rect::new(id, left_x, left_x + width, top_y, top_y + height))
}

/// Generate rows of rectangles that look like the words of a paragraph.
///
/// The rows all have the same height and spacing, but each row has its own
/// indent and its own number of words.
pub fn paragraph(u: &mut Unstructured<'_>) -> Result<Vec<Rect<usize>>, arbitrary::Error> {
    let rows = u.int_in_range(1..=8)?;
    let line_height = 2.5 + grid_float(8, u)?;
    let leading = grid_float(4, u)?;
    let space = grid_float(4, u)?;

    let mut ret = Vec::new();
    let mut top_y = 0.0;
    for _ in 0..rows {
        let mut x = grid_float(8, u)?;
        let words = u.int_in_range(1..=10)?;
        for _ in 0..words {
            let width = 2.5 + grid_float(16, u)?;
            ret.push(Rect::new(ret.len(), x, x + width, top_y, top_y + line_height));
            x += width + space;
        }
        top_y += line_height + leading;
    }
    Ok(ret)
}

/// Generate an arbitrary collection of rectangles.
///
/// Half the time this is a [`paragraph`], and the rest of the time it's a
/// scattering of unrelated rectangles. Either way, every rectangle's id is its
/// position.
pub fn layout(u: &mut Unstructured<'_>) -> Result<Vec<Rect<usize>>, arbitrary::Error> {
    if u.arbitrary()? {
        paragraph(u)
    } else {
        let n = u.int_in_range(0..=24)?;
        (0..n).map(|i| rect(i, u)).collect()
    }
}

/// Generate an arbitrary set of edges.
pub fn edge_set(u: &mut Unstructured<'_>) -> Result<EdgeSet, arbitrary::Error> {
    if u.arbitrary()? {
        return Ok(EdgeSet::all());
    }
    let mut ret = EdgeSet::empty();
    for edge in Edge::ALL {
        if u.arbitrary()? {
            ret.insert(edge);
        }
    }
    Ok(ret)
}

/// Generate arbitrary (valid) options.
pub fn options(u: &mut Unstructured<'_>) -> Result<BorderOptions, arbitrary::Error> {
    Ok(BorderOptions {
        padding: grid_float(8, u)?,
        end_margin: grid_float(4, u)?,
        flatten: u.arbitrary()?,
        flatten_sides_width: float_in_range(0.0, 100.0, u)?,
        flatten_bottoms_width: float_in_range(0.0, 40.0, u)?,
        edges: edge_set(u)?,
    })
}

/// Generate a path made of horizontal and vertical steps, on a small grid.
///
/// Like a traced edge, it has plenty of repeated points and collinear runs.
pub fn manhattan_path(u: &mut Unstructured<'_>) -> Result<Path<usize>, arbitrary::Error> {
    let len = u.int_in_range(0..=32)?;
    let mut x = grid_float(8, u)?;
    let mut y = grid_float(8, u)?;
    let mut ret = Vec::with_capacity(len);
    for id in 0..len {
        if u.arbitrary()? {
            x = grid_float(8, u)?;
        } else {
            y = grid_float(8, u)?;
        }
        ret.push(Coordinate::new(x, y, id));
    }
    Ok(ret.into())
}
