//! SVG dumps, for looking at what the tracer did.

use svg::node::element::{path::Data, Circle, Path as SvgPath, Rectangle};

use crate::{EdgePaths, Path, Rect};

const EDGE_COLORS: [&str; 4] = ["#005F73", "#CA6702", "#0A9396", "#AE2012"];

fn path_data<Id>(path: &Path<Id>) -> Option<Data> {
    let mut points = path.iter();
    let p = points.next()?;
    let mut data = Data::new().move_to((p.x, p.y));
    for p in points {
        data = data.line_to((p.x, p.y));
    }
    Some(data)
}

/// Draws the input rectangles (faintly), each traced edge in its own color,
/// and the stitched outline (if any) on top, with a dot at each vertex.
pub fn document<Id>(
    rects: &[Rect<Id>],
    edges: &EdgePaths<Id>,
    outline: Option<&Path<Id>>,
) -> svg::Document {
    let xs = rects
        .iter()
        .flat_map(|r| [r.left_x, r.right_x])
        .chain(edges.iter().flat_map(|(_, p)| p.iter().map(|c| c.x)));
    let ys = rects
        .iter()
        .flat_map(|r| [r.top_y, r.bottom_y])
        .chain(edges.iter().flat_map(|(_, p)| p.iter().map(|c| c.y)));
    let (min_x, max_x) = extent(xs);
    let (min_y, max_y) = extent(ys);
    let stroke_width = (max_x - min_x).max(max_y - min_y).max(1.0) / 256.0;
    let pad = 8.0 * stroke_width;

    let mut document = svg::Document::new().set(
        "viewBox",
        (
            min_x - pad,
            min_y - pad,
            max_x - min_x + 2.0 * pad,
            max_y - min_y + 2.0 * pad,
        ),
    );

    for r in rects {
        document = document.add(
            Rectangle::new()
                .set("x", r.left_x)
                .set("y", r.top_y)
                .set("width", r.width())
                .set("height", r.height())
                .set("fill", "black")
                .set("opacity", 0.2),
        );
    }

    for (edge, path) in edges.iter() {
        if let Some(data) = path_data(path) {
            document = document.add(
                SvgPath::new()
                    .set("d", data)
                    .set("class", edge.name())
                    .set("stroke", EDGE_COLORS[edge.index()])
                    .set("stroke-width", 2.0 * stroke_width)
                    .set("stroke-linejoin", "round")
                    .set("opacity", 0.6)
                    .set("fill", "none"),
            );
        }
    }

    if let Some(outline) = outline {
        if let Some(data) = path_data(outline) {
            document = document.add(
                SvgPath::new()
                    .set("d", data)
                    .set("stroke", "black")
                    .set("stroke-width", stroke_width)
                    .set("stroke-linejoin", "round")
                    .set("fill", "none"),
            );
        }
        for c in outline {
            document = document.add(
                Circle::new()
                    .set("cx", c.x)
                    .set("cy", c.y)
                    .set("r", 2.0 * stroke_width)
                    .set("fill", "black"),
            );
        }
    }

    document
}

fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min <= max {
        (min, max)
    } else {
        (0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{border, edge_paths, BorderOptions};

    #[test]
    fn draws_everything() {
        let rects = [
            Rect::new(0, 0.0, 20.0, 0.0, 10.0),
            Rect::new(1, 10.0, 30.0, 0.0, 30.0),
        ];
        let opts = BorderOptions::default();
        let edges = edge_paths(&rects, &opts).unwrap();
        let outline = border(&rects, &opts).unwrap();
        let doc = document(&rects, &edges, Some(&outline)).to_string();
        assert_eq!(doc.matches("<rect").count(), 2);
        assert_eq!(doc.matches("<path").count(), 5);
        assert_eq!(doc.matches("<circle").count(), outline.len());
    }

    #[test]
    fn empty() {
        let rects: [Rect<()>; 0] = [];
        let doc = document(&rects, &EdgePaths::new(), None).to_string();
        assert!(!doc.contains("<path"));
    }
}
