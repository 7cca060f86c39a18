//! Geometric primitives: input rectangles, output coordinates, and padding.

use crate::Error;

/// An axis-aligned rectangle, tagged with a caller-supplied identifier.
///
/// The documentation and method naming assume that larger `y` values are
/// down, as in screen coordinates: `top_y` is the smaller of the two
/// vertical bounds.
///
/// A valid rectangle has `left_x <= right_x` and `top_y <= bottom_y`, and all
/// of its bounds are finite. Rectangles are never mutated by this crate;
/// padding produces a new one.
#[derive(Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect<Id> {
    /// An opaque identifier, copied onto every coordinate that this
    /// rectangle produces.
    pub id: Id,
    /// Horizontal position of the left side.
    pub left_x: f64,
    /// Horizontal position of the right side.
    pub right_x: f64,
    /// Vertical position of the top side.
    pub top_y: f64,
    /// Vertical position of the bottom side.
    pub bottom_y: f64,
}

impl<Id: std::fmt::Debug> std::fmt::Debug for Rect<Id> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?}: x[{:?}, {:?}] y[{:?}, {:?}]",
            self.id, self.left_x, self.right_x, self.top_y, self.bottom_y
        )
    }
}

impl<Id> Rect<Id> {
    /// Create a new rectangle.
    ///
    /// The bounds are taken as given; call [`Rect::validate`] (or let
    /// [`border`](crate::border) do it) to check them.
    pub fn new(id: Id, left_x: f64, right_x: f64, top_y: f64, bottom_y: f64) -> Self {
        Rect {
            id,
            left_x,
            right_x,
            top_y,
            bottom_y,
        }
    }

    /// Checks that all bounds are finite and correctly ordered.
    ///
    /// `index` is this rectangle's position in its input sequence; it is
    /// only used for error reporting.
    pub fn validate(&self, index: usize) -> Result<(), Error> {
        let bounds = [self.left_x, self.right_x, self.top_y, self.bottom_y];
        if bounds.iter().any(|b| b.is_nan()) {
            return Err(Error::NaN);
        }
        if bounds.iter().any(|b| b.is_infinite()) {
            return Err(Error::Infinity);
        }
        if self.left_x > self.right_x || self.top_y > self.bottom_y {
            return Err(Error::MalformedRect { index });
        }
        Ok(())
    }

    /// The width of this rectangle.
    pub fn width(&self) -> f64 {
        self.right_x - self.left_x
    }

    /// The height of this rectangle.
    pub fn height(&self) -> f64 {
        self.bottom_y - self.top_y
    }

    /// Converts to a `kurbo::Rect`, dropping the identifier.
    pub fn to_kurbo(&self) -> kurbo::Rect {
        kurbo::Rect::new(self.left_x, self.top_y, self.right_x, self.bottom_y)
    }
}

impl<Id: Clone> Rect<Id> {
    /// Returns a copy of this rectangle grown by `padding` on every side.
    ///
    /// The left and top sides are clamped at zero, so padding never produces
    /// negative coordinates (unless they were negative to begin with, in which
    /// case they're clamped to zero as well).
    pub fn padded(&self, padding: f64) -> Self {
        let left_x = (self.left_x - padding).max(0.0);
        let top_y = (self.top_y - padding).max(0.0);
        Rect {
            id: self.id.clone(),
            left_x,
            // A rectangle entirely left of (or above) the origin gets
            // squashed onto it.
            right_x: (self.right_x + padding).max(left_x),
            top_y,
            bottom_y: (self.bottom_y + padding).max(top_y),
        }
    }
}

/// Pads every rectangle in `rects`, then pulls the ends of the sequence in by
/// `end_margin`.
///
/// The first rectangle (in input order) has its left side moved right by
/// `end_margin`, and the last one has its right side moved left. A sequence
/// of one rectangle gets both. The shift stops at the opposite side, so an
/// oversized margin collapses a rectangle to zero width instead of turning it
/// inside out.
pub fn pad_rects<Id: Clone>(rects: &[Rect<Id>], padding: f64, end_margin: f64) -> Vec<Rect<Id>> {
    let mut ret: Vec<_> = rects.iter().map(|r| r.padded(padding)).collect();
    if end_margin > 0.0 {
        if let Some(first) = ret.first_mut() {
            first.left_x = (first.left_x + end_margin).min(first.right_x);
        }
        if let Some(last) = ret.last_mut() {
            last.right_x = (last.right_x - end_margin).max(last.left_x);
        }
    }
    ret
}

/// A point on an outline, tagged with the identifier of the rectangle that
/// was being visited when the point was emitted.
///
/// The tag is provenance only: two coordinates are at the same place if their
/// `x` and `y` agree, regardless of their ids.
#[derive(Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate<Id> {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
    /// Which rectangle this came from.
    pub id: Id,
}

impl<Id: std::fmt::Debug> std::fmt::Debug for Coordinate<Id> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})@{:?}", self.x, self.y, self.id)
    }
}

impl<Id> Coordinate<Id> {
    /// Create a new coordinate.
    pub fn new(x: f64, y: f64, id: Id) -> Self {
        Coordinate { x, y, id }
    }

    /// Do `self` and `other` sit at the same place?
    pub fn same_place(&self, other: &Coordinate<Id>) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Swaps the two axes.
    ///
    /// The left and right edges are traced in a transposed frame, and this
    /// takes their coordinates back.
    pub fn transposed(self) -> Self {
        Coordinate {
            x: self.y,
            y: self.x,
            id: self.id,
        }
    }

    /// Converts to a `kurbo::Point`, dropping the identifier.
    pub fn to_kurbo(&self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::num::tests::Reasonable;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    impl Reasonable for Rect<usize> {
        type Strategy = BoxedStrategy<Rect<usize>>;

        fn reasonable() -> Self::Strategy {
            (f64::reasonable(), f64::reasonable(), 0u8..40, 0u8..40)
                .prop_map(|(x, y, w, h)| {
                    Rect::new(0, x, x + f64::from(w) * 2.5, y, y + f64::from(h) * 2.5)
                })
                .boxed()
        }
    }

    /// A strategy for a sequence of rectangles, with ids given by their position.
    pub fn rects(max_len: usize) -> BoxedStrategy<Vec<Rect<usize>>> {
        prop::collection::vec(Rect::reasonable(), 0..max_len)
            .prop_map(|mut rs| {
                for (i, r) in rs.iter_mut().enumerate() {
                    r.id = i;
                }
                rs
            })
            .boxed()
    }

    #[test]
    fn validation() {
        assert!(Rect::new((), 0.0, 1.0, 0.0, 1.0).validate(0).is_ok());
        assert!(Rect::new((), 1.0, 1.0, 1.0, 1.0).validate(0).is_ok());
        assert_matches!(
            Rect::new((), 2.0, 1.0, 0.0, 1.0).validate(3),
            Err(Error::MalformedRect { index: 3 })
        );
        assert_matches!(
            Rect::new((), 0.0, 1.0, 2.0, 1.0).validate(0),
            Err(Error::MalformedRect { index: 0 })
        );
        assert_matches!(
            Rect::new((), f64::NAN, 1.0, 0.0, 1.0).validate(0),
            Err(Error::NaN)
        );
        assert_matches!(
            Rect::new((), 0.0, f64::INFINITY, 0.0, 1.0).validate(0),
            Err(Error::Infinity)
        );
    }

    #[test]
    fn padding_clamps() {
        let r = Rect::new("a", 5.0, 10.0, 20.0, 30.0).padded(14.0);
        assert_eq!(r, Rect::new("a", 0.0, 24.0, 6.0, 44.0));
    }

    #[test]
    fn end_margin() {
        let rects = vec![
            Rect::new(0, 0.0, 10.0, 0.0, 10.0),
            Rect::new(1, 20.0, 30.0, 0.0, 10.0),
            Rect::new(2, 40.0, 50.0, 0.0, 10.0),
        ];
        let padded = pad_rects(&rects, 0.0, 3.0);
        assert_eq!(padded[0].left_x, 3.0);
        assert_eq!(padded[0].right_x, 10.0);
        assert_eq!(padded[1], rects[1]);
        assert_eq!(padded[2].left_x, 40.0);
        assert_eq!(padded[2].right_x, 47.0);

        let single = pad_rects(&rects[..1], 0.0, 3.0);
        assert_eq!(single[0].left_x, 3.0);
        assert_eq!(single[0].right_x, 7.0);

        let squashed = pad_rects(&rects[..1], 0.0, 100.0);
        assert!(squashed[0].left_x <= squashed[0].right_x);
        assert!(squashed[0].validate(0).is_ok());
    }

    #[test]
    fn padding_leaves_input_alone() {
        let rects = vec![Rect::new(0, 1.0, 2.0, 3.0, 4.0)];
        let _ = pad_rects(&rects, 14.0, 1.0);
        assert_eq!(rects[0], Rect::new(0, 1.0, 2.0, 3.0, 4.0));
    }

    proptest! {
        #[test]
        fn padding_is_non_negative(rs in rects(20), padding in 0.0..50.0f64, margin in 0.0..20.0f64) {
            for r in pad_rects(&rs, padding, margin) {
                prop_assert!(r.left_x >= 0.0);
                prop_assert!(r.top_y >= 0.0);
                prop_assert!(r.validate(0).is_ok());
            }
        }
    }
}
