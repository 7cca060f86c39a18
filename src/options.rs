//! Options for tracing a border.

use crate::{orientation::Edge, EdgeSet, Error};

/// Controls how a border is traced.
///
/// This deserializes from the same option names that a JSON or YAML config
/// would use (`padding`, `endMargin`, `flatten`, `flattenSidesWidth`,
/// `flattenBottomsWidth` and `edges`), and any option that's missing takes
/// its default value.
///
/// ```
/// use bordersweeper::{BorderOptions, Edge, EdgeSet};
///
/// let opts = BorderOptions::default()
///     .with_padding(4.0)
///     .with_edges(EdgeSet::only(Edge::Bottom));
/// assert_eq!(opts.padding, 4.0);
/// assert!(!opts.flatten);
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BorderOptions {
    /// How far to grow every rectangle on every side before tracing.
    pub padding: f64,
    /// How far to pull in the left side of the first rectangle and the right
    /// side of the last one.
    pub end_margin: f64,
    /// Whether to fill in narrow notches.
    pub flatten: bool,
    /// The widest notch that gets filled in on the left and right edges.
    pub flatten_sides_width: f64,
    /// The widest notch that gets filled in on the top and bottom edges.
    pub flatten_bottoms_width: f64,
    /// Which edges to trace.
    pub edges: EdgeSet,
}

impl Default for BorderOptions {
    fn default() -> Self {
        BorderOptions {
            padding: 14.0,
            end_margin: 0.0,
            flatten: false,
            flatten_sides_width: 70.0,
            flatten_bottoms_width: 20.0,
            edges: EdgeSet::all(),
        }
    }
}

/// Names one of the numeric options in [`BorderOptions`], for error
/// reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptionName {
    /// [`BorderOptions::padding`].
    Padding,
    /// [`BorderOptions::end_margin`].
    EndMargin,
    /// [`BorderOptions::flatten_sides_width`].
    FlattenSidesWidth,
    /// [`BorderOptions::flatten_bottoms_width`].
    FlattenBottomsWidth,
}

impl std::fmt::Display for OptionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OptionName::Padding => "padding",
            OptionName::EndMargin => "endMargin",
            OptionName::FlattenSidesWidth => "flattenSidesWidth",
            OptionName::FlattenBottomsWidth => "flattenBottomsWidth",
        })
    }
}

impl BorderOptions {
    /// Sets the padding.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the end margin.
    pub fn with_end_margin(mut self, end_margin: f64) -> Self {
        self.end_margin = end_margin;
        self
    }

    /// Turns notch flattening on or off.
    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    /// Sets the widest notch to fill in, on the left and right edges.
    pub fn with_flatten_sides_width(mut self, width: f64) -> Self {
        self.flatten_sides_width = width;
        self
    }

    /// Sets the widest notch to fill in, on the top and bottom edges.
    pub fn with_flatten_bottoms_width(mut self, width: f64) -> Self {
        self.flatten_bottoms_width = width;
        self
    }

    /// Chooses which edges to trace.
    pub fn with_edges(mut self, edges: EdgeSet) -> Self {
        self.edges = edges;
        self
    }

    /// The flattening width that applies to `edge`.
    pub fn flatten_width(&self, edge: Edge) -> f64 {
        if edge.is_side() {
            self.flatten_sides_width
        } else {
            self.flatten_bottoms_width
        }
    }

    /// Checks that every numeric option is finite and non-negative.
    pub fn validate(&self) -> Result<(), Error> {
        let numbers = [
            (OptionName::Padding, self.padding),
            (OptionName::EndMargin, self.end_margin),
            (OptionName::FlattenSidesWidth, self.flatten_sides_width),
            (OptionName::FlattenBottomsWidth, self.flatten_bottoms_width),
        ];
        for (name, value) in numbers {
            if value.is_nan() {
                return Err(Error::NaN);
            }
            if value.is_infinite() {
                return Err(Error::Infinity);
            }
            if value < 0.0 {
                return Err(Error::NegativeOption(name));
            }
        }
        Ok(())
    }
}
