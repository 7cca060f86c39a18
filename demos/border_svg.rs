//! Draws the border around a cluster of rectangles as an SVG document.
//!
//! The rectangles come either from a YAML (or JSON) file containing a list of
//! `{id, leftX, rightX, topY, bottomY}` records, or from one of the built-in
//! generators.

use std::path::PathBuf;

use anyhow::bail;
use clap::{Args, Parser};
use svg::{
    node::element::{path::Data, Group, Path as SvgPath, Rectangle},
    Document,
};

use bordersweeper::{generators, BorderOptions, EdgeSet, Rect};

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
enum Example {
    Paragraph,
    Checkerboard,
    Staircase,
}

#[derive(Parser)]
struct Cli {
    #[arg(long)]
    output: PathBuf,

    #[command(flatten)]
    input: Input,

    /// A YAML file of options, using the same names as the library's config.
    #[arg(long)]
    options: Option<PathBuf>,

    #[arg(long)]
    padding: Option<f64>,

    #[arg(long)]
    end_margin: Option<f64>,

    #[arg(long)]
    flatten: bool,

    /// "all", or a comma-separated list of edges.
    #[arg(long)]
    edges: Option<EdgeSet>,

    #[command(flatten)]
    style: Style,

    /// Draw the input rectangles underneath the border.
    #[arg(long)]
    show_rects: bool,

    /// Log the tracer's decisions to stderr.
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Input {
    input: Option<PathBuf>,

    #[arg(long)]
    example: Option<Example>,
}

#[derive(Args, Debug)]
struct Style {
    #[arg(long, default_value = "none")]
    fill: String,

    #[arg(long, default_value = "black")]
    stroke: String,

    #[arg(long, default_value_t = 1.0)]
    stroke_width: f64,

    #[arg(long, default_value_t = 1.0)]
    stroke_opacity: f64,

    #[arg(long)]
    stroke_dasharray: Option<String>,

    #[arg(long)]
    group_class: Option<String>,

    #[arg(long)]
    path_class: Option<String>,
}

fn get_rects(input: &Input) -> anyhow::Result<Vec<Rect<String>>> {
    match (&input.input, &input.example) {
        (Some(path), None) => {
            let data = std::fs::read_to_string(path)?;
            Ok(serde_yaml::from_str(&data)?)
        }
        (None, Some(example)) => {
            let rects = match example {
                Example::Paragraph => generators::paragraph(12, 9),
                Example::Checkerboard => generators::checkerboard(6),
                Example::Staircase => generators::staircase(12),
            };
            Ok(rects
                .into_iter()
                .map(|r| Rect::new(r.id.to_string(), r.left_x, r.right_x, r.top_y, r.bottom_y))
                .collect())
        }
        _ => bail!("exactly one of an input file or --example is required"),
    }
}

fn get_options(args: &Cli) -> anyhow::Result<BorderOptions> {
    let mut opts = match &args.options {
        Some(path) => serde_yaml::from_str(&std::fs::read_to_string(path)?)?,
        None => BorderOptions::default(),
    };
    if let Some(padding) = args.padding {
        opts.padding = padding;
    }
    if let Some(end_margin) = args.end_margin {
        opts.end_margin = end_margin;
    }
    if args.flatten {
        opts.flatten = true;
    }
    if let Some(edges) = &args.edges {
        opts.edges = edges.clone();
    }
    Ok(opts)
}

pub fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let rects = get_rects(&args.input)?;
    let opts = get_options(&args)?;
    let outline = bordersweeper::border(&rects, &opts)?;
    tracing::info!(rects = rects.len(), points = outline.len(), "traced border");

    let bbox = rects
        .iter()
        .map(Rect::to_kurbo)
        .chain(outline.points().map(|p| kurbo::Rect::from_points(p, p)))
        .reduce(|a, b| a.union(b))
        .unwrap_or_default();
    let margin = args.style.stroke_width * 2.0;
    let mut document = Document::new().set(
        "viewBox",
        (
            bbox.x0 - margin,
            bbox.y0 - margin,
            bbox.width() + 2.0 * margin,
            bbox.height() + 2.0 * margin,
        ),
    );

    if args.show_rects {
        for r in &rects {
            document = document.add(
                Rectangle::new()
                    .set("x", r.left_x)
                    .set("y", r.top_y)
                    .set("width", r.width())
                    .set("height", r.height())
                    .set("fill", "gray")
                    .set("opacity", 0.3),
            );
        }
    }

    let mut points = outline.points();
    if let Some(p) = points.next() {
        let mut data = Data::new().move_to((p.x, p.y));
        for p in points {
            data = data.line_to((p.x, p.y));
        }
        let style = &args.style;
        let mut path = SvgPath::new()
            .set("d", data)
            .set("fill", style.fill.as_str())
            .set("stroke", style.stroke.as_str())
            .set("stroke-width", style.stroke_width)
            .set("stroke-opacity", style.stroke_opacity)
            .set("stroke-linejoin", "round");
        if let Some(dash) = &style.stroke_dasharray {
            path = path.set("stroke-dasharray", dash.as_str());
        }
        if let Some(class) = &style.path_class {
            path = path.set("class", class.as_str());
        }
        let mut group = Group::new().add(path);
        if let Some(class) = &style.group_class {
            group = group.set("class", class.as_str());
        }
        document = document.add(group);
    }

    svg::save(&args.output, &document)?;

    Ok(())
}
