use crate::config::RenderConfig;
use crate::layout_dump::LayoutDump;
use crate::theme::Theme;
use anyhow::Result;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::fmt::Write as _;
use std::path::Path;

/// Picks which shapes get filled.
///
/// Shape indices are shuffled with a `StdRng` seeded from `seed` and the first
/// `round(count * density)` are kept, so the same seed always paints the same
/// shapes in the same colors.
pub fn select_shapes(count: usize, density: f64, seed: u64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..count).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    let keep = ((count as f64) * density.clamp(0.0, 1.0)).round() as usize;
    indices.truncate(keep.min(count));
    indices
}

/// Maps diagram coordinates onto the canvas, y pointing up.
struct Viewport {
    min_x: f64,
    min_y: f64,
    scale_x: f64,
    scale_y: f64,
    margin: f64,
    height: f64,
}

impl Viewport {
    fn fit(dump: &LayoutDump, config: &RenderConfig) -> Self {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for [x, y] in dump.node_points() {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        if !min_x.is_finite() {
            (min_x, min_y, max_x, max_y) = (0.0, 0.0, 1.0, 1.0);
        }

        let margin = f64::from(config.margin);
        let inner_w = (f64::from(config.width) - 2.0 * margin).max(1.0);
        let inner_h = (f64::from(config.height) - 2.0 * margin).max(1.0);
        let span = |lo: f64, hi: f64| if hi - lo > 0.0 { hi - lo } else { 1.0 };
        Viewport {
            min_x,
            min_y,
            scale_x: inner_w / span(min_x, max_x),
            scale_y: inner_h / span(min_y, max_y),
            margin,
            height: f64::from(config.height),
        }
    }

    fn map(&self, [x, y]: [f64; 2]) -> (f64, f64) {
        (
            self.margin + (x - self.min_x) * self.scale_x,
            self.height - self.margin - (y - self.min_y) * self.scale_y,
        )
    }
}

pub fn render_svg(dump: &LayoutDump, theme: &Theme, config: &RenderConfig) -> String {
    let mut svg = String::new();
    let (width, height) = (config.width, config.height);
    let viewport = Viewport::fit(dump, config);

    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    );
    let _ = write!(
        svg,
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(&config.background)
    );

    let seed = config.seed.unwrap_or_default();
    let selected = select_shapes(dump.shapes.len(), config.shape_density, seed);
    debug!(
        shapes = dump.shapes.len(), filled = selected.len(), seed;
        "Selected shapes to paint",
    );

    svg.push_str("<g class=\"shapes\">");
    for (slot, &idx) in selected.iter().enumerate() {
        let shape = &dump.shapes[idx];
        let Some(color) = theme.palette.get(slot % theme.palette.len().max(1)) else {
            break;
        };
        let points = shape
            .points
            .iter()
            .map(|&p| {
                let (x, y) = viewport.map(p);
                format!("{x:.3},{y:.3}")
            })
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(
            svg,
            "<polygon class=\"{}\" points=\"{points}\" fill=\"{}\" stroke=\"none\"/>",
            shape.kind,
            escape_xml(color)
        );
    }
    svg.push_str("</g>");

    svg.push_str("<g class=\"edges\">");
    for edge in &dump.edges {
        let (x1, y1) = viewport.map(edge.from);
        let (x2, y2) = viewport.map(edge.to);
        let _ = write!(
            svg,
            "<line id=\"{}\" x1=\"{x1:.3}\" y1=\"{y1:.3}\" x2=\"{x2:.3}\" y2=\"{y2:.3}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            escape_xml(&edge.id),
            escape_xml(&theme.line_color),
            config.line_thickness
        );
    }
    svg.push_str("</g>");

    svg.push_str("<g class=\"nodes\">");
    let radius = config.node_size / 2.0;
    for point in dump.node_points() {
        let (cx, cy) = viewport.map(point);
        let _ = write!(
            svg,
            "<circle cx=\"{cx:.3}\" cy=\"{cy:.3}\" r=\"{radius}\" fill=\"{}\"/>",
            escape_xml(&theme.node_color)
        );
    }
    svg.push_str("</g>");

    svg.push_str("</svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    if let Some(size) = usvg::Size::from_wh(render_cfg.width, render_cfg.height) {
        opt.default_size = size;
    }

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
