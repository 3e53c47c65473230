use crate::config::{Config, SearchStrategy, load_config};
use crate::ir::NetworkSpec;
use crate::layout::compute_layout;
use crate::layout_dump::{LayoutDump, read_layout_dump, write_layout_dump};
use crate::render::{render_svg, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "mondrain",
    version,
    about = "Paints the minimal shapes of a layered network diagram"
)]
pub struct Args {
    /// Nodes per layer, e.g. `-l 3 4 3` or `-l 3,4,3`
    #[arg(
        short = 'l',
        long = "layers",
        num_args = 1..,
        value_delimiter = ',',
        required_unless_present = "from_dump"
    )]
    pub layers: Vec<usize>,

    /// Explicit x-coordinate for every layer
    #[arg(
        short = 'x',
        long = "x-locations",
        num_args = 1..,
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    pub x_locations: Option<Vec<f64>>,

    /// Only search for triangles
    #[arg(long = "no-quadrilaterals")]
    pub no_quadrilaterals: bool,

    #[arg(long = "strategy", value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Candidate cap per layer-transition; 0 lifts the cap
    #[arg(long = "max-candidates")]
    pub max_candidates: Option<u64>,

    /// Config JSON/JSON5 file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Paint a previously written layout dump instead of computing one
    #[arg(short = 'i', long = "from-dump", conflicts_with_all = ["layers", "x_locations"])]
    pub from_dump: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Fraction of shapes to fill, between 0 and 1
    #[arg(short = 'd', long = "density")]
    pub density: Option<f64>,

    /// Seed for the shape selection
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    #[arg(long = "line-thickness")]
    pub line_thickness: Option<f32>,

    #[arg(long = "node-size")]
    pub node_size: Option<f32>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    Adjacency,
    Exhaustive,
}

impl From<StrategyArg> for SearchStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Adjacency => SearchStrategy::Adjacency,
            StrategyArg::Exhaustive => SearchStrategy::Exhaustive,
        }
    }
}

pub fn run(args: &Args) -> Result<()> {
    let config = build_config(args)?;

    let dump = match args.from_dump.as_deref() {
        Some(path) => {
            info!(path:? = path; "Reading layout dump");
            read_layout_dump(path)?
        }
        None => {
            let network = network_from_args(args);
            let layout = compute_layout(&network, &config.layout)?;
            LayoutDump::from_layout(&layout)
        }
    };

    if args.output_format == OutputFormat::Json {
        return write_layout_dump(&dump, args.output.as_deref());
    }

    let mut render = config.render.clone();
    if render.seed.is_none() {
        let seed = rand::random::<u64>();
        info!(seed; "No seed given, drew one");
        render.seed = Some(seed);
    }
    let svg = render_svg(&dump, &config.theme, &render);
    match args.output_format {
        OutputFormat::Svg => write_output_svg(&svg, args.output.as_deref()),
        OutputFormat::Png => {
            let output = ensure_output(args.output.as_deref(), "png")?;
            write_png(&svg, output, &render)
        }
        OutputFormat::Json => Ok(()),
    }
}

/// Layers the CLI flags on top of the config file.
pub fn build_config(args: &Args) -> Result<Config> {
    let mut config = load_config(args.config.as_deref())?;

    if args.no_quadrilaterals {
        config.layout.search_quadrilaterals = false;
    }
    if let Some(strategy) = args.strategy {
        config.layout.strategy = strategy.into();
    }
    if let Some(limit) = args.max_candidates {
        config.layout.max_candidates = (limit > 0).then_some(limit);
    }

    if let Some(v) = args.density {
        config.render.shape_density = v;
    }
    if args.seed.is_some() {
        config.render.seed = args.seed;
    }
    if let Some(v) = args.width {
        config.render.width = v;
    }
    if let Some(v) = args.height {
        config.render.height = v;
    }
    if let Some(v) = args.line_thickness {
        config.render.line_thickness = v;
    }
    if let Some(v) = args.node_size {
        config.render.node_size = v;
    }

    config.validate()?;
    Ok(config)
}

fn network_from_args(args: &Args) -> NetworkSpec {
    let network = NetworkSpec::new(args.layers.clone());
    match &args.x_locations {
        Some(xs) => network.with_x_locations(xs.clone()),
        None => network,
    }
}

fn ensure_output<'a>(output: Option<&'a Path>, ext: &str) -> Result<&'a Path> {
    output.ok_or_else(|| anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, render: &crate::config::RenderConfig) -> Result<()> {
    crate::render::write_output_png(svg, output, render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _render: &crate::config::RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!("PNG output needs the `png` feature"))
}
