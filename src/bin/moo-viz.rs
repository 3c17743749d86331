use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use moo_viz::renderers::{Pcp, Scatter};
use moo_viz::storage;
use moo_viz::{
    AxisLabels, Bounds, LegendSpec, NumberFormatter, Plot, PlotConfig, Renderer, SaveOptions,
    SeriesKind, SeriesOptions, ShowOptions, TitleSpec,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "moo-viz",
    version,
    about = "Plot multi-objective optimization results as scatter or parallel coordinate charts"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scatter plot (2D, 3D, or a pairwise matrix for more objectives).
    Scatter(ScatterArgs),
    /// Parallel coordinate plot.
    Pcp(PcpArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Scatter,
    Line,
    LinePoints,
}

impl From<KindArg> for SeriesKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Scatter => SeriesKind::Scatter,
            KindArg::Line => SeriesKind::Line,
            KindArg::LinePoints => SeriesKind::LinePoints,
        }
    }
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Input files (CSV or JSON), one dataset each, labelled by file stem.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Output path (.svg or .png).
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// JSON configuration file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    /// Figure title; repeat to give one title per subplot.
    #[arg(long)]
    title: Vec<String>,
    /// Axis labels separated by comma (e.g., cost,weight,risk).
    #[arg(long)]
    labels: Option<String>,
    /// Symbol for generated axis labels (default f gives f1, f2, ...).
    #[arg(long)]
    symbol: Option<String>,
    /// Draw a legend in each subplot.
    #[arg(long, default_value_t = false)]
    legend: bool,
    #[arg(long, default_value_t = false)]
    tight_layout: bool,
    /// Colormap name (tab10, office, viridis, plasma; append _r to reverse).
    #[arg(long)]
    cmap: Option<String>,
    /// Flip normalized values.
    #[arg(long, default_value_t = false)]
    reverse: bool,
    /// Normalization bounds as lower:upper, each a comma-separated list (e.g., 0,0:1,10).
    #[arg(long)]
    bounds: Option<String>,
    /// Locale for printed numbers (en, de, fr, ...).
    #[arg(long)]
    locale: Option<String>,
    /// Open a viewer window after drawing.
    #[arg(long, default_value_t = false)]
    show: bool,
}

#[derive(Args, Debug)]
struct ScatterArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, value_enum, default_value_t = KindArg::Scatter)]
    kind: KindArg,
    /// 3D view angle as elevation,azimuth in degrees.
    #[arg(long, default_value = "45,45", allow_hyphen_values = true)]
    angle: String,
}

#[derive(Args, Debug)]
struct PcpArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Do not print the bounds at the ends of each axis.
    #[arg(long, default_value_t = false)]
    no_bounds: bool,
    /// Normalize all objectives by one global range.
    #[arg(long, default_value_t = false)]
    global_range: bool,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn parse_numbers(s: &str) -> Result<Vec<f64>> {
    parse_list(s)
        .iter()
        .map(|x| x.parse::<f64>().with_context(|| format!("invalid number: {x}")))
        .collect()
}

fn parse_bounds(s: &str) -> Result<Bounds> {
    let (lo, hi) = s
        .split_once(':')
        .ok_or_else(|| anyhow!("invalid --bounds, expected LOWER:UPPER"))?;
    Ok(Bounds::new(parse_numbers(lo)?, parse_numbers(hi)?))
}

fn parse_angle(s: &str) -> Result<(f64, f64)> {
    match parse_numbers(s)?.as_slice() {
        [elevation, azimuth] => Ok((*elevation, *azimuth)),
        _ => bail!("invalid --angle, expected ELEVATION,AZIMUTH"),
    }
}

fn build_config(args: &CommonArgs) -> Result<PlotConfig> {
    let mut config = match &args.config {
        Some(path) => PlotConfig::from_json_file(path)?,
        None => PlotConfig::default(),
    };
    if args.width.is_some() || args.height.is_some() {
        let (w, h) = config.fig_size;
        config.fig_size = (args.width.unwrap_or(w), args.height.unwrap_or(h));
    }
    match args.title.as_slice() {
        [] => {}
        [single] => config.title = Some(TitleSpec::single(single.clone())),
        many => config.title = Some(TitleSpec::per_axes(many.iter().cloned())),
    }
    if let Some(labels) = &args.labels {
        config.axis_labels = AxisLabels::Explicit(parse_list(labels));
    } else if let Some(symbol) = &args.symbol {
        config.axis_labels = AxisLabels::Symbol(symbol.clone());
    }
    if args.legend {
        config.legend = LegendSpec::shown();
    }
    if args.tight_layout {
        config.tight_layout = true;
    }
    if let Some(name) = &args.cmap {
        config = config.with_cmap_name(name.clone());
    }
    if args.reverse {
        config.reverse = true;
    }
    if let Some(bounds) = &args.bounds {
        config.bounds = Some(parse_bounds(bounds)?);
    }
    if let Some(locale) = &args.locale {
        config.number_to_text = NumberFormatter::locale(locale);
    }
    Ok(config)
}

fn run<R: Renderer>(args: &CommonArgs, mut config: PlotConfig, renderer: R) -> Result<()> {
    if args.out.is_none() && !args.show {
        bail!("nothing to do: pass --out and/or --show");
    }

    let mut datasets = Vec::new();
    for path in &args.inputs {
        let matrix = storage::load_matrix(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        log::debug!("loaded {} with shape {:?}", path.display(), matrix.values.dim());
        if args.labels.is_none()
            && args.symbol.is_none()
            && let Some(header) = matrix.header.clone()
        {
            config.axis_labels = AxisLabels::Explicit(header);
        }
        datasets.push((matrix.values, name));
    }

    let mut plot = Plot::new(config, renderer)?;
    for (values, name) in datasets {
        plot.add(values, SeriesOptions::new().label(name));
    }

    if let Some(out) = &args.out {
        plot.save(out, SaveOptions::default())?;
        eprintln!("Wrote plot to {}", out.display());
    }
    if args.show {
        plot.show(&ShowOptions::default())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Scatter(args) => {
            let config = build_config(&args.common)?;
            let (elevation, azimuth) = parse_angle(&args.angle)?;
            let scatter = Scatter::default()
                .with_angle(elevation, azimuth)
                .with_kind(args.kind.into());
            run(&args.common, config, scatter)
        }
        Command::Pcp(args) => {
            let config = build_config(&args.common)?;
            let pcp = Pcp::default()
                .with_show_bounds(!args.no_bounds)
                .with_normalize_each_axis(!args.global_range);
            run(&args.common, config, pcp)
        }
    }
}
