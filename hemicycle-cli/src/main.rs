use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "hemicycle", version)]
struct Cli {
    /// Log more (repeat for trace output).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate the data files, then list unresolved parties.
    Check(CheckArgs),
    /// Write the computed layout as JSON.
    Layout(ChartArgs),
    /// Write the chart as an SVG document.
    Svg(ChartArgs),
    /// Write the chart as a PNG image.
    Png(PngArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Republics JSON.
    #[arg(long)]
    republics: PathBuf,

    /// Currents JSON.
    #[arg(long)]
    currents: PathBuf,

    /// Date standing for "today" (YYYY-MM-DD); defaults to the system clock.
    #[arg(long)]
    now: Option<chrono::NaiveDate>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Events JSON.
    #[arg(long)]
    events: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ChartArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Graph width in pixels.
    #[arg(long, default_value_t = 1000.0)]
    width: f64,

    /// Pixels per year.
    #[arg(long, default_value_t = 28.0)]
    row_height: f64,

    /// Give bars the full row and collapse transitions.
    #[arg(long, default_value_t = false)]
    no_transitions: bool,

    /// Show only these currents (repeatable). Defaults to every current.
    #[arg(long = "visible", value_name = "CURRENT")]
    visible: Vec<String>,

    /// Hide these currents (repeatable).
    #[arg(long = "hide", value_name = "CURRENT")]
    hide: Vec<String>,

    /// Color parties by coalition.
    #[arg(long, default_value_t = false)]
    coalitions: bool,

    /// Output path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PngArgs {
    #[command(flatten)]
    chart: ChartArgs,

    /// Raster scale factor.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Layout(args) => cmd_layout(args),
        Command::Svg(args) => cmd_svg(args),
        Command::Png(args) => cmd_png(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load(input: &InputArgs) -> anyhow::Result<hemicycle::ChartData> {
    let republics = hemicycle::RepublicsFile::from_path(&input.republics)
        .with_context(|| format!("load republics '{}'", input.republics.display()))?;
    let currents = hemicycle::CurrentsFile::from_path(&input.currents)
        .with_context(|| format!("load currents '{}'", input.currents.display()))?;
    let clock = input
        .now
        .map_or_else(hemicycle::TimelineClock::system, hemicycle::TimelineClock::at_date);
    Ok(hemicycle::ChartData::prepare(&republics, &currents, clock)?)
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let data = load(&args.input)?;
    if let Some(path) = &args.events {
        let events = hemicycle::EventsFile::from_path(path)
            .with_context(|| format!("load events '{}'", path.display()))?;
        eprintln!("{} events", events.events.len());
    }

    let legislatures: usize = data.republics().iter().map(|r| r.legislatures.len()).sum();
    eprintln!(
        "{} republics, {} legislatures, {} currents",
        data.republics().len(),
        legislatures,
        data.registry().len()
    );
    for gap in data.resolution_gaps() {
        println!(
            "unresolved: {} legislature {}: {}",
            gap.republic, gap.legislature, gap.party
        );
    }
    Ok(())
}

fn compute(args: &ChartArgs) -> anyhow::Result<hemicycle::ChartLayout> {
    let data = load(&args.input)?;
    let mut visible = if args.visible.is_empty() {
        data.all_visible()
    } else {
        hemicycle::VisibleCurrents::only(args.visible.iter().map(String::as_str))
    };
    for name in &args.hide {
        visible.remove(name);
    }
    for name in visible.iter() {
        if data.registry().by_name(name).is_none() {
            tracing::warn!(current = name, "unknown current in visibility set");
        }
    }

    let options = hemicycle::LayoutOptions {
        graph_width: args.width,
        row_height: args.row_height,
        transitions_visible: !args.no_transitions,
    };
    Ok(hemicycle::compute_chart_layout(&data, &visible, &options)?)
}

fn svg_options(args: &ChartArgs) -> hemicycle::SvgOptions {
    hemicycle::SvgOptions {
        coalition_view: args.coalitions,
        ..hemicycle::SvgOptions::default()
    }
}

fn create_parent(out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_layout(args: ChartArgs) -> anyhow::Result<()> {
    let layout = compute(&args)?;
    let json = serde_json::to_vec_pretty(&layout).context("serialize layout")?;
    create_parent(&args.out)?;
    std::fs::write(&args.out, json)
        .with_context(|| format!("write layout '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_svg(args: ChartArgs) -> anyhow::Result<()> {
    let layout = compute(&args)?;
    let svg = hemicycle::render_svg(&layout, &svg_options(&args));
    create_parent(&args.out)?;
    std::fs::write(&args.out, svg)
        .with_context(|| format!("write svg '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_png(args: PngArgs) -> anyhow::Result<()> {
    let chart = &args.chart;
    let layout = compute(chart)?;
    let svg = hemicycle::render_svg(&layout, &svg_options(chart));

    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    let opts = usvg::Options {
        fontdb: std::sync::Arc::new(fontdb),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse svg tree")?;

    let width = ((tree.size().width() * args.scale).ceil() as u32).max(1);
    let height = ((tree.size().height() * args.scale).ceil() as u32).max(1);
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .with_context(|| format!("allocate {width}x{height} pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(args.scale, args.scale),
        &mut pixmap.as_mut(),
    );

    create_parent(&chart.out)?;
    image::save_buffer_with_format(
        &chart.out,
        pixmap.data(),
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", chart.out.display()))?;

    eprintln!("wrote {}", chart.out.display());
    Ok(())
}
