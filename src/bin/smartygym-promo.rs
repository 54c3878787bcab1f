use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use smartygym_promo::{
    CaptureObserver, CapturePipeline, CaptureState, EncoderBackend, FfmpegBackend, MemoryBackend,
    PromoConfig, SteppedClock, Surface, SystemClock, resolve_font,
};

#[derive(Parser, Debug)]
#[command(name = "smartygym-promo", version, about = "Render the SmartyGym promo video")]
struct Cli {
    /// Configuration JSON (defaults to the built-in promo).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Capture the whole promo into a video file.
    Render(RenderArgs),
    /// Print the preferred supported video format.
    Probe(ProbeArgs),
    /// Print the scene schedule, or the position at one instant, as JSON.
    Timeline(TimelineArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Elapsed time in milliseconds.
    #[arg(long)]
    t_ms: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Download label; defaults to the configured label.
    #[arg(long)]
    label: Option<String>,

    /// Output directory.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Pace frames in real time instead of stepping one frame interval per frame.
    #[arg(long, default_value_t = false)]
    realtime: bool,

    /// Encoder backend.
    #[arg(long, value_enum, default_value_t = EncoderKind::Ffmpeg)]
    encoder: EncoderKind,
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Encoder backend.
    #[arg(long, value_enum, default_value_t = EncoderKind::Ffmpeg)]
    encoder: EncoderKind,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Resolve a single instant instead of dumping the schedule.
    #[arg(long)]
    at: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum EncoderKind {
    /// System `ffmpeg` (WebM/VP9 preferred).
    Ffmpeg,
    /// In-process test encoder.
    Memory,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = match &cli.config {
        Some(path) => PromoConfig::from_path(path)?,
        None => PromoConfig::default(),
    };
    match cli.cmd {
        Command::Frame(args) => cmd_frame(&cfg, args),
        Command::Render(args) => cmd_render(&cfg, args),
        Command::Probe(args) => cmd_probe(args),
        Command::Timeline(args) => cmd_timeline(&cfg, args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn backend(kind: EncoderKind) -> Box<dyn EncoderBackend> {
    match kind {
        EncoderKind::Ffmpeg => Box::new(FfmpegBackend::new()),
        EncoderKind::Memory => Box::new(MemoryBackend::new()),
    }
}

fn surface(cfg: &PromoConfig) -> anyhow::Result<Surface> {
    let font = resolve_font(cfg.font_path.as_deref())?;
    Ok(Surface::new(cfg.canvas, font.as_ref())?)
}

fn cmd_frame(cfg: &PromoConfig, args: FrameArgs) -> anyhow::Result<()> {
    let compositor = cfg.compositor()?;
    let mut surface = surface(cfg)?;
    let assets = smartygym_promo::RenderAssets {
        logo: smartygym_promo::load_logo_with_timeout(
            &cfg.logo_source(),
            cfg.capture_options().asset_timeout,
        )
        .image(),
    };
    let frame = compositor.render_frame(&mut surface, &assets, args.t_ms)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

struct ProgressLine;

impl CaptureObserver for ProgressLine {
    fn on_state(&mut self, state: CaptureState) {
        eprintln!("[{state}]");
    }

    fn on_progress(&mut self, pct: f64) {
        tracing::debug!(pct, "progress");
    }
}

fn cmd_render(cfg: &PromoConfig, args: RenderArgs) -> anyhow::Result<()> {
    let compositor = cfg.compositor()?;
    let surface = surface(cfg)?;
    let opts = cfg.capture_options();
    let backend = backend(args.encoder);
    let mut pipeline = if args.realtime {
        CapturePipeline::new(compositor, surface, backend, SystemClock::new(cfg.fps), opts)
    } else {
        CapturePipeline::new(compositor, surface, backend, SteppedClock::new(cfg.fps), opts)
    };

    let label = args.label.as_deref().unwrap_or(&cfg.label);
    let artifact = match pipeline.generate(label, &mut ProgressLine) {
        Ok(artifact) => artifact,
        Err(e) => {
            let status = pipeline.status();
            if let Some(msg) = status.message {
                eprintln!("{msg}");
            }
            return Err(e.into());
        }
    };
    let path = artifact.save_to_dir(&args.out_dir)?;
    eprintln!("wrote {} ({})", path.display(), artifact.mime);
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    match backend(args.encoder).probe() {
        Some(mime) => println!("{mime}"),
        None => println!(
            "{}",
            smartygym_promo::CaptureFailure::UnsupportedEnvironment.user_message()
        ),
    }
    Ok(())
}

fn cmd_timeline(cfg: &PromoConfig, args: TimelineArgs) -> anyhow::Result<()> {
    let timeline = cfg.timeline();
    let json = match args.at {
        Some(t) => serde_json::to_string_pretty(&timeline.resolve(t))?,
        None => serde_json::to_string_pretty(&serde_json::json!({
            "total_ms": timeline.total_ms(),
            "scenes": timeline.scenes(),
        }))?,
    };
    println!("{json}");
    Ok(())
}
