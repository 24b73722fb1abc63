use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "eventkit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one name tag PNG per attendee row.
    Nametags(NametagArgs),
    /// Render the fold-to-stand "Speaker Seats" table tent.
    Placard(PlacardArgs),
    /// Convert SRT to ASS and burn it into a video (requires `ffmpeg`/`ffprobe` on PATH).
    Burnin(BurninArgs),
    /// Print which font files would be used, with family name and SHA-256.
    Fonts(FontArgs),
}

#[derive(Parser, Debug)]
struct NametagArgs {
    /// Attendee CSV with `이름`, `소속` and `종류` columns.
    #[arg(long, default_value = "attendee/attendees.csv")]
    attendees: PathBuf,

    /// Directory holding `qr_code.png`, `sponsor_logo.png` and optionally `rocket_icon.png`.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Output directory.
    #[arg(long, default_value = "nametags")]
    out: PathBuf,

    /// JSON file overriding the event texts.
    #[arg(long)]
    branding: Option<PathBuf>,

    /// Multiplier applied to the 359x461 reference design.
    #[arg(long, default_value_t = eventkit::DEFAULT_SCALE)]
    scale: f64,

    /// Font file to try before the system list (repeatable).
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlacardArgs {
    /// Output path; `.pdf` writes a PDF page, anything else a PNG.
    #[arg(long, default_value = "speaker-seats.pdf")]
    out: PathBuf,

    /// Text printed on both faces of the tent.
    #[arg(long)]
    label: Option<String>,

    /// Raster resolution of the page.
    #[arg(long, default_value_t = 150.0)]
    dpi: f64,

    /// Font file to try before the system list (repeatable).
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct BurninArgs {
    /// Input video.
    video: PathBuf,

    /// Input SRT subtitles.
    srt: PathBuf,

    /// Output video; defaults to `<video dir>/../burnin_output/<stem>_burnin.mp4`.
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FontArgs {
    /// Font file to try before the system list (repeatable).
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Nametags(args) => cmd_nametags(args),
        Command::Placard(args) => cmd_placard(args),
        Command::Burnin(args) => cmd_burnin(args),
        Command::Fonts(args) => cmd_fonts(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_nametags(args: NametagArgs) -> anyhow::Result<()> {
    let load = eventkit::load_attendees(&args.attendees)?;
    if load.skipped > 0 {
        tracing::warn!(skipped = load.skipped, "attendee rows skipped");
    }

    let branding = match &args.branding {
        Some(path) => eventkit::EventBranding::from_path(path)?,
        None => eventkit::EventBranding::default(),
    };
    let layout = eventkit::NametagLayout::reference().scaled(args.scale)?;
    let assets = eventkit::NametagAssets::load(&args.assets)?;
    let fonts = eventkit::FontChain::with_overrides(&args.fonts);
    let face = eventkit::resolve_font(&fonts, eventkit::FontStyle::Regular)?;

    let mut renderer = eventkit::NametagRenderer::new(layout, branding, &assets, face)?;
    let batch = eventkit::render_nametag_batch(&mut renderer, &load.attendees, &args.out)?;

    eprintln!(
        "wrote {} name tags to {}",
        batch.written.len(),
        args.out.display()
    );
    if batch.overwritten > 0 {
        eprintln!("replaced {} existing files", batch.overwritten);
    }
    Ok(())
}

fn cmd_placard(args: PlacardArgs) -> anyhow::Result<()> {
    let mut layout = eventkit::PlacardLayout {
        dpi: args.dpi,
        ..eventkit::PlacardLayout::default()
    };
    if let Some(label) = args.label {
        layout.label = label;
    }
    if !layout.dpi.is_finite() || layout.dpi <= 0.0 {
        anyhow::bail!("--dpi must be finite and > 0");
    }

    let fonts = eventkit::FontChain::with_overrides(&args.fonts);
    let frame = eventkit::render_placard(&layout, &fonts)?.finish();
    eventkit::write_placard(&frame, &layout, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_burnin(args: BurninArgs) -> anyhow::Result<()> {
    let report = eventkit::run_burnin(&args.video, &args.srt, args.output.as_deref())?;

    eprintln!("wrote {}", report.markup.display());
    eprintln!(
        "wrote {} ({:.1} MB)",
        report.output.display(),
        report.size_mib()
    );
    Ok(())
}

fn cmd_fonts(args: FontArgs) -> anyhow::Result<()> {
    let fonts = eventkit::FontChain::with_overrides(&args.fonts);
    let mut engine = eventkit::TextEngine::new();

    eprintln!("font diagnostics:");
    for style in [eventkit::FontStyle::Regular, eventkit::FontStyle::Bold] {
        let face = eventkit::resolve_font(&fonts, style)?;
        let family = engine
            .register(&face)
            .with_context(|| format!("register {style} font '{}'", face.source))?;
        eprintln!("  {style}:");
        eprintln!("    font_source: {}", face.source);
        eprintln!("    family:      {family}");
        eprintln!("    sha256:      {}", face.sha256_hex());
    }
    Ok(())
}
