use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cdgplay", version)]
struct Cli {
    /// Log decoder diagnostics (repeat for more detail). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the display at one point in time as a PNG.
    Frame(FrameArgs),
    /// Render a fixed-rate PNG sequence.
    Frames(FramesArgs),
    /// Print a packet census of a stream.
    Info(InfoArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input CD+G stream.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Presentation time in seconds.
    #[arg(long)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Key out the background color.
    #[arg(long)]
    force_key: bool,

    /// Drop the border and keep the 288x192 display area.
    #[arg(long)]
    crop: bool,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Input CD+G stream.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for `frame_NNNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Start time in seconds.
    #[arg(long, default_value_t = 0.0)]
    start: f64,

    /// End time in seconds (exclusive); defaults to the stream length.
    #[arg(long)]
    end: Option<f64>,

    /// Key out the background color.
    #[arg(long)]
    force_key: bool,

    /// Drop the border and keep the 288x192 display area.
    #[arg(long)]
    crop: bool,

    /// Only write frames whose picture changed.
    #[arg(long)]
    changed_only: bool,

    /// Frames rendered and held in memory before encoding.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Encode PNGs on a rayon thread pool.
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input CD+G stream.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Info(args) => cmd_info(args),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "cdgplay=debug",
        _ => "cdgplay=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut renderer = cdgplay::Renderer::from_path(&args.in_path)?;
    let opts = cdgplay::RenderOptions {
        force_key: args.force_key,
    };
    let frame = renderer.render(args.time, opts)?;

    cdgplay::write_png(
        &args.out,
        &frame,
        &cdgplay::ExportOptions {
            crop_to_display: args.crop,
        },
    )?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut renderer = cdgplay::Renderer::from_path(&args.in_path)?;
    let opts = cdgplay::SequenceOptions {
        fps: args.fps,
        start_secs: args.start,
        end_secs: args.end,
        render: cdgplay::RenderOptions {
            force_key: args.force_key,
        },
        changed_only: args.changed_only,
        chunk_size: args.chunk_size,
    };

    let stats = cdgplay::write_png_sequence(
        &mut renderer,
        &args.out_dir,
        &opts,
        &cdgplay::ExportOptions {
            crop_to_display: args.crop,
        },
        args.parallel,
    )?;

    eprintln!(
        "wrote {} of {} frames to {}",
        stats.frames_emitted,
        stats.frames_total,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read cdg '{}'", args.in_path.display()))?;
    let summary = cdgplay::StreamSummary::scan(&bytes);

    if args.json {
        println!("{}", summary.to_json_pretty()?);
    } else {
        print_summary(&args.in_path, &summary);
    }

    summary.require_graphics()?;
    Ok(())
}

fn print_summary(path: &std::path::Path, summary: &cdgplay::StreamSummary) {
    println!("file:           {}", path.display());
    println!("sha256:         {}", summary.sha256);
    println!("packets:        {}", summary.packets);
    println!("duration:       {:.3}s", summary.duration_secs);
    if summary.trailing_bytes > 0 {
        println!("trailing bytes: {}", summary.trailing_bytes);
    }
    println!("graphics:       {}", summary.graphics_packets);
    println!("foreign:        {}", summary.foreign_packets);
    println!("unknown:        {}", summary.unknown_packets);
    if let Some(t) = summary.last_instruction_secs {
        println!("last graphics:  {t:.3}s");
    }
    println!("instructions:");
    for (kind, n) in &summary.instructions {
        println!("  {kind:<20} {n}");
    }
}
