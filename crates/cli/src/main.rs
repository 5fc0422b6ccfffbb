#![deny(unsafe_code)]
//! CLI binary for the electric-border engine.
//!
//! Subcommands:
//! - `render` — run the animation for N synthetic frames, write a PNG
//! - `samples` — dump the displaced outline of one frame
//! - `list` — print available style presets

mod error;

use clap::{Args, Parser, Subcommand};
use electric_border_core::{
    displaced_contour, BorderController, BorderSettings, BorderStyle, ManualScheduler, Srgba,
    SurfaceDimensions,
};
use electric_border_raster::{snapshot, RasterSurface};
use error::CliError;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "electric-border", about = "Procedural animated border renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` wins.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Host box the border is drawn around.
#[derive(Args)]
struct HostArgs {
    /// Host content width in logical pixels.
    #[arg(short = 'W', long, default_value_t = 300.0)]
    width: f64,

    /// Host content height in logical pixels.
    #[arg(short = 'H', long, default_value_t = 150.0)]
    height: f64,

    /// Device pixel ratio (capped at 2).
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,
}

/// Border style and tuning.
#[derive(Args)]
struct StyleArgs {
    /// Style preset (default, contact, card, warning, skills).
    #[arg(short, long, default_value = "default")]
    preset: String,

    /// Style overrides as a JSON object, e.g. '{"chaos": 0.2, "borderRadius": 32}'.
    #[arg(long)]
    style: Option<String>,

    /// Stroke color as #rrggbb or #rrggbbaa.
    #[arg(long)]
    color: Option<String>,

    /// Animation speed multiplier.
    #[arg(long)]
    speed: Option<f64>,

    /// Noise amplitude.
    #[arg(long)]
    chaos: Option<f64>,

    /// Corner radius in logical pixels.
    #[arg(long)]
    radius: Option<f64>,

    /// Engine tuning overrides as a flat JSON object, e.g. '{"octaves": 4, "perimeter": "bounding"}'.
    #[arg(long)]
    settings: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Animate for N frames and write the last one as a PNG.
    Render {
        #[command(flatten)]
        host: HostArgs,

        #[command(flatten)]
        style: StyleArgs,

        /// Number of frames to run.
        #[arg(short, long, default_value_t = 60)]
        frames: usize,

        /// Synthetic frame rate used to timestamp frames.
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// Output file path.
        #[arg(short, long, default_value = "border.png")]
        output: PathBuf,
    },
    /// Print the displaced outline points of a single frame.
    Samples {
        #[command(flatten)]
        host: HostArgs,

        #[command(flatten)]
        style: StyleArgs,

        /// Animation time (seconds, already speed-scaled) to sample at.
        #[arg(short, long, default_value_t = 0.0)]
        time: f64,
    },
    /// List available style presets.
    List,
}

fn parse_json(flag: &str, raw: &str) -> Result<serde_json::Value, CliError> {
    serde_json::from_str(raw).map_err(|e| CliError::Input(format!("invalid {flag} JSON: {e}")))
}

/// Milliseconds between synthetic frames.
fn frame_interval(fps: f64) -> Result<f64, CliError> {
    if fps.is_finite() && fps > 0.0 {
        Ok(1000.0 / fps)
    } else {
        Err(CliError::Input(format!("--fps must be positive, got {fps}")))
    }
}

/// Preset, then `--style` JSON, then individual flags.
fn resolve(args: &StyleArgs) -> Result<(BorderStyle, BorderSettings), CliError> {
    let mut style = BorderStyle::preset(&args.preset)?;
    if let Some(raw) = &args.style {
        style = style.merged_with(&parse_json("--style", raw)?)?;
    }
    if let Some(hex) = &args.color {
        style.color = Srgba::from_hex(hex)?;
    }
    if let Some(speed) = args.speed {
        style.speed = speed;
    }
    if let Some(chaos) = args.chaos {
        style.chaos = chaos;
    }
    if let Some(radius) = args.radius {
        style.border_radius = radius;
    }

    let mut settings = BorderSettings::default();
    if let Some(raw) = &args.settings {
        settings = settings.merged_with(&parse_json("--settings", raw)?);
    }
    Ok((style.normalized(), settings))
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let presets = BorderStyle::list_presets()
                .iter()
                .map(|name| BorderStyle::preset(name).map(|s| (*name, s)))
                .collect::<Result<Vec<_>, _>>()?;
            if cli.json {
                let info: serde_json::Map<String, serde_json::Value> = presets
                    .iter()
                    .map(|(name, style)| Ok((name.to_string(), serde_json::to_value(style)?)))
                    .collect::<Result<_, serde_json::Error>>()?;
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Presets:");
                for (name, s) in presets {
                    println!(
                        "  {name:<8} color {} speed {} chaos {} radius {}",
                        s.color.to_hex(),
                        s.speed,
                        s.chaos,
                        s.border_radius
                    );
                }
            }
        }
        Command::Render {
            host,
            style,
            frames,
            fps,
            output,
        } => {
            let frame_ms = frame_interval(fps)?;
            let (style, settings) = resolve(&style)?;

            let mut controller = BorderController::new(
                style,
                settings,
                ManualScheduler::new(),
                Some(RasterSurface::new()),
            );
            controller.set_device_pixel_ratio(host.dpr);
            controller.on_resized(host.width, host.height);
            controller.on_visibility_changed(true);

            let mut samples = 0;
            for k in 1..=frames {
                if let Some(frame) = controller.pump(k as f64 * frame_ms) {
                    samples = frame.report.sample_count;
                }
            }
            info!(
                frames = controller.frames_drawn(),
                elapsed = controller.clock().elapsed(),
                "animation finished"
            );

            let surface = controller
                .surface()
                .ok_or(CliError::Engine(electric_border_core::BorderError::InvalidDimensions))?;
            snapshot::write_png(surface, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": surface.width(),
                    "height": surface.height(),
                    "frames": controller.frames_drawn(),
                    "sample_count": samples,
                    "elapsed": controller.clock().elapsed(),
                    "style": controller.style(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {}x{} border ({} frames, {samples} samples) -> {}",
                    surface.width(),
                    surface.height(),
                    controller.frames_drawn(),
                    output.display()
                );
            }
        }
        Command::Samples { host, style, time } => {
            let (style, settings) = resolve(&style)?;
            let dims = SurfaceDimensions::from_host(host.width, host.height, host.dpr, &settings.render)
                .ok_or(CliError::Engine(electric_border_core::BorderError::InvalidDimensions))?;
            let rect = dims.content_rect(style.border_radius);
            let points = displaced_contour(&rect, time, style.chaos, &settings);

            if cli.json {
                let info = serde_json::json!({
                    "surface": { "width": dims.width, "height": dims.height },
                    "radius": rect.radius(),
                    "sample_count": points.len() - 1,
                    "points": points.iter().map(|p| [p.x, p.y]).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for p in &points {
                    println!("{:.3} {:.3}", p.x, p.y);
                }
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
