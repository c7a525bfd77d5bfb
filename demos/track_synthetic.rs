//! Tracks a synthetic ring drifting across a textured background and
//! prints the tracked box next to the ground truth.
//!
//! Usage: `cargo run --example track_synthetic -- [frames] [boundary] [config.json]`
//! where `boundary` is `shift` or `clamp`. Set `RUST_LOG=mossetrack_rs=trace`
//! to see the per-frame displacements.

use indicatif::{ProgressBar, ProgressStyle};
use mossetrack_rs::{
    BoundaryPolicy, BoundingBox, GrayFrame, MosseTracker, TrackError, TrackerConfig,
};
use nalgebra::DMatrix;
use std::{env, error::Error, fs};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const FRAME_WIDTH: usize = 160;
const FRAME_HEIGHT: usize = 120;
const WINDOW: usize = 24;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        print_usage();
        return Ok(());
    }
    let frames = args
        .get(1)
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(60);
    let mut config = match args.get(3) {
        Some(path) => serde_json::from_str::<TrackerConfig>(&fs::read_to_string(path)?)?,
        None => TrackerConfig::default(),
    };
    if let Some(boundary) = args.get(2) {
        config = config.with_boundary(parse_boundary(boundary)?);
    }
    info!(?config, frames, "starting synthetic track");

    let (mut x, mut y) = (20.0, 40.0);
    let start = BoundingBox::new(x as usize, y as usize, WINDOW, WINDOW);
    let mut tracker = MosseTracker::init_with_config(&scene(x, y)?, start, config)?;

    let progress = ProgressBar::new(frames as u64);
    let style = ProgressStyle::with_template(
        "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
    )?
    .progress_chars("=>-");
    progress.set_style(style);
    progress.set_message("tracking");

    let mut worst = 0.0f64;
    for i in 1..=frames {
        // gentle curve: 2 px/frame right, drifting up then down
        x += 2.0;
        y += if i < frames / 2 { -0.5 } else { 0.5 };
        let frame = scene(x, y)?;
        match tracker.next(&frame) {
            Ok(bbox) => {
                let err = (bbox.x() as f64 - x).hypot(bbox.y() as f64 - y);
                worst = worst.max(err);
                progress.set_message(format!(
                    "box ({}, {}) truth ({:.1}, {:.1})",
                    bbox.x(),
                    bbox.y(),
                    x,
                    y
                ));
            }
            Err(err) => {
                warn!(frame = i, %err, "update failed, keeping previous box");
            }
        }
        progress.inc(1);
    }
    progress.finish_with_message("done");

    info!(
        frames = tracker.frame_count(),
        final_box = ?tracker.bbox(),
        worst_error = worst,
        "finished"
    );
    Ok(())
}

/// Ring target on a low-contrast diagonal texture. `(x, y)` is the origin
/// of the window the ring is centred in.
fn scene(x: f64, y: f64) -> Result<GrayFrame, TrackError> {
    let half = WINDOW as f64 / 2.0;
    let (cx, cy) = (x + half, y + half);
    let pixels = DMatrix::from_fn(FRAME_HEIGHT, FRAME_WIDTH, |r, c| {
        let background = 20.0 + ((r * 13 + c * 7) % 17) as f64;
        let d = (r as f64 - cy).hypot(c as f64 - cx) - half / 2.0;
        background + 200.0 * (-d * d / 4.0).exp()
    });
    GrayFrame::from_matrix(pixels)
}

fn parse_boundary(value: &str) -> Result<BoundaryPolicy, Box<dyn Error>> {
    match value {
        "shift" => Ok(BoundaryPolicy::Shift),
        "clamp" => Ok(BoundaryPolicy::Clamp),
        other => Err(format!("unknown boundary policy: {other}").into()),
    }
}

fn print_usage() {
    println!("Usage: track_synthetic [frames] [shift|clamp] [config.json]");
    println!("  frames       number of frames after the first (default 60)");
    println!("  shift|clamp  boundary policy (default from config)");
    println!("  config.json  TrackerConfig as JSON; missing fields use defaults");
}
