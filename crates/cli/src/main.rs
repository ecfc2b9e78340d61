mod console_sink;
mod recording;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;

use livecheck_core::detection::infrastructure::replay_face_detector::ReplayFaceDetector;
use livecheck_core::overlay::domain::overlay_state::OverlayState;
use livecheck_core::pipeline::liveness_session::LivenessSession;
use livecheck_core::shared::config::LivenessConfig;

use crate::console_sink::ConsoleSink;
use crate::recording::Recording;

/// Replays recorded face detections through the liveness check.
#[derive(Parser)]
#[command(name = "livecheck")]
struct Cli {
    /// Recording JSON with one detection batch per frame.
    recording: PathBuf,

    /// Config file (defaults to the per-user config, if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Notification debounce interval in milliseconds (overrides config).
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Preview overlay width in pixels.
    #[arg(long, default_value = "1080")]
    overlay_width: u32,

    /// Preview overlay height in pixels.
    #[arg(long, default_value = "1920")]
    overlay_height: u32,

    /// Delay between replayed frames in milliseconds.
    #[arg(long, default_value = "33")]
    frame_interval_ms: u64,

    /// Replay as if the other camera had been selected (flips mirroring).
    #[arg(long)]
    switch_lens: bool,

    /// Save the overlay of every evaluated frame as PNG into this directory.
    #[arg(long)]
    render_dir: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = load_config(&cli)?;
    let mut recording = Recording::load(&cli.recording)?;
    if cli.switch_lens {
        recording.lens = recording.lens.toggled();
    }
    log::info!(
        "Replaying {} frame(s) at {}x{} ({} lens, {:?})",
        recording.frame_count(),
        recording.image_width,
        recording.image_height,
        recording.lens,
        recording.orientation
    );

    if let Some(dir) = &cli.render_dir {
        std::fs::create_dir_all(dir)?;
    }

    let detector = ReplayFaceDetector::new(Arc::new(recording.detections()))
        .with_failures(recording.failure_set());
    let overlay = Arc::new(
        OverlayState::new(cli.overlay_width as f32, cli.overlay_height as f32)
            .with_stroke_width(config.stroke_width),
    );
    let sink = ConsoleSink::new(cli.overlay_width, cli.overlay_height, cli.render_dir.clone());
    let mut session = LivenessSession::start(Box::new(detector), &config, overlay, sink)?;

    let frame_interval = Duration::from_millis(cli.frame_interval_ms);
    let submitter = session.frame_submitter();
    let source = std::thread::Builder::new()
        .name("frame-source".to_string())
        .spawn(move || {
            for index in 0..recording.frame_count() {
                if !submitter.submit(recording.blank_frame(index)) {
                    break;
                }
                std::thread::sleep(frame_interval);
            }
        })?;

    while !source.is_finished() {
        session.wait_and_pump(frame_interval);
    }
    if source.join().is_err() {
        log::error!("Frame source thread panicked");
    }

    // Let the last report and any pending notification land.
    let settle = Instant::now() + frame_interval * 2 + config.debounce_interval();
    while let Some(remaining) = settle.checked_duration_since(Instant::now()) {
        session.wait_and_pump(remaining);
    }

    let capture_allowed = session.capture_gate().is_capture_allowed();
    let dropped = session.dropped_frames();
    session.stop();

    let sink = session.sink();
    println!();
    println!(
        "Frames applied: {}  valid: {}  dropped: {}",
        sink.applied(),
        sink.valid_count(),
        dropped
    );
    println!("Notifications shown: {}", sink.messages().len());
    println!(
        "Capture {} at end of recording",
        if capture_allowed { "allowed" } else { "blocked" }
    );
    if sink.rendered() > 0 {
        println!("Rendered {} overlay frame(s)", sink.rendered());
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<LivenessConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => LivenessConfig::load(path)?,
        None => LivenessConfig::load_or_default(),
    };
    if let Some(ms) = cli.debounce_ms {
        config.debounce_ms = ms;
    }
    config.validate()?;
    Ok(config)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.recording.exists() {
        return Err(format!("Recording not found: {}", cli.recording.display()).into());
    }
    if cli.overlay_width == 0 || cli.overlay_height == 0 {
        return Err(format!(
            "Overlay size must be non-zero, got {}x{}",
            cli.overlay_width, cli.overlay_height
        )
        .into());
    }
    if cli.frame_interval_ms == 0 {
        return Err("Frame interval must be at least 1ms".into());
    }
    if let Some(config) = &cli.config {
        if !config.exists() {
            return Err(format!("Config file not found: {}", config.display()).into());
        }
    }
    Ok(())
}
