//! Run command - headless host that drives the simulation frame by frame

use anyhow::{Context, Result};
use serde_json::json;
use spark_circuit::{CircuitConfig, CircuitEvent, SimulationController, Snapshot};
use spark_runtime::{FrameScheduler, RuntimeSystem, SystemTimeSource, TimeSource};
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};

pub struct RunArgs {
    pub config: Option<String>,
    pub frames: u64,
    pub fps: Option<f64>,
    pub toggle_at: Vec<u64>,
    pub realtime: bool,
    pub format: String,
}

pub fn run(args: RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => CircuitConfig::load(path)
            .with_context(|| format!("Failed to load config '{}'", path))?,
        None => CircuitConfig::default(),
    };
    if let Some(fps) = args.fps {
        config.frame_rate = fps;
        config.validate().context("Invalid --fps")?;
    }

    let interval = config.frame_interval_ms();
    let scheduler = FrameScheduler::new(config.frame_rate);
    let mut controller =
        SimulationController::new(&config, scheduler).context("Failed to build simulation")?;
    let wall = SystemTimeSource::new();

    info!(
        frames = args.frames,
        fps = config.frame_rate,
        realtime = args.realtime,
        "starting simulation"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut spawned = 0u64;
    let mut laps = 0u64;

    for frame in 0..args.frames {
        let target_ms = frame as f64 * interval;
        let now_ms = if args.realtime {
            let ahead = target_ms - wall.now_ms();
            if ahead > 0.0 {
                std::thread::sleep(Duration::from_secs_f64(ahead / 1000.0));
            }
            wall.now_ms()
        } else {
            target_ms
        };

        for _ in args.toggle_at.iter().filter(|&&f| f == frame) {
            controller.toggle();
        }
        controller.update(now_ms)?;

        let mut latest: Option<Snapshot> = None;
        for event in controller.drain_events() {
            match event {
                CircuitEvent::Frame(snapshot) => latest = Some(snapshot),
                CircuitEvent::ParticleSpawned(_) => spawned += 1,
                CircuitEvent::LapCompleted(_) => laps += 1,
                CircuitEvent::BulbChanged { lit } => debug!(frame, lit, "bulb changed"),
                CircuitEvent::SwitchChanged { energized } => {
                    info!(frame, energized, "switch toggled")
                }
            }
        }
        let snapshot = latest.unwrap_or_else(|| controller.snapshot());

        if args.format == "json" {
            let line = json!({
                "frame": frame,
                "time_ms": now_ms,
                "snapshot": snapshot,
            });
            writeln!(out, "{}", line)?;
        } else {
            writeln!(out, "{}", format_text(frame, now_ms, &snapshot))?;
        }
    }

    controller.shutdown()?;
    info!(spawned, laps, "simulation finished");
    Ok(())
}

fn format_text(frame: u64, now_ms: f64, snapshot: &Snapshot) -> String {
    format!(
        "frame {:>6}  t={:>10.1}ms  switch={:<3}  bulb={:<4}  particles={}",
        frame,
        now_ms,
        if snapshot.energized { "ON" } else { "OFF" },
        if snapshot.bulb_lit { "lit" } else { "dark" },
        snapshot.particles.len()
    )
}
