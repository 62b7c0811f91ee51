//! Config validation command

use anyhow::{Context, Result};
use spark_circuit::{CircuitConfig, MotionEngine};

pub fn run(path: &str) -> Result<()> {
    let config =
        CircuitConfig::load(path).with_context(|| format!("Invalid circuit config '{}'", path))?;
    let engine = MotionEngine::new(&config)?;

    println!("{}: OK", path);
    println!("  Waypoints:         {}", engine.path().waypoint_count());
    println!("  Loop length:       {:.1} px", engine.path().perimeter());
    println!(
        "  Bulb hit distance: {:.1} px",
        engine.sensor().threshold()
    );

    let interval = config.frame_interval_ms();
    match engine.lap_ticks() {
        Some(ticks) => {
            println!(
                "  Lap time:          {} ticks ({:.0} ms at {} fps)",
                ticks,
                ticks as f64 * interval,
                config.frame_rate
            );
            if let Some(max) = engine.max_live_particles(interval) {
                println!("  Max live particles: {}", max);
            }
        }
        None => println!("  Warning: step_size is too small, particles never complete a lap"),
    }

    Ok(())
}
