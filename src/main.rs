//! Headless julia-particles runner.
//!
//! Builds a field, steps it for a number of frames and logs timing and
//! colour statistics. Handy for profiling and for checking a config file
//! before wiring it to a renderer.
//!
//! Usage: `julia-particles [config.json] [frames]`
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use julia_particles::prelude::*;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_FRAMES: u64 = 120;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let path = PathBuf::from(path);
            info!(path = %path.display(), "loading config");
            FieldConfig::load(&path)?
        }
        None => FieldConfig::default(),
    };
    let frames: u64 = match args.next() {
        Some(s) => s.parse()?,
        None => DEFAULT_FRAMES,
    };

    let build_start = Instant::now();
    let mut field = ParticleField::new(config)?;
    info!(
        elapsed_ms = build_start.elapsed().as_secs_f64() * 1000.0,
        "field ready"
    );

    let run_start = Instant::now();
    for _ in 0..frames {
        field.update();
    }
    let elapsed = run_start.elapsed().as_secs_f64();
    let mean_frame_ms = if frames > 0 {
        elapsed * 1000.0 / frames as f64
    } else {
        0.0
    };

    let (min, max) = field.iter().fold(
        (Vec4::splat(f32::INFINITY), Vec4::splat(f32::NEG_INFINITY)),
        |(lo, hi), (_, color)| (lo.min(color), hi.max(color)),
    );

    info!(
        frames,
        particles = field.len(),
        total_s = elapsed,
        mean_frame_ms,
        driving_value = field.driving_value(),
        order = %field.channel_order(),
        "run complete"
    );
    info!(
        r = ?(min.x, max.x),
        g = ?(min.y, max.y),
        b = ?(min.z, max.z),
        "colour channel range"
    );

    Ok(())
}
