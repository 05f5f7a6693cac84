//! Terra terminal runner (default binary).
//!
//! Configuration comes from `TERRA_*` environment variables. Logs go to a
//! file because the terminal belongs to the renderer.

use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use terra::config::{self, TerraConfig};
use terra::core::{FrameClock, Simulation};
use terra::input::poll_command;
use terra::term::TerminalRenderer;
use terra::{run_headless, WorldScene};

fn main() -> Result<()> {
    init_tracing(&config::log_path_from_env())?;
    let config = TerraConfig::from_env();
    info!(seed = config.seed, roster = config.roster.len(), "starting terra");

    if let Some(frames) = config.headless_frames {
        let report = run_headless(&config, frames)?;
        println!(
            "terra: {} frames, {} blown, {} entities",
            report.frames, report.blown_frames, report.entities
        );
        return Ok(());
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!("terra exited");
    result
}

fn run(term: &mut TerminalRenderer, config: &TerraConfig) -> Result<()> {
    let extents = TerminalRenderer::extents()?;
    let sim = Simulation::with_roster(config.seed, config.roster.clone());
    let mut scene = WorldScene::new(extents, sim)
        .with_context(|| format!("terminal too small for the scene ({}x{})", extents.1, extents.0))?;

    let mut clock = FrameClock::new();
    while scene.is_running() {
        clock.tick(|frame| -> Result<()> {
            scene.handle_input(poll_command()?);
            scene.update(frame)?;
            term.present(scene.screen())
        })?;
    }

    let frame = clock.frame();
    info!(
        frames = frame.total_frames,
        blown = frame.blown_frames,
        run_time = frame.run_time,
        "main loop finished"
    );
    Ok(())
}

fn init_tracing(path: &str) -> Result<()> {
    let (file, used) = config::open_log_file(path, config::DEFAULT_LOG_PATH)
        .with_context(|| format!("failed to create log file {path}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    if used != path {
        warn!(requested = path, used = %used, "could not create log file, using fallback");
    }
    Ok(())
}
