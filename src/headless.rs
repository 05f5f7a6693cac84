//! Terminal-free runs: the full scene pipeline against an in-memory screen
//! and a manual clock.

use anyhow::{Context, Result};
use tracing::info;

use crate::config::{TerraConfig, HEADLESS_EXTENTS};
use crate::core::{FrameClock, ManualTime, Simulation};
use crate::scene::WorldScene;
use crate::term::FrameBuffer;

/// What a headless run did.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessReport {
    pub frames: u64,
    pub blown_frames: u64,
    /// Simulated seconds since the first frame.
    pub run_time: f64,
    pub entities: usize,
    /// The last composited frame.
    pub last_frame: FrameBuffer,
}

/// Run `frames` ticks of the world scene on a [`HEADLESS_EXTENTS`] screen.
///
/// Time is simulated, so the run is as fast as the machine allows and a
/// fixed seed reproduces it exactly.
pub fn run_headless(config: &TerraConfig, frames: u64) -> Result<HeadlessReport> {
    let sim = Simulation::with_roster(config.seed, config.roster.clone());
    let mut scene = WorldScene::new(HEADLESS_EXTENTS, sim).context("failed to lay out headless scene")?;

    let time = ManualTime::new();
    let mut clock = FrameClock::with_time(time.clone());
    let mut fb = FrameBuffer::new(0, 0);
    // Pretend each frame's work takes a quarter of the budget.
    let work = clock.budget() / 4;

    for _ in 0..frames {
        clock.tick(|frame| -> Result<()> {
            scene.update(frame)?;
            scene.screen().compose_into(&mut fb);
            time.advance(work);
            Ok(())
        })?;
    }

    let frame = *clock.frame();
    let report = HeadlessReport {
        frames: frame.total_frames,
        blown_frames: frame.blown_frames,
        run_time: frame.run_time,
        entities: scene.simulation().entities().len(),
        last_frame: fb,
    };
    info!(
        frames = report.frames,
        blown = report.blown_frames,
        run_time = report.run_time,
        slept_ms = time.total_slept().as_secs_f64() * 1000.0,
        "headless run finished"
    );
    Ok(report)
}
