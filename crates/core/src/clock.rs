//! Frame clock - fixed-rate pacing for the main loop.
//!
//! The clock brackets every tick: starting a tick measures the delta since the
//! previous tick, and ending it sleeps off whatever remains of the frame
//! budget. A tick that overruns the budget is counted as blown and the clock
//! skips the sleep to catch up.
//!
//! Time is read through [`TimeSource`] so pacing can be driven by a real
//! monotonic clock or by a manually advanced one in headless runs and tests.

use std::cell::Cell;
use std::ops::Deref;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::types::{MAX_DELTA_SECS, TARGET_FPS};

/// Monotonic time plus the ability to block until later.
pub trait TimeSource {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;

    /// Block for `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock time source backed by [`Instant`] and `thread::sleep`.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Manually advanced time source.
///
/// Clones share the same timeline, so a caller can keep a handle and advance
/// time from inside a tick body while the clock owns another handle.
/// Sleeping advances the timeline instead of blocking.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: Rc<Cell<Duration>>,
    slept: Rc<Cell<Duration>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the shared timeline forward.
    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }

    /// Total time spent in [`TimeSource::sleep`] so far.
    pub fn total_slept(&self) -> Duration {
        self.slept.get()
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&mut self, duration: Duration) {
        self.advance(duration);
        self.slept.set(self.slept.get() + duration);
    }
}

/// Data fields related to the current frame.
///
/// All float values are in fractional seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameData {
    /// Ticks whose body overran the frame budget.
    pub blown_frames: u64,
    /// Time since the previous tick started, capped at [`MAX_DELTA_SECS`].
    pub delta_time: f64,
    /// Budget left over when the previous tick ended; negative when blown.
    pub frame_left: f64,
    /// Time since the clock was created.
    pub run_time: f64,
    /// Ticks completed so far.
    pub total_frames: u64,
}

impl FrameData {
    /// Frame delta time in fractional milliseconds.
    pub fn delta_ms(&self) -> f64 {
        self.delta_time * 1000.0
    }
}

/// Clock controlling the main loop.
pub struct FrameClock<T: TimeSource = MonotonicTime> {
    time: T,
    budget: Duration,
    frame: FrameData,
    start: Duration,
    previous: Duration,
    current: Duration,
}

impl FrameClock<MonotonicTime> {
    /// Real-time clock at [`TARGET_FPS`].
    pub fn new() -> Self {
        Self::with_time(MonotonicTime::new())
    }
}

impl Default for FrameClock<MonotonicTime> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> FrameClock<T> {
    pub fn with_time(time: T) -> Self {
        Self::with_rate(time, TARGET_FPS)
    }

    /// Create a clock pacing at `fps` frames per second.
    ///
    /// Run time is measured from this call.
    pub fn with_rate(time: T, fps: u32) -> Self {
        let start = time.now();
        Self {
            time,
            budget: Duration::from_secs(1) / fps.max(1),
            frame: FrameData::default(),
            start,
            previous: start,
            current: start,
        }
    }

    /// Per-tick time budget.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Data for the most recent tick.
    pub fn frame(&self) -> &FrameData {
        &self.frame
    }

    pub fn time(&self) -> &T {
        &self.time
    }

    /// Start a tick.
    ///
    /// The tick ends when the returned guard is dropped, including during a
    /// panic unwind, so end-of-tick accounting always runs.
    pub fn begin_tick(&mut self) -> FrameTick<'_, T> {
        self.start_frame();
        FrameTick { clock: self }
    }

    /// Run `body` as one tick and return its result.
    pub fn tick<R>(&mut self, body: impl FnOnce(&FrameData) -> R) -> R {
        let tick = self.begin_tick();
        let frame: &FrameData = &tick;
        body(frame)
    }

    fn start_frame(&mut self) {
        self.current = self.time.now();
        let delta = self.current.saturating_sub(self.previous).as_secs_f64();
        self.frame.delta_time = delta.min(MAX_DELTA_SECS);
        self.frame.run_time = self.current.saturating_sub(self.start).as_secs_f64();
    }

    fn end_frame(&mut self) {
        self.previous = self.current;
        self.frame.total_frames += 1;

        let elapsed = self.time.now().saturating_sub(self.current);
        self.frame.frame_left = self.budget.as_secs_f64() - elapsed.as_secs_f64();

        if elapsed < self.budget {
            self.time.sleep(self.budget - elapsed);
        } else {
            // Over budget: skip the sleep and try to catch up.
            self.frame.blown_frames += 1;
            trace!(
                frame = self.frame.total_frames,
                overrun_ms = -self.frame.frame_left * 1000.0,
                "blown frame"
            );
        }
    }
}

/// An in-progress tick; dereferences to the tick's [`FrameData`].
pub struct FrameTick<'a, T: TimeSource> {
    clock: &'a mut FrameClock<T>,
}

impl<T: TimeSource> Deref for FrameTick<'_, T> {
    type Target = FrameData;

    fn deref(&self) -> &FrameData {
        &self.clock.frame
    }
}

impl<T: TimeSource> Drop for FrameTick<'_, T> {
    fn drop(&mut self) {
        self.clock.end_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn budget_matches_target_rate() {
        let clock = FrameClock::with_time(ManualTime::new());
        assert_eq!(clock.budget(), Duration::from_secs(1) / 30);
    }

    #[test]
    fn fast_tick_sleeps_off_remaining_budget() {
        let time = ManualTime::new();
        let mut clock = FrameClock::with_time(time.clone());

        clock.tick(|_| time.advance(ms(10)));

        let frame = *clock.frame();
        assert_eq!(frame.total_frames, 1);
        assert_eq!(frame.blown_frames, 0);
        assert!(frame.frame_left > 0.0);
        assert_eq!(time.total_slept(), clock.budget() - ms(10));
    }

    #[test]
    fn slow_tick_is_blown_and_does_not_sleep() {
        let time = ManualTime::new();
        let mut clock = FrameClock::with_time(time.clone());

        clock.tick(|_| time.advance(ms(50)));

        let frame = *clock.frame();
        assert_eq!(frame.total_frames, 1);
        assert_eq!(frame.blown_frames, 1);
        assert!(frame.frame_left < 0.0);
        assert_eq!(time.total_slept(), Duration::ZERO);
    }

    #[test]
    fn delta_spans_previous_tick_including_sleep() {
        let time = ManualTime::new();
        let mut clock = FrameClock::with_time(time.clone());

        clock.tick(|_| time.advance(ms(5)));
        let delta = clock.tick(|frame| frame.delta_time);

        let expected = clock.budget().as_secs_f64();
        assert!((delta - expected).abs() < 1e-9, "delta={delta}");
    }

    #[test]
    fn delta_is_capped_at_one_second() {
        let time = ManualTime::new();
        let mut clock = FrameClock::with_time(time.clone());

        time.advance(Duration::from_secs(5));
        let (delta, run_time) = clock.tick(|frame| (frame.delta_time, frame.run_time));

        assert_eq!(delta, 1.0);
        assert!((run_time - 5.0).abs() < 1e-9);
    }

    #[test]
    fn guard_ends_frame_on_drop() {
        let time = ManualTime::new();
        let mut clock = FrameClock::with_time(time.clone());

        {
            let tick = clock.begin_tick();
            assert_eq!(tick.total_frames, 0);
        }
        assert_eq!(clock.frame().total_frames, 1);
    }

    #[test]
    fn failing_body_still_counts_the_frame() {
        let time = ManualTime::new();
        let mut clock = FrameClock::with_time(time.clone());

        let result: Result<(), &str> = clock.tick(|_| Err("boom"));
        assert!(result.is_err());
        assert_eq!(clock.frame().total_frames, 1);
    }

    #[test]
    fn panicking_body_still_counts_the_frame() {
        let time = ManualTime::new();
        let mut clock = FrameClock::with_time(time.clone());

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            clock.tick(|_| -> () {
                time.advance(ms(100));
                panic!("tick body failed");
            })
        }));

        assert!(outcome.is_err());
        assert_eq!(clock.frame().total_frames, 1);
        assert_eq!(clock.frame().blown_frames, 1);
    }

    #[test]
    fn blown_frames_accumulate_under_sustained_load() {
        let time = ManualTime::new();
        let mut clock = FrameClock::with_time(time.clone());

        for _ in 0..5 {
            clock.tick(|_| time.advance(ms(40)));
        }
        clock.tick(|_| time.advance(ms(1)));

        assert_eq!(clock.frame().total_frames, 6);
        assert_eq!(clock.frame().blown_frames, 5);
    }

    #[test]
    fn delta_ms_converts_seconds() {
        let frame = FrameData {
            delta_time: 0.25,
            ..FrameData::default()
        };
        assert_eq!(frame.delta_ms(), 250.0);
    }
}
