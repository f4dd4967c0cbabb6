//! Fixed-timestep accumulator for embedders that drive the engine from a
//! frame loop instead of the tokio [`crate::driver`].
//!
//! A render loop calls [`FrameClock::advance`] with a wall-clock timestamp
//! each frame; the clock converts the variable frame delta into whole engine
//! ticks plus a carried remainder, so production accrues at exactly
//! `ticks_per_sec` regardless of frame rate. Long stalls are clamped —
//! offline gaps are credited through bootstrap, not through the frame loop.

/// Longest frame delta the clock will convert into ticks. Anything larger
/// (backgrounded tab, suspended process) is treated as a stall.
const MAX_FRAME_MS: f64 = 1_000.0;

#[derive(Debug)]
pub struct FrameClock {
    ms_per_tick: f64,
    carry_ms: f64,
    last_now_ms: Option<i64>,
}

impl FrameClock {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1_000.0 / f64::from(ticks_per_sec.max(1)),
            carry_ms: 0.0,
            last_now_ms: None,
        }
    }

    /// Feed the current wall-clock time; returns how many whole ticks the
    /// engine should advance. The first call anchors the clock and yields 0.
    pub fn advance(&mut self, now_ms: i64) -> u32 {
        let delta = match self.last_now_ms {
            Some(prev) => ((now_ms - prev) as f64).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_now_ms = Some(now_ms);

        self.carry_ms += delta;
        let ticks = (self.carry_ms / self.ms_per_tick) as u32;
        self.carry_ms -= f64::from(ticks) * self.ms_per_tick;
        ticks
    }

    /// Seconds represented by `ticks`, for feeding `Engine::tick`.
    pub fn seconds(&self, ticks: u32) -> f64 {
        f64::from(ticks) * self.ms_per_tick / 1_000.0
    }
}
