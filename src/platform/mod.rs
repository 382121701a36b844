//! Platform layer
//!
//! Frame pacing, the browser text layer styles and the two runners: the
//! browser loop (`web`) and the headless attract mode (`native`).

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
pub mod overlay;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::{FRAME_DT, MAX_SUBSTEPS};

/// Longest frame gap fed into the accumulator, seconds
const MAX_FRAME_GAP: f32 = 0.1;

/// Fixed-step accumulator for display-driven loops.
///
/// Turns variable animation frame timestamps into a whole number of 60 Hz
/// simulation steps.
#[derive(Debug, Clone, Default)]
pub struct FramePacer {
    accumulator: f32,
    last_time: Option<f64>,
}

impl FramePacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a timestamp in milliseconds; returns how many steps to run now
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => FRAME_DT,
        };
        self.last_time = Some(now_ms);
        self.accumulator += dt.clamp(0.0, MAX_FRAME_GAP);

        let mut substeps = 0;
        while self.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= FRAME_DT;
            substeps += 1;
        }

        // Too far behind: drop the backlog instead of spiralling
        if substeps == MAX_SUBSTEPS && self.accumulator >= FRAME_DT {
            self.accumulator = 0.0;
        }
        substeps
    }
}

/// Sleeps the native loop to the next frame deadline
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FrameClock {
    next: std::time::Instant,
    period: std::time::Duration,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl FrameClock {
    pub fn new() -> Self {
        let period = std::time::Duration::from_secs_f32(FRAME_DT);
        Self {
            next: std::time::Instant::now() + period,
            period,
        }
    }

    /// Block until the current frame's deadline, then arm the next one
    pub fn wait(&mut self) {
        let now = std::time::Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            // Late; restart the schedule from now
            self.next = now + self.period;
        }
    }
}

/// Seed derived from the wall clock
pub fn clock_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    }
}
