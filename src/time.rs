//! Frame clock: turns wall-clock timestamps into clamped per-tick deltas.
//!
//! `draw_web()` calls at ~60fps with variable delta. The museum simulation is
//! continuous (positions in world units, timer in seconds), so each frame is
//! one tick whose length is the elapsed time, capped so a backgrounded tab
//! does not resume with a giant step.

pub struct FrameClock {
    /// Longest delta handed out, in seconds.
    max_delta: f32,
    /// Timestamp of the last update (ms), None if first frame
    last_timestamp: Option<f64>,
    /// Simulated seconds handed out so far.
    pub elapsed: f64,
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            max_delta,
            last_timestamp: None,
            elapsed: 0.0,
        }
    }

    /// Feed wall-clock timestamp (from `performance.now()` or similar).
    /// Returns the delta in seconds to simulate this frame.
    pub fn update(&mut self, now_ms: f64) -> f32 {
        let delta = match self.last_timestamp {
            Some(prev) => ((now_ms - prev) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        let dt = delta.min(self.max_delta).max(0.0);
        self.elapsed += dt as f64;
        dt
    }

    /// Forget the previous timestamp, e.g. after the run restarts.
    pub fn reset(&mut self) {
        self.last_timestamp = None;
        self.elapsed = 0.0;
    }
}
