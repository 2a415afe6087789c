//! Countdown timer with urgency tiers.

pub const DEFAULT_WARNING: f32 = 60.0;
pub const DEFAULT_CRITICAL: f32 = 30.0;

/// How close the countdown is to zero. Drives the timer colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Urgency {
    Normal,
    Warning,
    Critical,
}

#[derive(Clone, Debug)]
pub struct Timer {
    total: f32,
    remaining: f32,
    running: bool,
    expired: bool,
    warning_threshold: f32,
    critical_threshold: f32,
}

impl Timer {
    pub fn new(total: f32) -> Self {
        Self::with_thresholds(total, DEFAULT_WARNING, DEFAULT_CRITICAL)
    }

    pub fn with_thresholds(total: f32, warning: f32, critical: f32) -> Self {
        Self {
            total,
            remaining: total,
            running: false,
            expired: false,
            warning_threshold: warning,
            critical_threshold: critical,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// No effect once the timer has expired.
    pub fn resume(&mut self) {
        if !self.expired {
            self.running = true;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Back to a full, stopped countdown for a fresh run.
    pub fn reset(&mut self) {
        self.remaining = self.total;
        self.running = false;
        self.expired = false;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.running || self.expired {
            return;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.expire();
        }
    }

    /// Capped at the initial total.
    pub fn add_time(&mut self, seconds: f32) {
        if self.expired {
            return;
        }
        self.remaining = (self.remaining + seconds).min(self.total);
    }

    pub fn subtract_time(&mut self, seconds: f32) {
        if self.expired {
            return;
        }
        self.remaining -= seconds;
        if self.remaining <= 0.0 {
            self.expire();
        }
    }

    fn expire(&mut self) {
        self.remaining = 0.0;
        self.expired = true;
        self.running = false;
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn total(&self) -> f32 {
        self.total
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn urgency(&self) -> Urgency {
        if self.remaining <= self.critical_threshold {
            Urgency::Critical
        } else if self.remaining <= self.warning_threshold {
            Urgency::Warning
        } else {
            Urgency::Normal
        }
    }

    /// `MM:SS`, rounding partial seconds down.
    pub fn formatted(&self) -> String {
        let secs = self.remaining.max(0.0) as u32;
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}
