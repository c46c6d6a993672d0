//! Simulation time and countdown timers.
//!
//! All waiting in the simulation is expressed as countdowns ticked by frame
//! delta. Nothing suspends; systems check `is_ready()` every tick.

// =============================================================================
// GAME CLOCK
// =============================================================================

/// Global game time clock (in seconds)
#[derive(Debug, Clone, Default)]
pub struct GameClock {
    /// Simulated seconds since the session started. Only advances while playing.
    pub time: f32,
}

impl GameClock {
    pub fn new() -> Self {
        Self { time: 0.0 }
    }

    /// Advance by a frame delta. Negative deltas are ignored.
    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.time += dt;
        }
    }

    /// `mm:ss.s` stamp used by the combat log
    pub fn timestamp(&self) -> String {
        let minutes = (self.time / 60.0).floor() as u32;
        let seconds = self.time - minutes as f32 * 60.0;
        format!("{:02}:{:04.1}", minutes, seconds)
    }
}

// =============================================================================
// COUNTDOWN
// =============================================================================

/// A timer that counts down to zero and stays there.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn new() -> Self {
        Self { remaining: 0.0 }
    }

    /// A countdown that is already running
    pub fn running(seconds: f32) -> Self {
        let mut countdown = Self::new();
        countdown.start(seconds);
        countdown
    }

    pub fn start(&mut self, seconds: f32) {
        self.remaining = seconds.max(0.0);
    }

    /// Start with a lower bound on the duration
    pub fn start_at_least(&mut self, seconds: f32, floor: f32) {
        self.start(seconds.max(floor));
    }

    /// Count down by `dt`, floored at zero.
    pub fn tick(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }
}
