//! Headless harness timing.

/// Fixed simulation step used by the headless harness (seconds)
pub const HARNESS_FRAME_DT: f32 = 1.0 / 60.0;
/// Seconds between scripted intents in the headless harness
pub const HARNESS_INTENT_INTERVAL: f32 = 0.35;
/// Simulated seconds the headless harness runs for
pub const HARNESS_DURATION_SECONDS: f32 = 30.0;
