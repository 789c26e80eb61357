//! Pool Sim - deterministic billiards simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, pockets, turn rules)
//! - `ai`: Pluggable shot strategies for computer-controlled players
//! - `game`: Facade the presentation layer drives (shots, ticks, snapshots)
//! - `config`: Data-driven physics tunables
//! - `web`: Browser bridge (wasm32 only)

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use ai::{RandomTargetStrategy, Shot, ShotStrategy};
pub use config::{SimConfig, TableBounds};
pub use error::ConfigError;
pub use game::PoolGame;

/// Simulation configuration constants
pub mod consts {
    /// Nominal frame rate; one simulation tick per animation frame
    pub const FRAMES_PER_SECOND: u32 = 60;

    /// Velocity multiplier applied every tick while a ball rolls
    pub const FRICTION: f64 = 0.98;
    /// Fraction of the normal velocity kept after a cushion bounce
    pub const WALL_RESTITUTION: f64 = 0.7;
    /// Fraction of the exchanged normal velocity kept in a ball-ball hit
    pub const BODY_RESTITUTION: f64 = 0.8;
    /// Per-axis speed at or below which a ball is considered stopped
    pub const STOP_EPSILON: f64 = 0.1;

    /// Shot power cap
    pub const MAX_POWER: f64 = 100.0;
    /// Power gained per tick while charging
    pub const CHARGE_RATE: f64 = 2.0;
    /// Cue ball speed (units/tick) per unit of shot power
    pub const SHOT_SPEED_SCALE: f64 = 0.15;
    /// Same, for computer-controlled shots
    pub const AI_SHOT_SPEED_SCALE: f64 = 0.1;

    /// Ball defaults
    pub const BALL_RADIUS: f64 = 12.0;
    /// Rack spacing between neighbouring ball centres
    pub const RACK_SPACING: f64 = 25.0;

    /// Pocket capture radii
    pub const CORNER_POCKET_RADIUS: f64 = 25.0;
    pub const SIDE_POCKET_RADIUS: f64 = 20.0;

    /// Default playfield (900x500 canvas with a 50 unit rail)
    pub const TABLE_X: f64 = 50.0;
    pub const TABLE_Y: f64 = 50.0;
    pub const TABLE_WIDTH: f64 = 800.0;
    pub const TABLE_HEIGHT: f64 = 400.0;

    /// Delays, in milliseconds of wall time
    pub const RESPAWN_DELAY_MS: u32 = 2000;
    pub const NOTICE_MS: u32 = 1500;
    pub const AI_THINK_MS: u32 = 1000;
}

/// Convert a wall-clock delay to whole simulation ticks (rounded up)
#[inline]
pub const fn ticks_for_millis(ms: u32) -> u64 {
    let fps = consts::FRAMES_PER_SECOND as u64;
    (ms as u64 * fps).div_ceil(1000)
}
