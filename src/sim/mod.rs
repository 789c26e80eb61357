//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame, no delta time)
//! - Seeded RNG only
//! - Stable iteration order (by body ID)
//! - Virtual-time timers, no wall clock
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod physics;
pub mod pocket;
pub mod rules;
pub mod schedule;
pub mod state;
pub mod table;
pub mod tick;

pub use body::{BallKind, Body, CUE_BALL_ID, Group};
pub use collision::{CollisionResult, ball_ball_collision, resolve_all, resolve_pair};
pub use physics::{integrate, reflect_walls};
pub use pocket::{Capture, Pocket, detect_captures, six_pockets};
pub use rules::{check_game_end, on_ball_potted, points_for};
pub use schedule::{ScheduledTask, Scheduler, TaskAction};
pub use state::{
    Controller, GameEvent, GameState, Notice, NoticeKind, Outcome, Phase, Player, TurnState,
};
pub use table::{GameMode, Table};
pub use tick::{StepReport, TickInput, apply_shot, step_physics, tick};
