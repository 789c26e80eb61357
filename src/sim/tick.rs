//! One simulation frame
//!
//! Advances the turn machine and, while balls roll, the physics. Every state
//! change a frame causes is reported back as a [`GameEvent`].

use glam::DVec2;

use super::collision::resolve_all;
use super::physics::{integrate, reflect_walls};
use super::pocket::{Capture, detect_captures};
use super::rules::{check_game_end, on_ball_potted, points_for};
use super::schedule::{ScheduledTask, TaskAction};
use super::state::{Controller, GameEvent, GameState, NoticeKind, Phase, Player};
use super::table::Table;
use crate::ai::ShotStrategy;
use crate::config::SimConfig;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Aim point in table coordinates (mouse position)
    pub aim: Option<DVec2>,
    /// Cue pressed: start charging
    pub press: bool,
    /// Cue released: take the shot
    pub release: bool,
}

/// What one physics step produced
#[derive(Debug, Clone, Default)]
pub struct StepReport {
    pub collisions: Vec<(u32, u32)>,
    pub captures: Vec<Capture>,
}

/// Move every ball by one tick: integrate, cushions, ball pairs, pockets
///
/// Every active ball ends the step inside the radius-inset playfield.
pub fn step_physics(table: &mut Table, config: &SimConfig) -> StepReport {
    let bounds = table.bounds;
    for body in table.bodies.iter_mut() {
        integrate(body, config.friction, config.stop_epsilon);
        reflect_walls(body, &bounds, config.wall_restitution);
    }

    let collisions = resolve_all(&mut table.bodies, config.body_restitution);
    // Separation can push a ball into a cushion
    for body in table.bodies.iter_mut() {
        reflect_walls(body, &bounds, config.wall_restitution);
    }
    let captures = detect_captures(&mut table.bodies, &table.pockets);

    StepReport {
        collisions,
        captures,
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, strategy: &mut dyn ShotStrategy) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    if let Some(aim) = input.aim {
        state.aim = aim;
    }

    run_due_tasks(state, strategy, &mut events);

    match state.turn.phase {
        Phase::WaitingForShot => {
            match state.acting_controller() {
                Controller::Human => {
                    if input.press {
                        state.turn.phase = Phase::Charging;
                        state.turn.charge_power = 0.0;
                        // Press and release in one frame is a tap
                        if input.release {
                            let player = state.turn.current_player;
                            let direction = state.aim - state.table.cue().pos;
                            apply_shot(state, player, direction, 0.0, &mut events);
                        }
                    }
                }
                Controller::Ai => {
                    if input.press {
                        log::debug!("Ignoring cue press during the computer's turn");
                    }
                    if !state.ai_pending {
                        let player = state.turn.current_player;
                        state.ai_pending = true;
                        state.schedule(state.config.ai_think_ticks, TaskAction::AiShot { player });
                    }
                }
            }
        }

        Phase::Charging => {
            let player = state.turn.current_player;
            let direction = state.aim - state.table.cue().pos;
            if input.release {
                let power = state.turn.charge_power;
                apply_shot(state, player, direction, power, &mut events);
            } else {
                let max = state.config.max_power;
                state.turn.charge_power = (state.turn.charge_power + state.config.charge_rate).min(max);
                if state.turn.charge_power >= max {
                    apply_shot(state, player, direction, max, &mut events);
                }
            }
        }

        Phase::BallsInMotion => {
            let report = step_physics(&mut state.table, &state.config);
            for (a, b) in report.collisions {
                events.push(GameEvent::Collision { a, b });
            }
            for capture in report.captures {
                handle_capture(state, capture, &mut events);
            }

            if !state.table.any_moving() {
                events.push(GameEvent::MotionStopped);
                state.turn.phase = Phase::Resolving;
                resolve_shot(state, &mut events);
            }
        }

        // Waiting for the fouled cue ball to come back
        Phase::Resolving => {}

        Phase::GameOver => {}
    }

    state.turn.bodies_in_motion = state.table.any_moving();
    events
}

/// Strike the cue ball
///
/// Rejected (returns `false`, state untouched) unless it is `player`'s turn,
/// the table is at rest and the cue ball is on it. `direction` need not be
/// normalized; `power` is clamped to `[0, max_power]`.
pub fn apply_shot(
    state: &mut GameState,
    player: Player,
    direction: DVec2,
    power: f64,
    events: &mut Vec<GameEvent>,
) -> bool {
    let scale = state.config.shot_speed_scale;
    strike(state, player, direction, power, scale, events)
}

/// [`apply_shot`] with an explicit power-to-speed scale
fn strike(
    state: &mut GameState,
    player: Player,
    direction: DVec2,
    power: f64,
    speed_scale: f64,
    events: &mut Vec<GameEvent>,
) -> bool {
    if !matches!(state.turn.phase, Phase::WaitingForShot | Phase::Charging) {
        log::debug!("Shot rejected: phase is {:?}", state.turn.phase);
        return false;
    }
    if player != state.turn.current_player {
        log::debug!("Shot rejected: {:?} is out of turn", player);
        return false;
    }
    if state.table.any_moving() || !state.table.cue().is_active() {
        log::debug!("Shot rejected: table not at rest");
        return false;
    }
    if !direction.is_finite() || !power.is_finite() {
        log::debug!("Shot rejected: non-finite aim or power");
        return false;
    }

    let max = state.config.max_power;
    if !(0.0..=max).contains(&power) {
        log::warn!("Shot power {} clamped to [0, {}]", power, max);
    }
    let power = power.clamp(0.0, max);

    let speed = power * speed_scale;
    state.table.cue_mut().vel = direction.normalize_or_zero() * speed;

    let turn = &mut state.turn;
    turn.phase = Phase::BallsInMotion;
    turn.charge_power = 0.0;
    turn.foul = false;
    turn.continue_turn = false;
    turn.shots_taken += 1;
    turn.bodies_in_motion = state.table.any_moving();
    state.pending_captures.clear();
    state.ai_pending = false;

    log::info!("{:?} shoots with power {:.1}", player, power);
    events.push(GameEvent::ShotTaken { player, power });
    true
}

fn handle_capture(state: &mut GameState, capture: Capture, events: &mut Vec<GameEvent>) {
    events.push(GameEvent::Captured {
        body_id: capture.body_id,
        pocket_id: capture.pocket_id,
    });

    if state.table.cue().id == capture.body_id {
        let player = state.turn.current_player;
        log::info!("Foul: cue ball potted by {:?}", player);
        state.turn.foul = true;
        events.push(GameEvent::Foul {
            player,
            pocket_id: capture.pocket_id,
        });
        state.post_notice(NoticeKind::Foul { player });
        state.schedule(state.config.respawn_delay_ticks, TaskAction::RespawnCue);
    } else {
        state.pending_captures.push(capture);
    }
}

/// Apply a finished shot's pots and decide who plays next
fn resolve_shot(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player = state.turn.current_player;
    let captures = std::mem::take(&mut state.pending_captures);

    let mut turn = state.turn.clone();
    for capture in captures {
        let Some(kind) = state.table.body(capture.body_id).map(|b| b.kind) else {
            continue;
        };
        let groups_before = turn.groups;
        let was_over = turn.is_over();
        turn = on_ball_potted(state.mode, kind, player, &turn, &state.table);
        if was_over {
            continue;
        }

        let points = points_for(state.mode, kind);
        log::info!("{:?} pots ball {} ({:?})", player, capture.body_id, kind);
        events.push(GameEvent::Potted {
            player,
            body_id: capture.body_id,
            kind,
            points,
        });
        if groups_before != turn.groups {
            if let Some(group) = turn.group_of(player) {
                log::info!("{:?} takes {:?}", player, group);
                events.push(GameEvent::GroupsAssigned { player, group });
            }
        }
        if points > 0 {
            state.post_notice(NoticeKind::Pot { player, points });
        }
    }
    state.turn = check_game_end(state.mode, &turn, &state.table);

    if let Some(outcome) = state.turn.outcome {
        state.turn.phase = Phase::GameOver;
        log::info!("Game over: {:?} ({:?})", outcome, state.turn.scores);
        state.post_notice(NoticeKind::GameOver { outcome });
        events.push(GameEvent::GameOver { outcome });
    } else if state.turn.foul {
        // Respawn finishes the turn if the cue ball is still in the pocket
        if state.table.cue().is_active() {
            finish_turn(state, true, events);
        }
    } else {
        let switch = !state.turn.continue_turn;
        finish_turn(state, switch, events);
    }
}

/// Hand the table to the next shooter
fn finish_turn(state: &mut GameState, switch: bool, events: &mut Vec<GameEvent>) {
    let turn = &mut state.turn;
    if switch {
        turn.current_player = turn.current_player.other();
        log::info!("Turn passes to {:?}", turn.current_player);
        events.push(GameEvent::TurnChanged {
            player: turn.current_player,
        });
    }
    turn.phase = Phase::WaitingForShot;
    turn.charge_power = 0.0;
    turn.foul = false;
    turn.continue_turn = false;
}

fn run_due_tasks(state: &mut GameState, strategy: &mut dyn ShotStrategy, events: &mut Vec<GameEvent>) {
    for task in state.scheduler.take_due(state.time_ticks) {
        if task.epoch != state.epoch {
            log::debug!("Dropping stale {:?} from epoch {}", task.action, task.epoch);
            continue;
        }
        run_task(state, &task, strategy, events);
    }
}

fn run_task(
    state: &mut GameState,
    task: &ScheduledTask,
    strategy: &mut dyn ShotStrategy,
    events: &mut Vec<GameEvent>,
) {
    match task.action {
        TaskAction::RespawnCue => {
            let spawn = state.table.cue_spawn;
            state.table.cue_mut().respawn(spawn);
            log::info!("Cue ball respawned at ({}, {})", spawn.x, spawn.y);
            events.push(GameEvent::CueRespawned { pos: spawn });
            if matches!(state.notice.map(|n| n.kind), Some(NoticeKind::Foul { .. })) {
                state.notice = None;
            }
            if state.turn.phase == Phase::Resolving {
                finish_turn(state, true, events);
            }
        }

        TaskAction::DismissNotice { serial } => {
            if state.notice.is_some_and(|n| n.serial == serial) {
                state.notice = None;
                events.push(GameEvent::NoticeDismissed { serial });
            }
        }

        TaskAction::AiShot { player } => {
            let ready = state.turn.phase == Phase::WaitingForShot
                && state.turn.current_player == player
                && state.controller_of(player) == Controller::Ai;
            if !ready {
                log::debug!("AI shot for {:?} no longer applies", player);
                return;
            }

            let plan = strategy.plan_shot(
                state.mode,
                &state.table,
                &state.turn,
                player,
                &mut state.rng,
            );
            match plan {
                Some(shot) => {
                    let scale = state.config.ai_shot_speed_scale;
                    strike(state, player, shot.direction, shot.power, scale, events);
                }
                None => {
                    log::warn!("AI found no shot; retrying");
                    state.ai_pending = false;
                }
            }
        }
    }
}
