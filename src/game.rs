//! Game facade
//!
//! [`PoolGame`] is what a presentation layer talks to: it owns the state and
//! the AI strategy, feeds one [`TickInput`] per frame and hands back the
//! events that frame produced.

use glam::DVec2;
use serde::Serialize;

use crate::ai::{RandomTargetStrategy, ShotStrategy};
use crate::config::SimConfig;
use crate::error::ConfigResult;
use crate::sim::{
    Body, Controller, GameEvent, GameMode, GameState, Notice, Player, TickInput, TurnState,
    apply_shot, tick,
};

/// Read-only view of a running game, for rendering or export
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub mode: &'static str,
    pub time_ticks: u64,
    pub turn: &'a TurnState,
    pub bodies: &'a [Body],
    pub notice: Option<Notice>,
    pub aim: DVec2,
}

impl Snapshot<'_> {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

pub struct PoolGame {
    state: GameState,
    strategy: Box<dyn ShotStrategy>,
    /// Events from direct shots, delivered with the next tick
    queued: Vec<GameEvent>,
}

impl PoolGame {
    /// New game with the random-target AI
    pub fn new(
        config: SimConfig,
        mode: GameMode,
        controllers: [Controller; 2],
        seed: u64,
    ) -> ConfigResult<Self> {
        let state = GameState::new(config, mode, controllers, seed)?;
        log::info!(
            "New {} game, seed {}, controllers {:?}",
            mode.as_str(),
            seed,
            controllers
        );
        Ok(Self {
            state,
            strategy: Box::new(RandomTargetStrategy::default()),
            queued: Vec::new(),
        })
    }

    /// Swap in a different AI
    pub fn with_strategy(mut self, strategy: Box<dyn ShotStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Advance one frame
    pub fn tick(&mut self, input: &TickInput) -> Vec<GameEvent> {
        let mut events = std::mem::take(&mut self.queued);
        events.extend(tick(&mut self.state, input, self.strategy.as_mut()));
        events
    }

    /// Shoot directly, bypassing the charge meter
    ///
    /// Returns `false` when the shot is not allowed right now.
    pub fn apply_shot(&mut self, player: Player, direction: DVec2, power: f64) -> bool {
        apply_shot(&mut self.state, player, direction, power, &mut self.queued)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.state.table.bodies
    }

    pub fn turn_state(&self) -> &TurnState {
        &self.state.turn
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    pub fn is_over(&self) -> bool {
        self.state.turn.is_over()
    }

    /// Start a fresh game; timers from the old one are ignored when they fire
    pub fn reset(&mut self, mode: GameMode) {
        self.queued.clear();
        self.state.reset(mode);
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            mode: self.state.mode.as_str(),
            time_ticks: self.state.time_ticks,
            turn: &self.state.turn,
            bodies: &self.state.table.bodies,
            notice: self.state.notice,
            aim: self.state.aim,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::NearestLegalStrategy;
    use crate::sim::Phase;

    fn humans() -> PoolGame {
        PoolGame::new(SimConfig::default(), GameMode::EightBall, [Controller::Human; 2], 3).unwrap()
    }

    #[test]
    fn test_shot_events_arrive_with_next_tick() {
        let mut game = humans();
        assert!(game.apply_shot(Player::One, DVec2::X, 40.0));
        assert_eq!(game.turn_state().phase, Phase::BallsInMotion);

        let events = game.tick(&TickInput::default());
        assert_eq!(
            events[0],
            GameEvent::ShotTaken {
                player: Player::One,
                power: 40.0
            }
        );
        let events = game.tick(&TickInput::default());
        assert!(!events.iter().any(|e| matches!(e, GameEvent::ShotTaken { .. })));
    }

    #[test]
    fn test_power_is_clamped() {
        let mut game = humans();
        assert!(game.apply_shot(Player::One, DVec2::new(0.0, 2.0), 250.0));
        let cue = &game.bodies()[0];
        assert!((cue.vel - DVec2::new(0.0, 15.0)).length() < 1e-12);
    }

    #[test]
    fn test_rejects_wrong_player() {
        let mut game = humans();
        assert!(!game.apply_shot(Player::Two, DVec2::X, 40.0));
        assert!(game.tick(&TickInput::default()).is_empty());
    }

    #[test]
    fn test_reset_switches_mode() {
        let mut game = humans();
        game.apply_shot(Player::One, DVec2::X, 40.0);
        game.reset(GameMode::NineBall);
        assert_eq!(game.mode(), GameMode::NineBall);
        assert_eq!(game.bodies().len(), 10);
        assert_eq!(game.turn_state().phase, Phase::WaitingForShot);
        // Events of the abandoned shot are dropped
        assert!(game.tick(&TickInput::default()).is_empty());
    }

    #[test]
    fn test_ai_vs_ai_keeps_playing() {
        let mut game = PoolGame::new(SimConfig::default(), GameMode::NineBall, [Controller::Ai; 2], 77)
            .unwrap()
            .with_strategy(Box::new(NearestLegalStrategy));
        for _ in 0..5000 {
            game.tick(&TickInput::default());
        }
        assert!(game.turn_state().shots_taken >= 5);

        let bounds = game.state().table.bounds;
        for body in game.bodies().iter().filter(|b| b.is_active()) {
            let r = body.radius;
            assert!(body.pos.x >= bounds.x - r && body.pos.x <= bounds.right() + r);
            assert!(body.pos.y >= bounds.y - r && body.pos.y <= bounds.bottom() + r);
        }
    }

    #[test]
    fn test_snapshot_json() {
        let game = humans();
        let json = game.snapshot().to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mode"], "8ball");
        assert_eq!(value["bodies"].as_array().map(|b| b.len()), Some(16));
        assert_eq!(value["turn"]["phase"], "WaitingForShot");
    }
}
