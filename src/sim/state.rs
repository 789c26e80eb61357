//! Game state and turn bookkeeping
//!
//! Everything a running game needs lives in [`GameState`]; it is only ever
//! changed by the transition functions in `tick`.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{BallKind, Group};
use super::pocket::Capture;
use super::schedule::{Scheduler, TaskAction};
use super::table::{GameMode, Table};
use crate::config::SimConfig;
use crate::error::ConfigResult;

/// One of the two seats at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Player {
    #[default]
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// Who is playing a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Controller {
    #[default]
    Human,
    Ai,
}

/// Current phase of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Table at rest, acting player may start a shot
    #[default]
    WaitingForShot,
    /// Cue held, power building up
    Charging,
    /// Balls rolling
    BallsInMotion,
    /// Shot finished, applying its pots (or waiting for a fouled cue ball)
    Resolving,
    /// Game decided
    GameOver,
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

/// Turn, score and rule state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnState {
    pub current_player: Player,
    pub phase: Phase,
    /// Power built up while charging, in `[0, max_power]`
    pub charge_power: f64,
    /// Any active ball still rolling
    pub bodies_in_motion: bool,
    /// Eight-ball group per player (indexed by [`Player::index`])
    pub groups: [Option<Group>; 2],
    pub scores: [u32; 2],
    pub outcome: Option<Outcome>,
    /// The cue ball was potted during the current shot
    pub foul: bool,
    /// The acting player earned another shot during the current shot
    pub continue_turn: bool,
    pub shots_taken: u32,
}

impl TurnState {
    pub fn group_of(&self, player: Player) -> Option<Group> {
        self.groups[player.index()]
    }

    pub fn score_of(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            Some(Outcome::Winner(p)) => Some(p),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Something the presentation layer should react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotTaken { player: Player, power: f64 },
    Collision { a: u32, b: u32 },
    Captured { body_id: u32, pocket_id: u32 },
    /// Cue ball potted
    Foul { player: Player, pocket_id: u32 },
    MotionStopped,
    Potted { player: Player, body_id: u32, kind: BallKind, points: u32 },
    GroupsAssigned { player: Player, group: Group },
    TurnChanged { player: Player },
    CueRespawned { pos: DVec2 },
    NoticeDismissed { serial: u64 },
    GameOver { outcome: Outcome },
}

/// Kind of transient on-screen message
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NoticeKind {
    Foul { player: Player },
    Pot { player: Player, points: u32 },
    GameOver { outcome: Outcome },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub serial: u64,
    pub kind: NoticeKind,
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: GameMode,
    pub config: SimConfig,
    pub table: Table,
    pub turn: TurnState,
    pub controllers: [Controller; 2],
    /// Transient message for the UI
    pub notice: Option<Notice>,
    /// Last aim point (table coordinates)
    pub aim: DVec2,
    /// Simulation tick counter, never reset
    pub time_ticks: u64,
    /// Bumped on every reset; stale timers compare against it
    pub epoch: u64,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) scheduler: Scheduler,
    /// Object-ball captures since the shot started
    pub(crate) pending_captures: Vec<Capture>,
    /// An AI shot is queued for the current turn
    pub(crate) ai_pending: bool,
    pub(crate) rng: Pcg32,
    next_notice: u64,
}

impl GameState {
    pub fn new(
        config: SimConfig,
        mode: GameMode,
        controllers: [Controller; 2],
        seed: u64,
    ) -> ConfigResult<Self> {
        let table = Table::new(&config, mode)?;
        let aim = table.cue_spawn + DVec2::X;
        Ok(Self {
            mode,
            config,
            table,
            turn: TurnState::default(),
            controllers,
            notice: None,
            aim,
            time_ticks: 0,
            epoch: 0,
            seed,
            scheduler: Scheduler::new(),
            pending_captures: Vec::new(),
            ai_pending: false,
            rng: Pcg32::seed_from_u64(seed),
            next_notice: 1,
        })
    }

    /// Start over in `mode`
    ///
    /// Pending timers stay queued but belong to the old epoch and will be
    /// discarded when they fire.
    pub fn reset(&mut self, mode: GameMode) {
        self.epoch += 1;
        self.mode = mode;
        self.table.rack(mode);
        self.turn = TurnState::default();
        self.notice = None;
        self.aim = self.table.cue_spawn + DVec2::X;
        self.pending_captures.clear();
        self.ai_pending = false;
        log::info!("New {} game (epoch {})", mode.as_str(), self.epoch);
    }

    pub fn controller_of(&self, player: Player) -> Controller {
        self.controllers[player.index()]
    }

    /// Controller of the player whose turn it is
    pub fn acting_controller(&self) -> Controller {
        self.controller_of(self.turn.current_player)
    }

    /// Queue a delayed action for the current game
    pub(crate) fn schedule(&mut self, delay: u64, action: TaskAction) {
        self.scheduler
            .schedule(self.time_ticks, delay, self.epoch, action);
    }

    /// Show a notice; pot notices clear themselves after a while
    pub(crate) fn post_notice(&mut self, kind: NoticeKind) {
        let serial = self.next_notice;
        self.next_notice += 1;
        self.notice = Some(Notice { serial, kind });
        if matches!(kind, NoticeKind::Pot { .. }) {
            self.schedule(self.config.notice_ticks, TaskAction::DismissNotice { serial });
        }
    }

    /// Tasks waiting in the virtual-time queue
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_state() -> GameState {
        GameState::new(
            SimConfig::default(),
            GameMode::EightBall,
            [Controller::Human, Controller::Ai],
            7,
        )
        .unwrap()
    }

    #[test]
    fn test_player_helpers() {
        assert_eq!(Player::One.other(), Player::Two);
        assert_eq!(Player::Two.index(), 1);
    }

    #[test]
    fn test_new_state() {
        let state = new_state();
        assert_eq!(state.turn.phase, Phase::WaitingForShot);
        assert_eq!(state.turn.current_player, Player::One);
        assert_eq!(state.acting_controller(), Controller::Human);
        assert_eq!(state.controller_of(Player::Two), Controller::Ai);
        assert_eq!(state.turn.charge_power, 0.0);
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = SimConfig {
            friction: 1.5,
            ..Default::default()
        };
        assert!(GameState::new(config, GameMode::NineBall, [Controller::Human; 2], 1).is_err());
    }

    #[test]
    fn test_reset_bumps_epoch_and_keeps_timers() {
        let mut state = new_state();
        state.schedule(10, TaskAction::RespawnCue);
        state.turn.scores = [3, 2];
        state.reset(GameMode::Snooker);
        assert_eq!(state.epoch, 1);
        assert_eq!(state.turn.scores, [0, 0]);
        assert_eq!(state.table.bodies.len(), 13);
        assert_eq!(state.pending_tasks(), 1);
    }

    #[test]
    fn test_pot_notice_schedules_dismissal() {
        let mut state = new_state();
        state.post_notice(NoticeKind::Pot {
            player: Player::One,
            points: 1,
        });
        assert_eq!(state.notice.map(|n| n.serial), Some(1));
        assert_eq!(state.pending_tasks(), 1);

        state.post_notice(NoticeKind::Foul { player: Player::One });
        assert_eq!(state.notice.map(|n| n.serial), Some(2));
        assert_eq!(state.pending_tasks(), 1);
    }
}
