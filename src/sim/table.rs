//! The table: bounds, pockets and the ball registry
//!
//! Balls are stored sorted by id with the cue ball (id 0) first. Nothing is
//! ever removed; potted balls stay in the registry flagged as captured.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::body::{BallKind, Body, CUE_BALL_ID, Group};
use super::pocket::{Pocket, six_pockets};
use crate::config::{SimConfig, TableBounds};
use crate::error::ConfigResult;

/// Rule set a game is played under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    EightBall,
    NineBall,
    Snooker,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::EightBall => "8ball",
            GameMode::NineBall => "9ball",
            GameMode::Snooker => "snooker",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "8ball" | "eight" | "eightball" | "eight-ball" => Some(GameMode::EightBall),
            "9ball" | "nine" | "nineball" | "nine-ball" => Some(GameMode::NineBall),
            "snooker" => Some(GameMode::Snooker),
            _ => None,
        }
    }
}

/// Snooker colours in the order they sit on the table
const SNOOKER_COLOUR_POINTS: [u32; 6] = [2, 3, 4, 5, 6, 7];
const SNOOKER_REDS: usize = 6;
const SNOOKER_RED_RING: f64 = 40.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub bounds: TableBounds,
    pub pockets: Vec<Pocket>,
    /// All balls, sorted by id; the cue ball is `bodies[0]`
    pub bodies: Vec<Body>,
    /// Where the cue ball starts and respawns
    pub cue_spawn: DVec2,
    ball_radius: f64,
    rack_spacing: f64,
}

impl Table {
    /// Build a racked table for `mode`; fails if the config is out of range
    pub fn new(config: &SimConfig, mode: GameMode) -> ConfigResult<Self> {
        config.validate()?;

        let bounds = config.table;
        let mut table = Self {
            bounds,
            pockets: six_pockets(&bounds, config.corner_pocket_radius, config.side_pocket_radius),
            bodies: Vec::new(),
            cue_spawn: DVec2::new(bounds.x + bounds.width * 0.25, bounds.y + bounds.height / 2.0),
            ball_radius: config.ball_radius,
            rack_spacing: config.rack_spacing(),
        };
        table.rack(mode);
        Ok(table)
    }

    /// Clear the table and set up the balls for `mode`
    pub fn rack(&mut self, mode: GameMode) {
        self.bodies.clear();
        self.bodies
            .push(Body::new(CUE_BALL_ID, BallKind::Cue, self.cue_spawn, self.ball_radius));

        match mode {
            GameMode::EightBall => self.rack_triangle(),
            GameMode::NineBall => self.rack_diamond(),
            GameMode::Snooker => self.rack_snooker(),
        }

        self.bodies.sort_by_key(|b| b.id);
        log::debug!("Racked {} balls for {}", self.bodies.len(), mode.as_str());
    }

    fn apex(&self, frac_x: f64) -> DVec2 {
        DVec2::new(
            self.bounds.x + self.bounds.width * frac_x,
            self.bounds.y + self.bounds.height / 2.0,
        )
    }

    /// 15 balls, five rows, apex facing the cue ball
    fn rack_triangle(&mut self) {
        let apex = self.apex(0.7);
        let s = self.rack_spacing;
        let mut id = 1u32;
        for row in 0..5 {
            let row_start_y = apex.y - row as f64 * s / 2.0;
            for col in 0..=row {
                let n = id as u8;
                let kind = match n {
                    8 => BallKind::Terminal(8),
                    1..=7 => BallKind::Solid(n),
                    _ => BallKind::Stripe(n),
                };
                let pos = DVec2::new(apex.x + row as f64 * s, row_start_y + col as f64 * s);
                self.bodies.push(Body::new(id, kind, pos, self.ball_radius));
                id += 1;
            }
        }
    }

    /// Nine balls in a diamond: 1 at the front, 9 at the back
    fn rack_diamond(&mut self) {
        let apex = self.apex(0.7);
        let s = self.rack_spacing;
        let offsets = [
            (0.0, 0.0),
            (s, -s / 2.0),
            (s, s / 2.0),
            (s * 2.0, -s),
            (s * 2.0, 0.0),
            (s * 2.0, s),
            (s * 3.0, -s / 2.0),
            (s * 3.0, s / 2.0),
            (s * 4.0, 0.0),
        ];
        for (i, (dx, dy)) in offsets.into_iter().enumerate() {
            let n = (i + 1) as u8;
            let kind = if n == 9 {
                BallKind::Terminal(9)
            } else {
                BallKind::Numbered(n)
            };
            let pos = apex + DVec2::new(dx, dy);
            self.bodies.push(Body::new(n as u32, kind, pos, self.ball_radius));
        }
    }

    /// Six reds in a ring, six colours in a column behind them
    fn rack_snooker(&mut self) {
        let centre = self.apex(0.6);
        for i in 0..SNOOKER_REDS {
            let angle = std::f64::consts::TAU / SNOOKER_REDS as f64 * i as f64;
            let pos = centre + DVec2::new(angle.cos(), angle.sin()) * SNOOKER_RED_RING;
            self.bodies
                .push(Body::new(i as u32 + 1, BallKind::Red, pos, self.ball_radius));
        }

        let column_x = self.bounds.x + self.bounds.width * 0.8;
        for (i, points) in SNOOKER_COLOUR_POINTS.into_iter().enumerate() {
            let pos = DVec2::new(
                column_x,
                self.bounds.y + self.bounds.height * (0.2 + i as f64 * 0.12),
            );
            let id = (SNOOKER_REDS + i + 1) as u32;
            self.bodies
                .push(Body::new(id, BallKind::Colored { points }, pos, self.ball_radius));
        }
    }

    pub fn cue(&self) -> &Body {
        &self.bodies[0]
    }

    pub fn cue_mut(&mut self) -> &mut Body {
        &mut self.bodies[0]
    }

    pub fn body(&self, id: u32) -> Option<&Body> {
        self.bodies
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|i| &self.bodies[i])
    }

    pub fn body_mut(&mut self, id: u32) -> Option<&mut Body> {
        self.bodies
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|i| &mut self.bodies[i])
    }

    /// Object balls still in play
    pub fn active_objects(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| !b.is_cue() && b.is_active())
    }

    pub fn active_object_count(&self) -> usize {
        self.active_objects().count()
    }

    /// Whether every ball of `group` has been potted
    pub fn group_cleared(&self, group: Group) -> bool {
        self.bodies
            .iter()
            .filter(|b| b.kind.group() == Some(group))
            .all(|b| b.captured)
    }

    /// Any active ball with non-zero velocity
    pub fn any_moving(&self) -> bool {
        self.bodies.iter().any(|b| b.is_active() && b.is_moving())
    }
}
