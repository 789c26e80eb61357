//! Computer opponents
//!
//! A strategy looks at the table and picks a shot. It never touches game
//! state; the turn machine decides when it is asked and applies the result.

use glam::DVec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::sim::{BallKind, Body, GameMode, Player, Table, TurnState};

/// A planned shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    /// Aim direction (normalized by the caller)
    pub direction: DVec2,
    pub power: f64,
}

impl Shot {
    /// Straight at `target` from the cue ball
    pub fn at(table: &Table, target: DVec2, power: f64) -> Self {
        Self {
            direction: (target - table.cue().pos).normalize_or_zero(),
            power,
        }
    }
}

/// Picks a shot for a computer-controlled player
pub trait ShotStrategy {
    /// `None` when the strategy sees nothing worth hitting
    fn plan_shot(
        &mut self,
        mode: GameMode,
        table: &Table,
        turn: &TurnState,
        player: Player,
        rng: &mut Pcg32,
    ) -> Option<Shot>;
}

/// Hit a random ball, at random power
#[derive(Debug, Clone)]
pub struct RandomTargetStrategy {
    pub min_power: f64,
    pub max_power: f64,
}

impl Default for RandomTargetStrategy {
    fn default() -> Self {
        Self {
            min_power: 30.0,
            max_power: 70.0,
        }
    }
}

impl ShotStrategy for RandomTargetStrategy {
    fn plan_shot(
        &mut self,
        _mode: GameMode,
        table: &Table,
        _turn: &TurnState,
        _player: Player,
        rng: &mut Pcg32,
    ) -> Option<Shot> {
        let targets: Vec<&Body> = table.active_objects().collect();
        if targets.is_empty() {
            return None;
        }
        let target = targets[rng.random_range(0..targets.len())];
        let power = self.min_power + rng.random::<f64>() * (self.max_power - self.min_power);
        Some(Shot::at(table, target.pos, power))
    }
}

/// Aim at the closest ball the rules want hit next
///
/// Eight-ball: anything until groups are set, then own group, then the 8. Nine-ball: the
/// lowest number on the table. Snooker: anything. Power scales with distance.
#[derive(Debug, Clone, Default)]
pub struct NearestLegalStrategy;

impl NearestLegalStrategy {
    fn is_legal(mode: GameMode, kind: BallKind, table: &Table, turn: &TurnState, player: Player) -> bool {
        match mode {
            GameMode::EightBall => match (turn.group_of(player), kind) {
                (None, _) => true,
                (Some(group), BallKind::Terminal(_)) => table.group_cleared(group),
                (Some(group), _) => kind.group() == Some(group),
            },
            GameMode::NineBall => {
                let lowest = table.active_objects().filter_map(|b| b.kind.number()).min();
                kind.number() == lowest
            }
            GameMode::Snooker => true,
        }
    }
}

impl ShotStrategy for NearestLegalStrategy {
    fn plan_shot(
        &mut self,
        mode: GameMode,
        table: &Table,
        turn: &TurnState,
        player: Player,
        _rng: &mut Pcg32,
    ) -> Option<Shot> {
        let cue = table.cue().pos;
        let by_distance = |a: &&Body, b: &&Body| {
            a.pos
                .distance(cue)
                .partial_cmp(&b.pos.distance(cue))
                .unwrap_or(std::cmp::Ordering::Equal)
        };

        let target = table
            .active_objects()
            .filter(|b| Self::is_legal(mode, b.kind, table, turn, player))
            .min_by(by_distance)
            .or_else(|| table.active_objects().min_by(by_distance))?;

        let power = (20.0 + target.pos.distance(cue) * 0.1).clamp(30.0, 70.0);
        Some(Shot::at(table, target.pos, power))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::Group;
    use rand::SeedableRng;

    fn table(mode: GameMode) -> Table {
        Table::new(&SimConfig::default(), mode).unwrap()
    }

    #[test]
    fn test_random_strategy_is_seeded() {
        let table = table(GameMode::EightBall);
        let turn = TurnState::default();
        let mut strategy = RandomTargetStrategy::default();

        let mut rng1 = Pcg32::seed_from_u64(42);
        let mut rng2 = Pcg32::seed_from_u64(42);
        let a = strategy.plan_shot(GameMode::EightBall, &table, &turn, Player::Two, &mut rng1);
        let b = strategy.plan_shot(GameMode::EightBall, &table, &turn, Player::Two, &mut rng2);
        assert_eq!(a, b);

        let shot = a.unwrap();
        assert!((30.0..70.0).contains(&shot.power));
        assert!((shot.direction.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_random_strategy_without_targets() {
        let mut table = table(GameMode::NineBall);
        for id in 1..=9 {
            table.body_mut(id).unwrap().capture();
        }
        let mut rng = Pcg32::seed_from_u64(1);
        let shot = RandomTargetStrategy::default().plan_shot(
            GameMode::NineBall,
            &table,
            &TurnState::default(),
            Player::One,
            &mut rng,
        );
        assert!(shot.is_none());
    }

    #[test]
    fn test_nearest_legal_nine_ball_aims_at_lowest() {
        let mut table = table(GameMode::NineBall);
        table.body_mut(1).unwrap().capture();
        let mut rng = Pcg32::seed_from_u64(1);
        let shot = NearestLegalStrategy
            .plan_shot(GameMode::NineBall, &table, &TurnState::default(), Player::One, &mut rng)
            .unwrap();
        let expected = (table.body(2).unwrap().pos - table.cue().pos).normalize();
        assert!((shot.direction - expected).length() < 1e-9);
    }

    #[test]
    fn test_nearest_legal_eight_ball_respects_group() {
        let table = table(GameMode::EightBall);
        let turn = TurnState {
            groups: [Some(Group::Stripes), Some(Group::Solids)],
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let shot = NearestLegalStrategy
            .plan_shot(GameMode::EightBall, &table, &turn, Player::One, &mut rng)
            .unwrap();
        // Ball 1 is the apex and nearest overall, but it is a solid
        let apex_dir = (table.body(1).unwrap().pos - table.cue().pos).normalize();
        assert!((shot.direction - apex_dir).length() > 1e-6);
    }
}
