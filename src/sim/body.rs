//! Balls on the table
//!
//! A [`Body`] is the only moving thing the simulation knows about. What a
//! ball means for scoring is carried by its [`BallKind`].

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Id of the cue ball in every rack
pub const CUE_BALL_ID: u32 = 0;

/// Ball group in eight-ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    Solids,
    Stripes,
}

impl Group {
    pub fn other(self) -> Self {
        match self {
            Group::Solids => Group::Stripes,
            Group::Stripes => Group::Solids,
        }
    }
}

/// What a ball is, which decides what potting it does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallKind {
    Cue,
    /// Eight-ball solids (1-7)
    Solid(u8),
    /// Eight-ball stripes (9-15)
    Stripe(u8),
    /// Nine-ball object balls (1-8)
    Numbered(u8),
    /// The game-ending ball of its mode (8 or 9)
    Terminal(u8),
    /// Snooker red, worth one point
    Red,
    /// Snooker colour with its point value
    Colored { points: u32 },
}

impl BallKind {
    /// Eight-ball group this ball belongs to, if any
    pub fn group(self) -> Option<Group> {
        match self {
            BallKind::Solid(_) => Some(Group::Solids),
            BallKind::Stripe(_) => Some(Group::Stripes),
            _ => None,
        }
    }

    /// Number printed on the ball
    pub fn number(self) -> Option<u8> {
        match self {
            BallKind::Solid(n) | BallKind::Stripe(n) | BallKind::Numbered(n) | BallKind::Terminal(n) => {
                Some(n)
            }
            BallKind::Cue | BallKind::Red | BallKind::Colored { .. } => None,
        }
    }

    /// Snooker value of the ball
    pub fn points(self) -> u32 {
        match self {
            BallKind::Colored { points } => points,
            _ => 1,
        }
    }
}

/// A ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    pub kind: BallKind,
    /// Potted for good; inert from then on
    pub captured: bool,
    /// Cue ball removed after a foul, waiting to be respawned
    pub in_hand: bool,
}

impl Body {
    pub fn new(id: u32, kind: BallKind, pos: DVec2, radius: f64) -> Self {
        Self {
            id,
            pos,
            vel: DVec2::ZERO,
            radius,
            kind,
            captured: false,
            in_hand: false,
        }
    }

    /// Whether the ball currently takes part in the simulation
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.captured && !self.in_hand
    }

    #[inline]
    pub fn is_cue(&self) -> bool {
        matches!(self.kind, BallKind::Cue)
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.vel != DVec2::ZERO
    }

    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// Kinetic energy up to the (equal, unit) mass factor
    pub fn energy(&self) -> f64 {
        0.5 * self.vel.length_squared()
    }

    /// Take the ball out of play for good
    pub fn capture(&mut self) {
        self.captured = true;
        self.vel = DVec2::ZERO;
    }

    /// Put the (cue) ball back at `pos`, at rest
    pub fn respawn(&mut self, pos: DVec2) {
        self.pos = pos;
        self.vel = DVec2::ZERO;
        self.in_hand = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_kind_groups() {
        assert_eq!(BallKind::Solid(3).group(), Some(Group::Solids));
        assert_eq!(BallKind::Stripe(12).group(), Some(Group::Stripes));
        assert_eq!(BallKind::Terminal(8).group(), None);
        assert_eq!(Group::Solids.other(), Group::Stripes);
    }

    #[test]
    fn test_ball_kind_points() {
        assert_eq!(BallKind::Red.points(), 1);
        assert_eq!(BallKind::Colored { points: 7 }.points(), 7);
        assert_eq!(BallKind::Terminal(9).number(), Some(9));
        assert_eq!(BallKind::Cue.number(), None);
    }

    #[test]
    fn test_capture_stops_ball() {
        let mut body = Body::new(3, BallKind::Solid(3), DVec2::new(100.0, 100.0), 12.0);
        body.vel = DVec2::new(2.0, -1.0);
        body.capture();
        assert!(!body.is_active());
        assert!(!body.is_moving());
    }

    #[test]
    fn test_respawn_restores_cue() {
        let mut cue = Body::new(CUE_BALL_ID, BallKind::Cue, DVec2::new(60.0, 60.0), 12.0);
        cue.in_hand = true;
        cue.respawn(DVec2::new(250.0, 250.0));
        assert!(cue.is_active());
        assert_eq!(cue.pos, DVec2::new(250.0, 250.0));
    }
}
