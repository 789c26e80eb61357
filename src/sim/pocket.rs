//! Pockets and capture detection

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::config::TableBounds;

/// A capture zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pocket {
    pub id: u32,
    pub pos: DVec2,
    pub capture_radius: f64,
}

impl Pocket {
    pub fn new(id: u32, pos: DVec2, capture_radius: f64) -> Self {
        Self {
            id,
            pos,
            capture_radius,
        }
    }

    /// Whether a ball centred at `pos` drops into this pocket
    #[inline]
    pub fn captures(&self, pos: DVec2) -> bool {
        pos.distance(self.pos) < self.capture_radius
    }
}

/// Six-pocket layout: four corners plus the middle of each long rail
///
/// Ids run top-left, top-middle, top-right, bottom-left, bottom-middle,
/// bottom-right.
pub fn six_pockets(bounds: &TableBounds, corner_radius: f64, side_radius: f64) -> Vec<Pocket> {
    let mid_x = bounds.x + bounds.width / 2.0;
    [
        (DVec2::new(bounds.x, bounds.y), corner_radius),
        (DVec2::new(mid_x, bounds.y), side_radius),
        (DVec2::new(bounds.right(), bounds.y), corner_radius),
        (DVec2::new(bounds.x, bounds.bottom()), corner_radius),
        (DVec2::new(mid_x, bounds.bottom()), side_radius),
        (DVec2::new(bounds.right(), bounds.bottom()), corner_radius),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (pos, radius))| Pocket::new(i as u32, pos, radius))
    .collect()
}

/// A ball dropping into a pocket this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub body_id: u32,
    pub pocket_id: u32,
}

/// Test every active ball against every pocket
///
/// Object balls are captured for good. The cue ball is only taken off the
/// table (`in_hand`); bringing it back is the turn machine's job. Balls are
/// checked in id order and each drops into the first pocket that takes it.
pub fn detect_captures(bodies: &mut [Body], pockets: &[Pocket]) -> Vec<Capture> {
    let mut captures = Vec::new();
    for body in bodies.iter_mut().filter(|b| b.is_active()) {
        let Some(pocket) = pockets.iter().find(|p| p.captures(body.pos)) else {
            continue;
        };

        if body.is_cue() {
            body.in_hand = true;
            body.vel = DVec2::ZERO;
        } else {
            body.capture();
        }
        captures.push(Capture {
            body_id: body.id,
            pocket_id: pocket.id,
        });
    }
    captures
}
