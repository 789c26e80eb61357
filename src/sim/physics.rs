//! Per-ball motion: integration, friction and cushion bounces
//!
//! Velocities are in table units per tick; there is no `dt`. Each tick a
//! rolling ball moves by its velocity and then loses a fixed fraction of it.

use glam::DVec2;

use super::body::Body;
use crate::config::TableBounds;

/// Advance one ball by one tick
///
/// A ball with either velocity component above `stop_epsilon` moves and then
/// decays by `friction`. Otherwise its velocity snaps to exactly zero, so a
/// rolling ball always comes to rest in finitely many ticks.
///
/// Returns whether the ball moved.
pub fn integrate(body: &mut Body, friction: f64, stop_epsilon: f64) -> bool {
    if !body.is_active() {
        return false;
    }

    if body.vel.x.abs() > stop_epsilon || body.vel.y.abs() > stop_epsilon {
        body.pos += body.vel;
        body.vel *= friction;
        debug_assert!(body.pos.is_finite(), "ball {} left the reals", body.id);
        true
    } else {
        body.vel = DVec2::ZERO;
        false
    }
}

/// Bounce a ball off the four cushions
///
/// A ball poking through a cushion is pushed back to the radius-inset line
/// and the matching velocity component is pointed inward, scaled by
/// `restitution`. A ball resting exactly on the inset line is left alone.
///
/// Returns whether any cushion was hit.
pub fn reflect_walls(body: &mut Body, bounds: &TableBounds, restitution: f64) -> bool {
    if !body.is_active() {
        return false;
    }

    let r = body.radius;
    let mut hit = false;

    if body.pos.x - r < bounds.x {
        body.pos.x = bounds.x + r;
        body.vel.x = body.vel.x.abs() * restitution;
        hit = true;
    }
    if body.pos.x + r > bounds.right() {
        body.pos.x = bounds.right() - r;
        body.vel.x = -body.vel.x.abs() * restitution;
        hit = true;
    }
    if body.pos.y - r < bounds.y {
        body.pos.y = bounds.y + r;
        body.vel.y = body.vel.y.abs() * restitution;
        hit = true;
    }
    if body.pos.y + r > bounds.bottom() {
        body.pos.y = bounds.bottom() - r;
        body.vel.y = -body.vel.y.abs() * restitution;
        hit = true;
    }

    hit
}
