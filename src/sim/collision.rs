//! Ball-ball collision detection and response
//!
//! Equal-mass circles. A hit separates the pair along the line of centres and
//! swaps their normal velocity components, damped by the restitution factor;
//! tangential components pass through untouched.

use glam::DVec2;

use super::body::Body;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Direction of the line of centres, from the first ball to the second
    pub angle: f64,
    /// Overlap of the two circles (for position correction)
    pub penetration: f64,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            angle: 0.0,
            penetration: 0.0,
        }
    }
}

/// Check two circles for overlap
///
/// Touching exactly (`distance == ra + rb`) is not a collision.
pub fn ball_ball_collision(a_pos: DVec2, a_radius: f64, b_pos: DVec2, b_radius: f64) -> CollisionResult {
    let d = b_pos - a_pos;
    let distance = (d.x * d.x + d.y * d.y).sqrt();
    let reach = a_radius + b_radius;

    if distance < reach {
        CollisionResult {
            hit: true,
            angle: d.y.atan2(d.x),
            penetration: reach - distance,
        }
    } else {
        CollisionResult::miss()
    }
}

/// Rotate a world-space velocity into the (normal, tangent) frame
#[inline]
fn to_contact_frame(v: DVec2, cos: f64, sin: f64) -> (f64, f64) {
    (v.x * cos + v.y * sin, v.y * cos - v.x * sin)
}

/// Rotate a (normal, tangent) pair back into world space
#[inline]
fn from_contact_frame(normal: f64, tangent: f64, cos: f64, sin: f64) -> DVec2 {
    DVec2::new(normal * cos - tangent * sin, tangent * cos + normal * sin)
}

/// Resolve a collision between two balls in place
///
/// Returns whether they were touching.
pub fn resolve_pair(a: &mut Body, b: &mut Body, restitution: f64) -> bool {
    if !a.is_active() || !b.is_active() {
        return false;
    }

    let result = ball_ball_collision(a.pos, a.radius, b.pos, b.radius);
    if !result.hit {
        return false;
    }

    let (sin, cos) = result.angle.sin_cos();

    // Push apart, half each
    let push = DVec2::new(cos, sin) * (result.penetration * 0.5);
    a.pos -= push;
    b.pos += push;

    let (a_normal, a_tangent) = to_contact_frame(a.vel, cos, sin);
    let (b_normal, b_tangent) = to_contact_frame(b.vel, cos, sin);

    a.vel = from_contact_frame(b_normal * restitution, a_tangent, cos, sin);
    b.vel = from_contact_frame(a_normal * restitution, b_tangent, cos, sin);

    true
}

/// Resolve every touching pair among `bodies`
///
/// `bodies` must be sorted by id; pairs are visited in ascending `(a, b)`
/// order so simultaneous contacts resolve the same way every run.
/// Returns the ids of the pairs that collided.
pub fn resolve_all(bodies: &mut [Body], restitution: f64) -> Vec<(u32, u32)> {
    debug_assert!(bodies.windows(2).all(|w| w[0].id < w[1].id), "bodies not in id order");

    let mut hits = Vec::new();
    for i in 0..bodies.len() {
        if !bodies[i].is_active() {
            continue;
        }
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if resolve_pair(a, b, restitution) {
                hits.push((a.id, b.id));
            }
        }
    }
    hits
}
