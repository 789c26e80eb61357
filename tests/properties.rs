//! Property tests for the simulation invariants

use glam::DVec2;
use proptest::prelude::*;

use pool_sim::config::{SimConfig, TableBounds};
use pool_sim::sim::{
    BallKind, Body, Controller, GameMode, GameState, Phase, Player, Table, TickInput, apply_shot,
    detect_captures, integrate, reflect_walls, resolve_pair, six_pockets, step_physics, tick,
};
use pool_sim::RandomTargetStrategy;

const R: f64 = 12.0;

fn ball(id: u32, pos: DVec2, vel: DVec2) -> Body {
    let mut b = Body::new(id, BallKind::Numbered(id as u8), pos, R);
    b.vel = vel;
    b
}

fn vec_in(lo: f64, hi: f64) -> impl Strategy<Value = DVec2> {
    (lo..hi, lo..hi).prop_map(|(x, y)| DVec2::new(x, y))
}

proptest! {
    #[test]
    fn friction_never_speeds_a_ball_up(pos in vec_in(100.0, 400.0), vel in vec_in(-20.0, 20.0)) {
        let mut b = ball(1, pos, vel);
        let before = b.speed();
        integrate(&mut b, 0.98, 0.1);
        prop_assert!(b.speed() <= before);
    }

    #[test]
    fn walls_keep_balls_on_the_table(
        x in -100.0f64..1000.0,
        y in -100.0f64..600.0,
        vel in vec_in(-20.0, 20.0),
    ) {
        let bounds = TableBounds::default();
        let mut b = ball(1, DVec2::new(x, y), vel);
        reflect_walls(&mut b, &bounds, 0.7);

        let eps = 1e-9;
        prop_assert!(b.pos.x >= bounds.x + R - eps && b.pos.x <= bounds.right() - R + eps);
        prop_assert!(b.pos.y >= bounds.y + R - eps && b.pos.y <= bounds.bottom() - R + eps);
        prop_assert!(b.speed() <= vel.length() + eps);
    }

    #[test]
    fn collisions_do_not_create_energy(
        offset in vec_in(-23.0, 23.0),
        va in vec_in(-15.0, 15.0),
        vb in vec_in(-15.0, 15.0),
    ) {
        prop_assume!(offset.length() > 1e-3);
        let mut a = ball(1, DVec2::new(300.0, 250.0), va);
        let mut b = ball(2, DVec2::new(300.0, 250.0) + offset, vb);
        let before = a.energy() + b.energy();

        resolve_pair(&mut a, &mut b, 0.8);
        prop_assert!(a.energy() + b.energy() <= before + 1e-9);
    }

    #[test]
    fn resolved_pair_no_longer_overlaps(
        offset in vec_in(-23.0, 23.0),
        va in vec_in(-15.0, 15.0),
    ) {
        prop_assume!(offset.length() > 1e-3);
        let mut a = ball(1, DVec2::new(300.0, 250.0), va);
        let mut b = ball(2, DVec2::new(300.0, 250.0) + offset, DVec2::ZERO);

        resolve_pair(&mut a, &mut b, 0.8);
        prop_assert!(a.pos.distance(b.pos) >= 2.0 * R - 1e-9);
    }

    #[test]
    fn captures_happen_once(positions in prop::collection::vec(vec_in(30.0, 870.0), 1..12)) {
        let bounds = TableBounds::default();
        let pockets = six_pockets(&bounds, 25.0, 20.0);
        let mut bodies: Vec<Body> = positions
            .into_iter()
            .enumerate()
            .map(|(i, p)| ball(i as u32 + 1, p, DVec2::ZERO))
            .collect();

        let first = detect_captures(&mut bodies, &pockets);
        let second = detect_captures(&mut bodies, &pockets);
        prop_assert!(second.is_empty());
        for capture in &first {
            let body = bodies.iter().find(|b| b.id == capture.body_id).unwrap();
            prop_assert!(body.captured);
        }
    }

    #[test]
    fn every_shot_comes_to_rest(
        angle in 0.0f64..std::f64::consts::TAU,
        power in 0.0f64..=100.0,
        mode_index in 0usize..3,
    ) {
        let mode = [GameMode::EightBall, GameMode::NineBall, GameMode::Snooker][mode_index];
        let mut state = GameState::new(SimConfig::default(), mode, [Controller::Human; 2], 5).unwrap();
        let mut events = Vec::new();
        let direction = DVec2::new(angle.cos(), angle.sin());
        prop_assert!(apply_shot(&mut state, Player::One, direction, power, &mut events));

        let mut strategy = RandomTargetStrategy::default();
        let mut ticks = 0;
        while state.turn.phase == Phase::BallsInMotion {
            tick(&mut state, &TickInput::default(), &mut strategy);
            ticks += 1;
            prop_assert!(ticks <= 1000, "still rolling after {} ticks", ticks);
        }
        prop_assert!(!state.turn.bodies_in_motion);
    }

    #[test]
    fn balls_stay_on_the_table_every_tick(
        angle in 0.0f64..std::f64::consts::TAU,
        speed in 0.0f64..15.0,
        mode_index in 0usize..3,
    ) {
        let mode = [GameMode::EightBall, GameMode::NineBall, GameMode::Snooker][mode_index];
        let config = SimConfig::default();
        let mut table = Table::new(&config, mode).unwrap();
        table.cue_mut().vel = DVec2::new(angle.cos(), angle.sin()) * speed;

        let bounds = table.bounds;
        let eps = 1e-9;
        for _ in 0..1000 {
            step_physics(&mut table, &config);
            for body in table.bodies.iter().filter(|b| b.is_active()) {
                let r = body.radius;
                prop_assert!(body.pos.x >= bounds.x + r - eps && body.pos.x <= bounds.right() - r + eps,
                    "ball {} at x = {}", body.id, body.pos.x);
                prop_assert!(body.pos.y >= bounds.y + r - eps && body.pos.y <= bounds.bottom() - r + eps,
                    "ball {} at y = {}", body.id, body.pos.y);
            }
            if !table.any_moving() {
                break;
            }
        }
    }
}
