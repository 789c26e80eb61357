//! What potting a ball means in each game mode
//!
//! Pure functions from (ball, player, turn state, table) to the next turn
//! state. `table` is the table as it stands once the shot's captures are
//! applied, so "group cleared" and "balls left" already count this shot.

use super::body::BallKind;
use super::state::{Outcome, Player, TurnState};
use super::table::{GameMode, Table};

/// Apply one potted object ball
///
/// Once the game has an outcome further pots change nothing.
pub fn on_ball_potted(
    mode: GameMode,
    kind: BallKind,
    player: Player,
    turn: &TurnState,
    table: &Table,
) -> TurnState {
    let mut next = turn.clone();
    if next.is_over() {
        return next;
    }

    match mode {
        GameMode::EightBall => eight_ball(kind, player, &mut next, table),
        GameMode::NineBall => nine_ball(kind, player, &mut next),
        GameMode::Snooker => snooker(kind, player, &mut next),
    }
    next
}

fn eight_ball(kind: BallKind, player: Player, turn: &mut TurnState, table: &Table) {
    match kind {
        BallKind::Terminal(_) => {
            // No group yet counts as nothing left to clear
            let cleared = turn
                .group_of(player)
                .is_none_or(|group| table.group_cleared(group));
            let winner = if cleared { player } else { player.other() };
            turn.outcome = Some(Outcome::Winner(winner));
        }
        BallKind::Solid(_) | BallKind::Stripe(_) => {
            if turn.groups == [None, None] {
                if let Some(group) = kind.group() {
                    turn.groups[player.index()] = Some(group);
                    turn.groups[player.other().index()] = Some(group.other());
                }
            }
            turn.scores[player.index()] += 1;
            turn.continue_turn = true;
        }
        // Not racked in eight-ball; the cue ball is handled as a foul
        BallKind::Cue | BallKind::Numbered(_) | BallKind::Red | BallKind::Colored { .. } => {}
    }
}

fn nine_ball(kind: BallKind, player: Player, turn: &mut TurnState) {
    match kind {
        BallKind::Terminal(_) => {
            turn.outcome = Some(Outcome::Winner(player));
        }
        BallKind::Numbered(_) => {
            turn.scores[player.index()] += 1;
            turn.continue_turn = true;
        }
        BallKind::Cue
        | BallKind::Solid(_)
        | BallKind::Stripe(_)
        | BallKind::Red
        | BallKind::Colored { .. } => {}
    }
}

fn snooker(kind: BallKind, player: Player, turn: &mut TurnState) {
    match kind {
        BallKind::Red | BallKind::Colored { .. } => {
            turn.scores[player.index()] += kind.points();
            turn.continue_turn = true;
        }
        BallKind::Cue
        | BallKind::Solid(_)
        | BallKind::Stripe(_)
        | BallKind::Numbered(_)
        | BallKind::Terminal(_) => {}
    }
}

/// Points a pot is worth in `mode`
pub fn points_for(mode: GameMode, kind: BallKind) -> u32 {
    match (mode, kind) {
        (_, BallKind::Cue) => 0,
        (GameMode::Snooker, _) => kind.points(),
        (_, BallKind::Terminal(_)) => 0,
        _ => 1,
    }
}

/// End-of-shot check that depends on the whole table rather than one pot
///
/// Snooker ends when the last object ball is gone; equal scores are a draw.
pub fn check_game_end(mode: GameMode, turn: &TurnState, table: &Table) -> TurnState {
    let mut next = turn.clone();
    if next.is_over() {
        return next;
    }

    if mode == GameMode::Snooker && table.active_object_count() == 0 {
        let [one, two] = next.scores;
        next.outcome = Some(match one.cmp(&two) {
            std::cmp::Ordering::Greater => Outcome::Winner(Player::One),
            std::cmp::Ordering::Less => Outcome::Winner(Player::Two),
            std::cmp::Ordering::Equal => Outcome::Draw,
        });
    }
    next
}
