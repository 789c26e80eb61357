//! Virtual-time task queue
//!
//! Delayed game actions (cue respawn, notice dismissal, AI thinking time) are
//! queued against the tick counter instead of a wall clock, so tests advance
//! time by ticking. Tasks are never cancelled; each carries the epoch of the
//! game that queued it and the consumer drops it if the game has since been
//! reset.

use serde::{Deserialize, Serialize};

use super::state::Player;

/// What to do when a task comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskAction {
    /// Put the fouled cue ball back on its spot
    RespawnCue,
    /// Clear the notice with this serial, if it is still showing
    DismissNotice { serial: u64 },
    /// Let the computer take its shot
    AiShot { player: Player },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Tick at which the task fires
    pub due: u64,
    /// Insertion order, breaks ties between tasks due on the same tick
    pub seq: u64,
    /// Game epoch the task belongs to
    pub epoch: u64,
    pub action: TaskAction,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    queue: Vec<ScheduledTask>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fire `delay` ticks after `now`
    pub fn schedule(&mut self, now: u64, delay: u64, epoch: u64, action: TaskAction) {
        let task = ScheduledTask {
            due: now + delay,
            seq: self.next_seq,
            epoch,
            action,
        };
        self.next_seq += 1;
        log::debug!("Scheduled {:?} for tick {}", task.action, task.due);
        self.queue.push(task);
    }

    /// Remove and return every task due at or before `now`, oldest first
    pub fn take_due(&mut self, now: u64) -> Vec<ScheduledTask> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.queue.drain(..).partition(|t| t.due <= now);
        self.queue = pending;
        due.sort_by_key(|t| (t.due, t.seq));
        due
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Tick at which the next task fires
    pub fn next_due(&self) -> Option<u64> {
        self.queue.iter().map(|t| t.due).min()
    }
}
