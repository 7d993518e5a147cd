//! Deferred actions on the simulation clock
//!
//! Timers are owned by a monster and fire during `tick`, never on a wall clock,
//! so replays are exact and a unit's pending work can be cancelled with it.

use serde::Serialize;

use super::monster::MonsterId;
use crate::tuning::FanVolley;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Deferred {
    /// Fire one fan wave; `remaining` counts this wave and the ones after it
    FanWave { fan: FanVolley, remaining: u32 },
    /// End the hit flash tint
    ClearFlash,
    /// Death fade finished; remove the unit
    FadeComplete,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timer {
    pub due_ms: f64,
    pub owner: MonsterId,
    pub action: Deferred,
    seq: u64,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: f64,
    timers: Vec<Timer>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulation time (ms since start)
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn advance(&mut self, dt_ms: f64) {
        self.now_ms += dt_ms;
    }

    pub fn schedule_at(&mut self, due_ms: f64, owner: MonsterId, action: Deferred) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            due_ms,
            owner,
            action,
            seq,
        });
    }

    pub fn schedule_in(&mut self, delay_ms: f64, owner: MonsterId, action: Deferred) {
        self.schedule_at(self.now_ms + delay_ms, owner, action);
    }

    /// Earliest timer that is due, ties broken by insertion order
    pub fn pop_due(&mut self) -> Option<Timer> {
        let now = self.now_ms;
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i)?;
        Some(self.timers.remove(index))
    }

    /// Drop every timer owned by `owner` matching `pred`
    pub fn cancel_where(&mut self, owner: MonsterId, pred: impl Fn(&Deferred) -> bool) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.owner != owner || !pred(&t.action));
        before - self.timers.len()
    }

    pub fn cancel_owner(&mut self, owner: MonsterId) -> usize {
        self.cancel_where(owner, |_| true)
    }

    pub fn pending_for(&self, owner: MonsterId) -> impl Iterator<Item = &Timer> {
        self.timers.iter().filter(move |t| t.owner == owner)
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
