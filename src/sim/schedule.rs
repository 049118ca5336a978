//! Deferred one-shot actions
//!
//! Jump landings and boost decays happen a fixed time after the action that
//! caused them. They are entries on the session clock rather than host
//! timers, so they can be cancelled together when play stops.

/// A mutation applied some time after it was scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Return the player to the ground
    Land,
    /// Take back part of one boost
    BoostDecay,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due_ms: u64,
    seq: u64,
    action: DeferredAction,
}

/// Pending actions ordered by due time, then by scheduling order
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pending: Vec<Pending>,
    next_seq: u64,
}

impl Schedule {
    pub fn schedule(&mut self, due_ms: u64, action: DeferredAction) {
        let entry = Pending {
            due_ms,
            seq: self.next_seq,
            action,
        };
        self.next_seq += 1;

        // Keep sorted; new entries go after existing ones with the same due time
        let pos = self
            .pending
            .iter()
            .position(|p| (p.due_ms, p.seq) > (entry.due_ms, entry.seq))
            .unwrap_or(self.pending.len());
        self.pending.insert(pos, entry);
    }

    /// Due time of the earliest pending action
    pub fn next_due(&self) -> Option<u64> {
        self.pending.first().map(|p| p.due_ms)
    }

    /// Remove and return the earliest action if it is due at `now_ms`
    pub fn pop_due(&mut self, now_ms: u64) -> Option<DeferredAction> {
        match self.pending.first() {
            Some(p) if p.due_ms <= now_ms => Some(self.pending.remove(0).action),
            _ => None,
        }
    }

    /// Remove every pending action, earliest first
    pub fn drain(&mut self) -> Vec<DeferredAction> {
        self.pending.drain(..).map(|p| p.action).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_by_due_time() {
        let mut schedule = Schedule::default();
        schedule.schedule(1000, DeferredAction::BoostDecay);
        schedule.schedule(600, DeferredAction::Land);

        assert_eq!(schedule.next_due(), Some(600));
        assert_eq!(schedule.pop_due(599), None);
        assert_eq!(schedule.pop_due(600), Some(DeferredAction::Land));
        assert_eq!(schedule.pop_due(999), None);
        assert_eq!(schedule.pop_due(5000), Some(DeferredAction::BoostDecay));
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut schedule = Schedule::default();
        schedule.schedule(100, DeferredAction::BoostDecay);
        schedule.schedule(100, DeferredAction::Land);
        schedule.schedule(100, DeferredAction::BoostDecay);

        assert_eq!(
            schedule.drain(),
            vec![
                DeferredAction::BoostDecay,
                DeferredAction::Land,
                DeferredAction::BoostDecay
            ]
        );
        assert_eq!(schedule.len(), 0);
    }

    #[test]
    fn test_clear() {
        let mut schedule = Schedule::default();
        schedule.schedule(10, DeferredAction::Land);
        schedule.clear();
        assert_eq!(schedule.next_due(), None);
        assert_eq!(schedule.pop_due(u64::MAX), None);
    }
}
