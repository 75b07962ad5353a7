//! Single move in flight.
//!
//! A local seat may have at most one move submitted and unresolved. The
//! caller takes a ticket before emitting a move and holds it until the move
//! (cascade included) has been applied; input is unlocked when the ticket
//! drops, whether the move succeeded or not.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct MoveGate {
    locked: AtomicBool,
}

/// Proof that the gate is held. Unlocks on drop.
#[derive(Debug)]
#[must_use = "the gate unlocks as soon as the ticket is dropped"]
pub struct MoveTicket<'a> {
    gate: &'a MoveGate,
}

impl MoveGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the gate, or `None` if a move is already in flight.
    pub fn try_acquire(&self) -> Option<MoveTicket<'_>> {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| MoveTicket { gate: self })
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }
}

impl Drop for MoveTicket<'_> {
    fn drop(&mut self) {
        self.gate.locked.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_fails_while_held() {
        let gate = MoveGate::new();
        let ticket = gate.try_acquire();
        assert!(ticket.is_some());
        assert!(gate.is_locked());
        assert!(gate.try_acquire().is_none());

        drop(ticket);
        assert!(!gate.is_locked());
        assert!(gate.try_acquire().is_some());
    }

    #[test]
    fn test_gate_shared_across_threads() {
        let gate = std::sync::Arc::new(MoveGate::new());
        let _ticket = gate.try_acquire().unwrap();

        let other = std::sync::Arc::clone(&gate);
        let acquired = std::thread::spawn(move || other.try_acquire().is_some())
            .join()
            .unwrap();

        assert!(!acquired);
    }
}
