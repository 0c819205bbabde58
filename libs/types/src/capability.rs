//! Rust expressions of the on-chain capability and hot-potato patterns
//! described in the component design's design notes. Neither Rust's type
//! system nor its borrow checker can force "this value must be consumed
//! before the enclosing function returns" the way a linear-typed VM can, so
//! the discipline here is: (a) no public constructor outside the minting
//! module, (b) a `#[must_use]` consuming method as the only way to retire
//! the value, and (c) in `#[cfg(test)]` builds, a thread-local leak counter
//! that every strategy test checks is back to zero after the call returns.

use std::cell::Cell;

/// A capability: a non-`Clone`, non-`Copy`, non-`Default` singleton whose
/// existence is a compile-time witness that the holder was authorized by
/// `mint`. Only the deployment harness calls `mint`; everything else
/// receives a `&Capability` or moves one via `transfer`.
#[derive(Debug)]
pub struct Capability {
    _private: (),
}

impl Capability {
    /// Mints a new capability. Intended to be called exactly once, by the
    /// deployment harness; production code should treat this as equivalent
    /// to an on-chain `init`.
    pub fn mint() -> Self {
        Capability { _private: () }
    }

    /// Moves a capability through a module boundary. Exists so call sites
    /// read like an explicit authority transfer rather than an implicit
    /// move.
    pub fn transfer(self) -> Self {
        self
    }
}

/// A shared, mutable pause flag. Gating is enforced by `assert_not_paused`,
/// never by callers inspecting `is_paused` themselves.
#[derive(Debug, Default)]
pub struct PauseSwitch {
    paused: std::sync::atomic::AtomicBool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("strategy execution attempted while paused")]
pub struct PausedError;

impl PauseSwitch {
    pub fn new(paused: bool) -> Self {
        PauseSwitch {
            paused: std::sync::atomic::AtomicBool::new(paused),
        }
    }

    pub fn set(&self, paused: bool) {
        self.paused.store(paused, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn assert_not_paused(&self) -> Result<(), PausedError> {
        if self.is_paused() {
            Err(PausedError)
        } else {
            Ok(())
        }
    }
}

thread_local! {
    static OUTSTANDING_RECEIPTS: Cell<u32> = Cell::new(0);
}

/// Test-only leak detector for hot-potato receipts. A receipt increments
/// this on construction and decrements it on `settle`; every strategy test
/// asserts it is zero after the call returns, standing in for the
/// on-chain guarantee that a receipt cannot be dropped unconsumed.
#[cfg(any(test, feature = "test-util"))]
pub struct ReceiptLeakGuard;

#[cfg(any(test, feature = "test-util"))]
impl ReceiptLeakGuard {
    pub fn on_mint() {
        OUTSTANDING_RECEIPTS.with(|c| c.set(c.get() + 1));
    }

    pub fn on_settle() {
        OUTSTANDING_RECEIPTS.with(|c| c.set(c.get().saturating_sub(1)));
    }

    pub fn outstanding() -> u32 {
        OUTSTANDING_RECEIPTS.with(|c| c.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_switch_gates_assert() {
        let p = PauseSwitch::new(false);
        assert!(p.assert_not_paused().is_ok());
        p.set(true);
        assert_eq!(p.assert_not_paused(), Err(PausedError));
    }

    #[test]
    fn receipt_leak_guard_tracks_mint_and_settle() {
        assert_eq!(ReceiptLeakGuard::outstanding(), 0);
        ReceiptLeakGuard::on_mint();
        assert_eq!(ReceiptLeakGuard::outstanding(), 1);
        ReceiptLeakGuard::on_settle();
        assert_eq!(ReceiptLeakGuard::outstanding(), 0);
    }
}
