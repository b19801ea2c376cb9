//! Termination state machine and teardown bookkeeping.
//!
//! `NotStarted -> ConstructorsRun -> DestructorsRun -> Returned`. The cell only
//! moves forward, which is what makes teardown happen at most once no matter
//! whether the normal return path or an explicit exit gets there first.

use core::sync::atomic::{AtomicU64, AtomicU8, Ordering};

use crate::config::MAX_LIBRARY_UNITS;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TerminationState {
    NotStarted = 0,
    ConstructorsRun = 1,
    DestructorsRun = 2,
    Returned = 3,
}

impl TerminationState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => TerminationState::NotStarted,
            1 => TerminationState::ConstructorsRun,
            2 => TerminationState::DestructorsRun,
            _ => TerminationState::Returned,
        }
    }
}

pub(crate) struct TerminationCell {
    state: AtomicU8,
}

impl TerminationCell {
    pub(crate) const fn new() -> Self {
        Self {
            state: AtomicU8::new(TerminationState::NotStarted as u8),
        }
    }

    #[inline]
    pub(crate) fn get(&self) -> TerminationState {
        TerminationState::from_raw(self.state.load(Ordering::Acquire))
    }

    /// Move to `to` if the current state is earlier.
    ///
    /// Returns `true` if this call made the transition.
    pub(crate) fn advance(&self, to: TerminationState) -> bool {
        self.state
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                (current < to as u8).then_some(to as u8)
            })
            .is_ok()
    }
}

/// Chain positions whose initializer completed (or that had none).
pub(crate) struct InitMask {
    bits: AtomicU64,
}

impl InitMask {
    pub(crate) const fn new() -> Self {
        Self {
            bits: AtomicU64::new(0),
        }
    }

    #[inline]
    pub(crate) fn mark(&self, index: usize) {
        debug_assert!(index < MAX_LIBRARY_UNITS);
        self.bits.fetch_or(1 << index, Ordering::SeqCst);
    }

    #[inline]
    pub(crate) fn contains(&self, index: usize) -> bool {
        index < MAX_LIBRARY_UNITS && self.bits.load(Ordering::SeqCst) & (1 << index) != 0
    }

    #[inline]
    pub(crate) fn count(&self) -> usize {
        self.bits.load(Ordering::SeqCst).count_ones() as usize
    }
}
