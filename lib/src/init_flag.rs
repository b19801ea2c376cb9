//! Atomic once-flags for lifecycle guards.
//!
//! `InitFlag` tracks a monotonic "has X happened" fact: the first caller of
//! `init_once()` wins, everybody after it sees `false`. The dispatcher uses it
//! to refuse a second dispatch, and `klog` uses it as a cheap "sink attached"
//! check.
//!
//! ```ignore
//! static ENTERED: InitFlag = InitFlag::new();
//!
//! if !ENTERED.init_once() {
//!     return Status::ALREADY_STARTED;
//! }
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

#[repr(transparent)]
pub struct InitFlag {
    flag: AtomicBool,
}

impl InitFlag {
    /// Create a new unset flag.
    #[inline]
    pub const fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }

    /// Atomically set the flag.
    ///
    /// Returns `true` if this call set it, `false` if it was already set.
    #[inline]
    pub fn init_once(&self) -> bool {
        // swap returns the previous value
        !self.flag.swap(true, Ordering::SeqCst)
    }

    /// Check if the flag is set.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Check if the flag is set without ordering guarantees.
    ///
    /// Only for guards that do not read data published by the setter.
    #[inline]
    pub fn is_set_relaxed(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn mark_set(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Reset the flag to unset state.
    #[inline]
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Default for InitFlag {
    fn default() -> Self {
        Self::new()
    }
}
