//! Leveled logging routed to a pluggable sink.
//!
//! Nothing is written until a sink is attached. The boot crate attaches the
//! firmware console for the duration of a dispatch; tests attach a capture
//! buffer.

use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};

use spin::Mutex;

use crate::init_flag::InitFlag;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum KlogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl KlogLevel {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => KlogLevel::Error,
            1 => KlogLevel::Warn,
            2 => KlogLevel::Info,
            3 => KlogLevel::Debug,
            _ => KlogLevel::Trace,
        }
    }
}

/// Destination for formatted log text.
pub trait KlogSink: Sync {
    fn write_str(&self, s: &str);
}

static CURRENT_LEVEL: AtomicU8 = AtomicU8::new(KlogLevel::Info as u8);
static SINK_READY: InitFlag = InitFlag::new();
static SINK: Mutex<Option<&'static dyn KlogSink>> = Mutex::new(None);

#[inline(always)]
fn is_enabled(level: KlogLevel) -> bool {
    level as u8 <= CURRENT_LEVEL.load(Ordering::Relaxed)
}

pub fn log_args(level: KlogLevel, args: fmt::Arguments<'_>) {
    if !is_enabled(level) || !SINK_READY.is_set_relaxed() {
        return;
    }

    struct SinkWriter(&'static dyn KlogSink);
    impl fmt::Write for SinkWriter {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.0.write_str(s);
            Ok(())
        }
    }

    let guard = SINK.lock();
    if let Some(sink) = *guard {
        let _ = fmt::write(&mut SinkWriter(sink), args);
        sink.write_str("\n");
    }
}

pub fn klog_attach_sink(sink: &'static dyn KlogSink) {
    *SINK.lock() = Some(sink);
    SINK_READY.mark_set();
}

pub fn klog_detach_sink() {
    SINK_READY.reset();
    *SINK.lock() = None;
}

/// Install `sink` (or none) and hand back whatever was attached before.
pub fn klog_replace_sink(sink: Option<&'static dyn KlogSink>) -> Option<&'static dyn KlogSink> {
    let mut guard = SINK.lock();
    let previous = core::mem::replace(&mut *guard, sink);
    if guard.is_some() {
        SINK_READY.mark_set();
    } else {
        SINK_READY.reset();
    }
    previous
}

pub fn klog_has_sink() -> bool {
    SINK_READY.is_set()
}

pub fn klog_set_level(level: KlogLevel) {
    CURRENT_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn klog_get_level() -> KlogLevel {
    KlogLevel::from_raw(CURRENT_LEVEL.load(Ordering::Relaxed))
}

pub fn klog_is_enabled(level: KlogLevel) -> bool {
    is_enabled(level)
}

#[macro_export]
macro_rules! klog_error {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Error, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_warn {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Warn, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_info {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Info, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_debug {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Debug, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_trace {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Trace, ::core::format_args!($($arg)*))
    };
}
