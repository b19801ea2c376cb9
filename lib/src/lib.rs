#![no_std]
#![forbid(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
extern crate std;

pub mod cpu {
    /// Park the processor for good. Used when control must never come back.
    #[inline(always)]
    pub fn halt_loop() -> ! {
        loop {
            #[cfg(target_arch = "x86_64")]
            x86_64::instructions::hlt();
            #[cfg(not(target_arch = "x86_64"))]
            core::hint::spin_loop();
        }
    }
}

pub mod init_flag;
pub mod klog;

pub use init_flag::InitFlag;
pub use klog::{
    klog_attach_sink, klog_detach_sink, klog_get_level, klog_has_sink, klog_is_enabled,
    klog_replace_sink, klog_set_level, KlogLevel, KlogSink,
};
