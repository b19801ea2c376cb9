//! `Firmware` over the real system table, plus a console log sink.

use core::ptr::{self, NonNull};
use core::sync::atomic::{AtomicPtr, Ordering};

use efistart_abi::{BootServices, ImageHandle, SimpleTextOutput, Status, SystemTable};
use efistart_lib::{cpu, klog_error, KlogSink};

use crate::context::Firmware;

pub struct UefiFirmware {
    table: NonNull<SystemTable>,
}

impl UefiFirmware {
    /// Wrap the system table the firmware passed to the image.
    ///
    /// # Safety
    ///
    /// `system_table` must be null or point to a system table that stays
    /// valid for as long as the returned value is used. Tables without the
    /// system table signature are refused.
    pub unsafe fn from_raw(system_table: *const SystemTable) -> Option<Self> {
        let table = NonNull::new(system_table.cast_mut())?;
        // SAFETY: non-null, and the caller vouches for the rest.
        if !unsafe { table.as_ref() }.has_valid_signature() {
            return None;
        }
        Some(Self { table })
    }

    #[inline]
    fn table(&self) -> &SystemTable {
        // SAFETY: from_raw's contract keeps the table alive and non-null.
        unsafe { self.table.as_ref() }
    }

    #[inline]
    pub fn console_out(&self) -> *mut SimpleTextOutput {
        self.table().con_out
    }
}

impl Firmware for UefiFirmware {
    fn revision(&self) -> u32 {
        self.table().hdr.revision
    }

    fn system_table(&self) -> *const SystemTable {
        self.table.as_ptr()
    }

    fn exit(&self, image: ImageHandle, status: Status) -> ! {
        // SAFETY: boot services of a live system table, or null.
        match unsafe { self.table().boot_services.as_ref() } {
            Some(bs) if bs.has_valid_signature() => {
                let rc = call_exit(bs, image, status);
                klog_error!("[lifecycle] firmware Exit() returned {}", rc);
            }
            _ => klog_error!("[lifecycle] no boot services to exit through"),
        }
        cpu::halt_loop()
    }
}

/// `BootServices.Exit(image, status, 0, NULL)`. Only comes back if the
/// firmware refused to unload the image.
pub(crate) fn call_exit(bs: &BootServices, image: ImageHandle, status: Status) -> Status {
    // SAFETY: `bs` is a boot services table handed over by the firmware, and
    // no exit data is passed.
    unsafe { (bs.exit)(image, status, 0, ptr::null()) }
}

/// UCS-2 code units per `OutputString` call, excluding the terminator.
const CONSOLE_CHUNK: usize = 126;

/// Log sink writing through a `SimpleTextOutput` protocol.
pub struct FirmwareConsole {
    out: AtomicPtr<SimpleTextOutput>,
}

/// Console sink attached by the entry symbols for the length of a dispatch.
pub static CONSOLE: FirmwareConsole = FirmwareConsole::new();

impl FirmwareConsole {
    pub const fn new() -> Self {
        Self {
            out: AtomicPtr::new(ptr::null_mut()),
        }
    }

    pub fn attach(&self, out: *mut SimpleTextOutput) {
        self.out.store(out, Ordering::Release);
    }

    pub fn detach(&self) {
        self.out.store(ptr::null_mut(), Ordering::Release);
    }

    pub fn is_attached(&self) -> bool {
        !self.out.load(Ordering::Acquire).is_null()
    }
}

impl Default for FirmwareConsole {
    fn default() -> Self {
        Self::new()
    }
}

fn flush(out: *mut SimpleTextOutput, buf: &mut [u16; CONSOLE_CHUNK + 1], len: &mut usize) {
    if *len == 0 {
        return;
    }
    buf[*len] = 0;
    // SAFETY: `out` came from the system table; the buffer is NUL-terminated.
    unsafe {
        let output_string = (*out).output_string;
        let _ = output_string(out, buf.as_ptr());
    }
    *len = 0;
}

impl KlogSink for FirmwareConsole {
    fn write_str(&self, s: &str) {
        let out = self.out.load(Ordering::Acquire);
        if out.is_null() {
            return;
        }

        let mut buf = [0u16; CONSOLE_CHUNK + 1];
        let mut len = 0usize;
        for ch in s.chars() {
            // Leave room for a CR LF pair.
            if len + 2 > CONSOLE_CHUNK {
                flush(out, &mut buf, &mut len);
            }
            if ch == '\n' {
                buf[len] = u16::from(b'\r');
                len += 1;
            }
            // The console is UCS-2; anything outside the BMP becomes '?'.
            buf[len] = u16::try_from(u32::from(ch)).unwrap_or(u16::from(b'?'));
            len += 1;
        }
        flush(out, &mut buf, &mut len);
    }
}
