//! Firmware tables handed to an application at entry.
//!
//! Only the parts this runtime reads are typed. Services the runtime never
//! calls are kept as opaque machine-word slots so the field offsets match the
//! firmware layout.

use core::ffi::c_void;
use core::ptr;

use crate::status::Status;

/// `"IBI SYST"` read as a little-endian `u64`.
pub const SYSTEM_TABLE_SIGNATURE: u64 = 0x5453_5953_2049_4249;
/// `"BOOTSERV"` read as a little-endian `u64`.
pub const BOOT_SERVICES_SIGNATURE: u64 = 0x5652_4553_544f_4f42;

/// Pack a `major.minor` pair into the header revision format.
#[inline]
pub const fn revision(major: u16, minor: u16) -> u32 {
    ((major as u32) << 16) | minor as u32
}

#[inline]
pub const fn revision_major(rev: u32) -> u16 {
    (rev >> 16) as u16
}

#[inline]
pub const fn revision_minor(rev: u32) -> u16 {
    (rev & 0xFFFF) as u16
}

pub const REVISION_1_02: u32 = revision(1, 2);
pub const REVISION_1_10: u32 = revision(1, 10);
pub const REVISION_2_00: u32 = revision(2, 0);
pub const REVISION_2_10: u32 = revision(2, 10);
pub const REVISION_2_20: u32 = revision(2, 20);
pub const REVISION_2_30: u32 = revision(2, 30);
pub const REVISION_2_31: u32 = revision(2, 31);
pub const REVISION_2_40: u32 = revision(2, 40);
pub const REVISION_2_50: u32 = revision(2, 50);
pub const REVISION_2_60: u32 = revision(2, 60);
pub const REVISION_2_70: u32 = revision(2, 70);
pub const REVISION_2_80: u32 = revision(2, 80);
pub const REVISION_2_90: u32 = revision(2, 90);
pub const REVISION_2_100: u32 = revision(2, 100);

/// Opaque firmware object handle.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Handle(*mut c_void);

/// Handle of the loaded image the firmware started.
pub type ImageHandle = Handle;

impl Handle {
    #[inline]
    pub const fn null() -> Self {
        Self(ptr::null_mut())
    }

    #[inline]
    pub const fn as_ptr(self) -> *mut c_void {
        self.0
    }

    #[inline]
    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

/// Common header of every firmware table.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableHeader {
    pub signature: u64,
    pub revision: u32,
    pub header_size: u32,
    pub crc32: u32,
    pub reserved: u32,
}

impl TableHeader {
    pub const fn new(signature: u64, revision: u32) -> Self {
        Self {
            signature,
            revision,
            header_size: 0,
            crc32: 0,
            reserved: 0,
        }
    }
}

pub type OutputStringFn =
    unsafe extern "efiapi" fn(this: *mut SimpleTextOutput, string: *const u16) -> Status;

pub type ExitFn = unsafe extern "efiapi" fn(
    image: ImageHandle,
    status: Status,
    exit_data_size: usize,
    exit_data: *const u16,
) -> Status;

/// Text console output protocol.
#[repr(C)]
pub struct SimpleTextOutput {
    pub reset: usize,
    pub output_string: OutputStringFn,
    pub test_string: usize,
    pub query_mode: usize,
    pub set_mode: usize,
    pub set_attribute: usize,
    pub clear_screen: usize,
    pub set_cursor_position: usize,
    pub enable_cursor: usize,
    pub mode: *mut c_void,
}

/// Boot services table, typed up to `Exit`.
#[repr(C)]
pub struct BootServices {
    pub hdr: TableHeader,
    pub raise_tpl: usize,
    pub restore_tpl: usize,
    pub allocate_pages: usize,
    pub free_pages: usize,
    pub get_memory_map: usize,
    pub allocate_pool: usize,
    pub free_pool: usize,
    pub create_event: usize,
    pub set_timer: usize,
    pub wait_for_event: usize,
    pub signal_event: usize,
    pub close_event: usize,
    pub check_event: usize,
    pub install_protocol_interface: usize,
    pub reinstall_protocol_interface: usize,
    pub uninstall_protocol_interface: usize,
    pub handle_protocol: usize,
    pub reserved: usize,
    pub register_protocol_notify: usize,
    pub locate_handle: usize,
    pub locate_device_path: usize,
    pub install_configuration_table: usize,
    pub load_image: usize,
    pub start_image: usize,
    pub exit: ExitFn,
}

impl BootServices {
    #[inline]
    pub fn has_valid_signature(&self) -> bool {
        self.hdr.signature == BOOT_SERVICES_SIGNATURE
    }
}

/// System table passed to the image entry point.
#[repr(C)]
pub struct SystemTable {
    pub hdr: TableHeader,
    pub firmware_vendor: *const u16,
    pub firmware_revision: u32,
    pub console_in_handle: Handle,
    pub con_in: *mut c_void,
    pub console_out_handle: Handle,
    pub con_out: *mut SimpleTextOutput,
    pub standard_error_handle: Handle,
    pub std_err: *mut SimpleTextOutput,
    pub runtime_services: *mut c_void,
    pub boot_services: *mut BootServices,
    pub number_of_table_entries: usize,
    pub configuration_table: *mut c_void,
}

impl SystemTable {
    #[inline]
    pub fn has_valid_signature(&self) -> bool {
        self.hdr.signature == SYSTEM_TABLE_SIGNATURE
    }
}
