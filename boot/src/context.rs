//! Invocation context and the firmware seam.

use efistart_abi::{ImageHandle, Status, SystemTable};

use crate::application::Application;

/// What the lifecycle needs from the hosting firmware.
pub trait Firmware {
    /// Revision from the system table header.
    fn revision(&self) -> u32;

    /// The system table the image was started with. May be null for hosts
    /// that have no table to offer.
    fn system_table(&self) -> *const SystemTable;

    /// Hand control to the firmware's termination service. Never comes back.
    fn exit(&self, image: ImageHandle, status: Status) -> !;
}

/// Image identity and system table, passed unchanged to every
/// constructor, entry point and destructor of one dispatch.
///
/// Only the dispatcher creates one, and it is handed out by reference.
pub struct InvocationContext<'a> {
    image: ImageHandle,
    firmware: &'a dyn Firmware,
    application: &'a Application<'a>,
}

impl<'a> InvocationContext<'a> {
    pub(crate) fn new(
        image: ImageHandle,
        firmware: &'a dyn Firmware,
        application: &'a Application<'a>,
    ) -> Self {
        Self {
            image,
            firmware,
            application,
        }
    }

    #[inline]
    pub fn image(&self) -> ImageHandle {
        self.image
    }

    /// Entry to every firmware service the application uses (console,
    /// boot services, protocols). Valid for the whole dispatch.
    #[inline]
    pub fn system_table(&self) -> *const SystemTable {
        self.firmware.system_table()
    }

    #[inline]
    pub fn firmware(&self) -> &'a dyn Firmware {
        self.firmware
    }

    /// Run library destructors (once per process) and terminate through the
    /// firmware with `status`. Code after this call is unreachable.
    pub fn exit(&self, status: Status) -> ! {
        self.application.exit(self, status)
    }
}
