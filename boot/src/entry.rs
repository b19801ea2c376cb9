//! Firmware-facing entry symbols.
//!
//! An application declares its revision, library chain and entry points once
//! with `efi_application!`. The macro emits `_gUefiDriverRevision`, a static
//! `Application`, and the two symbols the firmware may call: `_ModuleEntryPoint`
//! for native images and `EfiMain` for the byte-code calling convention. Both
//! forward to `module_entry`.
//!
//! ```ignore
//! efistart_boot::efi_application! {
//!     revision: efistart_boot::abi::REVISION_2_70,
//!     libraries: [
//!         LibraryUnit::new("pool", Some(pool_init), Some(pool_fini)),
//!     ],
//!     entry_points: [EntryPointUnit::new("main", app_main)],
//! }
//! ```

use efistart_abi::{ImageHandle, LifecycleError, Status, SystemTable};
use efistart_lib::{klog_error, klog_get_level, klog_replace_sink, klog_set_level};

use crate::application::Application;
use crate::firmware::{UefiFirmware, CONSOLE};

/// Shared body of both entry symbols: adapt the raw firmware arguments,
/// attach the console for logging, dispatch.
///
/// The console stands in for any previously attached log sink only while the
/// dispatch runs; that sink and the log level are put back before returning.
///
/// # Safety
///
/// `system_table` must be null or the system table the firmware passed to
/// this image.
pub unsafe fn module_entry(
    app: &Application<'_>,
    image: ImageHandle,
    system_table: *const SystemTable,
) -> Status {
    // SAFETY: forwarded from the caller.
    let Some(firmware) = (unsafe { UefiFirmware::from_raw(system_table) }) else {
        klog_error!("[lifecycle] {}", LifecycleError::InvalidSystemTable);
        return LifecycleError::InvalidSystemTable.status();
    };

    let level = klog_get_level();
    let con_out = firmware.console_out();
    let previous_sink = (!con_out.is_null()).then(|| {
        CONSOLE.attach(con_out);
        klog_replace_sink(Some(&CONSOLE))
    });

    let status = app.dispatch(image, &firmware);

    if let Some(previous) = previous_sink {
        klog_replace_sink(previous);
        CONSOLE.detach();
    }
    klog_set_level(level);
    status
}

#[macro_export]
macro_rules! efi_application {
    (
        revision: $revision:expr,
        $(config: $config:expr,)?
        libraries: [$($library:expr),* $(,)?],
        entry_points: [$($entry:expr),* $(,)?] $(,)?
    ) => {
        #[used]
        #[unsafe(no_mangle)]
        #[allow(non_upper_case_globals)]
        pub static _gUefiDriverRevision: u32 = $revision;

        static __EFISTART_APPLICATION: $crate::Application<'static> = $crate::Application::new(
            $crate::efi_application!(@config $revision $(, $config)?),
            &[$($library),*],
            &[$($entry),*],
        );

        #[unsafe(no_mangle)]
        #[allow(non_snake_case)]
        pub extern "efiapi" fn _ModuleEntryPoint(
            image: $crate::abi::ImageHandle,
            system_table: *const $crate::abi::SystemTable,
        ) -> $crate::abi::Status {
            // SAFETY: the firmware calls this with its own system table.
            unsafe { $crate::entry::module_entry(&__EFISTART_APPLICATION, image, system_table) }
        }

        #[unsafe(no_mangle)]
        #[allow(non_snake_case)]
        pub extern "efiapi" fn EfiMain(
            image: $crate::abi::ImageHandle,
            system_table: *const $crate::abi::SystemTable,
        ) -> $crate::abi::Status {
            // SAFETY: the firmware calls this with its own system table.
            unsafe { $crate::entry::module_entry(&__EFISTART_APPLICATION, image, system_table) }
        }
    };

    (@config $revision:expr) => {
        $crate::AppConfig::new().with_required_revision($revision)
    };
    (@config $revision:expr, $config:expr) => {
        ($config).with_required_revision($revision)
    };
}
