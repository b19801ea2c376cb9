#![cfg_attr(target_os = "uefi", no_std)]
#![cfg_attr(target_os = "uefi", no_main)]
#![forbid(unsafe_op_in_unsafe_fn)]

use core::sync::atomic::{AtomicU32, Ordering};

use efistart_boot::abi::{revision_major, revision_minor, Status, REVISION_2_00};
use efistart_boot::{efi_application, AppConfig, EntryPointUnit, InvocationContext, LibraryUnit};
use efistart_lib::{klog_info, klog_warn, KlogLevel};

static BANNER_LINES: AtomicU32 = AtomicU32::new(0);

fn banner_init(ctx: &InvocationContext<'_>) -> Status {
    let revision = ctx.firmware().revision();
    klog_info!(
        "efistart demo: firmware revision {}.{}",
        revision_major(revision),
        revision_minor(revision)
    );
    BANNER_LINES.fetch_add(1, Ordering::Relaxed);
    Status::SUCCESS
}

fn banner_fini(_ctx: &InvocationContext<'_>) -> Status {
    klog_info!(
        "efistart demo: {} banner line(s), goodbye",
        BANNER_LINES.load(Ordering::Relaxed)
    );
    Status::SUCCESS
}

fn hello_main(ctx: &InvocationContext<'_>) -> Status {
    klog_info!("Hello from efistart (image {:?})", ctx.image().as_ptr());
    BANNER_LINES.fetch_add(1, Ordering::Relaxed);
    Status::SUCCESS
}

fn selftest_main(ctx: &InvocationContext<'_>) -> Status {
    if BANNER_LINES.load(Ordering::Relaxed) < 2 {
        klog_warn!("efistart demo: banner missing, leaving early");
        ctx.exit(Status::ABORTED);
    }
    Status::SUCCESS
}

efi_application! {
    revision: REVISION_2_00,
    config: AppConfig::new().with_log_level(KlogLevel::Debug),
    libraries: [
        LibraryUnit::new("banner", Some(banner_init), Some(banner_fini)),
    ],
    entry_points: [
        EntryPointUnit::new("hello", hello_main),
        EntryPointUnit::new("selftest", selftest_main),
    ],
}

#[cfg(target_os = "uefi")]
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    efistart_lib::klog_error!("efistart demo panic: {}", info);
    efistart_lib::cpu::halt_loop()
}

#[cfg(not(target_os = "uefi"))]
fn main() {
    println!("efistart-demo is a firmware image; build it with --target x86_64-unknown-uefi");
}
