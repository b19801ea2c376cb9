use core::sync::atomic::{AtomicUsize, Ordering};

use efistart_lib::{klog_debug, klog_trace, klog_warn};

use crate::context::InvocationContext;
use crate::state::InitMask;
use crate::unit::LibraryUnit;

/// Run finalizers back to front, only for positions the constructor pass
/// marked as initialized. Finalizer errors are counted and logged, never
/// returned.
pub(crate) fn run(
    libraries: &[LibraryUnit],
    initialized: &InitMask,
    failures: &AtomicUsize,
    ctx: &InvocationContext<'_>,
) {
    klog_debug!(
        "[lifecycle] destructors -> {} of {} units initialized",
        initialized.count(),
        libraries.len()
    );

    for (index, unit) in libraries.iter().enumerate().rev() {
        if !initialized.contains(index) {
            continue;
        }
        let Some(fini) = unit.finalizer() else {
            continue;
        };

        klog_trace!("    destructor: {}", unit.name());
        let status = fini(ctx);
        if status.is_error() {
            failures.fetch_add(1, Ordering::SeqCst);
            klog_warn!(
                "[lifecycle] destructor '{}' failed ({}), ignoring",
                unit.name(),
                status
            );
        }
    }
}
