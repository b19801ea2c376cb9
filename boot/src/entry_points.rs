use efistart_abi::Status;
use efistart_lib::{klog_debug, klog_warn};

use crate::config::EntryPolicy;
use crate::context::InvocationContext;
use crate::unit::EntryPointUnit;

/// Run the entry points in order. The outcome is whatever the last one that
/// ran returned; an empty list succeeds.
pub(crate) fn run(
    entry_points: &[EntryPointUnit],
    policy: EntryPolicy,
    ctx: &InvocationContext<'_>,
) -> Status {
    let mut outcome = Status::SUCCESS;

    for unit in entry_points {
        klog_debug!("[lifecycle] entry point -> {}", unit.name());
        outcome = (unit.entry())(ctx);
        if !outcome.is_error() {
            continue;
        }

        klog_warn!("[lifecycle] entry point '{}' returned {}", unit.name(), outcome);
        if policy == EntryPolicy::StopOnError {
            break;
        }
    }

    outcome
}
