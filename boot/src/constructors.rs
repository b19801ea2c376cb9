use efistart_abi::{LifecycleError, LifecycleResult};
use efistart_lib::{klog_debug, klog_error, klog_trace, klog_warn};

use crate::config::ConstructorPolicy;
use crate::context::InvocationContext;
use crate::state::InitMask;
use crate::unit::LibraryUnit;

/// Run initializers front to back, marking each chain position that ends up
/// initialized so teardown can mirror exactly what happened here.
pub(crate) fn run(
    libraries: &[LibraryUnit],
    policy: ConstructorPolicy,
    initialized: &InitMask,
    ctx: &InvocationContext<'_>,
) -> LifecycleResult<()> {
    klog_debug!("[lifecycle] constructors -> {} units", libraries.len());

    for (index, unit) in libraries.iter().enumerate() {
        let Some(init) = unit.initializer() else {
            initialized.mark(index);
            continue;
        };

        klog_trace!("    constructor: {}", unit.name());
        let status = init(ctx);
        if !status.is_error() {
            initialized.mark(index);
            continue;
        }

        if unit.is_optional() {
            klog_warn!(
                "[lifecycle] optional constructor '{}' failed ({}), continuing",
                unit.name(),
                status
            );
            continue;
        }

        match policy {
            ConstructorPolicy::Abort => {
                klog_error!(
                    "[lifecycle] FAILURE in constructor '{}' -> {}",
                    unit.name(),
                    status
                );
                return Err(LifecycleError::ConstructorFailure {
                    unit: unit.name(),
                    status,
                });
            }
            ConstructorPolicy::Continue => {
                klog_warn!(
                    "[lifecycle] constructor '{}' failed ({}), continuing by policy",
                    unit.name(),
                    status
                );
            }
        }
    }

    klog_debug!("[lifecycle] constructors complete");
    Ok(())
}
