//! Entry-point dispatcher and explicit exit handler.
//!
//! An `Application` is the static description of one firmware application:
//! its configuration, the library chain and the entry points. It also owns
//! the only mutable lifecycle state of the process, so two applications never
//! share teardown bookkeeping.

use core::sync::atomic::{AtomicUsize, Ordering};

use efistart_abi::{ImageHandle, LifecycleError, LifecycleResult, Status};
use efistart_lib::{klog_debug, klog_error, klog_info, klog_set_level, InitFlag};
use spin::Once;

use crate::config::{AppConfig, MAX_LIBRARY_UNITS};
use crate::context::{Firmware, InvocationContext};
use crate::state::{InitMask, TerminationCell, TerminationState};
use crate::unit::{EntryPointUnit, LibraryUnit};
use crate::{constructors, destructors, entry_points};

pub struct Application<'a> {
    config: AppConfig,
    libraries: &'a [LibraryUnit],
    entry_points: &'a [EntryPointUnit],
    entered: InitFlag,
    state: TerminationCell,
    initialized: InitMask,
    teardown_failures: AtomicUsize,
    settled: Once<Status>,
}

impl<'a> Application<'a> {
    /// Panics (at compile time for statics) if the chain is longer than
    /// `MAX_LIBRARY_UNITS`.
    pub const fn new(
        config: AppConfig,
        libraries: &'a [LibraryUnit],
        entry_points: &'a [EntryPointUnit],
    ) -> Self {
        assert!(
            libraries.len() <= MAX_LIBRARY_UNITS,
            "too many library units for one application"
        );
        Self {
            config,
            libraries,
            entry_points,
            entered: InitFlag::new(),
            state: TerminationCell::new(),
            initialized: InitMask::new(),
            teardown_failures: AtomicUsize::new(0),
            settled: Once::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn libraries(&self) -> &'a [LibraryUnit] {
        self.libraries
    }

    #[inline]
    pub fn entry_points(&self) -> &'a [EntryPointUnit] {
        self.entry_points
    }

    #[inline]
    pub fn state(&self) -> TerminationState {
        self.state.get()
    }

    /// Number of chain positions that completed initialization.
    #[inline]
    pub fn initialized_units(&self) -> usize {
        self.initialized.count()
    }

    /// Finalizers that returned an error during teardown.
    #[inline]
    pub fn teardown_failures(&self) -> usize {
        self.teardown_failures.load(Ordering::SeqCst)
    }

    /// Run the whole lifecycle and produce the status for the firmware.
    ///
    /// Both firmware entry symbols end up here.
    pub fn dispatch(&self, image: ImageHandle, firmware: &dyn Firmware) -> Status {
        let ctx = InvocationContext::new(image, firmware, self);
        match self.run(&ctx) {
            Ok(status) => status,
            Err(err) => {
                klog_error!("[lifecycle] {}", err);
                err.status()
            }
        }
    }

    fn run(&self, ctx: &InvocationContext<'_>) -> LifecycleResult<Status> {
        if !self.entered.init_once() {
            return Err(LifecycleError::AlreadyStarted);
        }
        klog_set_level(self.config.log_level);

        self.check_revision(ctx.firmware().revision())?;

        let constructed = constructors::run(
            self.libraries,
            self.config.constructor_policy,
            &self.initialized,
            ctx,
        );
        self.state.advance(TerminationState::ConstructorsRun);

        let outcome = match constructed {
            Ok(()) => Ok(entry_points::run(
                self.entry_points,
                self.config.entry_policy,
                ctx,
            )),
            Err(err) => Err(err),
        };
        self.settled.call_once(|| match &outcome {
            Ok(status) => *status,
            Err(err) => err.status(),
        });

        self.teardown(ctx);
        self.state.advance(TerminationState::Returned);
        klog_debug!("[lifecycle] returning to firmware");
        outcome
    }

    fn check_revision(&self, reported: u32) -> LifecycleResult<()> {
        let required = self.config.required_revision;
        if required != 0 && required > reported {
            return Err(LifecycleError::IncompatibleVersion { required, reported });
        }
        Ok(())
    }

    /// Run the destructor chain unless some earlier path already did.
    fn teardown(&self, ctx: &InvocationContext<'_>) {
        if !self.state.advance(TerminationState::DestructorsRun) {
            return;
        }
        destructors::run(
            self.libraries,
            &self.initialized,
            &self.teardown_failures,
            ctx,
        );
    }

    /// Tear down (unless already done) and terminate through the firmware.
    ///
    /// The firmware gets the first status that was settled: the earliest exit
    /// request, or the dispatch outcome once the entry points have finished.
    /// An exit from a finalizer therefore cannot replace the status that
    /// teardown is running for.
    pub(crate) fn exit(&self, ctx: &InvocationContext<'_>, status: Status) -> ! {
        klog_info!("[lifecycle] exit requested with {}", status);
        let settled = *self.settled.call_once(|| status);
        if settled != status {
            klog_info!("[lifecycle] keeping earlier status {}", settled);
        }
        self.teardown(ctx);
        ctx.firmware().exit(ctx.image(), settled)
    }
}
