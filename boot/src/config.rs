//! Build-time application configuration.

use efistart_lib::KlogLevel;

/// Upper bound on library units per application; the teardown mask is 64 bits.
pub const MAX_LIBRARY_UNITS: usize = 64;

/// What a failing required initializer does to the rest of the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConstructorPolicy {
    /// Stop, tear down what was initialized, report the failure.
    #[default]
    Abort,
    /// Log, leave the unit out of teardown, keep going.
    Continue,
}

/// What an entry point returning an error does to the ones after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EntryPolicy {
    /// Run every entry point; the last outcome wins.
    #[default]
    RunAll,
    /// Skip the remaining entry points after the first error status.
    StopOnError,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Minimum firmware revision; 0 disables the check.
    pub required_revision: u32,
    pub constructor_policy: ConstructorPolicy,
    pub entry_policy: EntryPolicy,
    /// Log level applied when dispatch begins.
    pub log_level: KlogLevel,
}

impl AppConfig {
    pub const fn new() -> Self {
        Self {
            required_revision: 0,
            constructor_policy: ConstructorPolicy::Abort,
            entry_policy: EntryPolicy::RunAll,
            log_level: KlogLevel::Info,
        }
    }

    pub const fn with_required_revision(mut self, revision: u32) -> Self {
        self.required_revision = revision;
        self
    }

    pub const fn with_constructor_policy(mut self, policy: ConstructorPolicy) -> Self {
        self.constructor_policy = policy;
        self
    }

    pub const fn with_entry_policy(mut self, policy: EntryPolicy) -> Self {
        self.entry_policy = policy;
        self
    }

    pub const fn with_log_level(mut self, level: KlogLevel) -> Self {
        self.log_level = level;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
