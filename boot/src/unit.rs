//! Library and entry-point units.
//!
//! The chains are produced ahead of time by the build and handed to
//! `Application::new` already in dependency order. Nothing here sorts or
//! reorders them.

use core::fmt;

use bitflags::bitflags;
use efistart_abi::Status;

use crate::context::InvocationContext;

pub type InitializerFn = fn(&InvocationContext<'_>) -> Status;
pub type FinalizerFn = fn(&InvocationContext<'_>) -> Status;
pub type EntryPointFn = fn(&InvocationContext<'_>) -> Status;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct UnitFlags: u32 {
        /// Initializer failure is logged and skipped instead of aborting the chain.
        const OPTIONAL = 1 << 0;
    }
}

/// One library instance in the constructor/destructor chain.
#[derive(Clone, Copy)]
pub struct LibraryUnit {
    name: &'static str,
    initializer: Option<InitializerFn>,
    finalizer: Option<FinalizerFn>,
    flags: UnitFlags,
}

impl LibraryUnit {
    pub const fn new(
        name: &'static str,
        initializer: Option<InitializerFn>,
        finalizer: Option<FinalizerFn>,
    ) -> Self {
        Self {
            name,
            initializer,
            finalizer,
            flags: UnitFlags::empty(),
        }
    }

    pub const fn with_flags(mut self, flags: UnitFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Shorthand for `with_flags(UnitFlags::OPTIONAL)`.
    pub const fn optional(self) -> Self {
        self.with_flags(UnitFlags::OPTIONAL)
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn initializer(&self) -> Option<InitializerFn> {
        self.initializer
    }

    #[inline]
    pub const fn finalizer(&self) -> Option<FinalizerFn> {
        self.finalizer
    }

    #[inline]
    pub const fn flags(&self) -> UnitFlags {
        self.flags
    }

    #[inline]
    pub const fn is_optional(&self) -> bool {
        self.flags.contains(UnitFlags::OPTIONAL)
    }
}

impl fmt::Debug for LibraryUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryUnit")
            .field("name", &self.name)
            .field("initializer", &self.initializer.is_some())
            .field("finalizer", &self.finalizer.is_some())
            .field("flags", &self.flags)
            .finish()
    }
}

/// One application entry function.
#[derive(Clone, Copy)]
pub struct EntryPointUnit {
    name: &'static str,
    entry: EntryPointFn,
}

impl EntryPointUnit {
    pub const fn new(name: &'static str, entry: EntryPointFn) -> Self {
        Self { name, entry }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn entry(&self) -> EntryPointFn {
        self.entry
    }
}

impl fmt::Debug for EntryPointUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPointUnit")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
