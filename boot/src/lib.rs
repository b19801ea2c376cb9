#![no_std]
#![forbid(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
extern crate std;

pub use efistart_abi as abi;

pub mod application;
pub mod config;
mod constructors;
pub mod context;
mod destructors;
pub mod entry;
mod entry_points;
pub mod firmware;
pub mod state;
pub mod unit;

pub use application::Application;
pub use config::{AppConfig, ConstructorPolicy, EntryPolicy, MAX_LIBRARY_UNITS};
pub use context::{Firmware, InvocationContext};
pub use firmware::{FirmwareConsole, UefiFirmware, CONSOLE};
pub use state::TerminationState;
pub use unit::{EntryPointFn, EntryPointUnit, FinalizerFn, InitializerFn, LibraryUnit, UnitFlags};
