//! efistart firmware ABI types
//!
//! This crate holds the definitions shared between the firmware and an
//! efistart application: status words, handles, the system and boot services
//! tables, and the lifecycle error taxonomy. It carries no behavior beyond
//! small accessors.
//!
//! All table types are `#[repr(C)]` for ABI stability.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod error;
pub mod status;
pub mod table;

pub use error::*;
pub use status::*;
pub use table::*;
