//! Lifecycle error taxonomy.
//!
//! The firmware only ever sees a `Status`; these variants exist so the
//! dispatcher can say what went wrong in its own terms and log it before the
//! conversion happens.

use core::fmt;

use crate::status::Status;
use crate::table::{revision_major, revision_minor};

/// Result type for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    /// The firmware reports an older revision than the application requires.
    IncompatibleVersion { required: u32, reported: u32 },
    /// A required library initializer returned an error status.
    ConstructorFailure { unit: &'static str, status: Status },
    /// The application was already dispatched once in this process.
    AlreadyStarted,
    /// The firmware handed over a null system table, or one without the
    /// system table signature.
    InvalidSystemTable,
}

impl LifecycleError {
    /// Status reported to the firmware for this error.
    #[inline]
    pub fn status(self) -> Status {
        match self {
            Self::IncompatibleVersion { .. } => Status::INCOMPATIBLE_VERSION,
            Self::ConstructorFailure { status, .. } => status,
            Self::AlreadyStarted => Status::ALREADY_STARTED,
            Self::InvalidSystemTable => Status::INVALID_PARAMETER,
        }
    }
}

impl From<LifecycleError> for Status {
    #[inline]
    fn from(err: LifecycleError) -> Self {
        err.status()
    }
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::IncompatibleVersion { required, reported } => write!(
                f,
                "firmware revision {}.{} is below required {}.{}",
                revision_major(reported),
                revision_minor(reported),
                revision_major(required),
                revision_minor(required)
            ),
            Self::ConstructorFailure { unit, status } => {
                write!(f, "library constructor '{}' failed: {}", unit, status)
            }
            Self::AlreadyStarted => f.write_str("application already dispatched"),
            Self::InvalidSystemTable => {
                f.write_str("system table is missing or has a bad signature")
            }
        }
    }
}
