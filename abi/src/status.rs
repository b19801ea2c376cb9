//! Firmware status codes.
//!
//! A `Status` is a machine-word with the top bit marking an error. Warning
//! codes share the low bits with error codes but leave the top bit clear, so
//! only `is_error()` decides whether an outcome is a failure.

use core::fmt;

/// High bit of a status word: set for errors, clear for success and warnings.
pub const ERROR_BIT: usize = 1 << (usize::BITS - 1);

/// Status word returned across the firmware boundary.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Status(pub usize);

/// Generate the named status constants and their reverse lookup.
///
/// Each error entry becomes `Status::error(code)`, each warning entry becomes
/// a plain `Status(code)`, and `name()` maps both back to the identifier.
macro_rules! status_codes {
    (
        errors: { $($eval:literal => $ename:ident),* $(,)? },
        warnings: { $($wval:literal => $wname:ident),* $(,)? } $(,)?
    ) => {
        impl Status {
            $(pub const $ename: Self = Self::error($eval);)*
            $(pub const $wname: Self = Self($wval);)*

            /// Symbolic name of a well-known status, `None` for anything else.
            pub fn name(self) -> Option<&'static str> {
                match self {
                    Self::SUCCESS => Some("SUCCESS"),
                    $(Self::$ename => Some(stringify!($ename)),)*
                    $(Self::$wname => Some(stringify!($wname)),)*
                    _ => None,
                }
            }
        }
    };
}

impl Status {
    pub const SUCCESS: Self = Self(0);

    /// Build an error status from its low-bit code.
    #[inline]
    pub const fn error(code: usize) -> Self {
        Self(ERROR_BIT | code)
    }

    #[inline]
    pub const fn raw(self) -> usize {
        self.0
    }

    #[inline]
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_error(self) -> bool {
        self.0 & ERROR_BIT != 0
    }

    /// Non-zero status without the error bit.
    #[inline]
    pub const fn is_warning(self) -> bool {
        self.0 != 0 && !self.is_error()
    }

    /// Low bits of the status word, without the error bit.
    #[inline]
    pub const fn code(self) -> usize {
        self.0 & !ERROR_BIT
    }

    /// `Ok(())` for success and warnings, `Err(self)` for errors.
    #[inline]
    pub fn to_result(self) -> Result<(), Status> {
        if self.is_error() { Err(self) } else { Ok(()) }
    }
}

status_codes! {
    errors: {
        1 => LOAD_ERROR,
        2 => INVALID_PARAMETER,
        3 => UNSUPPORTED,
        4 => BAD_BUFFER_SIZE,
        5 => BUFFER_TOO_SMALL,
        6 => NOT_READY,
        7 => DEVICE_ERROR,
        8 => WRITE_PROTECTED,
        9 => OUT_OF_RESOURCES,
        10 => VOLUME_CORRUPTED,
        11 => VOLUME_FULL,
        12 => NO_MEDIA,
        13 => MEDIA_CHANGED,
        14 => NOT_FOUND,
        15 => ACCESS_DENIED,
        16 => NO_RESPONSE,
        17 => NO_MAPPING,
        18 => TIMEOUT,
        19 => NOT_STARTED,
        20 => ALREADY_STARTED,
        21 => ABORTED,
        22 => ICMP_ERROR,
        23 => TFTP_ERROR,
        24 => PROTOCOL_ERROR,
        25 => INCOMPATIBLE_VERSION,
        26 => SECURITY_VIOLATION,
        27 => CRC_ERROR,
        28 => END_OF_MEDIA,
        31 => END_OF_FILE,
        32 => INVALID_LANGUAGE,
        33 => COMPROMISED_DATA,
        34 => IP_ADDRESS_CONFLICT,
        35 => HTTP_ERROR,
    },
    warnings: {
        1 => WARN_UNKNOWN_GLYPH,
        2 => WARN_DELETE_FAILURE,
        3 => WARN_WRITE_FAILURE,
        4 => WARN_BUFFER_TOO_SMALL,
        5 => WARN_STALE_DATA,
        6 => WARN_FILE_SYSTEM,
        7 => WARN_RESET_REQUIRED,
    },
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Status::{}", name),
            None => write!(f, "Status({:#x})", self.0),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None if self.is_error() => write!(f, "error {:#x}", self.code()),
            None => write!(f, "status {:#x}", self.0),
        }
    }
}
