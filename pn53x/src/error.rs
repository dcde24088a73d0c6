// pn53x-rs/pn53x/src/error.rs

//! Driver status codes and the crate error type.

use thiserror::Error;

/// Status code reported by the driver layer.
///
/// Negative values follow libnfc's `NFC_E*` numbering; anything the crate
/// does not know about is kept verbatim in [`ErrorCode::Unknown`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// No error.
    #[error("success")]
    Success,
    /// Transport failure.
    #[error("input / output error")]
    Io,
    /// Rejected argument.
    #[error("invalid argument(s)")]
    InvalidArgument,
    /// Operation the device cannot do.
    #[error("not supported by device")]
    DeviceNotSupported,
    /// No matching reader.
    #[error("no such device")]
    NoSuchDevice,
    /// Response larger than the buffer.
    #[error("buffer overflow")]
    Overflow,
    /// No answer in time.
    #[error("timeout")]
    Timeout,
    /// Cancelled by an abort request.
    #[error("operation aborted")]
    Aborted,
    /// Missing in the driver.
    #[error("not (yet) implemented")]
    NotImplemented,
    /// The target left the session.
    #[error("target released")]
    TargetReleased,
    /// Corrupted or missing frame on the air.
    #[error("RF transmission error")]
    RfTransmission,
    /// Crypto1 authentication was refused.
    #[error("Mifare Classic authentication failed")]
    AuthenticationFailed,
    /// Driver internal error.
    #[error("software error")]
    Software,
    /// Error reported by the chip itself.
    #[error("device's internal chip error")]
    Chip,
    /// Status outside the known set.
    #[error("Error {0}")]
    Unknown(i32),
}

impl ErrorCode {
    /// Map a raw driver status to its code.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Success,
            -1 => Self::Io,
            -2 => Self::InvalidArgument,
            -3 => Self::DeviceNotSupported,
            -4 => Self::NoSuchDevice,
            -5 => Self::Overflow,
            -6 => Self::Timeout,
            -7 => Self::Aborted,
            -8 => Self::NotImplemented,
            -10 => Self::TargetReleased,
            -20 => Self::RfTransmission,
            -30 => Self::AuthenticationFailed,
            -80 => Self::Software,
            -90 => Self::Chip,
            other => Self::Unknown(other),
        }
    }

    /// Raw numeric value as used by the driver.
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Io => -1,
            Self::InvalidArgument => -2,
            Self::DeviceNotSupported => -3,
            Self::NoSuchDevice => -4,
            Self::Overflow => -5,
            Self::Timeout => -6,
            Self::Aborted => -7,
            Self::NotImplemented => -8,
            Self::TargetReleased => -10,
            Self::RfTransmission => -20,
            Self::AuthenticationFailed => -30,
            Self::Software => -80,
            Self::Chip => -90,
            Self::Unknown(raw) => raw,
        }
    }

    /// Interpret a driver return value: negative values are errors, anything
    /// else is a count.
    pub fn check(raw: i32) -> std::result::Result<usize, ErrorCode> {
        if raw < 0 {
            Err(Self::from_raw(raw))
        } else {
            Ok(raw as usize)
        }
    }

    /// Human readable message, identical to the `Display` output.
    pub fn message(self) -> String {
        self.to_string()
    }
}

/// Crate error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Transport failure.
    #[error("input / output error")]
    Io,

    /// Rejected argument, with the reason.
    #[error("invalid argument(s): {0}")]
    InvalidArgument(String),

    /// Operation the device cannot do.
    #[error("not supported by device")]
    DeviceNotSupported,

    /// No matching reader.
    #[error("no such device")]
    NoSuchDevice,

    /// The response did not fit; `partial` holds the bytes that did.
    #[error("buffer overflow ({} bytes kept)", .partial.len())]
    Overflow {
        /// Received prefix.
        partial: Vec<u8>,
    },

    /// No answer in time.
    #[error("timeout")]
    Timeout,

    /// Cancelled through an abort handle.
    #[error("operation aborted")]
    Aborted,

    /// Missing in the driver.
    #[error("not (yet) implemented")]
    NotImplemented,

    /// The target left the session.
    #[error("target released")]
    TargetReleased,

    /// Corrupted or missing frame on the air.
    #[error("RF transmission error")]
    RfTransmission,

    /// Crypto1 authentication was refused.
    #[error("Mifare Classic authentication failed")]
    AuthenticationFailed,

    /// Driver or context misuse.
    #[error("software error: {0}")]
    Software(String),

    /// Error reported by the chip itself.
    #[error("device's internal chip error")]
    Chip,

    /// The device handle was already closed.
    #[error("device closed")]
    DeviceClosed,

    /// Driver status with no dedicated variant.
    #[error("unrecognized driver status {0}")]
    Unrecognized(i32),
}

impl Error {
    /// Driver status code equivalent to this error, if there is one.
    pub fn code(&self) -> Option<ErrorCode> {
        let code = match self {
            Error::Io => ErrorCode::Io,
            Error::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Error::DeviceNotSupported => ErrorCode::DeviceNotSupported,
            Error::NoSuchDevice => ErrorCode::NoSuchDevice,
            Error::Overflow { .. } => ErrorCode::Overflow,
            Error::Timeout => ErrorCode::Timeout,
            Error::Aborted => ErrorCode::Aborted,
            Error::NotImplemented => ErrorCode::NotImplemented,
            Error::TargetReleased => ErrorCode::TargetReleased,
            Error::RfTransmission => ErrorCode::RfTransmission,
            Error::AuthenticationFailed => ErrorCode::AuthenticationFailed,
            Error::Software(_) => ErrorCode::Software,
            Error::Chip => ErrorCode::Chip,
            Error::Unrecognized(raw) => ErrorCode::Unknown(*raw),
            Error::DeviceClosed => return None,
        };
        Some(code)
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

impl From<ErrorCode> for Error {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::Io => Error::Io,
            ErrorCode::InvalidArgument => Error::InvalidArgument("rejected by driver".to_string()),
            ErrorCode::DeviceNotSupported => Error::DeviceNotSupported,
            ErrorCode::NoSuchDevice => Error::NoSuchDevice,
            ErrorCode::Overflow => Error::Overflow {
                partial: Vec::new(),
            },
            ErrorCode::Timeout => Error::Timeout,
            ErrorCode::Aborted => Error::Aborted,
            ErrorCode::NotImplemented => Error::NotImplemented,
            ErrorCode::TargetReleased => Error::TargetReleased,
            ErrorCode::RfTransmission => Error::RfTransmission,
            ErrorCode::AuthenticationFailed => Error::AuthenticationFailed,
            ErrorCode::Software => Error::Software("driver software error".to_string()),
            ErrorCode::Chip => Error::Chip,
            ErrorCode::Success => Error::Unrecognized(0),
            ErrorCode::Unknown(raw) => Error::Unrecognized(raw),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
