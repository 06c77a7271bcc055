//! Error types for the NexStar client.
//!
//! All fallible operations across the workspace return [`Result<T>`], which
//! uses [`Error`] as the error type. Channel failures, framing violations,
//! and catalog misses are all captured here.
//!
//! A device that does not answer a presence query is not an error: it is
//! reported as [`DeviceVersion::Absent`](crate::types::DeviceVersion::Absent).

use std::fmt;

/// Which static catalog a failed code lookup went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeKind {
    /// Mount model codes returned by `GetModel`.
    Model,
    /// Auxiliary device codes used by `GetDeviceVersion`.
    Device,
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeKind::Model => write!(f, "model"),
            CodeKind::Device => write!(f, "device"),
        }
    }
}

/// The error type for all NexStar operations.
///
/// Every protocol variant carries the name of the operation that detected
/// it, so a caller can decide whether to resend without parsing messages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The byte read where the `#` terminator belongs was something else.
    ///
    /// The reply is malformed or the channel is out of step with the
    /// hand control. No data from the reply is returned.
    #[error("{operation}: framing error: expected terminator 0x{expected:02X}, got 0x{actual:02X}")]
    Framing {
        operation: &'static str,
        expected: u8,
        actual: u8,
    },

    /// The channel accepted a different number of bytes than the command
    /// frame holds. No reply is read after this.
    #[error("{operation}: wrote {actual} of {expected} bytes")]
    WriteMismatch {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A model or device code has no catalog entry.
    #[error("unknown {kind} code: {code}")]
    UnknownCode { kind: CodeKind, code: u8 },

    /// The hand control echoed a different byte than the one sent.
    #[error("echo mismatch: sent 0x{expected:02X}, got 0x{actual:02X}")]
    EchoMismatch { expected: u8, actual: u8 },

    /// A channel-level error (port closed, driver failure).
    #[error("transport error: {0}")]
    Transport(String),

    /// An invalid parameter was passed to an operation.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A blocking read did not complete within the channel's timeout.
    #[error("timeout waiting for response")]
    Timeout,

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
