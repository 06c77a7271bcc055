//! NexStar hand-control binary frame encoder/decoder.
//!
//! The hand control speaks a simple command/response protocol over a serial
//! link. A command is a single ASCII opcode followed by up to eight binary
//! parameter bytes. A reply is a fixed number of raw value bytes followed by
//! the `#` terminator. There is no length prefix and no checksum: the reply
//! shape is implied by the opcode.
//!
//! # Command format
//!
//! ```text
//! <opcode> [param0 .. param7]
//! ```
//!
//! # Reply format
//!
//! ```text
//! [value0 .. valueN] #
//! ```
//!
//! A reply whose final byte is not `#` is a framing error, whatever the
//! value bytes look like.

use std::time::Duration;

use bytes::{BufMut, BytesMut};
use tracing::{debug, trace, warn};

use nexstar_core::channel::SerialChannel;
use nexstar_core::error::{Error, Result};
use nexstar_core::types::{DeviceVersion, Version};

/// Reply terminator byte.
pub const TERMINATOR: u8 = b'#';

/// Bytes available after the settle delay when a queried device answers:
/// major, minor, and the terminator.
pub const DEVICE_PRESENT_AVAILABLE: usize = 3;

/// Zero padding bytes the hand control sends ahead of the terminator when the
/// queried device is absent.
pub const DEVICE_ABSENT_PADDING: usize = 3;

/// What the hand control sends back for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyShape {
    /// The terminator alone.
    Ack,
    /// `n` raw value bytes, then the terminator.
    Fields(usize),
    /// The byte that was sent, echoed back, then the terminator.
    Echo(u8),
    /// The device-presence reply, read after the settle delay.
    DeviceQuery,
}

/// A single protocol command ready to be framed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Operation name used in logs and errors (e.g. `"GetVersion"`).
    pub name: &'static str,
    /// ASCII opcode byte.
    pub opcode: u8,
    /// Binary parameter bytes (0-8).
    pub params: Vec<u8>,
    /// Expected reply.
    pub reply: ReplyShape,
}

impl Command {
    pub fn new(name: &'static str, opcode: u8, params: &[u8], reply: ReplyShape) -> Self {
        Command {
            name,
            opcode,
            params: params.to_vec(),
            reply,
        }
    }

    /// Number of bytes the channel must accept for this command.
    pub fn frame_len(&self) -> usize {
        1 + self.params.len()
    }

    /// Encode the command into raw bytes ready for transmission.
    ///
    /// # Example
    ///
    /// ```
    /// use nexstar_hc::protocol::{Command, ReplyShape};
    ///
    /// let cmd = Command::new("Echo", b'K', b"A", ReplyShape::Echo(b'A'));
    /// assert_eq!(cmd.encode(), b"KA");
    /// ```
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.frame_len());
        buf.put_u8(self.opcode);
        buf.put_slice(&self.params);
        buf.to_vec()
    }
}

/// Fail with [`Error::WriteMismatch`] unless the channel took the whole frame.
pub fn check_write(operation: &'static str, expected: usize, actual: usize) -> Result<()> {
    if actual != expected {
        warn!(operation, expected, actual, "short write; channel out of step");
        return Err(Error::WriteMismatch {
            operation,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Fail with [`Error::Framing`] unless `byte` is the terminator.
pub fn check_terminator(operation: &'static str, byte: u8) -> Result<()> {
    if byte != TERMINATOR {
        warn!(operation, actual = byte, "reply not terminated by '#'");
        return Err(Error::Framing {
            operation,
            expected: TERMINATOR,
            actual: byte,
        });
    }
    Ok(())
}

/// Read one byte from the channel.
fn read_byte<C: SerialChannel + ?Sized>(channel: &mut C) -> Result<u8> {
    let bytes = channel.read(1)?;
    bytes
        .first()
        .copied()
        .ok_or_else(|| Error::Transport("channel returned no data for a 1-byte read".into()))
}

/// Read exactly `n` bytes from the channel.
fn read_exact<C: SerialChannel + ?Sized>(channel: &mut C, n: usize) -> Result<Vec<u8>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let bytes = channel.read(n)?;
    if bytes.len() != n {
        return Err(Error::Transport(format!(
            "channel returned {} bytes for a {n}-byte read",
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// Read and validate the reply to `command`.
///
/// Returns the value bytes (without the terminator). For
/// [`ReplyShape::Echo`] the single echoed byte is returned once it has been
/// checked against the byte sent; the terminator is validated first, so a
/// bad terminator always surfaces as [`Error::Framing`].
///
/// [`ReplyShape::DeviceQuery`] replies are handled by
/// [`read_device_reply`] and rejected here.
pub fn read_reply<C: SerialChannel + ?Sized>(channel: &mut C, command: &Command) -> Result<Vec<u8>> {
    let values = match command.reply {
        ReplyShape::Ack => Vec::new(),
        ReplyShape::Fields(n) => read_exact(channel, n)?,
        ReplyShape::Echo(_) => vec![read_byte(channel)?],
        ReplyShape::DeviceQuery => {
            return Err(Error::InvalidParameter(format!(
                "{}: device-query replies need the settle-delay handshake",
                command.name
            )));
        }
    };
    let term = read_byte(channel)?;
    trace!(operation = command.name, values = ?values, term, "reply bytes");
    check_terminator(command.name, term)?;

    if let ReplyShape::Echo(sent) = command.reply {
        let got = values[0];
        if got != sent {
            warn!(sent, got, "echo mismatch");
            return Err(Error::EchoMismatch {
                expected: sent,
                actual: got,
            });
        }
    }

    Ok(values)
}

/// Run the device-presence handshake after a device query has been written.
///
/// The hand control does not frame an absent device explicitly. Instead the
/// reply is judged by how many bytes are waiting once `settle_delay` has
/// passed:
///
/// - exactly [`DEVICE_PRESENT_AVAILABLE`]: `[major, minor, '#']`, the device
///   is present.
/// - anything else: the device is absent; [`DEVICE_ABSENT_PADDING`] zero
///   bytes are read and discarded, then a trailing `'#'`.
///
/// Either way the last byte read must be the terminator.
pub fn read_device_reply<C: SerialChannel + ?Sized>(
    channel: &mut C,
    operation: &'static str,
    settle_delay: Duration,
) -> Result<DeviceVersion> {
    if !settle_delay.is_zero() {
        std::thread::sleep(settle_delay);
    }

    let available = channel.bytes_available()?;
    let result = if available == DEVICE_PRESENT_AVAILABLE {
        let version = read_exact(channel, 2)?;
        DeviceVersion::Present(Version::new(version[0], version[1]))
    } else {
        let padding = read_exact(channel, DEVICE_ABSENT_PADDING)?;
        trace!(operation, padding = ?padding, "skipped absent-device padding");
        DeviceVersion::Absent
    };
    let term = read_byte(channel)?;
    trace!(operation, available, term, "device query reply");
    check_terminator(operation, term)?;

    debug!(operation, available, present = result.is_present(), "device presence resolved");
    Ok(result)
}
