//! Serial channel trait for hand-control communication.
//!
//! The [`SerialChannel`] trait abstracts over the physical link to the hand
//! control. The protocol engine in `nexstar-hc` operates on a channel rather
//! than directly on a serial port, enabling both real hardware control and
//! deterministic unit testing with `MockChannel` from the
//! `nexstar-test-harness` crate.
//!
//! Opening and configuring the port (path, baud rate, timeouts) is the
//! host's job. A channel is handed to the client already open.

use crate::error::Result;

/// Blocking byte-level channel to a hand control.
///
/// A channel is exclusively owned by one client. Each client operation
/// runs flush, write, and read calls back to back, so implementations need
/// no internal locking.
pub trait SerialChannel: Send {
    /// Discard bytes queued for transmission but not yet sent.
    fn flush_output(&mut self) -> Result<()>;

    /// Discard bytes received but not yet read.
    fn flush_input(&mut self) -> Result<()>;

    /// Write `data` and return how many bytes the channel actually took.
    ///
    /// A short count is not an error at this layer; the client compares it
    /// against the frame length.
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Read exactly `n` bytes, blocking until they arrive.
    ///
    /// Returns [`Error::Timeout`](crate::error::Error::Timeout) if the
    /// channel's own timeout elapses first.
    fn read(&mut self, n: usize) -> Result<Vec<u8>>;

    /// Number of received bytes that can be read without blocking.
    fn bytes_available(&mut self) -> Result<usize>;
}

impl<C: SerialChannel + ?Sized> SerialChannel for Box<C> {
    fn flush_output(&mut self) -> Result<()> {
        (**self).flush_output()
    }

    fn flush_input(&mut self) -> Result<()> {
        (**self).flush_input()
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        (**self).write(data)
    }

    fn read(&mut self, n: usize) -> Result<Vec<u8>> {
        (**self).read(n)
    }

    fn bytes_available(&mut self) -> Result<usize> {
        (**self).bytes_available()
    }
}
