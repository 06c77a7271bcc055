//! Serial port channel for hand-control communication.
//!
//! [`SerialPortChannel`] implements [`SerialChannel`] on top of a blocking
//! [`serialport::SerialPort`]. The port must already be open and configured
//! (the hand control talks 9600 8N1); this type only adapts its operations:
//!
//! | Channel operation  | Port operation                          |
//! |--------------------|-----------------------------------------|
//! | `flush_output`     | `clear(ClearBuffer::Output)`            |
//! | `flush_input`      | `clear(ClearBuffer::Input)`             |
//! | `write`            | `write` + `flush`, returning the count   |
//! | `read(n)`          | `read_exact` of `n` bytes               |
//! | `bytes_available`  | `bytes_to_read`                         |
//!
//! A read that runs past the port's timeout becomes
//! [`Error::Timeout`](nexstar_core::Error::Timeout).

use std::io::{self, Read, Write};

use nexstar_core::channel::SerialChannel;
use nexstar_core::error::{Error, Result};
use serialport::{ClearBuffer, SerialPort};

/// Serial port channel to a hand control.
pub struct SerialPortChannel {
    /// The underlying, already opened, port
    port: Box<dyn SerialPort>,
    /// Port name for logging/debugging
    port_name: String,
}

impl SerialPortChannel {
    /// Wrap an opened port.
    pub fn new(port: Box<dyn SerialPort>) -> Self {
        let port_name = port.name().unwrap_or_else(|| "<unnamed>".to_string());
        tracing::debug!(port = %port_name, timeout = ?port.timeout(), "Using serial port channel");
        Self { port, port_name }
    }

    /// The port's name, as reported by the OS.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Give back the wrapped port.
    pub fn into_inner(self) -> Box<dyn SerialPort> {
        self.port
    }

    fn clear(&mut self, buffer: ClearBuffer) -> Result<()> {
        self.port.clear(buffer).map_err(|e| {
            tracing::warn!(port = %self.port_name, error = %e, "Failed to clear serial buffer");
            port_error(e)
        })
    }
}

impl std::fmt::Debug for SerialPortChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialPortChannel")
            .field("port_name", &self.port_name)
            .finish_non_exhaustive()
    }
}

/// Convert a `serialport` error into a channel error.
fn port_error(e: serialport::Error) -> Error {
    Error::Transport(e.to_string())
}

/// Convert an I/O error from a port read or write into a channel error.
fn io_error(e: io::Error) -> Error {
    match e.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Error::Timeout,
        _ => Error::Io(e),
    }
}

impl SerialChannel for SerialPortChannel {
    fn flush_output(&mut self) -> Result<()> {
        self.clear(ClearBuffer::Output)
    }

    fn flush_input(&mut self) -> Result<()> {
        self.clear(ClearBuffer::Input)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        let written = self.port.write(data).map_err(|e| {
            tracing::warn!(port = %self.port_name, error = %e, "Serial write failed");
            io_error(e)
        })?;
        self.port.flush().map_err(io_error)?;
        tracing::trace!(port = %self.port_name, written, data = ?data, "Serial write");
        Ok(written)
    }

    fn read(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        self.port.read_exact(&mut buf).map_err(|e| {
            tracing::warn!(port = %self.port_name, wanted = n, error = %e, "Serial read failed");
            io_error(e)
        })?;
        tracing::trace!(port = %self.port_name, data = ?buf, "Serial read");
        Ok(buf)
    }

    fn bytes_available(&mut self) -> Result<usize> {
        let n = self.port.bytes_to_read().map_err(port_error)?;
        Ok(n as usize)
    }
}
