//! Serial channel implementations for the NexStar client.
//!
//! This crate provides concrete implementations of the
//! [`SerialChannel`](nexstar_core::SerialChannel) trait from `nexstar-core`:
//!
//! - [`SerialPortChannel`]: a host-opened `serialport` port (USB adapter or
//!   the hand control's RS-232 jack)
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use nexstar_transport::SerialPortChannel;
//!
//! # fn example() -> nexstar_core::Result<()> {
//! // The host owns port selection and line settings.
//! let port = serialport::new("/dev/ttyUSB0", 9600)
//!     .timeout(Duration::from_secs(3))
//!     .open()
//!     .map_err(|e| nexstar_core::Error::Transport(e.to_string()))?;
//! let channel = SerialPortChannel::new(port);
//! # Ok(())
//! # }
//! ```

pub mod serial;

pub use serial::SerialPortChannel;

// Re-exported so hosts can open ports without a separate dependency.
pub use serialport;
