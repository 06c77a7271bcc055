//! # nexstar -- Celestron NexStar hand-control client
//!
//! `nexstar` talks to a NexStar hand control over its serial port: it reads
//! the firmware and model, probes attached devices, checks alignment and
//! goto state, and gets or sets the site location and the date/time.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use nexstar::{HandControlBuilder, SerialPortChannel};
//!
//! fn main() -> nexstar::Result<()> {
//!     let port = nexstar::serialport::new("/dev/ttyUSB0", 9600)
//!         .timeout(Duration::from_secs(3))
//!         .open()
//!         .map_err(|e| nexstar::Error::Transport(e.to_string()))?;
//!
//!     let mut hc = HandControlBuilder::new().build_with_channel(SerialPortChannel::new(port));
//!     println!("Model: {}", hc.get_model()?);
//!     println!("HC version: {}", hc.get_version()?);
//!     println!("{}", hc.get_time()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! | Crate                  | Purpose                                          |
//! |------------------------|--------------------------------------------------|
//! | `nexstar-core`         | [`SerialChannel`] trait, value types, errors     |
//! | `nexstar-hc`           | Protocol codec and the [`HandControl`] client    |
//! | `nexstar-transport`    | `serialport` adapter (feature `serial`)          |
//! | `nexstar-test-harness` | `MockChannel` for tests                          |
//! | **`nexstar`**          | This facade crate -- re-exports everything       |
//!
//! ## Errors
//!
//! Every operation returns [`Result`]. A reply that does not end in `#`
//! yields [`Error::Framing`]; a short write yields [`Error::WriteMismatch`]
//! before any reply is read; an unlisted model or device code yields
//! [`Error::UnknownCode`]. An absent device is not an error, see
//! [`DeviceVersion::Absent`]. Nothing is retried.

pub use nexstar_core::*;

pub use nexstar_hc::{DEFAULT_SETTLE_DELAY, DeviceStatus, HandControl, HandControlBuilder};

/// Protocol internals: framing, field codec, command builders, catalog.
pub mod hc {
    pub use nexstar_hc::{commands, fields, models, protocol};
}

#[cfg(feature = "serial")]
pub use nexstar_transport::{SerialPortChannel, serialport};
