//! NexStar hand-control protocol backend.
//!
//! This crate implements the binary command/response protocol spoken by
//! Celestron NexStar hand controls over a serial link. It provides:
//!
//! - **Frame codec** ([`protocol`]) -- frame commands, read fixed-width
//!   replies, validate the `#` terminator and the written byte count, and
//!   run the device-presence handshake.
//! - **Field codec** ([`fields`]) -- location and date/time records, and the
//!   256's-complement timezone byte.
//! - **Command builders** ([`commands`]) -- construct each protocol command
//!   and parse the corresponding reply.
//! - **Catalog** ([`models`]) -- static model-code and device-code names.
//! - **Client** ([`client`]) -- [`HandControl`], one method per command,
//!   with the last fetched time and location cached.
//! - **Builder** ([`builder`]) -- [`HandControlBuilder`] for the settle delay.
//!
//! # Example
//!
//! ```
//! use nexstar_hc::HandControlBuilder;
//! use nexstar_test_harness::MockChannel;
//! use std::time::Duration;
//!
//! let mut mock = MockChannel::new();
//! mock.expect(b"m", &[5, b'#']);
//!
//! let mut hc = HandControlBuilder::new()
//!     .settle_delay(Duration::ZERO)
//!     .build_with_channel(mock);
//! assert_eq!(hc.get_model().unwrap(), "CGE");
//! ```

pub mod builder;
pub mod client;
pub mod commands;
pub mod fields;
pub mod models;
pub mod protocol;

pub use builder::HandControlBuilder;
pub use client::{DEFAULT_SETTLE_DELAY, DeviceStatus, HandControl};
