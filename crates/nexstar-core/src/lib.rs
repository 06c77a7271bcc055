//! nexstar-core: Core traits, types, and error definitions for the NexStar
//! hand-control client.
//!
//! This crate defines the abstractions shared by the protocol engine
//! (`nexstar-hc`), the serial adapters (`nexstar-transport`), and the mock
//! channel used in tests (`nexstar-test-harness`).
//!
//! # Key types
//!
//! - [`SerialChannel`] -- blocking byte-level channel to the hand control
//! - [`Location`], [`DateTime`], [`Version`], [`DeviceVersion`] -- decoded values
//! - [`Error`] / [`Result`] -- error handling

pub mod channel;
pub mod error;
pub mod types;

// Re-export key types at crate root for ergonomic `use nexstar_core::*`.
pub use channel::SerialChannel;
pub use error::{CodeKind, Error, Result};
pub use types::*;
