//! nexstar-test-harness: Test utilities for the NexStar client.
//!
//! This crate provides [`MockChannel`] for deterministic unit testing of the
//! protocol engine without a hand control attached.

pub mod mock_serial;

pub use mock_serial::MockChannel;
