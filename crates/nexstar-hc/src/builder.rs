//! HandControlBuilder -- fluent builder for constructing [`HandControl`]
//! instances.
//!
//! Separates configuration from construction. The only tunable is the
//! settle delay of the device-presence handshake; the channel itself is
//! opened and configured by the host before it is handed over.
//!
//! # Example
//!
//! ```
//! use nexstar_hc::builder::HandControlBuilder;
//! use nexstar_test_harness::MockChannel;
//! use std::time::Duration;
//!
//! let hc = HandControlBuilder::new()
//!     .settle_delay(Duration::from_millis(1500))
//!     .build_with_channel(MockChannel::new());
//! assert_eq!(hc.settle_delay(), Duration::from_millis(1500));
//! ```

use std::time::Duration;

use nexstar_core::channel::SerialChannel;

use crate::client::{DEFAULT_SETTLE_DELAY, HandControl};

/// Fluent builder for [`HandControl`].
#[derive(Debug, Clone)]
pub struct HandControlBuilder {
    settle_delay: Duration,
}

impl HandControlBuilder {
    /// Create a new builder.
    ///
    /// Defaults:
    /// - settle_delay: 1 s ([`DEFAULT_SETTLE_DELAY`])
    pub fn new() -> Self {
        HandControlBuilder {
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    /// Set the wait between sending a device query and checking how many
    /// reply bytes arrived.
    ///
    /// The presence decision relies on the whole reply having arrived by
    /// then. Shortening it against real hardware can turn a present device
    /// into a reported absence.
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Build a [`HandControl`] around a caller-provided channel.
    ///
    /// Pass a `SerialPortChannel` from `nexstar-transport` for real hardware
    /// or a `MockChannel` from `nexstar-test-harness` in tests.
    pub fn build_with_channel<C: SerialChannel>(self, channel: C) -> HandControl<C> {
        HandControl::with_settle_delay(channel, self.settle_delay)
    }

    /// Build a [`HandControl`] around a boxed channel.
    pub fn build_boxed(self, channel: Box<dyn SerialChannel>) -> HandControl {
        self.build_with_channel(channel)
    }
}

impl Default for HandControlBuilder {
    fn default() -> Self {
        Self::new()
    }
}
