//! Mock serial channel for deterministic testing of the protocol engine.
//!
//! [`MockChannel`] implements the [`SerialChannel`] trait with pre-loaded
//! request/reply pairs. This lets you test frame encoding, reply parsing,
//! and the device-presence handshake without real hardware.
//!
//! # Example
//!
//! ```
//! use nexstar_test_harness::MockChannel;
//!
//! let mut mock = MockChannel::new();
//! // When the client sends `V`, the hand control answers 4.21 and `#`.
//! mock.expect(b"V", &[4, 21, b'#']);
//! ```

use std::collections::VecDeque;

use nexstar_core::channel::SerialChannel;
use nexstar_core::error::{Error, Result};

/// A pre-loaded request/reply pair for the mock channel.
#[derive(Debug, Clone)]
struct Expectation {
    /// The exact bytes we expect to be written.
    request: Vec<u8>,
    /// The bytes placed in the input buffer once the request is written.
    reply: Vec<u8>,
}

/// A mock [`SerialChannel`] for testing without hardware.
///
/// Expectations are consumed in order. When `write()` is called, the data is
/// recorded and matched against the next expectation; the matching reply is
/// appended to the input buffer, where `read()` and `bytes_available()` see
/// it. `flush_input()` empties the input buffer, just like a real port.
#[derive(Debug, Default)]
pub struct MockChannel {
    /// Ordered queue of expected request/reply pairs.
    expectations: VecDeque<Expectation>,
    /// Bytes "received" from the hand control and not yet read.
    input: VecDeque<u8>,
    /// Log of all frames written through this channel.
    sent_log: Vec<Vec<u8>>,
    /// When set, `write()` reports this many bytes written instead of the
    /// full frame length.
    short_write: Option<usize>,
    /// Number of `read()` calls made.
    reads: usize,
    /// Total bytes handed out by `read()`.
    bytes_read: usize,
    /// Number of `flush_output()` / `flush_input()` calls made.
    output_flushes: usize,
    input_flushes: usize,
}

impl MockChannel {
    /// Create a new, empty mock channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an expected request/reply pair.
    ///
    /// When `write()` is called with data matching `request`, `reply` becomes
    /// readable.
    pub fn expect(&mut self, request: &[u8], reply: &[u8]) {
        self.expectations.push_back(Expectation {
            request: request.to_vec(),
            reply: reply.to_vec(),
        });
    }

    /// Make every following `write()` report `count` bytes written.
    pub fn set_short_write(&mut self, count: usize) {
        self.short_write = Some(count);
    }

    /// Put bytes straight into the input buffer, as if they arrived
    /// unsolicited.
    pub fn push_input(&mut self, data: &[u8]) {
        self.input.extend(data.iter().copied());
    }

    /// All frames written through this channel, one element per `write()`.
    pub fn sent_data(&self) -> &[Vec<u8>] {
        &self.sent_log
    }

    /// Number of expectations that have not yet been consumed.
    pub fn remaining_expectations(&self) -> usize {
        self.expectations.len()
    }

    /// Number of input bytes still unread.
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }

    /// Number of `read()` calls made so far.
    pub fn read_calls(&self) -> usize {
        self.reads
    }

    /// Total number of bytes consumed by `read()` so far.
    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    /// Number of `(flush_output, flush_input)` calls made so far.
    pub fn flush_counts(&self) -> (usize, usize) {
        (self.output_flushes, self.input_flushes)
    }
}

impl SerialChannel for MockChannel {
    fn flush_output(&mut self) -> Result<()> {
        self.output_flushes += 1;
        Ok(())
    }

    fn flush_input(&mut self) -> Result<()> {
        self.input_flushes += 1;
        self.input.clear();
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.sent_log.push(data.to_vec());

        let expectation = self
            .expectations
            .pop_front()
            .ok_or_else(|| Error::Transport("no more expectations in mock channel".into()))?;
        if data != expectation.request.as_slice() {
            return Err(Error::Transport(format!(
                "unexpected write data: expected {:02X?}, got {:02X?}",
                expectation.request, data
            )));
        }
        self.input.extend(expectation.reply);

        Ok(self.short_write.unwrap_or(data.len()))
    }

    fn read(&mut self, n: usize) -> Result<Vec<u8>> {
        self.reads += 1;
        if self.input.len() < n {
            // A real port would block until its timeout; the bytes that did
            // arrive stay buffered.
            return Err(Error::Timeout);
        }
        self.bytes_read += n;
        Ok(self.input.drain(..n).collect())
    }

    fn bytes_available(&mut self) -> Result<usize> {
        Ok(self.input.len())
    }
}
