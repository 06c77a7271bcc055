//! HandControl -- the protocol client for a NexStar hand control.
//!
//! This module ties the frame codec ([`protocol`]), the command builders
//! ([`commands`]), and the static catalog ([`models`]) to a
//! [`SerialChannel`]. Every operation is one uninterrupted exchange:
//! flush both directions, write the frame, check the written count, read
//! and validate the reply.
//!
//! There is no retry. A failed check aborts the operation and the error is
//! returned to the caller, who decides whether to resend.
//!
//! The client owns its channel. Callers that share a hand control between
//! threads wrap the whole client in a lock so no two exchanges interleave.

use std::time::Duration;

use tracing::debug;

use nexstar_core::channel::SerialChannel;
use nexstar_core::error::Result;
use nexstar_core::types::{DateTime, DeviceVersion, Location, Version};

use crate::commands;
use crate::models;
use crate::protocol::{self, Command};

/// Default wait between sending a device query and checking how many reply
/// bytes arrived.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// The last value fetched by a Get, and whether a newer Get has been issued
/// since.
#[derive(Debug, Clone)]
struct Cached<T> {
    value: Option<T>,
    stale: bool,
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Cached {
            value: None,
            stale: false,
        }
    }
}

impl<T: Copy> Cached<T> {
    fn invalidate(&mut self) {
        self.stale = true;
    }

    fn store(&mut self, value: T) {
        self.value = Some(value);
        self.stale = false;
    }
}

/// Presence and version of one catalog device, as reported by
/// [`HandControl::survey_devices`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceStatus {
    pub code: u8,
    pub name: &'static str,
    pub version: DeviceVersion,
}

/// A NexStar hand control reached over a serial channel.
///
/// Constructed via [`HandControlBuilder`](crate::builder::HandControlBuilder)
/// or [`HandControl::new`].
pub struct HandControl<C: SerialChannel = Box<dyn SerialChannel>> {
    channel: C,
    settle_delay: Duration,
    time: Cached<DateTime>,
    location: Cached<Location>,
}

impl<C: SerialChannel> HandControl<C> {
    /// Create a client with the default settle delay.
    pub fn new(channel: C) -> Self {
        Self::with_settle_delay(channel, DEFAULT_SETTLE_DELAY)
    }

    pub(crate) fn with_settle_delay(channel: C, settle_delay: Duration) -> Self {
        HandControl {
            channel,
            settle_delay,
            time: Cached::default(),
            location: Cached::default(),
        }
    }

    /// The settle delay used by device queries.
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Give back the channel, dropping the client and its cached values.
    pub fn into_channel(self) -> C {
        self.channel
    }

    // ---------------------------------------------------------------
    // Exchange primitives
    // ---------------------------------------------------------------

    /// Flush, write the frame, and check that all of it was taken.
    fn send(&mut self, command: &Command) -> Result<()> {
        let frame = command.encode();
        debug!(
            operation = command.name,
            opcode = %char::from(command.opcode),
            len = frame.len(),
            "sending command"
        );

        self.channel.flush_output()?;
        self.channel.flush_input()?;
        let written = self.channel.write(&frame)?;
        protocol::check_write(command.name, frame.len(), written)
    }

    /// Send `command` and return the value bytes of its validated reply.
    fn execute(&mut self, command: &Command) -> Result<Vec<u8>> {
        self.send(command)?;
        protocol::read_reply(&mut self.channel, command)
    }

    // ---------------------------------------------------------------
    // Hand-control information
    // ---------------------------------------------------------------

    /// Read the hand-control firmware version.
    pub fn get_version(&mut self) -> Result<Version> {
        let data = self.execute(&commands::cmd_get_version())?;
        commands::parse_version(&data)
    }

    /// Read the raw mount model code.
    pub fn get_model_code(&mut self) -> Result<u8> {
        let data = self.execute(&commands::cmd_get_model())?;
        commands::parse_model_code(&data)
    }

    /// Read the mount model and resolve it to a name.
    ///
    /// Fails with [`Error::UnknownCode`](nexstar_core::Error::UnknownCode)
    /// if the code is not in the catalog.
    pub fn get_model(&mut self) -> Result<&'static str> {
        let code = self.get_model_code()?;
        models::model_name(code)
    }

    /// Query the firmware version of an auxiliary device.
    ///
    /// Blocks for the settle delay. An absent device yields
    /// [`DeviceVersion::Absent`], not an error.
    pub fn get_device_version(&mut self, device: u8) -> Result<DeviceVersion> {
        let command = commands::cmd_get_device_version(device);
        self.send(&command)?;
        protocol::read_device_reply(&mut self.channel, command.name, self.settle_delay)
    }

    /// Query every catalog device in turn.
    pub fn survey_devices(&mut self) -> Result<Vec<DeviceStatus>> {
        models::KNOWN_DEVICES
            .iter()
            .map(|&(code, name)| -> Result<DeviceStatus> {
                let version = self.get_device_version(code)?;
                debug!(device = name, %version, "device surveyed");
                Ok(DeviceStatus {
                    code,
                    name,
                    version,
                })
            })
            .collect()
    }

    /// Send one byte and return the byte echoed back.
    pub fn echo(&mut self, byte: u8) -> Result<u8> {
        let data = self.execute(&commands::cmd_echo(byte))?;
        Ok(data[0])
    }

    // ---------------------------------------------------------------
    // Mount status
    // ---------------------------------------------------------------

    pub fn is_alignment_complete(&mut self) -> Result<bool> {
        let data = self.execute(&commands::cmd_get_alignment_status())?;
        commands::parse_alignment(&data)
    }

    pub fn is_goto_in_progress(&mut self) -> Result<bool> {
        let data = self.execute(&commands::cmd_get_goto_status())?;
        commands::parse_goto_status(&data)
    }

    pub fn cancel_goto(&mut self) -> Result<()> {
        self.execute(&commands::cmd_cancel_goto())?;
        Ok(())
    }

    // ---------------------------------------------------------------
    // Time and location
    // ---------------------------------------------------------------

    /// Read the site location and cache it.
    ///
    /// The cached location is marked stale as soon as this is called. On
    /// failure the previous value stays cached, still marked stale.
    pub fn get_location(&mut self) -> Result<Location> {
        self.location.invalidate();
        let data = self.execute(&commands::cmd_get_location())?;
        let location = commands::parse_location(&data)?;
        debug!(%location, "location read");
        self.location.store(location);
        Ok(location)
    }

    /// Write the site location. The cached location is left as it was.
    pub fn set_location(&mut self, location: &Location) -> Result<()> {
        self.execute(&commands::cmd_set_location(location))?;
        Ok(())
    }

    /// Read the date and time and cache them.
    ///
    /// Caching follows [`get_location`](Self::get_location).
    pub fn get_time(&mut self) -> Result<DateTime> {
        self.time.invalidate();
        let data = self.execute(&commands::cmd_get_time())?;
        let time = commands::parse_time(&data)?;
        debug!(%time, "time read");
        self.time.store(time);
        Ok(time)
    }

    /// Write the date and time. The cached time is left as it was.
    pub fn set_time(&mut self, time: &DateTime) -> Result<()> {
        self.execute(&commands::cmd_set_time(time))?;
        Ok(())
    }

    /// The last location returned by a successful [`get_location`](Self::get_location).
    pub fn cached_location(&self) -> Option<&Location> {
        self.location.value.as_ref()
    }

    /// Whether a `get_location` has been issued since the cached value was
    /// stored.
    pub fn is_location_stale(&self) -> bool {
        self.location.stale
    }

    /// The last time returned by a successful [`get_time`](Self::get_time).
    pub fn cached_time(&self) -> Option<&DateTime> {
        self.time.value.as_ref()
    }

    /// Whether a `get_time` has been issued since the cached value was
    /// stored.
    pub fn is_time_stale(&self) -> bool {
        self.time.stale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DEVICE_ALT_DEC_MOTOR, DEVICE_AZM_RA_MOTOR, DEVICE_GPS, DEVICE_RTC};
    use nexstar_core::error::{CodeKind, Error};
    use nexstar_core::types::{Dms, EastWest, NorthSouth};
    use nexstar_test_harness::MockChannel;

    fn make_test_hc(mock: MockChannel) -> HandControl<MockChannel> {
        HandControl::with_settle_delay(mock, Duration::ZERO)
    }

    fn sample_location() -> Location {
        Location::new(
            Dms::new(10, 20, 30),
            NorthSouth::North,
            Dms::new(40, 50, 0),
            EastWest::West,
        )
    }

    fn sample_time() -> DateTime {
        DateTime {
            hour: 21,
            minute: 45,
            second: 10,
            month: 10,
            day: 18,
            year: 26,
            timezone: -7,
            daylight_saving: true,
        }
    }

    // -----------------------------------------------------------------
    // Version / model / echo
    // -----------------------------------------------------------------

    #[test]
    fn test_get_version() {
        let mut mock = MockChannel::new();
        mock.expect(b"V", &[4, 21, b'#']);

        let mut hc = make_test_hc(mock);
        assert_eq!(hc.get_version().unwrap(), Version::new(4, 21));
        assert_eq!(hc.channel().flush_counts(), (1, 1));
    }

    #[test]
    fn test_get_version_bad_terminator() {
        let mut mock = MockChannel::new();
        mock.expect(b"V", &[4, 21, 0]);

        let mut hc = make_test_hc(mock);
        assert!(matches!(
            hc.get_version(),
            Err(Error::Framing {
                operation: "GetVersion",
                ..
            })
        ));
    }

    #[test]
    fn test_flush_discards_stale_input() {
        let mut mock = MockChannel::new();
        mock.push_input(b"junk#");
        mock.expect(b"V", &[1, 6, b'#']);

        let mut hc = make_test_hc(mock);
        assert_eq!(hc.get_version().unwrap(), Version::new(1, 6));
    }

    #[test]
    fn test_get_model() {
        let mut mock = MockChannel::new();
        mock.expect(b"m", &[5, b'#']);

        let mut hc = make_test_hc(mock);
        assert_eq!(hc.get_model().unwrap(), "CGE");
    }

    #[test]
    fn test_get_model_unknown_code() {
        let mut mock = MockChannel::new();
        mock.expect(b"m", &[99, b'#']);

        let mut hc = make_test_hc(mock);
        assert!(matches!(
            hc.get_model(),
            Err(Error::UnknownCode {
                kind: CodeKind::Model,
                code: 99
            })
        ));
    }

    #[test]
    fn test_get_model_code_raw() {
        let mut mock = MockChannel::new();
        mock.expect(b"m", &[99, b'#']);

        let mut hc = make_test_hc(mock);
        assert_eq!(hc.get_model_code().unwrap(), 99);
    }

    #[test]
    fn test_echo() {
        let mut mock = MockChannel::new();
        mock.expect(b"KA", b"A#");

        let mut hc = make_test_hc(mock);
        assert_eq!(hc.echo(b'A').unwrap(), b'A');
        assert_eq!(hc.channel().sent_data(), &[b"KA".to_vec()]);
        assert_eq!(hc.channel().bytes_read(), 2);
    }

    #[test]
    fn test_echo_mismatch() {
        let mut mock = MockChannel::new();
        mock.expect(b"KA", b"Z#");

        let mut hc = make_test_hc(mock);
        assert!(matches!(
            hc.echo(b'A'),
            Err(Error::EchoMismatch {
                expected: b'A',
                actual: b'Z'
            })
        ));
    }

    #[test]
    fn test_echo_short_write_reads_nothing() {
        let mut mock = MockChannel::new();
        mock.expect(b"KA", b"A#");
        mock.set_short_write(1);

        let mut hc = make_test_hc(mock);
        match hc.echo(b'A') {
            Err(Error::WriteMismatch {
                operation,
                expected,
                actual,
            }) => {
                assert_eq!(operation, "Echo");
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("expected WriteMismatch, got {other:?}"),
        }
        assert_eq!(hc.channel().read_calls(), 0);
    }

    // -----------------------------------------------------------------
    // Device presence
    // -----------------------------------------------------------------

    #[test]
    fn test_device_present() {
        let mut mock = MockChannel::new();
        mock.expect(&[b'P', 1, DEVICE_GPS, 254, 0, 0, 0, 2], &[1, 6, b'#']);

        let mut hc = make_test_hc(mock);
        let v = hc.get_device_version(DEVICE_GPS).unwrap();
        assert_eq!(v, DeviceVersion::Present(Version::new(1, 6)));
        assert_eq!(v.to_string(), "1.6");
        assert_eq!(hc.channel().bytes_read(), 3);
    }

    #[test]
    fn test_device_absent() {
        let mut mock = MockChannel::new();
        mock.expect(&[b'P', 1, DEVICE_RTC, 254, 0, 0, 0, 2], &[0, 0, 0, b'#']);

        let mut hc = make_test_hc(mock);
        let v = hc.get_device_version(DEVICE_RTC).unwrap();
        assert_eq!(v, DeviceVersion::Absent);
        assert_eq!(v.to_string(), "None");
        assert_eq!(hc.channel().bytes_read(), 4);
    }

    #[test]
    fn test_device_query_short_write() {
        let mut mock = MockChannel::new();
        mock.expect(&[b'P', 1, DEVICE_GPS, 254, 0, 0, 0, 2], &[1, 6, b'#']);
        mock.set_short_write(7);

        let mut hc = make_test_hc(mock);
        assert!(matches!(
            hc.get_device_version(DEVICE_GPS),
            Err(Error::WriteMismatch {
                expected: 8,
                actual: 7,
                ..
            })
        ));
        assert_eq!(hc.channel().read_calls(), 0);
    }

    #[test]
    fn test_survey_devices() {
        let mut mock = MockChannel::new();
        mock.expect(&[b'P', 1, DEVICE_AZM_RA_MOTOR, 254, 0, 0, 0, 2], &[5, 8, b'#']);
        mock.expect(&[b'P', 1, DEVICE_ALT_DEC_MOTOR, 254, 0, 0, 0, 2], &[5, 8, b'#']);
        mock.expect(&[b'P', 1, DEVICE_GPS, 254, 0, 0, 0, 2], &[0, 0, 0, b'#']);
        mock.expect(&[b'P', 1, DEVICE_RTC, 254, 0, 0, 0, 2], &[0, 0, 0, b'#']);

        let mut hc = make_test_hc(mock);
        let survey = hc.survey_devices().unwrap();
        assert_eq!(survey.len(), 4);
        assert_eq!(survey[0].name, "AZM/RA Motor");
        assert_eq!(survey[0].version, DeviceVersion::Present(Version::new(5, 8)));
        assert_eq!(survey[2].code, DEVICE_GPS);
        assert_eq!(survey[2].version, DeviceVersion::Absent);
        assert_eq!(hc.channel().remaining_expectations(), 0);
    }

    // -----------------------------------------------------------------
    // Alignment / goto
    // -----------------------------------------------------------------

    #[test]
    fn test_alignment_status() {
        let mut mock = MockChannel::new();
        mock.expect(b"J", &[1, b'#']);
        mock.expect(b"J", &[0, b'#']);

        let mut hc = make_test_hc(mock);
        assert!(hc.is_alignment_complete().unwrap());
        assert!(!hc.is_alignment_complete().unwrap());
    }

    #[test]
    fn test_goto_status() {
        let mut mock = MockChannel::new();
        mock.expect(b"J", b"1#");
        mock.expect(b"J", b"0#");

        let mut hc = make_test_hc(mock);
        assert!(hc.is_goto_in_progress().unwrap());
        assert!(!hc.is_goto_in_progress().unwrap());
    }

    #[test]
    fn test_goto_status_ignores_binary_alignment_flag() {
        let mut mock = MockChannel::new();
        mock.expect(b"J", &[1, b'#']);
        mock.expect(b"J", &[1, b'#']);

        let mut hc = make_test_hc(mock);
        assert!(hc.is_alignment_complete().unwrap());
        assert!(!hc.is_goto_in_progress().unwrap());
    }

    #[test]
    fn test_cancel_goto() {
        let mut mock = MockChannel::new();
        mock.expect(b"M", b"#");

        let mut hc = make_test_hc(mock);
        hc.cancel_goto().unwrap();
        assert_eq!(hc.channel().bytes_read(), 1);
    }

    #[test]
    fn test_cancel_goto_bad_terminator() {
        let mut mock = MockChannel::new();
        mock.expect(b"M", b"?");

        let mut hc = make_test_hc(mock);
        assert!(matches!(
            hc.cancel_goto(),
            Err(Error::Framing { actual: b'?', .. })
        ));
    }

    // -----------------------------------------------------------------
    // Location
    // -----------------------------------------------------------------

    #[test]
    fn test_set_then_get_location() {
        let loc = sample_location();
        let mut mock = MockChannel::new();
        mock.expect(&[b'W', 10, 20, 30, 0, 40, 50, 0, 1], b"#");
        mock.expect(b"w", &[10, 20, 30, 0, 40, 50, 0, 1, b'#']);

        let mut hc = make_test_hc(mock);
        hc.set_location(&loc).unwrap();
        assert!(hc.cached_location().is_none());

        assert_eq!(hc.get_location().unwrap(), loc);
        assert_eq!(hc.cached_location(), Some(&loc));
        assert!(!hc.is_location_stale());
    }

    #[test]
    fn test_set_location_short_write() {
        let mut mock = MockChannel::new();
        mock.expect(&[b'W', 10, 20, 30, 0, 40, 50, 0, 1], b"#");
        mock.set_short_write(8);

        let mut hc = make_test_hc(mock);
        assert!(matches!(
            hc.set_location(&sample_location()),
            Err(Error::WriteMismatch {
                operation: "SetLocation",
                expected: 9,
                actual: 8
            })
        ));
        assert_eq!(hc.channel().read_calls(), 0);
    }

    #[test]
    fn test_failed_get_location_keeps_cache_but_marks_stale() {
        let loc = sample_location();
        let mut mock = MockChannel::new();
        mock.expect(b"w", &[10, 20, 30, 0, 40, 50, 0, 1, b'#']);
        mock.expect(b"w", &[1, 1, 1, 1, 1, 1, 1, 1, b'X']);

        let mut hc = make_test_hc(mock);
        hc.get_location().unwrap();
        assert!(hc.get_location().is_err());
        assert_eq!(hc.cached_location(), Some(&loc));
        assert!(hc.is_location_stale());
    }

    #[test]
    fn test_set_location_does_not_touch_cache() {
        let loc = sample_location();
        let other = Location::new(
            Dms::new(1, 2, 3),
            NorthSouth::South,
            Dms::new(4, 5, 6),
            EastWest::East,
        );
        let mut mock = MockChannel::new();
        mock.expect(b"w", &[10, 20, 30, 0, 40, 50, 0, 1, b'#']);
        mock.expect(&[b'W', 1, 2, 3, 1, 4, 5, 6, 0], b"#");

        let mut hc = make_test_hc(mock);
        hc.get_location().unwrap();
        hc.set_location(&other).unwrap();
        assert_eq!(hc.cached_location(), Some(&loc));
        assert!(!hc.is_location_stale());
    }

    // -----------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------

    #[test]
    fn test_set_time() {
        let mut mock = MockChannel::new();
        mock.expect(&[b'H', 21, 45, 10, 10, 18, 26, 249, 1], b"#");

        let mut hc = make_test_hc(mock);
        hc.set_time(&sample_time()).unwrap();
        assert!(hc.cached_time().is_none());
    }

    #[test]
    fn test_get_time() {
        let mut mock = MockChannel::new();
        mock.expect(b"h", &[21, 45, 10, 10, 18, 26, 249, 1, b'#']);

        let mut hc = make_test_hc(mock);
        let t = hc.get_time().unwrap();
        assert_eq!(t, sample_time());
        assert_eq!(t.timezone, -7);
        assert_eq!(hc.cached_time(), Some(&t));
        assert!(!hc.is_time_stale());
    }

    #[test]
    fn test_get_time_bad_terminator_leaves_no_cache() {
        let mut mock = MockChannel::new();
        mock.expect(b"h", &[21, 45, 10, 10, 18, 26, 249, 1, 0]);

        let mut hc = make_test_hc(mock);
        assert!(matches!(hc.get_time(), Err(Error::Framing { .. })));
        assert!(hc.cached_time().is_none());
        assert!(hc.is_time_stale());
    }

    #[test]
    fn test_default_settle_delay() {
        let hc = HandControl::new(MockChannel::new());
        assert_eq!(hc.settle_delay(), Duration::from_secs(1));
    }
}
