//! Value types decoded from, and encoded into, hand-control frames.
//!
//! Every field is carried on the wire as a single unsigned byte, so the
//! numeric fields here are `u8`. The one signed field, the timezone offset,
//! is an `i8` and travels in 256's-complement form (see
//! `nexstar_hc::fields`).

use std::fmt;

use crate::error::{Error, Result};

/// Firmware version reported by the hand control or an attached device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    pub fn new(major: u8, minor: u8) -> Self {
        Version { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Result of a device-presence query.
///
/// An absent device is a normal outcome, not an error: the hand control
/// answers the query either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceVersion {
    /// The device answered with its firmware version.
    Present(Version),
    /// Nothing answered on the device's bus address.
    Absent,
}

impl DeviceVersion {
    /// The version, if the device is present.
    pub fn version(&self) -> Option<Version> {
        match self {
            DeviceVersion::Present(v) => Some(*v),
            DeviceVersion::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, DeviceVersion::Present(_))
    }
}

impl fmt::Display for DeviceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceVersion::Present(v) => write!(f, "{v}"),
            DeviceVersion::Absent => write!(f, "None"),
        }
    }
}

/// Latitude hemisphere. Wire flag: 0 = north, 1 = south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NorthSouth {
    #[default]
    North,
    South,
}

impl NorthSouth {
    /// Decode the wire flag. Any nonzero byte means south.
    pub fn from_flag(flag: u8) -> Self {
        if flag == 0 {
            NorthSouth::North
        } else {
            NorthSouth::South
        }
    }

    pub fn flag(&self) -> u8 {
        match self {
            NorthSouth::North => 0,
            NorthSouth::South => 1,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            NorthSouth::North => 'N',
            NorthSouth::South => 'S',
        }
    }
}

impl TryFrom<char> for NorthSouth {
    type Error = Error;

    fn try_from(c: char) -> Result<Self> {
        match c.to_ascii_uppercase() {
            'N' => Ok(NorthSouth::North),
            'S' => Ok(NorthSouth::South),
            other => Err(Error::InvalidParameter(format!(
                "latitude hemisphere must be N or S, got {other:?}"
            ))),
        }
    }
}

/// Longitude hemisphere. Wire flag: 0 = east, 1 = west.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EastWest {
    #[default]
    East,
    West,
}

impl EastWest {
    /// Decode the wire flag. Any nonzero byte means west.
    pub fn from_flag(flag: u8) -> Self {
        if flag == 0 {
            EastWest::East
        } else {
            EastWest::West
        }
    }

    pub fn flag(&self) -> u8 {
        match self {
            EastWest::East => 0,
            EastWest::West => 1,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            EastWest::East => 'E',
            EastWest::West => 'W',
        }
    }
}

impl TryFrom<char> for EastWest {
    type Error = Error;

    fn try_from(c: char) -> Result<Self> {
        match c.to_ascii_uppercase() {
            'E' => Ok(EastWest::East),
            'W' => Ok(EastWest::West),
            other => Err(Error::InvalidParameter(format!(
                "longitude hemisphere must be E or W, got {other:?}"
            ))),
        }
    }
}

/// One axis of a geographic position in degrees, minutes, and seconds.
///
/// Each component is an unsigned byte count; no range checking is applied,
/// the hand control receives whatever the caller supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dms {
    pub degrees: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Dms {
    pub fn new(degrees: u8, minutes: u8, seconds: u8) -> Self {
        Dms {
            degrees,
            minutes,
            seconds,
        }
    }
}

/// Observing site location as stored in the hand control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub latitude: Dms,
    pub north_south: NorthSouth,
    pub longitude: Dms,
    pub east_west: EastWest,
}

impl Location {
    pub fn new(latitude: Dms, north_south: NorthSouth, longitude: Dms, east_west: EastWest) -> Self {
        Location {
            latitude,
            north_south,
            longitude,
            east_west,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat = &self.latitude;
        let lon = &self.longitude;
        write!(
            f,
            "Latitude:  {} {}' {}\" {}   Longitude: {} {}' {}\" {}",
            lat.degrees,
            lat.minutes,
            lat.seconds,
            self.north_south.letter(),
            lon.degrees,
            lon.minutes,
            lon.seconds,
            self.east_west.letter(),
        )
    }
}

/// Date and time as stored in the hand control.
///
/// `year` is the year within the century (the hand control assumes 20xx).
/// `timezone` is the offset from GMT in whole hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub month: u8,
    pub day: u8,
    pub year: u8,
    pub timezone: i8,
    pub daylight_saving: bool,
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time: {}:{}:{}  Date: {:02}/{:02}/{:02}  TZ={} {}",
            self.hour,
            self.minute,
            self.second,
            self.month,
            self.day,
            self.year,
            self.timezone,
            if self.daylight_saving {
                "Daylight Saving"
            } else {
                "Standard"
            },
        )
    }
}
