//! Field codec: raw reply bytes to and from typed values.
//!
//! Every field on the wire is one unsigned byte. The composite records
//! (site location, date/time) are fixed sequences of eight such bytes, in
//! the order the hand control uses for both the get and the set direction.
//!
//! The timezone offset is the only signed field. It travels in
//! 256's-complement: a negative offset `z` is sent as `256 + z`, and a
//! received byte of 128 or more decodes to `byte - 256`.

use nexstar_core::error::{Error, Result};
use nexstar_core::types::{DateTime, Dms, EastWest, Location, NorthSouth};

/// Number of bytes in an encoded [`Location`].
pub const LOCATION_LEN: usize = 8;

/// Number of bytes in an encoded [`DateTime`].
pub const DATE_TIME_LEN: usize = 8;

/// Interpret a raw reply byte as an unsigned integer.
pub fn byte_to_int(byte: u8) -> u8 {
    byte
}

/// Split the value bytes of a multi-field reply into exactly `N` integer
/// fields, one byte each.
pub fn decode_fields<const N: usize>(what: &str, bytes: &[u8]) -> Result<[u8; N]> {
    if bytes.len() != N {
        return Err(Error::InvalidParameter(format!(
            "{what} needs {N} bytes, got {}",
            bytes.len()
        )));
    }
    let mut fields = [0u8; N];
    for (field, &byte) in fields.iter_mut().zip(bytes) {
        *field = byte_to_int(byte);
    }
    Ok(fields)
}

/// Encode a timezone offset as its on-wire byte.
pub fn encode_timezone(tz: i8) -> u8 {
    let tz = i16::from(tz);
    let wire = if tz >= 0 { tz } else { 256 + tz };
    wire as u8
}

/// Decode an on-wire timezone byte into a signed offset.
pub fn decode_timezone(byte: u8) -> i8 {
    let b = i16::from(byte);
    let tz = if b < 128 { b } else { b - 256 };
    tz as i8
}

/// Encode a location as
/// `[lat_deg, lat_min, lat_sec, N/S, lon_deg, lon_min, lon_sec, E/W]`.
pub fn encode_location(location: &Location) -> [u8; LOCATION_LEN] {
    let lat = &location.latitude;
    let lon = &location.longitude;
    [
        lat.degrees,
        lat.minutes,
        lat.seconds,
        location.north_south.flag(),
        lon.degrees,
        lon.minutes,
        lon.seconds,
        location.east_west.flag(),
    ]
}

/// Decode the eight location bytes of a `GetLocation` reply.
pub fn decode_location(bytes: &[u8]) -> Result<Location> {
    let b: [u8; LOCATION_LEN] = decode_fields("location", bytes)?;
    Ok(Location {
        latitude: Dms::new(b[0], b[1], b[2]),
        north_south: NorthSouth::from_flag(b[3]),
        longitude: Dms::new(b[4], b[5], b[6]),
        east_west: EastWest::from_flag(b[7]),
    })
}

/// Encode a date/time as
/// `[hour, minute, second, month, day, year, tz, dst]`.
pub fn encode_date_time(t: &DateTime) -> [u8; DATE_TIME_LEN] {
    [
        t.hour,
        t.minute,
        t.second,
        t.month,
        t.day,
        t.year,
        encode_timezone(t.timezone),
        u8::from(t.daylight_saving),
    ]
}

/// Decode the eight date/time bytes of a `GetTime` reply.
pub fn decode_date_time(bytes: &[u8]) -> Result<DateTime> {
    let b: [u8; DATE_TIME_LEN] = decode_fields("date/time", bytes)?;
    Ok(DateTime {
        hour: b[0],
        minute: b[1],
        second: b[2],
        month: b[3],
        day: b[4],
        year: b[5],
        timezone: decode_timezone(b[6]),
        daylight_saving: b[7] != 0,
    })
}
