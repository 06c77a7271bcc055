//! NexStar hand-control command builders and reply parsers.
//!
//! Each `cmd_*` function returns a [`Command`] carrying the opcode, the
//! parameter bytes, and the reply shape the hand control answers with. Each
//! `parse_*` function turns the value bytes of a validated reply into a
//! typed result.
//!
//! All functions are pure -- they build or consume byte vectors without
//! performing any I/O.
//!
//! Parameters are `u8` (the timezone is `i8`), so every value is already
//! within the single-byte range of its wire field. The hand control does no
//! range checking of its own and none is added here: an hour of 99 is sent
//! as 99.

use nexstar_core::error::Result;
use nexstar_core::types::{DateTime, Location, Version};

use crate::fields;
use crate::protocol::{Command, ReplyShape};

// ---------------------------------------------------------------
// Opcodes
// ---------------------------------------------------------------

pub const OP_GET_VERSION: u8 = b'V';
pub const OP_GET_MODEL: u8 = b'm';
pub const OP_GET_DEVICE_VERSION: u8 = b'P';
pub const OP_ECHO: u8 = b'K';
/// Alignment status. The goto-status query shares this opcode.
pub const OP_ALIGNMENT: u8 = b'J';
pub const OP_CANCEL_GOTO: u8 = b'M';
pub const OP_GET_LOCATION: u8 = b'w';
pub const OP_SET_LOCATION: u8 = b'W';
pub const OP_GET_TIME: u8 = b'h';
pub const OP_SET_TIME: u8 = b'H';

/// Pass-through parameter block for a device version query. Byte 1 is
/// replaced by the device code.
pub const DEVICE_QUERY_PARAMS: [u8; 7] = [1, 0, 254, 0, 0, 0, 2];

// ---------------------------------------------------------------
// Command builders
// ---------------------------------------------------------------

/// Build a "get hand-control version" command (`V`).
pub fn cmd_get_version() -> Command {
    Command::new("GetVersion", OP_GET_VERSION, &[], ReplyShape::Fields(2))
}

/// Build a "get mount model code" command (`m`).
pub fn cmd_get_model() -> Command {
    Command::new("GetModel", OP_GET_MODEL, &[], ReplyShape::Fields(1))
}

/// Build a "get device version" command (`P 1 dev 254 0 0 0 2`).
pub fn cmd_get_device_version(device: u8) -> Command {
    let mut params = DEVICE_QUERY_PARAMS;
    params[1] = device;
    Command::new(
        "GetDeviceVersion",
        OP_GET_DEVICE_VERSION,
        &params,
        ReplyShape::DeviceQuery,
    )
}

/// Build an echo command (`K` + byte).
pub fn cmd_echo(byte: u8) -> Command {
    Command::new("Echo", OP_ECHO, &[byte], ReplyShape::Echo(byte))
}

/// Build an "is alignment complete" command (`J`).
pub fn cmd_get_alignment_status() -> Command {
    Command::new("IsAlignmentComplete", OP_ALIGNMENT, &[], ReplyShape::Fields(1))
}

/// Build an "is goto in progress" command (`J`).
pub fn cmd_get_goto_status() -> Command {
    Command::new("IsGotoInProgress", OP_ALIGNMENT, &[], ReplyShape::Fields(1))
}

/// Build a "cancel goto" command (`M`).
pub fn cmd_cancel_goto() -> Command {
    Command::new("CancelGoto", OP_CANCEL_GOTO, &[], ReplyShape::Ack)
}

/// Build a "get site location" command (`w`).
pub fn cmd_get_location() -> Command {
    Command::new(
        "GetLocation",
        OP_GET_LOCATION,
        &[],
        ReplyShape::Fields(fields::LOCATION_LEN),
    )
}

/// Build a "set site location" command (`W` + 8 bytes).
pub fn cmd_set_location(location: &Location) -> Command {
    Command::new(
        "SetLocation",
        OP_SET_LOCATION,
        &fields::encode_location(location),
        ReplyShape::Ack,
    )
}

/// Build a "get date/time" command (`h`).
pub fn cmd_get_time() -> Command {
    Command::new(
        "GetTime",
        OP_GET_TIME,
        &[],
        ReplyShape::Fields(fields::DATE_TIME_LEN),
    )
}

/// Build a "set date/time" command (`H` + 8 bytes).
///
/// The timezone byte is sent in 256's-complement.
pub fn cmd_set_time(time: &DateTime) -> Command {
    Command::new(
        "SetTime",
        OP_SET_TIME,
        &fields::encode_date_time(time),
        ReplyShape::Ack,
    )
}

// ---------------------------------------------------------------
// Reply parsers
// ---------------------------------------------------------------

/// Parse a `GetVersion` reply: `[major, minor]`.
pub fn parse_version(data: &[u8]) -> Result<Version> {
    let [major, minor]: [u8; 2] = fields::decode_fields("version", data)?;
    Ok(Version::new(major, minor))
}

/// Parse a `GetModel` reply: `[code]`.
pub fn parse_model_code(data: &[u8]) -> Result<u8> {
    let [code]: [u8; 1] = fields::decode_fields("model", data)?;
    Ok(code)
}

/// Parse an alignment-status reply. Any nonzero byte means aligned.
pub fn parse_alignment(data: &[u8]) -> Result<bool> {
    let [flag]: [u8; 1] = fields::decode_fields("alignment", data)?;
    Ok(flag != 0)
}

/// Parse a goto-status reply.
///
/// Only the ASCII digit `'1'` means in progress. A binary 1 on the shared
/// opcode is the alignment flag, not a goto.
pub fn parse_goto_status(data: &[u8]) -> Result<bool> {
    let [flag]: [u8; 1] = fields::decode_fields("goto status", data)?;
    Ok(flag == b'1')
}

/// Parse a `GetLocation` reply.
pub fn parse_location(data: &[u8]) -> Result<Location> {
    fields::decode_location(data)
}

/// Parse a `GetTime` reply.
pub fn parse_time(data: &[u8]) -> Result<DateTime> {
    fields::decode_date_time(data)
}
