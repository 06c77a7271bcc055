//! Static catalog of mount models and auxiliary devices.
//!
//! `GetModel` returns a numeric model code and `GetDeviceVersion` addresses
//! auxiliary devices by a numeric bus code. These tables map both to names.
//! Looking up a code that is not listed fails with
//! [`Error::UnknownCode`](nexstar_core::Error::UnknownCode); there is no
//! fallback name.

use nexstar_core::error::{CodeKind, Error, Result};

/// Azimuth / right-ascension motor controller.
pub const DEVICE_AZM_RA_MOTOR: u8 = 16;
/// Altitude / declination motor controller.
pub const DEVICE_ALT_DEC_MOTOR: u8 = 17;
/// GPS unit.
pub const DEVICE_GPS: u8 = 176;
/// Real-time clock (CGE mounts only).
pub const DEVICE_RTC: u8 = 178;

/// Mount model codes reported by `GetModel`.
pub const MODELS: &[(u8, &str)] = &[
    (1, "GPS Series"),
    (3, "i-Series"),
    (4, "i-Series SE"),
    (5, "CGE"),
    (6, "Advanced GT"),
    (7, "SLT"),
    (9, "CPC"),
    (10, "GT"),
    (11, "4/5 SE"),
    (12, "6/8 SE"),
    (13, "CGE Pro"),
    (14, "CGEM DX"),
];

/// Auxiliary devices that answer `GetDeviceVersion`, in survey order.
pub const KNOWN_DEVICES: &[(u8, &str)] = &[
    (DEVICE_AZM_RA_MOTOR, "AZM/RA Motor"),
    (DEVICE_ALT_DEC_MOTOR, "ALT/DEC Motor"),
    (DEVICE_GPS, "GPS Unit"),
    (DEVICE_RTC, "RTC (CGE only)"),
];

fn lookup(table: &'static [(u8, &'static str)], kind: CodeKind, code: u8) -> Result<&'static str> {
    table
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .ok_or(Error::UnknownCode { kind, code })
}

/// Resolve a mount model code to its name.
///
/// # Example
///
/// ```
/// use nexstar_hc::models::model_name;
///
/// assert_eq!(model_name(5).unwrap(), "CGE");
/// assert!(model_name(99).is_err());
/// ```
pub fn model_name(code: u8) -> Result<&'static str> {
    lookup(MODELS, CodeKind::Model, code)
}

/// Resolve an auxiliary device code to its name.
pub fn device_name(code: u8) -> Result<&'static str> {
    lookup(KNOWN_DEVICES, CodeKind::Device, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_lookup_known() {
        assert_eq!(model_name(1).unwrap(), "GPS Series");
        assert_eq!(model_name(5).unwrap(), "CGE");
        assert_eq!(model_name(12).unwrap(), "6/8 SE");
    }

    #[test]
    fn model_lookup_unknown() {
        for code in [0, 2, 8, 99, 255] {
            match model_name(code) {
                Err(Error::UnknownCode { kind, code: c }) => {
                    assert_eq!(kind, CodeKind::Model);
                    assert_eq!(c, code);
                }
                other => panic!("expected UnknownCode for {code}, got {other:?}"),
            }
        }
    }

    #[test]
    fn model_table_has_twelve_unique_codes() {
        assert_eq!(MODELS.len(), 12);
        let mut codes: Vec<u8> = MODELS.iter().map(|(c, _)| *c).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), MODELS.len());
    }

    #[test]
    fn device_lookup() {
        assert_eq!(device_name(DEVICE_AZM_RA_MOTOR).unwrap(), "AZM/RA Motor");
        assert_eq!(device_name(DEVICE_ALT_DEC_MOTOR).unwrap(), "ALT/DEC Motor");
        assert_eq!(device_name(DEVICE_GPS).unwrap(), "GPS Unit");
        assert_eq!(device_name(DEVICE_RTC).unwrap(), "RTC (CGE only)");
        assert!(matches!(
            device_name(5),
            Err(Error::UnknownCode {
                kind: CodeKind::Device,
                code: 5
            })
        ));
    }
}
