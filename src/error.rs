//! Error types for the type map and for decoding values returned by vJoy.

use serde::Serialize;
use thiserror::Error;

use crate::abi::Signedness;

/// Errors produced while checking or rendering the primitive type map.
#[derive(Error, Debug)]
pub enum AbiError {
    /// One or more aliases do not have the declared width or signedness on
    /// this target.
    #[error("{} primitive(s) differ from the declared ABI: {}", .0.len(), join(.0))]
    Mismatch(Vec<Mismatch>),

    /// No primitive with this foreign name exists in the map.
    #[error("unknown primitive: {0}")]
    UnknownPrimitive(String),

    /// The contract digest differs from the one pinned by the caller.
    #[error("fingerprint mismatch: expected {expected}, got {actual}")]
    FingerprintMismatch { expected: String, actual: String },

    /// JSON rendering failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Text rendering failed.
    #[error("formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// A single row of the map that does not hold on the current target.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Mismatch {
    #[error("{name}: declared {expected} byte(s), {rust_type} is {actual}")]
    Width {
        name: &'static str,
        rust_type: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{name}: declared {expected}, {rust_type} is {actual}")]
    Signedness {
        name: &'static str,
        rust_type: &'static str,
        expected: Signedness,
        actual: Signedness,
    },
}

fn join(mismatches: &[Mismatch]) -> String {
    mismatches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors from decoding or editing values that cross the driver boundary.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConvertError {
    #[error("driver reported no version")]
    MissingVersion,

    #[error("version {0:#06x} is not binary-coded decimal")]
    InvalidBcd(u16),

    #[error("button {0} is outside 1..=128")]
    ButtonOutOfRange(u8),

    #[error("POV {0} is outside 1..=4")]
    PovOutOfRange(u8),

    #[error("POV value {0} is neither neutral nor within 0..=35999")]
    PovValueOutOfRange(u32),

    #[error("POV count {0} is outside 0..=4")]
    PovCountOutOfRange(i32),
}

/// Negative results of `GetOwnerPid`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerPidError {
    /// Usually a free device (no owner).
    #[error("no owner file exists for the device")]
    NoFileExist,

    /// Usually a missing device.
    #[error("device does not exist")]
    NoDevExist,

    #[error("device status is inconsistent")]
    BadDevStat,

    #[error("unknown owner PID result {0}")]
    Unknown(i32),
}

/// Negative results of `GetVJDButtonNumber`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonCountError {
    #[error("no HID handle for the device index")]
    NoHandleByIndex,

    #[error("failed to read the device's preparsed data")]
    BadPreparsedData,

    #[error("failed to read the device's capabilities")]
    NoCaps,

    #[error("failed to read the number of button capabilities")]
    BadNBtnCaps,

    #[error("failed to read the button capabilities")]
    BadBtnCaps,

    #[error("failed to read the button range")]
    BadBtnRange,

    #[error("button count {0} is above 128")]
    OutOfRange(i32),

    #[error("unknown button count result {0}")]
    Unknown(i32),
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = AbiError> = std::result::Result<T, E>;
