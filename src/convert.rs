//! Decoding of raw values returned across the vJoy boundary.

use core::slice;

use tracing::trace;

use crate::constants::VJD_MAXBTN;
use crate::error::{ButtonCountError, ConvertError, OwnerPidError};
use crate::types::{INT, PVOID, SHORT, WORD};

/// Decodes a vJoy version number.
///
/// vJoy reports versions as binary-coded decimal: `0x0219` is version 219.
/// `GetvJoyVersion` returns a `SHORT`; its bits are read as a `WORD`. A
/// zero version means the driver is absent or disabled.
pub fn decode_version(raw: SHORT) -> Result<u16, ConvertError> {
    let raw = raw as WORD;
    if raw == 0 {
        return Err(ConvertError::MissingVersion);
    }

    let mut value = 0;
    for shift in [12, 8, 4, 0] {
        let digit = (raw >> shift) & 0xF;
        if digit > 9 {
            return Err(ConvertError::InvalidBcd(raw));
        }
        value = value * 10 + digit;
    }
    Ok(value)
}

/// Copies a NUL-terminated UTF-16 string, as returned by the product,
/// manufacturer and serial number getters. Unpaired surrogates are replaced
/// with U+FFFD.
///
/// Returns `None` for a null pointer.
///
/// # Safety
///
/// `ptr` must be null or point to a readable, `u16`-aligned buffer that
/// contains a NUL terminator.
pub unsafe fn wide_cstr_to_string(ptr: PVOID) -> Option<String> {
    if ptr.is_null() {
        return None;
    }

    let ptr = ptr as *const u16;
    let mut len = 0;
    // SAFETY: the caller guarantees a terminator within the buffer.
    while unsafe { *ptr.add(len) } != 0 {
        len += 1;
    }

    // SAFETY: the `len` units before the terminator were just read.
    let units = unsafe { slice::from_raw_parts(ptr, len) };
    Some(String::from_utf16_lossy(units))
}

/// Interprets the result of `GetOwnerPid`.
pub fn decode_owner_pid(raw: INT) -> Result<u32, OwnerPidError> {
    match raw {
        pid if pid > 0 => Ok(pid as u32),
        -11 => Err(OwnerPidError::BadDevStat),
        -12 => Err(OwnerPidError::NoDevExist),
        -13 => Err(OwnerPidError::NoFileExist),
        other => {
            trace!(raw = other, "unknown GetOwnerPid result");
            Err(OwnerPidError::Unknown(other))
        }
    }
}

/// Interprets the result of `GetVJDButtonNumber`.
pub fn decode_button_count(raw: INT) -> Result<u8, ButtonCountError> {
    match raw {
        n if n >= 0 && (n as u32) <= VJD_MAXBTN => Ok(n as u8),
        n if n > 0 => Err(ButtonCountError::OutOfRange(n)),
        -1 => Err(ButtonCountError::NoHandleByIndex),
        -2 => Err(ButtonCountError::BadPreparsedData),
        -3 => Err(ButtonCountError::NoCaps),
        -4 => Err(ButtonCountError::BadNBtnCaps),
        -6 => Err(ButtonCountError::BadBtnCaps),
        -7 => Err(ButtonCountError::BadBtnRange),
        other => {
            trace!(raw = other, "unknown GetVJDButtonNumber result");
            Err(ButtonCountError::Unknown(other))
        }
    }
}

/// Interprets the result of `GetVJDDiscPovNumber` / `GetVJDContPovNumber`.
pub fn decode_pov_count(raw: INT) -> Result<u8, ConvertError> {
    if (0..=4).contains(&raw) {
        Ok(raw as u8)
    } else {
        Err(ConvertError::PovCountOutOfRange(raw))
    }
}

/// Conversions to the 4-byte windows.h `BOOL` and to `HANDLE` as modelled
/// by the windows crate.
#[cfg(windows)]
mod windows_interop {
    use windows::Win32::Foundation::{BOOL as WinBool, HANDLE as WinHandle};

    use crate::types::{Bool, Handle, PVOID};

    impl From<WinBool> for Bool {
        fn from(value: WinBool) -> Self {
            Bool::new(value.0 != 0)
        }
    }

    impl From<Bool> for WinBool {
        fn from(value: Bool) -> Self {
            WinBool(i32::from(value.as_bool()))
        }
    }

    impl From<WinHandle> for Handle {
        fn from(value: WinHandle) -> Self {
            Handle::from_raw(value.0 as PVOID)
        }
    }

    impl From<Handle> for WinHandle {
        fn from(value: Handle) -> Self {
            WinHandle(value.as_raw() as isize)
        }
    }

}
