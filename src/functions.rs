//! Declarations of the vJoyInterface exports and of its callback types.
//!
//! Exports are `__cdecl` in the headers and are declared `extern "C"`.
//! Callbacks are `CALLBACK` (`__stdcall`), which is `extern "system"`.
//!
//! Every export is described once in the table below. From it the crate
//! generates a function-pointer type in [`pfn`], an entry in [`EXPORTS`]
//! and, with the `link` feature, a linked `extern "C"` declaration.

#![allow(non_snake_case)]

use core::fmt;

use serde::Serialize;

use crate::constants::{FFBEType, FFBPType, VjdStat, FFB_CTRL};
use crate::structs::{
    FFB_DATA, FFB_EFF_COND, FFB_EFF_CONSTANT, FFB_EFF_ENVLP, FFB_EFF_OP, FFB_EFF_PERIOD,
    FFB_EFF_RAMP, FFB_EFF_REPORT, JOYSTICK_POSITION_V2,
};
use crate::types::{BOOL, BYTE, DWORD, INT, LONG, PVOID, SHORT, UCHAR, UINT, WORD};

/// Called on device arrival/removal: `(removed, first, data)`.
pub type RemovalCB = Option<unsafe extern "system" fn(BOOL, BOOL, PVOID)>;

/// Called for every FFB packet: `(packet, data)`; `packet` points to an
/// [`FFB_DATA`].
pub type FfbGenCB = Option<unsafe extern "system" fn(PVOID, PVOID)>;

/// One parameter of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Arg {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub ty: &'static str,
}

/// Name and Rust signature of one export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Export {
    pub name: &'static str,
    pub group: &'static str,
    pub args: &'static [Arg],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ret: Option<&'static str>,
}

impl Export {
    /// The declaration as a single line, e.g. `fn AcquireVJD(rID: UINT) -> BOOL`.
    pub fn signature(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn {}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", arg.name, arg.ty)?;
        }
        f.write_str(")")?;
        if let Some(ret) = self.ret {
            write!(f, " -> {ret}")?;
        }
        Ok(())
    }
}

macro_rules! vjoy_api {
    ($(
        $group:literal {
            $($(#[$meta:meta])* fn $name:ident($($arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)?;)*
        }
    )*) => {
        /// Function-pointer types of the exports, for symbols resolved at
        /// run time.
        #[allow(non_camel_case_types)]
        pub mod pfn {
            use super::*;

            $($(
                $(#[$meta])*
                pub type $name = unsafe extern "C" fn($($arg: $ty),*) $(-> $ret)?;
            )*)*
        }

        /// Every vJoyInterface export, in header order.
        pub static EXPORTS: &[Export] = &[$($(
            Export {
                name: stringify!($name),
                group: $group,
                args: &[$(Arg { name: stringify!($arg), ty: stringify!($ty) }),*],
                ret: vjoy_api!(@ret $($ret)?),
            },
        )*)*];

        #[cfg(feature = "link")]
        #[link(name = "vJoyInterface")]
        extern "C" {
            $($(
                $(#[$meta])*
                pub fn $name($($arg: $ty),*) $(-> $ret)?;
            )*)*
        }
    };
    (@ret) => { None };
    (@ret $ret:ty) => { Some(stringify!($ret)) };
}

vjoy_api! {
    "general" {
        /// Must be called before the string getters.
        fn vJoyEnabled() -> BOOL;
        /// BCD encoded, see [`crate::convert::decode_version`].
        fn GetvJoyVersion() -> SHORT;
        /// NUL-terminated UTF-16, see [`crate::convert::wide_cstr_to_string`].
        fn GetvJoyProductString() -> PVOID;
        fn GetvJoyManufacturerString() -> PVOID;
        fn GetvJoySerialNumberString() -> PVOID;
        fn DriverMatch(DllVer: *mut WORD, DrvVer: *mut WORD) -> BOOL;
        fn RegisterRemovalCB(cb: RemovalCB, data: PVOID);
        fn vJoyFfbCap(Supported: *mut BOOL) -> BOOL;
        fn GetvJoyMaxDevices(n: *mut INT) -> BOOL;
        fn GetNumberExistingVJD(n: *mut INT) -> BOOL;
    }
    "device" {
        fn GetVJDButtonNumber(rID: UINT) -> INT;
        fn GetVJDDiscPovNumber(rID: UINT) -> INT;
        fn GetVJDContPovNumber(rID: UINT) -> INT;
        /// `Axis` is one of the `HID_USAGE_*` axis usages.
        fn GetVJDAxisExist(rID: UINT, Axis: UINT) -> BOOL;
        fn GetVJDAxisMax(rID: UINT, Axis: UINT, Max: *mut LONG) -> BOOL;
        fn GetVJDAxisMin(rID: UINT, Axis: UINT, Min: *mut LONG) -> BOOL;
        fn GetVJDStatus(rID: UINT) -> VjdStat;
        fn isVJDExists(rID: UINT) -> BOOL;
        fn GetOwnerPid(rID: UINT) -> INT;
    }
    "ownership" {
        fn AcquireVJD(rID: UINT) -> BOOL;
        fn RelinquishVJD(rID: UINT);
        fn UpdateVJD(rID: UINT, pData: *mut JOYSTICK_POSITION_V2) -> BOOL;
    }
    "reset" {
        fn ResetVJD(rID: UINT) -> BOOL;
        fn ResetAll();
        fn ResetButtons(rID: UINT) -> BOOL;
        fn ResetPovs(rID: UINT) -> BOOL;
    }
    "feeding" {
        fn SetAxis(Value: LONG, rID: UINT, Axis: UINT) -> BOOL;
        fn SetBtn(Value: BOOL, rID: UINT, nBtn: UCHAR) -> BOOL;
        /// `Value` is -1 (neutral) or 0..=3.
        fn SetDiscPov(Value: INT, rID: UINT, nPov: UCHAR) -> BOOL;
        fn SetContPov(Value: DWORD, rID: UINT, nPov: UCHAR) -> BOOL;
    }
    "ffb" {
        fn FfbRegisterGenCB(cb: FfbGenCB, data: PVOID);
        fn FfbStart(rID: UINT) -> BOOL;
        fn FfbStop(rID: UINT);
        fn IsDeviceFfb(rID: UINT) -> BOOL;
        fn IsDeviceFfbEffect(rID: UINT, Effect: UINT) -> BOOL;
        fn FfbGetEffect() -> FFBEType;
        fn Ffb_h_DeviceID(Packet: *const FFB_DATA, DeviceID: *mut INT) -> DWORD;
        fn Ffb_h_Type(Packet: *const FFB_DATA, Type: *mut FFBPType) -> DWORD;
        fn Ffb_h_Packet(
            Packet: *const FFB_DATA,
            Type: *mut WORD,
            DataSize: *mut INT,
            Data: *mut *mut BYTE,
        ) -> DWORD;
        fn Ffb_h_EBI(Packet: *const FFB_DATA, Index: *mut INT) -> DWORD;
        fn Ffb_h_Eff_Report(Packet: *const FFB_DATA, Effect: *mut FFB_EFF_REPORT) -> DWORD;
        fn Ffb_h_Eff_Ramp(Packet: *const FFB_DATA, RampEffect: *mut FFB_EFF_RAMP) -> DWORD;
        fn Ffb_h_EffOp(Packet: *const FFB_DATA, Operation: *mut FFB_EFF_OP) -> DWORD;
        fn Ffb_h_DevCtrl(Packet: *const FFB_DATA, Control: *mut FFB_CTRL) -> DWORD;
        fn Ffb_h_Eff_Period(Packet: *const FFB_DATA, Effect: *mut FFB_EFF_PERIOD) -> DWORD;
        fn Ffb_h_Eff_Cond(Packet: *const FFB_DATA, Condition: *mut FFB_EFF_COND) -> DWORD;
        fn Ffb_h_DevGain(Packet: *const FFB_DATA, Gain: *mut BYTE) -> DWORD;
        fn Ffb_h_Eff_Envlp(Packet: *const FFB_DATA, Envelope: *mut FFB_EFF_ENVLP) -> DWORD;
        fn Ffb_h_EffNew(Packet: *const FFB_DATA, Effect: *mut FFBEType) -> DWORD;
        fn Ffb_h_Eff_Constant(
            Packet: *const FFB_DATA,
            ConstantEffect: *mut FFB_EFF_CONSTANT,
        ) -> DWORD;
    }
}

/// Looks up an export by its exact symbol name.
pub fn export(name: &str) -> Option<&'static Export> {
    EXPORTS.iter().find(|e| e.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::mem::size_of;
    use pretty_assertions::assert_eq;

    #[test]
    fn callbacks_are_nullable_pointers() {
        assert_eq!(size_of::<RemovalCB>(), size_of::<usize>());
        assert_eq!(size_of::<FfbGenCB>(), size_of::<usize>());
        assert_eq!(size_of::<pfn::AcquireVJD>(), size_of::<usize>());
    }

    #[test]
    fn removal_callback_receives_arguments() {
        unsafe extern "system" fn on_removal(removed: BOOL, first: BOOL, data: PVOID) {
            // SAFETY: the test passes a live `Cell<u32>`.
            let seen = unsafe { &*(data as *const Cell<u32>) };
            seen.set(u32::from(removed.as_bool()) << 1 | u32::from(first.as_bool()));
        }

        let seen = Cell::new(0u32);
        let cb: RemovalCB = Some(on_removal);
        let data = &seen as *const Cell<u32> as PVOID;

        // SAFETY: `data` points to `seen`, which outlives the call.
        unsafe { cb.unwrap()(BOOL::TRUE, BOOL::FALSE, data) };
        assert_eq!(seen.get(), 0b10);
    }

    #[test]
    fn exports_are_unique_and_grouped() {
        let mut names: Vec<_> = EXPORTS.iter().map(|e| e.name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();

        assert_eq!(names.len(), total);
        assert_eq!(total, 50);
        assert_eq!(export("UpdateVJD").unwrap().group, "ownership");
        assert!(export("vJoyEnabled").unwrap().signature().ends_with("-> BOOL"));
        assert_eq!(export("ResetAll").unwrap().signature(), "fn ResetAll()");
        assert!(export("CreateProcessA").is_none());
    }

    #[test]
    fn signatures_render_on_one_line() {
        assert_eq!(
            export("Ffb_h_Packet").unwrap().signature(),
            "fn Ffb_h_Packet(Packet: *const FFB_DATA, Type: *mut WORD, \
             DataSize: *mut INT, Data: *mut *mut BYTE) -> DWORD"
        );
        assert_eq!(
            export("SetBtn").unwrap().signature(),
            "fn SetBtn(Value: BOOL, rID: UINT, nBtn: UCHAR) -> BOOL"
        );
        for entry in EXPORTS {
            let signature = entry.signature();
            assert!(!signature.contains('\n'), "{signature}");
            assert!(!signature.contains(" :"), "{signature}");
        }
    }
}
