//! Constants and C enums from the vJoy public headers.
//!
//! C enums are newtypes over their integer representation rather than Rust
//! enums: the driver may hand back values this crate does not know about.

#![allow(non_camel_case_types)]

use core::fmt;

use crate::types::{DWORD, INT, LONG, UINT};

/// Highest device id; ids are 1-based.
pub const VJD_MAXDEV: UINT = 16;
pub const VJD_MAXBTN: UINT = 128;
pub const VJD_MAXPOV: UINT = 4;

// HID usages of the axes, as passed to `SetAxis` / `GetVJDAxisExist`.
pub const HID_USAGE_X: UINT = 0x30;
pub const HID_USAGE_Y: UINT = 0x31;
pub const HID_USAGE_Z: UINT = 0x32;
pub const HID_USAGE_RX: UINT = 0x33;
pub const HID_USAGE_RY: UINT = 0x34;
pub const HID_USAGE_RZ: UINT = 0x35;
pub const HID_USAGE_SL0: UINT = 0x36;
pub const HID_USAGE_SL1: UINT = 0x37;
pub const HID_USAGE_WHL: UINT = 0x38;
pub const HID_USAGE_POV: UINT = 0x39;

pub const AXIS_MIN: LONG = 0x1;
pub const AXIS_MAX: LONG = 0x8000;

/// Continuous POV values are hundredths of a degree.
pub const CONT_POV_MIN: DWORD = 0;
pub const CONT_POV_MAX: DWORD = 35999;
pub const POV_NEUTRAL: INT = -1;
/// [`POV_NEUTRAL`] as stored in a `DWORD` hat field.
pub const POV_NEUTRAL_RAW: DWORD = POV_NEUTRAL as DWORD;

// FFB effect usages.
pub const HID_USAGE_CONST: UINT = 0x26;
pub const HID_USAGE_RAMP: UINT = 0x27;
pub const HID_USAGE_SQUR: UINT = 0x30;
pub const HID_USAGE_SINE: UINT = 0x31;
pub const HID_USAGE_TRNG: UINT = 0x32;
pub const HID_USAGE_STUP: UINT = 0x33;
pub const HID_USAGE_STDN: UINT = 0x34;
pub const HID_USAGE_SPRNG: UINT = 0x40;
pub const HID_USAGE_DMPR: UINT = 0x41;
pub const HID_USAGE_INRT: UINT = 0x42;
pub const HID_USAGE_FRIC: UINT = 0x43;

// FFB report ids. Output reports and feature reports share numbers.
pub const HID_ID_STATE: UINT = 0x02;
pub const HID_ID_EFFREP: UINT = 0x01;
pub const HID_ID_ENVREP: UINT = 0x02;
pub const HID_ID_CONDREP: UINT = 0x03;
pub const HID_ID_PRIDREP: UINT = 0x04;
pub const HID_ID_CONSTREP: UINT = 0x05;
pub const HID_ID_RAMPREP: UINT = 0x06;
pub const HID_ID_CSTMREP: UINT = 0x07;
pub const HID_ID_SMPLREP: UINT = 0x08;
pub const HID_ID_EFOPREP: UINT = 0x0A;
pub const HID_ID_BLKFRREP: UINT = 0x0B;
pub const HID_ID_CTRLREP: UINT = 0x0C;
pub const HID_ID_GAINREP: UINT = 0x0D;
pub const HID_ID_SETCREP: UINT = 0x0E;
pub const HID_ID_NEWEFREP: UINT = 0x01;
pub const HID_ID_BLKLDREP: UINT = 0x02;
pub const HID_ID_POOLREP: UINT = 0x03;

// Driver IOCTL function codes.
pub const F_LOAD_POSITIONS: UINT = 0x910;
pub const F_GETATTRIB: UINT = 0x911;
pub const F_GET_FFB_DATA: UINT = 0x912;
pub const F_SET_FFB_STAT: UINT = 0x913;
pub const F_GET_FFB_STAT: UINT = 0x916;
pub const F_GET_DEV_INFO: UINT = 0x917;
pub const F_IS_DRV_FFB_CAP: UINT = 0x918;
pub const F_IS_DRV_FFB_EN: UINT = 0x919;
pub const F_GET_DRV_DEV_MAX: UINT = 0x91A;
pub const F_GET_DRV_DEV_EN: UINT = 0x91B;
pub const F_IS_DEV_FFB_START: UINT = 0x91C;
pub const F_GET_DEV_STAT: UINT = 0x91D;
pub const F_GET_DRV_INFO: UINT = 0x91E;
pub const F_RESET_DEV: UINT = 0x91F;
pub const F_GET_POSITIONS: UINT = 0x920;

macro_rules! c_enum {
    ($(#[$meta:meta])* $name:ident($repr:ty) { $($variant:ident = $value:expr,)* }) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name(pub $repr);

        impl $name {
            $(pub const $variant: $name = $name($value);)*

            /// Name of the value, or `None` if the headers do not define it.
            pub fn name(self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => Some(stringify!($variant)),)*
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.name() {
                    Some(name) => f.write_str(name),
                    None => write!(f, "{}({})", stringify!($name), self.0),
                }
            }
        }
    };
}

c_enum! {
    /// Device status returned by `GetVJDStatus`.
    VjdStat(INT) {
        OWN = 0,
        FREE = 1,
        BUSY = 2,
        MISS = 3,
        UNKN = 4,
    }
}

c_enum! {
    /// Effect type.
    FFBEType(UINT) {
        ET_NONE = 0,
        ET_CONST = 1,
        ET_RAMP = 2,
        ET_SQR = 3,
        ET_SINE = 4,
        ET_TRNGL = 5,
        ET_STUP = 6,
        ET_STDN = 7,
        ET_SPRNG = 8,
        ET_DMPR = 9,
        ET_INRT = 10,
        ET_FRCTN = 11,
        ET_CSTM = 12,
    }
}

c_enum! {
    /// FFB packet type.
    FFBPType(UINT) {
        PT_EFFREP = HID_ID_EFFREP,
        PT_ENVREP = HID_ID_ENVREP,
        PT_CONDREP = HID_ID_CONDREP,
        PT_PRIDREP = HID_ID_PRIDREP,
        PT_CONSTREP = HID_ID_CONSTREP,
        PT_RAMPREP = HID_ID_RAMPREP,
        PT_CSTMREP = HID_ID_CSTMREP,
        PT_SMPLREP = HID_ID_SMPLREP,
        PT_EFOPREP = HID_ID_EFOPREP,
        PT_BLKFRREP = HID_ID_BLKFRREP,
        PT_CTRLREP = HID_ID_CTRLREP,
        PT_GAINREP = HID_ID_GAINREP,
        PT_SETCREP = HID_ID_SETCREP,
        PT_NEWEFREP = HID_ID_NEWEFREP + 0x10,
        PT_BLKLDREP = HID_ID_BLKLDREP + 0x10,
        PT_POOLREP = HID_ID_POOLREP + 0x10,
    }
}

c_enum! {
    /// Effect operation.
    FFBOP(UINT) {
        EFF_START = 1,
        EFF_SOLO = 2,
        EFF_STOP = 3,
    }
}

c_enum! {
    /// Device control command.
    FFB_CTRL(UINT) {
        CTRL_ENACT = 1,
        CTRL_DISACT = 2,
        CTRL_STOPALL = 3,
        CTRL_DEVRST = 4,
        CTRL_DEVPAUSE = 5,
        CTRL_DEVCONT = 6,
    }
}

bitflags::bitflags! {
    /// Effects a device supports, as a bitmask.
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FFB_EFFECTS: UINT {
        const CONSTANT = 0x0001;
        const RAMP = 0x0002;
        const SQUARE = 0x0004;
        const SINE = 0x0008;
        const TRIANGLE = 0x0010;
        const SAWTOOTH_UP = 0x0020;
        const SAWTOOTH_DN = 0x0040;
        const SPRING = 0x0080;
        const DAMPER = 0x0100;
        const INERTIA = 0x0200;
        const FRICTION = 0x0400;
        const CUSTOM = 0x0800;
    }
}

impl FFBEType {
    /// The capability bit that corresponds to this effect type.
    pub fn capability(self) -> Option<FFB_EFFECTS> {
        match self {
            Self::ET_CONST => Some(FFB_EFFECTS::CONSTANT),
            Self::ET_RAMP => Some(FFB_EFFECTS::RAMP),
            Self::ET_SQR => Some(FFB_EFFECTS::SQUARE),
            Self::ET_SINE => Some(FFB_EFFECTS::SINE),
            Self::ET_TRNGL => Some(FFB_EFFECTS::TRIANGLE),
            Self::ET_STUP => Some(FFB_EFFECTS::SAWTOOTH_UP),
            Self::ET_STDN => Some(FFB_EFFECTS::SAWTOOTH_DN),
            Self::ET_SPRNG => Some(FFB_EFFECTS::SPRING),
            Self::ET_DMPR => Some(FFB_EFFECTS::DAMPER),
            Self::ET_INRT => Some(FFB_EFFECTS::INERTIA),
            Self::ET_FRCTN => Some(FFB_EFFECTS::FRICTION),
            Self::ET_CSTM => Some(FFB_EFFECTS::CUSTOM),
            _ => None,
        }
    }

    /// HID usage of the effect, for `IsDeviceFfbEffect`.
    pub fn usage(self) -> Option<UINT> {
        match self {
            Self::ET_CONST => Some(HID_USAGE_CONST),
            Self::ET_RAMP => Some(HID_USAGE_RAMP),
            Self::ET_SQR => Some(HID_USAGE_SQUR),
            Self::ET_SINE => Some(HID_USAGE_SINE),
            Self::ET_TRNGL => Some(HID_USAGE_TRNG),
            Self::ET_STUP => Some(HID_USAGE_STUP),
            Self::ET_STDN => Some(HID_USAGE_STDN),
            Self::ET_SPRNG => Some(HID_USAGE_SPRNG),
            Self::ET_DMPR => Some(HID_USAGE_DMPR),
            Self::ET_INRT => Some(HID_USAGE_INRT),
            Self::ET_FRCTN => Some(HID_USAGE_FRIC),
            _ => None,
        }
    }
}
