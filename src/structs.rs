//! `#[repr(C)]` structures exchanged with vJoyInterface.
//!
//! Field names follow the C headers. All fields use the pinned aliases from
//! [`crate::types`], so the layouts below hold on every target.

#![allow(non_snake_case, non_camel_case_types)]

use core::mem::{align_of, offset_of, size_of};

use serde::Serialize;

use crate::constants::{FFBEType, FFBOP, CONT_POV_MAX, POV_NEUTRAL_RAW, VJD_MAXBTN};
use crate::error::ConvertError;
use crate::types::{BOOL, BYTE, DWORD, LONG, UCHAR, ULONG, WORD};

/// Full position report of one device, as passed to `UpdateVJD`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JOYSTICK_POSITION_V2 {
    /// 1-based device id. `UpdateVJD` overwrites it with its `rID` argument.
    pub bDevice: BYTE,

    pub wThrottle: LONG,
    pub wRudder: LONG,
    pub wAileron: LONG,

    pub wAxisX: LONG,
    pub wAxisY: LONG,
    pub wAxisZ: LONG,
    pub wAxisXRot: LONG,
    pub wAxisYRot: LONG,
    pub wAxisZRot: LONG,
    /// Slider 1
    pub wSlider: LONG,
    /// Slider 2
    pub wDial: LONG,

    pub wWheel: LONG,
    pub wAxisVX: LONG,
    pub wAxisVY: LONG,
    pub wAxisVZ: LONG,
    pub wAxisVBRX: LONG,
    pub wAxisVBRY: LONG,
    pub wAxisVBRZ: LONG,

    /// Buttons 1-32, bit 0 is button 1.
    pub lButtons: ULONG,

    /// Hat switches. Discrete hats use the low nibble, continuous hats the
    /// whole value in hundredths of a degree. `u32::MAX` is neutral.
    pub bHats: DWORD,
    pub bHatsEx1: DWORD,
    pub bHatsEx2: DWORD,
    pub bHatsEx3: DWORD,

    /// Buttons 33-64
    pub lButtonsEx1: ULONG,
    /// Buttons 65-96
    pub lButtonsEx2: ULONG,
    /// Buttons 97-128
    pub lButtonsEx3: ULONG,
}

impl JOYSTICK_POSITION_V2 {
    /// A neutral report: axes at 0, buttons released, hats neutral.
    pub fn new(device: BYTE) -> Self {
        JOYSTICK_POSITION_V2 {
            bDevice: device,

            wThrottle: 0,
            wRudder: 0,
            wAileron: 0,

            wAxisX: 0,
            wAxisY: 0,
            wAxisZ: 0,
            wAxisXRot: 0,
            wAxisYRot: 0,
            wAxisZRot: 0,
            wSlider: 0,
            wDial: 0,

            wWheel: 0,
            wAxisVX: 0,
            wAxisVY: 0,
            wAxisVZ: 0,
            wAxisVBRX: 0,
            wAxisVBRY: 0,
            wAxisVBRZ: 0,

            lButtons: 0,

            bHats: POV_NEUTRAL_RAW,
            bHatsEx1: POV_NEUTRAL_RAW,
            bHatsEx2: POV_NEUTRAL_RAW,
            bHatsEx3: POV_NEUTRAL_RAW,

            lButtonsEx1: 0,
            lButtonsEx2: 0,
            lButtonsEx3: 0,
        }
    }

    /// Word index and bit mask of button `button` (1..=128).
    fn button_bit(button: u8) -> Result<(usize, ULONG), ConvertError> {
        if button == 0 || u32::from(button) > VJD_MAXBTN {
            return Err(ConvertError::ButtonOutOfRange(button));
        }
        let index = u32::from(button - 1);
        Ok(((index / 32) as usize, 1 << (index % 32)))
    }

    fn button_words(&self) -> [&ULONG; 4] {
        [
            &self.lButtons,
            &self.lButtonsEx1,
            &self.lButtonsEx2,
            &self.lButtonsEx3,
        ]
    }

    /// Presses or releases button `button` (1..=128).
    pub fn set_button(&mut self, button: u8, pressed: bool) -> Result<(), ConvertError> {
        let (word, mask) = Self::button_bit(button)?;
        let word = match word {
            0 => &mut self.lButtons,
            1 => &mut self.lButtonsEx1,
            2 => &mut self.lButtonsEx2,
            _ => &mut self.lButtonsEx3,
        };
        if pressed {
            *word |= mask;
        } else {
            *word &= !mask;
        }
        Ok(())
    }

    pub fn is_pressed(&self, button: u8) -> Result<bool, ConvertError> {
        let (word, mask) = Self::button_bit(button)?;
        Ok(*self.button_words()[word] & mask != 0)
    }

    /// Writes a hat value for POV `pov` (1..=4).
    ///
    /// `value` is a continuous angle (0..=35999), a discrete direction
    /// (0..=3, which is within the same range) or neutral (`u32::MAX`).
    pub fn set_hat(&mut self, pov: u8, value: DWORD) -> Result<(), ConvertError> {
        if value > CONT_POV_MAX && value != POV_NEUTRAL_RAW {
            return Err(ConvertError::PovValueOutOfRange(value));
        }
        let hat = match pov {
            1 => &mut self.bHats,
            2 => &mut self.bHatsEx1,
            3 => &mut self.bHatsEx2,
            4 => &mut self.bHatsEx3,
            _ => return Err(ConvertError::PovOutOfRange(pov)),
        };
        *hat = value;
        Ok(())
    }

    pub fn hat(&self, pov: u8) -> Result<DWORD, ConvertError> {
        match pov {
            1 => Ok(self.bHats),
            2 => Ok(self.bHatsEx1),
            3 => Ok(self.bHatsEx2),
            4 => Ok(self.bHatsEx3),
            _ => Err(ConvertError::PovOutOfRange(pov)),
        }
    }
}

/// Raw FFB packet handed to the FFB callback.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FFB_DATA {
    pub size: ULONG,
    pub cmd: ULONG,
    pub data: *mut UCHAR,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FFB_EFF_CONSTANT {
    pub EffectBlockIndex: BYTE,
    pub Magnitude: LONG,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FFB_EFF_RAMP {
    pub EffectBlockIndex: BYTE,
    pub Start: LONG,
    pub End: LONG,
}

/// Polar direction or X direction of an effect report; both are one byte.
#[repr(C)]
#[derive(Clone, Copy)]
pub union FFB_EFF_REPORT_0 {
    pub Direction: BYTE,
    pub DirX: BYTE,
}

impl Default for FFB_EFF_REPORT_0 {
    fn default() -> Self {
        FFB_EFF_REPORT_0 { Direction: 0 }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Default)]
pub struct FFB_EFF_REPORT {
    pub EffectBlockIndex: BYTE,
    pub EffectType: FFBEType,
    pub Duration: WORD,
    pub TrigerRpt: WORD,
    pub SamplePrd: WORD,
    pub Gain: BYTE,
    pub TrigerBtn: BYTE,
    /// Selects which member of `Anonymous` is meaningful.
    pub Polar: BOOL,
    pub Anonymous: FFB_EFF_REPORT_0,
    pub DirY: BYTE,
}

impl FFB_EFF_REPORT {
    /// Polar direction when `Polar` is set, X direction otherwise.
    pub fn direction(&self) -> BYTE {
        // SAFETY: both union members are a single `BYTE`.
        unsafe { self.Anonymous.Direction }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FFB_EFF_OP {
    pub EffectBlockIndex: BYTE,
    pub EffectOp: FFBOP,
    /// 255 means infinite.
    pub LoopCount: BYTE,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FFB_EFF_PERIOD {
    pub EffectBlockIndex: BYTE,
    pub Magnitude: DWORD,
    pub Offset: LONG,
    pub Phase: DWORD,
    pub Period: DWORD,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FFB_EFF_COND {
    pub EffectBlockIndex: BYTE,
    pub isY: BOOL,
    pub CenterPointOffset: LONG,
    pub PosCoeff: LONG,
    pub NegCoeff: LONG,
    pub PosSatur: DWORD,
    pub NegSatur: DWORD,
    pub DeadBand: LONG,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FFB_EFF_ENVLP {
    pub EffectBlockIndex: BYTE,
    pub AttackLevel: DWORD,
    pub FadeLevel: DWORD,
    pub AttackTime: DWORD,
    pub FadeTime: DWORD,
}

const _: () = {
    assert!(size_of::<JOYSTICK_POSITION_V2>() == 108);
    assert!(offset_of!(JOYSTICK_POSITION_V2, wThrottle) == 4);
    assert!(offset_of!(JOYSTICK_POSITION_V2, lButtons) == 76);
    assert!(offset_of!(JOYSTICK_POSITION_V2, bHats) == 80);
    assert!(offset_of!(JOYSTICK_POSITION_V2, lButtonsEx3) == 104);

    assert!(size_of::<FFB_EFF_CONSTANT>() == 8);
    assert!(size_of::<FFB_EFF_RAMP>() == 12);
    assert!(size_of::<FFB_EFF_REPORT>() == 20);
    assert!(size_of::<FFB_EFF_OP>() == 12);
    assert!(size_of::<FFB_EFF_PERIOD>() == 20);
    assert!(size_of::<FFB_EFF_COND>() == 28);
    assert!(size_of::<FFB_EFF_ENVLP>() == 20);

    assert!(size_of::<FFB_DATA>() == 8 + size_of::<usize>());
};

/// Size, alignment and field offsets of one structure on this target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructLayout {
    pub name: &'static str,
    pub size: usize,
    pub align: usize,
    pub fields: Vec<FieldLayout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset: usize,
}

macro_rules! layout {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        StructLayout {
            name: stringify!($ty),
            size: size_of::<$ty>(),
            align: align_of::<$ty>(),
            fields: vec![$(FieldLayout {
                name: stringify!($field),
                offset: offset_of!($ty, $field),
            }),*],
        }
    };
}

/// Layouts of every structure in this module.
pub fn layouts() -> Vec<StructLayout> {
    vec![
        layout!(JOYSTICK_POSITION_V2 {
            bDevice, wThrottle, wRudder, wAileron, wAxisX, wAxisY, wAxisZ, wAxisXRot,
            wAxisYRot, wAxisZRot, wSlider, wDial, wWheel, wAxisVX, wAxisVY, wAxisVZ,
            wAxisVBRX, wAxisVBRY, wAxisVBRZ, lButtons, bHats, bHatsEx1, bHatsEx2, bHatsEx3,
            lButtonsEx1, lButtonsEx2, lButtonsEx3,
        }),
        layout!(FFB_DATA { size, cmd, data }),
        layout!(FFB_EFF_CONSTANT { EffectBlockIndex, Magnitude }),
        layout!(FFB_EFF_RAMP { EffectBlockIndex, Start, End }),
        layout!(FFB_EFF_REPORT {
            EffectBlockIndex, EffectType, Duration, TrigerRpt, SamplePrd, Gain, TrigerBtn,
            Polar, Anonymous, DirY,
        }),
        layout!(FFB_EFF_OP { EffectBlockIndex, EffectOp, LoopCount }),
        layout!(FFB_EFF_PERIOD { EffectBlockIndex, Magnitude, Offset, Phase, Period }),
        layout!(FFB_EFF_COND {
            EffectBlockIndex, isY, CenterPointOffset, PosCoeff, NegCoeff, PosSatur, NegSatur,
            DeadBand,
        }),
        layout!(FFB_EFF_ENVLP { EffectBlockIndex, AttackLevel, FadeLevel, AttackTime, FadeTime }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::Rng;

    #[test]
    fn new_position_is_neutral() {
        let position = JOYSTICK_POSITION_V2::new(9);

        assert_eq!(position.bDevice, 9);
        assert_eq!(position.wAxisX, 0);
        assert_eq!(position.lButtons, 0);
        for pov in 1..=4 {
            assert_eq!(position.hat(pov).unwrap(), POV_NEUTRAL_RAW);
        }
    }

    #[test]
    fn buttons_land_in_the_right_word() {
        let mut position = JOYSTICK_POSITION_V2::new(1);
        position.set_button(1, true).unwrap();
        position.set_button(32, true).unwrap();
        position.set_button(33, true).unwrap();
        position.set_button(128, true).unwrap();

        assert_eq!(position.lButtons, 0x8000_0001);
        assert_eq!(position.lButtonsEx1, 0x0000_0001);
        assert_eq!(position.lButtonsEx2, 0);
        assert_eq!(position.lButtonsEx3, 0x8000_0000);

        position.set_button(32, false).unwrap();
        assert_eq!(position.lButtons, 0x0000_0001);
        assert!(position.is_pressed(1).unwrap());
        assert!(!position.is_pressed(32).unwrap());
    }

    #[test]
    fn out_of_range_buttons_are_rejected() {
        let mut position = JOYSTICK_POSITION_V2::new(1);
        assert_eq!(
            position.set_button(0, true),
            Err(ConvertError::ButtonOutOfRange(0))
        );
        assert_eq!(
            position.set_button(129, true),
            Err(ConvertError::ButtonOutOfRange(129))
        );
        assert_eq!(position, JOYSTICK_POSITION_V2::new(1));
    }

    #[test]
    fn random_buttons_toggle_independently() {
        let mut rng = rand::thread_rng();
        let mut position = JOYSTICK_POSITION_V2::new(1);
        let mut expected = [false; 129];

        for _ in 0..500 {
            let button = rng.gen_range(1..=128u8);
            let pressed = rng.gen_bool(0.5);
            position.set_button(button, pressed).unwrap();
            expected[button as usize] = pressed;
        }

        for button in 1..=128u8 {
            assert_eq!(position.is_pressed(button).unwrap(), expected[button as usize]);
        }
    }

    #[test]
    fn hats_validate_pov_and_value() {
        let mut position = JOYSTICK_POSITION_V2::new(1);
        position.set_hat(2, 9000).unwrap();
        position.set_hat(4, POV_NEUTRAL_RAW).unwrap();

        assert_eq!(position.bHatsEx1, 9000);
        assert_eq!(position.set_hat(5, 0), Err(ConvertError::PovOutOfRange(5)));
        assert_eq!(
            position.set_hat(1, 36000),
            Err(ConvertError::PovValueOutOfRange(36000))
        );
    }

    #[test]
    fn report_direction_reads_either_member() {
        let report = FFB_EFF_REPORT {
            Anonymous: FFB_EFF_REPORT_0 { DirX: 0x40 },
            ..Default::default()
        };
        assert_eq!(report.direction(), 0x40);
    }

    #[test]
    fn effect_report_offsets_match_headers() {
        assert_eq!(offset_of!(FFB_EFF_REPORT, EffectType), 4);
        assert_eq!(offset_of!(FFB_EFF_REPORT, Gain), 14);
        assert_eq!(offset_of!(FFB_EFF_REPORT, Polar), 16);
        assert_eq!(offset_of!(FFB_EFF_REPORT, Anonymous), 17);
        assert_eq!(offset_of!(FFB_EFF_REPORT, DirY), 18);
        assert_eq!(offset_of!(FFB_EFF_COND, CenterPointOffset), 4);
    }

    #[test]
    fn layouts_describe_every_struct() {
        let layouts = layouts();
        let names: Vec<_> = layouts.iter().map(|l| l.name).collect();
        assert_eq!(
            names,
            vec![
                "JOYSTICK_POSITION_V2",
                "FFB_DATA",
                "FFB_EFF_CONSTANT",
                "FFB_EFF_RAMP",
                "FFB_EFF_REPORT",
                "FFB_EFF_OP",
                "FFB_EFF_PERIOD",
                "FFB_EFF_COND",
                "FFB_EFF_ENVLP",
            ]
        );

        let position = &layouts[0];
        assert_eq!(position.size, 108);
        assert_eq!(position.fields.len(), 27);
        assert_eq!(position.fields.last().unwrap().offset, 104);
    }
}
