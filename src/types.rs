//! Windows primitive types as used by the vJoy interface headers.
//!
//! Every integer alias is pinned to a fixed-width Rust type. The headers
//! spell `DWORD`, `LONG` and `ULONG` with C `long`, which is 64 bits on LP64
//! targets while the vJoy ABI is 32 bits everywhere, so `c_long`/`c_ulong`
//! are never used here.

#![allow(clippy::upper_case_acronyms)]

use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::size_of;
use core::ptr;

pub type BYTE = u8;
pub type UCHAR = u8;
pub type CHAR = i8;

pub type SHORT = i16;
pub type WORD = u16;
pub type USHORT = u16;

pub type INT = i32;
pub type LONG = i32;
pub type UINT = u32;
pub type UINT32 = u32;
pub type DWORD = u32;
pub type ULONG = u32;

pub type FLOAT = f32;

pub type BOOL = Bool;

/// The foreign "no value" marker.
///
/// A foreign function returning `VOID` is declared without a return type.
/// As a named type it is uninhabited: it only ever appears behind a pointer
/// ([`PVOID`]), and a field or local of type `VOID` can never hold a value.
///
/// ```compile_fail
/// use vjoy_abi::types::VOID;
///
/// #[repr(C)]
/// struct Stored {
///     value: VOID,
/// }
///
/// let _stored = Stored { value: VOID {} };
/// ```
#[derive(Debug)]
pub enum VOID {}

pub type PVOID = *mut VOID;

pub type HANDLE = Handle;
pub type HDEVNOTIFY = DevNotifyHandle;

/// Foreign `BOOL`, declared as C `_Bool` by the vJoy headers.
///
/// Kept as a raw byte so that whatever the driver writes is a valid value.
/// Any non-zero byte reads as true, and equality follows that reading.
#[repr(transparent)]
#[derive(Clone, Copy, Default)]
pub struct Bool(pub u8);

impl Bool {
    pub const FALSE: Bool = Bool(0);
    pub const TRUE: Bool = Bool(1);

    pub const fn new(value: bool) -> Self {
        Bool(value as u8)
    }

    pub const fn as_bool(self) -> bool {
        self.0 != 0
    }
}

impl PartialEq for Bool {
    fn eq(&self, other: &Self) -> bool {
        self.as_bool() == other.as_bool()
    }
}

impl Eq for Bool {}

impl Hash for Bool {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bool().hash(state);
    }
}

impl fmt::Debug for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 1 {
            write!(f, "Bool({} = {:#04x})", self.as_bool(), self.0)
        } else {
            write!(f, "Bool({})", self.as_bool())
        }
    }
}

impl From<bool> for Bool {
    fn from(value: bool) -> Self {
        Bool::new(value)
    }
}

impl From<Bool> for bool {
    fn from(value: Bool) -> Self {
        value.as_bool()
    }
}

macro_rules! opaque_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        ///
        /// The wrapper does not own the resource: it has no `Drop`, and
        /// releasing it is up to the driver API that issued it.
        #[repr(transparent)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name(PVOID);

        impl $name {
            pub const NULL: Self = Self(ptr::null_mut());

            pub const fn from_raw(raw: PVOID) -> Self {
                Self(raw)
            }

            pub const fn as_raw(self) -> PVOID {
                self.0
            }

            pub fn is_null(self) -> bool {
                self.0.is_null()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::NULL
            }
        }
    };
}

opaque_handle!(
    /// Foreign `HANDLE`: an opaque, pointer-sized resource identifier.
    Handle
);

opaque_handle!(
    /// Foreign `HDEVNOTIFY`, as returned by `RegisterDeviceNotification`.
    DevNotifyHandle
);

impl Handle {
    /// `INVALID_HANDLE_VALUE`, i.e. `(HANDLE)-1`.
    pub const INVALID: Handle = Handle(usize::MAX as PVOID);

    pub fn is_invalid(self) -> bool {
        self.is_null() || self == Self::INVALID
    }
}

const _: () = {
    assert!(size_of::<BOOL>() == 1);
    assert!(size_of::<BYTE>() == 1 && size_of::<UCHAR>() == 1 && size_of::<CHAR>() == 1);
    assert!(size_of::<SHORT>() == 2 && size_of::<WORD>() == 2 && size_of::<USHORT>() == 2);
    assert!(size_of::<INT>() == 4 && size_of::<UINT>() == 4 && size_of::<UINT32>() == 4);
    assert!(size_of::<LONG>() == 4 && size_of::<ULONG>() == 4 && size_of::<DWORD>() == 4);
    assert!(size_of::<FLOAT>() == 4);
    assert!(size_of::<PVOID>() == size_of::<usize>());
    assert!(size_of::<HANDLE>() == size_of::<usize>());
    assert!(size_of::<HDEVNOTIFY>() == size_of::<usize>());

    assert!(CHAR::MIN < 0 && SHORT::MIN < 0 && INT::MIN < 0 && LONG::MIN < 0);
    assert!(BYTE::MIN == 0 && WORD::MIN == 0 && DWORD::MIN == 0 && ULONG::MIN == 0);
};
