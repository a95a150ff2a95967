//! The primitive type map: one row per foreign primitive name, plus the two
//! symbolic rewrites (`VOID`, `CALLBACK`).
//!
//! Each row records the width and signedness the foreign ABI declares next
//! to what the Rust alias actually has on the current target, so the map
//! can be checked ([`TypeMap::verify`]) and pinned ([`TypeMap::fingerprint`]).

use core::fmt;
use core::mem::size_of;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::{AbiError, Mismatch, Result};
use crate::types::*;

/// Numeric interpretation of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Signedness {
    Signed,
    Unsigned,
    /// Logical, floating point or address: signedness does not apply.
    #[serde(rename = "n/a")]
    NotApplicable,
}

impl fmt::Display for Signedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Signedness::Signed => "signed",
            Signedness::Unsigned => "unsigned",
            Signedness::NotApplicable => "n/a",
        })
    }
}

/// Declared width of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Width {
    Bits(u16),
    /// Same width as a pointer on the target.
    Pointer,
}

impl Width {
    pub const fn bytes(self) -> usize {
        match self {
            Width::Bits(bits) => bits as usize / 8,
            Width::Pointer => size_of::<usize>(),
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Width::Bits(bits) => write!(f, "{bits}"),
            Width::Pointer => f.write_str("ptr"),
        }
    }
}

/// How a Rust type behaves numerically at the foreign boundary.
pub trait Repr {
    const SIGNEDNESS: Signedness;
}

macro_rules! impl_repr {
    ($signedness:ident: $($ty:ty),*) => {
        $(impl Repr for $ty {
            const SIGNEDNESS: Signedness = Signedness::$signedness;
        })*
    };
}

impl_repr!(Signed: i8, i16, i32, i64);
impl_repr!(Unsigned: u8, u16, u32, u64);
impl_repr!(NotApplicable: f32, f64, Bool, Handle, DevNotifyHandle, PVOID);

/// One row of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Primitive {
    pub name: &'static str,
    pub rust_type: &'static str,
    pub width: Width,
    pub signedness: Signedness,
    /// `size_of` of the Rust alias on this target.
    pub size: usize,
    pub actual_signedness: Signedness,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

impl Primitive {
    /// Returns the first way in which this row does not hold, if any.
    pub fn check(&self) -> Option<Mismatch> {
        let expected = self.width.bytes();
        if self.size != expected {
            return Some(Mismatch::Width {
                name: self.name,
                rust_type: self.rust_type,
                expected,
                actual: self.size,
            });
        }
        if self.signedness != self.actual_signedness {
            return Some(Mismatch::Signedness {
                name: self.name,
                rust_type: self.rust_type,
                expected: self.signedness,
                actual: self.actual_signedness,
            });
        }
        None
    }
}

macro_rules! primitive_map {
    ($($name:literal => $alias:ty as $rust:literal, $width:expr, $sign:ident $(, $note:literal)?;)*) => {
        /// Every foreign primitive the vJoy headers use.
        pub static PRIMITIVES: &[Primitive] = &[
            $(Primitive {
                name: $name,
                rust_type: $rust,
                width: $width,
                signedness: Signedness::$sign,
                size: size_of::<$alias>(),
                actual_signedness: <$alias as Repr>::SIGNEDNESS,
                note: primitive_map!(@note $($note)?),
            },)*
        ];
    };
    (@note) => { None };
    (@note $note:literal) => { Some($note) };
}

primitive_map! {
    "BOOL" => BOOL as "Bool(u8)", Width::Bits(8), NotApplicable,
        "C _Bool; the 4-byte windows.h BOOL is not used by vJoy";
    "BYTE" => BYTE as "u8", Width::Bits(8), Unsigned;
    "UCHAR" => UCHAR as "u8", Width::Bits(8), Unsigned;
    "CHAR" => CHAR as "i8", Width::Bits(8), Signed;
    "SHORT" => SHORT as "i16", Width::Bits(16), Signed;
    "WORD" => WORD as "u16", Width::Bits(16), Unsigned;
    "USHORT" => USHORT as "u16", Width::Bits(16), Unsigned;
    "INT" => INT as "i32", Width::Bits(32), Signed;
    "UINT" => UINT as "u32", Width::Bits(32), Unsigned;
    "UINT32" => UINT32 as "u32", Width::Bits(32), Unsigned;
    "LONG" => LONG as "i32", Width::Bits(32), Signed, "pinned; C long is 64-bit on LP64";
    "DWORD" => DWORD as "u32", Width::Bits(32), Unsigned, "pinned; declared unsigned long";
    "ULONG" => ULONG as "u32", Width::Bits(32), Unsigned, "pinned; declared unsigned long";
    "FLOAT" => FLOAT as "f32", Width::Bits(32), NotApplicable, "IEEE-754 single precision";
    "PVOID" => PVOID as "*mut VOID", Width::Pointer, NotApplicable, "non-owning address";
    "HANDLE" => HANDLE as "Handle", Width::Pointer, NotApplicable, "non-owning, driver-managed";
    "HDEVNOTIFY" => HDEVNOTIFY as "DevNotifyHandle", Width::Pointer, NotApplicable,
        "non-owning, driver-managed";
}

/// Kind of a symbolic rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteKind {
    /// Interchangeable with a local marker; never a storage type.
    Alias,
    /// Calling convention attached to each declaration.
    CallingConvention,
}

/// A non-type rule carried over from the headers' `#define`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rewrite {
    pub name: &'static str,
    pub kind: RewriteKind,
    pub rust: &'static str,
    pub note: &'static str,
}

pub static REWRITES: &[Rewrite] = &[
    Rewrite {
        name: "VOID",
        kind: RewriteKind::Alias,
        rust: "()",
        note: "no return type in signatures; uninhabited pointee of PVOID",
    },
    Rewrite {
        name: "CALLBACK",
        kind: RewriteKind::CallingConvention,
        rust: "extern \"system\"",
        note: "__stdcall on 32-bit x86 Windows, C elsewhere",
    },
];

/// A view over a primitive table and its rewrites.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TypeMap<'a> {
    primitives: &'a [Primitive],
    rewrites: &'a [Rewrite],
}

impl TypeMap<'static> {
    /// The map for the vJoy interface headers.
    pub fn builtin() -> Self {
        TypeMap::new(PRIMITIVES, REWRITES)
    }
}

impl<'a> TypeMap<'a> {
    pub fn new(primitives: &'a [Primitive], rewrites: &'a [Rewrite]) -> Self {
        TypeMap {
            primitives,
            rewrites,
        }
    }

    pub fn primitives(&self) -> &'a [Primitive] {
        self.primitives
    }

    pub fn rewrites(&self) -> &'a [Rewrite] {
        self.rewrites
    }

    pub fn get(&self, name: &str) -> Result<&'a Primitive> {
        self.primitives
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| AbiError::UnknownPrimitive(name.to_owned()))
    }

    /// Checks every row against the current target.
    pub fn verify(&self) -> Result<()> {
        let mut mismatches = Vec::new();
        for primitive in self.primitives {
            match primitive.check() {
                Some(mismatch) => {
                    warn!(%mismatch, "primitive does not match the declared ABI");
                    mismatches.push(mismatch);
                }
                None => debug!(
                    name = primitive.name,
                    bytes = primitive.size,
                    signedness = %primitive.signedness,
                    "primitive ok"
                ),
            }
        }

        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(AbiError::Mismatch(mismatches))
        }
    }

    /// SHA-256 over the declared contract, as lowercase hex.
    ///
    /// Only declared values are hashed, with pointer widths written as
    /// `ptr`, so the digest is the same on 32-bit and 64-bit targets.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for p in self.primitives {
            hasher.update(format!("{}:{}:{}\n", p.name, p.width, p.signedness));
        }
        for r in self.rewrites {
            hasher.update(format!("{}=>{}\n", r.name, r.rust));
        }
        hasher
            .finalize()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect()
    }

    pub fn check_fingerprint(&self, expected: &str) -> Result<()> {
        let actual = self.fingerprint();
        if actual.eq_ignore_ascii_case(expected.trim()) {
            Ok(())
        } else {
            Err(AbiError::FingerprintMismatch {
                expected: expected.trim().to_owned(),
                actual,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ALIASES: [&str; 17] = [
        "BOOL", "BYTE", "UCHAR", "CHAR", "SHORT", "WORD", "USHORT", "INT", "UINT", "UINT32",
        "LONG", "DWORD", "ULONG", "FLOAT", "PVOID", "HANDLE", "HDEVNOTIFY",
    ];

    fn row(name: &'static str, width: Width, size: usize, sign: Signedness) -> Primitive {
        Primitive {
            name,
            rust_type: "test",
            width,
            signedness: sign,
            size,
            actual_signedness: sign,
            note: None,
        }
    }

    #[test]
    fn builtin_map_has_every_alias_once() {
        let map = TypeMap::builtin();
        let names: Vec<_> = map.primitives().iter().map(|p| p.name).collect();
        assert_eq!(names, ALIASES.to_vec());
    }

    #[test]
    fn builtin_map_verifies_on_this_target() {
        TypeMap::builtin().verify().unwrap();
    }

    #[test]
    fn dword_is_pinned_to_four_bytes() {
        let dword = TypeMap::builtin().get("DWORD").unwrap();
        assert_eq!(dword.width, Width::Bits(32));
        assert_eq!(dword.size, 4);
        assert_eq!(dword.actual_signedness, Signedness::Unsigned);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = TypeMap::builtin().get("QWORD").unwrap_err();
        assert!(matches!(err, AbiError::UnknownPrimitive(name) if name == "QWORD"));
    }

    #[test]
    fn verify_reports_width_and_signedness_mismatches() {
        let mut wrong_sign = row("LONG", Width::Bits(32), 4, Signedness::Signed);
        wrong_sign.actual_signedness = Signedness::Unsigned;
        let table = [
            row("DWORD", Width::Bits(32), 8, Signedness::Unsigned),
            wrong_sign,
            row("WORD", Width::Bits(16), 2, Signedness::Unsigned),
        ];

        let err = TypeMap::new(&table, &[]).verify().unwrap_err();
        let AbiError::Mismatch(mismatches) = err else {
            panic!("expected a mismatch error");
        };
        assert_eq!(
            mismatches,
            vec![
                Mismatch::Width {
                    name: "DWORD",
                    rust_type: "test",
                    expected: 4,
                    actual: 8,
                },
                Mismatch::Signedness {
                    name: "LONG",
                    rust_type: "test",
                    expected: Signedness::Signed,
                    actual: Signedness::Unsigned,
                },
            ]
        );
    }

    #[test]
    fn pointer_rows_follow_target_width() {
        let handle = row("HANDLE", Width::Pointer, size_of::<usize>(), Signedness::NotApplicable);
        assert_eq!(handle.check(), None);
    }

    #[test]
    fn fingerprint_is_stable_hex() {
        let map = TypeMap::builtin();
        let first = map.fingerprint();

        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(first, map.fingerprint());
        map.check_fingerprint(&first.to_uppercase()).unwrap();
    }

    #[test]
    fn fingerprint_ignores_actual_sizes() {
        let a = [row("HANDLE", Width::Pointer, 4, Signedness::NotApplicable)];
        let b = [row("HANDLE", Width::Pointer, 8, Signedness::NotApplicable)];
        assert_eq!(
            TypeMap::new(&a, REWRITES).fingerprint(),
            TypeMap::new(&b, REWRITES).fingerprint()
        );
    }

    #[test]
    fn fingerprint_tracks_declared_changes() {
        let narrow = [row("DWORD", Width::Bits(32), 4, Signedness::Unsigned)];
        let wide = [row("DWORD", Width::Bits(64), 4, Signedness::Unsigned)];

        let err = TypeMap::new(&wide, REWRITES)
            .check_fingerprint(&TypeMap::new(&narrow, REWRITES).fingerprint())
            .unwrap_err();
        assert!(matches!(err, AbiError::FingerprintMismatch { .. }));
    }

    #[test]
    fn rewrites_cover_void_and_callback() {
        let map = TypeMap::builtin();
        let kinds: Vec<_> = map.rewrites().iter().map(|r| (r.name, r.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("VOID", RewriteKind::Alias),
                ("CALLBACK", RewriteKind::CallingConvention),
            ]
        );
    }
}
