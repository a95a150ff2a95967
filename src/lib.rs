//! Fixed-width Windows primitive types and declarations for the vJoy
//! virtual joystick interface.
//!
//! [`types`] holds the primitive aliases, [`abi`] the table that describes
//! and checks them. [`structs`], [`constants`] and [`functions`] build the
//! rest of the vJoyInterface vocabulary on top of those aliases.

#![deny(unsafe_op_in_unsafe_fn)]

pub mod abi;
pub mod constants;
pub mod convert;
pub mod error;
pub mod functions;
pub mod report;
pub mod structs;
pub mod types;

pub use abi::TypeMap;
pub use error::{AbiError, Result};
pub use types::*;
