//! # SliceKit Core
//!
//! Core types, constants, and errors shared by the SliceKit crates.
//! Provides the color model used by the feature palette, the slicer
//! comment markers recognised while scanning a print file, and the
//! unified error type.

pub mod constants;
pub mod data;
pub mod error;

pub use data::{Rgb, BUILTIN_FEATURE_COLORS};

pub use error::{Error, GcodeError, Result};
