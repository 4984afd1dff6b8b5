//! G-Code motion interpretation
//!
//! This module provides:
//! - Motion line tokenization with per-axis parse tolerance
//! - Feature-type color tracking from `;TYPE:` markers
//! - The extrusion run state machine that drives geometry building

pub mod command;
pub mod palette;
pub mod parser;

pub use command::*;
pub use palette::*;
pub use parser::*;
