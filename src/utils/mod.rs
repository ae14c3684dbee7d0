//! Console output helpers

pub mod display;

pub use display::{format_hud_line, Color, ColorOutput, GridFormatter};
