//! Displays and time sources that run without a panel attached.

mod display;
mod matrix;
mod script;

pub use display::{TerminalError, TerminalMatrix};
pub use matrix::{MemoryCanvas, MemoryMatrix, MockError, MonoGlyphs};
pub use script::{ParseError, ScriptedClock};
