use std::path::Path;

pub mod clock;
pub mod color;
pub mod config;
pub mod context;
pub mod render;
pub mod walk;

pub use clock::ClockReading;
pub use color::Color;

use config::MatrixGeometry;

/// Pixel dimensions of a bitmap font's glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub glyph_width: u32,
    pub glyph_height: u32,
}

/// A loaded bitmap font.
pub trait GlyphFont {
    /// Width and height of a single glyph.
    fn metrics(&self) -> FontMetrics;
}

/// An off-screen drawing surface.
///
/// Abstracts over the hardware frame canvas and in-memory test canvases.
/// Coordinates outside the canvas are ignored rather than rejected.
pub trait FrameCanvas {
    /// Font type this canvas knows how to rasterize.
    type Font: GlyphFont;

    fn width(&self) -> i32;

    fn height(&self) -> i32;

    /// Turn every pixel off.
    fn clear(&mut self);

    /// Set every pixel to `color`.
    fn fill(&mut self, color: Color);

    fn set_pixel(&mut self, x: i32, y: i32, color: Color);

    /// Draw `text` with its baseline at `y`, starting at column `x`.
    ///
    /// Returns the horizontal advance of the drawn text in pixels.
    fn draw_text(&mut self, font: &Self::Font, x: i32, y: i32, color: Color, text: &str) -> i32;
}

/// A double-buffered LED matrix.
///
/// Abstracts over the real panel driver and mock/terminal renderers,
/// providing the canvas lifecycle the render loop relies on.
pub trait LedMatrix {
    /// Font type loaded by [`LedMatrix::load_font`].
    type Font: GlyphFont;

    /// Canvas type handed out by this matrix.
    type Canvas: FrameCanvas<Font = Self::Font>;

    /// Error type for font loading and frame publication failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Panel wiring this matrix was opened with.
    fn geometry(&self) -> &MatrixGeometry;

    /// Allocate an off-screen canvas matching the panel geometry.
    fn create_frame_canvas(&mut self) -> Self::Canvas;

    /// Load a bitmap font description from `path`.
    fn load_font(&self, path: &Path) -> Result<Self::Font, Self::Error>;

    /// Publish `canvas`, blocking until the next refresh, and return a
    /// writable back buffer.
    fn swap_on_vsync(&mut self, canvas: Self::Canvas) -> Result<Self::Canvas, Self::Error>;
}

/// Source of wall-clock readings.
///
/// Injected into the clock face so tests can drive it deterministically.
pub trait TimeSource {
    fn now(&mut self) -> ClockReading;
}

/// Errors surfaced to the binaries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("terminal display failed: {0}")]
    Terminal(#[from] mock::TerminalError),

    #[cfg(feature = "hardware")]
    #[error("LED panel failed: {0}")]
    Hardware(#[from] hardware::HardwareError),

    #[error("could not install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

/// Install the `env_logger` backend, honouring `RUST_LOG` and defaulting to `info`.
///
/// Fails if a logger is already installed.
pub fn init_logging() -> Result<(), log::SetLoggerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init()
}

#[cfg(feature = "hardware")]
pub mod hardware;

pub mod mock;
