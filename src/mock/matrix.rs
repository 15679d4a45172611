use std::convert::Infallible;
use std::path::{Path, PathBuf};

use embedded_graphics::{Drawable, Pixel};
use embedded_graphics::mono_font::ascii::{
    FONT_4X6, FONT_5X7, FONT_5X8, FONT_6X9, FONT_6X10, FONT_6X12, FONT_6X13, FONT_7X13,
    FONT_7X14, FONT_8X13, FONT_9X15, FONT_9X18, FONT_10X20,
};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Point, Size};
use embedded_graphics::text::{Baseline, Text};

use crate::config::MatrixGeometry;
use crate::{Color, FontMetrics, FrameCanvas, GlyphFont, LedMatrix};

/// Error type for in-memory matrix operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MockError {
    #[error("no built-in font matches '{}'", .0.display())]
    UnknownFont(PathBuf),
}

impl From<Color> for Rgb888 {
    fn from(color: Color) -> Self {
        Rgb888::new(color.red, color.green, color.blue)
    }
}

impl From<Rgb888> for Color {
    fn from(color: Rgb888) -> Self {
        Color::new(color.r(), color.g(), color.b())
    }
}

/// An `embedded-graphics` mono font standing in for a BDF file.
#[derive(Clone, Copy)]
pub struct MonoGlyphs {
    font: &'static MonoFont<'static>,
}

impl MonoGlyphs {
    /// Resolve a BDF path to the built-in font with the same name.
    ///
    /// Only the file stem matters: `fonts/6x9.bdf` resolves to `FONT_6X9`.
    pub fn for_path(path: &Path) -> Result<Self, MockError> {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let font = match stem {
            "4x6" => &FONT_4X6,
            "5x7" => &FONT_5X7,
            "5x8" => &FONT_5X8,
            "6x9" => &FONT_6X9,
            "6x10" => &FONT_6X10,
            "6x12" => &FONT_6X12,
            "6x13" => &FONT_6X13,
            "7x13" => &FONT_7X13,
            "7x14" => &FONT_7X14,
            "8x13" => &FONT_8X13,
            "9x15" => &FONT_9X15,
            "9x18" => &FONT_9X18,
            "10x20" => &FONT_10X20,
            _ => return Err(MockError::UnknownFont(path.to_path_buf())),
        };
        Ok(Self { font })
    }
}

impl std::fmt::Debug for MonoGlyphs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonoGlyphs")
            .field("metrics", &self.metrics())
            .finish()
    }
}

impl GlyphFont for MonoGlyphs {
    fn metrics(&self) -> FontMetrics {
        FontMetrics {
            glyph_width: self.font.character_size.width + self.font.character_spacing,
            glyph_height: self.font.character_size.height,
        }
    }
}

/// A frame held in memory as rows of RGB pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryCanvas {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
}

impl MemoryCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let inside = (0..self.width).contains(&x) && (0..self.height).contains(&y);
        inside.then(|| (y * self.width + x) as usize)
    }

    /// Color at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Pixels row by row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks(self.width.max(1) as usize)
    }

    /// Coordinates and colors of every pixel that is not black.
    pub fn lit(&self) -> impl Iterator<Item = (i32, i32, Color)> + '_ {
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, color)| **color != Color::BLACK)
            .map(|(i, color)| {
                let i = i as i32;
                (i % self.width, i / self.width, *color)
            })
    }
}

impl OriginDimensions for MemoryCanvas {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for MemoryCanvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            FrameCanvas::set_pixel(self, point.x, point.y, color.into());
        }
        Ok(())
    }
}

impl FrameCanvas for MemoryCanvas {
    type Font = MonoGlyphs;

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn clear(&mut self) {
        self.fill(Color::BLACK);
    }

    fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn draw_text(&mut self, font: &MonoGlyphs, x: i32, y: i32, color: Color, text: &str) -> i32 {
        let style = MonoTextStyle::new(font.font, Rgb888::from(color));
        let next = Text::with_baseline(text, Point::new(x, y), style, Baseline::Alphabetic)
            .draw(self)
            .unwrap_or_else(|never| match never {});
        next.x - x
    }
}

/// Double-buffered matrix kept entirely in memory.
///
/// The most recently swapped canvas is the "visible" frame; the previous
/// visible frame is handed back as the next back buffer, as real panels do.
#[derive(Debug)]
pub struct MemoryMatrix {
    geometry: MatrixGeometry,
    front: Option<MemoryCanvas>,
    swaps: u64,
}

impl MemoryMatrix {
    pub fn new(geometry: MatrixGeometry) -> Self {
        Self {
            geometry,
            front: None,
            swaps: 0,
        }
    }

    /// The frame currently on display, if any has been published.
    #[inline]
    pub fn front(&self) -> Option<&MemoryCanvas> {
        self.front.as_ref()
    }

    /// Number of frames published so far.
    #[inline]
    pub fn swaps(&self) -> u64 {
        self.swaps
    }
}

impl Default for MemoryMatrix {
    fn default() -> Self {
        Self::new(MatrixGeometry::default())
    }
}

impl LedMatrix for MemoryMatrix {
    type Font = MonoGlyphs;
    type Canvas = MemoryCanvas;
    type Error = MockError;

    fn geometry(&self) -> &MatrixGeometry {
        &self.geometry
    }

    fn create_frame_canvas(&mut self) -> MemoryCanvas {
        MemoryCanvas::new(self.geometry.width(), self.geometry.height())
    }

    fn load_font(&self, path: &Path) -> Result<MonoGlyphs, MockError> {
        MonoGlyphs::for_path(path)
    }

    fn swap_on_vsync(&mut self, canvas: MemoryCanvas) -> Result<MemoryCanvas, MockError> {
        self.swaps += 1;
        match self.front.replace(canvas) {
            Some(back) => Ok(back),
            None => Ok(self.create_frame_canvas()),
        }
    }
}
