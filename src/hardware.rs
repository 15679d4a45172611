//! Real panels driven through `rpi-rgb-led-matrix`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rpi_led_matrix::{LedCanvas, LedColor, LedFont, LedMatrixOptions};

use crate::config::MatrixGeometry;
use crate::{Color, FontMetrics, FrameCanvas, GlyphFont, LedMatrix};

/// Error types for panel driver operations.
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    #[error("LED matrix initialization failed: {0}")]
    MatrixInit(String),

    #[error("could not read font {}: {source}", .path.display())]
    FontRead { path: PathBuf, source: io::Error },

    #[error("could not load font {}: {reason}", .path.display())]
    FontLoad { path: PathBuf, reason: String },
}

impl From<Color> for LedColor {
    fn from(color: Color) -> Self {
        LedColor {
            red: color.red,
            green: color.green,
            blue: color.blue,
        }
    }
}

/// A BDF font loaded by the panel library.
pub struct BdfFont {
    font: LedFont,
    metrics: FontMetrics,
}

impl BdfFont {
    /// Load `path`, taking glyph metrics from its `FONTBOUNDINGBOX`.
    pub fn load(path: &Path) -> Result<Self, HardwareError> {
        let source = fs::read_to_string(path).map_err(|source| HardwareError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        let metrics = bounding_box(&source).ok_or_else(|| HardwareError::FontLoad {
            path: path.to_path_buf(),
            reason: "missing FONTBOUNDINGBOX".to_string(),
        })?;
        let font = LedFont::new(path).map_err(|reason| HardwareError::FontLoad {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        })?;
        Ok(Self { font, metrics })
    }
}

impl std::fmt::Debug for BdfFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BdfFont")
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl GlyphFont for BdfFont {
    fn metrics(&self) -> FontMetrics {
        self.metrics
    }
}

/// Parse `FONTBOUNDINGBOX <width> <height> <x> <y>` from a BDF header.
fn bounding_box(bdf: &str) -> Option<FontMetrics> {
    let line = bdf
        .lines()
        .find_map(|line| line.trim().strip_prefix("FONTBOUNDINGBOX"))?;
    let mut fields = line.split_whitespace().map(str::parse::<u32>);
    let glyph_width = fields.next()?.ok()?;
    let glyph_height = fields.next()?.ok()?;
    Some(FontMetrics {
        glyph_width,
        glyph_height,
    })
}

/// An off-screen canvas owned by the panel driver.
pub struct PanelCanvas {
    canvas: LedCanvas,
}

impl FrameCanvas for PanelCanvas {
    type Font = BdfFont;

    fn width(&self) -> i32 {
        self.canvas.canvas_size().0
    }

    fn height(&self) -> i32 {
        self.canvas.canvas_size().1
    }

    fn clear(&mut self) {
        self.canvas.clear();
    }

    fn fill(&mut self, color: Color) {
        self.canvas.fill(&color.into());
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.canvas.set(x, y, &color.into());
    }

    fn draw_text(&mut self, font: &BdfFont, x: i32, y: i32, color: Color, text: &str) -> i32 {
        self.canvas
            .draw_text(&font.font, text, x, y, &color.into(), 0, false)
    }
}

/// HUB75 panels behind an Adafruit HAT (or any mapping the library knows).
pub struct PanelMatrix {
    matrix: rpi_led_matrix::LedMatrix,
    geometry: MatrixGeometry,
}

impl PanelMatrix {
    pub fn new(geometry: &MatrixGeometry) -> Result<Self, HardwareError> {
        let mut options = LedMatrixOptions::new();
        options.set_rows(geometry.rows);
        options.set_cols(geometry.cols);
        options.set_chain_length(geometry.chain_length);
        options.set_parallel(geometry.parallel);
        options.set_hardware_mapping(&geometry.hardware_mapping);
        options.set_refresh_rate(geometry.show_refresh_rate);

        log::debug!("opening LED matrix: {geometry:?}");
        let matrix = rpi_led_matrix::LedMatrix::new(Some(options), None)
            .map_err(|e| HardwareError::MatrixInit(e.to_string()))?;
        Ok(Self {
            matrix,
            geometry: geometry.clone(),
        })
    }
}

impl LedMatrix for PanelMatrix {
    type Font = BdfFont;
    type Canvas = PanelCanvas;
    type Error = HardwareError;

    fn geometry(&self) -> &MatrixGeometry {
        &self.geometry
    }

    fn create_frame_canvas(&mut self) -> PanelCanvas {
        PanelCanvas {
            canvas: self.matrix.offscreen_canvas(),
        }
    }

    fn load_font(&self, path: &Path) -> Result<BdfFont, HardwareError> {
        BdfFont::load(path)
    }

    fn swap_on_vsync(&mut self, canvas: PanelCanvas) -> Result<PanelCanvas, HardwareError> {
        Ok(PanelCanvas {
            canvas: self.matrix.swap(canvas.canvas),
        })
    }
}
