use std::path::PathBuf;
use std::time::Duration;

use crate::FontMetrics;
use crate::color::BrightnessBounds;

/// Physical wiring of the LED panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixGeometry {
    /// Rows per panel.
    pub rows: u32,
    /// Columns per panel.
    pub cols: u32,
    /// Panels daisy-chained horizontally.
    pub chain_length: u32,
    /// Chains driven in parallel, stacked vertically.
    pub parallel: u32,
    /// Pin mapping name understood by the panel driver.
    pub hardware_mapping: String,
    /// Ask the driver to print its refresh rate.
    pub show_refresh_rate: bool,
}

impl MatrixGeometry {
    /// Logical width of the whole display in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.cols * self.chain_length
    }

    /// Logical height of the whole display in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.rows * self.parallel
    }
}

impl Default for MatrixGeometry {
    fn default() -> Self {
        Self {
            rows: 16,
            cols: 32,
            chain_length: 1,
            parallel: 1,
            hardware_mapping: "adafruit-hat".to_string(),
            show_refresh_rate: false,
        }
    }
}

/// Everything the binaries need to set up a display and a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub geometry: MatrixGeometry,
    pub brightness: BrightnessBounds,
    /// BDF font file for the clock digits.
    pub font: PathBuf,
    /// Layout metrics used instead of the font's own, if set.
    pub metrics: Option<FontMetrics>,
    /// Pause between frames of the clock.
    pub interval: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            geometry: MatrixGeometry::default(),
            brightness: BrightnessBounds::default(),
            font: PathBuf::from("5x13.bdf"),
            // Observed size of the digits in 5x13.bdf.
            metrics: Some(FontMetrics {
                glyph_width: 5,
                glyph_height: 9,
            }),
            interval: Duration::from_millis(100),
        }
    }
}

impl Settings {
    pub fn with_geometry(mut self, geometry: MatrixGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_brightness(mut self, brightness: BrightnessBounds) -> Self {
        self.brightness = brightness;
        self
    }

    /// Use `font`, laid out with `metrics` or with the font's own size if `None`.
    pub fn with_font(mut self, font: impl Into<PathBuf>, metrics: Option<FontMetrics>) -> Self {
        self.font = font.into();
        self.metrics = metrics;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry_is_single_panel() {
        let geometry = MatrixGeometry::default();
        assert_eq!((geometry.width(), geometry.height()), (32, 16));
    }

    #[test]
    fn test_chained_geometry() {
        let geometry = MatrixGeometry {
            rows: 16,
            cols: 16,
            chain_length: 2,
            parallel: 3,
            ..MatrixGeometry::default()
        };
        assert_eq!((geometry.width(), geometry.height()), (32, 48));
    }

    #[test]
    fn test_with_font_clears_metrics() {
        let settings = Settings::default().with_font("6x9.bdf", None);
        assert_eq!(settings.font, PathBuf::from("6x9.bdf"));
        assert_eq!(settings.metrics, None);
    }
}
