use chrono::{Local, Timelike};

use crate::color::{BrightnessBounds, color_of};
use crate::config::Settings;
use crate::context::Context;
use crate::render::{self, Scene};
use crate::{Color, FontMetrics, FrameCanvas, GlyphFont, LedMatrix, TimeSource};

/// A snapshot of the wall clock, taken once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockReading {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ClockReading {
    #[inline]
    pub const fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Color of this reading within the given brightness bounds.
    #[inline]
    pub fn color(&self, bounds: BrightnessBounds) -> Color {
        color_of(bounds, self.hour, self.minute, f64::from(self.second))
    }
}

impl<T: Timelike> From<&T> for ClockReading {
    fn from(time: &T) -> Self {
        Self::new(time.hour(), time.minute(), time.second())
    }
}

/// Reads the local time of day from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&mut self) -> ClockReading {
        ClockReading::from(&Local::now())
    }
}

/// Format hour and minute as zero-padded `HH:MM`.
#[inline]
pub fn format_time(hour: u32, minute: u32) -> String {
    format!("{hour:02}:{minute:02}")
}

/// Left margin that centres `chars` glyphs on a canvas `canvas_width` wide.
///
/// Glyphs carry their blank column on the right, so an odd leftover pixel
/// goes to the left margin.
pub fn centered_offset(canvas_width: i32, glyph_width: u32, chars: usize) -> i32 {
    let text_width = i64::from(glyph_width) * chars as i64;
    let spare = i64::from(canvas_width) - text_width;
    (spare + 1).div_euclid(2) as i32
}

/// Scene showing the time as `HH:MM`, colored by [`color_of`].
#[derive(Debug)]
pub struct ClockFace<T, F> {
    time: T,
    font: F,
    metrics: FontMetrics,
    bounds: BrightnessBounds,
}

impl<T: TimeSource, F: GlyphFont> ClockFace<T, F> {
    /// Create a face using the font's own metrics for layout.
    pub fn new(time: T, font: F, bounds: BrightnessBounds) -> Self {
        let metrics = font.metrics();
        Self {
            time,
            font,
            metrics,
            bounds,
        }
    }

    /// Lay out text with `metrics` instead of the font's reported size.
    ///
    /// Useful for BDF fonts whose bounding box is taller than the digits.
    pub fn with_metrics(mut self, metrics: FontMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    #[inline]
    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }
}

impl<T, F, C> Scene<C> for ClockFace<T, F>
where
    T: TimeSource,
    F: GlyphFont,
    C: FrameCanvas<Font = F>,
{
    fn draw(&mut self, canvas: &mut C) {
        canvas.clear();

        let now = self.time.now();
        let color = now.color(self.bounds);
        let text = format_time(now.hour, now.minute);

        let x = centered_offset(canvas.width(), self.metrics.glyph_width, text.len());
        // The font baseline sits at y; one row of headroom keeps it on screen.
        let y = self.metrics.glyph_height as i32 + 1;

        log::trace!("drawing {text} at ({x}, {y}) in {color:?}");
        canvas.draw_text(&self.font, x, y, color, &text);
    }
}

/// Load the configured font and show the clock until `ctx` is cancelled.
///
/// Returns the number of frames presented.
pub fn run_clock<M, T>(
    matrix: &mut M,
    time: T,
    settings: &Settings,
    ctx: &Context,
) -> Result<u64, M::Error>
where
    M: LedMatrix,
    T: TimeSource,
{
    let font = matrix.load_font(&settings.font)?;
    let mut face = ClockFace::new(time, font, settings.brightness);
    if let Some(metrics) = settings.metrics {
        face = face.with_metrics(metrics);
    }
    log::debug!(
        "clock font {}, layout {:?}",
        settings.font.display(),
        face.metrics()
    );

    render::run(matrix, &mut face, ctx, settings.interval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use test_case::test_case;

    #[test_case(7, 5, "07:05"; "morning")]
    #[test_case(0, 0, "00:00"; "midnight")]
    #[test_case(23, 59, "23:59"; "last minute")]
    #[test_case(12, 30, "12:30"; "afternoon")]
    fn test_format_time(hour: u32, minute: u32, expected: &str) {
        assert_eq!(format_time(hour, minute), expected);
    }

    #[test_case(32, 5, 5, 4; "five wide on thirty two")]
    #[test_case(32, 6, 5, 1; "six wide on thirty two")]
    #[test_case(64, 5, 5, 20; "chained panels")]
    #[test_case(32, 4, 8, 0; "exact fit")]
    #[test_case(16, 5, 5, -4; "wider than panel")]
    fn test_centered_offset(width: i32, glyph: u32, chars: usize, expected: i32) {
        assert_eq!(centered_offset(width, glyph, chars), expected);
    }

    #[test]
    fn test_reading_from_timelike() {
        let time = NaiveTime::from_hms_opt(21, 4, 33).unwrap();
        assert_eq!(ClockReading::from(&time), ClockReading::new(21, 4, 33));
    }

    #[test]
    fn test_reading_color_uses_all_fields() {
        let bounds = BrightnessBounds::default();
        let reading = ClockReading::new(9, 41, 17);
        assert_eq!(reading.color(bounds), color_of(bounds, 9, 41, 17.0));
    }

    #[test]
    fn test_system_clock_in_range() {
        let reading = SystemClock.now();
        assert!(reading.hour < 24);
        assert!(reading.minute < 60);
        // Leap seconds are folded into nanoseconds by chrono.
        assert!(reading.second < 60);
    }
}
