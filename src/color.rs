use std::f64::consts::PI;

/// An RGB color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);

    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// True if all three channels carry the same value.
    #[inline]
    pub fn is_grey(&self) -> bool {
        self.red == self.green && self.green == self.blue
    }
}

/// Luminance limits for the daily brightness cycle, each in `[0, 1]`.
///
/// `min` is reached at midnight, `max` at noon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessBounds {
    pub min: f64,
    pub max: f64,
}

impl BrightnessBounds {
    #[inline]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl Default for BrightnessBounds {
    fn default() -> Self {
        Self::new(0.1, 0.5)
    }
}

/// Hue in degrees for the given minute and second.
///
/// Six degrees per minute plus a tenth of a degree per second, so the hue
/// sweeps the full circle once an hour.
#[inline]
pub fn hue_of(minute: u32, second: f64) -> f64 {
    f64::from(minute) * 6.0 + second / 10.0
}

/// Position of `hour` on the daily brightness curve, in `[0, 1]`.
///
/// Zero at midnight, one at noon.
pub fn brightness_scale(hour: u32) -> f64 {
    let angle = (f64::from(hour) / 24.0) * 2.0 * PI;
    (1.0 - angle.cos()) / 2.0
}

/// Luminance for `hour`, kept in the lower half of the range so colors stay
/// vivid instead of washing out towards white.
pub fn luminance_of(bounds: BrightnessBounds, hour: u32) -> f64 {
    let scale = brightness_scale(hour);
    (bounds.min + scale * (bounds.max - bounds.min)) * 0.5
}

/// Produce the color for a time of day.
///
/// Minute and second pick the hue; hour picks the brightness.
pub fn color_of(bounds: BrightnessBounds, hour: u32, minute: u32, second: f64) -> Color {
    hsl_to_rgb(hue_of(minute, second), 1.0, luminance_of(bounds, hour))
}

/// Convert hue (degrees), saturation and luminance to RGB.
pub fn hsl_to_rgb(hue: f64, saturation: f64, luminance: f64) -> Color {
    let channel = |n: f64| {
        let k = (n + hue / 30.0).rem_euclid(12.0);
        let a = saturation * luminance.min(1.0 - luminance);
        let term = (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0);
        to_u8(luminance - a * term)
    };
    Color::new(channel(0.0), channel(8.0), channel(4.0))
}

/// Scale a `[0, 1]` channel to `[0, 255]`, truncating.
#[inline]
fn to_u8(value: f64) -> u8 {
    (value * 255.0).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const BOUNDS: BrightnessBounds = BrightnessBounds::new(0.1, 0.5);
    const EPSILON: f64 = 1e-9;

    /// Index of the largest channel: 0 red, 1 green, 2 blue.
    fn dominant_channel(color: Color) -> usize {
        let channels = [color.red, color.green, color.blue];
        (0..3).max_by_key(|&i| channels[i]).unwrap()
    }

    #[test]
    fn test_brightness_minimum_at_midnight() {
        assert!(brightness_scale(0).abs() < EPSILON);
    }

    #[test]
    fn test_brightness_maximum_at_noon() {
        assert!((brightness_scale(12) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_brightness_symmetric_around_noon() {
        for hour in 1..12 {
            let morning = brightness_scale(hour);
            let evening = brightness_scale(24 - hour);
            assert!(
                (morning - evening).abs() < EPSILON,
                "hour {hour} should mirror hour {}",
                24 - hour
            );
        }
    }

    #[test]
    fn test_brightness_rises_until_noon() {
        for hour in 0..12 {
            assert!(brightness_scale(hour) < brightness_scale(hour + 1));
        }
    }

    #[test]
    fn test_hue_increases_within_hour() {
        let mut last = -1.0;
        for minute in 0..60 {
            for second in 0..60 {
                let hue = hue_of(minute, f64::from(second));
                assert!(hue > last, "hue should increase at {minute:02}:{second:02}");
                assert!(hue < 360.0);
                last = hue;
            }
        }
    }

    #[test]
    fn test_hue_wraps_continuously() {
        let end_of_hour = hue_of(59, 59.0);
        let start_of_hour = hue_of(0, 0.0);
        let step = (start_of_hour + 360.0) - end_of_hour;
        assert!((step - 0.1).abs() < EPSILON);
    }

    #[test]
    fn test_midnight_red() {
        assert_eq!(color_of(BOUNDS, 0, 0, 0.0), Color::new(25, 0, 0));
    }

    #[test]
    fn test_noon_red() {
        assert_eq!(color_of(BOUNDS, 12, 0, 0.0), Color::new(127, 0, 0));
    }

    #[test]
    fn test_hour_changes_only_luminance() {
        let dark = color_of(BOUNDS, 0, 0, 0.0);
        let bright = color_of(BOUNDS, 12, 0, 0.0);

        assert_eq!(dominant_channel(dark), dominant_channel(bright));
        assert_eq!((dark.green, dark.blue), (0, 0));
        assert_eq!((bright.green, bright.blue), (0, 0));
        assert!(bright.red > dark.red);
    }

    #[test_case(0, 0; "red")]
    #[test_case(20, 1; "green")]
    #[test_case(40, 2; "blue")]
    fn test_minute_selects_primary(minute: u32, channel: usize) {
        let color = color_of(BOUNDS, 12, minute, 0.0);
        assert_eq!(dominant_channel(color), channel);
    }

    #[test]
    fn test_never_grey() {
        for hour in 0..24 {
            for minute in 0..60 {
                for second in (0..60).step_by(7) {
                    let color = color_of(BOUNDS, hour, minute, f64::from(second));
                    assert!(
                        !color.is_grey(),
                        "{hour:02}:{minute:02}:{second:02} produced grey {color:?}"
                    );
                }
            }
        }
    }

    #[test_case(0.0; "black")]
    #[test_case(1.0; "white")]
    fn test_extreme_luminance_is_grey(luminance: f64) {
        for hue in [0.0, 90.0, 200.0, 359.0] {
            assert!(hsl_to_rgb(hue, 1.0, luminance).is_grey());
        }
    }

    #[test]
    fn test_full_bounds_stay_in_range() {
        // Channels are u8, so range is guaranteed; check the extremes land on
        // the expected ends rather than saturating early.
        let full = BrightnessBounds::new(0.0, 1.0);
        assert_eq!(color_of(full, 0, 0, 0.0), Color::BLACK);
        assert_eq!(color_of(full, 12, 0, 0.0), Color::new(255, 0, 0));
    }

    #[test]
    fn test_hsl_secondary_colors() {
        assert_eq!(hsl_to_rgb(60.0, 1.0, 0.5), Color::new(255, 255, 0));
        assert_eq!(hsl_to_rgb(180.0, 1.0, 0.5), Color::new(0, 255, 255));
        assert_eq!(hsl_to_rgb(300.0, 1.0, 0.5), Color::new(255, 0, 255));
    }
}
