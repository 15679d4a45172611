use crate::config::{MatrixGeometry, Settings};
use crate::render::Scene;
use crate::{Color, FrameCanvas};

/// Color of the walking pixel.
pub const WALKER: Color = Color::new(128, 128, 128);

/// Color of the origin marker, always lit so the panel orientation is obvious.
pub const ORIGIN: Color = Color::new(128, 0, 0);

/// Walks a single lit pixel across the panel, left to right then top to
/// bottom, one pixel per frame.
///
/// Useful for checking panel wiring and chain order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelWalk {
    x: i32,
    y: i32,
}

impl PixelWalk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current walker position.
    #[inline]
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Move to the next pixel, wrapping at the canvas edges.
    fn advance(&mut self, width: i32, height: i32) {
        self.x += 1;
        if self.x >= width {
            self.x = 0;
            self.y = (self.y + 1).rem_euclid(height.max(1));
        }
    }
}

/// Default panel settings with the driver's refresh-rate readout turned on.
pub fn settings() -> Settings {
    Settings::default().with_geometry(MatrixGeometry {
        show_refresh_rate: true,
        ..MatrixGeometry::default()
    })
}

impl<C: FrameCanvas> Scene<C> for PixelWalk {
    fn draw(&mut self, canvas: &mut C) {
        canvas.fill(Color::BLACK);

        self.advance(canvas.width(), canvas.height());
        canvas.set_pixel(self.x, self.y, WALKER);

        canvas.set_pixel(0, 0, ORIGIN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_moves_right() {
        let mut walk = PixelWalk::new();
        walk.advance(4, 2);
        assert_eq!(walk.position(), (1, 0));
    }

    #[test]
    fn test_advance_wraps_row() {
        let mut walk = PixelWalk::new();
        for _ in 0..4 {
            walk.advance(4, 2);
        }
        assert_eq!(walk.position(), (0, 1));
    }

    #[test]
    fn test_advance_wraps_to_top() {
        let mut walk = PixelWalk::new();
        for _ in 0..8 {
            walk.advance(4, 2);
        }
        assert_eq!(walk.position(), (0, 0));
    }

    #[test]
    fn test_settings_show_refresh_rate() {
        let geometry = settings().geometry;
        assert!(geometry.show_refresh_rate);
        assert_eq!(
            geometry,
            MatrixGeometry {
                show_refresh_rate: true,
                ..MatrixGeometry::default()
            }
        );
    }
}
