use std::io::{self, Write};
use std::path::Path;

use super::matrix::{MemoryCanvas, MemoryMatrix, MockError, MonoGlyphs};
use crate::config::MatrixGeometry;
use crate::{Color, LedMatrix};

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Matrix(#[from] MockError),
}

/// Terminal-based LED matrix for development without a panel.
///
/// Every published frame is drawn as a grid of ANSI 24-bit colored cells,
/// two characters wide per pixel so the panel keeps roughly its aspect ratio.
#[derive(Debug)]
pub struct TerminalMatrix<W> {
    inner: MemoryMatrix,
    out: W,
}

impl TerminalMatrix<io::Stdout> {
    /// Create a terminal matrix drawing to stdout.
    pub fn stdout(geometry: MatrixGeometry) -> Self {
        Self::new(geometry, io::stdout())
    }
}

impl<W: Write> TerminalMatrix<W> {
    pub fn new(geometry: MatrixGeometry, out: W) -> Self {
        Self {
            inner: MemoryMatrix::new(geometry),
            out,
        }
    }

    /// Consume the matrix, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LedMatrix for TerminalMatrix<W> {
    type Font = MonoGlyphs;
    type Canvas = MemoryCanvas;
    type Error = TerminalError;

    fn geometry(&self) -> &MatrixGeometry {
        self.inner.geometry()
    }

    fn create_frame_canvas(&mut self) -> MemoryCanvas {
        self.inner.create_frame_canvas()
    }

    fn load_font(&self, path: &Path) -> Result<MonoGlyphs, TerminalError> {
        Ok(self.inner.load_font(path)?)
    }

    fn swap_on_vsync(&mut self, canvas: MemoryCanvas) -> Result<MemoryCanvas, TerminalError> {
        let back = self.inner.swap_on_vsync(canvas)?;
        if let Some(front) = self.inner.front() {
            let first = self.inner.swaps() == 1;
            render_frame(&mut self.out, front, first)?;
        }
        Ok(back)
    }
}

/// Render a frame to any writer. Extracted for testability.
///
/// The cursor is homed first so successive frames overwrite each other;
/// `clear` also wipes the screen.
fn render_frame(w: &mut impl Write, frame: &MemoryCanvas, clear: bool) -> io::Result<()> {
    if clear {
        write!(w, "\x1b[2J")?;
    }
    write!(w, "\x1b[H")?;
    for row in frame.rows() {
        for color in row {
            write!(w, "{}", Cell(*color))?;
        }
        writeln!(w, "\x1b[0m")?;
    }
    w.flush()
}

/// One pixel as a pair of colored spaces. Black pixels are left uncolored.
struct Cell(Color);

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Color { red, green, blue } = self.0;
        if self.0 == Color::BLACK {
            write!(f, "\x1b[0m  ")
        } else {
            write!(f, "\x1b[48;2;{red};{green};{blue}m  ")
        }
    }
}
