//! Walk a single pixel across the panel to check wiring and chain order.

use std::process::ExitCode;
use std::time::Duration;

use aclock::LedMatrix;
use aclock::context::{Context, cancel_on_interrupt};
use aclock::render;
use aclock::walk::{self, PixelWalk};

#[cfg(feature = "hardware")]
fn run(ctx: &Context) -> Result<u64, aclock::Error> {
    let settings = walk::settings();
    let mut matrix = aclock::hardware::PanelMatrix::new(&settings.geometry)?;
    log::info!(
        "walking {}x{}",
        matrix.geometry().width(),
        matrix.geometry().height()
    );
    // Paced by vsync alone.
    Ok(render::run(&mut matrix, &mut PixelWalk::new(), ctx, Duration::ZERO)?)
}

#[cfg(not(feature = "hardware"))]
fn run(ctx: &Context) -> Result<u64, aclock::Error> {
    let settings = walk::settings();
    let mut matrix = aclock::mock::TerminalMatrix::stdout(settings.geometry);
    log::info!(
        "walking {}x{}",
        matrix.geometry().width(),
        matrix.geometry().height()
    );
    // A terminal has no vsync to wait on.
    let interval = Duration::from_millis(20);
    Ok(render::run(&mut matrix, &mut PixelWalk::new(), ctx, interval)?)
}

fn main() -> ExitCode {
    if let Err(e) = aclock::init_logging() {
        eprintln!("logging unavailable: {e}");
    }

    let ctx = Context::new();
    match cancel_on_interrupt(&ctx).and_then(|()| run(&ctx)) {
        Ok(frames) => {
            log::info!("walked {frames} frames");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
