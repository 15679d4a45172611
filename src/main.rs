use std::process::ExitCode;

use aclock::LedMatrix;
use aclock::clock::{SystemClock, run_clock};
use aclock::config::Settings;
use aclock::context::{Context, cancel_on_interrupt};

#[cfg(feature = "hardware")]
fn run(ctx: &Context) -> Result<u64, aclock::Error> {
    let settings = Settings::default();
    let mut matrix = aclock::hardware::PanelMatrix::new(&settings.geometry)?;
    log_panel(&matrix);
    Ok(run_clock(&mut matrix, SystemClock, &settings, ctx)?)
}

#[cfg(not(feature = "hardware"))]
fn run(ctx: &Context) -> Result<u64, aclock::Error> {
    // The built-in terminal fonts have no 5x13; 6x9 fits "HH:MM" on 32 columns.
    let settings = Settings::default().with_font("6x9.bdf", None);
    let mut matrix = aclock::mock::TerminalMatrix::stdout(settings.geometry.clone());
    log_panel(&matrix);
    Ok(run_clock(&mut matrix, SystemClock, &settings, ctx)?)
}

fn log_panel(matrix: &impl LedMatrix) {
    let geometry = matrix.geometry();
    log::info!(
        "panel {}x{} ({})",
        geometry.width(),
        geometry.height(),
        geometry.hardware_mapping
    );
}

fn main() -> ExitCode {
    if let Err(e) = aclock::init_logging() {
        eprintln!("logging unavailable: {e}");
    }
    log::info!("aclock {}", env!("CARGO_PKG_VERSION"));

    let ctx = Context::new();
    let result = cancel_on_interrupt(&ctx).and_then(|()| run(&ctx));
    match result {
        Ok(frames) => {
            log::info!("shut down after {frames} frames");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
