use std::time::Duration;

use crate::LedMatrix;
use crate::context::Context;

/// Something that paints one frame onto a canvas.
pub trait Scene<C> {
    /// Paint the next frame. Called once per loop iteration.
    fn draw(&mut self, canvas: &mut C);
}

/// Draw `scene` onto `matrix` until `ctx` is cancelled.
///
/// Each iteration paints the back buffer, swaps it in on the next refresh,
/// then waits `interval`. Returns the number of frames presented.
///
/// Display errors are not retried; the first one ends the loop.
pub fn run<M, S>(
    matrix: &mut M,
    scene: &mut S,
    ctx: &Context,
    interval: Duration,
) -> Result<u64, M::Error>
where
    M: LedMatrix,
    S: Scene<M::Canvas>,
{
    let mut canvas = matrix.create_frame_canvas();
    let mut frames = 0u64;

    log::info!("render loop starting, interval {interval:?}");
    while !ctx.is_cancelled() {
        scene.draw(&mut canvas);
        canvas = matrix.swap_on_vsync(canvas)?;
        frames += 1;

        if ctx.wait_timeout(interval) {
            break;
        }
    }
    log::info!("render loop stopped after {frames} frames");

    Ok(frames)
}
