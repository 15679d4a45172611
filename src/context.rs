//! Cancellation shared between the render loop and whoever stops it.

use std::ops::Deref;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A cloneable cancellation token.
///
/// Clones share state: cancelling any clone cancels them all.
#[derive(Clone, Debug, Default)]
pub struct Context {
    inner: Arc<ContextInner>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Deref for Context {
    type Target = ContextInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Default)]
pub struct ContextInner {
    cancelled: Mutex<bool>,
    cv: Condvar,
}

impl ContextInner {
    // The guarded value is a plain flag, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, bool> {
        self.cancelled.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cancel the context and wake every waiter.
    pub fn cancel(&self) {
        *self.lock() = true;
        self.cv.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.lock()
    }

    /// Block until the context is cancelled.
    pub fn wait(&self) {
        let guard = self.lock();
        let _guard = self
            .cv
            .wait_while(guard, |cancelled| !*cancelled)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Block for up to `duration`, returning early on cancellation.
    ///
    /// Returns true if the context has been cancelled.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let guard = self.lock();
        let (cancelled, _) = self
            .cv
            .wait_timeout_while(guard, duration, |cancelled| !*cancelled)
            .unwrap_or_else(PoisonError::into_inner);
        *cancelled
    }
}

/// Cancel `ctx` when the process receives SIGINT.
pub fn cancel_on_interrupt(ctx: &Context) -> Result<(), crate::Error> {
    let ctx = ctx.clone();
    ctrlc::set_handler(move || {
        log::info!("got SIGINT, cancelling");
        ctx.cancel();
    })?;
    Ok(())
}
