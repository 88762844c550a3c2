//! Keeping the panic hook quiet while tests run.
//!
//! Panics raised inside test bodies are caught and reported as error chains.
//! The process-wide hook is wrapped once; the wrapper skips the original hook
//! on threads that are currently running a suite.

use std::cell::Cell;
use std::panic;
use std::sync::Once;

thread_local! {
    static QUIET: Cell<bool> = const { Cell::new(false) };
}

static WRAP_HOOK: Once = Once::new();

/// Silences the panic hook on this thread until dropped.
pub(crate) struct QuietPanics {
    was_quiet: bool,
}

impl QuietPanics {
    pub(crate) fn enter() -> Self {
        WRAP_HOOK.call_once(|| {
            let hook = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                if !QUIET.with(Cell::get) {
                    hook(info);
                }
            }));
        });
        let was_quiet = QUIET.with(|quiet| quiet.replace(true));
        QuietPanics { was_quiet }
    }
}

impl Drop for QuietPanics {
    fn drop(&mut self) {
        QUIET.with(|quiet| quiet.set(self.was_quiet));
    }
}

#[cfg(test)]
pub(crate) fn is_quiet() -> bool {
    QUIET.with(Cell::get)
}
