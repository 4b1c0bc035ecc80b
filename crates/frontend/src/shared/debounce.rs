//! Keystroke debouncing for lookups that hit the backend (barcode search).

use leptos::prelude::*;

/// Delay between the last keystroke and the lookup it triggers.
pub const LOOKUP_DELAY_MS: u32 = 100;

/// Reset-on-every-keystroke debouncer. Each `schedule` bumps a generation
/// counter; a sleeping callback only fires if its generation is still the
/// latest. A disposed signal (component unmounted) silences the callback.
#[derive(Clone, Copy)]
pub struct Debouncer {
    generation: RwSignal<u64>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self {
            generation: RwSignal::new(0),
        }
    }

    pub fn schedule<F: FnOnce() + 'static>(&self, delay_ms: u32, callback: F) {
        let expected = self.generation.get_untracked() + 1;
        self.generation.set(expected);
        let generation = self.generation;
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(delay_ms).await;
            if generation.try_get_untracked() == Some(expected) {
                callback();
            }
        });
    }

    pub fn cancel(&self) {
        self.generation.update(|g| *g += 1);
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
