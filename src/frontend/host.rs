use futures::future::{AbortHandle, Abortable};
use gloo_timers::future::TimeoutFuture;
use leptos::html::Input;
use leptos::{NodeRef, SignalSet, WriteSignal};
use wasm_bindgen::JsValue;

use crate::controller::AppState;
use crate::runtime::{Host, LocalTask};
use crate::view::View;

/// Dropping it cancels the pending callback.
pub struct TimerGuard(AbortHandle);

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

pub struct BrowserHost {
    set_state: WriteSignal<AppState>,
    file_input: NodeRef<Input>,
}

impl BrowserHost {
    pub fn new(set_state: WriteSignal<AppState>, file_input: NodeRef<Input>) -> Self {
        Self {
            set_state,
            file_input,
        }
    }
}

impl Host for BrowserHost {
    type Timer = TimerGuard;

    fn spawn(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn start_timer(&self, delay: std::time::Duration, callback: Box<dyn FnOnce()>) -> TimerGuard {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let (handle, registration) = AbortHandle::new_pair();
        let timer = Abortable::new(
            async move {
                TimeoutFuture::new(millis).await;
                callback();
            },
            registration,
        );
        wasm_bindgen_futures::spawn_local(async move {
            let _ = timer.await;
        });
        TimerGuard(handle)
    }

    fn push_history(&self, view: View) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let pushed = window
            .history()
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(&view.fragment())));
        if let Err(e) = pushed {
            log::warn!("Failed to push history entry for {}: {:?}", view, e);
        }
    }

    fn reset_file_input(&self) {
        if let Some(input) = self.file_input.get_untracked() {
            input.set_value("");
        }
    }

    fn render(&self, state: &AppState) {
        self.set_state.set(state.clone());
    }
}

/// Fragment of the current URL, `#` included.
pub fn current_fragment() -> String {
    web_sys::window()
        .and_then(|window| window.location().hash().ok())
        .unwrap_or_default()
}
