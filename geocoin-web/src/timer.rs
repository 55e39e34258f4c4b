//! Repeating browser timer that stops when dropped.
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use crate::dom::window;

pub struct IntervalTask {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl IntervalTask {
    /// Call `tick` every `period_ms` milliseconds until dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no window or the browser refuses the timer.
    pub fn start(period_ms: u32, tick: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let window = window().ok_or_else(|| JsValue::from_str("no browser window"))?;
        let callback = Closure::<dyn FnMut()>::new(tick);
        let timeout = i32::try_from(period_ms).unwrap_or(i32::MAX);
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            timeout,
        )?;
        Ok(Self {
            id,
            _callback: callback,
        })
    }
}

impl Drop for IntervalTask {
    fn drop(&mut self) {
        if let Some(window) = window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}
