use std::fmt;

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

/// The global `window`, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// `log` backend that writes to the browser console.
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Route `log` records to the console. Later calls are ignored.
pub fn install_console_logger(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

#[must_use]
pub fn format_line(level: Level, target: &str, args: &fmt::Arguments<'_>) -> String {
    format!("[{level} {target}] {args}")
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.target(), record.args());
        match record.level() {
            Level::Error => console_error(&line),
            Level::Warn => web_sys::console::warn_1(&JsValue::from(line)),
            Level::Info => web_sys::console::info_1(&JsValue::from(line)),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&JsValue::from(line)),
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_lines_carry_level_and_target() {
        let line = format_line(
            Level::Warn,
            "geocoin_game::session",
            &format_args!("{} saved caches no longer spawn", 2),
        );
        assert_eq!(
            line,
            "[WARN geocoin_game::session] 2 saved caches no longer spawn"
        );
    }
}
