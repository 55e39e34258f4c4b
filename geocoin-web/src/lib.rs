#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub mod app;
pub mod components;
pub mod dom;
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod timer;
pub mod view_model;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    dom::install_console_logger(log::LevelFilter::Info);
    yew::Renderer::<app::App>::new().render();
}
