//! Browser bundle for the currency chart pages.
//!
//! On load it finds the form (`#main_form`) and chart target (`#graph`), draws
//! an empty chart, shows any toasts waiting in `#toasts-container`, and from
//! then on posts the form to the chart endpoint instead of letting the
//! browser submit it.

mod bindings;
mod dom;
pub mod page;
pub mod settings;

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== formchart starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("Debug mode: {}", settings.debug_mode);

    if let Err(err) = page::mount_when_loaded(settings) {
        log::error!("Failed to attach to page: {}", dom::describe(&err));
    }
}
