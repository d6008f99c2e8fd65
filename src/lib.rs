pub mod core;
pub mod services;
pub mod utils;
#[cfg(target_arch = "wasm32")]
pub mod ui;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use leptos::*;
#[cfg(target_arch = "wasm32")]
use crate::core::config::ClientConfig;

#[cfg(target_arch = "wasm32")]
fn launch(config: ClientConfig) {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).unwrap_or(());

    log::info!("Mounting truth-or-dare, endpoint {}", config.endpoint);
    leptos::mount_to_body(move || {
        use crate::ui::App;
        view! { <App config=config/> }
    });
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start() {
    launch(ClientConfig::default());
}

/// Same as `start`, with a YAML client config.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start_with_config(yaml: &str) -> Result<(), JsValue> {
    let config = ClientConfig::from_yaml(yaml).map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;
    launch(config);
    Ok(())
}
