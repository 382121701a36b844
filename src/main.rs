//! Retro Arcade entry point
//!
//! Browser: starts the WebGPU runner on the page's `#canvas`.
//! Native: plays the selected game headlessly (`retro-arcade [pong|breakout]`).

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = retro_arcade::platform::web::run().await {
        // The logger may be the thing that failed
        web_sys::console::error_1(&format!("Retro Arcade failed to start: {}", e).into());
        log::error!("Retro Arcade failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use retro_arcade::Settings;
    use retro_arcade::platform::native;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Retro Arcade (native) starting...");
    log::info!("No native window - running attract mode; use the web build to play");

    let mut settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Could not load settings: {}", e);
            std::process::exit(1);
        }
    };
    if settings.apply_args(std::env::args().skip(1)) {
        if let Err(e) = settings.save() {
            log::warn!("Could not save settings: {}", e);
        }
    }

    let summary = native::run(&settings, true);
    log::info!(
        "Tones played: {} low, {} mid, {} high",
        summary.tones[0],
        summary.tones[1],
        summary.tones[2]
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
