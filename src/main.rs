#![allow(warnings)]
//! Hospital Management Frontend Entry Point

mod config;
mod logger;
mod transport;
mod context;
mod store;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let loaded = config::load();
    let config = loaded.clone().unwrap_or_default();
    logger::init(&config.log_level);
    if let Err(e) = &loaded {
        log::warn!("[APP] ignoring HMS_CONFIG: {}", e);
    }
    log::info!("[APP] starting, api at {}", config.client.base_url);

    mount_to_body(move || view! { <App config=config /> });
}
