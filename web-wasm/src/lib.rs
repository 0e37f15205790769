//! Results Lookup Web App (Leptos + WASM)

mod app;
mod components;
mod verifier;

pub use components::celebration::{scatter, Particle, PALETTE};

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
