//! Aventura Kids core crate.
//!
//! Browser mini-game suite for young children: a canvas menu launches one of
//! six short games (puzzle, memory, color classification, odd-one-out,
//! Veo Veo, tidy-up). Every game is a small state machine driven by pointer
//! or touch input; each reports success exactly once through the shared
//! completion flow, which opens the success modal and fires confetti.

use wasm_bindgen::prelude::*;

pub mod games;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    games::start_suite()
}
