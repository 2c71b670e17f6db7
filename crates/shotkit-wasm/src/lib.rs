//! Shotkit WASM - WebAssembly bindings for Shotkit
//!
//! This crate exposes the shotkit-core pipeline to JavaScript/TypeScript
//! callers. Every entry point is synchronous and takes the source image as a
//! `Uint8Array`.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for pipeline results
//! - `preprocess` - Deterministic auto-clean to PNG
//! - `crop_pack` - ZIP of fixed-size renditions, catalog and policy manifests
//!
//! # Usage
//!
//! ```typescript
//! import init, { preprocess_image, build_crop_pack, crop_pack_filename } from '@shotkit/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const cleaned = preprocess_image(bytes);
//! const blob = new Blob([cleaned.bytes()], { type: cleaned.mime_type });
//!
//! const zip = build_crop_pack(cleaned.bytes(), 'My Brand');
//! download(new Blob([zip], { type: 'application/zip' }), crop_pack_filename('My Brand'));
//! ```

use wasm_bindgen::prelude::*;

mod crop_pack;
mod preprocess;
mod types;

// Re-export public types
pub use crop_pack::{auto_clean_policy, build_crop_pack, crop_catalog, crop_pack_filename};
pub use preprocess::preprocess_image;
pub use types::JsPreprocessResult;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
