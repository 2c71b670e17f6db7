//! WASM-compatible wrapper types for pipeline results.

use shotkit_core::PreprocessResult;
use wasm_bindgen::prelude::*;

/// A preprocessed image for JavaScript.
///
/// `bytes()` copies the PNG out of WASM memory into a `Uint8Array`; call it
/// once and keep the result.
#[wasm_bindgen]
pub struct JsPreprocessResult {
    bytes: Vec<u8>,
    mime_type: String,
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl JsPreprocessResult {
    /// Encoded image bytes as `Uint8Array`.
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Always `image/png`.
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of encoded bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }
}

impl From<PreprocessResult> for JsPreprocessResult {
    fn from(result: PreprocessResult) -> Self {
        let mime_type = result.mime_type().to_string();
        let (width, height) = (result.width, result.height);
        Self {
            bytes: result.into_bytes(),
            mime_type,
            width,
            height,
        }
    }
}
