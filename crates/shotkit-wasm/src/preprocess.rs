//! Preprocess WASM binding.

use crate::types::JsPreprocessResult;
use shotkit_core::preprocess;
use wasm_bindgen::prelude::*;

/// Auto-orient, bound to 2048px, clean and re-encode an image as PNG.
///
/// # Arguments
///
/// * `bytes` - Source image bytes (JPEG, PNG or WebP)
///
/// # Errors
///
/// Returns an error string if the bytes are not a decodable image.
///
/// # Example
///
/// ```typescript
/// const result = preprocess_image(bytes);
/// console.log(`${result.width}x${result.height} ${result.mime_type}`);
/// ```
#[wasm_bindgen]
pub fn preprocess_image(bytes: &[u8]) -> Result<JsPreprocessResult, JsValue> {
    preprocess(bytes)
        .map(JsPreprocessResult::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_preprocess_invalid_bytes() {
        assert!(preprocess_image(&[1, 2, 3, 4, 5]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_preprocess_empty() {
        assert!(preprocess_image(&[]).is_err());
    }
}
