//! Crop pack WASM bindings.
//!
//! Threads are not available to a default WASM build, so the archive is
//! written on the calling thread into one buffer and returned whole.
//!
//! # Functions
//!
//! - [`build_crop_pack`] - ZIP of every standard rendition
//! - [`crop_pack_filename`] - Suggested download name for a prefix
//! - [`crop_catalog`] - The standard catalog as plain objects
//! - [`auto_clean_policy`] - Constants applied by `preprocess_image`

use shotkit_core::{write_crop_pack, AutoCleanPolicy, CropCatalog, PipelineError};
use wasm_bindgen::prelude::*;

/// Build the crop pack for an image.
///
/// # Arguments
///
/// * `bytes` - Source image bytes (JPEG, PNG or WebP)
/// * `prefix` - Archive root directory; sanitized, defaults to `export`
///
/// # Returns
///
/// The complete ZIP archive as a `Uint8Array`. Entries sit at
/// `{prefix}/{group}/{fileName}` in catalog order.
///
/// # Errors
///
/// Returns an error string if the bytes are not a decodable image or any
/// rendition fails; no partial archive is returned.
#[wasm_bindgen]
pub fn build_crop_pack(bytes: &[u8], prefix: Option<String>) -> Result<Vec<u8>, JsValue> {
    crop_pack_bytes(bytes, prefix.as_deref()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Suggested download name: `{prefix}-crop-pack.zip`.
#[wasm_bindgen]
pub fn crop_pack_filename(prefix: Option<String>) -> String {
    shotkit_core::crop_pack_filename(prefix.as_deref())
}

/// The standard crop catalog as an array of
/// `{ group, file_name, width, height }` objects.
#[wasm_bindgen]
pub fn crop_catalog() -> Result<JsValue, JsValue> {
    let catalog = CropCatalog::standard().map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(catalog.specs())
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize catalog: {}", e)))
}

/// The fixed constants `preprocess_image` applies, for provenance records.
#[wasm_bindgen]
pub fn auto_clean_policy() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&AutoCleanPolicy::STANDARD)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize policy: {}", e)))
}

fn crop_pack_bytes(bytes: &[u8], prefix: Option<&str>) -> Result<Vec<u8>, PipelineError> {
    write_crop_pack(bytes, prefix, Vec::new())
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(serde::Deserialize)]
    struct SpecJs {
        group: String,
        file_name: String,
        width: u32,
        height: u32,
    }

    #[wasm_bindgen_test]
    fn test_build_crop_pack_invalid_bytes() {
        assert!(build_crop_pack(&[1, 2, 3, 4, 5], None).is_err());
    }

    #[wasm_bindgen_test]
    fn test_crop_catalog_round_trips_to_js() {
        let value = crop_catalog().unwrap();
        let specs: Vec<SpecJs> = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(specs.len(), 8);
        assert_eq!(specs[4].group, "stories-reels");
        assert_eq!(specs[4].file_name, "stories-reels-9x16-1080x1920.png");
        assert_eq!((specs[4].width, specs[4].height), (1080, 1920));
    }

    #[wasm_bindgen_test]
    fn test_auto_clean_policy_is_object() {
        let value = auto_clean_policy().unwrap();
        assert!(value.is_object());
    }
}
