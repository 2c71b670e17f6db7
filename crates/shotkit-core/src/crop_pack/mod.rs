//! Multi-target crop export.
//!
//! One decoded source is cover-fit to every entry of a [`CropCatalog`],
//! encoded as PNG, and packed into a ZIP at `{prefix}/{group}/{file_name}`.
//!
//! ## Entry Points
//! - [`build_crop_pack`]: background producer, returns a [`CropPackStream`]
//! - [`write_crop_pack`]: same archive, written on the calling thread
//! - [`CropPackager`]: lower-level access with a custom catalog
//!
//! Entries are processed strictly in catalog order, one at a time. A failure
//! at any entry abandons the archive without writing its central directory.

mod archive;
mod catalog;
mod prefix;
mod stream;

pub use archive::{CropPackager, EncodedOutput};
pub use catalog::{ConfigError, CropCatalog, OutputSpec};
pub use prefix::{crop_pack_filename, sanitize_prefix, CROP_PACK_CONTENT_TYPE, DEFAULT_PREFIX};
pub use stream::{build_crop_pack, write_crop_pack, CropPackStream};
