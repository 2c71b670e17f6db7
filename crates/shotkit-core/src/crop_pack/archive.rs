//! Sequential ZIP assembly of crop-pack renditions.
//!
//! Entries are rendered and appended one at a time, so at most one encoded
//! rendition is held in memory next to the shared source image. The archive
//! is finalized only after every entry has been written.

use std::cell::Cell;
use std::io::{self, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::catalog::{CropCatalog, OutputSpec};
use super::prefix::sanitize_prefix;
use crate::decode::{resize_to_cover, DecodedImage};
use crate::encode::{encode_png_image, EncodeError};

const ENTRY_PERMISSIONS: u32 = 0o644;
const DEFLATE_LEVEL: i64 = 9;

/// One rendered entry of the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedOutput {
    /// `{prefix}/{group}/{file_name}`
    pub archive_path: String,
    /// PNG bytes.
    pub bytes: Vec<u8>,
}

/// Renders a catalog of cover-fit renditions into a ZIP archive.
#[derive(Debug, Clone)]
pub struct CropPackager<'a> {
    catalog: &'a CropCatalog,
    prefix: String,
}

impl<'a> CropPackager<'a> {
    /// Create a packager; `prefix` is sanitized before use.
    pub fn new(catalog: &'a CropCatalog, prefix: Option<&str>) -> Self {
        Self {
            catalog,
            prefix: sanitize_prefix(prefix),
        }
    }

    /// The sanitized archive root directory.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn catalog(&self) -> &CropCatalog {
        self.catalog
    }

    /// Download name for the archive: `{prefix}-crop-pack.zip`.
    pub fn suggested_filename(&self) -> String {
        format!("{}-crop-pack.zip", self.prefix)
    }

    /// Cover-fit `image` to the exact size of `spec` and encode it as PNG.
    pub fn render(&self, image: &DecodedImage, spec: &OutputSpec) -> Result<EncodedOutput, EncodeError> {
        let fitted = resize_to_cover(image, spec.width, spec.height)
            .map_err(|e| EncodeError::Transform(e.to_string()))?;
        let bytes = encode_png_image(&fitted)?;

        Ok(EncodedOutput {
            archive_path: spec.archive_path(&self.prefix),
            bytes,
        })
    }

    /// Write the full archive for `image` into `sink` and hand the sink back.
    ///
    /// On any failure the archive is abandoned before its central directory
    /// is written, so `sink` never holds something that opens as a complete
    /// ZIP.
    pub fn write_archive<W: Write>(&self, image: &DecodedImage, mut sink: W) -> Result<W, EncodeError> {
        tracing::info!(
            prefix = %self.prefix,
            entries = self.catalog.len(),
            width = image.width,
            height = image.height,
            "writing crop pack"
        );

        let aborted = Cell::new(false);
        let mut zip = ZipWriter::new_stream(AbortableWriter {
            inner: &mut sink,
            aborted: &aborted,
        });

        if let Err(e) = self.append_entries(&mut zip, image) {
            aborted.set(true);
            tracing::warn!(error = %e, prefix = %self.prefix, "crop pack aborted");
            return Err(e);
        }

        zip.finish().map_err(|e| EncodeError::Archive(e.to_string()))?;
        tracing::info!(prefix = %self.prefix, "crop pack complete");

        Ok(sink)
    }

    fn append_entries<W: Write + io::Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        image: &DecodedImage,
    ) -> Result<(), EncodeError> {
        for (index, spec) in self.catalog.iter().enumerate() {
            let output = self.render(image, spec)?;
            tracing::debug!(
                index,
                path = %output.archive_path,
                bytes = output.bytes.len(),
                "rendered entry"
            );

            zip.start_file(output.archive_path, entry_options())
                .map_err(|e| EncodeError::Archive(e.to_string()))?;
            zip.write_all(&output.bytes)
                .map_err(|e| EncodeError::Archive(e.to_string()))?;
        }
        Ok(())
    }
}

/// Entry options with every time- and host-dependent field pinned.
fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(DEFLATE_LEVEL))
        .last_modified_time(DateTime::default())
        .unix_permissions(ENTRY_PERMISSIONS)
}

/// Forwards to the sink until the archive is abandoned, then discards.
///
/// `ZipWriter` finalizes itself when dropped; after an abort that trailing
/// central directory must not reach the sink.
struct AbortableWriter<'a, W> {
    inner: W,
    aborted: &'a Cell<bool>,
}

impl<W: Write> Write for AbortableWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.aborted.get() {
            return Ok(buf.len());
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.aborted.get() {
            return Ok(());
        }
        self.inner.flush()
    }
}
