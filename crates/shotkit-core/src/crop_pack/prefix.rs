//! Archive prefix handling.

/// Prefix used when the caller supplies none.
pub const DEFAULT_PREFIX: &str = "export";

/// Content type of a crop-pack archive.
pub const CROP_PACK_CONTENT_TYPE: &str = "application/zip";

/// Make a caller-supplied prefix safe to use as the archive's root directory.
///
/// Every character outside `[A-Za-z0-9_-]` is replaced with a single `-`, one
/// for one, so the result has exactly as many characters as the input. Only a
/// missing or empty prefix falls back to [`DEFAULT_PREFIX`].
pub fn sanitize_prefix(prefix: Option<&str>) -> String {
    match prefix {
        None | Some("") => DEFAULT_PREFIX.to_string(),
        Some(raw) => raw
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '-' })
            .collect(),
    }
}

/// Suggested download name for an archive built with `prefix`.
pub fn crop_pack_filename(prefix: Option<&str>) -> String {
    format!("{}-crop-pack.zip", sanitize_prefix(prefix))
}
