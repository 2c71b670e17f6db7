//! The fixed catalog of crop-pack renditions.
//!
//! Group and file names are an external contract: downstream upload tooling
//! matches on them, so the standard table must not be renamed or reordered.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a catalog violates its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A catalog must contain at least one entry.
    #[error("Crop catalog is empty")]
    EmptyCatalog,

    /// An entry has a zero width or height.
    #[error("Output spec {file_name} has a zero dimension ({width}x{height})")]
    ZeroDimension {
        file_name: String,
        width: u32,
        height: u32,
    },

    /// Two entries share a file name.
    #[error("Duplicate output file name: {0}")]
    DuplicateFileName(String),

    /// A group or file name would escape its directory or add a level.
    #[error("Invalid path component in output spec: {0:?}")]
    InvalidComponent(String),
}

/// One rendition in the crop pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Directory inside the archive prefix (e.g. `instagram`).
    pub group: String,
    /// File name inside the group directory.
    pub file_name: String,
    /// Exact output width in pixels.
    pub width: u32,
    /// Exact output height in pixels.
    pub height: u32,
}

impl OutputSpec {
    pub fn new(group: &str, file_name: &str, width: u32, height: u32) -> Self {
        Self {
            group: group.to_string(),
            file_name: file_name.to_string(),
            width,
            height,
        }
    }

    /// Path of this rendition inside an archive: `{prefix}/{group}/{file_name}`.
    pub fn archive_path(&self, prefix: &str) -> String {
        format!("{}/{}/{}", prefix, self.group, self.file_name)
    }
}

/// A validated, ordered list of output specs.
///
/// Only constructible through [`CropCatalog::new`], so every instance holds
/// non-zero dimensions and unique file names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropCatalog {
    specs: Vec<OutputSpec>,
}

static STANDARD: Lazy<Result<CropCatalog, ConfigError>> =
    Lazy::new(|| CropCatalog::new(standard_specs()));

impl CropCatalog {
    /// Validate and wrap a list of specs, preserving their order.
    pub fn new(specs: Vec<OutputSpec>) -> Result<Self, ConfigError> {
        if specs.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for spec in &specs {
            if spec.width == 0 || spec.height == 0 {
                return Err(ConfigError::ZeroDimension {
                    file_name: spec.file_name.clone(),
                    width: spec.width,
                    height: spec.height,
                });
            }
            for component in [&spec.group, &spec.file_name] {
                if !is_valid_component(component) {
                    return Err(ConfigError::InvalidComponent(component.clone()));
                }
            }
            if !seen.insert(spec.file_name.as_str()) {
                return Err(ConfigError::DuplicateFileName(spec.file_name.clone()));
            }
        }

        Ok(Self { specs })
    }

    /// The standard social/marketplace catalog, validated once per process.
    pub fn standard() -> Result<&'static CropCatalog, ConfigError> {
        STANDARD.as_ref().map_err(Clone::clone)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OutputSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn specs(&self) -> &[OutputSpec] {
        &self.specs
    }

    /// Archive paths for every entry, in catalog order.
    pub fn archive_paths(&self, prefix: &str) -> Vec<String> {
        self.specs.iter().map(|s| s.archive_path(prefix)).collect()
    }
}

impl<'a> IntoIterator for &'a CropCatalog {
    type Item = &'a OutputSpec;
    type IntoIter = std::slice::Iter<'a, OutputSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}

fn is_valid_component(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

fn standard_specs() -> Vec<OutputSpec> {
    vec![
        // Google Business Profile
        OutputSpec::new("gbp", "gbp-4x3-1200x900.png", 1200, 900),
        OutputSpec::new("gbp", "gbp-1x1-1200x1200.png", 1200, 1200),
        // Instagram feed
        OutputSpec::new("instagram", "instagram-1x1-1080x1080.png", 1080, 1080),
        OutputSpec::new("instagram", "instagram-4x5-1080x1350.png", 1080, 1350),
        // Stories / Reels
        OutputSpec::new("stories-reels", "stories-reels-9x16-1080x1920.png", 1080, 1920),
        // Meta ads
        OutputSpec::new("meta-ads", "meta-ads-1x1-1080x1080.png", 1080, 1080),
        OutputSpec::new("meta-ads", "meta-ads-4x5-1080x1350.png", 1080, 1350),
        // Delivery apps
        OutputSpec::new("delivery-apps", "delivery-1x1-1200x1200.png", 1200, 1200),
    ]
}
