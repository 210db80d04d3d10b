//! Frame defaults via `keyframe.toml`
//!
//! The core never reads configuration on its own. Callers load a
//! [`FrameConfig`] once and pass the options it produces to joins and
//! appends.

use crate::error::{Error, Result};
use crate::lookup::{AppendPolicy, Lookup};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "keyframe.toml";

/// Defaults for frame operations loaded from `keyframe.toml`.
///
/// # Example
///
/// ```toml
/// # Lookup used by joins when none is given: "exact",
/// # "exact_or_greater" or "exact_or_smaller"
/// default_lookup = "exact"
///
/// # Row append: "keep_duplicates" or "left_or_right"
/// row_append = "keep_duplicates"
///
/// left_join_prefilter = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameConfig {
    /// Lookup policy used by joins when none is passed explicitly.
    pub default_lookup: Lookup,
    /// What `Frame::append` does with row keys present in both frames.
    pub row_append: AppendPolicy,
    /// Restrict the other side to this side's key range before a left or
    /// right join on ordered exact keys.
    pub left_join_prefilter: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            default_lookup: Lookup::Exact,
            row_append: AppendPolicy::KeepDuplicates,
            left_join_prefilter: true,
        }
    }
}

impl FrameConfig {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] on syntax errors, unknown fields or
    /// unknown policy names.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::InvalidConfig(format!("Failed to parse config: {}", e)))
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::InvalidConfig(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::InvalidConfig(msg) => {
                Error::InvalidConfig(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Serialize this config to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize config: {}", e)))
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# keyframe configuration
#
# Lookup used by joins when none is given explicitly:
#   "exact"            = only identical keys match
#   "exact_or_greater" = nearest greater key (ordered indices only)
#   "exact_or_smaller" = nearest smaller key (ordered indices only)
default_lookup = "exact"

# Row keys present in both frames of an append:
#   "keep_duplicates" = stack rows, keys may repeat
#   "left_or_right"   = fail with a duplicate row key error
row_append = "keep_duplicates"

# Restrict the joined side to this side's key range before reindexing
# (ordered row indices and exact lookups only).
left_join_prefilter = true
"#
    }
}
