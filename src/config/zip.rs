//! `[zip]` section configuration.
//!
//! Controls which fragment directories get packaged and where archives land.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[zip]` section in fragkit.toml - fragment archiving.
///
/// # Example
/// ```toml
/// [zip]
/// source = "collection/fragments"   # Directory holding one folder per fragment
/// output = "fragment-zips"          # Where `<name>.zip` files are written
/// fragments = ["sp-header", "sp-footer"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ZipConfig {
    /// Fragment collection root. Archive entries are relative to it.
    #[serde(default = "defaults::zip::source")]
    #[educe(Default = defaults::zip::source())]
    pub source: PathBuf,

    /// Output directory, created if missing.
    #[serde(default = "defaults::zip::output")]
    #[educe(Default = defaults::zip::output())]
    pub output: PathBuf,

    /// Fragment names, archived in this order.
    #[serde(default = "defaults::zip::fragments")]
    #[educe(Default = defaults::zip::fragments())]
    pub fragments: Vec<String>,
}
