//! `[fix]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[fix]` section in fragkit.toml - placeholder namespacing.
///
/// # Example
/// ```toml
/// [fix]
/// pattern = "collection/fragments/*/index.html"
/// variables = ["displayStyle", "showRatings"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FixConfig {
    /// Glob selecting the files to rewrite, relative to the project root.
    #[serde(default = "defaults::fix::pattern")]
    #[educe(Default = defaults::fix::pattern())]
    pub pattern: String,

    /// Variables that must be referenced through `configuration.`.
    /// Rewrites are applied in this order.
    #[serde(default = "defaults::fix::variables")]
    #[educe(Default = defaults::fix::variables())]
    pub variables: Vec<String>,
}
