//! Request and response modification rules.

use serde::{Deserialize, Serialize};

use crate::Record;

/// One rewrite rule. The same shape serves all four modification blocks
/// (origin request, origin response, client request, client response).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(crate = "crate")]
pub struct Modification {
    /// Whether the rule applies.
    #[record(key = "enabled")]
    pub enabled: bool,
    /// Headers to add.
    #[record(key = "add_headers")]
    pub add_headers: String,
    /// Flow control directive.
    #[record(key = "flow_control")]
    pub flow_control: String,
    /// URL pattern to match.
    #[record(key = "url_pattern")]
    pub url_pattern: String,
    /// Replacement for a matched URL.
    #[record(key = "url_rewrite")]
    pub url_rewrite: String,
    /// Header pattern to match.
    #[record(key = "header_pattern")]
    pub header_pattern: String,
    /// Replacement for a matched header.
    #[record(key = "header_rewrite")]
    pub header_rewrite: String,
}
