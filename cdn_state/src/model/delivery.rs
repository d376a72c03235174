//! Delivery blocks: compression, headers, methods, caching and logging.

use serde::{Deserialize, Serialize};

use crate::Record;

/// Gzip compression of responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(crate = "crate")]
pub struct Compression {
    /// Whether compression is applied.
    #[record(key = "enabled")]
    pub enabled: bool,
    /// Comma-separated file extensions to compress.
    #[record(key = "gzip")]
    pub gzip: String,
    /// Compression level; the API carries it as a string.
    #[record(key = "level")]
    #[serde(with = "super::int_as_string", skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    /// MIME pattern to compress.
    #[record(key = "mime")]
    pub mime: String,
}

/// A header added to requests or responses. Order matters, so the block is
/// weighted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(crate = "crate")]
pub struct StaticHeader {
    /// Whether the header is added.
    #[record(key = "enabled")]
    pub enabled: bool,
    /// Header added to the client response.
    #[record(key = "http")]
    pub http: String,
    /// Header added to the origin pull request.
    #[record(key = "origin_pull")]
    pub origin_pull: String,
    /// Header added to the client request.
    #[record(key = "client_request")]
    pub client_request: String,
    /// Comma-separated HTTP methods the header applies to.
    #[record(key = "method_filter")]
    pub method_filter: String,
    /// Comma-separated path patterns the header applies to.
    #[record(key = "path_filter")]
    pub path_filter: String,
    /// Comma-separated request headers the header applies to.
    #[record(key = "header_filter")]
    pub header_filter: String,
    /// Response codes the header applies to.
    #[record(key = "client_response_code_filter")]
    pub client_response_code_filter: String,
}

/// HTTP methods passed through to the origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(crate = "crate")]
pub struct HttpMethods {
    /// Whether the method list is enforced.
    #[record(key = "enabled")]
    pub enabled: bool,
    /// Methods to pass through, `*` for all.
    #[record(key = "passthru")]
    pub pass_thru: String,
}

/// Response header behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(crate = "crate")]
pub struct ResponseHeader {
    /// Whether the block applies.
    #[record(key = "enabled")]
    pub enabled: bool,
    /// Header to add to responses.
    #[record(key = "http")]
    pub http: String,
    /// Whether `ETag` headers are emitted.
    #[record(key = "enable_etag")]
    #[serde(rename = "enableETag")]
    pub enable_etag: bool,
}

/// Sets `Content-Disposition` on origin responses from a request header
/// match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(crate = "crate")]
pub struct ContentDispositionByHeader {
    /// Whether the rule applies.
    #[record(key = "enabled")]
    pub enabled: bool,
    /// Request header inspected.
    #[record(key = "header_field_name")]
    pub header_field_name: String,
    /// Comma-separated patterns matched against the header value.
    #[record(key = "header_value_match")]
    pub header_value_match: String,
    /// `inline` or `attachment`.
    #[record(key = "default_type")]
    pub default_type: String,
    /// Whether the origin's own header is replaced.
    #[record(key = "override_origin_header")]
    pub override_origin_header: bool,
    /// Comma-separated HTTP methods the rule applies to.
    #[record(key = "method_filter")]
    pub method_filter: String,
    /// Comma-separated path patterns the rule applies to.
    #[record(key = "path_filter")]
    pub path_filter: String,
    /// Comma-separated request headers the rule applies to.
    #[record(key = "header_filter")]
    pub header_filter: String,
}

/// Client cache lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(crate = "crate")]
pub struct CacheControl {
    /// Whether the rule applies.
    #[record(key = "enabled")]
    pub enabled: bool,
    /// `max-age` sent to clients, in seconds.
    #[record(key = "max_age")]
    pub max_age: i64,
    /// Whether `Expires` follows `max-age`.
    #[record(key = "synchronize_max_age")]
    pub synchronize_max_age: bool,
    /// Whether the origin's cache headers are overridden.
    #[record(key = "override")]
    #[serde(rename = "override")]
    pub override_origin: bool,
    /// Comma-separated HTTP methods the rule applies to.
    #[record(key = "method_filter")]
    pub method_filter: String,
    /// Comma-separated path patterns the rule applies to.
    #[record(key = "path_filter")]
    pub path_filter: String,
    /// Comma-separated request headers the rule applies to.
    #[record(key = "header_filter")]
    pub header_filter: String,
}

/// Cache key normalisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(crate = "crate")]
pub struct CacheKeyModification {
    /// Lower-case the path before building the cache key.
    #[record(key = "normalize_key_path_to_lower_case")]
    pub normalize_key_path_to_lower_case: bool,
}

/// Access log collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(crate = "crate")]
pub struct AccessLogs {
    /// Whether access logs are collected.
    #[record(key = "enabled")]
    pub enabled: bool,
}
