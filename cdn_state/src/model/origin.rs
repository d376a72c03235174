//! Origin blocks: where content is pulled from and how it is cached.

use serde::{Deserialize, Serialize};

use crate::Record;

/// Origins serving a scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(crate = "crate")]
pub struct OriginPullHost {
    /// Primary origin ID.
    #[record(key = "primary")]
    pub primary: u32,
    /// Secondary origin ID, zero when unset.
    #[record(key = "secondary")]
    pub secondary: u32,
    /// Path prefix added to origin requests.
    #[record(key = "path")]
    pub path: String,
}

/// Origin cache policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(crate = "crate")]
pub struct OriginPullPolicy {
    /// Whether the policy applies.
    #[record(key = "enabled")]
    pub enabled: bool,
    /// One of `CACHE_CONTROL`, `INGEST`, `LAST_MODIFY`, `NEVER_EXPIRE` or
    /// `DO_NOT_CACHE`.
    #[record(key = "expire_policy")]
    pub expire_policy: String,
    /// Cache lifetime in seconds. Zero is meaningful, hence the `Option`.
    #[record(key = "expire_seconds")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_seconds: Option<i64>,
    /// Skip the cache entirely.
    #[record(key = "force_bypass_cache")]
    pub force_bypass_cache: bool,
    /// Honour `must-revalidate` from the origin.
    #[record(key = "honor_must_revalidate")]
    pub honor_must_revalidate: bool,
    /// Honour `no-cache` from the origin.
    #[record(key = "honor_no_cache")]
    pub honor_no_cache: bool,
    /// Honour `no-store` from the origin.
    #[record(key = "honor_no_store")]
    pub honor_no_store: bool,
    /// Honour `private` from the origin.
    #[record(key = "honor_private")]
    pub honor_private: bool,
    /// Honour `s-maxage` from the origin.
    #[record(key = "honor_smax_age")]
    #[serde(rename = "honorSMaxAge")]
    pub honor_smax_age: bool,
    /// Comma-separated headers cached with the object.
    #[record(key = "http_headers")]
    pub http_headers: String,
    /// Treat `must-revalidate` as `no-cache`.
    #[record(key = "must_revalidate_to_no_cache")]
    pub must_revalidate_to_no_cache: bool,
    /// Behaviour on `no-cache`.
    #[record(key = "no_cache_behavior")]
    pub no_cache_behavior: String,
    /// Refresh cached headers on `304 Not Modified`.
    #[record(key = "update_http_headers_on_304_response")]
    pub update_http_headers_on_304_response: bool,
    /// Behaviour when `Cache-Control` is missing.
    #[record(key = "default_cache_behavior")]
    pub default_cache_behavior: String,
    /// Treat `max-age=0` as `no-cache`.
    #[record(key = "max_age_zero_to_no_cache")]
    pub max_age_zero_to_no_cache: bool,
    /// Request identifier that bypasses the cache.
    #[record(key = "bypass_cache_identifier")]
    pub bypass_cache_identifier: String,
    /// Comma-separated content types the policy applies to.
    #[record(key = "content_type_filter")]
    pub content_type_filter: String,
    /// Comma-separated request headers the policy applies to.
    #[record(key = "header_filter")]
    pub header_filter: String,
    /// Comma-separated HTTP methods the policy applies to.
    #[record(key = "method_filter")]
    pub method_filter: String,
    /// Comma-separated path patterns the policy applies to.
    #[record(key = "path_filter")]
    pub path_filter: String,
    /// Comma-separated origin status codes the policy applies to.
    #[record(key = "status_code_match")]
    pub status_code_match: String,
}

/// Serve stale content past its lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(crate = "crate")]
pub struct OriginPullCacheExtension {
    /// Whether stale content may be served.
    #[record(key = "enabled")]
    pub enabled: bool,
    /// Seconds an expired object may still be served.
    #[record(key = "expired_cache_extension")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_cache_extension: Option<i64>,
    /// Seconds an object may be served while the origin is unreachable.
    #[record(key = "origin_unreachable_cache_extension")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_unreachable_cache_extension: Option<i64>,
}

/// Protocol used to reach the origin: `http`, `https` or `match`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(crate = "crate")]
pub struct OriginPullProtocol {
    /// Protocol name.
    #[record(key = "protocol")]
    pub protocol: String,
}

/// Origin pull log collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(crate = "crate")]
pub struct OriginPullLogs {
    /// Whether origin pull logs are collected.
    #[record(key = "enabled")]
    pub enabled: bool,
}

/// Request gzip-encoded content from the origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(crate = "crate")]
pub struct GzipOriginPull {
    /// Whether gzip is requested.
    #[record(key = "enabled")]
    pub enabled: bool,
}

/// Keep-alive connections to the origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(crate = "crate")]
pub struct OriginPersistentConnections {
    /// Whether connections are reused.
    #[record(key = "enabled")]
    pub enabled: bool,
}

/// Pull large files from the origin in segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(crate = "crate")]
pub struct FileSegmentation {
    /// Whether segmentation is used.
    #[record(key = "enabled")]
    pub enabled: bool,
}

/// How origin redirects are handled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(crate = "crate")]
pub struct OriginPull {
    /// `proxy` follows redirects at the edge; `follow` passes them on.
    #[record(key = "redirect_action")]
    pub redirect_action: String,
}
