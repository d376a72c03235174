//! CDN scope configuration.
//!
//! [`Configuration`] is the root record exchanged with the state store. Its
//! blocks are spread over three groups:
//!
//! | Group | Blocks |
//! |---|---|
//! | `delivery` | compression, headers, methods, cache control, logging |
//! | `origin` | origin hosts, pull policy, protocol and connection settings |
//! | `modification` | request and response rewrite rules |
//!
//! Every type also serialises to the CDN API's camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::Record;

mod delivery;
mod modifications;
mod origin;

pub use delivery::{
    AccessLogs, CacheControl, CacheKeyModification, Compression, ContentDispositionByHeader,
    HttpMethods, ResponseHeader, StaticHeader,
};
pub use modifications::Modification;
pub use origin::{
    FileSegmentation, GzipOriginPull, OriginPersistentConnections, OriginPull,
    OriginPullCacheExtension, OriginPullHost, OriginPullLogs, OriginPullPolicy, OriginPullProtocol,
};

/// One year, the baseline cache lifetime.
const ONE_YEAR_SECONDS: i64 = 31_536_000;

/// A hostname attached to a scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hostname {
    /// Fully qualified domain name.
    pub domain: String,
}

/// The delivery scope a configuration belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Scope {
    /// Scope ID.
    pub id: i64,
    /// Delivery platform.
    pub platform: String,
    /// Path the scope covers.
    pub path: String,
}

/// Configuration of one CDN scope.
///
/// `hostname` and `scope` identify the scope in API payloads and are not
/// part of the state map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(crate = "crate")]
pub struct Configuration {
    /// Hostnames served by the scope.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hostname: Vec<Hostname>,
    /// Scope identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,

    /// Gzip compression.
    #[record(group = "delivery", block = "compression")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<Compression>,
    /// Headers added to requests and responses, in order.
    #[record(group = "delivery", block = "static_header", weighted)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub static_header: Vec<StaticHeader>,
    /// Methods passed through to the origin.
    #[record(group = "delivery", block = "http_methods")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_methods: Option<HttpMethods>,
    /// Response header behaviour.
    #[record(group = "delivery", block = "response_header")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_header: Option<ResponseHeader>,
    /// `Content-Disposition` rules, in order.
    #[record(group = "delivery", block = "content_disposition_by_header", weighted)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content_disposition_by_header: Vec<ContentDispositionByHeader>,
    /// Client cache rules, in order.
    #[record(group = "delivery", block = "cache_control", weighted)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cache_control: Vec<CacheControl>,
    /// Cache key normalisation.
    #[record(group = "delivery", block = "cache_key_modification")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_key_modification: Option<CacheKeyModification>,
    /// Access logging.
    #[record(group = "delivery", block = "access_logs")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_logs: Option<AccessLogs>,

    /// Origins.
    #[record(group = "origin", block = "origin_pull_host")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_pull_host: Option<OriginPullHost>,
    /// Origin cache policies, in order.
    #[record(group = "origin", block = "origin_pull_policy", weighted)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub origin_pull_policy: Vec<OriginPullPolicy>,
    /// Stale content serving.
    #[record(group = "origin", block = "origin_pull_cache_extension")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_pull_cache_extension: Option<OriginPullCacheExtension>,
    /// Protocol used to reach the origin.
    #[record(group = "origin", block = "origin_pull_protocol")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_pull_protocol: Option<OriginPullProtocol>,
    /// Origin pull logging.
    #[record(group = "origin", block = "origin_pull_logs")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_pull_logs: Option<OriginPullLogs>,
    /// Gzip from the origin.
    #[record(group = "origin", block = "gzip_origin_pull")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gzip_origin_pull: Option<GzipOriginPull>,
    /// Origin keep-alive.
    #[record(group = "origin", block = "origin_persistent_connections")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_persistent_connections: Option<OriginPersistentConnections>,
    /// Segmented origin pulls.
    #[record(group = "origin", block = "file_segmentation")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_segmentation: Option<FileSegmentation>,
    /// Redirect handling.
    #[record(group = "origin", block = "origin_pull")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_pull: Option<OriginPull>,

    /// Rewrites applied to requests sent to the origin.
    #[record(group = "modification", block = "origin_request_modification", weighted)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub origin_request_modification: Vec<Modification>,
    /// Rewrites applied to origin responses.
    #[record(group = "modification", block = "origin_response_modification", weighted)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub origin_response_modification: Vec<Modification>,
    /// Rewrites applied to client requests.
    #[record(group = "modification", block = "client_request_modification", weighted)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub client_request_modification: Vec<Modification>,
    /// Rewrites applied to client responses.
    #[record(group = "modification", block = "client_response_modification", weighted)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub client_response_modification: Vec<Modification>,
}

impl Configuration {
    /// Baseline configuration new scopes start from.
    #[must_use]
    pub fn baseline() -> Self {
        Self {
            compression: Some(Compression {
                gzip: "txt,js,htm,html,css".to_owned(),
                mime: "test/*".to_owned(),
                ..Compression::default()
            }),
            static_header: vec![StaticHeader {
                http: "Access-Control-Allow-Origin: *".to_owned(),
                origin_pull: "Host: %client.request.host%".to_owned(),
                ..StaticHeader::default()
            }],
            http_methods: Some(HttpMethods {
                pass_thru: "*".to_owned(),
                ..HttpMethods::default()
            }),
            cache_control: vec![CacheControl {
                max_age: ONE_YEAR_SECONDS,
                synchronize_max_age: true,
                ..CacheControl::default()
            }],
            cache_key_modification: Some(CacheKeyModification {
                normalize_key_path_to_lower_case: true,
            }),
            access_logs: Some(AccessLogs { enabled: true }),
            origin_pull_host: Some(OriginPullHost::default()),
            origin_pull_policy: vec![OriginPullPolicy {
                expire_policy: "CACHE_CONTROL".to_owned(),
                expire_seconds: Some(ONE_YEAR_SECONDS),
                honor_must_revalidate: true,
                honor_no_cache: true,
                honor_private: true,
                honor_smax_age: true,
                http_headers: "*".to_owned(),
                must_revalidate_to_no_cache: true,
                no_cache_behavior: "spec".to_owned(),
                update_http_headers_on_304_response: true,
                ..OriginPullPolicy::default()
            }],
            origin_pull_protocol: Some(OriginPullProtocol {
                protocol: "https".to_owned(),
            }),
            origin_pull_logs: Some(OriginPullLogs { enabled: true }),
            gzip_origin_pull: Some(GzipOriginPull { enabled: true }),
            origin_persistent_connections: Some(OriginPersistentConnections { enabled: false }),
            file_segmentation: Some(FileSegmentation { enabled: true }),
            origin_pull: Some(OriginPull {
                redirect_action: "proxy".to_owned(),
            }),
            ..Self::default()
        }
    }
}

/// Serde adapter for optional integers the API encodes as strings.
mod int_as_string {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[expect(
        clippy::ref_option,
        reason = "serde `with` adapters receive the field by reference"
    )]
    pub(super) fn serialize<S: Serializer>(
        value: &Option<i64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(number) => serializer.collect_str(number),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<i64>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|text| text.parse().map_err(D::Error::custom))
            .transpose()
    }
}
