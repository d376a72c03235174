//! Marshaller options and the [`Marshaller`] entry point that carries them.
//!
//! Options are layered with `figment`: built-in defaults, then an optional
//! TOML file, then `CDN_STATE_`-prefixed environment variables.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::descriptor::Record;
use crate::error::{MarshalError, OptionsError};
use crate::value::Map;

/// Prefix of the environment variables read by [`MarshalOptions::load`].
pub const ENV_PREFIX: &str = "CDN_STATE_";

/// Default name of the ordering attribute on weighted list elements.
pub const DEFAULT_WEIGHT_KEY: &str = "weight";

/// Tunables for extraction and ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarshalOptions {
    /// Element key carrying the position of a weighted list element.
    pub weight_key: String,
    /// Reject element keys that no field is tagged with.
    pub deny_unknown_keys: bool,
}

impl Default for MarshalOptions {
    fn default() -> Self {
        Self {
            weight_key: DEFAULT_WEIGHT_KEY.to_owned(),
            deny_unknown_keys: false,
        }
    }
}

impl MarshalOptions {
    /// Builds the figment used by the loaders: defaults merged with `file`
    /// (when given) and then the environment.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Loads options from defaults and `CDN_STATE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Load`] when a variable cannot be parsed.
    pub fn load() -> Result<Self, OptionsError> {
        Ok(Self::figment(None).extract()?)
    }

    /// Loads options from defaults, the TOML file at `path` and then the
    /// environment. A missing file is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Load`] when the file or a variable cannot be
    /// parsed.
    pub fn load_from(path: &Path) -> Result<Self, OptionsError> {
        Ok(Self::figment(Some(path)).extract()?)
    }
}

/// Extractor and ingestor bound to a set of [`MarshalOptions`].
///
/// The free functions [`crate::extract()`] and [`crate::ingest()`] use
/// `Marshaller::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Marshaller {
    options: MarshalOptions,
}

impl Marshaller {
    /// Creates a marshaller with the given options.
    #[must_use]
    pub const fn new(options: MarshalOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    #[must_use]
    pub const fn options(&self) -> &MarshalOptions {
        &self.options
    }

    /// Renders `record` as the grouped external map. Never fails.
    #[must_use]
    pub fn extract<R: Record + ?Sized>(&self, record: &R) -> Map {
        crate::extract::extract_with(record, &self.options)
    }

    /// Populates `record` from `map`.
    ///
    /// # Errors
    ///
    /// Returns the first [`MarshalError`] met; see [`crate::ingest()`].
    pub fn ingest<R: Record + ?Sized>(
        &self,
        record: &mut R,
        map: &Map,
    ) -> Result<(), MarshalError> {
        crate::ingest::ingest_with(record, map, &self.options)
    }
}
