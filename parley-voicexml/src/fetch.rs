//! Resource fetch settings for referenced media.

use parley_protocol::DurationMs;
use serde::{Deserialize, Serialize};

/// When the interpreter may fetch a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FetchHint {
    /// Fetch as soon as the document is loaded.
    Prefetch,
    /// Fetch only when the resource is needed.
    Safe,
}

/// Overrides for how the interpreter fetches a resource. Unset fields keep
/// the interpreter's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceFetchConfiguration {
    /// Prefetch or fetch on demand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_hint: Option<FetchHint>,
    /// Give up on the fetch after this long.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_timeout: Option<DurationMs>,
    /// Maximum acceptable age of a cached copy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<DurationMs>,
    /// Maximum acceptable staleness of an expired cached copy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_stale: Option<DurationMs>,
}

impl ResourceFetchConfiguration {
    /// Set the fetch hint.
    pub fn with_fetch_hint(mut self, hint: FetchHint) -> Self {
        self.fetch_hint = Some(hint);
        self
    }

    /// Set the fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: impl Into<DurationMs>) -> Self {
        self.fetch_timeout = Some(timeout.into());
        self
    }

    /// Set the maximum cache age.
    pub fn with_max_age(mut self, age: impl Into<DurationMs>) -> Self {
        self.max_age = Some(age.into());
        self
    }

    /// Set the maximum cache staleness.
    pub fn with_max_stale(mut self, stale: impl Into<DurationMs>) -> Self {
        self.max_stale = Some(stale.into());
        self
    }
}
