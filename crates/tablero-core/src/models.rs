//! Project domain models and strongly-typed identifiers.
//!
//! Defines the project record as seen by the webhook gateway together with
//! its per-integration module configuration. Projects are owned by the
//! external project store; this crate only ever reads them.

use std::{fmt, num::ParseIntError, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Strongly-typed project identifier.
///
/// Wraps the tracker's numeric project id to prevent mixing with other
/// integer-valued fields. The webhook endpoint receives it as a query
/// parameter and parses it; anything unparsable is treated as an unknown
/// project rather than a distinct failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub i64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProjectId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for ProjectId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

/// A tracked project as read from the project store.
///
/// Only the fields the webhook pipeline needs are modelled here; the store
/// owns the full record. Immutable from this crate's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier for this project.
    pub id: ProjectId,

    /// Human-readable project name.
    pub name: String,

    /// URL-safe short name.
    pub slug: String,

    /// When this project was created.
    pub created_at: DateTime<Utc>,

    /// Per-integration module configuration, if any integration was ever
    /// configured for this project.
    pub modules_config: Option<ModulesConfig>,
}

/// Per-project integration settings blob.
///
/// Maps an integration name (e.g. `"gitlab"`) to an arbitrary JSON
/// configuration object, e.g. `{"gitlab": {"secret": "..."}}`. Both the
/// record and its payload are optional: a project may have no record at
/// all, or a record whose payload was never filled in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModulesConfig {
    /// The configuration payload, keyed by integration name.
    pub config: Option<Map<String, Value>>,
}

impl ModulesConfig {
    /// Returns the shared secret configured for the given integration.
    ///
    /// Yields `None` when the payload is absent, the integration has no
    /// entry, or the entry carries no string-valued `secret` field. An
    /// empty-string secret is returned as-is; callers decide whether empty
    /// means unconfigured.
    pub fn integration_secret(&self, integration: &str) -> Option<&str> {
        self.config
            .as_ref()?
            .get(integration)?
            .as_object()?
            .get("secret")?
            .as_str()
    }
}
