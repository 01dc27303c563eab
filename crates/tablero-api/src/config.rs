//! Configuration management for the tablero webhook gateway.

use std::{net::SocketAddr, path::Path, time::Duration};

use anyhow::{Context, Result};
use chrono::Utc;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tablero_core::models::{ModulesConfig, Project, ProjectId};

const CONFIG_FILE: &str = "tablero.toml";

/// Service configuration with defaults, file, and environment overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables `TABLERO_*` (highest priority)
/// 2. Configuration file (`tablero.toml`)
/// 3. Built-in defaults (lowest priority)
///
/// The service works out of the box; create `tablero.toml` or set
/// environment variables for deployment-specific overrides.
///
/// # Example
///
/// ```no_run
/// use tablero_api::Config;
///
/// let config = Config::load().expect("Failed to load configuration");
/// println!("Server will bind to {}:{}", config.host, config.port);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address.
    ///
    /// Environment variable: `TABLERO_HOST`
    #[serde(default = "default_host")]
    pub host: String,

    /// Server bind port.
    ///
    /// Environment variable: `TABLERO_PORT`
    #[serde(default = "default_port")]
    pub port: u16,

    /// HTTP request timeout in seconds.
    ///
    /// Environment variable: `TABLERO_REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Optional TOML file of project records to seed the in-process store
    /// with. Absent when the gateway is embedded next to a real store.
    ///
    /// Environment variable: `TABLERO_PROJECTS_FILE`
    #[serde(default)]
    pub projects_file: Option<std::path::PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8080
}

const fn default_request_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            projects_file: None,
        }
    }
}

impl Config {
    /// Loads configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error when a source is present but malformed, e.g. an
    /// unparsable `tablero.toml` or a non-numeric `TABLERO_PORT`.
    pub fn load() -> Result<Self> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed("TABLERO_"))
            .extract()
            .context("failed to load configuration")
    }

    /// The socket address to bind the server to.
    ///
    /// # Errors
    ///
    /// Returns an error when host and port do not form a valid address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }

    /// The request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// One project record in a seed file.
#[derive(Debug, Deserialize)]
struct SeedProject {
    id: i64,
    name: String,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    modules: Option<Map<String, Value>>,
}

/// Top-level structure of a project seed file.
#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    projects: Vec<SeedProject>,
}

impl SeedProject {
    fn into_project(self) -> Project {
        let slug = self
            .slug
            .unwrap_or_else(|| self.name.to_lowercase().replace(' ', "-"));

        Project {
            id: ProjectId(self.id),
            name: self.name,
            slug,
            created_at: Utc::now(),
            modules_config: self.modules.map(|config| ModulesConfig { config: Some(config) }),
        }
    }
}

/// Loads project records from a TOML seed file.
///
/// Seed files hold a `[[projects]]` array; each entry carries the numeric
/// id, a name, an optional slug, and optional per-integration modules:
///
/// ```toml
/// [[projects]]
/// id = 1
/// name = "Backend"
///
/// [projects.modules.gitlab]
/// secret = "s3cr3t"
/// ```
///
/// # Errors
///
/// Returns an error when the file is missing or not valid TOML.
pub fn load_projects(path: &Path) -> Result<Vec<Project>> {
    let seed: SeedFile = Figment::new()
        .merge(Toml::file_exact(path))
        .extract()
        .with_context(|| format!("failed to load projects file {}", path.display()))?;

    Ok(seed.projects.into_iter().map(SeedProject::into_project).collect())
}
