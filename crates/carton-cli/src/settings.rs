//! Persisted settings: concepts, scan options and HTTP tunables.
//!
//! Serialized to TOML and stored in the user's config directory unless a
//! path is given on the command line.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use carton_ingest::{DEFAULT_CACHE_TTL, DEFAULT_TIMEOUT, DataSource};
use carton_pallet::SessionOptions;

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scan session options.
    pub scan: SessionOptions,

    /// HTTP source options.
    pub http: HttpSettings,

    /// Configured concepts keyed by short name.
    pub concepts: BTreeMap<String, ConceptSettings>,
}

/// HTTP client and cache settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    pub cache_ttl_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            cache_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// A retail concept and where its packing list lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptSettings {
    /// Display name; defaults to the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub source: DataSource,
}

/// The packing list a command will read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    /// Concept display name, or "ad hoc" for `--source`.
    pub concept: String,
    pub source: DataSource,
}

impl Settings {
    /// Load settings from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::config_path();
                if path.is_file() {
                    Self::load_from(&path)
                } else {
                    debug!(path = %path.display(), "no settings file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read settings: {}", path.display()))?;
        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("parse settings: {}", path.display()))?;
        debug!(
            path = %path.display(),
            concepts = settings.concepts.len(),
            "settings loaded"
        );
        Ok(settings)
    }

    /// Get the default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "CartonSegregator", "carton-segregator")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }

    /// Pick the packing list source for a command.
    ///
    /// `--source` wins, then `--concept`, then the only configured concept.
    pub fn resolve_source(
        &self,
        concept: Option<&str>,
        source_override: Option<&str>,
    ) -> Result<ResolvedSource> {
        if let Some(raw) = source_override {
            return Ok(ResolvedSource {
                concept: "ad hoc".to_string(),
                source: DataSource::parse(raw),
            });
        }
        let (key, settings) = match concept {
            Some(name) => self
                .concepts
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name.trim()))
                .with_context(|| format!("unknown concept '{name}'"))?,
            None => match self.concepts.len() {
                0 => bail!(
                    "no packing list configured: pass --source or add a [concepts.<name>] section to {}",
                    Self::config_path().display()
                ),
                1 => self
                    .concepts
                    .iter()
                    .next()
                    .context("no concept configured")?,
                _ => bail!(
                    "several concepts configured ({}); pick one with --concept",
                    self.concepts.keys().cloned().collect::<Vec<_>>().join(", ")
                ),
            },
        };
        Ok(ResolvedSource {
            concept: settings.label.clone().unwrap_or_else(|| key.clone()),
            source: settings.source.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carton_ingest::HttpAuth;
    use carton_pallet::GroupOrder;

    const SAMPLE: &str = r#"
[scan]
recent_limit = 5
group_order = "sorted"

[http]
timeout_secs = 10

[concepts.max]
label = "Max"
source = { kind = "file", path = "/mnt/share/max.csv" }

[concepts.babyshop]
source = { kind = "http", url = "https://docs.example.com/babyshop.csv", auth = { kind = "basic", username = "svc", password_env = "BABYSHOP_PASSWORD" } }
"#;

    #[test]
    fn parses_concepts_and_options() {
        let settings: Settings = toml::from_str(SAMPLE).unwrap();
        assert_eq!(settings.scan.recent_limit, 5);
        assert_eq!(settings.scan.history_capacity, 200);
        assert_eq!(settings.scan.group_order, GroupOrder::Sorted);
        assert_eq!(settings.http.timeout_secs, 10);
        assert_eq!(settings.http.cache_ttl_secs, 300);
        assert_eq!(settings.concepts.len(), 2);
        match &settings.concepts["babyshop"].source {
            DataSource::Http { auth, .. } => assert_eq!(
                auth,
                &HttpAuth::Basic {
                    username: "svc".to_string(),
                    password_env: "BABYSHOP_PASSWORD".to_string()
                }
            ),
            other => panic!("unexpected source {other:?}"),
        }
    }

    #[test]
    fn resolve_prefers_override_then_concept() {
        let settings: Settings = toml::from_str(SAMPLE).unwrap();

        let adhoc = settings
            .resolve_source(Some("max"), Some("/tmp/list.csv"))
            .unwrap();
        assert_eq!(adhoc.concept, "ad hoc");

        let max = settings.resolve_source(Some("MAX"), None).unwrap();
        assert_eq!(max.concept, "Max");

        let babyshop = settings.resolve_source(Some("babyshop"), None).unwrap();
        assert_eq!(babyshop.concept, "babyshop");
        assert!(babyshop.source.is_remote());
    }

    #[test]
    fn resolve_requires_choice_when_ambiguous() {
        let settings: Settings = toml::from_str(SAMPLE).unwrap();
        assert!(settings.resolve_source(None, None).is_err());
        assert!(settings.resolve_source(Some("nope"), None).is_err());
        assert!(Settings::default().resolve_source(None, None).is_err());
    }
}
