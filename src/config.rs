//! Configuration loading for docsortd and docsort.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.docsort/config.toml` (user)
//! 3. `/etc/docsort/config.toml` (system)
//!
//! Every field has a default, so an empty file is a valid configuration.
//!
//! Secrets are loaded separately with mandatory permission checks:
//! 1. `~/.docsort/secrets.toml` (user, must be 0600)
//! 2. `/etc/docsort/secrets.toml` (system, must be 0600)
//! 3. `HF_API_KEY` environment variable

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::cache::CacheConfig;
use crate::engine::{
    DEFAULT_CHUNK_OVERLAP, DEFAULT_LOW_CONFIDENCE_THRESHOLD, DEFAULT_MAX_CHUNK_SIZE,
    EngineConfig,
};
use crate::providers::huggingface::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::providers::{
    CachingClassifyProvider, ClassifyProvider, HuggingFaceClient, RetryConfig,
    RetryingClassifyProvider,
};
use crate::types::CategorySet;
use crate::{DecisionEngine, DocsortError, Result};

/// Environment variable consulted when no secrets file carries a key.
pub const HF_API_KEY_ENV: &str = "HF_API_KEY";

/// Full configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub huggingface: HuggingFaceConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    /// Response caching is off unless a `[cache]` section is present.
    #[serde(default)]
    pub cache: Option<CacheConfig>,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// HTTP daemon settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8000).
    #[serde(default = "default_address")]
    pub address: String,
    /// Origins allowed by CORS.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    /// Upload body limit in bytes (default: 20 MiB).
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            cors_origins: default_cors_origins(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}

/// Category set and chunking parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default = "default_fallback")]
    pub fallback: String,
    #[serde(default = "default_max_chunk_size")]
    pub max_chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
    #[serde(default = "default_threshold")]
    pub low_confidence_threshold: f32,
    #[serde(default = "default_max_concurrent_chunks")]
    pub max_concurrent_chunks: usize,
    /// Per-chunk oracle timeout; unset means no limit beyond the HTTP
    /// client's own.
    #[serde(default)]
    pub chunk_timeout_secs: Option<u64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            fallback: default_fallback(),
            max_chunk_size: default_max_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            low_confidence_threshold: default_threshold(),
            max_concurrent_chunks: default_max_concurrent_chunks(),
            chunk_timeout_secs: None,
        }
    }
}

fn default_categories() -> Vec<String> {
    [
        "Technical Documentation",
        "Business Proposal",
        "Legal Document",
        "Academic Paper",
        "General Article",
        "Other",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_fallback() -> String {
    "Other".to_string()
}

fn default_max_chunk_size() -> usize {
    DEFAULT_MAX_CHUNK_SIZE
}

fn default_chunk_overlap() -> usize {
    DEFAULT_CHUNK_OVERLAP
}

fn default_threshold() -> f32 {
    DEFAULT_LOW_CONFIDENCE_THRESHOLD
}

fn default_max_concurrent_chunks() -> usize {
    4
}

/// HuggingFace Inference API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HuggingFaceConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Document store settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// SQLite URL (default: `sqlite://documents.db`).
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://documents.db".to_string()
}

/// Secrets configuration (API keys).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    pub huggingface: Option<ApiKeySecret>,
}

/// A single API key secret.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeySecret {
    pub api_key: String,
}

impl Config {
    /// Load configuration from the standard locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_config_path(explicit_path)?;
        let content = fs::read_to_string(&path).map_err(|e| {
            DocsortError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            DocsortError::Configuration(msg) => {
                DocsortError::Configuration(format!("{msg} (in {path:?})"))
            }
            other => other,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            DocsortError::Configuration(format!("Failed to parse config: {e}"))
        })
    }

    fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(path.to_path_buf());
            }
            return Err(DocsortError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".docsort").join("config.toml");
            if user_config.exists() {
                return Ok(user_config);
            }
        }

        let system_config = PathBuf::from("/etc/docsort/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }

        Err(DocsortError::Configuration(
            "No config file found. Create ~/.docsort/config.toml or /etc/docsort/config.toml"
                .to_string(),
        ))
    }

    /// Build and validate the engine settings.
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let c = &self.classifier;
        let categories = CategorySet::new(c.categories.iter().map(String::as_str), &c.fallback)?;

        let mut config = EngineConfig::new(categories)
            .max_chunk_size(c.max_chunk_size)
            .chunk_overlap(c.chunk_overlap)
            .low_confidence_threshold(c.low_confidence_threshold)
            .max_concurrent_chunks(c.max_concurrent_chunks);
        if let Some(secs) = c.chunk_timeout_secs {
            config = config.chunk_timeout(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Build the oracle stack: HuggingFace client, wrapped in retry when
    /// more than one attempt is allowed, wrapped in the cache when enabled.
    pub fn build_provider(&self, secrets: &Secrets) -> Result<Arc<dyn ClassifyProvider>> {
        let api_key = secrets.huggingface_api_key().ok_or_else(|| {
            DocsortError::Configuration(format!(
                "No HuggingFace API key. Set {HF_API_KEY_ENV} or add [huggingface] api_key to secrets.toml"
            ))
        })?;

        let client = HuggingFaceClient::with_base_url(
            api_key,
            &self.huggingface.model,
            &self.huggingface.base_url,
        )?;
        let mut provider: Arc<dyn ClassifyProvider> = Arc::new(client);

        if self.retry.max_attempts > 1 {
            provider = Arc::new(RetryingClassifyProvider::new(provider, self.retry.clone()));
        }
        if let Some(cache) = &self.cache {
            provider = Arc::new(CachingClassifyProvider::new(provider, cache));
        }
        Ok(provider)
    }

    /// Validated engine bound to the configured oracle stack.
    pub fn build_engine(&self, secrets: &Secrets) -> Result<DecisionEngine> {
        DecisionEngine::new(self.engine_config()?, self.build_provider(secrets)?)
    }
}

impl Secrets {
    /// Load secrets from the standard locations with permission checks.
    ///
    /// Returns empty secrets if no file exists (the key may come from the
    /// environment).
    pub fn load() -> Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let user_secrets = home.join(".docsort").join("secrets.toml");
            if user_secrets.exists() {
                return Self::load_from_file(&user_secrets);
            }
        }

        let system_secrets = PathBuf::from("/etc/docsort/secrets.toml");
        if system_secrets.exists() {
            return Self::load_from_file(&system_secrets);
        }

        Ok(Secrets::default())
    }

    /// Load one secrets file, rejecting it when group or other can read it.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::check_permissions(path)?;
        let content = fs::read_to_string(path).map_err(|e| {
            DocsortError::Configuration(format!("Failed to read secrets file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            DocsortError::Configuration(format!("Failed to parse secrets file {path:?}: {e}"))
        })
    }

    #[cfg(unix)]
    fn check_permissions(path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(path).map_err(|e| {
            DocsortError::Configuration(format!("Failed to stat secrets file {path:?}: {e}"))
        })?;

        let mode = metadata.permissions().mode();
        if mode & 0o077 != 0 {
            return Err(DocsortError::Configuration(format!(
                "Secrets file {path:?} has insecure permissions {:o}. Must be 0600 or 0400.",
                mode & 0o777
            )));
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn check_permissions(_path: &Path) -> Result<()> {
        Ok(())
    }

    /// HuggingFace key from the secrets file, else from `HF_API_KEY`.
    pub fn huggingface_api_key(&self) -> Option<String> {
        self.huggingface
            .as_ref()
            .map(|s| s.api_key.clone())
            .or_else(|| std::env::var(HF_API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.server.address, "127.0.0.1:8000");
        assert_eq!(config.server.cors_origins.len(), 2);
        assert_eq!(config.classifier.fallback, "Other");
        assert_eq!(config.classifier.categories.len(), 6);
        assert_eq!(config.huggingface.model, "facebook/bart-large-mnli");
        assert_eq!(config.retry.max_attempts, 3);
        assert!(config.cache.is_none());
        assert_eq!(config.storage.database_url, "sqlite://documents.db");

        let engine = config.engine_config().unwrap();
        assert_eq!(engine.max_chunk_size, 1000);
        assert_eq!(engine.chunk_overlap, 100);
        assert!(engine.chunk_timeout.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [server]
            address = "0.0.0.0:9000"
            cors_origins = ["https://docs.example.com"]
            max_upload_bytes = 1048576

            [classifier]
            categories = ["Invoice", "Contract", "Misc"]
            fallback = "Misc"
            max_chunk_size = 400
            chunk_overlap = 40
            low_confidence_threshold = 0.3
            max_concurrent_chunks = 2
            chunk_timeout_secs = 15

            [huggingface]
            model = "MoritzLaurer/deberta-v3-large-zeroshot-v2.0"
            base_url = "http://localhost:8080"

            [retry]
            max_attempts = 5
            initial_delay_ms = 100
            max_delay_ms = 2000
            jitter = false

            [cache]
            max_entries = 500
            ttl_secs = 60

            [storage]
            database_url = "sqlite::memory:"
        "#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.server.cors_origins, vec!["https://docs.example.com"]);
        assert_eq!(config.server.max_upload_bytes, 1_048_576);
        assert_eq!(config.retry.initial_delay, Duration::from_millis(100));
        assert!(!config.retry.jitter);
        let cache = config.cache.as_ref().unwrap();
        assert_eq!(cache.max_entries, 500);
        assert_eq!(cache.ttl, Duration::from_secs(60));

        let engine = config.engine_config().unwrap();
        assert_eq!(engine.categories.labels(), ["Invoice", "Contract", "Misc"]);
        assert_eq!(engine.categories.fallback(), "Misc");
        assert_eq!(engine.max_concurrent_chunks, 2);
        assert_eq!(engine.chunk_timeout, Some(Duration::from_secs(15)));
        assert!((engine.low_confidence_threshold - 0.3).abs() < 1e-6);
    }

    #[test]
    fn fallback_outside_categories_is_rejected() {
        let toml = r#"
            [classifier]
            categories = ["A", "B"]
            fallback = "Other"
        "#;
        let err = Config::from_toml(toml).unwrap().engine_config().unwrap_err();
        assert!(matches!(err, DocsortError::Configuration(_)));
    }

    #[test]
    fn overlap_not_below_chunk_size_is_rejected() {
        let toml = r#"
            [classifier]
            max_chunk_size = 100
            chunk_overlap = 150
        "#;
        let err = Config::from_toml(toml).unwrap().engine_config().unwrap_err();
        assert!(err.to_string().contains("overlap"));
    }

    #[test]
    fn malformed_toml_is_a_configuration_error() {
        let err = Config::from_toml("[classifier\nmax_chunk_size = ").unwrap_err();
        assert!(matches!(err, DocsortError::Configuration(_)));
    }

    #[test]
    fn config_not_found_returns_error() {
        let err = Config::load(Some(Path::new("/nonexistent/config.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn parse_secrets() {
        let secrets: Secrets = toml::from_str(
            r#"
            [huggingface]
            api_key = "hf_test_key"
        "#,
        )
        .unwrap();
        assert_eq!(secrets.huggingface_api_key(), Some("hf_test_key".to_string()));
    }

    #[test]
    fn build_provider_layers_decorators() {
        let secrets = Secrets {
            huggingface: Some(ApiKeySecret {
                api_key: "hf_test".to_string(),
            }),
        };
        let mut config = Config::default();
        config.cache = Some(CacheConfig::default());
        let provider = config.build_provider(&secrets).unwrap();
        assert_eq!(provider.name(), "huggingface");
    }

    #[cfg(unix)]
    #[test]
    fn world_readable_secrets_are_rejected() {
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[huggingface]\napi_key = \"hf_x\"").unwrap();
        fs::set_permissions(file.path(), fs::Permissions::from_mode(0o644)).unwrap();
        let err = Secrets::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("insecure permissions"));

        fs::set_permissions(file.path(), fs::Permissions::from_mode(0o600)).unwrap();
        let secrets = Secrets::load_from_file(file.path()).unwrap();
        assert_eq!(secrets.huggingface.unwrap().api_key, "hf_x");
    }
}
