//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `GRIFFIN_DATA_DIR` - Directory holding the persisted records (default: .griffin)
//! - `GRIFFIN_CATALOG_MODE` - `replace` or `augment` (default: replace)
//! - `GRIFFIN_BLOCKED_KEYWORDS` - Comma-separated remote title keywords to hide
//! - `GRIFFIN_CHECKOUT_DELAY_MS` - Simulated checkout processing time (default: 1000)
//! - `GRIFFIN_CATALOG_TTL_SECS` - Freshness window for the resolved catalog (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//!
//! Remote catalog credentials are not read from the environment; they are
//! entered by the operator and persisted with the other records.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::catalog::{CatalogPolicy, MergeMode};

const DEFAULT_DATA_DIR: &str = ".griffin";
const DEFAULT_CHECKOUT_DELAY_MS: &str = "1000";
const DEFAULT_CATALOG_TTL_SECS: &str = "300";

/// Minimum Shannon entropy expected of a real API credential.
pub(crate) const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding one JSON file per persisted record
    pub data_dir: PathBuf,
    /// How remote products combine with local ones
    pub catalog: CatalogPolicy,
    /// Simulated checkout processing time
    pub checkout_delay: Duration,
    /// How long a resolved remote catalog stays fresh
    pub catalog_ttl: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog: CatalogPolicy::default(),
            checkout_delay: Duration::from_secs(1),
            catalog_ttl: Duration::from_secs(300),
            sentry_dsn: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("GRIFFIN_DATA_DIR", DEFAULT_DATA_DIR));
        let mode = parse_merge_mode(&get_env_or_default("GRIFFIN_CATALOG_MODE", "replace"))?;
        let blocked_keywords = get_optional_env("GRIFFIN_BLOCKED_KEYWORDS")
            .map(|raw| parse_keyword_list(&raw))
            .unwrap_or_default();
        let checkout_delay = Duration::from_millis(parse_u64(
            "GRIFFIN_CHECKOUT_DELAY_MS",
            &get_env_or_default("GRIFFIN_CHECKOUT_DELAY_MS", DEFAULT_CHECKOUT_DELAY_MS),
        )?);
        let catalog_ttl = Duration::from_secs(parse_u64(
            "GRIFFIN_CATALOG_TTL_SECS",
            &get_env_or_default("GRIFFIN_CATALOG_TTL_SECS", DEFAULT_CATALOG_TTL_SECS),
        )?);
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            data_dir,
            catalog: CatalogPolicy::new(mode, blocked_keywords),
            checkout_delay,
            catalog_ttl,
            sentry_dsn,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Blank values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_merge_mode(raw: &str) -> Result<MergeMode, ConfigError> {
    raw.parse::<MergeMode>()
        .map_err(|e| ConfigError::InvalidEnvVar("GRIFFIN_CATALOG_MODE".to_string(), e.to_string()))
}

fn parse_u64(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// The first placeholder pattern found in `value`, if any.
pub(crate) fn placeholder_pattern(value: &str) -> Option<&'static str> {
    let lower = value.to_lowercase();
    PLACEHOLDER_PATTERNS
        .iter()
        .find(|pattern| lower.contains(*pattern))
        .copied()
}

/// Calculate Shannon entropy in bits per character.
pub(crate) fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}
