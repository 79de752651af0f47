//! Configuration types for a bracket session

use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Environment variable naming the store file
pub const STORE_ENV: &str = "BRACKETS_STORE";

/// Environment variable fixing the RNG seed
pub const SEED_ENV: &str = "BRACKETS_SEED";

/// Store file used when nothing else is configured
pub const DEFAULT_STORE_FILE: &str = "brackets.json";

/// Session configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// JSON file backing the bracket store
    pub store_path: PathBuf,
    /// Seed for unseeded-player draws (None = entropy)
    pub rng_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            rng_seed: None,
        }
    }
}

impl SessionConfig {
    /// Defaults overridden by `BRACKETS_STORE` / `BRACKETS_SEED`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the env keys
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = value(STORE_ENV) {
            config.store_path = PathBuf::from(path);
        }
        if let Some(seed) = value(SEED_ENV) {
            match seed.parse() {
                Ok(seed) => config.rng_seed = Some(seed),
                Err(_) => tracing::warn!("Ignoring {}={:?}: not an unsigned integer", SEED_ENV, seed),
            }
        }
        config
    }

    /// Set store file
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// RNG for seed draws: reproducible when a seed is configured
    pub fn create_rng(&self) -> ChaCha8Rng {
        match self.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::collections::HashMap;

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.store_path, PathBuf::from("brackets.json"));
        assert_eq!(config.rng_seed, None);
    }

    #[test]
    fn test_session_config_builders() {
        let config = SessionConfig::default()
            .with_store_path("/tmp/cups.json")
            .with_seed(9);
        assert_eq!(config.store_path, PathBuf::from("/tmp/cups.json"));
        assert_eq!(config.rng_seed, Some(9));
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> = [(STORE_ENV, " league.json "), (SEED_ENV, "42")].into();
        let config = SessionConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.store_path, PathBuf::from("league.json"));
        assert_eq!(config.rng_seed, Some(42));
    }

    #[test]
    fn test_from_lookup_ignores_blank_and_bad_values() {
        let env: HashMap<&str, &str> = [(STORE_ENV, "  "), (SEED_ENV, "soon")].into();
        let config = SessionConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = SessionConfig::default().with_seed(5);
        let a: u64 = config.create_rng().gen();
        let b: u64 = config.create_rng().gen();
        assert_eq!(a, b);
    }
}
