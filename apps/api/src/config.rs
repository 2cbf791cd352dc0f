use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::personality::predictor::TrainingParams;

/// Application configuration loaded from environment variables.
/// Every variable has a default; unparseable values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub dataset_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
    pub max_features: usize,
    pub n_trees: usize,
    pub random_seed: u64,
    pub test_size: f64,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            dataset_path: std::env::var("DATASET_PATH")
                .unwrap_or_else(|_| "cv_data.csv".to_string())
                .into(),
            port: env_or("PORT", 5000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_features: env_or("TFIDF_MAX_FEATURES", 500)?,
            n_trees: env_or("FOREST_TREES", 200)?,
            random_seed: env_or("RANDOM_SEED", 42)?,
            test_size: env_or("TEST_SIZE", 0.2)?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            bail!("TEST_SIZE must be between 0 and 1 (exclusive), got {}", self.test_size);
        }
        if self.n_trees == 0 {
            bail!("FOREST_TREES must be at least 1");
        }
        if self.max_features == 0 {
            bail!("TFIDF_MAX_FEATURES must be at least 1");
        }
        Ok(())
    }

    pub fn training_params(&self) -> TrainingParams {
        TrainingParams {
            max_features: self.max_features,
            n_trees: self.n_trees,
            test_size: self.test_size,
            seed: self.random_seed,
        }
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            dataset_path: "cv_data.csv".into(),
            port: 5000,
            rust_log: "info".to_string(),
            max_features: 500,
            n_trees: 200,
            random_seed: 42,
            test_size: 0.2,
            max_upload_bytes: 1024,
        }
    }

    #[test]
    fn test_env_or_defaults_when_unset() {
        let value: u16 = env_or("RESUME_TRAITS_TEST_UNSET_VAR", 1234).unwrap();
        assert_eq!(value, 1234);
    }

    #[test]
    fn test_validate_rejects_bad_test_size() {
        let mut config = base();
        assert!(config.validate().is_ok());
        config.test_size = 1.0;
        assert!(config.validate().is_err());
        config.test_size = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_trees_and_features() {
        let mut config = base();
        config.n_trees = 0;
        assert!(config.validate().is_err());

        let mut config = base();
        config.max_features = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_training_params_follow_config() {
        let params = base().training_params();
        assert_eq!(params.max_features, 500);
        assert_eq!(params.n_trees, 200);
        assert_eq!(params.seed, 42);
        assert!((params.test_size - 0.2).abs() < f64::EPSILON);
    }
}
