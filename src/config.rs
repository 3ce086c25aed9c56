use crate::domain::features::DEFAULT_CURRENT_YEAR;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    /// Reference year for the age derivation. Deliberately a config
    /// value (default 2025) instead of the system clock, so identical
    /// requests keep producing identical features.
    pub current_year: i32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("Failed to parse PORT")?;

        let model_path = PathBuf::from(
            env::var("MODEL_PATH").unwrap_or_else(|_| "models/model.json".to_string()),
        );

        let current_year = env::var("CURRENT_YEAR")
            .unwrap_or_else(|_| DEFAULT_CURRENT_YEAR.to_string())
            .parse::<i32>()
            .context("Failed to parse CURRENT_YEAR")?;

        Ok(Self {
            host,
            port,
            model_path,
            current_year,
        })
    }
}
