//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CASE_TIMEOUT_MS, DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_JWT_EXPIRY_HOURS,
    DEFAULT_MAX_CALL_LEVELS, DEFAULT_MAX_OPERATIONS, DEFAULT_MAX_OUTPUT_BYTES,
    DEFAULT_MAX_SOURCE_BYTES, DEFAULT_RUN_TIMEOUT_MS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MAX_SCRIPT_ARRAY_SIZE, MAX_SCRIPT_STRING_SIZE,
};
use crate::grader::ExecutionBudget;

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub grader: GraderConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// Emit JSON log lines instead of the human-readable format
    pub json_logs: bool,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// JWT authentication configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

/// Assignment grader configuration
#[derive(Debug, Clone)]
pub struct GraderConfig {
    pub run_timeout_ms: u64,
    pub case_timeout_ms: u64,
    pub max_operations: u64,
    pub max_call_levels: usize,
    pub max_output_bytes: usize,
    pub max_source_bytes: usize,
    /// Optional JSON file with extra assignment definitions
    pub assignments_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            grader: GraderConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: parse_var("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json_logs: env::var("LOG_FORMAT")
                .map(|format| format.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            cors_origins: env::var("CORS_ORIGIN")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_default(),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS)?,
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
            expiry_hours: parse_var("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS)?,
        })
    }
}

impl GraderConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            run_timeout_ms: parse_var("GRADER_RUN_TIMEOUT_MS", DEFAULT_RUN_TIMEOUT_MS)?,
            case_timeout_ms: parse_var("GRADER_CASE_TIMEOUT_MS", DEFAULT_CASE_TIMEOUT_MS)?,
            max_operations: parse_var("GRADER_MAX_OPERATIONS", DEFAULT_MAX_OPERATIONS)?,
            max_call_levels: parse_var("GRADER_MAX_CALL_LEVELS", DEFAULT_MAX_CALL_LEVELS)?,
            max_output_bytes: parse_var("GRADER_MAX_OUTPUT_BYTES", DEFAULT_MAX_OUTPUT_BYTES)?,
            max_source_bytes: parse_var("GRADER_MAX_SOURCE_BYTES", DEFAULT_MAX_SOURCE_BYTES)?,
            assignments_path: env::var("ASSIGNMENTS_PATH").ok().map(PathBuf::from),
        };

        if config.run_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue("GRADER_RUN_TIMEOUT_MS".to_string()));
        }
        if config.case_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue("GRADER_CASE_TIMEOUT_MS".to_string()));
        }

        Ok(config)
    }

    /// Execution budget handed to the grader
    pub fn budget(&self) -> ExecutionBudget {
        ExecutionBudget {
            run_timeout: Duration::from_millis(self.run_timeout_ms),
            case_timeout: Duration::from_millis(self.case_timeout_ms),
            max_operations: self.max_operations,
            max_call_levels: self.max_call_levels,
            max_string_size: MAX_SCRIPT_STRING_SIZE,
            max_array_size: MAX_SCRIPT_ARRAY_SIZE,
            max_output_bytes: self.max_output_bytes,
        }
    }
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            run_timeout_ms: DEFAULT_RUN_TIMEOUT_MS,
            case_timeout_ms: DEFAULT_CASE_TIMEOUT_MS,
            max_operations: DEFAULT_MAX_OPERATIONS,
            max_call_levels: DEFAULT_MAX_CALL_LEVELS,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            max_source_bytes: DEFAULT_MAX_SOURCE_BYTES,
            assignments_path: None,
        }
    }
}

/// Parse an optional environment variable, falling back to a default
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

/// Split a comma-separated origin list, dropping blanks
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
