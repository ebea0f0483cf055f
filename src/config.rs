//! Configuration management for DagBok.
//!
//! Loads configuration from environment variables (with `.env` support)
//! and keeps a single global instance for the lifetime of the process.

use std::env;
use std::sync::OnceLock;

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Initialize configuration (call once at startup)
pub fn init() -> &'static Config {
    config()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

/// Settings for the external summarization API (OpenAI-compatible).
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    /// Absent credential means summary generation is unavailable;
    /// everything else keeps working.
    pub api_key: Option<String>,
    pub max_tokens: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server: ServerConfig {
                host: env_or("HOST", "0.0.0.0"),
                port: env_or("PORT", "8090").parse().expect("Invalid PORT"),
            },
            database: DatabaseConfig {
                path: env_or("DATABASE_PATH", "./data/dagbok.db"),
            },
            llm: LlmConfig {
                base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
                model: env_or("OPENAI_MODEL", "gpt-3.5-turbo"),
                api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
                max_tokens: env_or("SUMMARY_MAX_TOKENS", "512").parse().unwrap_or(512),
            },
        }
    }
}

/// Get an environment variable or a default value.
fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
