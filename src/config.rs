use std::time::Duration;

use crate::errors::CustomError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PROVIDER_URL: &str = "http://127.0.0.1:8545";
const DEFAULT_RPC_TIMEOUT_SECS: u64 = 10;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:8080,http://localhost:5173";

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Endpoint used when a balance query does not name its own provider.
    pub default_provider_url: String,
    pub rpc_timeout: Duration,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, CustomError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, CustomError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|e| CustomError::ConfigError(format!("Failed to parse PORT: {}", e)))?,
            None => DEFAULT_PORT,
        };

        let rpc_timeout_secs = match var("RPC_TIMEOUT_SECS") {
            Some(secs) => secs.trim().parse().map_err(|e| {
                CustomError::ConfigError(format!("Failed to parse RPC_TIMEOUT_SECS: {}", e))
            })?,
            None => DEFAULT_RPC_TIMEOUT_SECS,
        };
        if rpc_timeout_secs == 0 {
            return Err(CustomError::ConfigError(
                "RPC_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let allowed_origins = var("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            default_provider_url: var("DEFAULT_PROVIDER_URL")
                .unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string()),
            rpc_timeout: Duration::from_secs(rpc_timeout_secs),
            allowed_origins,
        })
    }
}
