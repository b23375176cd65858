mod errors;

use std::time::Duration;

use tracing::level_filters::LevelFilter;

use crate::controller::{LoadPolicy, MutationMode};

pub use errors::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:5001/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const API_URL_VAR: &str = "FINANCE_SYNC_API_URL";
pub const LOG_VAR: &str = "FINANCE_SYNC_LOG";
pub const LOAD_POLICY_VAR: &str = "FINANCE_SYNC_LOAD_POLICY";
pub const MUTATIONS_VAR: &str = "FINANCE_SYNC_MUTATIONS";
pub const TIMEOUT_VAR: &str = "FINANCE_SYNC_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub log_level: LevelFilter,
    pub load_policy: LoadPolicy,
    pub mutation_mode: MutationMode,
    pub request_timeout: Duration
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_level: LevelFilter::ERROR,
            load_policy: LoadPolicy::default(),
            mutation_mode: MutationMode::default(),
            request_timeout: DEFAULT_TIMEOUT
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty());
        let mut config = Config::default();

        if let Some(api_url) = read(API_URL_VAR) {
            config.api_url = api_url.trim_end_matches('/').to_string();
        }

        if let Some(level) = read(LOG_VAR) {
            config.log_level = parse_log_level(&level);
        }

        if let Some(policy) = read(LOAD_POLICY_VAR) {
            config.load_policy = match policy.to_lowercase().as_str() {
                "independent" => LoadPolicy::Independent,
                "atomic" => LoadPolicy::Atomic,
                _ => return Err(ConfigError::invalid(LOAD_POLICY_VAR, &policy, "expected independent or atomic"))
            };
        }

        if let Some(mode) = read(MUTATIONS_VAR) {
            config.mutation_mode = match mode.to_lowercase().as_str() {
                "refetch" => MutationMode::Refetch,
                "optimistic" => MutationMode::Optimistic,
                _ => return Err(ConfigError::invalid(MUTATIONS_VAR, &mode, "expected refetch or optimistic"))
            };
        }

        if let Some(timeout) = read(TIMEOUT_VAR) {
            let millis: u64 = timeout.parse()
                .map_err(|error| ConfigError::invalid(TIMEOUT_VAR, &timeout, error))?;

            if millis == 0 {
                return Err(ConfigError::invalid(TIMEOUT_VAR, &timeout, "timeout must be greater than zero"));
            }

            config.request_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }
}

pub fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}
