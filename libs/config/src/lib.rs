//! Engine configuration: defaults plus environment-variable overrides plus
//! bounds validation, following the same three-stage shape used throughout
//! this codebase's other services (`Default` -> `from_env` -> `validate`).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoredPool {
    pub venue: String,
    pub pool_id: String,
    pub base_type: String,
    pub quote_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub rpc_url: String,
    pub private_key: String,
    pub package_id: String,
    pub admin_cap_id: String,
    pub pause_flag_id: String,
    pub monitored_pools: Vec<MonitoredPool>,
    /// Per-asset decimal counts keyed by the numeric asset id the collector
    /// stamps onto a `PoolSnapshot`, feeding `arb_types::DecimalsMap` so the
    /// scanner can normalize a raw CLMM price onto the same scale as a
    /// CLOB/weighted-AMM price before comparing them across venues.
    pub asset_decimals: HashMap<u64, u8>,
    pub deep_fee_coin_id: Option<String>,
    pub min_profit: u64,
    pub poll_interval_ms: u64,
    pub max_gas_budget: u64,
    pub dry_run_before_submit: bool,
    pub use_websocket: bool,
    pub ws_mode: String,
    pub cb_max_consecutive_failures: u32,
    pub cb_max_cumulative_loss: u64,
    pub cb_cooldown_ms: u64,
    pub min_gas_balance: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            rpc_url: "http://127.0.0.1:9000".to_string(),
            private_key: String::new(),
            package_id: String::new(),
            admin_cap_id: String::new(),
            pause_flag_id: String::new(),
            monitored_pools: Vec::new(),
            asset_decimals: HashMap::new(),
            deep_fee_coin_id: None,
            min_profit: 1,
            poll_interval_ms: 1_000,
            max_gas_budget: 50_000_000,
            dry_run_before_submit: true,
            use_websocket: false,
            ws_mode: "poll".to_string(),
            cb_max_consecutive_failures: 5,
            cb_max_cumulative_loss: 1_000_000_000,
            cb_cooldown_ms: 60_000,
            min_gas_balance: 100_000_000,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("MONITORED_POOLS is not valid JSON: {0}")]
    InvalidMonitoredPools(serde_json::Error),
    #[error("ASSET_DECIMALS is not valid JSON: {0}")]
    InvalidAssetDecimals(serde_json::Error),
}

impl EngineConfig {
    /// Overlays environment variables onto `Self::default()`. Unset
    /// variables leave the default untouched; malformed ones produce a
    /// `ConfigError` rather than silently falling back.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = EngineConfig::default();

        if let Ok(v) = env::var("RPC_URL") {
            config.rpc_url = v;
        }
        if let Ok(v) = env::var("PRIVATE_KEY") {
            config.private_key = v;
        }
        if let Ok(v) = env::var("PACKAGE_ID") {
            config.package_id = v;
        }
        if let Ok(v) = env::var("ADMIN_CAP_ID") {
            config.admin_cap_id = v;
        }
        if let Ok(v) = env::var("PAUSE_FLAG_ID") {
            config.pause_flag_id = v;
        }
        if let Ok(v) = env::var("MONITORED_POOLS") {
            config.monitored_pools =
                serde_json::from_str(&v).map_err(ConfigError::InvalidMonitoredPools)?;
        }
        if let Ok(v) = env::var("ASSET_DECIMALS") {
            config.asset_decimals =
                serde_json::from_str(&v).map_err(ConfigError::InvalidAssetDecimals)?;
        }
        if let Ok(v) = env::var("DEEP_FEE_COIN_ID") {
            config.deep_fee_coin_id = Some(v);
        }
        if let Ok(v) = env::var("MIN_PROFIT") {
            config.min_profit = parse_u64("MIN_PROFIT", &v)?;
        }
        if let Ok(v) = env::var("POLL_INTERVAL_MS") {
            config.poll_interval_ms = parse_u64("POLL_INTERVAL_MS", &v)?;
        }
        if let Ok(v) = env::var("MAX_GAS_BUDGET") {
            config.max_gas_budget = parse_u64("MAX_GAS_BUDGET", &v)?;
        }
        if let Ok(v) = env::var("DRY_RUN_BEFORE_SUBMIT") {
            config.dry_run_before_submit = parse_bool("DRY_RUN_BEFORE_SUBMIT", &v)?;
        }
        if let Ok(v) = env::var("USE_WEBSOCKET") {
            config.use_websocket = parse_bool("USE_WEBSOCKET", &v)?;
        }
        if let Ok(v) = env::var("WS_MODE") {
            config.ws_mode = v;
        }
        if let Ok(v) = env::var("CB_MAX_CONSECUTIVE_FAILURES") {
            config.cb_max_consecutive_failures =
                parse_u64("CB_MAX_CONSECUTIVE_FAILURES", &v)? as u32;
        }
        if let Ok(v) = env::var("CB_MAX_CUMULATIVE_LOSS") {
            config.cb_max_cumulative_loss = parse_u64("CB_MAX_CUMULATIVE_LOSS", &v)?;
        }
        if let Ok(v) = env::var("CB_COOLDOWN_MS") {
            config.cb_cooldown_ms = parse_u64("CB_COOLDOWN_MS", &v)?;
        }
        if let Ok(v) = env::var("MIN_GAS_BALANCE") {
            config.min_gas_balance = parse_u64("MIN_GAS_BALANCE", &v)?;
        }

        Ok(config)
    }

    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rpc_url.is_empty() {
            return Err(ConfigError::MissingRequired("RPC_URL"));
        }
        if self.package_id.is_empty() {
            return Err(ConfigError::MissingRequired("PACKAGE_ID"));
        }
        if self.min_profit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "MIN_PROFIT",
                value: "0".to_string(),
            });
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "POLL_INTERVAL_MS",
                value: "0".to_string(),
            });
        }
        if self.cb_max_consecutive_failures == 0 {
            return Err(ConfigError::InvalidValue {
                field: "CB_MAX_CONSECUTIVE_FAILURES",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_u64(field: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn parse_bool(field: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "1" | "true" | "TRUE" => Ok(true),
        "0" | "false" | "FALSE" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            field,
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_fails_validation_without_required_fields() {
        let config = EngineConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_config_with_required_fields_set_validates() {
        let mut config = EngineConfig::default();
        config.package_id = "0xabc".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_override_parses_numeric_and_bool_fields() {
        env::set_var("MIN_PROFIT", "42");
        env::set_var("DRY_RUN_BEFORE_SUBMIT", "false");
        let config = EngineConfig::from_env().unwrap();
        assert_eq!(config.min_profit, 42);
        assert!(!config.dry_run_before_submit);
        env::remove_var("MIN_PROFIT");
        env::remove_var("DRY_RUN_BEFORE_SUBMIT");
    }

    #[test]
    fn invalid_monitored_pools_json_is_rejected() {
        env::set_var("MONITORED_POOLS", "not json");
        let result = EngineConfig::from_env();
        assert!(result.is_err());
        env::remove_var("MONITORED_POOLS");
    }

    #[test]
    fn round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = EngineConfig::default();
        config.package_id = "0xabc".to_string();
        config.save_to_file(&path).unwrap();
        let loaded = EngineConfig::from_file(&path).unwrap();
        assert_eq!(loaded.package_id, "0xabc");
    }
}
