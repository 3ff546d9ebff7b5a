//! Runtime Configuration
//!
//! Embedded `config/litdocket.toml`, with `LITDOCKET_API_URL` and `LITDOCKET_WS_URL`
//! taken from the build environment when set.

use std::sync::OnceLock;

use docket_core::config::AppConfig;

const EMBEDDED_CONFIG: &str = include_str!("../config/litdocket.toml");

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

pub fn app_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let base = match AppConfig::from_toml_str(EMBEDDED_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("embedded config rejected, using defaults: {}", e);
                AppConfig::default()
            }
        };
        base.with_overrides(option_env!("LITDOCKET_API_URL"), option_env!("LITDOCKET_WS_URL"))
    })
}
