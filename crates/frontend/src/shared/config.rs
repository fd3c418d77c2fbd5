use anyhow::Context;
use serde::Deserialize;
use wasm_bindgen::JsValue;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DashboardConfig {
    pub api: ApiConfig,
    pub charts: ChartConfig,
    pub tables: TableConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Backend port on the page's host
    pub port: u16,
    /// Full base URL; overrides host + port when set
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChartConfig {
    pub palette: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TableConfig {
    pub default_max_rows: usize,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r##"
[api]
port = 3000

[charts]
palette = ["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4", "#ec4899", "#84cc16"]

[tables]
default_max_rows = 10
"##;

/// Global the hosting page may set to a TOML override
const OVERRIDE_GLOBAL: &str = "DASHBOARD_CONFIG";

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                port: 3000,
                base_url: None,
            },
            charts: ChartConfig {
                palette: crate::shared::report::series::DEFAULT_PALETTE
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
            },
            tables: TableConfig {
                default_max_rows: 10,
            },
        }
    }
}

/// Parse configuration
///
/// Search order:
/// 1. Override TOML supplied by the hosting page
/// 2. Falls back to embedded default config
pub fn load_config(override_toml: Option<&str>) -> anyhow::Result<DashboardConfig> {
    if let Some(text) = override_toml.filter(|t| !t.trim().is_empty()) {
        match toml::from_str::<DashboardConfig>(text) {
            Ok(config) => {
                log::info!("Using dashboard config override");
                return Ok(config);
            }
            Err(e) => log::warn!("Invalid dashboard config override: {}", e),
        }
    }

    log::info!("Using default embedded configuration");
    let config: DashboardConfig =
        toml::from_str(DEFAULT_CONFIG).context("embedded dashboard config")?;
    Ok(config)
}

/// Reads `window.DASHBOARD_CONFIG` and loads the config, never failing
pub fn load_config_from_window() -> DashboardConfig {
    let override_toml = web_sys::window().and_then(|window| {
        js_sys::Reflect::get(&window, &JsValue::from_str(OVERRIDE_GLOBAL))
            .ok()
            .and_then(|value| value.as_string())
    });

    load_config(override_toml.as_deref()).unwrap_or_else(|e| {
        log::error!("Failed to load dashboard config: {:#}", e);
        DashboardConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<DashboardConfig, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_override_is_used_when_valid() {
        let text = r##"
[api]
port = 8080
base_url = "https://reports.example.com"

[charts]
palette = ["#000"]

[tables]
default_max_rows = 20
"##;
        let config = load_config(Some(text)).unwrap();
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.tables.default_max_rows, 20);
    }

    #[test]
    fn test_invalid_override_falls_back_to_default() {
        let config = load_config(Some("[api]\nport = \"nope\"")).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(load_config(None).unwrap(), DashboardConfig::default());
    }
}
