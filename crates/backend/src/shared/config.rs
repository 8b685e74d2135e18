use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub columns: ColumnConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Настройки доступа к Google-таблице
#[derive(Debug, Deserialize, Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    /// Tab id used by the published JSON and CSV endpoints
    pub gid: String,
    #[serde(default = "default_tab")]
    pub tab: String,
    #[serde(default = "default_range")]
    pub range: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// OAuth bearer token for writes; the API key alone is read-only on most sheets
    #[serde(default)]
    pub access_token: Option<String>,
    /// Column letter of the reservation cell, detected from the header row when unset
    #[serde(default)]
    pub reservation_column: Option<String>,
    #[serde(default = "default_reservation_days")]
    pub reservation_days: i64,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_docs_base_url")]
    pub docs_base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: default_poll_interval(),
        }
    }
}

/// Заголовки колонок листа Lager
#[derive(Debug, Deserialize, Clone)]
pub struct ColumnConfig {
    #[serde(default = "col_brand")]
    pub brand: String,
    #[serde(default = "col_model")]
    pub model: String,
    #[serde(default = "col_serial")]
    pub serial_number: String,
    #[serde(default = "col_rekond")]
    pub rekond: String,
    #[serde(default = "col_location")]
    pub location: String,
    #[serde(default = "col_price")]
    pub price: String,
    #[serde(default = "col_seller")]
    pub seller: String,
    #[serde(default = "col_reserved_by")]
    pub reserved_by: String,
    #[serde(default = "col_condition")]
    pub condition: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            brand: col_brand(),
            model: col_model(),
            serial_number: col_serial(),
            rekond: col_rekond(),
            location: col_location(),
            price: col_price(),
            seller: col_seller(),
            reserved_by: col_reserved_by(),
            condition: col_condition(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_tab() -> String {
    "Lager".to_string()
}
fn default_range() -> String {
    "A:Z".to_string()
}
fn default_reservation_days() -> i64 {
    14
}
fn default_timeout() -> u64 {
    30
}
fn default_api_base_url() -> String {
    "https://sheets.googleapis.com/v4".to_string()
}
fn default_docs_base_url() -> String {
    "https://docs.google.com".to_string()
}
fn default_poll_interval() -> u64 {
    5 * 60
}
fn col_brand() -> String {
    "Märke".to_string()
}
fn col_model() -> String {
    "Modell".to_string()
}
fn col_serial() -> String {
    "Serienummer".to_string()
}
fn col_rekond() -> String {
    "Rekond".to_string()
}
fn col_location() -> String {
    "Senaste kunden".to_string()
}
fn col_price() -> String {
    "Värde".to_string()
}
fn col_seller() -> String {
    "Säljare".to_string()
}
fn col_reserved_by() -> String {
    "Reserverad av".to_string()
}
fn col_condition() -> String {
    "Skick".to_string()
}

/// Default configuration embedded in the binary
pub(crate) const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[sheets]
spreadsheet_id = "18dg0WlMsG0TzYfHNRqj1BnRWSryMDYAYAe1vW8ywoLM"
gid = "1760566905"
tab = "Lager"
range = "A:Z"
reservation_days = 14

[refresh]
poll_interval_seconds = 300
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// `GOOGLE_SHEETS_API_KEY` and `GOOGLE_SHEETS_ACCESS_TOKEN` override the file.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = match config_path_next_to_exe() {
        Some(config_path) if config_path.exists() => {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            toml::from_str::<Config>(&contents)?
        }
        Some(config_path) => {
            tracing::warn!("config.toml not found at: {}", config_path.display());
            tracing::info!("Using default embedded configuration");
            toml::from_str::<Config>(DEFAULT_CONFIG)?
        }
        None => {
            tracing::info!("Using default embedded configuration");
            toml::from_str::<Config>(DEFAULT_CONFIG)?
        }
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

fn config_path_next_to_exe() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    exe_path.parent().map(|dir| dir.join("config.toml"))
}

fn apply_env_overrides(config: &mut Config, get: impl Fn(&str) -> Option<String>) {
    if let Some(key) = get("GOOGLE_SHEETS_API_KEY").filter(|v| !v.trim().is_empty()) {
        config.sheets.api_key = Some(key);
    }
    if let Some(token) = get("GOOGLE_SHEETS_ACCESS_TOKEN").filter(|v| !v.trim().is_empty()) {
        config.sheets.access_token = Some(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.sheets.tab, "Lager");
        assert_eq!(config.sheets.reservation_days, 14);
        assert_eq!(config.refresh.poll_interval_seconds, 300);
        assert_eq!(config.columns.reserved_by, "Reserverad av");
        assert!(config.sheets.api_key.is_none());
    }

    #[test]
    fn test_minimal_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [sheets]
            spreadsheet_id = "abc"
            gid = "0"

            [columns]
            brand = "Brand"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.sheets.range, "A:Z");
        assert_eq!(config.sheets.request_timeout_seconds, 30);
        assert_eq!(config.columns.brand, "Brand");
        assert_eq!(config.columns.model, "Modell");
    }

    #[test]
    fn test_env_overrides_api_key() {
        let mut config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        apply_env_overrides(&mut config, |name| match name {
            "GOOGLE_SHEETS_API_KEY" => Some("key-1".to_string()),
            "GOOGLE_SHEETS_ACCESS_TOKEN" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.sheets.api_key.as_deref(), Some("key-1"));
        assert!(config.sheets.access_token.is_none());
    }
}
