use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub halls: HallConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Directory the JSON file store keeps its collections in.
    pub data_dir: String,
}

/// Canonical seat-grid dimensions for newly scheduled showtimes. One default
/// for the whole system rather than one per call site.
#[derive(Debug, Deserialize, Clone)]
pub struct HallConfig {
    pub default_rows: u32,
    pub default_cols: u32,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .set_default("store.data_dir", "data")?
            .set_default("halls.default_rows", 5)?
            .set_default("halls.default_cols", 8)?
            // Optional configuration files layered over the defaults
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `MARQUEE_HALLS__DEFAULT_ROWS=7` overrides the row count
            .add_source(config::Environment::with_prefix("MARQUEE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_defaults_without_config_files() {
        let config = AppConfig::load().unwrap();
        assert_eq!(config.store.data_dir, "data");
        assert_eq!(config.halls.default_rows, 5);
        assert_eq!(config.halls.default_cols, 8);
    }
}
