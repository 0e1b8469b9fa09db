use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use tradebot_core::FilterMode;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default = "Config::default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct ParserConfig {
    #[serde(default)]
    pub filter_mode: FilterMode,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Where parsed records go; stdout when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Pretty-print single-line results.
    #[serde(default)]
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            output: OutputConfig::default(),
            log_level: Self::default_log_level(),
        }
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "parser": {
    "filter_mode": "all"
  },
  "output": {
    "path": null,
    "pretty": false
  },
  "log_level": "info"
}
"#;

impl Config {
    fn default_log_level() -> String {
        "info".to_string()
    }

    fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("tradebot"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load `~/tradebot/config.json`, falling back to defaults when it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;

        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        Self::ensure_config_dir()?;
        let config_path = Self::config_path()?;
        Self::create_at(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("🔧 Configuration options:");
        println!("   - parser.filter_mode: all, items_only or no_items");
        println!("   - output.path: file for parsed records (stdout when null)");
        println!("   - log_level: tracing filter, overridden by RUST_LOG");
        println!();
        Ok(())
    }

    /// Write the default template to `path`. Never overwrites an existing file.
    pub fn create_at(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }
        std::fs::write(path, CONFIG_TEMPLATE)?;
        Ok(())
    }
}
