use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Which heading syntax and counting strategy a document uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DialectName {
    /// `*` headings, counted from a full parse
    #[default]
    Org,
    /// `*` headings, counted by scanning lines
    OrgScan,
    /// `#` headings, counted by scanning lines
    Markdown,
}

impl DialectName {
    /// Pick a dialect from a file extension, falling back to the default.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("md" | "markdown") => DialectName::Markdown,
            _ => DialectName::default(),
        }
    }
}

/// Options for the annotations drawn next to headings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightsConfig {
    /// Column the weights text is aligned to
    pub column: usize,
    pub cookie_left_delimiter: String,
    pub cookie_left_signal: String,
    pub cookie_right_signal: String,
    pub cookie_right_delimiter: String,
    /// Show weights (true) or hidden-line cookies (false) when enabled
    pub show_weights: bool,
    /// Highlight style tag carried by every annotation
    pub face: String,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            column: 65,
            cookie_left_delimiter: "[".to_string(),
            cookie_left_signal: "+".to_string(),
            cookie_right_signal: String::new(),
            cookie_right_delimiter: "]".to_string(),
            show_weights: true,
            face: "outline-weights".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overrides the extension-based dialect choice when set
    pub dialect: Option<DialectName>,
    pub weights: WeightsConfig,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Load from an explicit path (tilde and env vars expanded) or the
    /// default location, falling back to defaults when no file exists.
    pub fn load_or_default(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let loaded = match config_path {
            Some(path) => Self::load_from_path(Self::expand_path(path))?,
            None => Self::load()?,
        };
        Ok(loaded.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/outline-weights");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Dialect for a document: the configured one, else by file extension.
    pub fn dialect_for(&self, path: &Path) -> DialectName {
        self.dialect.unwrap_or_else(|| DialectName::for_path(path))
    }

    fn expand_path(path: &str) -> PathBuf {
        match shellexpand::full(path) {
            Ok(expanded) => PathBuf::from(expanded.as_ref()),
            Err(_) => PathBuf::from(path),
        }
    }
}
