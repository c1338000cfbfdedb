use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.toml";

/// Environment override for the dataset path.
pub const DATA_PATH_ENV: &str = "SALES_DASHBOARD_DATA";

pub const DEFAULT_DATA_PATH: &str = "Superstore_Sales_utf8.csv";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("parsing {path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },

    #[error("invalid colour '{0}', expected #rgb or #rrggbb")]
    InvalidColor(String),
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Settings for one dashboard session.
///
/// Sources, lowest precedence first: built-in defaults, `dashboard.toml`,
/// `SALES_DASHBOARD_DATA`, the first command-line argument.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    /// Single fill colour for the category bars. `None` uses a palette.
    pub bar_color: Option<String>,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            bar_color: None,
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

impl DashboardConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: origin.to_string(),
            source,
        })?;
        config.bar_rgb()?;
        Ok(config)
    }

    /// Read `path` if it exists; defaults otherwise.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: origin.clone(),
            source,
        })?;
        Self::from_toml(&text, &origin)
    }

    /// Apply the env var and CLI overrides for the dataset path.
    pub fn with_overrides(mut self, env_path: Option<String>, cli_path: Option<String>) -> Self {
        if let Some(p) = env_path.filter(|p| !p.is_empty()) {
            self.data_path = PathBuf::from(p);
        }
        if let Some(p) = cli_path {
            self.data_path = PathBuf::from(p);
        }
        self
    }

    /// Resolve the full configuration for this process.
    pub fn resolve() -> Self {
        let base = match Self::from_file(Path::new(CONFIG_FILE)) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::error!("Ignoring {CONFIG_FILE}: {e}");
                Self::default()
            }
        };
        base.with_overrides(
            std::env::var(DATA_PATH_ENV).ok(),
            std::env::args().nth(1),
        )
    }

    /// The configured bar colour as RGB, if any.
    pub fn bar_rgb(&self) -> Result<Option<[u8; 3]>, ConfigError> {
        self.bar_color.as_deref().map(parse_hex_color).transpose()
    }
}

/// Parse `#rgb` or `#rrggbb`.
pub fn parse_hex_color(s: &str) -> Result<[u8; 3], ConfigError> {
    let invalid = || ConfigError::InvalidColor(s.to_string());
    let hex = s.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.is_ascii() {
        return Err(invalid());
    }

    let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, slot) in rgb.iter_mut().enumerate() {
                let v = channel(&hex[i..i + 1])?;
                *slot = v * 17;
            }
            Ok(rgb)
        }
        6 => Ok([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        ]),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = DashboardConfig::from_toml("bar_color = \"#04f\"\n", "test").unwrap();
        assert_eq!(cfg.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(cfg.bar_rgb().unwrap(), Some([0x00, 0x44, 0xff]));
        assert_eq!(cfg.window_width, 1200.0);
    }

    #[test]
    fn bad_colour_is_rejected() {
        let err = DashboardConfig::from_toml("bar_color = \"blue\"\n", "test").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor(_)));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let err = DashboardConfig::from_toml("data_path = [", "test").unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let file = DashboardConfig::from_toml("data_path = \"file.csv\"\n", "test").unwrap();

        let env_only = file
            .clone()
            .with_overrides(Some("env.csv".to_string()), None);
        assert_eq!(env_only.data_path, PathBuf::from("env.csv"));

        let both = file.with_overrides(Some("env.csv".to_string()), Some("cli.csv".to_string()));
        assert_eq!(both.data_path, PathBuf::from("cli.csv"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = DashboardConfig::from_file(Path::new("/nonexistent/dashboard.toml")).unwrap();
        assert_eq!(cfg, DashboardConfig::default());
    }

    #[test]
    fn hex_colours() {
        assert_eq!(parse_hex_color("#fff").unwrap(), [255, 255, 255]);
        assert_eq!(parse_hex_color("#1a2b3c").unwrap(), [0x1a, 0x2b, 0x3c]);
        assert!(parse_hex_color("1a2b3c").is_err());
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#ggg").is_err());
    }
}
