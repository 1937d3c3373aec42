use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    #[serde(default = "default_precision")]
    pub precision: usize,
    #[serde(default)]
    pub trim_0_decimals: bool,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub postfix: String,
    #[serde(default)]
    pub raw: bool, // skip the magnitude formatter entirely
}

fn default_precision() -> usize {
    1
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            trim_0_decimals: false,
            prefix: String::new(),
            postfix: String::new(),
            raw: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinningConfig {
    #[serde(default = "default_open")]
    pub left_open: bool,
    #[serde(default = "default_open")]
    pub right_open: bool,
}

fn default_open() -> bool {
    true
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self {
            left_open: default_open(),
            right_open: default_open(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_format() -> String {
    "table".into()
}
fn default_output_dir() -> String {
    ".".into()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub labels: LabelConfig,
    #[serde(default)]
    pub binning: BinningConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        if let Ok(env_path) = std::env::var("BINLENS_CONFIG") {
            return PathBuf::from(env_path); // $BINLENS_CONFIG overrides default config path
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("binlens")
            .join("config.toml")
    }

    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::BinlensError::Other(e.to_string()))
    }

    pub fn save(&self) -> crate::Result<PathBuf> {
        let path = Self::config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::BinlensError::Other(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg.labels.precision, 1);
        assert!(!cfg.labels.trim_0_decimals);
        assert!(cfg.binning.left_open && cfg.binning.right_open);
        assert_eq!(cfg.export.format, "table");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg = Config::from_toml("[labels]\nprefix = \"£\"\n\n[binning]\nright_open = false\n").unwrap();
        assert_eq!(cfg.labels.prefix, "£");
        assert_eq!(cfg.labels.precision, 1);
        assert!(cfg.binning.left_open);
        assert!(!cfg.binning.right_open);
    }

    #[test]
    fn bad_toml_is_other_error() {
        let err = Config::from_toml("[labels\n").unwrap_err();
        assert!(matches!(err, crate::BinlensError::Other(_)));
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.labels.postfix = "%".into();
        cfg.labels.precision = 0;
        cfg.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.labels.postfix, "%");
        assert_eq!(loaded.labels.precision, 0);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.export.output_dir, ".");
    }
}
