use crate::config::ConverterConfig;
use crate::domain::model::{CleanupMode, SliceModeProfile};
use crate::utils::error::{ConverterError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: Option<SourceConfig>,
    pub conversion: Option<ConversionConfig>,
    pub cleanup: Option<CleanupConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: Option<String>,
    pub output_folder: Option<String>,
    pub patterns: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionConfig {
    pub tag: Option<String>,
    pub target_profile: Option<SliceModeProfile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanupConfig {
    pub mode: Option<CleanupMode>,
    pub protected_file: Option<String>,
    pub xml_extension: Option<String>,
    pub gz_extension: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ConverterError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EXAMCARD_ROOT})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConverterError::Config {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn source_path(&self) -> Option<PathBuf> {
        self.source
            .as_ref()
            .and_then(|s| s.path.as_deref())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }

    /// 把檔案中有設定的值蓋到 `config` 上
    pub fn apply_to(&self, mut config: ConverterConfig) -> ConverterConfig {
        if let Some(source) = &self.source {
            if let Some(folder) = &source.output_folder {
                config.output_folder = folder.clone();
            }
            if let Some(patterns) = &source.patterns {
                config.import_patterns = patterns.clone();
            }
        }

        if let Some(conversion) = &self.conversion {
            if let Some(tag) = &conversion.tag {
                config.slice_mode_tag = tag.clone();
            }
            if let Some(profile) = conversion.target_profile {
                config.target_profile = profile;
            }
        }

        if let Some(cleanup) = &self.cleanup {
            if let Some(mode) = cleanup.mode {
                config.cleanup_mode = mode;
            }
            if let Some(name) = &cleanup.protected_file {
                config.protected_file_name = name.clone();
            }
            if let Some(ext) = &cleanup.xml_extension {
                config.xml_extension = ext.clone();
            }
            if let Some(ext) = &cleanup.gz_extension {
                config.gz_extension = ext.clone();
            }
        }

        config
    }
}
