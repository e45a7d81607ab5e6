use crate::config::toml_config::TomlConfig;
use crate::config::ConverterConfig;
use crate::domain::model::{CleanupMode, SliceModeProfile};
use crate::utils::error::{ConverterError, Result};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub const SOURCE_PROMPT: &str = "Please enter the source folder location : ";

#[derive(Debug, Clone, Parser)]
#[command(name = "examcard-converter")]
#[command(about = "Normalizes the SliceMode of exam cards to a target scanner profile")]
pub struct CliArgs {
    /// Source folder with *.xml.gz / *.examcard files; prompted for when omitted
    pub source: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Target scanner profile (Thor7300, Hawk7500)
    #[arg(long)]
    pub profile: Option<SliceModeProfile>,

    /// Intermediate cleanup mode (directory, tracked)
    #[arg(long)]
    pub cleanup: Option<CleanupMode>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliArgs {
    pub fn load_file_config(&self) -> Result<TomlConfig> {
        match &self.config {
            Some(path) => TomlConfig::from_file(path),
            None => Ok(TomlConfig::default()),
        }
    }

    /// 命令列參數 > 設定檔 > 互動輸入
    pub fn resolve_source<R: BufRead, W: Write>(
        &self,
        file_config: &TomlConfig,
        input: R,
        output: W,
    ) -> Result<PathBuf> {
        if let Some(source) = &self.source {
            return Ok(PathBuf::from(source));
        }
        if let Some(path) = file_config.source_path() {
            return Ok(path);
        }
        prompt_source_path(input, output).map(PathBuf::from)
    }

    pub fn build_config(&self, source_dir: PathBuf, file_config: &TomlConfig) -> ConverterConfig {
        let mut config = file_config.apply_to(ConverterConfig::new(source_dir));
        if let Some(profile) = self.profile {
            config.target_profile = profile;
        }
        if let Some(mode) = self.cleanup {
            config.cleanup_mode = mode;
        }
        config
    }
}

/// 讀取一行來源路徑；stdin 已關閉視為缺少參數
pub fn prompt_source_path<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<String> {
    write!(output, "{}", SOURCE_PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ConverterError::MissingArgument {
            field: "source folder location".to_string(),
        });
    }

    Ok(line.trim().trim_matches('"').to_string())
}
