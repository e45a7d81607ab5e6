#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::{CleanupMode, SliceModeProfile};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_FOLDER: &str = "ConvertedExamcards";
pub const DEFAULT_IMPORT_PATTERNS: &str = "*.xml.gz|*.examcard";
pub const DEFAULT_SLICE_MODE_TAG: &str = "SliceMode";
pub const DEFAULT_XML_EXTENSION: &str = ".xml";
pub const DEFAULT_GZ_EXTENSION: &str = ".gz";
pub const DEFAULT_PROTECTED_FILE_NAME: &str = "ExamCards.xml";

/// 一次轉換所需的全部設定，建立後不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    pub source_dir: PathBuf,
    pub output_folder: String,
    pub import_patterns: String,
    pub slice_mode_tag: String,
    pub target_profile: SliceModeProfile,
    pub xml_extension: String,
    pub gz_extension: String,
    pub protected_file_name: String,
    pub cleanup_mode: CleanupMode,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::new(),
            output_folder: DEFAULT_OUTPUT_FOLDER.to_string(),
            import_patterns: DEFAULT_IMPORT_PATTERNS.to_string(),
            slice_mode_tag: DEFAULT_SLICE_MODE_TAG.to_string(),
            target_profile: SliceModeProfile::default(),
            xml_extension: DEFAULT_XML_EXTENSION.to_string(),
            gz_extension: DEFAULT_GZ_EXTENSION.to_string(),
            protected_file_name: DEFAULT_PROTECTED_FILE_NAME.to_string(),
            cleanup_mode: CleanupMode::default(),
        }
    }
}

impl ConverterConfig {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_target_profile(mut self, profile: SliceModeProfile) -> Self {
        self.target_profile = profile;
        self
    }

    pub fn with_cleanup_mode(mut self, mode: CleanupMode) -> Self {
        self.cleanup_mode = mode;
        self
    }
}

impl ConfigProvider for ConverterConfig {
    fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    fn output_folder(&self) -> &str {
        &self.output_folder
    }

    fn import_patterns(&self) -> &str {
        &self.import_patterns
    }

    fn slice_mode_tag(&self) -> &str {
        &self.slice_mode_tag
    }

    fn target_profile(&self) -> SliceModeProfile {
        self.target_profile
    }

    fn xml_extension(&self) -> &str {
        &self.xml_extension
    }

    fn gz_extension(&self) -> &str {
        &self.gz_extension
    }

    fn protected_file_name(&self) -> &str {
        &self.protected_file_name
    }

    fn cleanup_mode(&self) -> CleanupMode {
        self.cleanup_mode
    }
}

impl Validate for ConverterConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_plain_name("output_folder", &self.output_folder)?;
        validation::validate_non_empty_string("slice_mode_tag", &self.slice_mode_tag)?;
        validation::validate_extension("xml_extension", &self.xml_extension)?;
        validation::validate_extension("gz_extension", &self.gz_extension)?;
        validation::validate_plain_name("protected_file_name", &self.protected_file_name)?;
        Ok(())
    }
}
