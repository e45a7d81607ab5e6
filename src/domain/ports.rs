use crate::domain::model::{CleanupMode, ExamCardFile, FileReport, SliceModeProfile};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

pub trait ConfigProvider {
    fn source_dir(&self) -> &Path;
    fn output_folder(&self) -> &str;
    fn import_patterns(&self) -> &str;
    fn slice_mode_tag(&self) -> &str;
    fn target_profile(&self) -> SliceModeProfile;
    fn xml_extension(&self) -> &str;
    fn gz_extension(&self) -> &str;
    fn protected_file_name(&self) -> &str;
    fn cleanup_mode(&self) -> CleanupMode;

    fn output_dir(&self) -> PathBuf {
        self.source_dir().join(self.output_folder())
    }
}

/// 轉換流程的各個步驟，由 `ConversionEngine` 依序呼叫
pub trait Pipeline {
    fn validate_source(&self) -> Result<()>;
    fn prepare_output(&self) -> Result<PathBuf>;
    fn stage_sources(&self, output_dir: &Path) -> Result<usize>;
    fn discover(&self, output_dir: &Path) -> Result<Vec<ExamCardFile>>;
    fn convert(&self, file: &ExamCardFile) -> Result<FileReport>;
}
