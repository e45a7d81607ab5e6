use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// 掃描機型與其 slice mode 代碼
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SliceModeProfile {
    #[default]
    Thor7300,
    Hawk7500,
}

impl SliceModeProfile {
    pub const ALL: [SliceModeProfile; 2] = [SliceModeProfile::Thor7300, SliceModeProfile::Hawk7500];

    pub const fn code(self) -> i32 {
        match self {
            SliceModeProfile::Thor7300 => 64,
            SliceModeProfile::Hawk7500 => 128,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SliceModeProfile::Thor7300 => "Thor7300",
            SliceModeProfile::Hawk7500 => "Hawk7500",
        }
    }
}

impl fmt::Display for SliceModeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

impl TryFrom<i32> for SliceModeProfile {
    type Error = i32;

    fn try_from(code: i32) -> std::result::Result<Self, Self::Error> {
        SliceModeProfile::ALL
            .into_iter()
            .find(|profile| profile.code() == code)
            .ok_or(code)
    }
}

impl FromStr for SliceModeProfile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        SliceModeProfile::ALL
            .into_iter()
            .find(|profile| profile.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!(
                    "unknown slice mode profile '{}', expected one of: {}",
                    wanted,
                    SliceModeProfile::ALL.map(|p| p.name()).join(", ")
                )
            })
    }
}

/// 中間產生的 .xml 檔案如何清除
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CleanupMode {
    /// 每處理完一個檔案就掃描整個資料夾
    #[default]
    #[serde(rename = "directory")]
    DirectoryScan,
    /// 只刪除這次轉換產生的那一個檔案
    #[serde(rename = "tracked")]
    Tracked,
}

impl FromStr for CleanupMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "directory" | "scan" => Ok(CleanupMode::DirectoryScan),
            "tracked" => Ok(CleanupMode::Tracked),
            other => Err(format!(
                "unknown cleanup mode '{}', expected 'directory' or 'tracked'",
                other
            )),
        }
    }
}

/// 輸出資料夾中的一個 exam card 檔案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamCardFile {
    pub path: PathBuf,
    pub file_name: String,
    /// 最後一段副檔名（含點），例如 `A.xml.gz` 為 `.gz`
    pub extension: String,
}

impl ExamCardFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        Self {
            path,
            file_name,
            extension,
        }
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub elements_found: usize,
    pub elements_rewritten: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Converted,
    Missing,
}

#[derive(Debug, Clone)]
pub struct FileReport {
    pub file_name: String,
    pub status: FileStatus,
    /// 最終的壓縮檔位置，略過的檔案沒有
    pub archive: Option<PathBuf>,
    pub normalize: NormalizeReport,
    pub removed_intermediates: Vec<PathBuf>,
}

impl FileReport {
    pub fn missing(file: &ExamCardFile) -> Self {
        Self {
            file_name: file.file_name.clone(),
            status: FileStatus::Missing,
            archive: None,
            normalize: NormalizeReport::default(),
            removed_intermediates: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_dir: PathBuf,
    pub staged_files: usize,
    pub files: Vec<FileReport>,
}

impl RunSummary {
    pub fn converted_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.status == FileStatus::Converted)
            .count()
    }

    pub fn rewritten_total(&self) -> usize {
        self.files
            .iter()
            .map(|f| f.normalize.elements_rewritten)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Validating,
    Preparing,
    Copying,
    Converting { index: usize, total: usize },
    Done,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_codes() {
        assert_eq!(SliceModeProfile::Thor7300.code(), 64);
        assert_eq!(SliceModeProfile::Hawk7500.code(), 128);
        assert_eq!(SliceModeProfile::default(), SliceModeProfile::Thor7300);
    }

    #[test]
    fn test_profile_conversions() {
        assert_eq!(SliceModeProfile::try_from(128), Ok(SliceModeProfile::Hawk7500));
        assert_eq!(SliceModeProfile::try_from(999), Err(999));
        assert_eq!("hawk7500".parse::<SliceModeProfile>(), Ok(SliceModeProfile::Hawk7500));
        assert_eq!(" THOR7300 ".parse::<SliceModeProfile>(), Ok(SliceModeProfile::Thor7300));
        assert!("Osprey".parse::<SliceModeProfile>().is_err());
        assert_eq!(SliceModeProfile::Thor7300.to_string(), "Thor7300 (64)");
    }

    #[test]
    fn test_cleanup_mode_from_str() {
        assert_eq!("directory".parse::<CleanupMode>(), Ok(CleanupMode::DirectoryScan));
        assert_eq!("Tracked".parse::<CleanupMode>(), Ok(CleanupMode::Tracked));
        assert!("never".parse::<CleanupMode>().is_err());
        assert_eq!(CleanupMode::default(), CleanupMode::DirectoryScan);
    }

    #[test]
    fn test_exam_card_file_attributes() {
        let file = ExamCardFile::new("/data/out/A.xml.gz");
        assert_eq!(file.file_name, "A.xml.gz");
        assert_eq!(file.extension, ".gz");
        assert_eq!(file.directory(), Path::new("/data/out"));

        let card = ExamCardFile::new("/data/out/B.examcard");
        assert_eq!(card.extension, ".examcard");

        let bare = ExamCardFile::new("/data/out/README");
        assert_eq!(bare.extension, "");
    }
}
