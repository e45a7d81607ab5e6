use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("Missing required argument: {field}")]
    MissingArgument { field: String },

    #[error("Could not find a part of the path '{}'", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Examcards not found at source folder: {}", path.display())]
    NoExamCards { path: PathBuf },

    #[error("Invalid exam card '{}': {message}", path.display())]
    Format { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

/// 錯誤分類，只用於主控台診斷訊息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    MissingArgument,
    DirectoryNotFound,
    Validation,
    Unhandled,
}

impl ConverterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConverterError::MissingArgument { .. } => ErrorCategory::MissingArgument,
            ConverterError::DirectoryNotFound { .. } => ErrorCategory::DirectoryNotFound,
            ConverterError::NoExamCards { .. } | ConverterError::Validation { .. } => {
                ErrorCategory::Validation
            }
            ConverterError::Format { .. }
            | ConverterError::Io(_)
            | ConverterError::Config { .. }
            | ConverterError::InvalidConfigValue { .. } => ErrorCategory::Unhandled,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::MissingArgument => {
                format!("ArgumentNull error occurred in ExamCard conversion tool: {}", self)
            }
            ErrorCategory::DirectoryNotFound => format!(
                "DirectoryNotFound error occurred in ExamCard conversion tool: {}",
                self
            ),
            ErrorCategory::Validation => self.to_string(),
            ErrorCategory::Unhandled => {
                format!("Unhandled error occurred in ExamCard conversion tool: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConverterError::MissingArgument { .. } => {
                "Enter the source folder location when prompted or pass it as an argument"
            }
            ConverterError::DirectoryNotFound { .. } => {
                "Check that the source folder exists and is a directory"
            }
            ConverterError::NoExamCards { .. } => {
                "Point the tool at a folder containing *.xml.gz or *.examcard files"
            }
            ConverterError::Format { .. } => {
                "The exam card is not a gzip-compressed XML document; remove it from the source folder"
            }
            ConverterError::Io(_) => "Check file permissions and free disk space",
            ConverterError::Config { .. } | ConverterError::InvalidConfigValue { .. } => {
                "Fix the configuration file or command line arguments"
            }
            ConverterError::Validation { .. } => {
                r"Example: Please enter the source folder location : D:\Demo\ExamCards"
            }
        }
    }
}

impl ErrorCategory {
    /// 從 anyhow 錯誤鏈中找出 `ConverterError` 的分類，找不到就當成未處理
    pub fn of(err: &anyhow::Error) -> ErrorCategory {
        err.downcast_ref::<ConverterError>()
            .map_or(ErrorCategory::Unhandled, ConverterError::category)
    }
}

pub type Result<T> = std::result::Result<T, ConverterError>;
