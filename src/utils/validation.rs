use crate::utils::error::{ConverterError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(ConverterError::Validation {
            message: format!("Entered {} is not valid", field_name),
        });
    }

    if path.contains('\0') {
        return Err(ConverterError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConverterError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 只接受單一層的資料夾或檔案名稱，不可包含路徑分隔符
pub fn validate_plain_name(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(ConverterError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a plain name without path separators".to_string(),
        });
    }
    Ok(())
}

pub fn validate_extension(field_name: &str, value: &str) -> Result<()> {
    if value.len() < 2 || !value.starts_with('.') || value[1..].contains(['.', '/', '\\']) {
        return Err(ConverterError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Extension must look like '.ext'".to_string(),
        });
    }
    Ok(())
}

/// 來源資料夾必須存在，且頂層至少有一個檔案
pub fn validate_source_directory(path: &Path) -> Result<()> {
    validate_path("source folder location", &path.to_string_lossy())?;

    if !path.is_dir() {
        return Err(ConverterError::DirectoryNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut has_file = false;
    for entry in std::fs::read_dir(path)? {
        if entry?.file_type()?.is_file() {
            has_file = true;
            break;
        }
    }

    if !has_file {
        return Err(ConverterError::NoExamCards {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}
