use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()) == extension)
        .unwrap_or(false)
}

fn is_protected(path: &Path, protected_name: &str) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy() == protected_name)
        .unwrap_or(false)
}

/// 刪除資料夾頂層所有 `xml_extension` 檔案，`protected_name` 除外
///
/// 可重複呼叫，沒有符合的檔案時不做任何事。
pub fn remove_intermediates(
    dir: &Path,
    xml_extension: &str,
    protected_name: &str,
) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let path = entry.path();
        if has_extension(&path, xml_extension) && !is_protected(&path, protected_name) {
            fs::remove_file(&path)?;
            tracing::debug!("Removed intermediate {}", path.display());
            removed.push(path);
        }
    }

    Ok(removed)
}

/// 只刪除指定的中間檔；回傳是否真的刪除了
pub fn remove_intermediate(path: &Path, protected_name: &str) -> Result<bool> {
    if is_protected(path, protected_name) || !path.is_file() {
        return Ok(false);
    }

    fs::remove_file(path)?;
    tracing::debug!("Removed intermediate {}", path.display());
    Ok(true)
}
