use crate::domain::model::ExamCardFile;
use crate::utils::error::{ConverterError, Result};
use regex::{Regex, RegexBuilder};
use std::fs;
use std::path::Path;

/// 把 `*.xml.gz` 這類萬用字元轉成完整比對的正規表達式
fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let mut expr = String::from("^");
    for ch in pattern.chars() {
        match ch {
            '*' => expr.push_str(".*"),
            '?' => expr.push('.'),
            other => expr.push_str(&regex::escape(&other.to_string())),
        }
    }
    expr.push('$');

    RegexBuilder::new(&expr)
        .case_insensitive(true)
        .build()
        .map_err(|e| ConverterError::InvalidConfigValue {
            field: "import_patterns".to_string(),
            value: pattern.to_string(),
            reason: e.to_string(),
        })
}

/// 列出資料夾頂層符合任一 pattern 的檔案（`|` 分隔）
///
/// pattern 為空時回傳 `None`；順序不保證。
pub fn list_exam_cards(dir: &Path, patterns: &str) -> Result<Option<Vec<ExamCardFile>>> {
    if patterns.trim().is_empty() {
        return Ok(None);
    }

    let matchers = patterns
        .split('|')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(glob_to_regex)
        .collect::<Result<Vec<_>>>()?;

    if !dir.is_dir() {
        return Err(ConverterError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name();
        let name = name.to_string_lossy();
        if matchers.iter().any(|re| re.is_match(&name)) {
            files.push(ExamCardFile::new(entry.path()));
        }
    }

    tracing::debug!(
        "Found {} file(s) matching '{}' in {}",
        files.len(),
        patterns,
        dir.display()
    );
    Ok(Some(files))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(files: &[ExamCardFile]) -> Vec<String> {
        let mut names: Vec<String> = files.iter().map(|f| f.file_name.clone()).collect();
        names.sort();
        names
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_lists_matching_top_level_files() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        touch(dir, "A.xml.gz");
        touch(dir, "B.examcard");
        touch(dir, "C.EXAMCARD");
        touch(dir, "notes.txt");
        touch(dir, "D.xml");
        fs::create_dir(dir.join("sub")).unwrap();
        touch(&dir.join("sub"), "E.xml.gz");
        fs::create_dir(dir.join("F.examcard")).unwrap();

        let files = list_exam_cards(dir, "*.xml.gz|*.examcard").unwrap().unwrap();
        assert_eq!(names(&files), vec!["A.xml.gz", "B.examcard", "C.EXAMCARD"]);
        assert!(files.iter().all(|f| f.path.parent() == Some(dir)));
    }

    #[test]
    fn test_empty_pattern_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "A.xml.gz");

        assert!(list_exam_cards(temp_dir.path(), "").unwrap().is_none());
        assert!(list_exam_cards(temp_dir.path(), "   ").unwrap().is_none());
    }

    #[test]
    fn test_file_matching_several_patterns_listed_once() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "A.xml.gz");

        let files = list_exam_cards(temp_dir.path(), "*.gz|A.*|A.xml.?z").unwrap().unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_pattern_metacharacters_are_literal() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "A.xml.gz");
        touch(temp_dir.path(), "AxxmlXgz");

        let files = list_exam_cards(temp_dir.path(), "A.xml.gz").unwrap().unwrap();
        assert_eq!(names(&files), vec!["A.xml.gz"]);
    }

    #[test]
    fn test_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err = list_exam_cards(&temp_dir.path().join("nope"), "*.gz").unwrap_err();
        assert!(matches!(err, ConverterError::DirectoryNotFound { .. }));
    }
}
