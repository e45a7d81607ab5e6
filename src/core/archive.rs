use crate::core::document::ParsedDocument;
use crate::domain::model::ExamCardFile;
use crate::utils::error::{ConverterError, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// 壓縮後留在磁碟上的兩個檔案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedArtifact {
    /// 改名後的純 XML，之後由 cleanup 刪除
    pub intermediate: PathBuf,
    pub archive: PathBuf,
}

fn format_error(path: &Path, message: impl ToString) -> ConverterError {
    ConverterError::Format {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// 解壓縮並解析 exam card；檔案不存在時回傳 `None`
pub fn read_exam_card(file: &ExamCardFile) -> Result<Option<ParsedDocument>> {
    if !file.exists() {
        return Ok(None);
    }

    let mut xml = Vec::new();
    {
        let input = File::open(&file.path)?;
        let mut decoder = GzDecoder::new(BufReader::new(input));
        decoder
            .read_to_end(&mut xml)
            .map_err(|e| format_error(&file.path, format!("gzip decompression failed: {}", e)))?;
    }
    tracing::debug!("Decompressed {} ({} bytes)", file.file_name, xml.len());

    let doc = ParsedDocument::parse(&xml).map_err(|e| format_error(&file.path, e))?;
    Ok(Some(doc))
}

/// 以純 XML 覆寫原本的檔案
pub fn save_document(doc: &ParsedDocument, path: &Path) -> Result<()> {
    let bytes = doc.to_bytes().map_err(|e| format_error(path, e))?;
    fs::write(path, bytes)?;
    Ok(())
}

/// `A.xml.gz` -> `A.xml`，`B.examcard` -> `B.xml`
pub fn plain_xml_path(file: &ExamCardFile, xml_extension: &str, gz_extension: &str) -> PathBuf {
    if file.extension == gz_extension {
        file.path.with_extension("")
    } else {
        file.path.with_extension(xml_extension.trim_start_matches('.'))
    }
}

pub fn compress_exam_card(
    file: &ExamCardFile,
    xml_extension: &str,
    gz_extension: &str,
) -> Result<CompressedArtifact> {
    let intermediate = plain_xml_path(file, xml_extension, gz_extension);
    fs::rename(&file.path, &intermediate)?;

    let mut archive_name = intermediate.clone().into_os_string();
    archive_name.push(gz_extension);
    let archive = PathBuf::from(archive_name);

    {
        let mut input = BufReader::new(File::open(&intermediate)?);
        let output = BufWriter::new(File::create(&archive)?);
        let mut encoder = GzEncoder::new(output, Compression::default());
        io::copy(&mut input, &mut encoder)?;
        encoder.finish()?.flush()?;
    }

    tracing::debug!(
        "Compressed {} -> {}",
        intermediate.display(),
        archive.display()
    );

    Ok(CompressedArtifact {
        intermediate,
        archive,
    })
}
