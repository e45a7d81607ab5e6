use crate::core::archive::{compress_exam_card, read_exam_card, save_document, CompressedArtifact};
use crate::core::cleanup::{remove_intermediate, remove_intermediates};
use crate::core::enumerator::list_exam_cards;
use crate::core::normalizer::normalize_slice_mode;
use crate::core::{ConfigProvider, Pipeline};
use crate::domain::model::{CleanupMode, ExamCardFile, FileReport, FileStatus};
use crate::utils::error::Result;
use crate::utils::validation::validate_source_directory;
use std::fs;
use std::path::{Path, PathBuf};

pub struct ExamCardPipeline<C: ConfigProvider> {
    config: C,
}

impl<C: ConfigProvider> ExamCardPipeline<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    fn cleanup(&self, file: &ExamCardFile, artifact: &CompressedArtifact) -> Result<Vec<PathBuf>> {
        let protected = self.config.protected_file_name();
        match self.config.cleanup_mode() {
            CleanupMode::DirectoryScan => {
                remove_intermediates(file.directory(), self.config.xml_extension(), protected)
            }
            CleanupMode::Tracked => {
                if remove_intermediate(&artifact.intermediate, protected)? {
                    Ok(vec![artifact.intermediate.clone()])
                } else {
                    Ok(Vec::new())
                }
            }
        }
    }
}

impl<C: ConfigProvider> Pipeline for ExamCardPipeline<C> {
    fn validate_source(&self) -> Result<()> {
        validate_source_directory(self.config.source_dir())
    }

    fn prepare_output(&self) -> Result<PathBuf> {
        let output_dir = self.config.output_dir();
        if !output_dir.is_dir() {
            fs::create_dir_all(&output_dir)?;
            tracing::info!("📁 Created output folder {}", output_dir.display());
        }
        Ok(output_dir)
    }

    fn stage_sources(&self, output_dir: &Path) -> Result<usize> {
        let mut copied = 0;

        for entry in fs::read_dir(self.config.source_dir())? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            // 同名檔案直接覆蓋
            let destination = output_dir.join(entry.file_name());
            fs::copy(entry.path(), &destination)?;
            tracing::debug!("Copied {} -> {}", entry.path().display(), destination.display());
            copied += 1;
        }

        Ok(copied)
    }

    fn discover(&self, output_dir: &Path) -> Result<Vec<ExamCardFile>> {
        match list_exam_cards(output_dir, self.config.import_patterns())? {
            Some(files) => Ok(files),
            None => {
                tracing::warn!("Import pattern set is empty, nothing to convert");
                Ok(Vec::new())
            }
        }
    }

    fn convert(&self, file: &ExamCardFile) -> Result<FileReport> {
        let Some(mut doc) = read_exam_card(file)? else {
            tracing::warn!("⚠️ {} disappeared before conversion, skipping", file.file_name);
            return Ok(FileReport::missing(file));
        };

        let profile = self.config.target_profile();
        let normalize = normalize_slice_mode(&mut doc, self.config.slice_mode_tag(), profile);
        tracing::debug!(
            "{}: {} <{}> element(s), {} rewritten to {}",
            file.file_name,
            normalize.elements_found,
            self.config.slice_mode_tag(),
            normalize.elements_rewritten,
            profile
        );

        save_document(&doc, &file.path)?;
        let artifact =
            compress_exam_card(file, self.config.xml_extension(), self.config.gz_extension())?;
        let removed_intermediates = self.cleanup(file, &artifact)?;

        Ok(FileReport {
            file_name: file.file_name.clone(),
            status: FileStatus::Converted,
            archive: Some(artifact.archive),
            normalize,
            removed_intermediates,
        })
    }
}
