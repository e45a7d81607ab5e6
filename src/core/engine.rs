use crate::core::Pipeline;
use crate::domain::model::{RunState, RunSummary};
use crate::utils::error::Result;

pub struct ConversionEngine<P: Pipeline> {
    pipeline: P,
    state: RunState,
}

impl<P: Pipeline> ConversionEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// 依序執行：驗證、建立輸出資料夾、複製、逐檔轉換
    ///
    /// 任何錯誤都會中止剩下的檔案，已轉換的檔案不會還原。
    pub fn run(&mut self) -> Result<RunSummary> {
        match self.run_stages() {
            Ok(summary) => {
                self.state = RunState::Done;
                tracing::info!(
                    "✅ Converted {} exam card(s), {} <SliceMode> value(s) rewritten",
                    summary.converted_count(),
                    summary.rewritten_total()
                );
                Ok(summary)
            }
            Err(e) => {
                tracing::error!("❌ Conversion failed in state {:?}: {}", self.state, e);
                self.state = RunState::Failed;
                Err(e)
            }
        }
    }

    fn transition(&mut self, next: RunState) {
        tracing::debug!("State {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn run_stages(&mut self) -> Result<RunSummary> {
        self.transition(RunState::Validating);
        self.pipeline.validate_source()?;

        self.transition(RunState::Preparing);
        let output_dir = self.pipeline.prepare_output()?;

        self.transition(RunState::Copying);
        let staged_files = self.pipeline.stage_sources(&output_dir)?;
        tracing::info!("Copied {} file(s) to {}", staged_files, output_dir.display());

        let files = self.pipeline.discover(&output_dir)?;
        if files.is_empty() {
            tracing::warn!("No exam cards found in {}", output_dir.display());
        }

        let total = files.len();
        let mut reports = Vec::with_capacity(total);
        for (index, file) in files.iter().enumerate() {
            self.transition(RunState::Converting {
                index: index + 1,
                total,
            });
            tracing::info!("🔄 [{}/{}] {}", index + 1, total, file.file_name);
            reports.push(self.pipeline.convert(file)?);
        }

        Ok(RunSummary {
            output_dir,
            staged_files,
            files: reports,
        })
    }
}
