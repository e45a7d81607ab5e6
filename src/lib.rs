pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use config::ConverterConfig;
pub use core::{engine::ConversionEngine, pipeline::ExamCardPipeline};
pub use domain::model::{CleanupMode, ExamCardFile, RunSummary, SliceModeProfile};
pub use utils::error::{ConverterError, Result};
