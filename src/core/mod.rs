pub mod archive;
pub mod cleanup;
pub mod document;
pub mod engine;
pub mod enumerator;
pub mod normalizer;
pub mod pipeline;

pub use crate::domain::model::{ExamCardFile, FileReport, RunSummary};
pub use crate::domain::ports::{ConfigProvider, Pipeline};
pub use crate::utils::error::Result;
