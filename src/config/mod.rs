// src/config/mod.rs
pub mod analysis;
pub mod pipeline;

pub use analysis::{AnalysisConfig, BackendSettings};
pub use pipeline::{GenerationParams, PipelineTuning, TranslationRoute};
