//! Recursal — analysis pipeline for judicial-decision documents.
//!
//! Takes a decision document (PDF bytes) plus a case category and produces a
//! structured, schema-validated recommendation: dispense, authorize, or appeal.
//! The pipeline is: text extraction → conditional policy retrieval →
//! category-specific instruction building → schema-constrained generation →
//! response validation.

pub mod config;
pub mod model;
pub mod pipeline;

pub use config::AnalysisConfig;
pub use model::{AnalysisResult, CaseCategory, RetrievalStatus};
pub use pipeline::orchestrator::AnalysisOrchestrator;
pub use pipeline::AnalysisError;
