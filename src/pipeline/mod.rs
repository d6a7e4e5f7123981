//! Analysis orchestration pipeline: extraction → retrieval → instruction →
//! generation → validation.

pub mod extraction;
pub mod generation;
pub mod instruction;
pub mod orchestrator;
pub mod retrieval;
pub mod schema;

use thiserror::Error;

use extraction::ExtractionError;
use generation::GenerationError;
use retrieval::RetrievalError;

/// Request-level failure surfaced to the caller. Each kind is distinct and
/// user-actionable; none are downgraded to a default or empty result, because
/// that would misrepresent analytical confidence to a legal reviewer.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("document extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("unknown case category: '{0}'")]
    UnknownCategory(String),

    #[error("policy retrieval unavailable: {0}")]
    RetrievalUnavailable(#[from] RetrievalError),

    #[error("model response error: {0}")]
    ModelResponse(#[from] GenerationError),
}
