//! Conditional policy retrieval over a pre-built similarity index.
//!
//! The index is built offline by a separate utility; this module only reads
//! it. Zero matches is a valid state handled by the orchestrator; the errors
//! here all mean the retrieval subsystem itself is unusable, which is a
//! different, auditable failure kind.

pub mod index;
pub mod types;

pub use index::InMemoryPassageIndex;
pub use types::{EmbeddingModel, PassageIndex, PolicyPassage, RetrievalContext};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("policy index unavailable: {0}")]
    IndexUnavailable(String),

    #[error("query embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("index snapshot malformed: {0}")]
    Snapshot(String),
}
