//! Generation backend abstraction: instruction in, schema-constrained JSON
//! text out. Any backend satisfying that contract can be plugged in.

pub mod gemini;

pub use gemini::{GeminiClient, GeminiEmbedder};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use thiserror::Error;

use super::schema::OutputSchema;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("generation backend unreachable at {0}")]
    Connection(String),

    #[error("generation request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("generation backend returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("response envelope parsing failed: {0}")]
    ResponseParsing(String),

    /// Backend returned text that does not satisfy the output schema. The
    /// raw response is carried for diagnostics.
    #[error("non-conformant model response: {detail}")]
    NonConformant { detail: String, raw: String },
}

/// Generation client abstraction (allows mocking).
pub trait GenerationClient {
    /// Submit an instruction with a structured-output schema; returns the
    /// serialized structure as text.
    fn generate_structured(
        &self,
        instruction: &str,
        schema: &OutputSchema,
    ) -> Result<String, GenerationError>;
}

/// Mock generation client for testing — returns a configurable response and
/// records every instruction it receives.
pub struct MockGenerationClient {
    response: Result<String, String>,
    calls: AtomicUsize,
    last_instruction: Mutex<Option<String>>,
}

impl MockGenerationClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
            calls: AtomicUsize::new(0),
            last_instruction: Mutex::new(None),
        }
    }

    /// Mock that fails every call with a connection error.
    pub fn unreachable() -> Self {
        Self {
            response: Err("backend offline".to_string()),
            calls: AtomicUsize::new(0),
            last_instruction: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_instruction(&self) -> Option<String> {
        self.last_instruction.lock().unwrap().clone()
    }
}

impl GenerationClient for MockGenerationClient {
    fn generate_structured(
        &self,
        instruction: &str,
        _schema: &OutputSchema,
    ) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_instruction.lock().unwrap() = Some(instruction.to_string());
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(detail) => Err(GenerationError::Connection(detail.clone())),
        }
    }
}
