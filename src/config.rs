//! Pipeline configuration.
//!
//! All limits that shape a single analysis request live here, passed into the
//! orchestrator at construction instead of floating as module globals.

use serde::Serialize;

/// Character budget for the decision text inside the instruction.
/// The generation backend has a bounded context window; truncation always
/// keeps the document prefix.
pub const DEFAULT_MAX_DOCUMENT_CHARS: usize = 14_000;

/// Character budget for the retrieval query. The opening of a decision is
/// assumed to contain the operative holding relevant for category matching.
pub const DEFAULT_QUERY_PREFIX_CHARS: usize = 2_000;

/// Passages requested from the policy index per retrieval.
pub const DEFAULT_RETRIEVAL_TOP_K: usize = 5;

/// Upper bound on the generation call, in seconds.
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 120;

/// Configuration for a single analysis pipeline instance.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisConfig {
    /// Max characters of decision text interpolated into the instruction.
    pub max_document_chars: usize,
    /// Max characters of decision text used as the retrieval query.
    pub query_prefix_chars: usize,
    /// Number of policy passages requested per retrieval.
    pub retrieval_top_k: usize,
    /// Timeout for the outbound generation call, in seconds.
    pub generation_timeout_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_document_chars: DEFAULT_MAX_DOCUMENT_CHARS,
            query_prefix_chars: DEFAULT_QUERY_PREFIX_CHARS,
            retrieval_top_k: DEFAULT_RETRIEVAL_TOP_K,
            generation_timeout_secs: DEFAULT_GENERATION_TIMEOUT_SECS,
        }
    }
}
