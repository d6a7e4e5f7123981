//! Core request/response types shared across pipeline stages.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Case category supplied by the caller. Determines all downstream branching:
/// which instruction procedure runs, which output schema applies, and whether
/// policy retrieval happens at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseCategory {
    /// Policy permits waiving the appeal without case-by-case authorization,
    /// subject to the enumerated annex hypotheses.
    #[serde(rename = "autodispensa")]
    SelfDispense,
    /// Request to waive an otherwise-mandatory appeal.
    #[serde(rename = "dispensa")]
    DispenseRequest,
    /// Request for approval to file an extraordinary appellate remedy.
    #[serde(rename = "autorizacao")]
    AuthorizationRequest,
}

impl CaseCategory {
    pub const ALL: [CaseCategory; 3] = [
        CaseCategory::SelfDispense,
        CaseCategory::DispenseRequest,
        CaseCategory::AuthorizationRequest,
    ];

    /// Parse a wire label. Unknown labels are rejected at the orchestrator
    /// boundary as `AnalysisError::UnknownCategory`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "autodispensa" => Some(CaseCategory::SelfDispense),
            "dispensa" => Some(CaseCategory::DispenseRequest),
            "autorizacao" => Some(CaseCategory::AuthorizationRequest),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CaseCategory::SelfDispense => "autodispensa",
            CaseCategory::DispenseRequest => "dispensa",
            CaseCategory::AuthorizationRequest => "autorizacao",
        }
    }

    /// A pre-built policy index exists only for self-dispense; the other
    /// categories must reason solely from the decision text.
    pub fn requires_retrieval(&self) -> bool {
        matches!(self, CaseCategory::SelfDispense)
    }
}

impl std::fmt::Display for CaseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Observable retrieval outcome for a request. "No matches" and "retrieval
/// not applicable to this category" are distinct states for audit purposes,
/// not just different code paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RetrievalStatus {
    /// Category does not use the policy index.
    NotApplicable,
    /// Retrieval ran and the index returned zero passages. Valid, weaker
    /// evidentiary state — never an error.
    NoMatches,
    /// Retrieval ran and these passage contents were fed to the instruction.
    Retrieved { passages: Vec<String> },
}

/// Result of one analysis request. `data` is guaranteed to match the output
/// schema registered for `category`; the orchestrator never returns
/// unvalidated free text as success.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub request_id: Uuid,
    pub category: CaseCategory,
    pub data: serde_json::Map<String, serde_json::Value>,
    pub retrieval: RetrievalStatus,
}
