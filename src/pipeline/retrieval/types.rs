use serde::{Deserialize, Serialize};

use super::RetrievalError;
use crate::model::CaseCategory;

/// Separator between passages when the context is rendered into a prompt.
pub const PASSAGE_SEPARATOR: &str = "\n\n---\n\n";

/// A chunk of policy-guide text from the pre-built index, read-only to the
/// orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyPassage {
    pub content: String,
    pub category: CaseCategory,
    /// Position in the ranked result list, 1-based.
    pub rank: usize,
    /// Similarity score against the query.
    pub score: f32,
}

/// Ordered policy passages for one request; empty when retrieval is not
/// applicable to the category or yielded no matches.
#[derive(Debug, Clone, Default)]
pub struct RetrievalContext {
    passages: Vec<String>,
}

impl RetrievalContext {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_passages(passages: &[PolicyPassage]) -> Self {
        Self {
            passages: passages.iter().map(|p| p.content.clone()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    pub fn passages(&self) -> &[String] {
        &self.passages
    }

    /// Concatenated context as interpolated into the instruction.
    pub fn joined(&self) -> String {
        self.passages.join(PASSAGE_SEPARATOR)
    }
}

/// Produces a query embedding for similarity search.
pub trait EmbeddingModel {
    fn embed(&self, text: &str) -> Result<Vec<f32>, RetrievalError>;
}

/// Read interface over the pre-built policy index: ranked passages for a
/// query, filtered to the matching category tag.
pub trait PassageIndex {
    fn search(
        &self,
        query_text: &str,
        category: CaseCategory,
        top_k: usize,
    ) -> Result<Vec<PolicyPassage>, RetrievalError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passage(content: &str, rank: usize) -> PolicyPassage {
        PolicyPassage {
            content: content.into(),
            category: CaseCategory::SelfDispense,
            rank,
            score: 0.9,
        }
    }

    #[test]
    fn empty_context_joins_to_empty_string() {
        let ctx = RetrievalContext::empty();
        assert!(ctx.is_empty());
        assert_eq!(ctx.joined(), "");
    }

    #[test]
    fn joined_preserves_order_and_separator() {
        let ctx =
            RetrievalContext::from_passages(&[passage("primeiro", 1), passage("segundo", 2)]);
        assert_eq!(ctx.joined(), "primeiro\n\n---\n\nsegundo");
    }
}
