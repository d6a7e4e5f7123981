use std::path::Path;

use serde::Deserialize;

use super::types::{EmbeddingModel, PassageIndex, PolicyPassage};
use super::RetrievalError;
use crate::model::CaseCategory;

/// One entry of the index snapshot written by the offline indexing utility.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexedPassage {
    pub content: String,
    pub category: CaseCategory,
    pub embedding: Vec<f32>,
}

/// Snapshot file format: passages with pre-computed embeddings.
#[derive(Debug, Deserialize)]
struct IndexSnapshot {
    passages: Vec<IndexedPassage>,
}

/// Policy index held in memory. Query embeddings come from the configured
/// `EmbeddingModel`; passages are ranked by cosine similarity and filtered by
/// category tag before ranking.
pub struct InMemoryPassageIndex {
    entries: Vec<IndexedPassage>,
    embedder: Box<dyn EmbeddingModel + Send + Sync>,
}

impl InMemoryPassageIndex {
    pub fn new(embedder: Box<dyn EmbeddingModel + Send + Sync>) -> Self {
        Self {
            entries: Vec::new(),
            embedder,
        }
    }

    /// Load the snapshot produced by the offline indexing utility.
    pub fn from_snapshot_file(
        path: &Path,
        embedder: Box<dyn EmbeddingModel + Send + Sync>,
    ) -> Result<Self, RetrievalError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| RetrievalError::IndexUnavailable(format!("{}: {e}", path.display())))?;
        Self::from_snapshot_json(&raw, embedder)
    }

    pub fn from_snapshot_json(
        raw: &str,
        embedder: Box<dyn EmbeddingModel + Send + Sync>,
    ) -> Result<Self, RetrievalError> {
        let snapshot: IndexSnapshot =
            serde_json::from_str(raw).map_err(|e| RetrievalError::Snapshot(e.to_string()))?;
        Ok(Self {
            entries: snapshot.passages,
            embedder,
        })
    }

    pub fn add_passage(&mut self, content: &str, category: CaseCategory, embedding: Vec<f32>) {
        self.entries.push(IndexedPassage {
            content: content.to_string(),
            category,
            embedding,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PassageIndex for InMemoryPassageIndex {
    fn search(
        &self,
        query_text: &str,
        category: CaseCategory,
        top_k: usize,
    ) -> Result<Vec<PolicyPassage>, RetrievalError> {
        let query_embedding = self.embedder.embed(query_text)?;

        let mut scored: Vec<(f32, &IndexedPassage)> = self
            .entries
            .iter()
            .filter(|entry| entry.category == category)
            .map(|entry| (cosine_similarity(&query_embedding, &entry.embedding), entry))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(top_k)
            .enumerate()
            .map(|(i, (score, entry))| PolicyPassage {
                content: entry.content.clone(),
                category: entry.category,
                rank: i + 1,
                score,
            })
            .collect())
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test embedder: maps fixed phrases to fixed vectors.
    struct StubEmbedder;

    impl EmbeddingModel for StubEmbedder {
        fn embed(&self, text: &str) -> Result<Vec<f32>, RetrievalError> {
            if text.contains("valor") {
                Ok(vec![1.0, 0.0, 0.0])
            } else {
                Ok(vec![0.0, 1.0, 0.0])
            }
        }
    }

    struct FailingEmbedder;

    impl EmbeddingModel for FailingEmbedder {
        fn embed(&self, _text: &str) -> Result<Vec<f32>, RetrievalError> {
            Err(RetrievalError::EmbeddingFailed("offline".into()))
        }
    }

    fn populated_index() -> InMemoryPassageIndex {
        let mut index = InMemoryPassageIndex::new(Box::new(StubEmbedder));
        index.add_passage(
            "Anexo I, inciso I: JEC ate R$ 5.000,00",
            CaseCategory::SelfDispense,
            vec![1.0, 0.0, 0.0],
        );
        index.add_passage(
            "Anexo II: teses sumuladas e repetitivos",
            CaseCategory::SelfDispense,
            vec![0.5, 0.5, 0.0],
        );
        index.add_passage(
            "hipoteses de dispensa a pedido",
            CaseCategory::DispenseRequest,
            vec![1.0, 0.0, 0.0],
        );
        index
    }

    #[test]
    fn cosine_similarity_identical_vectors() {
        let sim = cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]);
        assert!((sim - 1.0).abs() < 0.01);
    }

    #[test]
    fn cosine_similarity_orthogonal_vectors() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]);
        assert!(sim.abs() < 0.01);
    }

    #[test]
    fn search_filters_by_category_and_ranks() {
        let index = populated_index();
        let results = index
            .search("valor da condenacao", CaseCategory::SelfDispense, 5)
            .unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[0].content.contains("Anexo I"));
        assert_eq!(results[0].rank, 1);
        assert_eq!(results[1].rank, 2);
        assert!(results
            .iter()
            .all(|p| p.category == CaseCategory::SelfDispense));
    }

    #[test]
    fn search_respects_top_k() {
        let index = populated_index();
        let results = index
            .search("valor", CaseCategory::SelfDispense, 1)
            .unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn search_returns_empty_for_unmatched_category() {
        let index = populated_index();
        let results = index
            .search("qualquer", CaseCategory::AuthorizationRequest, 5)
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn embedding_failure_propagates() {
        let index = InMemoryPassageIndex::new(Box::new(FailingEmbedder));
        let result = index.search("valor", CaseCategory::SelfDispense, 5);
        assert!(matches!(result, Err(RetrievalError::EmbeddingFailed(_))));
    }

    #[test]
    fn loads_snapshot_json() {
        let raw = r#"{
            "passages": [
                {
                    "content": "Anexo I, inciso II: Justica Comum ate R$ 10.000,00",
                    "category": "autodispensa",
                    "embedding": [0.1, 0.2, 0.3]
                }
            ]
        }"#;
        let index =
            InMemoryPassageIndex::from_snapshot_json(raw, Box::new(StubEmbedder)).unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn malformed_snapshot_is_rejected() {
        let result =
            InMemoryPassageIndex::from_snapshot_json("{not json", Box::new(StubEmbedder));
        assert!(matches!(result, Err(RetrievalError::Snapshot(_))));
    }
}
