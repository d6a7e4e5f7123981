//! Analysis orchestration: extract → conditionally retrieve → build
//! instruction + schema → generate → validate → result.
//!
//! Requests are independent and stateless; nothing is persisted and the only
//! outbound side effect is the generation call, so cancellation before the
//! final parse leaves nothing behind.

use uuid::Uuid;

use super::extraction::{PdfTextExtractor, TextExtractor};
use super::generation::GenerationClient;
use super::instruction::{build_instruction, truncate_chars};
use super::retrieval::{PassageIndex, RetrievalContext, RetrievalError};
use super::schema::{schema_for, validate_response};
use super::AnalysisError;
use crate::config::AnalysisConfig;
use crate::model::{AnalysisResult, CaseCategory, RetrievalStatus};

/// Per-request analysis pipeline over a generation backend and an optional
/// policy index. The index is only consulted for categories that require
/// retrieval; configuring none is fine for the other categories.
pub struct AnalysisOrchestrator<'a, G: GenerationClient> {
    generator: &'a G,
    index: Option<&'a (dyn PassageIndex + Send + Sync)>,
    extractor: Box<dyn TextExtractor + Send + Sync>,
    config: AnalysisConfig,
}

impl<'a, G: GenerationClient> AnalysisOrchestrator<'a, G> {
    pub fn new(generator: &'a G, config: AnalysisConfig) -> Self {
        Self {
            generator,
            index: None,
            extractor: Box::new(PdfTextExtractor),
            config,
        }
    }

    pub fn with_policy_index(mut self, index: &'a (dyn PassageIndex + Send + Sync)) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_extractor(mut self, extractor: Box<dyn TextExtractor + Send + Sync>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Analyze one decision document under an already-parsed category.
    pub fn analyze(
        &self,
        category: CaseCategory,
        document: &[u8],
    ) -> Result<AnalysisResult, AnalysisError> {
        let request_id = Uuid::new_v4();
        let _span =
            tracing::info_span!("analyze", request = %request_id, category = %category).entered();

        let decision_text = self.extractor.extract(document)?;
        tracing::debug!(chars = decision_text.len(), "decision text extracted");

        let (context, retrieval) = self.retrieve_context(category, &decision_text)?;

        let instruction = build_instruction(category, &decision_text, &context, &self.config);
        let schema = schema_for(category);

        let raw_response = self.generator.generate_structured(&instruction, schema)?;
        let data = validate_response(schema, &raw_response)?;

        tracing::info!(request = %request_id, "analysis completed");
        Ok(AnalysisResult {
            request_id,
            category,
            data,
            retrieval,
        })
    }

    /// Analyze under a caller-supplied wire label, rejecting unknown labels
    /// before any work happens.
    pub fn analyze_labeled(
        &self,
        label: &str,
        document: &[u8],
    ) -> Result<AnalysisResult, AnalysisError> {
        let category = CaseCategory::parse(label)
            .ok_or_else(|| AnalysisError::UnknownCategory(label.to_string()))?;
        self.analyze(category, document)
    }

    fn retrieve_context(
        &self,
        category: CaseCategory,
        decision_text: &str,
    ) -> Result<(RetrievalContext, RetrievalStatus), AnalysisError> {
        if !category.requires_retrieval() {
            return Ok((RetrievalContext::empty(), RetrievalStatus::NotApplicable));
        }

        let index = self.index.ok_or_else(|| {
            RetrievalError::IndexUnavailable("no policy index configured".into())
        })?;

        let query = truncate_chars(decision_text, self.config.query_prefix_chars);
        let passages = index.search(query, category, self.config.retrieval_top_k)?;

        if passages.is_empty() {
            // Valid, weaker evidentiary state: proceed without context.
            tracing::warn!(%category, "no policy passages retrieved");
            return Ok((RetrievalContext::empty(), RetrievalStatus::NoMatches));
        }

        tracing::debug!(count = passages.len(), "policy passages retrieved");
        let context = RetrievalContext::from_passages(&passages);
        let status = RetrievalStatus::Retrieved {
            passages: context.passages().to_vec(),
        };
        Ok((context, status))
    }
}
