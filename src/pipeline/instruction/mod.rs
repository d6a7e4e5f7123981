//! Category-specific instruction construction.
//!
//! Each category has an ordered decision procedure the model must execute
//! with first-match-wins semantics. The procedure is data (`procedure.rs`),
//! rendered into a single opaque instruction block (`prompt.rs`); truncation,
//! category selection, and context inclusion are all decided here before the
//! model ever sees the text.

pub mod procedure;
pub mod prompt;

pub use procedure::{procedure_for, render_procedure, DecisionStep};
pub use prompt::{build_instruction, truncate_chars};

/// Exact literal the model must emit when a fact is absent from the decision.
/// Paraphrases are non-compliant and normalized away during output validation.
pub const MISSING_DATA_LITERAL: &str = "Não consta na decisão";

/// Verdict prefix for non-waivable subject matters; the matched matter name
/// is filled in by the model.
pub const ABSOLUTE_PROHIBITION_PHRASE: &str = "AVISO: VEDAÇÃO ABSOLUTA";

/// Citation for the trial-level monetary-threshold rule.
pub const VALUE_RULE_CITATION: &str = "13.1.3 Anexo I, inciso [I/II]";

/// Fallback when the decision type cannot be settled even by the best
/// indication in the context.
pub const RESIDUAL_DOUBT_LITERAL: &str = "Necessária análise adicional";

/// Fixed outcome when no trial-annex hypothesis applies.
pub const NO_TRIAL_HYPOTHESIS_LITERAL: &str =
    "AVISO: A situação fática não se enquadra em nenhuma hipótese de autodispensa do Anexo I.";

/// Fixed outcome when no appellate-annex hypothesis applies.
pub const NO_APPELLATE_HYPOTHESIS_LITERAL: &str =
    "AVISO: A situação fática não se enquadra em nenhuma hipótese de autodispensa do Anexo II.";

/// Strategic-justification rider appended regardless of the procedure outcome.
pub const PRIOR_AUTHORIZATION_RECOMMENDATION: &str =
    "Recomendação: Solicitar autorização à Ajure Terceirização para interposição do recurso.";

/// Fixed conclusion when a dispense request has no policy basis.
pub const NO_DISPENSE_BASIS_LITERAL: &str = "Não há fundamento previsto na Política Recursal \
     para solicitar dispensa. Deve ser interposto o recurso cabível.";

/// Terminal output when the legal question was not framed in the lower
/// proceeding.
pub const NO_PREQUESTIONING_LITERAL: &str =
    "AVISO: Ausência de prequestionamento. Não é cabível pedido de autorização.";

/// Fixed conclusion when an authorization request lacks sufficient grounds.
pub const INSUFFICIENT_GROUNDS_LITERAL: &str =
    "Não há elementos suficientes para justificar pedido de autorização à Ajure Terceirização.";
