//! Post-generation response validation.
//!
//! The backend response is only accepted when it is a JSON object whose
//! fields are exactly the schema's declared fields with the declared types.
//! Anything else fails with the raw response attached for diagnostics, so the
//! caller never receives a partially-parsed result.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use super::OutputSchema;
use crate::pipeline::generation::GenerationError;
use crate::pipeline::instruction::MISSING_DATA_LITERAL;

/// Field values that are merely a paraphrase of the missing-data literal
/// ("não informado na decisão", "nao consta no documento", ...). The model is
/// instructed to use the exact literal; paraphrasing is non-compliant, so
/// validation normalizes it rather than trusting the instruction alone.
fn missing_variant_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)^n[ãa]o\s+(consta|informad[oa]|indicad[oa]|mencionad[oa])(\s+(na|no)\s+(decis[ãa]o|documento|ac[óo]rd[ãa]o|processo))?\.?$",
        )
        .expect("missing-data pattern is valid")
    })
}

fn is_missing_variant(text: &str) -> bool {
    missing_variant_pattern().is_match(text.trim())
}

/// Validate and parse a raw backend response against the schema.
///
/// Returns the parsed object, with paraphrased missing-data fields normalized
/// to the canonical literal.
pub fn validate_response(
    schema: &OutputSchema,
    raw: &str,
) -> Result<serde_json::Map<String, Value>, GenerationError> {
    let parsed: Value = serde_json::from_str(raw).map_err(|e| GenerationError::NonConformant {
        detail: format!("response is not valid JSON: {e}"),
        raw: raw.to_string(),
    })?;

    let Value::Object(mut object) = parsed else {
        return Err(GenerationError::NonConformant {
            detail: "response is not a JSON object".into(),
            raw: raw.to_string(),
        });
    };

    for field in schema.fields {
        match object.get(field.name) {
            None => {
                return Err(GenerationError::NonConformant {
                    detail: format!("missing field '{}'", field.name),
                    raw: raw.to_string(),
                })
            }
            Some(value) if !value.is_string() => {
                return Err(GenerationError::NonConformant {
                    detail: format!("field '{}' is not a string", field.name),
                    raw: raw.to_string(),
                })
            }
            Some(_) => {}
        }
    }

    if let Some(extra) = object.keys().find(|k| schema.field(k).is_none()) {
        return Err(GenerationError::NonConformant {
            detail: format!("undeclared field '{extra}'"),
            raw: raw.to_string(),
        });
    }

    for value in object.values_mut() {
        if let Value::String(s) = value {
            if is_missing_variant(s) && s != MISSING_DATA_LITERAL {
                tracing::debug!("normalized paraphrased missing-data field");
                *value = Value::String(MISSING_DATA_LITERAL.to_string());
            }
        }
    }

    Ok(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CaseCategory;
    use crate::pipeline::schema::schema_for;

    fn dispense_schema() -> &'static OutputSchema {
        schema_for(CaseCategory::DispenseRequest)
    }

    fn valid_dispense_response() -> String {
        serde_json::json!({
            "numero_processo": "0001234-56.2024.8.26.0100",
            "resumo_decisao": "Condenação de R$ 500,00 em ação de R$ 50.000,00",
            "fundamentacao_dispensa": "Desproporção entre condenação e custo recursal",
            "recomendacao": "Submeter o caso à Ajure Terceirização",
        })
        .to_string()
    }

    #[test]
    fn accepts_conformant_response() {
        let object = validate_response(dispense_schema(), &valid_dispense_response()).unwrap();
        assert_eq!(object.len(), dispense_schema().fields.len());
        assert!(object["fundamentacao_dispensa"]
            .as_str()
            .unwrap()
            .contains("Desproporção"));
    }

    #[test]
    fn rejects_invalid_json_with_raw_attached() {
        let err = validate_response(dispense_schema(), "not json at all").unwrap_err();
        match err {
            GenerationError::NonConformant { raw, .. } => assert_eq!(raw, "not json at all"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_missing_field() {
        let raw = serde_json::json!({
            "numero_processo": "123",
            "resumo_decisao": "resumo",
            "recomendacao": "submeter",
        })
        .to_string();
        let err = validate_response(dispense_schema(), &raw).unwrap_err();
        assert!(err.to_string().contains("fundamentacao_dispensa"));
    }

    #[test]
    fn rejects_undeclared_field() {
        let mut value: Value = serde_json::from_str(&valid_dispense_response()).unwrap();
        value["campo_extra"] = Value::String("inesperado".into());
        let err = validate_response(dispense_schema(), &value.to_string()).unwrap_err();
        assert!(err.to_string().contains("campo_extra"));
    }

    #[test]
    fn rejects_wrong_field_type() {
        let mut value: Value = serde_json::from_str(&valid_dispense_response()).unwrap();
        value["recomendacao"] = Value::from(42);
        let err = validate_response(dispense_schema(), &value.to_string()).unwrap_err();
        assert!(err.to_string().contains("recomendacao"));
    }

    #[test]
    fn rejects_non_object_response() {
        let err = validate_response(dispense_schema(), "[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("not a JSON object"));
    }

    #[test]
    fn monetary_amounts_are_carried_as_text() {
        let mut value: Value = serde_json::from_str(&valid_dispense_response()).unwrap();
        value["resumo_decisao"] = Value::String("Condenação de R$ 500,00".into());
        assert!(validate_response(dispense_schema(), &value.to_string()).is_ok());
        value["resumo_decisao"] = Value::from(500.0);
        assert!(validate_response(dispense_schema(), &value.to_string()).is_err());
    }

    #[test]
    fn normalizes_paraphrased_missing_data_literal() {
        let mut value: Value = serde_json::from_str(&valid_dispense_response()).unwrap();
        value["numero_processo"] = Value::String("não informado na decisão".into());
        let object = validate_response(dispense_schema(), &value.to_string()).unwrap();
        assert_eq!(
            object["numero_processo"].as_str().unwrap(),
            MISSING_DATA_LITERAL
        );
    }

    #[test]
    fn keeps_exact_literal_and_ordinary_text_unchanged() {
        let mut value: Value = serde_json::from_str(&valid_dispense_response()).unwrap();
        value["numero_processo"] = Value::String(MISSING_DATA_LITERAL.into());
        let object = validate_response(dispense_schema(), &value.to_string()).unwrap();
        assert_eq!(
            object["numero_processo"].as_str().unwrap(),
            MISSING_DATA_LITERAL
        );
        // A sentence merely containing a variant is real content, not a
        // missing-data marker.
        assert!(object["fundamentacao_dispensa"]
            .as_str()
            .unwrap()
            .contains("Desproporção"));
    }

    #[test]
    fn missing_variant_matcher_covers_common_paraphrases() {
        assert!(is_missing_variant("Não consta na decisão"));
        assert!(is_missing_variant("nao consta"));
        assert!(is_missing_variant("Não informado no acórdão."));
        assert!(is_missing_variant("não mencionado no documento"));
        assert!(!is_missing_variant("O valor não consta na decisão de primeiro grau"));
        assert!(!is_missing_variant("Consta na decisão"));
    }
}
