//! Output schema registry: the structural contract each category's model
//! response must satisfy. Pure, total lookup over the category enum.

pub mod validate;

pub use validate::validate_response;

use serde_json::{json, Value};

use crate::model::CaseCategory;

/// Every declared field is free text on the wire; monetary amounts and
/// deadlines are carried verbatim as they appear in the decision.
#[derive(Debug, Clone, Copy)]
pub struct SchemaField {
    pub name: &'static str,
    pub description: &'static str,
}

/// Named-field contract for one category's structured output.
#[derive(Debug, Clone, Copy)]
pub struct OutputSchema {
    pub name: &'static str,
    pub fields: &'static [SchemaField],
}

impl OutputSchema {
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Render the backend `responseSchema` value.
    pub fn to_response_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        for field in self.fields {
            properties.insert(
                field.name.to_string(),
                json!({
                    "type": "STRING",
                    "description": field.description,
                }),
            );
        }
        json!({
            "type": "OBJECT",
            "properties": Value::Object(properties),
        })
    }
}

const SELF_DISPENSE_SCHEMA: OutputSchema = OutputSchema {
    name: "autodispensa",
    fields: &[
        SchemaField {
            name: "numero_processo",
            description: "Número do processo, ou \"Não consta na decisão\"",
        },
        SchemaField {
            name: "tipo_decisao",
            description: "SENTENÇA (1ª instância) ou ACÓRDÃO (2ª instância)",
        },
        SchemaField {
            name: "materia",
            description: "Matéria ou tipo de ação discutida na decisão",
        },
        SchemaField {
            name: "valor_condenacao",
            description: "Condenação patrimonial total, excluídos juros e correção",
        },
        SchemaField {
            name: "hipotese_aplicavel",
            description: "Item exato do Anexo I ou II aplicável, ou a vedação identificada",
        },
        SchemaField {
            name: "fundamentacao",
            description: "Fundamentação completa seguindo a ordem de análise",
        },
        SchemaField {
            name: "recomendacao",
            description: "Conclusão operacional, incluindo eventual pedido de autorização",
        },
    ],
};

const DISPENSE_REQUEST_SCHEMA: OutputSchema = OutputSchema {
    name: "dispensa",
    fields: &[
        SchemaField {
            name: "numero_processo",
            description: "Número do processo, ou \"Não consta na decisão\"",
        },
        SchemaField {
            name: "resumo_decisao",
            description: "Resumo objetivo da decisão desfavorável",
        },
        SchemaField {
            name: "fundamentacao_dispensa",
            description: "Motivos fáticos e jurídicos que justificam a dispensa",
        },
        SchemaField {
            name: "recomendacao",
            description: "Submissão à Ajure Terceirização ou ausência de fundamento",
        },
    ],
};

const AUTHORIZATION_REQUEST_SCHEMA: OutputSchema = OutputSchema {
    name: "autorizacao",
    fields: &[
        SchemaField {
            name: "numero_processo",
            description: "Número do processo, ou \"Não consta na decisão\"",
        },
        SchemaField {
            name: "prequestionamento",
            description: "Como a matéria foi prequestionada, ou o aviso de ausência",
        },
        SchemaField {
            name: "fundamentacao_autorizacao",
            description: "Fundamentos técnicos e estratégicos para o recurso excepcional",
        },
        SchemaField {
            name: "tipo_recurso",
            description: "Recurso Especial ou Recurso Extraordinário",
        },
        SchemaField {
            name: "prazo_fatal",
            description: "Prazo fatal para interposição, ou \"Não consta na decisão\"",
        },
        SchemaField {
            name: "recomendacao",
            description: "Autorizar a interposição ou registrar insuficiência de fundamentos",
        },
    ],
};

/// Schema registered for a category. Total over the enum; an unknown category
/// label never reaches this point because parsing fails at the orchestrator
/// boundary.
pub fn schema_for(category: CaseCategory) -> &'static OutputSchema {
    match category {
        CaseCategory::SelfDispense => &SELF_DISPENSE_SCHEMA,
        CaseCategory::DispenseRequest => &DISPENSE_REQUEST_SCHEMA,
        CaseCategory::AuthorizationRequest => &AUTHORIZATION_REQUEST_SCHEMA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_nonempty_schema() {
        for category in CaseCategory::ALL {
            let schema = schema_for(category);
            assert!(!schema.fields.is_empty());
            assert_eq!(schema.name, category.label());
        }
    }

    #[test]
    fn dispense_schema_declares_fundamentacao_field() {
        let schema = schema_for(CaseCategory::DispenseRequest);
        assert!(schema.field("fundamentacao_dispensa").is_some());
        assert!(schema.field("tipo_recurso").is_none());
    }

    #[test]
    fn authorization_schema_declares_remedy_and_deadline() {
        let schema = schema_for(CaseCategory::AuthorizationRequest);
        assert!(schema.field("tipo_recurso").is_some());
        assert!(schema.field("prazo_fatal").is_some());
        assert!(schema.field("prequestionamento").is_some());
    }

    #[test]
    fn response_schema_renders_backend_shape() {
        let schema = schema_for(CaseCategory::SelfDispense);
        let rendered = schema.to_response_schema();
        assert_eq!(rendered["type"], "OBJECT");
        let properties = rendered["properties"].as_object().unwrap();
        assert_eq!(properties.len(), schema.fields.len());
        for field in schema.fields {
            assert_eq!(properties[field.name]["type"], "STRING");
        }
    }
}
