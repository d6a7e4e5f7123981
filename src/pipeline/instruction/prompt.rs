//! Instruction rendering: category header + decision procedure + supporting
//! documents block + final task line, composed deterministically.

use super::procedure::{procedure_for, render_procedure};
use super::MISSING_DATA_LITERAL;
use crate::config::AnalysisConfig;
use crate::model::CaseCategory;
use crate::pipeline::retrieval::RetrievalContext;

const SELF_DISPENSE_HEADER: &str = "Você é um assistente jurídico sênior, responsável por \
avaliar AUTODISPENSA de recurso.

Princípios:
- Trabalhe exclusivamente com o contexto de autodispensa fornecido.
- Priorize aderência estrita à Política Recursal. Nada de suposições.
- Se faltar dado na decisão: escreva exatamente \"Não consta na decisão\".
- Se envolver matéria de interposição obrigatória ou vedação: não aplique autodispensa.
- Diretriz institucional: nas hipóteses de autodispensa presume-se ausência de interesse em \
recorrer. Se o escritório entender pela interposição, deve solicitar autorização prévia à \
Ajure Terceirização.
- Linguagem: formal, técnica, objetiva.";

const DISPENSE_REQUEST_HEADER: &str = "Você é um assistente jurídico sênior, responsável por \
elaborar pedidos de DISPENSA DE RECURSO.

Princípios:
- A regra geral da Política Recursal é a interposição obrigatória de recurso contra decisões \
desfavoráveis de 1ª instância; o pedido de dispensa é uma EXCEÇÃO.
- O objetivo do pedido é CONVENCER a Ajure Terceirização de que não é vantajoso interpor \
recurso no caso concreto.
- Nunca invente dados, jurisprudência ou fundamentos que não estejam no contexto. Se não \
constar na decisão: escreva \"Não consta na decisão\".
- O pedido deve ser redigido em linguagem formal, clara e técnica.";

const AUTHORIZATION_REQUEST_HEADER: &str = "Você é um assistente jurídico sênior, responsável \
por formular pedidos de AUTORIZAÇÃO DE RECURSO (especial ou extraordinário).

Princípios:
- A interposição de REsp/RE exige autorização expressa da Ajure Terceirização.
- A autorização somente será concedida quando demonstrada a relevância jurídica do tema, a \
existência de prequestionamento explícito e a probabilidade de êxito do recurso excepcional.
- Não inventar jurisprudência ou fundamentos externos. Se a decisão citou precedente, registre \
exatamente como consta. Se não houver citação: \"Não consta na decisão\".
- Linguagem formal, técnica e protocolar.";

/// Prefix of `text` with at most `max_chars` characters, cut on a char
/// boundary. Truncation always keeps the document's opening.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Build the complete instruction for one request.
///
/// The retrieval context is only interpolated for self-dispense; the other
/// category templates have no context slot, so stray context can never leak
/// into them.
pub fn build_instruction(
    category: CaseCategory,
    decision_text: &str,
    context: &RetrievalContext,
    config: &AnalysisConfig,
) -> String {
    let doc = truncate_chars(decision_text, config.max_document_chars);
    let procedure = render_procedure(&procedure_for(category));

    match category {
        CaseCategory::SelfDispense => format!(
            "{SELF_DISPENSE_HEADER}\n\n{procedure}\n\
             \n**DOCUMENTOS PARA ANÁLISE:**\n\
             \n**1. GUIA DE AUTODISPENSA (Fonte da Verdade para Fundamentação):**\n\
             ---\n{context}\n---\n\
             \n**2. DECISÃO JUDICIAL (Fonte dos Fatos):**\n\
             ---\n{doc}\n---\n\
             \n**TAREFA FINAL:**\n\
             Seguindo rigorosamente a ordem de análise, analise os documentos e preencha o \
             esquema JSON solicitado.",
            context = context.joined(),
        ),
        CaseCategory::DispenseRequest => format!(
            "{DISPENSE_REQUEST_HEADER}\n\n{procedure}\n\
             \n**DOCUMENTO PARA ANÁLISE (DECISÃO JUDICIAL):**\n\
             ---\n{doc}\n---\n\
             \n**TAREFA FINAL:**\n\
             Com base na sua análise da decisão, preencha o esquema JSON solicitado, focando no \
             campo 'fundamentacao_dispensa'.",
        ),
        CaseCategory::AuthorizationRequest => format!(
            "{AUTHORIZATION_REQUEST_HEADER}\n\n{procedure}\n\
             \n**DOCUMENTO PARA ANÁLISE (DECISÃO JUDICIAL / ACÓRDÃO):**\n\
             ---\n{doc}\n---\n\
             \n**TAREFA FINAL:**\n\
             Com base na sua análise, preencha o esquema JSON solicitado, focando no campo \
             'fundamentacao_autorizacao'.",
        ),
    }
}
