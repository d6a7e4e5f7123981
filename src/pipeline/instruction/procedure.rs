//! Decision procedures as ordered decision tables.
//!
//! Each step pairs the condition the model must test with the outcome it must
//! produce when the condition holds. Steps are evaluated in order and the
//! first applicable step wins; keeping the ordering as data makes it
//! auditable and testable without a generation call.

use super::{
    ABSOLUTE_PROHIBITION_PHRASE, INSUFFICIENT_GROUNDS_LITERAL, MISSING_DATA_LITERAL,
    NO_APPELLATE_HYPOTHESIS_LITERAL, NO_DISPENSE_BASIS_LITERAL, NO_PREQUESTIONING_LITERAL,
    NO_TRIAL_HYPOTHESIS_LITERAL, PRIOR_AUTHORIZATION_RECOMMENDATION, RESIDUAL_DOUBT_LITERAL,
    VALUE_RULE_CITATION,
};
use crate::model::CaseCategory;

/// One step of a category's decision procedure.
#[derive(Debug, Clone)]
pub struct DecisionStep {
    pub title: &'static str,
    /// Condition the model must check against the decision text.
    pub test: String,
    /// What the model must produce when the condition holds.
    pub outcome: String,
}

impl DecisionStep {
    fn new(title: &'static str, test: impl Into<String>, outcome: impl Into<String>) -> Self {
        Self {
            title,
            test: test.into(),
            outcome: outcome.into(),
        }
    }
}

/// Ordered decision table for a category. Total over the enum: adding a
/// category without a procedure fails to compile.
pub fn procedure_for(category: CaseCategory) -> Vec<DecisionStep> {
    match category {
        CaseCategory::SelfDispense => self_dispense_procedure(),
        CaseCategory::DispenseRequest => dispense_request_procedure(),
        CaseCategory::AuthorizationRequest => authorization_request_procedure(),
    }
}

fn self_dispense_procedure() -> Vec<DecisionStep> {
    vec![
        DecisionStep::new(
            "Exceções e vedações absolutas",
            "A decisão trata de matéria com interposição obrigatória ou vedação absoluta \
             (p.ex., PASEP, FIES, MCMV, Cédula Rural, Superendividamento, ou matérias \
             residuais — todas as que não forem explicitamente mencionadas nos anexos de \
             suporte)?",
            format!(
                "Responder: \"{ABSOLUTE_PROHIBITION_PHRASE}. A matéria ([nome]) não permite \
                 autodispensa.\" e encerrar a análise."
            ),
        ),
        DecisionStep::new(
            "Tipo de decisão e recurso cabível",
            "A decisão é SENTENÇA (1ª instância) ou ACÓRDÃO (2ª instância)?",
            format!(
                "SENTENÇA → o recurso cabível é Apelação (Justiça Comum) ou Recurso Inominado \
                 (JEC); usar o ANEXO I. ACÓRDÃO → o recurso cabível é REsp/RE; usar o ANEXO II. \
                 Se não for possível identificar, registrar \"{MISSING_DATA_LITERAL}\" e avaliar \
                 pelo melhor indício constante no contexto, sem inferências externas. Se \
                 persistir dúvida, retornar \"{RESIDUAL_DOUBT_LITERAL}\"."
            ),
        ),
        DecisionStep::new(
            "Hipótese de valor — somente SENTENÇA (Anexo I)",
            "Calcule a condenação patrimonial total (astreintes, danos morais, materiais, \
             honorários) excluindo juros e correção. JEC ≤ R$ 5.000,00? Justiça Comum ≤ \
             R$ 10.000,00? Os limites por valor não se aplicam se a sentença impõe obrigação \
             adicional não pecuniária à parte representada (p.ex. desconstituição ou alteração \
             de contrato/garantias).",
            format!(
                "Dentro do limite → autodispensa obrigatória, fundamentando com \
                 \"{VALUE_RULE_CITATION}\". Havendo obrigação adicional não pecuniária → \
                 registrar a VEDAÇÃO: a interposição do recurso é obrigatória."
            ),
        ),
        DecisionStep::new(
            "Demais hipóteses do Anexo I — somente SENTENÇA",
            "Não se enquadrando no valor, a situação corresponde a uma (e apenas uma) hipótese \
             específica do Anexo I (p.ex., gratuidade, Súmulas ou Teses indicadas no Anexo I)?",
            format!(
                "Fundamentar citando o item exato do Anexo I e explicar o encaixe. Se nada do \
                 Anexo I se aplicar → \"{NO_TRIAL_HYPOTHESIS_LITERAL}\""
            ),
        ),
        DecisionStep::new(
            "Hipóteses do Anexo II — somente ACÓRDÃO",
            "O caso se enquadra em alguma hipótese do Anexo II para recursos excepcionais \
             (teses sumuladas, repetitivos/IRDR/IAC, alçadas e demais alíneas previstas)?",
            format!(
                "Fundamentar citando o item exato do Anexo II. Se nada do Anexo II se aplicar → \
                 \"{NO_APPELLATE_HYPOTHESIS_LITERAL}\""
            ),
        ),
        DecisionStep::new(
            "Autorização estratégica — aplica-se a qualquer desfecho",
            "Mesmo em hipótese de autodispensa, existe justificativa estratégica robusta para \
             interpor o recurso?",
            format!("Acrescentar: \"{PRIOR_AUTHORIZATION_RECOMMENDATION}\""),
        ),
    ]
}

fn dispense_request_procedure() -> Vec<DecisionStep> {
    vec![
        DecisionStep::new(
            "Identificação do regime",
            "Em regra a decisão é recorrível. Trata-se de hipótese de autodispensa (Anexo I ou \
             II) ou de matéria de interposição obrigatória sem condições desfavoráveis?",
            "Nesses casos NÃO cabe pedido de dispensa; registrar o enquadramento e encerrar."
                .to_string(),
        ),
        DecisionStep::new(
            "Hipóteses de dispensa",
            "Há valor econômico desproporcional (condenação irrisória frente ao pedido inicial \
             ou ao custo recursal) ou robustez probatória em favor da parte contrária (provas, \
             documentos e fundamentos da sentença indicando alta probabilidade de insucesso do \
             recurso)?",
            "Fundamentar demonstrando a desproporção entre benefício esperado e custo/risco, ou \
             destacando os pontos da decisão que revelam a robustez (laudos, testemunhos, \
             precedentes citados PELO JUIZ)."
                .to_string(),
        ),
        DecisionStep::new(
            "Fundamentação",
            "Os motivos fáticos e jurídicos do pedido estão expostos de forma objetiva?",
            format!(
                "Citar jurisprudência exatamente como consta na sentença, sem inventar ou buscar \
                 fora; se não houver citação, registrar \"{MISSING_DATA_LITERAL}\". Deixar claro \
                 que a decisão pela dispensa depende de análise e autorização da Ajure \
                 Terceirização."
            ),
        ),
        DecisionStep::new(
            "Conclusão",
            "Há fundamento para o pedido?",
            format!(
                "Com fundamento → recomendar a submissão do caso à Ajure Terceirização. Sem \
                 fundamento → registrar: \"{NO_DISPENSE_BASIS_LITERAL}\""
            ),
        ),
    ]
}

fn authorization_request_procedure() -> Vec<DecisionStep> {
    vec![
        DecisionStep::new(
            "Verificação de admissibilidade",
            "Trata-se de decisão/acórdão de 2ª instância e a matéria foi prequestionada de forma \
             clara e explícita no processo de origem?",
            format!(
                "Sem prequestionamento → registrar \"{NO_PREQUESTIONING_LITERAL}\" e encerrar a \
                 análise."
            ),
        ),
        DecisionStep::new(
            "Fundamentação jurídica",
            "Há matéria constitucional ou infraconstitucional relevante? O acórdão contraria \
             jurisprudência pacificada do STJ/STF, súmula vinculante, tese de recurso repetitivo \
             ou interpretação dominante de tribunal superior?",
            format!(
                "Registrar de forma explícita a divergência com o precedente, exatamente como \
                 consta na decisão; se não houver citação, registrar \"{MISSING_DATA_LITERAL}\"."
            ),
        ),
        DecisionStep::new(
            "Estratégia processual",
            "A interposição é necessária para preservar tese estratégica, útil para reverter \
             condenação relevante, ou recomendável para evitar precedente desfavorável? Há risco \
             elevado de inadmissão ou impacto negativo?",
            "Avaliar e, havendo risco elevado de inadmissão ou impacto negativo, ressaltar no \
             pedido."
                .to_string(),
        ),
        DecisionStep::new(
            "Conclusão",
            "Há fundamentos robustos para a autorização?",
            format!(
                "Com fundamentos → recomendar a autorização, indicando o tipo de recurso \
                 (\"Recurso Especial\" ou \"Recurso Extraordinário\") e o prazo fatal. Sem \
                 fundamentos → registrar: \"{INSUFFICIENT_GROUNDS_LITERAL}\""
            ),
        ),
    ]
}

/// Render a decision table as numbered procedure text with explicit
/// first-match-wins framing.
pub fn render_procedure(steps: &[DecisionStep]) -> String {
    let mut out = String::from("Siga os passos na ordem e pare no primeiro item aplicável.\n");
    for (i, step) in steps.iter().enumerate() {
        out.push_str(&format!(
            "\nPASSO {} — {}\n{}\n→ {}\n",
            i + 1,
            step.title,
            step.test,
            step.outcome
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_procedure() {
        for category in CaseCategory::ALL {
            assert!(
                !procedure_for(category).is_empty(),
                "no procedure for {category}"
            );
        }
    }

    #[test]
    fn self_dispense_tests_value_rule_before_special_hypotheses() {
        let steps = procedure_for(CaseCategory::SelfDispense);
        let value_pos = steps
            .iter()
            .position(|s| s.outcome.contains(VALUE_RULE_CITATION))
            .expect("value rule step");
        let hypothesis_pos = steps
            .iter()
            .position(|s| s.outcome.contains(NO_TRIAL_HYPOTHESIS_LITERAL))
            .expect("special hypothesis step");
        assert!(value_pos < hypothesis_pos);
    }

    #[test]
    fn self_dispense_starts_with_absolute_exceptions() {
        let steps = procedure_for(CaseCategory::SelfDispense);
        assert!(steps[0].outcome.contains(ABSOLUTE_PROHIBITION_PHRASE));
        assert!(steps[0].test.contains("PASEP"));
    }

    #[test]
    fn decision_type_step_falls_back_to_residual_doubt() {
        let steps = procedure_for(CaseCategory::SelfDispense);
        let type_step = &steps[1];
        assert!(type_step.outcome.contains(MISSING_DATA_LITERAL));
        assert!(type_step.outcome.contains(RESIDUAL_DOUBT_LITERAL));
    }

    #[test]
    fn value_thresholds_and_carve_out_are_spelled_out() {
        let steps = procedure_for(CaseCategory::SelfDispense);
        let value_step = &steps[2];
        assert!(value_step.test.contains("R$ 5.000,00"));
        assert!(value_step.test.contains("R$ 10.000,00"));
        assert!(value_step.test.contains("excluindo juros e correção"));
        assert!(value_step.test.contains("obrigação adicional não pecuniária"));
    }

    #[test]
    fn dispense_request_concludes_with_no_basis_literal() {
        let steps = procedure_for(CaseCategory::DispenseRequest);
        let last = steps.last().unwrap();
        assert!(last.outcome.contains(NO_DISPENSE_BASIS_LITERAL));
    }

    #[test]
    fn authorization_admissibility_is_terminal_first_step() {
        let steps = procedure_for(CaseCategory::AuthorizationRequest);
        assert!(steps[0].outcome.contains(NO_PREQUESTIONING_LITERAL));
        let last = steps.last().unwrap();
        assert!(last.outcome.contains("Recurso Especial"));
        assert!(last.outcome.contains("Recurso Extraordinário"));
        assert!(last.outcome.contains(INSUFFICIENT_GROUNDS_LITERAL));
    }

    #[test]
    fn rendered_procedure_numbers_steps_in_order() {
        let rendered = render_procedure(&procedure_for(CaseCategory::SelfDispense));
        assert!(rendered.starts_with("Siga os passos na ordem"));
        let p1 = rendered.find("PASSO 1").unwrap();
        let p2 = rendered.find("PASSO 2").unwrap();
        let p6 = rendered.find("PASSO 6").unwrap();
        assert!(p1 < p2 && p2 < p6);
    }
}
