use crate::models::{Internship, Status};

/// Conclusion-reason patterns, checked in order against the lower-cased reason.
/// The first match wins. `encerramento` (term ran out) counts as a completion.
pub const REASON_RULES: [(&str, Status); 6] = [
    ("contratação", Status::Concluido),
    ("desistência", Status::Cancelado),
    ("demissão", Status::Interrompido),
    ("encerramento", Status::Concluido),
    ("interrupção", Status::Interrompido),
    ("cancelamento", Status::Cancelado),
];

/// Status of a recorded conclusion whose reason matches no rule.
pub const UNRECOGNIZED_REASON: Status = Status::Concluido;

pub fn classify(internship: &Internship) -> Status {
    classify_fields(
        internship.conclusao_estagio.as_deref(),
        internship.motivo_conclusao.as_deref(),
    )
}

pub fn classify_fields(conclusion: Option<&str>, reason: Option<&str>) -> Status {
    let concluded = conclusion.is_some_and(|value| !value.trim().is_empty());
    if !concluded {
        return Status::Ativo;
    }

    let reason = reason.unwrap_or_default().to_lowercase();
    REASON_RULES
        .iter()
        .find(|(pattern, _)| reason.contains(pattern))
        .map(|(_, status)| *status)
        .unwrap_or(UNRECOGNIZED_REASON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_conclusion_is_active() {
        assert_eq!(classify_fields(None, Some("Contratação")), Status::Ativo);
        assert_eq!(classify_fields(Some("   "), Some("Demissão")), Status::Ativo);
    }

    #[test]
    fn reasons_map_to_expected_statuses() {
        let cases = [
            ("Contratação pela empresa", Status::Concluido),
            ("Desistência do aluno", Status::Cancelado),
            ("Demissão por falta", Status::Interrompido),
            ("Encerramento do prazo", Status::Concluido),
            ("Interrupção pela empresa", Status::Interrompido),
            ("Cancelamento do TCE", Status::Cancelado),
        ];
        for (reason, expected) in cases {
            assert_eq!(classify_fields(Some("x"), Some(reason)), expected, "{reason}");
        }
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(
            classify_fields(Some("15/06/2024"), Some("DEMISSÃO")),
            Status::Interrompido
        );
    }

    #[test]
    fn earlier_rules_take_priority() {
        // contains both "demissão" and "encerramento"
        assert_eq!(
            classify_fields(Some("x"), Some("Encerramento após demissão")),
            Status::Interrompido
        );
        assert_eq!(
            classify_fields(Some("x"), Some("Cancelamento por contratação")),
            Status::Concluido
        );
    }

    #[test]
    fn unknown_or_missing_reason_counts_as_concluded() {
        assert_eq!(classify_fields(Some("x"), Some("outro motivo")), Status::Concluido);
        assert_eq!(classify_fields(Some("x"), None), Status::Concluido);
    }

    #[test]
    fn unaccented_reasons_do_not_match_accented_rules() {
        assert_eq!(classify_fields(Some("x"), Some("demissao")), Status::Concluido);
    }
}
