use std::collections::HashMap;

pub type RawRow = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Nome,
    Obrigatorio,
    Empresa,
    TceEntregue,
    ConclusaoEstagio,
    DataConclusao,
    MotivoConclusao,
    PrazoMaximo,
    OrientadorAtual,
    OrientadorAnterior,
    Fpe,
    InicioTce,
    TerminoPrevisto,
    Parcial1Limite,
    Parcial1Entregue,
    Parcial1Avaliado,
    Parcial2Limite,
    Parcial2Entregue,
    Parcial2Avaliado,
    Parcial3Limite,
    Parcial3Entregue,
    Parcial3Avaliado,
    FinalLimite,
    FinalEntregue,
    FinalAvaliado,
    ProrrogacaoRegistro,
    Prorrogacao1,
    Prorrogacao2,
    Prorrogacao3,
    SupervisorEmpresa,
}

impl Field {
    /// Accepted header spellings, in resolution order.
    pub fn headers(self) -> &'static [&'static str] {
        match self {
            Field::Nome => &["NOME", "nome", "Nome"],
            Field::Obrigatorio => &["OBRIG.", "OBRIG", "obrigatorio", "Obrigatorio"],
            Field::Empresa => &["EMPRESA", "empresa", "Empresa"],
            Field::TceEntregue => &["TCE\nENTREGUE", "TCE_ENTREGUE", "TCE ENTREGUE", "tce_entregue"],
            Field::ConclusaoEstagio => &[
                "CONCLUSÃO\nDO ESTÁGIO",
                "CONCLUSAO DO ESTAGIO",
                "conclusao_estagio",
            ],
            Field::DataConclusao => &["Data", "DATA", "data_conclusao"],
            Field::MotivoConclusao => &["Motivo", "MOTIVO", "motivo_conclusao"],
            Field::PrazoMaximo => &["PRAZO MÁXIMO", "PRAZO MAXIMO", "prazo_maximo"],
            Field::OrientadorAtual => &[
                "ORIENTADOR ATUAL DESIGNADO PELO ARTICULADOR",
                "ORIENTADOR ATUAL",
                "orientador_atual",
            ],
            Field::OrientadorAnterior => &[
                "ORIENTADOR ANTERIOR DESIGNADO PELO ARTICULADOR",
                "ORIENTADOR ANTERIOR",
                "orientador_anterior",
            ],
            Field::Fpe => &["FPE", "fpe"],
            Field::InicioTce => &[
                "INÍCIO\n(TCE APROVADO)",
                "INICIO (TCE APROVADO)",
                "inicio_tce",
            ],
            Field::TerminoPrevisto => &["TÉRMINO PREVISTO", "TERMINO PREVISTO", "termino_previsto"],
            Field::Parcial1Limite => &[
                "Relatório Parcial 1",
                "RELATORIO PARCIAL 1",
                "relatorio_parcial_1_limite",
            ],
            Field::Parcial1Entregue => &["REALIZADO", "realizado", "relatorio_parcial_1_entregue"],
            Field::Parcial1Avaliado => &["AVALIADO", "avaliado", "relatorio_parcial_1_avaliado"],
            Field::Parcial2Limite => &[
                "Relatório Parcial 2",
                "RELATORIO PARCIAL 2",
                "relatorio_parcial_2_limite",
            ],
            Field::Parcial2Entregue => &["ENTREGUE", "entregue", "relatorio_parcial_2_entregue"],
            Field::Parcial2Avaliado => &["AVALIADO.1", "AVALIADO_1", "relatorio_parcial_2_avaliado"],
            Field::Parcial3Limite => &[
                "Relatório Parcial 3",
                "RELATORIO PARCIAL 3",
                "relatorio_parcial_3_limite",
            ],
            Field::Parcial3Entregue => &["ENTREGUE.1", "ENTREGUE_1", "relatorio_parcial_3_entregue"],
            Field::Parcial3Avaliado => &["AVALIADO.2", "AVALIADO_2", "relatorio_parcial_3_avaliado"],
            Field::FinalLimite => &["Relatório FINAL", "RELATORIO FINAL", "relatorio_final_limite"],
            Field::FinalEntregue => &["ENTREGUE.2", "ENTREGUE_2", "relatorio_final_entregue"],
            Field::FinalAvaliado => &["AVALIADO.3", "AVALIADO_3", "relatorio_final_avaliado"],
            Field::ProrrogacaoRegistro => &[
                "PRORROGAÇÕES DO ESTÁGIO",
                "PRORROGACOES DO ESTAGIO",
                "prorrogacoes",
            ],
            Field::Prorrogacao1 => &["Data 1", "DATA_1", "data_1"],
            Field::Prorrogacao2 => &["Data 2", "DATA_2", "data_2"],
            Field::Prorrogacao3 => &["Data 3", "DATA_3", "data_3"],
            Field::SupervisorEmpresa => &["SUPERVISOR NA EMPRESA", "SUPERVISOR", "supervisor_empresa"],
        }
    }
}

pub fn resolve<'a>(row: &'a RawRow, candidates: &[&str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|name| row.get(*name))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}

pub fn resolve_field(row: &RawRow, field: Field) -> Option<String> {
    resolve(row, field.headers()).map(str::to_string)
}

/// Renames repeated headers to `NAME_1`, `NAME_2`, ... in order of appearance.
/// The first occurrence keeps its name.
pub fn disambiguate_headers<I, S>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut output = Vec::new();

    for header in headers {
        let header = header.as_ref().trim().to_string();
        let count = seen.entry(header.clone()).or_insert(0);
        if *count == 0 {
            output.push(header);
        } else {
            output.push(format!("{header}_{count}"));
        }
        *count += 1;
    }

    output
}
