use crate::columns::{resolve_field, Field, RawRow};
use crate::dates::normalize_date;
use crate::models::{Internship, Mandatory, Milestone};

const EXTENSION_SLOTS: [Field; 3] = [Field::Prorrogacao1, Field::Prorrogacao2, Field::Prorrogacao3];

/// Builds an [`Internship`] from one sheet row, or `None` when the name is blank.
pub fn transform_row(row: &RawRow) -> Option<Internship> {
    let nome = resolve_field(row, Field::Nome)?;

    Some(Internship {
        nome,
        obrigatorio: resolve_field(row, Field::Obrigatorio)
            .as_deref()
            .and_then(Mandatory::parse),
        empresa: resolve_field(row, Field::Empresa),
        tce_entregue: date_field(row, Field::TceEntregue),
        conclusao_estagio: resolve_field(row, Field::ConclusaoEstagio),
        data_conclusao: date_field(row, Field::DataConclusao),
        motivo_conclusao: resolve_field(row, Field::MotivoConclusao),
        prazo_maximo: date_field(row, Field::PrazoMaximo),
        orientador_atual: resolve_field(row, Field::OrientadorAtual),
        orientador_anterior: resolve_field(row, Field::OrientadorAnterior),
        fpe: resolve_field(row, Field::Fpe),
        inicio_tce: date_field(row, Field::InicioTce),
        termino_previsto: date_field(row, Field::TerminoPrevisto),
        relatorio_parcial_1: milestone(
            row,
            [Field::Parcial1Limite, Field::Parcial1Entregue, Field::Parcial1Avaliado],
        ),
        relatorio_parcial_2: milestone(
            row,
            [Field::Parcial2Limite, Field::Parcial2Entregue, Field::Parcial2Avaliado],
        ),
        relatorio_parcial_3: milestone(
            row,
            [Field::Parcial3Limite, Field::Parcial3Entregue, Field::Parcial3Avaliado],
        ),
        relatorio_final: milestone(
            row,
            [Field::FinalLimite, Field::FinalEntregue, Field::FinalAvaliado],
        ),
        prorrogacao_registro: resolve_field(row, Field::ProrrogacaoRegistro),
        prorrogacoes: EXTENSION_SLOTS
            .iter()
            .filter_map(|field| date_field(row, *field))
            .collect(),
        supervisor_empresa: resolve_field(row, Field::SupervisorEmpresa),
    })
}

pub fn transform_rows<'a, I>(rows: I) -> Vec<Internship>
where
    I: IntoIterator<Item = &'a RawRow>,
{
    rows.into_iter().filter_map(transform_row).collect()
}

fn date_field(row: &RawRow, field: Field) -> Option<String> {
    resolve_field(row, field).and_then(|value| normalize_date(&value))
}

// Limit, delivered, evaluated. The three dates are not checked against each other.
fn milestone(row: &RawRow, [limite, entregue, avaliado]: [Field; 3]) -> Milestone {
    Milestone {
        limite: date_field(row, limite),
        entregue: date_field(row, entregue),
        avaliado: date_field(row, avaliado),
    }
}
