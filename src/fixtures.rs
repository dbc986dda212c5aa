use crate::models::{Internship, Milestone};

pub(crate) fn internship(nome: &str, empresa: Option<&str>) -> Internship {
    Internship {
        nome: nome.to_string(),
        obrigatorio: None,
        empresa: empresa.map(str::to_string),
        tce_entregue: None,
        conclusao_estagio: None,
        data_conclusao: None,
        motivo_conclusao: None,
        prazo_maximo: None,
        orientador_atual: None,
        orientador_anterior: None,
        fpe: None,
        inicio_tce: None,
        termino_previsto: None,
        relatorio_parcial_1: Milestone::default(),
        relatorio_parcial_2: Milestone::default(),
        relatorio_parcial_3: Milestone::default(),
        relatorio_final: Milestone::default(),
        prorrogacao_registro: None,
        prorrogacoes: Vec::new(),
        supervisor_empresa: None,
    }
}

pub(crate) fn concluded(mut internship: Internship, reason: &str) -> Internship {
    internship.conclusao_estagio = Some("01/01/2024".to_string());
    internship.motivo_conclusao = Some(reason.to_string());
    internship
}
