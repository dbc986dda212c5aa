use std::fmt;

use serde::{Deserialize, Serialize};

/// Value of the `OBRIG.` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mandatory {
    #[serde(rename = "SIM")]
    Sim,
    #[serde(rename = "NÃO")]
    Nao,
    #[serde(rename = "NAO")]
    NaoAscii,
    #[serde(rename = "290")]
    Code290,
}

impl Mandatory {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "SIM" => Some(Self::Sim),
            "NÃO" => Some(Self::Nao),
            "NAO" => Some(Self::NaoAscii),
            "290" => Some(Self::Code290),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sim => "SIM",
            Self::Nao => "NÃO",
            Self::NaoAscii => "NAO",
            Self::Code290 => "290",
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Nao | Self::NaoAscii)
    }
}

impl fmt::Display for Mandatory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived internship status. Never stored, see [`crate::status::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "ATIVO")]
    Ativo,
    #[serde(rename = "CONCLUÍDO")]
    Concluido,
    #[serde(rename = "INTERROMPIDO")]
    Interrompido,
    #[serde(rename = "CANCELADO")]
    Cancelado,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ativo => "ATIVO",
            Self::Concluido => "CONCLUÍDO",
            Self::Interrompido => "INTERROMPIDO",
            Self::Cancelado => "CANCELADO",
        }
    }

    /// Accepts the display form as well as the unaccented spelling typed on a keyboard.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "ATIVO" => Some(Self::Ativo),
            "CONCLUÍDO" | "CONCLUIDO" => Some(Self::Concluido),
            "INTERROMPIDO" => Some(Self::Interrompido),
            "CANCELADO" => Some(Self::Cancelado),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One report milestone. Dates are canonical `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub limite: Option<String>,
    pub entregue: Option<String>,
    pub avaliado: Option<String>,
}

/// One row of the source sheet after normalisation.
///
/// Every date field is either a canonical `YYYY-MM-DD` string or `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Internship {
    pub nome: String,
    pub obrigatorio: Option<Mandatory>,
    pub empresa: Option<String>,
    pub tce_entregue: Option<String>,
    pub conclusao_estagio: Option<String>,
    pub data_conclusao: Option<String>,
    pub motivo_conclusao: Option<String>,
    pub prazo_maximo: Option<String>,
    pub orientador_atual: Option<String>,
    pub orientador_anterior: Option<String>,
    pub fpe: Option<String>,
    pub inicio_tce: Option<String>,
    pub termino_previsto: Option<String>,
    pub relatorio_parcial_1: Milestone,
    pub relatorio_parcial_2: Milestone,
    pub relatorio_parcial_3: Milestone,
    pub relatorio_final: Milestone,
    pub prorrogacao_registro: Option<String>,
    pub prorrogacoes: Vec<String>,
    pub supervisor_empresa: Option<String>,
}

impl Internship {
    /// Current advisor if set, otherwise the previous one.
    pub fn advisor(&self) -> Option<&str> {
        self.orientador_atual
            .as_deref()
            .or(self.orientador_anterior.as_deref())
    }
}

/// Aggregate row shared by companies and advisors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityCount {
    pub nome: String,
    pub total_internships: usize,
    pub active_internships: usize,
    pub concluded_internships: usize,
}

pub type Company = EntityCount;
pub type Advisor = EntityCount;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intern {
    pub nome: String,
    pub obrigatorio: Option<Mandatory>,
    pub empresa: Option<String>,
    pub orientador: Option<String>,
    pub status: Status,
    pub inicio_estagio: Option<String>,
    pub termino_estagio: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub internships: Vec<Internship>,
    pub companies: Vec<Company>,
    pub advisors: Vec<Advisor>,
    pub interns: Vec<Intern>,
}

#[derive(Debug, Clone, Default)]
pub struct InternshipFilters {
    pub search: Option<String>,
    pub status: Vec<Status>,
    pub mandatory: Vec<Mandatory>,
    pub company: Vec<String>,
    pub advisor: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InternshipStats {
    pub total: usize,
    pub active: usize,
    pub concluded: usize,
    pub interrupted: usize,
    pub canceled: usize,
    pub mandatory: usize,
    pub optional: usize,
}

/// Figures shown on a company, advisor or student detail page.
///
/// Durations are whole days from `inicioTce`. Records whose dates do not form
/// a real calendar day are left out of the sums.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
    pub total: usize,
    pub active: usize,
    pub concluded: usize,
    pub interrupted: usize,
    pub canceled: usize,
    pub mandatory: usize,
    pub optional: usize,
    pub companies: usize,
    pub advisors: usize,
    pub current: bool,
    pub success_rate: u32,
    /// Mean length of the concluded internships, to `dataConclusao`.
    pub avg_duration_days: i64,
    /// Summed length of every internship. The first active one without a
    /// conclusion date runs until the reference day.
    pub total_duration_days: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub companies: Vec<String>,
    /// Current and previous advisors together.
    pub advisors: Vec<String>,
    pub statuses: Vec<Status>,
    pub types: Vec<Mandatory>,
}
