use std::collections::HashMap;

use crate::models::{Advisor, Company, Dataset, EntityCount, Intern, Internship, Status};
use crate::status::classify;

/// Groups by exact, trimmed company name. Sorted by total, ties in encounter order.
pub fn companies(internships: &[Internship]) -> Vec<Company> {
    tally(internships.iter().filter_map(|internship| {
        internship
            .empresa
            .as_deref()
            .map(|name| (name.trim(), internship))
    }))
}

/// Each record counts once, under its current advisor or else its previous one.
///
/// Detail lookups match either field (see [`crate::query::for_advisor`]), so an
/// advisor's page can list more internships than this total.
pub fn advisors(internships: &[Internship]) -> Vec<Advisor> {
    tally(
        internships
            .iter()
            .filter_map(|internship| internship.advisor().map(|name| (name, internship))),
    )
}

pub fn interns(internships: &[Internship]) -> Vec<Intern> {
    internships
        .iter()
        .map(|internship| Intern {
            nome: internship.nome.clone(),
            obrigatorio: internship.obrigatorio,
            empresa: internship.empresa.clone(),
            orientador: internship.advisor().map(str::to_string),
            status: classify(internship),
            inicio_estagio: internship.inicio_tce.clone(),
            termino_estagio: internship
                .data_conclusao
                .clone()
                .or_else(|| internship.termino_previsto.clone()),
        })
        .collect()
}

pub fn build_dataset(internships: Vec<Internship>) -> Dataset {
    let companies = companies(&internships);
    let advisors = advisors(&internships);
    let interns = interns(&internships);

    Dataset {
        internships,
        companies,
        advisors,
        interns,
    }
}

fn tally<'a, I>(entries: I) -> Vec<EntityCount>
where
    I: Iterator<Item = (&'a str, &'a Internship)>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<EntityCount> = Vec::new();

    for (name, internship) in entries {
        let slot = *index.entry(name).or_insert_with(|| {
            counts.push(EntityCount {
                nome: name.to_string(),
                total_internships: 0,
                active_internships: 0,
                concluded_internships: 0,
            });
            counts.len() - 1
        });

        let entry = &mut counts[slot];
        entry.total_internships += 1;
        // Everything that is not active is lumped together here.
        if classify(internship) == Status::Ativo {
            entry.active_internships += 1;
        } else {
            entry.concluded_internships += 1;
        }
    }

    counts.sort_by(|a, b| b.total_internships.cmp(&a.total_internships));
    counts
}
