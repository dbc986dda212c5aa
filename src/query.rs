use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;

use crate::models::{
    FilterOptions, Internship, InternshipFilters, InternshipStats, Mandatory, PersonSummary,
    Status,
};
use crate::status::classify;

pub fn filter_internships<'a>(
    internships: &'a [Internship],
    filters: &InternshipFilters,
) -> Vec<&'a Internship> {
    let search = filters
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase);

    internships
        .iter()
        .filter(|internship| {
            if let Some(term) = search.as_deref() {
                let hit = contains_lower(Some(&internship.nome), term)
                    || contains_lower(internship.empresa.as_deref(), term)
                    || contains_lower(internship.orientador_atual.as_deref(), term)
                    || contains_lower(internship.orientador_anterior.as_deref(), term);
                if !hit {
                    return false;
                }
            }

            if !filters.status.is_empty() && !filters.status.contains(&classify(internship)) {
                return false;
            }

            if !filters.mandatory.is_empty()
                && !internship
                    .obrigatorio
                    .is_some_and(|flag| filters.mandatory.contains(&flag))
            {
                return false;
            }

            if !filters.company.is_empty()
                && !internship
                    .empresa
                    .as_ref()
                    .is_some_and(|company| filters.company.contains(company))
            {
                return false;
            }

            if !filters.advisor.is_empty()
                && !internship
                    .advisor()
                    .is_some_and(|advisor| filters.advisor.iter().any(|a| a == advisor))
            {
                return false;
            }

            true
        })
        .collect()
}

/// Dashboard totals. Anything other than `SIM` counts as optional here.
pub fn stats(internships: &[Internship]) -> InternshipStats {
    let mut stats = InternshipStats {
        total: internships.len(),
        ..InternshipStats::default()
    };

    for internship in internships {
        match classify(internship) {
            Status::Ativo => stats.active += 1,
            Status::Concluido => stats.concluded += 1,
            Status::Interrompido => stats.interrupted += 1,
            Status::Cancelado => stats.canceled += 1,
        }

        if internship.obrigatorio == Some(Mandatory::Sim) {
            stats.mandatory += 1;
        } else {
            stats.optional += 1;
        }
    }

    stats
}

pub fn for_company<'a>(internships: &'a [Internship], company: &str) -> Vec<&'a Internship> {
    internships
        .iter()
        .filter(|internship| eq_lower(internship.empresa.as_deref(), company))
        .collect()
}

/// Matches the current OR the previous advisor, unlike the advisor aggregate
/// which only counts the current one.
pub fn for_advisor<'a>(internships: &'a [Internship], advisor: &str) -> Vec<&'a Internship> {
    internships
        .iter()
        .filter(|internship| {
            eq_lower(internship.orientador_atual.as_deref(), advisor)
                || eq_lower(internship.orientador_anterior.as_deref(), advisor)
        })
        .collect()
}

pub fn for_student<'a>(internships: &'a [Internship], student: &str) -> Vec<&'a Internship> {
    internships
        .iter()
        .filter(|internship| eq_lower(Some(&internship.nome), student))
        .collect()
}

/// `today` closes the running internship in `total_duration_days`.
pub fn summarize(internships: &[&Internship], today: NaiveDate) -> PersonSummary {
    let mut summary = PersonSummary {
        total: internships.len(),
        ..PersonSummary::default()
    };
    let mut companies = HashSet::new();
    let mut advisors = HashSet::new();
    let mut concluded_days = 0;

    let running = internships
        .iter()
        .position(|internship| classify(internship) == Status::Ativo);
    summary.current = running.is_some();

    for (index, internship) in internships.iter().enumerate() {
        let status = classify(internship);
        match status {
            Status::Ativo => summary.active += 1,
            Status::Concluido => summary.concluded += 1,
            Status::Interrompido => summary.interrupted += 1,
            Status::Cancelado => summary.canceled += 1,
        }

        match internship.obrigatorio {
            Some(Mandatory::Sim) => summary.mandatory += 1,
            Some(flag) if flag.is_optional() => summary.optional += 1,
            _ => {}
        }

        if let Some(company) = internship.empresa.as_deref() {
            companies.insert(company);
        }
        if let Some(advisor) = internship.orientador_atual.as_deref() {
            advisors.insert(advisor);
        }

        let end = match internship.data_conclusao.as_deref() {
            Some(end) => parse_iso(end),
            None if running == Some(index) => Some(today),
            None => None,
        };
        if let Some(days) = duration_days(internship.inicio_tce.as_deref(), end) {
            summary.total_duration_days += days;
        }
        if status == Status::Concluido {
            let end = internship.data_conclusao.as_deref().and_then(parse_iso);
            concluded_days += duration_days(internship.inicio_tce.as_deref(), end).unwrap_or(0);
        }
    }

    summary.companies = companies.len();
    summary.advisors = advisors.len();
    let finished = summary.concluded + summary.interrupted + summary.canceled;
    if summary.concluded > 0 {
        let rate = summary.concluded as f64 / finished as f64;
        summary.success_rate = (rate * 100.0).round() as u32;
        summary.avg_duration_days =
            (concluded_days as f64 / summary.concluded as f64).round() as i64;
    }

    summary
}

/// Sorted distinct companies and advisors, plus the fixed status and flag lists.
pub fn filter_options(internships: &[Internship]) -> FilterOptions {
    let companies: BTreeSet<&str> = internships
        .iter()
        .filter_map(|internship| internship.empresa.as_deref())
        .collect();
    let advisors: BTreeSet<&str> = internships
        .iter()
        .flat_map(|internship| {
            [
                internship.orientador_atual.as_deref(),
                internship.orientador_anterior.as_deref(),
            ]
        })
        .flatten()
        .collect();

    FilterOptions {
        companies: companies.into_iter().map(str::to_string).collect(),
        advisors: advisors.into_iter().map(str::to_string).collect(),
        statuses: vec![
            Status::Ativo,
            Status::Concluido,
            Status::Interrompido,
            Status::Cancelado,
        ],
        types: vec![
            Mandatory::Sim,
            Mandatory::Nao,
            Mandatory::NaoAscii,
            Mandatory::Code290,
        ],
    }
}

/// Active internships whose maximum deadline is strictly before `today`,
/// earliest deadline first.
pub fn overdue(internships: &[Internship], today: NaiveDate) -> Vec<(&Internship, NaiveDate)> {
    let mut late: Vec<(&Internship, NaiveDate)> = internships
        .iter()
        .filter(|internship| classify(internship) == Status::Ativo)
        .filter_map(|internship| {
            let deadline = internship.prazo_maximo.as_deref()?;
            let deadline = parse_iso(deadline)?;
            (deadline < today).then_some((internship, deadline))
        })
        .collect();

    late.sort_by_key(|(_, deadline)| *deadline);
    late
}

fn parse_iso(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn duration_days(start: Option<&str>, end: Option<NaiveDate>) -> Option<i64> {
    let start = parse_iso(start?)?;
    Some(end?.signed_duration_since(start).num_days())
}

fn contains_lower(value: Option<&str>, term: &str) -> bool {
    value.is_some_and(|value| value.to_lowercase().contains(term))
}

fn eq_lower(value: Option<&str>, expected: &str) -> bool {
    value.is_some_and(|value| value.to_lowercase() == expected.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{concluded, internship};

    fn with_advisors(
        mut record: Internship,
        current: Option<&str>,
        previous: Option<&str>,
    ) -> Internship {
        record.orientador_atual = current.map(str::to_string);
        record.orientador_anterior = previous.map(str::to_string);
        record
    }

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn dated(mut record: Internship, start: &str, end: Option<&str>) -> Internship {
        record.inicio_tce = Some(start.to_string());
        record.data_conclusao = end.map(str::to_string);
        record
    }

    fn sample() -> Vec<Internship> {
        let mut ana = with_advisors(internship("Ana Silva", Some("Acme")), Some("Prof. Lima"), None);
        ana.obrigatorio = Some(Mandatory::Sim);
        ana.prazo_maximo = Some("2024-01-31".to_string());

        let mut bruno = concluded(
            with_advisors(internship("Bruno Reis", Some("Beta")), None, Some("Prof. Lima")),
            "Desistência",
        );
        bruno.obrigatorio = Some(Mandatory::NaoAscii);

        let mut carla = concluded(
            with_advisors(
                internship("Carla Dias", Some("Acme")),
                Some("Prof. Souza"),
                Some("Prof. Lima"),
            ),
            "Contratação",
        );
        carla.obrigatorio = Some(Mandatory::Nao);

        let mut ana_again = internship("ana silva", Some("Gama"));
        ana_again.prazo_maximo = Some("2023-06-30".to_string());

        vec![ana, bruno, carla, ana_again]
    }

    #[test]
    fn empty_filters_match_everything() {
        let records = sample();
        assert_eq!(filter_internships(&records, &InternshipFilters::default()).len(), 4);
    }

    #[test]
    fn search_covers_names_companies_and_advisors() {
        let records = sample();
        let by_name = InternshipFilters {
            search: Some("BRUNO".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_internships(&records, &by_name).len(), 1);

        let by_previous_advisor = InternshipFilters {
            search: Some("lima".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_internships(&records, &by_previous_advisor).len(), 3);
    }

    #[test]
    fn status_and_flag_filters_combine() {
        let records = sample();
        let filters = InternshipFilters {
            status: vec![Status::Ativo],
            mandatory: vec![Mandatory::Sim],
            ..Default::default()
        };
        let hits = filter_internships(&records, &filters);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].nome, "Ana Silva");
    }

    #[test]
    fn advisor_filter_uses_current_else_previous() {
        let records = sample();
        let filters = InternshipFilters {
            advisor: vec!["Prof. Lima".to_string()],
            ..Default::default()
        };
        let names: Vec<&str> = filter_internships(&records, &filters)
            .iter()
            .map(|i| i.nome.as_str())
            .collect();
        assert_eq!(names, vec!["Ana Silva", "Bruno Reis"]);
    }

    #[test]
    fn company_filter_is_exact() {
        let records = sample();
        let filters = InternshipFilters {
            company: vec!["acme".to_string()],
            ..Default::default()
        };
        assert!(filter_internships(&records, &filters).is_empty());
    }

    #[test]
    fn stats_count_every_status() {
        let stats = stats(&sample());
        assert_eq!(
            stats,
            InternshipStats {
                total: 4,
                active: 2,
                concluded: 1,
                interrupted: 0,
                canceled: 1,
                mandatory: 1,
                optional: 3,
            }
        );
    }

    #[test]
    fn advisor_lookup_matches_either_field() {
        let records = sample();
        let lima = for_advisor(&records, "prof. lima");
        assert_eq!(lima.len(), 3);
        assert_eq!(for_advisor(&records, "Prof. Souza").len(), 1);
    }

    #[test]
    fn company_and_student_lookups_ignore_case() {
        let records = sample();
        assert_eq!(for_company(&records, "ACME").len(), 2);
        assert_eq!(for_student(&records, "Ana Silva").len(), 2);
    }

    #[test]
    fn summary_for_a_person() {
        let records = sample();
        let summary = summarize(&for_advisor(&records, "Prof. Lima"), day(2024, 2, 1));
        assert_eq!(summary.total, 3);
        assert_eq!(summary.active, 1);
        assert_eq!(summary.concluded, 1);
        assert_eq!(summary.canceled, 1);
        assert_eq!(summary.mandatory, 1);
        assert_eq!(summary.optional, 2);
        assert_eq!(summary.companies, 2);
        assert_eq!(summary.success_rate, 50);
    }

    #[test]
    fn success_rate_is_zero_without_completions() {
        let records = sample();
        let summary = summarize(&for_student(&records, "ana silva"), day(2024, 2, 1));
        assert_eq!(summary.success_rate, 0);
        assert_eq!(summary.companies, 2);
    }

    #[test]
    fn overdue_lists_active_records_past_deadline() {
        let records = sample();
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let late = overdue(&records, today);
        let names: Vec<&str> = late.iter().map(|(i, _)| i.nome.as_str()).collect();
        assert_eq!(names, vec!["ana silva", "Ana Silva"]);

        let earlier = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(overdue(&records, earlier).len(), 1);
    }

    #[test]
    fn company_page_counts_current_advisors_and_average_duration() {
        let mut records = sample();
        records[2] = dated(records[2].clone(), "2024-01-01", Some("2024-01-31"));
        let mut extra = concluded(internship("Davi Melo", Some("Acme")), "Encerramento");
        extra = dated(extra, "2024-03-01", Some("2024-03-16"));
        extra.orientador_atual = Some("Prof. Lima".to_string());
        records.push(extra);

        let summary = summarize(&for_company(&records, "Acme"), day(2024, 6, 1));
        assert_eq!(summary.total, 3);
        assert_eq!(summary.advisors, 2);
        // (30 + 15) / 2
        assert_eq!(summary.avg_duration_days, 23);
    }

    #[test]
    fn average_duration_counts_undated_completions_as_zero() {
        let records = vec![
            dated(
                concluded(internship("Eva", Some("Acme")), "Contratação"),
                "2024-01-01",
                Some("2024-01-11"),
            ),
            concluded(internship("Eva", Some("Acme")), "Contratação"),
        ];
        let summary = summarize(&for_student(&records, "Eva"), day(2024, 6, 1));
        assert_eq!(summary.avg_duration_days, 5);
    }

    #[test]
    fn student_page_runs_the_current_internship_until_today() {
        let records = vec![
            dated(
                concluded(internship("Fabio", Some("Beta")), "Desistência"),
                "2023-01-01",
                Some("2023-01-21"),
            ),
            dated(internship("Fabio", Some("Gama")), "2024-05-01", None),
            dated(internship("Fabio", Some("Acme")), "2024-05-10", None),
        ];
        let summary = summarize(&for_student(&records, "fabio"), day(2024, 5, 31));
        assert!(summary.current);
        assert_eq!(summary.active, 2);
        // 20 days closed plus 30 running; only the first active record is open-ended
        assert_eq!(summary.total_duration_days, 50);
        assert_eq!(summary.avg_duration_days, 0);
    }

    #[test]
    fn impossible_dates_are_left_out_of_durations() {
        let records = vec![dated(
            concluded(internship("Gil", None), "Contratação"),
            "2024-02-01",
            Some("2024-02-31"),
        )];
        let summary = summarize(&for_student(&records, "Gil"), day(2024, 6, 1));
        assert!(!summary.current);
        assert_eq!(summary.total_duration_days, 0);
        assert_eq!(summary.avg_duration_days, 0);
    }

    #[test]
    fn filter_options_are_sorted_and_distinct() {
        let options = filter_options(&sample());
        assert_eq!(options.companies, vec!["Acme", "Beta", "Gama"]);
        assert_eq!(options.advisors, vec!["Prof. Lima", "Prof. Souza"]);
        assert_eq!(options.statuses.len(), 4);
        assert_eq!(options.types[1], Mandatory::Nao);
    }
}
