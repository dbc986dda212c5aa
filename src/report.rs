use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{Dataset, Status};
use crate::query;
use crate::route_id;

pub fn build_report(dataset: &Dataset, today: NaiveDate, top: usize) -> String {
    let stats = query::stats(&dataset.internships);
    let late = query::overdue(&dataset.internships, today);

    let mut output = String::new();

    let _ = writeln!(output, "# Internship Dashboard Report");
    let _ = writeln!(
        output,
        "Generated on {} from {} internships",
        today, stats.total
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Status Mix");

    if stats.total == 0 {
        let _ = writeln!(output, "No internships recorded.");
    } else {
        for (status, count) in [
            (Status::Ativo, stats.active),
            (Status::Concluido, stats.concluded),
            (Status::Interrompido, stats.interrupted),
            (Status::Cancelado, stats.canceled),
        ] {
            let _ = writeln!(output, "- {}: {}", status, count);
        }
        let _ = writeln!(
            output,
            "- mandatory: {}, optional: {}",
            stats.mandatory, stats.optional
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Top Companies");

    if dataset.companies.is_empty() {
        let _ = writeln!(output, "No companies recorded.");
    } else {
        for company in dataset.companies.iter().take(top) {
            let _ = writeln!(
                output,
                "- {} (`{}`): {} internships, {} active, {} closed",
                company.nome,
                route_id::encode(&company.nome),
                company.total_internships,
                company.active_internships,
                company.concluded_internships
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Top Advisors");

    if dataset.advisors.is_empty() {
        let _ = writeln!(output, "No advisors recorded.");
    } else {
        for advisor in dataset.advisors.iter().take(top) {
            let _ = writeln!(
                output,
                "- {} (`{}`): {} internships, {} active, {} closed",
                advisor.nome,
                route_id::encode(&advisor.nome),
                advisor.total_internships,
                advisor.active_internships,
                advisor.concluded_internships
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Overdue Deadlines");

    if late.is_empty() {
        let _ = writeln!(output, "No active internship is past its deadline.");
    } else {
        for (internship, deadline) in late.iter() {
            let _ = writeln!(
                output,
                "- {} ({}) deadline {}",
                internship.nome,
                internship.empresa.as_deref().unwrap_or("no company"),
                deadline
            );
        }
    }

    output
}
