use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use estagios_core::config::Config;
use estagios_core::loader::{source_for, DataLoader};
use estagios_core::models::{Dataset, EntityCount, InternshipFilters, Mandatory, Status};
use estagios_core::route_id::{self, Decoded};
use estagios_core::{classify, query, report};

#[derive(Parser)]
#[command(name = "estagios")]
#[command(about = "Internship tracking dashboard over the spreadsheet CSV export", long_about = None)]
struct Cli {
    /// Configuration file, used when it exists
    #[arg(long, default_value = "estagios.toml")]
    config: PathBuf,
    /// URL or path of the CSV export, overrides configuration
    #[arg(long)]
    source: Option<String>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Status and mandatory-flag totals
    Summary,
    /// Companies by number of internships
    Companies {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Advisors by number of internships (current advisor only)
    Advisors {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// List internships matching the filters
    Interns {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_parser = parse_status)]
        status: Vec<Status>,
        #[arg(long, value_parser = parse_mandatory)]
        mandatory: Vec<Mandatory>,
        #[arg(long)]
        company: Vec<String>,
        #[arg(long)]
        advisor: Vec<String>,
        #[arg(long, default_value_t = 50)]
        limit: usize,
        /// Print the companies and advisors the filters accept, then exit
        #[arg(long)]
        list_options: bool,
    },
    /// Resolve a route identifier and show the matching detail page
    Show {
        #[arg(value_enum)]
        kind: EntityKind,
        id: String,
    },
    /// Print the route identifier for a display name
    RouteId { name: String },
    /// Generate a markdown report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum EntityKind {
    Company,
    Advisor,
    Student,
}

#[derive(Serialize)]
struct DetailPage<'a> {
    name: &'a str,
    resolved: bool,
    summary: estagios_core::models::PersonSummary,
    internships: Vec<&'a estagios_core::Internship>,
}

fn parse_status(value: &str) -> Result<Status, String> {
    Status::parse(value).ok_or_else(|| format!("unknown status '{value}'"))
}

fn parse_mandatory(value: &str) -> Result<Mandatory, String> {
    Mandatory::parse(value).ok_or_else(|| format!("unknown mandatory flag '{value}'"))
}

fn init_logging(level: &str, verbose: u8) {
    let level = match verbose {
        0 => level,
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_counts(title: &str, rows: &[EntityCount], limit: usize) {
    if rows.is_empty() {
        println!("No {title} found.");
        return;
    }

    println!("{title} by internships:");
    for row in rows.iter().take(limit) {
        println!(
            "- {} [{}] {} total, {} active, {} closed",
            row.nome,
            route_id::encode(&row.nome),
            row.total_internships,
            row.active_internships,
            row.concluded_internships
        );
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn load_dataset(location: &str) -> anyhow::Result<Arc<Dataset>> {
    let loader = DataLoader::from_boxed(source_for(location));
    loader
        .load()
        .await
        .with_context(|| format!("failed to load internships from {location}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)?;
    if let Some(source) = cli.source {
        config.source.location = source;
    }
    init_logging(&config.logging.level, cli.verbose);

    let location = config.source.location;

    match cli.command {
        Commands::RouteId { name } => {
            println!("{}", route_id::encode(&name));
        }
        Commands::Summary => {
            let dataset = load_dataset(&location).await?;
            let stats = query::stats(&dataset.internships);
            if cli.json {
                return print_json(&stats);
            }
            println!("Internships: {}", stats.total);
            println!("- {}: {}", Status::Ativo, stats.active);
            println!("- {}: {}", Status::Concluido, stats.concluded);
            println!("- {}: {}", Status::Interrompido, stats.interrupted);
            println!("- {}: {}", Status::Cancelado, stats.canceled);
            println!("Mandatory: {}, optional: {}", stats.mandatory, stats.optional);
            println!(
                "Companies: {}, advisors: {}",
                dataset.companies.len(),
                dataset.advisors.len()
            );
        }
        Commands::Companies { limit } => {
            let dataset = load_dataset(&location).await?;
            if cli.json {
                return print_json(&dataset.companies);
            }
            print_counts("Companies", &dataset.companies, limit);
        }
        Commands::Advisors { limit } => {
            let dataset = load_dataset(&location).await?;
            if cli.json {
                return print_json(&dataset.advisors);
            }
            print_counts("Advisors", &dataset.advisors, limit);
        }
        Commands::Interns {
            search,
            status,
            mandatory,
            company,
            advisor,
            limit,
            list_options,
        } => {
            let dataset = load_dataset(&location).await?;
            if list_options {
                let options = query::filter_options(&dataset.internships);
                if cli.json {
                    return print_json(&options);
                }
                println!("Companies: {}", options.companies.join(", "));
                println!("Advisors: {}", options.advisors.join(", "));
                return Ok(());
            }

            let filters = InternshipFilters {
                search,
                status,
                mandatory,
                company,
                advisor,
            };
            let hits = query::filter_internships(&dataset.internships, &filters);
            if cli.json {
                return print_json(&hits);
            }
            if hits.is_empty() {
                println!("No internships match these filters.");
                return Ok(());
            }

            println!("{} internships match:", hits.len());
            for internship in hits.iter().take(limit) {
                println!(
                    "- {} [{}] {} / {} ({})",
                    internship.nome,
                    route_id::encode(&internship.nome),
                    internship.empresa.as_deref().unwrap_or("-"),
                    internship.advisor().unwrap_or("-"),
                    classify(internship)
                );
            }
        }
        Commands::Show { kind, id } => {
            let dataset = load_dataset(&location).await?;
            let decoded = match kind {
                EntityKind::Company => {
                    route_id::decode(&id, dataset.companies.iter().map(|c| &c.nome))
                }
                EntityKind::Advisor => {
                    route_id::decode(&id, dataset.advisors.iter().map(|a| &a.nome))
                }
                EntityKind::Student => {
                    route_id::decode(&id, dataset.internships.iter().map(|i| &i.nome))
                }
            };
            if let Decoded::Unresolved { lossy } = &decoded {
                warn!(route_id = %id, guess = %lossy, "route id matched no known name");
            }

            let name = decoded.best_effort();
            let internships = match kind {
                EntityKind::Company => query::for_company(&dataset.internships, name),
                EntityKind::Advisor => query::for_advisor(&dataset.internships, name),
                EntityKind::Student => query::for_student(&dataset.internships, name),
            };
            let today = chrono::Local::now().date_naive();
            let summary = query::summarize(&internships, today);

            if cli.json {
                return print_json(&DetailPage {
                    name,
                    resolved: decoded.resolved().is_some(),
                    summary,
                    internships,
                });
            }

            if internships.is_empty() {
                println!("Nothing found for '{name}'.");
                return Ok(());
            }

            println!("{name}");
            println!(
                "{} internships: {} active, {} concluded, {} interrupted, {} canceled",
                summary.total,
                summary.active,
                summary.concluded,
                summary.interrupted,
                summary.canceled
            );
            println!(
                "Mandatory: {}, optional: {}, success rate: {}%",
                summary.mandatory, summary.optional, summary.success_rate
            );
            match kind {
                EntityKind::Company => println!(
                    "Advisors: {}, average duration: {} days",
                    summary.advisors, summary.avg_duration_days
                ),
                EntityKind::Advisor => println!("Companies: {}", summary.companies),
                EntityKind::Student => println!(
                    "Currently interning: {}, total duration: {} days",
                    if summary.current { "yes" } else { "no" },
                    summary.total_duration_days
                ),
            }
            for internship in internships.iter() {
                println!(
                    "- {} at {} ({}), deadline {}",
                    internship.nome,
                    internship.empresa.as_deref().unwrap_or("-"),
                    classify(internship),
                    internship.prazo_maximo.as_deref().unwrap_or("-")
                );
            }
        }
        Commands::Report { out, top } => {
            let dataset = load_dataset(&location).await?;
            let today = chrono::Local::now().date_naive();
            let report = report::build_report(&dataset, today, top);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
