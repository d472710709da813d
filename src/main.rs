use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use first_pitch::app::{ReportSettings, ReportUseCase, ResolveUseCase, SubjectOutcome};
use first_pitch::config::{Config, DEFAULT_CONFIG_PATH};
use first_pitch::infra::{CsvReportOutputAdapter, PeopleSearchResolver, SavantClient};
use first_pitch::logging;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "first_pitch")]
#[command(about = "First-pitch bucket reports for starting pitchers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, classify and write reports for every configured subject
    Run {
        /// Path to the TOML configuration
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// Only run these subjects (comma-separated names as they appear in the config)
        #[arg(long)]
        subjects: Option<String>,
    },
    /// Resolve configured subject names to player ids and print them
    Resolve {
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
}

fn load_config(path: &Path) -> Result<Config> {
    Config::load(path).with_context(|| format!("loading {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, subjects } => {
            let config = load_config(&config)?;
            let timeout = Duration::from_secs(config.fetch.timeout_seconds);

            let mut configured = config.subjects.clone();
            if let Some(filter) = subjects {
                let wanted: Vec<String> = filter.split(',').map(|s| s.trim().to_string()).collect();
                configured.retain(|s| wanted.contains(&s.name));
            }

            let resolver = ResolveUseCase::new(Box::new(PeopleSearchResolver::new(timeout)?));
            let resolution = resolver.resolve_all(&configured).await;
            if !resolution.unresolved.is_empty() {
                warn!(unresolved = ?resolution.unresolved, "some subjects could not be resolved");
            }

            let settings = ReportSettings::from_config(&config);
            info!(start = %settings.start_date, end = %settings.end_date, subjects = resolution.resolved.len(), "starting run");

            let use_case = ReportUseCase::new(
                Box::new(SavantClient::new(timeout)?),
                Box::new(CsvReportOutputAdapter::new(config.output_dir.clone())),
                settings,
            );

            let runs = use_case.run(&resolution.resolved).await;
            for run in &runs {
                match &run.outcome {
                    SubjectOutcome::Written { files, detail_rows, summary_rows } => {
                        println!(
                            "{}: {} ({} rows), {} ({} rows)",
                            run.subject.name,
                            files.detail.display(),
                            detail_rows,
                            files.summary.display(),
                            summary_rows
                        );
                    }
                    SubjectOutcome::Empty => println!("{}: no bucketed pitches", run.subject.name),
                    SubjectOutcome::FetchFailed { attempts, error } => {
                        println!("{}: fetch failed after {} attempt(s): {}", run.subject.name, attempts, error)
                    }
                    SubjectOutcome::WriteFailed { error } => println!("{}: write failed: {}", run.subject.name, error),
                }
            }
            for name in &resolution.unresolved {
                println!("{}: unresolved", name);
            }
        }
        Commands::Resolve { config } => {
            let config = load_config(&config)?;
            let timeout = Duration::from_secs(config.fetch.timeout_seconds);
            let resolver = ResolveUseCase::new(Box::new(PeopleSearchResolver::new(timeout)?));
            let resolution = resolver.resolve_all(&config.subjects).await;
            for subject in &resolution.resolved {
                println!("{} = {}", subject.name, subject.id);
            }
            for name in &resolution.unresolved {
                println!("{} = ?", name);
            }
        }
    }
    Ok(())
}
