use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tsreport::application::{lookup, GenerateReportService};
use tsreport::cli::{format_grid, format_period, format_references, Cli, Commands};
use tsreport::error::ReportError;
use tsreport::infrastructure::{Config, TomlWorkspaceSource};

fn main() {
    let cli = Cli::parse();

    // Config is optional for `range`, so load it before logging but report
    // failures only where it is needed
    let config = load_config(&cli);

    let level = match &config {
        _ if cli.quiet => "warn".to_string(),
        Ok(config) => config.log_level.clone(),
        Err(_) => "info".to_string(),
    };
    if let Err(e) = init_logging(&level) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    match run(cli, config) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config, ReportError> {
    match &cli.config {
        Some(path) => Config::load(path),
        None => Config::discover(),
    }
}

/// Log to stderr; RUST_LOG takes precedence over the configured level
fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level/filter '{}'", level))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialise logging")
}

fn run(cli: Cli, config: Result<Config, ReportError>) -> Result<(), ReportError> {
    let today = Local::now().date_naive();

    match &cli.command {
        Some(Commands::Range { period }) => {
            let resolved = cli.report_options(period).resolve_period(today)?;
            println!("{}", format_period(&resolved));
            Ok(())
        }
        Some(Commands::Preview { period }) => {
            let options = cli.report_options(period);
            options.period_spec()?;

            let service = report_service(config?)?;
            let grid = service.preview(&options, today)?;
            print!("{}", format_grid(&grid));
            Ok(())
        }
        Some(Commands::Lookup { kind, pattern }) => {
            let config = config?;
            let workspace = cli.workspace.unwrap_or(config.workspace);
            let source = TomlWorkspaceSource::open(&config.source_path(), &config.email)?;
            let found = lookup(&source, workspace, (*kind).into(), pattern.as_deref())?;
            print!("{}", format_references(&found));
            Ok(())
        }
        None => {
            // Validate the period before opening the workspace export
            let options = cli.report_options(&cli.period);
            options.period_spec()?;

            let service = report_service(config?)?;
            let path = service.execute(&options, today)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn report_service(config: Config) -> Result<GenerateReportService<TomlWorkspaceSource>, ReportError> {
    let source = TomlWorkspaceSource::open(&config.source_path(), &config.email)?;
    Ok(GenerateReportService::new(
        source,
        config.workspace,
        config.output_path(),
    ))
}
