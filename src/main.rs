use clap::Parser;
use gointerfaces::{collect_interfaces, Config, Report};
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gointerfaces")]
#[command(version, about = "List the exported interfaces of Go source releases")]
struct Cli {
    /// Go versions to scan, e.g. 1.18 1.4rc1; later versions win on duplicates
    #[arg(required = true, value_name = "VERSION")]
    versions: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = Config::from_env();
    let interfaces = collect_interfaces(&cli.versions, &config)?;

    let report = Report::new(interfaces);
    info!(interfaces = report.len(), "Printing table...");
    let stdout = io::stdout();
    let mut output = stdout.lock();
    report.write_table(&mut output)?;
    output.flush()?;

    Ok(())
}

/// Diagnostics go to stderr so stdout carries only the table
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
