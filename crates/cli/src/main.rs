use clap::Parser;
use ferrous_recursor_domain::{CliOverrides, RecordType};
use std::process::ExitCode;
use tracing::info;

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "ferrous-recursor")]
#[command(version)]
#[command(about = "Ferrous Recursor - resolves names by walking the DNS delegation tree from a root server")]
struct Cli {
    /// Domain names to resolve, in order
    #[arg(required = true, value_name = "NAME")]
    names: Vec<String>,

    /// Record type (A, NS, CNAME, AAAA, TXT)
    #[arg(short = 't', long = "type", default_value = "A", value_parser = parse_record_type)]
    record_type: RecordType,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Root server to start every walk at
    #[arg(long, value_name = "ADDR")]
    root_server: Option<String>,

    /// Destination port for every query
    #[arg(long)]
    port: Option<u16>,

    /// Per-query timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Cache document path
    #[arg(long, value_name = "FILE")]
    cache_file: Option<String>,

    /// Disable the address cache
    #[arg(long)]
    no_cache: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_record_type(value: &str) -> Result<RecordType, String> {
    value.parse().map_err(|e: ferrous_recursor_domain::DomainError| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        root_server: cli.root_server.clone(),
        port: cli.port,
        query_timeout: cli.timeout,
        cache_path: cli.cache_file.clone(),
        disable_cache: cli.no_cache,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Ferrous Recursor v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config)?;
    let use_cases = di::UseCases::new(&dns_services);

    let outcomes = use_cases
        .resolve_names
        .execute(&cli.names, cli.record_type)
        .await;

    let mut failures = 0usize;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(resolution) => println!("{},{}", outcome.name, resolution),
            Err(e) => {
                failures += 1;
                println!("{},error: {}", outcome.name, e);
            }
        }
    }

    if let Some(cache) = &dns_services.cache {
        let metrics = cache.metrics();
        info!(
            entries = cache.len(),
            hit_rate = metrics.hit_rate(),
            "Resolution cache state"
        );
    }

    if failures > 0 {
        info!(failed = failures, total = outcomes.len(), "Some names failed to resolve");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
