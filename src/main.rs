use clap::{Parser, Subcommand};
use monarch_stats::apis::factory::create_source;
use monarch_stats::config::Config;
use monarch_stats::constants::{FILE_SOURCE, KINGS_GIST_SOURCE};
use monarch_stats::logging;
use monarch_stats::pipeline::{cancel_on, StatsPipeline};
use monarch_stats::report::{self, OutputFormat};
use monarch_stats::statistics;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "monarch_stats")]
#[command(about = "Reign statistics over the historical monarchs dataset")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to a TOML config file (defaults to ./monarch_stats.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the monarchs and print the four statistics
    Stats(StatsArgs),
}

#[derive(clap::Args, Default)]
struct StatsArgs {
    /// Read the dataset from a local JSON file instead of fetching it
    #[arg(long)]
    file: Option<PathBuf>,

    /// Override the dataset URL
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,

    /// Year used to measure reigns that have not ended (defaults to the current year)
    #[arg(long)]
    reference_year: Option<i32>,

    /// HTTP timeout in seconds
    #[arg(long)]
    timeout_seconds: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    let mut config = Config::load(cli.config.as_deref())?;
    let _guard = logging::init_logging(&config.logging)?;

    let args = match cli.command {
        Some(Commands::Stats(args)) => args,
        None => StatsArgs::default(),
    };

    if let Some(url) = args.url {
        config.source.url = Some(url);
    }
    if let Some(timeout) = args.timeout_seconds {
        config.source.timeout_seconds = timeout;
    }

    let source_name = if args.file.is_some() {
        FILE_SOURCE
    } else {
        KINGS_GIST_SOURCE
    };
    let source = create_source(source_name, &config.source, args.file.as_deref())?;
    let reference_year = args.reference_year.unwrap_or_else(statistics::current_year);
    info!(source = source_name, reference_year, "Starting run");

    let cancel = cancel_on(tokio::signal::ctrl_c());
    match StatsPipeline::run_until(source.as_ref(), reference_year, cancel).await {
        Ok(result) => {
            print!("{}", report::render(&result.statistics, args.format)?);
            Ok(())
        }
        Err(e) => {
            error!(kind = e.kind().as_str(), "Run failed: {}", e);
            Err(e.into())
        }
    }
}
