use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};

use store_locations::apis;
use store_locations::config::Config;
use store_locations::constants;
use store_locations::infra::http_client::ReqwestHttp;
use store_locations::logging;
use store_locations::pipeline::Pipeline;
use store_locations::storage::JsonFileStorage;

#[derive(Parser)]
#[command(name = "store_locations")]
#[command(about = "Collects store locations from several sites into one JSON file")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every source, merge the records and write the output file
    Run {
        /// Specific sources to run (comma-separated). Available: mebelshara, tui
        #[arg(long)]
        apis: Option<String>,
        /// Output file, overrides `output_path` from the config
        #[arg(long)]
        output: Option<PathBuf>,
        /// Path to a TOML config file (defaults to ./config.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the supported sources
    Sources,
}

async fn run(api_list: Option<String>, output: Option<PathBuf>, config: Option<PathBuf>) -> anyhow::Result<()> {
    let config = Config::load(config.as_deref()).context("loading configuration")?;

    let api_names: Option<Vec<String>> =
        api_list.map(|list| list.split(',').map(|s| s.trim().to_string()).collect());
    let sources = apis::create_apis(api_names.as_deref(), &config)?;

    let output_path = output.unwrap_or_else(|| config.output_path.clone());
    let storage = JsonFileStorage::new(output_path);
    let http = ReqwestHttp::new(&config.http)?;

    let result = Pipeline::new(&http).run(&sources, &storage).await?;

    info!("Pipeline finished");
    println!("\n📊 Pipeline Results:");
    for source in &result.sources {
        if source.skipped() {
            warn!("{} responded with status {}", source.api_name, source.status);
            println!("   {}: skipped (HTTP {})", source.api_name, source.status);
        } else {
            println!("   {}: {} records", source.api_name, source.records);
        }
    }
    println!("   Total records: {}", result.total_records);
    println!("   Output file: {}", result.output_file);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { apis, output, config } => {
            if let Err(e) = run(apis, output, config).await {
                error!("Run failed: {:#}", e);
                return Err(e);
            }
        }
        Commands::Sources => {
            for name in constants::get_supported_apis() {
                println!("{name}");
            }
        }
    }
    Ok(())
}
