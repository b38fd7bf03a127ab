//! forest-advisor: command-line front end for the forest-land advisory engine
//!
//! Reads one JSON request (file or stdin), runs it through the advisory
//! pipeline and prints the JSON response. Logs go to stderr.

mod input;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use forest_agent::backend::OpenAiBackend;
use forest_agent::{
    AdvisoryService, ConflictAnalysisRequest, FraudCheckRequest, LlmBackend, RecommendationRequest,
};

#[derive(Parser)]
#[command(name = "forest-advisor")]
#[command(about = "Scheme recommendations, conflict analysis and fraud checks for forest-land claims")]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, env = "FOREST_ADVISOR_CONFIG")]
    config: Option<PathBuf>,

    /// Never contact the remote model
    #[arg(long, env = "FOREST_ADVISOR_OFFLINE")]
    offline: bool,

    /// Gateway base URL (overrides config file)
    #[arg(long, env = "FOREST_ADVISOR_BASE_URL")]
    base_url: Option<String>,

    /// Gateway model (overrides config file)
    #[arg(long, env = "FOREST_ADVISOR_MODEL")]
    model: Option<String>,

    /// Gateway timeout in milliseconds (overrides config file)
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank government schemes for a community
    Recommend(IoArgs),
    /// Analyse a land dispute
    Conflict(IoArgs),
    /// Check a claim record for fraud
    Fraud(IoArgs),
    /// Print the effective configuration as YAML
    ShowConfig,
}

enum Product {
    Recommend,
    Conflict,
    Fraud,
}

#[derive(Args)]
struct IoArgs {
    /// JSON request file; stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Pretty-print the response
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("forest_advisor=info".parse()?)
                .add_directive("forest_agent=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = input::load_config(cli.config.as_deref())?;

    // Apply CLI overrides
    if cli.offline {
        config.service.local_only = true;
    }
    if let Some(base_url) = cli.base_url {
        config.gateway.base_url = base_url;
    }
    if let Some(model) = cli.model {
        config.gateway.model = model;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.gateway.timeout_ms = timeout_ms;
    }

    let (io, product) = match cli.command {
        Command::ShowConfig => {
            print!("{}", config.to_yaml()?);
            return Ok(());
        }
        Command::Recommend(io) => (io, Product::Recommend),
        Command::Conflict(io) => (io, Product::Conflict),
        Command::Fraud(io) => (io, Product::Fraud),
    };

    let gateway: Option<Arc<dyn LlmBackend>> = if config.service.local_only {
        info!("Offline mode, using local engine only");
        None
    } else {
        match OpenAiBackend::from_config(&config.gateway) {
            Ok(backend) => Some(Arc::new(backend) as Arc<dyn LlmBackend>),
            Err(e) => {
                warn!(error = %e, "Gateway unavailable, using local engine only");
                None
            }
        }
    };

    let service = AdvisoryService::new(config);
    service.initialize(gateway).await?;

    let source = io.input.as_deref();
    let result = match product {
        Product::Recommend => {
            let request: RecommendationRequest = input::read_request(source)?;
            render(&service.recommend(request).await?, io.pretty)
        }
        Product::Conflict => {
            let request: ConflictAnalysisRequest = input::read_request(source)?;
            render(&service.analyze_conflict(request).await?, io.pretty)
        }
        Product::Fraud => {
            let request: FraudCheckRequest = input::read_request(source)?;
            render(&service.check_fraud(request).await?, io.pretty)
        }
    };

    service.shutdown().await;

    println!("{}", result?);
    Ok(())
}

fn render<T: Serialize>(response: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    }
}
