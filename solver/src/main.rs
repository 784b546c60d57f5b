use anyhow::{Context, Result};
use clap::Parser;
use signature_solver::api::{ApiClient, DEFAULT_BASE_URL};
use signature_solver::api_trait::ApiClientTrait;
use signature_solver::config::{SolverConfig, VerificationConfig};
use signature_solver::mock_api::MockApiClient;
use signature_solver::orchestrator::solve_until_accepted;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "signature-solver")]
#[command(about = "Reconstructs a library by fingerprinting rooms with fixed walks", long_about = None)]
struct Args {
    /// Problem name
    problem: String,

    /// Team ID (defaults to TEAM_ID environment variable if not provided)
    #[arg(short, long)]
    team_id: Option<String>,

    /// Base URL for the API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Room count; required for problems outside the catalogue
    #[arg(long)]
    room_num: Option<usize>,

    /// Verification walks per probed door
    #[arg(long, default_value = "1")]
    check_num: usize,

    /// Doors per verification walk
    #[arg(long, default_value = "20")]
    check_len: usize,

    /// Seed for the verification walks (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many attempts (retries forever when omitted)
    #[arg(long)]
    max_attempts: Option<usize>,

    /// Solve a simulated library generated from this seed instead of the remote service
    #[arg(long)]
    local: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = SolverConfig {
        verification: VerificationConfig {
            check_num: args.check_num,
            check_len: args.check_len,
        },
        seed: args.seed,
        max_attempts: args.max_attempts,
        ..SolverConfig::for_problem(&args.problem, args.room_num)?
    };
    config.validate()?;

    let api: Arc<dyn ApiClientTrait> = match args.local {
        Some(seed) => {
            info!(seed, rooms = config.room_count, "using simulated library");
            Arc::new(MockApiClient::random(config.room_count, seed))
        }
        None => {
            let team_id = match args.team_id {
                Some(id) => id,
                None => std::env::var("TEAM_ID")
                    .context("TEAM_ID not provided via --team-id or TEAM_ID environment variable")?,
            };
            info!(base_url = %args.base_url, problem = %config.problem_name, "using contest service");
            Arc::new(ApiClient::new(args.base_url, team_id))
        }
    };

    let solved = solve_until_accepted(api, &config).await?;

    println!("{}", serde_json::to_string_pretty(&solved.map)?);
    info!(attempts = solved.attempts, "solution accepted");
    Ok(())
}
