//! Users load generator
//!
//! Fires create requests at a running users API with bounded concurrency and
//! prints how the server answered.

use clap::Parser;
use core_config::Environment;
use core_config::tracing::{init_tracing, install_color_eyre};
use eyre::Result;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::info;

mod report;
mod scenario;

use report::{Outcome, Report};
use scenario::Scenario;

#[derive(Parser)]
#[command(name = "users-loadgen")]
#[command(about = "Send concurrent create-user requests and report the responses")]
struct Cli {
    /// Base URL of the users API
    #[arg(short, long, default_value = "http://localhost:8080")]
    base_url: String,

    /// Total number of requests
    #[arg(short = 'n', long, default_value_t = 100)]
    count: usize,

    /// Requests in flight at once
    #[arg(short, long, default_value_t = 10)]
    concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Tag mixed into emails and usernames. Defaults to the current unix time.
    #[arg(long)]
    run_id: Option<String>,
}

async fn send(client: &Client, url: &str, run_id: &str, index: usize) -> Outcome {
    let scenario = Scenario::for_index(index);
    let result = client
        .post(url)
        .json(&scenario.payload(run_id, index))
        .send()
        .await
        .map(|response| response.status().as_u16())
        .map_err(|e| e.to_string());
    (scenario, result)
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let cli = Cli::parse();
    if cli.concurrency == 0 {
        eyre::bail!("--concurrency must be at least 1");
    }

    let run_id = match cli.run_id {
        Some(id) => id,
        None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs().to_string(),
    };
    let url = format!("{}/users/", cli.base_url.trim_end_matches('/'));
    let client = Client::builder()
        .timeout(Duration::from_secs(cli.timeout_secs))
        .build()?;

    info!(%url, count = cli.count, concurrency = cli.concurrency, %run_id, "Starting load run");

    let outcomes: Vec<Outcome> = stream::iter(0..cli.count)
        .map(|index| send(&client, &url, &run_id, index))
        .buffer_unordered(cli.concurrency)
        .collect()
        .await;

    let report = Report::from_outcomes(outcomes);
    println!("{}", report);

    if report.transport_errors > 0 {
        eyre::bail!("{} requests failed at the transport level", report.transport_errors);
    }
    Ok(())
}
