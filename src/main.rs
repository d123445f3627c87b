use std::process::ExitCode;

use bloodaid_client::{
    ApiClient, ApiResult, BloodGroup, ClientConfig, Env, Envelope,
    api::{blogs, donations, funding, public},
    models::DonationStatus,
    ticker::{self, DEFAULT_MAX_ITEMS},
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line access to the BloodAid REST backend.
#[derive(Parser, Debug)]
#[command(name = "bloodaid", version, about)]
struct Cli {
    /// Bearer token for protected endpoints.
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ping the backend root.
    Health,
    /// Find donors by blood group and location.
    SearchDonors {
        #[arg(long)]
        blood_group: BloodGroup,
        #[arg(long)]
        district: String,
        #[arg(long)]
        upazila: String,
    },
    /// List public donation requests.
    Requests {
        #[arg(long)]
        status: Option<DonationStatus>,
    },
    /// List blogs.
    Blogs {
        /// Only published posts.
        #[arg(long)]
        published: bool,
    },
    /// Sum of all fundings.
    FundingTotal,
    /// Current blood shortages, highest first.
    Shortages {
        #[arg(long, default_value_t = DEFAULT_MAX_ITEMS)]
        max_items: usize,
    },
}

/// main
///
/// Loads configuration, installs the subscriber, runs one command and prints its
/// result as a JSON envelope on stdout.
#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = match ClientConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    // RUST_LOG wins; otherwise debug for this crate only.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bloodaid_client=debug".into());

    // Logs go to stderr so stdout carries nothing but the envelope.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
    }

    tracing::info!(api_url = %config.api_url, "bloodaid starting in {:?} mode", config.env);

    let client = match &cli.token {
        Some(token) => ApiClient::secure(&config, token),
        None => ApiClient::public(&config),
    };
    let client = match client {
        Ok(client) => client,
        Err(err) => return emit::<()>(Err(err)),
    };

    match cli.command {
        Command::Health => emit(client.health_check().await),
        Command::SearchDonors {
            blood_group,
            district,
            upazila,
        } => emit(public::search_donors(&client, blood_group, &district, &upazila).await),
        Command::Requests { status } => {
            let requests = donations::get_all_donation_requests(&client, None)
                .await
                .map(|requests| {
                    requests
                        .into_iter()
                        .filter(|request| status.is_none_or(|status| request.donation_status == status))
                        .collect::<Vec<_>>()
                });
            emit(requests)
        }
        Command::Blogs { published } => {
            if published {
                emit(blogs::get_published_blogs(&client).await)
            } else {
                emit(blogs::get_all_blogs(&client).await)
            }
        }
        Command::FundingTotal => emit(funding::get_total_funding(&client).await),
        Command::Shortages { max_items } => {
            emit(Ok(ticker::load_ticker(&client, max_items).await))
        }
    }
}

fn emit<T: Serialize>(result: ApiResult<T>) -> ExitCode {
    let envelope = Envelope::from(result);
    let code = if envelope.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };
    match serde_json::to_string_pretty(&envelope) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            tracing::error!("failed to encode output: {}", err);
            return ExitCode::FAILURE;
        }
    }
    code
}
