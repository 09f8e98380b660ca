//! Bookmarket CLI — list a used book for sale from the command line.
//!
//! Set BOOKMARKET_API_URL; `sell` also needs S3_BUCKET_NAME, AWS_REGION and
//! BOOKMARKET_ID_TOKEN. Uses Bearer auth.

use anyhow::Context;
use bookmarket_api_client::{
    ApiClient, Credential, Session, StaticTokenProvider, SubmitOptions, UserIdentity,
};
use bookmarket_cli::{init_tracing, load_draft};
use bookmarket_core::{validate_draft, ClientConfig, ClientError, ErrorMetadata};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "bookmarket", about = "Book marketplace CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a draft file without contacting the backend
    Validate {
        /// Path to the draft TOML file
        draft: std::path::PathBuf,
    },
    /// Upload the draft's images and create the listing
    Sell {
        /// Path to the draft TOML file
        draft: std::path::PathBuf,
        /// Images uploaded at once (defaults to BOOKMARKET_UPLOAD_CONCURRENCY)
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Get a listing by ID
    Get {
        /// Listing ID
        id: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn load_config() -> anyhow::Result<ClientConfig> {
    ClientConfig::from_env().context("Failed to load configuration. Check BOOKMARKET_API_URL")
}

/// Print the user-facing side of a flow error and turn it into the exit error.
fn report(err: ClientError) -> anyhow::Error {
    if let ClientError::Validation(ref errors) = err {
        if let Err(print_err) = print_json(&serde_json::json!({ "errors": errors })) {
            tracing::warn!(error = %print_err, "Failed to print validation errors");
        }
    }
    if err.is_local() {
        tracing::debug!(code = err.error_code(), error = %err, "Listing rejected before any request");
    } else {
        tracing::warn!(code = err.error_code(), error = %err, "Listing flow failed");
    }
    let hint = err.suggested_action().unwrap_or("");
    anyhow::anyhow!("{} {}", err.client_message(), hint)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { draft } => {
            let draft = load_draft(&draft)?;
            let validated = validate_draft(&draft).map_err(|e| report(e.into()))?;
            let summary = validated.details().price_summary();
            print_json(&serde_json::json!({
                "valid": true,
                "images": validated.images().len(),
                "priceSummary": summary,
                "message": summary.message(),
            }))?;
        }
        Commands::Sell { draft, concurrency } => {
            let config = load_config()?;
            config
                .validate_storage()
                .context("Selling needs S3_BUCKET_NAME and AWS_REGION")?;
            let draft = load_draft(&draft)?;
            let client = ApiClient::from_config(&config).map_err(report)?;

            let session = match config.id_token {
                Some(ref token) => {
                    Session::signed_in(UserIdentity::new("cli"), Credential::new(token)).await
                }
                None => Session::new(),
            };
            let options = SubmitOptions {
                upload_concurrency: concurrency.unwrap_or(config.upload_concurrency).max(1),
            };

            let listing = client
                .submit_listing(draft, &session, &StaticTokenProvider, options)
                .await
                .map_err(report)?;
            print_json(&listing)?;
        }
        Commands::Get { id } => {
            let config = load_config()?;
            let client = ApiClient::from_config(&config).map_err(report)?;
            let listing = client.get_listing(&id).await.map_err(report)?;
            print_json(&listing)?;
        }
    }

    Ok(())
}
