// Copyright 2026 Geozone Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

use geozone::acquisition::HttpClient;
use geozone::audit::RunLog;
use geozone::config::{self, Config, Endpoints, TokenSource};
use geozone::pipeline;

#[derive(Parser)]
#[command(
    name = "geozone",
    about = "Geozone: find the time zone of your public IP and the regions that share it",
    version
)]
struct Cli {
    /// Page showing the caller's IP in a `div.ip` element
    #[arg(long, env = "GEOZONE_IP_URL", default_value = config::DEFAULT_IP_PAGE)]
    ip_url: String,

    /// Page whose script embeds the CSRF token
    #[arg(long, env = "GEOZONE_TOKEN_PAGE_URL", default_value = config::DEFAULT_TOKEN_PAGE)]
    token_page_url: String,

    /// Endpoint exchanging the CSRF token for a bearer token
    #[arg(long, env = "GEOZONE_TOKEN_URL", default_value = config::DEFAULT_TOKEN_ENDPOINT)]
    token_url: String,

    /// Geolocation base URL; the IP is appended to it
    #[arg(long, env = "GEOZONE_GEO_URL", default_value = config::DEFAULT_GEO_ENDPOINT)]
    geo_url: String,

    /// Reference page listing zone-to-region pairs
    #[arg(long, env = "GEOZONE_REGIONS_URL", default_value = config::DEFAULT_REGIONS_PAGE)]
    regions_url: String,

    /// Marker preceding the quoted CSRF token in the token page
    #[arg(long, env = "GEOZONE_CSRF_MARKER", default_value = config::DEFAULT_CSRF_MARKER)]
    csrf_marker: String,

    /// Ask for the CSRF token and cookie instead of scraping them
    #[arg(long)]
    prompt: bool,

    /// CSRF token to use as-is (skips scraping and prompting)
    #[arg(long, env = "GEOZONE_CSRF_TOKEN")]
    csrf_token: Option<String>,

    /// Cookie sent with `--csrf-token` (ignored without it)
    #[arg(long, env = "GEOZONE_COOKIE")]
    cookie: Option<String>,

    /// Output file
    #[arg(short, long, env = "GEOZONE_OUTPUT", default_value = config::DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Append-only run log
    #[arg(long, env = "GEOZONE_LOG_FILE", default_value = config::DEFAULT_LOG_PATH)]
    log_file: PathBuf,

    /// Per-request timeout in milliseconds (default: none)
    #[arg(long, env = "GEOZONE_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the result as JSON on stdout
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn to_config(&self) -> Config {
        Config {
            endpoints: Endpoints {
                ip_page: self.ip_url.clone(),
                token_page: self.token_page_url.clone(),
                token_endpoint: self.token_url.clone(),
                geo_endpoint: self.geo_url.clone(),
                regions_page: self.regions_url.clone(),
            },
            csrf_marker: self.csrf_marker.clone(),
            token_source: TokenSource::resolve(
                self.prompt,
                self.csrf_token.clone(),
                self.cookie.clone(),
            ),
            output_path: self.output.clone(),
            timeout_ms: self.timeout_ms,
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = cli.to_config();
    let mut log = RunLog::open(&cli.log_file)?;
    let client = HttpClient::new(config.timeout_ms).context("failed to build HTTP client")?;

    log.info("run started");
    let report = pipeline::run(&config, &client, &mut log).await?;
    log.info("run finished");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("IP:        {}", report.ip);
        println!("Time zone: {}", report.time_zone);
        println!("Regions:   {}", report.regions.join(", "));
        println!("Written:   {}", report.output_path.display());
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        // Usage errors share the exit code of every other failure.
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // 0=success, 1=any stage or setup failure
    if let Err(e) = run(&cli).await {
        let code = e
            .downcast_ref::<geozone::PipelineError>()
            .map(|p| p.exit_code())
            .unwrap_or(1);
        eprintln!("  Error: {e:#}");
        std::process::exit(code);
    }
}
