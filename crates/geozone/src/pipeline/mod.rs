//! The lookup pipeline: IP, token, time zone, regions, file.
//!
//! Stages run strictly in order. The first failure is logged and returned;
//! later stages never run, so the output file is only touched when every
//! earlier stage succeeded.

pub mod ip;
pub mod regions;
pub mod timezone;
pub mod token;
pub mod writer;

use crate::acquisition::HttpClient;
use crate::audit::RunLog;
use crate::config::Config;
use crate::error::{PipelineError, Stage, StageError, StageResultExt};
use serde::Serialize;
use std::path::PathBuf;

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub ip: String,
    pub time_zone: String,
    pub regions: Vec<String>,
    pub output_path: PathBuf,
}

/// Log the outcome of one stage and tag any failure with it.
fn checked<T>(
    log: &mut RunLog,
    stage: Stage,
    result: Result<T, StageError>,
) -> Result<T, PipelineError> {
    match result.at(stage) {
        Ok(value) => {
            log.info(&format!("{stage} received"));
            Ok(value)
        }
        Err(e) => {
            log.error(&e.describe());
            Err(e)
        }
    }
}

/// Run every stage once against `client`.
pub async fn run(
    config: &Config,
    client: &HttpClient,
    log: &mut RunLog,
) -> Result<Report, PipelineError> {
    let endpoints = &config.endpoints;

    log.info("getting ip");
    let ip = checked(log, Stage::Ip, ip::resolve_ip(client, &endpoints.ip_page).await)?;
    log.info(&format!("ip: {ip}"));

    log.info("getting csrf token");
    let csrf = token::acquire_csrf_token(
        client,
        &config.token_source,
        &endpoints.token_page,
        &config.csrf_marker,
    )
    .await;
    let csrf = checked(log, Stage::CsrfToken, csrf)?;

    log.info("getting token");
    let bearer = token::exchange_token(client, &endpoints.token_endpoint, &csrf).await;
    let bearer = checked(log, Stage::Token, bearer)?;

    log.info("getting time zone");
    let time_zone =
        timezone::resolve_time_zone(client, &endpoints.geo_endpoint, &ip, &bearer).await;
    let time_zone = checked(log, Stage::TimeZone, time_zone)?;
    log.info(&format!("time zone: {time_zone}"));

    log.info("getting regions");
    let regions = regions::lookup_regions(client, &endpoints.regions_page, &time_zone).await;
    let regions = checked(log, Stage::Regions, regions)?;
    log.info(&format!("{} regions in {time_zone}", regions.len()));

    log.info(&format!("writing {}", config.output_path.display()));
    let written = writer::write_regions(&config.output_path, &time_zone, &regions);
    checked(log, Stage::Write, written)?;

    Ok(Report {
        ip,
        time_zone,
        regions,
        output_path: config.output_path.clone(),
    })
}
