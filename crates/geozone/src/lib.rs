// Copyright 2026 Geozone Contributors
// SPDX-License-Identifier: Apache-2.0

//! Geozone library: public IP to time zone to regions.
//!
//! This library crate exposes the pipeline stages for integration testing.

pub mod acquisition;
pub mod audit;
pub mod config;
pub mod error;
pub mod pipeline;

pub use error::{PipelineError, Stage, StageError};
