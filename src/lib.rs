#![doc(test(attr(deny(warnings))))]

//! SpendSmart Stats turns a user's expense, income and budget records into
//! aggregated spending reports and a three-month forecast.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod stats;
pub mod storage;
pub mod utils;

pub use crate::core::services::{ServiceError, ServiceResult, StatisticsService};
pub use crate::stats::{ReportRequest, ReportType, StatisticsResponse};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("SpendSmart Stats tracing initialized.");
    });
}
