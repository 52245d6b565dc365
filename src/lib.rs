#![doc(test(attr(deny(warnings))))]

//! Expense Core offers the record model, period resolution, and aggregation
//! primitives that power expense dashboards and period reports.

pub mod config;
pub mod engine;
pub mod errors;
pub mod period;
pub mod projection;
pub mod records;
pub mod store;
pub mod utils;

pub use errors::{ExpenseError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}
