#![doc(test(attr(deny(warnings))))]

//! MIO Finance provides the subscription, scheduling, and ledger primitives
//! behind the MIO personal-finance workflows and their CLI.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("MIO Finance tracing initialized.");
    });
}
