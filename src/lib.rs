#![doc(test(attr(deny(warnings))))]

//! Movie Core maintains a small persisted movie collection and powers the
//! interactive CLI: interchangeable storage backends, derived views over the
//! collection, best-effort metadata enrichment, and report generation.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod enrichment;
pub mod report;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Movie Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
