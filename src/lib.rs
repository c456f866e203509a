#![doc(test(attr(deny(warnings))))]

//! Ledger Core is the event-sourced heart of a personal double-entry
//! bookkeeping application: an append-only, human-readable directive log,
//! deterministic replay of that log into a relational ledger store, a
//! dual-write coordinator that keeps store and log in lockstep, and the
//! report engine built on the reconstructed ledger.

pub mod currency;
pub mod domain;
pub mod errors;
pub mod ident;
pub mod journal;
pub mod replay;
pub mod reports;
pub mod store;
pub mod tee;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ledger Core tracing initialized.");
    });
}
