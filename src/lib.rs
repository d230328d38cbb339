#![doc(test(attr(deny(warnings))))]

//! Crop Advisor holds the stateful core of the farm-details flow: a
//! multi-step form wizard with numeric normalization, a region-name resolver
//! for geocoder output, and the client that saves the collected farm profile.

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod location;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Crop Advisor tracing initialized.");
    });
}
