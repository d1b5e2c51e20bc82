//! Driver side of the ETS frontend.
//!
//! Owns what the IR layer leaves to its caller: sequencing passes over one
//! compilation unit, turning allocation failures and broken trees into
//! per-unit errors, routing a unit to the checker and backend of its
//! dialect, and producing the dumps.
//!
//! Two lowerings ship with the driver ([`lower`]): compound assignment
//! expansion (bottom-up) and multi-declarator splitting (top-down).

mod config;
mod error;
pub mod lower;
mod pass;
mod unit;

use std::sync::Once;

pub use config::DriverConfig;
pub use error::DriverError;
pub use pass::{Driver, Pass};
pub use unit::CompilationUnit;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Safe to call more than once. Does nothing unless `RUST_LOG` is set,
/// e.g. `RUST_LOG=ets_ir=debug,ets_driver=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .init();
        }
    });
}
