//! Per-unit failures reported by the driver.

use ets_ir::{AllocError, Dialect, Violation};
use thiserror::Error;

/// Failure that aborts one compilation unit.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DriverError {
    #[error("pass `{pass}` ran out of space: {source}")]
    Alloc {
        pass: &'static str,
        #[source]
        source: AllocError,
    },

    #[error("pass `{pass}` left an invalid tree ({} violations, first: {})", violations.len(), first_violation(violations))]
    InvalidTree {
        pass: &'static str,
        violations: Vec<Violation>,
    },

    #[error("unit `{unit}` is {found} but was handed to the {expected} pipeline")]
    DialectMismatch {
        unit: String,
        expected: Dialect,
        found: Dialect,
    },
}

fn first_violation(violations: &[Violation]) -> String {
    violations
        .first()
        .map_or_else(|| "none".to_owned(), ToString::to_string)
}
