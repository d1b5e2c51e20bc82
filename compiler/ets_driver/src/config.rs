//! Driver configuration.

use ets_dump::DeclgenMode;

/// Settings for one driver run.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DriverConfig {
    /// Upper bound on nodes per unit. `None` for no limit.
    pub node_limit: Option<usize>,
    /// Run the tree verifier after every pass.
    pub verify_each_pass: bool,
    /// Declaration output produced by [`Driver::dump_declarations`](crate::Driver::dump_declarations).
    pub declgen: DeclgenMode,
    /// Include `loc` entries in structured dumps.
    pub dump_loc: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            node_limit: None,
            verify_each_pass: cfg!(debug_assertions),
            declgen: DeclgenMode::Declarations,
            dump_loc: true,
        }
    }
}

impl DriverConfig {
    #[must_use]
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_verify_each_pass(mut self, verify: bool) -> Self {
        self.verify_each_pass = verify;
        self
    }

    #[must_use]
    pub fn with_declgen(mut self, mode: DeclgenMode) -> Self {
        self.declgen = mode;
        self
    }

    #[must_use]
    pub fn with_dump_loc(mut self, dump_loc: bool) -> Self {
        self.dump_loc = dump_loc;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_override_defaults() {
        let config = DriverConfig::default()
            .with_node_limit(64)
            .with_verify_each_pass(true)
            .with_declgen(DeclgenMode::Isolated)
            .with_dump_loc(false);
        assert_eq!(config.node_limit, Some(64));
        assert!(config.verify_each_pass);
        assert_eq!(config.declgen, DeclgenMode::Isolated);
        assert!(!config.dump_loc);
    }
}
