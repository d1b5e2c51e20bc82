//! Pass sequencing.

use ets_dump::{AstDumper, DumpConfig, SrcDumpConfig, SrcDumper, TypeNames};
use ets_ir::{AllocError, Ast, NodeId};

use crate::lower::{ExpandDeclarations, OpAssignmentLowering};
use crate::{CompilationUnit, DriverConfig, DriverError};

/// One tree-to-tree pass.
pub trait Pass {
    /// Name recorded on provenance edges and in errors.
    fn name(&self) -> &'static str;

    fn run(&mut self, ast: &mut Ast, root: NodeId) -> Result<(), AllocError>;
}

/// Runs an ordered list of passes over compilation units.
pub struct Driver {
    config: DriverConfig,
    passes: Vec<Box<dyn Pass>>,
}

impl Driver {
    /// Driver without passes.
    pub fn new(config: DriverConfig) -> Self {
        Driver {
            config,
            passes: Vec::new(),
        }
    }

    /// Driver running the built-in lowerings: declaration splitting first,
    /// then compound assignment expansion.
    pub fn with_standard_lowerings(config: DriverConfig) -> Self {
        let mut driver = Self::new(config);
        driver.add_pass(ExpandDeclarations);
        driver.add_pass(OpAssignmentLowering);
        driver
    }

    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn pass_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.passes.iter().map(|pass| pass.name())
    }

    /// Empty arena honouring the configured node limit.
    pub fn new_ast(&self) -> Ast {
        match self.config.node_limit {
            Some(limit) => Ast::with_node_limit(limit),
            None => Ast::new(),
        }
    }

    /// Run every pass over `unit` in order.
    ///
    /// The first failing pass aborts the unit. With `verify_each_pass` the
    /// tree is verified after each pass and a broken tree is reported
    /// against the pass that produced it.
    #[tracing::instrument(level = "debug", skip_all, fields(unit = %unit.name, dialect = %unit.dialect))]
    pub fn lower(&mut self, unit: &mut CompilationUnit) -> Result<(), DriverError> {
        let root = unit.root;
        for pass in &mut self.passes {
            let name = pass.name();
            let _span = tracing::debug_span!("pass", name).entered();
            let before = unit.ast.len();

            pass.run(&mut unit.ast, root)
                .map_err(|source| DriverError::Alloc { pass: name, source })?;
            tracing::debug!(allocated = unit.ast.len() - before, "pass finished");

            if self.config.verify_each_pass {
                let violations = unit.ast.verify(root);
                if !violations.is_empty() {
                    tracing::debug!(count = violations.len(), "tree verification failed");
                    return Err(DriverError::InvalidTree {
                        pass: name,
                        violations,
                    });
                }
            }
        }
        Ok(())
    }

    /// Structured dump of the unit, with line/column locations when the
    /// unit carries its source text.
    pub fn dump_ast(&self, unit: &CompilationUnit) -> String {
        let config = if self.config.dump_loc {
            DumpConfig::default()
        } else {
            DumpConfig::without_loc()
        };
        let dumper = match unit.source.as_deref() {
            Some(source) => AstDumper::with_source(&unit.ast, source),
            None => AstDumper::new(&unit.ast),
        };
        dumper.with_config(config).dump(unit.root)
    }

    /// Declaration file of the unit in the configured declgen mode.
    pub fn dump_declarations(&self, unit: &CompilationUnit, types: Option<&dyn TypeNames>) -> String {
        let mut dumper =
            SrcDumper::new(&unit.ast).with_config(SrcDumpConfig::declgen(self.config.declgen));
        if let Some(types) = types {
            dumper = dumper.with_types(types);
        }
        dumper.dump(unit.root);
        dumper.finish()
    }
}

#[cfg(test)]
mod tests;
