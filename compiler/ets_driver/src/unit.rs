//! One compilation unit: a tree plus the dialect it is processed as.

use ets_ir::{Ast, Dialect, EtsAnalyzer, EtsGen, NodeId, PandaGen, TsAnalyzer, TypeRef};

use crate::DriverError;

/// A parsed source file on its way through the frontend.
pub struct CompilationUnit {
    pub name: String,
    pub dialect: Dialect,
    pub ast: Ast,
    pub root: NodeId,
    /// Source text, when available, for line/column locations.
    pub source: Option<String>,
}

impl CompilationUnit {
    pub fn new(name: impl Into<String>, dialect: Dialect, ast: Ast, root: NodeId) -> Self {
        CompilationUnit {
            name: name.into(),
            dialect,
            ast,
            root,
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    fn expect_dialect(&self, expected: Dialect) -> Result<(), DriverError> {
        if self.dialect == expected {
            Ok(())
        } else {
            Err(DriverError::DialectMismatch {
                unit: self.name.clone(),
                expected,
                found: self.dialect,
            })
        }
    }

    /// Check the whole unit with the TS checker.
    #[tracing::instrument(level = "debug", skip_all, fields(unit = %self.name))]
    pub fn check_ts<C: TsAnalyzer + ?Sized>(&mut self, checker: &mut C) -> Result<TypeRef, DriverError> {
        self.expect_dialect(Dialect::Ts)?;
        Ok(self.ast.check_ts(self.root, checker))
    }

    /// Check the whole unit with the ETS checker.
    #[tracing::instrument(level = "debug", skip_all, fields(unit = %self.name))]
    pub fn check_ets<C: EtsAnalyzer + ?Sized>(&mut self, checker: &mut C) -> Result<TypeRef, DriverError> {
        self.expect_dialect(Dialect::Ets)?;
        Ok(self.ast.check_ets(self.root, checker).ty)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(unit = %self.name))]
    pub fn compile_ts<G: PandaGen + ?Sized>(&self, gen: &mut G) -> Result<(), DriverError> {
        self.expect_dialect(Dialect::Ts)?;
        self.ast.compile_ts(self.root, gen);
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(unit = %self.name))]
    pub fn compile_ets<G: EtsGen + ?Sized>(&self, gen: &mut G) -> Result<(), DriverError> {
        self.expect_dialect(Dialect::Ets)?;
        self.ast.compile_ets(self.root, gen);
        Ok(())
    }

    /// Drop binder and checker attachments once the unit is emitted. The
    /// nodes stay until the unit is dropped.
    pub fn clean_up(&mut self) {
        tracing::debug!(unit = %self.name, nodes = self.ast.len(), "cleaning up unit");
        self.ast.clean_up();
    }
}
