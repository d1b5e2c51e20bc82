//! AST dumpers for the ETS frontend.
//!
//! - [`AstDumper`]: nested key/value document of a subtree, for tooling and
//!   tests (`--dump-ast`)
//! - [`SrcDumper`]: regenerated source text, including declaration-file
//!   generation (`--dump-src`, declgen)

mod ast_dump;
mod line_index;
mod src_dump;

pub use ast_dump::{node_properties, AstDumper, Constant, DumpConfig, PropValue, Property};
pub use line_index::LineIndex;
pub use src_dump::{DeclgenMode, SrcDumpConfig, SrcDumper, TypeNames};

use ets_ir::{Ast, NodeId};

/// Structured dump of the subtree at `root` with byte-offset locations.
pub fn dump_json(ast: &Ast, root: NodeId) -> String {
    AstDumper::new(ast).dump(root)
}

/// Regenerated source of the subtree at `root`.
pub fn dump_source(ast: &Ast, root: NodeId) -> String {
    let mut dumper = SrcDumper::new(ast);
    dumper.dump(root);
    dumper.finish()
}

/// Render a number literal the way the source language prints it.
pub(crate) fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned()
    } else {
        format!("{value}")
    }
}

/// Append `s` as a double-quoted string literal with JSON escapes.
pub(crate) fn write_quoted(out: &mut String, s: &str) {
    out.push_str(&serde_json::Value::from(s).to_string());
}
