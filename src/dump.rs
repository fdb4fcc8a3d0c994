//! Indented diagnostic dump of expression trees.
//!
//! One node per line, children two spaces deeper than their parent,
//! pre-order. The format is for human eyes only; nothing re-parses it,
//! and `gen_parens` flags are invisible here.

use std::fmt::Write;

use crate::ast::Expr;

/// Dumper carrying the current indent level.
pub struct AstDumper {
    indent: usize,
}

impl Default for AstDumper {
    fn default() -> Self {
        Self::new()
    }
}

impl AstDumper {
    pub fn new() -> Self {
        Self { indent: 0 }
    }

    /// Dump an entire tree to a String.
    pub fn dump(&self, expr: &Expr) -> String {
        let mut out = String::new();
        self.write_expr(&mut out, expr);
        out
    }

    fn write_indent(&self, out: &mut String) {
        for _ in 0..self.indent {
            out.push_str("  ");
        }
    }

    fn indented(&self) -> Self {
        Self {
            indent: self.indent + 1,
        }
    }

    fn write_expr(&self, out: &mut String, expr: &Expr) {
        self.write_indent(out);
        match expr {
            Expr::Int(e) => {
                writeln!(out, "Integer constant with value `{}`", e.value).unwrap();
            }
            Expr::Double(e) => {
                writeln!(out, "Double constant with value `{:?}`", e.value).unwrap();
            }
            Expr::Variable(e) => {
                writeln!(out, "Variable expression for identifier `{}`", e.name).unwrap();
            }
            Expr::Unary(e) => {
                writeln!(out, "Unary expression of type {}", e.op.symbol()).unwrap();
                self.indented().write_expr(out, &e.operand);
            }
            Expr::Binary(e) => {
                writeln!(out, "Binary expression of type {}", e.op.symbol()).unwrap();
                let inner = self.indented();
                inner.write_expr(out, &e.left);
                inner.write_expr(out, &e.right);
            }
        }
    }
}
