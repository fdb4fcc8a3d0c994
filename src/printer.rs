//! Source-text rendering of expression trees.
//!
//! The output is a single line of C-like syntax that parses back to the
//! same structure under a left-associative, precedence-climbing grammar.
//! Parentheses appear in two cases: a node's own `gen_parens` flag, and
//! the associativity rules below, which insert the minimum grouping that
//! keeps a child from reassociating.

use std::fmt::Write;

use crate::ast::{BinaryExpr, Expr, UnaryExpr, UnaryOp};

/// Render an expression to source text.
pub fn print(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr);
    out
}

fn write_expr(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Int(e) => {
            if e.gen_parens {
                write!(out, "({})", e.value).unwrap();
            } else {
                write!(out, "{}", e.value).unwrap();
            }
        }
        Expr::Double(e) => {
            // `{:?}` keeps a decimal point or exponent, so the token stays
            // a floating literal and the value survives re-parsing exactly.
            if e.gen_parens {
                write!(out, "({:?})", e.value).unwrap();
            } else {
                write!(out, "{:?}", e.value).unwrap();
            }
        }
        Expr::Variable(e) => {
            if e.gen_parens {
                write!(out, "({})", e.name).unwrap();
            } else {
                out.push_str(&e.name);
            }
        }
        Expr::Unary(e) => write_unary(out, e),
        Expr::Binary(e) => write_binary(out, e),
    }
}

fn write_binary(out: &mut String, e: &BinaryExpr) {
    if e.gen_parens {
        out.push('(');
    }
    let prec = e.op.precedence();

    // A looser-binding left child would reassociate under left-to-right
    // parsing; a tighter-or-equal one is already the leftmost operand.
    if bare_binary_looser(&e.left, prec, false) {
        out.push('(');
        write_expr(out, &e.left);
        out.push(')');
    } else {
        write_expr(out, &e.left);
    }

    write!(out, " {} ", e.op.symbol()).unwrap();

    // The right side also wraps at equal precedence: left bare,
    // `3 - (4 + 5)` would read back as `(3 - 4) + 5`.
    if bare_binary_looser(&e.right, prec, true) {
        out.push('(');
        write_expr(out, &e.right);
        out.push(')');
    } else {
        write_expr(out, &e.right);
    }

    if e.gen_parens {
        out.push(')');
    }
}

/// True when `child` is a binary node that is not printing its own
/// parentheses and binds loosely enough to need wrapping under a parent
/// of precedence `parent_prec`.
fn bare_binary_looser(child: &Expr, parent_prec: u8, include_equal: bool) -> bool {
    match child {
        Expr::Binary(b) if !b.gen_parens => {
            let child_prec = b.op.precedence();
            if include_equal {
                child_prec >= parent_prec
            } else {
                child_prec > parent_prec
            }
        }
        _ => false,
    }
}

fn write_unary(out: &mut String, e: &UnaryExpr) {
    if e.gen_parens {
        out.push('(');
    }
    out.push_str(e.op.symbol());

    match &e.operand {
        // Unary operators bind tighter than every binary operator here,
        // so a bare binary operand would be misparsed.
        Expr::Binary(_) => {
            out.push('(');
            write_expr(out, &e.operand);
            out.push(')');
        }
        // Adjacent identical `-` or `+` tokens would lex as `--`/`++`.
        // A space keeps them two operators; the inner node's own
        // parentheses do the same job when it has them.
        Expr::Unary(inner) => {
            if e.op == inner.op
                && matches!(e.op, UnaryOp::Plus | UnaryOp::Neg)
                && !inner.gen_parens
            {
                out.push(' ');
            }
            write_expr(out, &e.operand);
        }
        _ => write_expr(out, &e.operand),
    }

    if e.gen_parens {
        out.push(')');
    }
}
