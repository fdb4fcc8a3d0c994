//! Expression tree model: node kinds, operators, and precedence tables.

// ---------------------------------------------------------------------------
// Node kinds
// ---------------------------------------------------------------------------

/// A generated expression.
///
/// The tree is immutable once built: the generator constructs it bottom-up
/// and the printer and dumper only read it. Composite nodes own their
/// children outright; there is no sharing and no back-references.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(IntegerConstant),
    Double(DoubleConstant),
    Variable(VariableExpr),
    Unary(Box<UnaryExpr>),
    Binary(Box<BinaryExpr>),
}

/// Integer constant leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerConstant {
    pub value: u64,
    pub gen_parens: bool,
}

/// Floating-point constant leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleConstant {
    pub value: f64,
    pub gen_parens: bool,
}

/// Variable reference leaf. The name is a non-empty identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableExpr {
    pub name: String,
    pub gen_parens: bool,
}

/// Unary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Expr,
    pub gen_parens: bool,
}

/// Binary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Expr,
    pub op: BinaryOp,
    pub right: Expr,
    pub gen_parens: bool,
}

impl Expr {
    /// Integer constant node.
    pub fn int(value: u64, gen_parens: bool) -> Expr {
        Expr::Int(IntegerConstant { value, gen_parens })
    }

    /// Floating-point constant node.
    pub fn double(value: f64, gen_parens: bool) -> Expr {
        Expr::Double(DoubleConstant { value, gen_parens })
    }

    /// Variable reference node.
    pub fn variable(name: impl Into<String>, gen_parens: bool) -> Expr {
        Expr::Variable(VariableExpr {
            name: name.into(),
            gen_parens,
        })
    }

    /// Unary node taking ownership of its operand.
    pub fn unary(op: UnaryOp, operand: Expr, gen_parens: bool) -> Expr {
        Expr::Unary(Box::new(UnaryExpr {
            op,
            operand,
            gen_parens,
        }))
    }

    /// Binary node taking ownership of both operands.
    pub fn binary(left: Expr, op: BinaryOp, right: Expr, gen_parens: bool) -> Expr {
        Expr::Binary(Box::new(BinaryExpr {
            left,
            op,
            right,
            gen_parens,
        }))
    }

    /// Whether this node asked for explicit parentheses around itself.
    pub fn parenthesized(&self) -> bool {
        match self {
            Expr::Int(e) => e.gen_parens,
            Expr::Double(e) => e.gen_parens,
            Expr::Variable(e) => e.gen_parens,
            Expr::Unary(e) => e.gen_parens,
            Expr::Binary(e) => e.gen_parens,
        }
    }

    /// Height of the tree; a lone leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Expr::Int(_) | Expr::Double(_) | Expr::Variable(_) => 1,
            Expr::Unary(e) => 1 + e.operand.depth(),
            Expr::Binary(e) => 1 + e.left.depth().max(e.right.depth()),
        }
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Int(_) | Expr::Double(_) | Expr::Variable(_) => 1,
            Expr::Unary(e) => 1 + e.operand.node_count(),
            Expr::Binary(e) => 1 + e.left.node_count() + e.right.node_count(),
        }
    }

    /// Structural equality: same shape, operators, values, and names,
    /// ignoring every `gen_parens` flag. Two trees differing only in
    /// requested parentheses are the same expression.
    ///
    /// Doubles are compared bit-for-bit so the relation stays reflexive.
    pub fn structurally_eq(&self, other: &Expr) -> bool {
        match (self, other) {
            (Expr::Int(a), Expr::Int(b)) => a.value == b.value,
            (Expr::Double(a), Expr::Double(b)) => a.value.to_bits() == b.value.to_bits(),
            (Expr::Variable(a), Expr::Variable(b)) => a.name == b.name,
            (Expr::Unary(a), Expr::Unary(b)) => {
                a.op == b.op && a.operand.structurally_eq(&b.operand)
            }
            (Expr::Binary(a), Expr::Binary(b)) => {
                a.op == b.op
                    && a.left.structurally_eq(&b.left)
                    && a.right.structurally_eq(&b.right)
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,    // &&
    Or,     // ||
    BitAnd, // &
    BitOr,  // |
    BitXor, // ^
    Shl,    // <<
    Shr,    // >>
}

impl BinaryOp {
    /// Every binary operator, for uniform random draws.
    pub const ALL: &'static [BinaryOp] = &[
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::Eq,
        BinaryOp::Ne,
        BinaryOp::Lt,
        BinaryOp::Gt,
        BinaryOp::Le,
        BinaryOp::Ge,
        BinaryOp::And,
        BinaryOp::Or,
        BinaryOp::BitAnd,
        BinaryOp::BitOr,
        BinaryOp::BitXor,
        BinaryOp::Shl,
        BinaryOp::Shr,
    ];

    /// C-family precedence class; a lower number binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Mul | Self::Div | Self::Mod => 5,
            Self::Add | Self::Sub => 6,
            Self::Shl | Self::Shr => 7,
            Self::Lt | Self::Le | Self::Gt | Self::Ge => 9,
            Self::Eq | Self::Ne => 10,
            Self::BitAnd => 11,
            Self::BitXor => 12,
            Self::BitOr => 13,
            Self::And => 14,
            Self::Or => 15,
        }
    }

    /// Source-text spelling.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::And => "&&",
            Self::Or => "||",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Neg,
    Not,    // !
    BitNot, // ~
}

impl UnaryOp {
    /// Every unary operator, for uniform random draws.
    pub const ALL: &'static [UnaryOp] =
        &[UnaryOp::Plus, UnaryOp::Neg, UnaryOp::Not, UnaryOp::BitNot];

    /// Source-text spelling.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Neg => "-",
            Self::Not => "!",
            Self::BitNot => "~",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Operator tables ----------------------------------------------------

    #[test]
    fn precedence_orders_arithmetic_below_logical() {
        assert!(BinaryOp::Mul.precedence() < BinaryOp::Add.precedence());
        assert!(BinaryOp::Add.precedence() < BinaryOp::Shl.precedence());
        assert!(BinaryOp::Shl.precedence() < BinaryOp::Lt.precedence());
        assert!(BinaryOp::Lt.precedence() < BinaryOp::Eq.precedence());
        assert!(BinaryOp::Eq.precedence() < BinaryOp::BitAnd.precedence());
        assert!(BinaryOp::BitAnd.precedence() < BinaryOp::BitXor.precedence());
        assert!(BinaryOp::BitXor.precedence() < BinaryOp::BitOr.precedence());
        assert!(BinaryOp::BitOr.precedence() < BinaryOp::And.precedence());
        assert!(BinaryOp::And.precedence() < BinaryOp::Or.precedence());
    }

    #[test]
    fn same_class_operators_share_precedence() {
        assert_eq!(BinaryOp::Add.precedence(), BinaryOp::Sub.precedence());
        assert_eq!(BinaryOp::Mul.precedence(), BinaryOp::Div.precedence());
        assert_eq!(BinaryOp::Mul.precedence(), BinaryOp::Mod.precedence());
        assert_eq!(BinaryOp::Lt.precedence(), BinaryOp::Ge.precedence());
        assert_eq!(BinaryOp::Eq.precedence(), BinaryOp::Ne.precedence());
        assert_eq!(BinaryOp::Shl.precedence(), BinaryOp::Shr.precedence());
    }

    #[test]
    fn all_arrays_cover_every_operator() {
        assert_eq!(BinaryOp::ALL.len(), 18);
        assert_eq!(UnaryOp::ALL.len(), 4);
        // Symbols must be pairwise distinct within each table.
        for (i, a) in BinaryOp::ALL.iter().enumerate() {
            for b in &BinaryOp::ALL[i + 1..] {
                assert_ne!(a.symbol(), b.symbol(), "{a:?} and {b:?} share a symbol");
            }
        }
        for (i, a) in UnaryOp::ALL.iter().enumerate() {
            for b in &UnaryOp::ALL[i + 1..] {
                assert_ne!(a.symbol(), b.symbol(), "{a:?} and {b:?} share a symbol");
            }
        }
    }

    // -- Tree accessors -----------------------------------------------------

    #[test]
    fn depth_and_node_count() {
        let leaf = Expr::int(3, false);
        assert_eq!(leaf.depth(), 1);
        assert_eq!(leaf.node_count(), 1);

        let tree = Expr::binary(
            Expr::unary(UnaryOp::Neg, Expr::int(1, false), false),
            BinaryOp::Add,
            Expr::variable("x", false),
            false,
        );
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn parenthesized_reads_the_flag_on_any_kind() {
        assert!(Expr::int(1, true).parenthesized());
        assert!(!Expr::double(1.5, false).parenthesized());
        assert!(Expr::variable("x", true).parenthesized());
        assert!(Expr::unary(UnaryOp::Not, Expr::int(0, false), true).parenthesized());
        assert!(
            !Expr::binary(Expr::int(1, true), BinaryOp::Add, Expr::int(2, true), false)
                .parenthesized()
        );
    }

    // -- Structural equality ------------------------------------------------

    #[test]
    fn structural_equality_ignores_gen_parens() {
        let plain = Expr::binary(Expr::int(3, false), BinaryOp::Sub, Expr::int(4, false), false);
        let flagged = Expr::binary(Expr::int(3, true), BinaryOp::Sub, Expr::int(4, false), true);
        assert!(plain.structurally_eq(&flagged));
        assert_ne!(plain, flagged);
    }

    #[test]
    fn structural_equality_distinguishes_operators_and_values() {
        let add = Expr::binary(Expr::int(3, false), BinaryOp::Add, Expr::int(4, false), false);
        let sub = Expr::binary(Expr::int(3, false), BinaryOp::Sub, Expr::int(4, false), false);
        assert!(!add.structurally_eq(&sub));

        assert!(!Expr::int(3, false).structurally_eq(&Expr::int(4, false)));
        assert!(!Expr::int(3, false).structurally_eq(&Expr::double(3.0, false)));
        assert!(!Expr::variable("x", false).structurally_eq(&Expr::variable("y", false)));

        let neg = Expr::unary(UnaryOp::Neg, Expr::int(3, false), false);
        let not = Expr::unary(UnaryOp::Not, Expr::int(3, false), false);
        assert!(!neg.structurally_eq(&not));
    }
}
