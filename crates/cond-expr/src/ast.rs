// cond-expr/src/ast.rs
// ============================================================================
// Module: Expression AST
// Description: Parsed representation of condition expressions.
// Purpose: Provide an immutable tree for identifier checks and evaluation.
// Dependencies: none
// ============================================================================

//! ## Overview
//! The AST is deliberately small: literals, dotted paths, logical operators,
//! comparisons, membership, and the `len` builtin. `contains(arr, item)`
//! parses into the same membership node as `item in arr`.

// ============================================================================
// SECTION: Operators
// ============================================================================

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

// ============================================================================
// SECTION: Expression Tree
// ============================================================================

/// A parsed expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
    /// String literal.
    Str(String),
    /// Dotted environment path, e.g. `user.role`.
    Path(Vec<String>),
    /// Logical negation.
    Not(Box<Expr>),
    /// Logical conjunction (short-circuit).
    And(Box<Expr>, Box<Expr>),
    /// Logical disjunction (short-circuit).
    Or(Box<Expr>, Box<Expr>),
    /// Binary comparison.
    Compare {
        /// Comparison operator.
        op: CompareOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// Array membership (`needle in haystack`).
    In {
        /// Value searched for.
        needle: Box<Expr>,
        /// Array searched in.
        haystack: Box<Expr>,
    },
    /// `len(array)` builtin.
    Len(Box<Expr>),
}

impl Expr {
    /// Returns true when the node is statically boolean-typed.
    ///
    /// Paths are excluded: their runtime type is unknown, and a bare path at
    /// the program root would make "does this expression return a boolean"
    /// undecidable at compile time.
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(
            self,
            Self::Bool(_)
                | Self::Not(_)
                | Self::And(_, _)
                | Self::Or(_, _)
                | Self::Compare { .. }
                | Self::In { .. }
        )
    }

    /// Visits every path node in the tree.
    pub fn visit_paths<'a>(&'a self, visit: &mut impl FnMut(&'a [String])) {
        match self {
            Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::Str(_) => {}
            Self::Path(segments) => visit(segments),
            Self::Not(inner) | Self::Len(inner) => inner.visit_paths(visit),
            Self::And(lhs, rhs) | Self::Or(lhs, rhs) => {
                lhs.visit_paths(visit);
                rhs.visit_paths(visit);
            }
            Self::Compare {
                lhs,
                rhs,
                ..
            } => {
                lhs.visit_paths(visit);
                rhs.visit_paths(visit);
            }
            Self::In {
                needle,
                haystack,
            } => {
                needle.visit_paths(visit);
                haystack.visit_paths(visit);
            }
        }
    }
}
