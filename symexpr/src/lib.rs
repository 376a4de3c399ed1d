//! Symexpr: arena-backed symbolic arithmetic expressions.
//!
//! This crate builds expressions from numeric literals and named symbols with the usual
//! arithmetic operators, prints them with minimal parentheses, compares and hashes them
//! structurally, differentiates them symbolically, and exposes the memoized postorder fold that
//! all of the above are written with.
//!
//! Storage shape
//!  - Nodes are allocated in an [`ExprArena`](arena::ExprArena) and never mutated. Handles
//!    ([`Expr`](expr::Expr)) are `Copy`; reusing a handle shares the sub-expression, so an
//!    expression is a DAG whose nodes are identified by their [`NodeId`](expr::NodeId).
//!  - Operands must exist before the node that references them, which rules out cycles.
//!
//! Scalability
//!  - Every whole-expression algorithm runs on an explicit stack; deep expressions never
//!    overflow the call stack.
//!
//! Example
//! ```
//! use symexpr::prelude::*;
//!
//! let ctx = ExprArena::new();
//! let x = ctx.symbol("x");
//!
//! // Literals on either side are coerced, operand order is preserved
//! let e = (x + 1) * 2;
//! assert_eq!(e.to_string(), "(x + 1) * 2");
//! assert!(1 + x == ctx.add(ctx.number(1.0), ctx.symbol("x")));
//!
//! // Unsimplified derivative
//! let d = x.pow(3).differentiate("x").unwrap();
//! assert_eq!(d.to_string(), "3 * x ^ 2 * 1");
//!
//! // Client-defined fold
//! let leaves = postorder_evaluate(e, |node, operands: &[&usize]| {
//!     if node.is_terminal() { 1 } else { operands[0] + operands[1] }
//! });
//! assert_eq!(leaves, 3);
//! ```

/// Arena owning expression nodes, and the operand coercion trait.
pub mod arena;
/// Symbolic differentiation.
pub mod diff;
/// Crate-wide error type.
pub mod error;
/// Numeric evaluation.
pub mod eval;
/// Expression handles, kinds, views, operator sugar and rendering.
pub mod expr;
/// Postorder evaluation engine.
pub mod walker;

pub mod prelude {
    //! Convenient re-exports for end users.
    //!
    //! - Arena and handles
    //! - Kinds and views for matching on nodes
    //! - Pretty-printing via `PrettyExpr`
    //! - Differentiation, evaluation and the postorder engine
    pub use crate::arena::{ArenaAllocable, ExprArena, with_arena};
    pub use crate::error::{Error, Result};
    pub use crate::expr::{
        Expr, NodeId, pretty::PrettyExpr, variant::ExprType, view::ExprView,
    };

    pub use crate::diff::differentiate;
    pub use crate::eval::evaluate;
    pub use crate::walker::{postorder_evaluate, try_postorder_evaluate};
}
