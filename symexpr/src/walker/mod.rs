//! Iterative, sharing-aware postorder evaluation over expressions.
//!
//! This module provides the bottom-up fold every whole-expression algorithm of the crate is
//! built on:
//! - [`postorder_evaluate`]: compute a result for every distinct node from the results of its
//!   operands and return the root's result.
//! - [`try_postorder_evaluate`]: the fallible form, which stops at the first error.
//!
//! Traversal strategy
//! - Explicit stack of enter/exit frames (no recursion), so expressions of unbounded depth do
//!   not overflow the call stack.
//! - Operands are visited left to right, each before its parent.
//! - Nodes are identified by [`NodeId`](crate::expr::NodeId), not by structure: a node
//!   referenced from several parents is visited exactly once and its cached result is handed
//!   to every parent, while two structurally equal but separately built nodes are visited
//!   independently.
//!
//! Performance and memory footprint
//! - Time: O(n) in the number of distinct nodes.
//! - Memory: one cached result per distinct node plus a stack of O(n) frames in the worst case.
//!   The cache is private to the call; concurrent traversals never share it.
//!
//! Example: evaluate numerically
//! ```
//! use symexpr::arena::ExprArena;
//! use symexpr::expr::view::ExprView;
//! use symexpr::walker::postorder_evaluate;
//!
//! let ctx = ExprArena::new();
//! let e = ctx.mul(ctx.add(1, 2), 4);
//! let value = postorder_evaluate(e, |node, operands: &[&f64]| match node.view() {
//!     ExprView::Number(v) => v,
//!     ExprView::Add(..) => operands[0] + operands[1],
//!     ExprView::Mul(..) => operands[0] * operands[1],
//!     _ => unimplemented!(),
//! });
//! assert_eq!(value, 12.0);
//! ```
//!
//! Example: shared sub-expressions are visited once
//! ```
//! use symexpr::arena::ExprArena;
//! use symexpr::walker::postorder_evaluate;
//!
//! let ctx = ExprArena::new();
//! let shared = ctx.add(1, 2);
//! let root = ctx.mul(shared, shared);
//! let mut visits = 0;
//! postorder_evaluate(root, |_, _: &[&()]| visits += 1);
//! assert_eq!(visits, 4); // Mul, Add, 1, 2
//! ```
mod internal;

use std::convert::Infallible;

use log::trace;
use smallvec::{SmallVec, smallvec};

use crate::expr::Expr;
use crate::walker::internal::{Frame, StateTable, schedule_operands};

/// Fold an expression bottom-up, stopping at the first error.
///
/// `visit` receives each distinct node together with the results of its operands (empty for
/// terminals, `[left, right]` for operators) and returns the node's result. If any call fails,
/// the traversal stops immediately, no further node is visited, and the error is returned.
///
/// Determinism: if `visit` is pure, the result only depends on the structure and sharing of
/// `expr`.
pub fn try_postorder_evaluate<'a, R, E, F>(expr: Expr<'a>, mut visit: F) -> Result<R, E>
where
    F: FnMut(Expr<'a>, &[&R]) -> Result<R, E>,
{
    let mut table = StateTable::<R>::new();
    let mut stack: SmallVec<[Frame<'a>; 16]> = smallvec![Frame::Enter(expr)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(node) => {
                let id = node.id();
                // A node can be scheduled by several parents before its first visit.
                if table.is_resolved(id) {
                    continue;
                }
                debug_assert!(!table.is_pending(id), "expressions are acyclic");

                table.mark_pending(id);
                stack.push(Frame::Exit(node));
                schedule_operands(&mut stack, &table, node);
            }
            Frame::Exit(node) => {
                let result = {
                    let operands: SmallVec<[&R; 2]> = node
                        .operands()
                        .iter()
                        .map(|operand| table.result(operand.id()))
                        .collect();
                    debug_assert_eq!(operands.len(), node.type_().arity());
                    visit(node, &operands)?
                };
                table.resolve(node.id(), result);
            }
        }
    }

    trace!("Postorder traversal resolved {} distinct nodes", table.len());
    Ok(table.take(expr.id()))
}

/// Fold an expression bottom-up.
///
/// Infallible form of [`try_postorder_evaluate`]: every distinct node reachable from `expr` is
/// visited exactly once, after its operands, and the root's result is returned.
pub fn postorder_evaluate<'a, R, F>(expr: Expr<'a>, mut visit: F) -> R
where
    F: FnMut(Expr<'a>, &[&R]) -> R,
{
    match try_postorder_evaluate(expr, |node, operands| {
        Ok::<R, Infallible>(visit(node, operands))
    }) {
        Ok(result) => result,
        Err(never) => match never {},
    }
}
