//! Bookkeeping primitives for the postorder engine.
//!
//! Kept apart from the public entry points so that scheduling internals never leak into the
//! API surface.
use std::collections::HashMap;

use crate::expr::{Expr, NodeId};

/// Work item of the explicit traversal stack.
pub(super) enum Frame<'a> {
    /// First discovery of a node: schedule its operands.
    Enter(Expr<'a>),
    /// All operands are resolved: combine their results.
    Exit(Expr<'a>),
}

/// Per-node traversal state. Nodes absent from the table are unvisited.
pub(super) enum NodeState<R> {
    /// Entered, waiting for its operands to resolve.
    Pending,
    /// Visited; the cached result is reused for every parent.
    Resolved(R),
}

/// Traversal-local memo table keyed by node identity.
pub(super) struct StateTable<R> {
    states: HashMap<NodeId, NodeState<R>>,
}

impl<R> StateTable<R> {
    pub(super) fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    #[inline]
    pub(super) fn is_resolved(&self, id: NodeId) -> bool {
        matches!(self.states.get(&id), Some(NodeState::Resolved(_)))
    }

    #[inline]
    pub(super) fn is_pending(&self, id: NodeId) -> bool {
        matches!(self.states.get(&id), Some(NodeState::Pending))
    }

    #[inline]
    pub(super) fn mark_pending(&mut self, id: NodeId) {
        self.states.insert(id, NodeState::Pending);
    }

    #[inline]
    pub(super) fn resolve(&mut self, id: NodeId, result: R) {
        self.states.insert(id, NodeState::Resolved(result));
    }

    /// Cached result of an operand. Operands are always resolved before their parent exits.
    #[inline]
    pub(super) fn result(&self, id: NodeId) -> &R {
        match self.states.get(&id) {
            Some(NodeState::Resolved(result)) => result,
            _ => unreachable!("operand resolved before its parent"),
        }
    }

    /// Remove and return the result of the root once the traversal is over.
    #[inline]
    pub(super) fn take(&mut self, id: NodeId) -> R {
        match self.states.remove(&id) {
            Some(NodeState::Resolved(result)) => result,
            _ => unreachable!("root resolved at the end of the traversal"),
        }
    }

    /// Number of distinct nodes seen by the traversal.
    #[inline]
    pub(super) fn len(&self) -> usize {
        self.states.len()
    }
}

/// Push the operands of `node` that still need a visit, so that the left one is popped first.
#[inline]
pub(super) fn schedule_operands<'a, R>(
    stack: &mut smallvec::SmallVec<[Frame<'a>; 16]>,
    table: &StateTable<R>,
    node: Expr<'a>,
) {
    for operand in node.operands().into_iter().rev() {
        if !table.is_resolved(operand.id()) {
            stack.push(Frame::Enter(operand));
        }
    }
}
