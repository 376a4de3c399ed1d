//! Expression handles: construction sugar, structural queries, equality and hashing.
//!
//! Role
//! - [`Expr`] is a cheap `Copy` handle onto a node owned by an
//!   [`ExprArena`](crate::arena::ExprArena). Copying a handle shares the node.
//! - [`Expr::view`] decodes the outer constructor into an [`ExprView`] whose operands are
//!   again handles, which is how every algorithm of this crate inspects expressions.
//! - Equality and hashing are structural; identity is available through [`Expr::id`] and
//!   [`Expr::is_same`].
//!
//! Example
//! ```
//! use symexpr::arena::ExprArena;
//! use symexpr::expr::variant::ExprType;
//!
//! let ctx = ExprArena::new();
//! let x = ctx.symbol("x");
//! let a = x + 1;
//! let b = ctx.add(ctx.symbol("x"), ctx.number(1.0));
//! assert_eq!(a.type_(), ExprType::Add);
//! assert!(a == b && !a.is_same(&b));
//! ```
pub mod ops;
pub mod pretty;
pub mod variant;
pub mod view;

use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

use smallvec::{SmallVec, smallvec};

use crate::arena::{ArenaAllocable, ExprArena, Node};
use crate::error::Result;
use crate::expr::variant::ExprType;
use crate::expr::view::ExprView;
use crate::walker::postorder_evaluate;

/// Handle to an immutable expression node living in an [`ExprArena`].
///
/// Equality semantics
/// - `==` is structural: two handles are equal if their nodes have the same kind, the same
///   terminal payload, and pairwise-equal operands, even if they were built independently or
///   in different arenas.
/// - Fast path: when both sides reach the very same node the comparison of that subtree
///   short-circuits to `true`.
/// - Numbers compare by value with `-0.0 == 0.0`, and otherwise by bit pattern, which keeps
///   `Eq` reflexive for NaN literals.
///
/// Every whole-expression operation (equality, hashing, rendering, differentiation) runs on an
/// explicit stack, so arbitrarily deep expressions are supported.
#[derive(Clone, Copy)]
pub struct Expr<'a> {
    pub(crate) ctx: &'a ExprArena<'a>,
    pub(crate) node: &'a Node<'a>,
}

/// Identity of a node: two handles with the same id point at the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub(crate) fn of(node: &Node<'_>) -> Self {
        NodeId(node as *const Node<'_> as usize)
    }
}

/// Canonical bits of a numeric payload, shared by equality and hashing.
#[inline]
fn number_key(value: f64) -> u64 {
    if value == 0.0 { 0 } else { value.to_bits() }
}

impl<'a> Expr<'a> {
    /// Describe the node's outer constructor and expose its operands as handles.
    #[inline]
    pub fn view(&self) -> ExprView<'a, Expr<'a>> {
        let ctx = self.ctx;
        self.node.view.map(|node, _| Expr { ctx, node })
    }

    /// Return the discriminant identifying the kind of this node.
    #[inline]
    pub fn type_(&self) -> ExprType {
        self.node.view.type_()
    }

    /// Ordered operands: empty for terminals, `[left, right]` for operators.
    #[inline]
    pub fn operands(&self) -> SmallVec<[Expr<'a>; 2]> {
        self.view().operands()
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self.node.view {
            ExprView::Number(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_symbol(&self) -> Option<&'a str> {
        match self.node.view {
            ExprView::Symbol(name) => Some(name),
            _ => None,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.type_().is_terminal()
    }

    /// Identity of the underlying node.
    #[inline]
    pub fn id(&self) -> NodeId {
        NodeId::of(self.node)
    }

    /// Whether both handles point at the very same node (identity, not structure).
    #[inline]
    pub fn is_same(&self, other: &Expr<'_>) -> bool {
        self.id() == other.id()
    }

    /// The arena new nodes derived from this expression are allocated in.
    #[inline]
    pub fn arena(&self) -> &'a ExprArena<'a> {
        self.ctx
    }

    /// Build `self ^ exponent`. Stands in for the `**` operator Rust does not have.
    #[inline]
    pub fn pow<R: ArenaAllocable<'a>>(self, exponent: R) -> Expr<'a> {
        self.ctx.pow(self, exponent)
    }

    /// Symbolic derivative with respect to `variable`, see [`crate::diff::differentiate`].
    #[inline]
    pub fn differentiate(self, variable: &str) -> Result<Expr<'a>> {
        crate::diff::differentiate(self, variable)
    }

    /// Numeric value of the expression, see [`crate::eval::evaluate`].
    #[inline]
    pub fn evaluate<F>(self, lookup: F) -> Result<f64>
    where
        F: Fn(&str) -> Option<f64>,
    {
        crate::eval::evaluate(self, lookup)
    }

    /// Number of distinct nodes reachable from this expression. Shared nodes count once.
    pub fn node_count(&self) -> usize {
        let mut count = 0usize;
        postorder_evaluate(*self, |_, _: &[&()]| count += 1);
        count
    }

    /// Hash of the structure of this expression, consistent with `==`.
    ///
    /// Computed bottom-up from the kind, the terminal payload, and the operands' hashes, so
    /// shared sub-expressions are hashed once.
    pub fn structural_hash(&self) -> u64 {
        postorder_evaluate(*self, |node, operands: &[&u64]| {
            let mut hasher = DefaultHasher::new();
            (node.type_() as u8).hash(&mut hasher);
            match node.node.view {
                ExprView::Number(value) => number_key(value).hash(&mut hasher),
                ExprView::Symbol(name) => name.hash(&mut hasher),
                _ => {}
            }
            for operand in operands {
                operand.hash(&mut hasher);
            }
            hasher.finish()
        })
    }
}

impl<'a, 'b> PartialEq<Expr<'b>> for Expr<'a> {
    /// Structural comparison. Expect O(n) in the number of nodes in the worst case.
    fn eq(&self, other: &Expr<'b>) -> bool {
        let mut stack: SmallVec<[(&'a Node<'a>, &'b Node<'b>); 12]> = SmallVec::new();
        stack.push((self.node, other.node));

        // Iterate until we find a mismatch or exhaust the stack
        while let Some((a, b)) = stack.pop() {
            if NodeId::of(a) == NodeId::of(b) {
                continue;
            }

            match (a.view, b.view) {
                (ExprView::Number(x), ExprView::Number(y)) => {
                    if number_key(x) != number_key(y) {
                        return false;
                    }
                }
                (ExprView::Symbol(x), ExprView::Symbol(y)) => {
                    if x != y {
                        return false;
                    }
                }
                (a_view, b_view) => {
                    if a_view.type_() != b_view.type_() {
                        return false;
                    }
                    match (a_view.as_binary(), b_view.as_binary()) {
                        (Some((al, ar)), Some((bl, br))) => {
                            stack.push((*ar, *br));
                            stack.push((*al, *bl));
                        }
                        _ => return false,
                    }
                }
            }
        }

        // All nodes matched
        true
    }
}

impl<'a> Eq for Expr<'a> {}

impl<'a> Hash for Expr<'a> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}

/// Work item of the `Debug` writer.
enum DebugFrame<'a> {
    Node(Expr<'a>),
    Text(&'static str),
}

impl<'a> fmt::Debug for Expr<'a> {
    /// Constructor form, e.g. `Add(Symbol("x"), Number(1.0))`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack: SmallVec<[DebugFrame<'a>; 16]> = smallvec![DebugFrame::Node(*self)];

        while let Some(frame) = stack.pop() {
            match frame {
                DebugFrame::Text(text) => f.write_str(text)?,
                DebugFrame::Node(node) => match node.view() {
                    ExprView::Number(value) => write!(f, "Number({value:?})")?,
                    ExprView::Symbol(name) => write!(f, "Symbol({name:?})")?,
                    view => {
                        write!(f, "{}(", view.type_())?;
                        if let Some((lhs, rhs)) = view.as_binary() {
                            stack.push(DebugFrame::Text(")"));
                            stack.push(DebugFrame::Node(*rhs));
                            stack.push(DebugFrame::Text(", "));
                            stack.push(DebugFrame::Node(*lhs));
                        }
                    }
                },
            }
        }
        Ok(())
    }
}
