//! Dispatch enum for expression nodes.
//!
//! Every node decodes to a single [`ExprView`] whose operands are of the type parameter `E`.
//! Inside the arena `E` is a node reference; through the public API it is an
//! [`Expr`](crate::expr::Expr) handle.
use smallvec::SmallVec;
use strum::EnumIs;

use crate::expr::variant::ExprType;

/// Describes the outer constructor of an expression and exposes its operands.
#[derive(Debug, Clone, Copy, EnumIs)]
pub enum ExprView<'a, E> {
    // Terminals
    Number(f64),
    Symbol(&'a str),

    // Binary operators
    Add(E, E),
    Sub(E, E),
    Mul(E, E),
    Div(E, E),
    Pow(E, E),
}

impl<'a, E> ExprView<'a, E> {
    /// Return the discriminant identifying the kind of this node.
    #[inline]
    pub fn type_(&self) -> ExprType {
        match self {
            ExprView::Number(_) => ExprType::Number,
            ExprView::Symbol(_) => ExprType::Symbol,
            ExprView::Add(..) => ExprType::Add,
            ExprView::Sub(..) => ExprType::Sub,
            ExprView::Mul(..) => ExprType::Mul,
            ExprView::Div(..) => ExprType::Div,
            ExprView::Pow(..) => ExprType::Pow,
        }
    }

    /// Build an operator view of the given kind. Returns `None` for terminal kinds.
    #[inline]
    pub fn binary(kind: ExprType, lhs: E, rhs: E) -> Option<Self> {
        match kind {
            ExprType::Add => Some(ExprView::Add(lhs, rhs)),
            ExprType::Sub => Some(ExprView::Sub(lhs, rhs)),
            ExprType::Mul => Some(ExprView::Mul(lhs, rhs)),
            ExprType::Div => Some(ExprView::Div(lhs, rhs)),
            ExprType::Pow => Some(ExprView::Pow(lhs, rhs)),
            ExprType::Number | ExprType::Symbol => None,
        }
    }

    /// Left and right operands of an operator node, `None` for terminals.
    #[inline]
    pub fn as_binary(&self) -> Option<(&E, &E)> {
        match self {
            ExprView::Number(_) | ExprView::Symbol(_) => None,
            ExprView::Add(l, r)
            | ExprView::Sub(l, r)
            | ExprView::Mul(l, r)
            | ExprView::Div(l, r)
            | ExprView::Pow(l, r) => Some((l, r)),
        }
    }

    /// Map the operands to another type, preserving the constructor and terminal payloads.
    ///
    /// The callback receives each operand together with its position (0 for the left operand,
    /// 1 for the right one) and is invoked left to right.
    #[inline]
    pub fn map<F, T>(self, mut f: F) -> ExprView<'a, T>
    where
        F: FnMut(E, usize) -> T,
    {
        match self {
            ExprView::Number(v) => ExprView::Number(v),
            ExprView::Symbol(s) => ExprView::Symbol(s),
            ExprView::Add(l, r) => {
                let l = f(l, 0);
                ExprView::Add(l, f(r, 1))
            }
            ExprView::Sub(l, r) => {
                let l = f(l, 0);
                ExprView::Sub(l, f(r, 1))
            }
            ExprView::Mul(l, r) => {
                let l = f(l, 0);
                ExprView::Mul(l, f(r, 1))
            }
            ExprView::Div(l, r) => {
                let l = f(l, 0);
                ExprView::Div(l, f(r, 1))
            }
            ExprView::Pow(l, r) => {
                let l = f(l, 0);
                ExprView::Pow(l, f(r, 1))
            }
        }
    }
}

impl<'a, E: Copy> ExprView<'a, E> {
    /// Ordered operands of the node: empty for terminals, `[left, right]` for operators.
    #[inline]
    pub fn operands(&self) -> SmallVec<[E; 2]> {
        match self.as_binary() {
            Some((l, r)) => SmallVec::from_buf([*l, *r]),
            None => SmallVec::new(),
        }
    }
}
