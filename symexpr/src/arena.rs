use log::debug;
use typed_arena::Arena;

use crate::{
    error::{Error, Result},
    expr::{Expr, variant::ExprType, view::ExprView},
    walker::postorder_evaluate,
};

/// Arena-backed storage for expression nodes.
///
/// Role
/// - Own every node of the expressions built through it. Nodes are immutable once allocated
///   and are freed together when the arena is dropped.
/// - Hand out [`Expr`] handles: small `Copy` values pointing at a node. Sharing a
///   sub-expression between several parents is simply copying its handle, which turns the
///   expression into a DAG rather than a tree.
/// - Intern symbol names so that terminal payloads live as long as the nodes referencing them.
///
/// Cycles cannot be expressed: the operands of a node must already exist when the node is
/// allocated.
///
/// Example
/// ```
/// use symexpr::arena::ExprArena;
///
/// let ctx = ExprArena::new();
/// let x = ctx.symbol("x");
/// let e = ctx.mul(ctx.add(x, 1), 2);
/// assert_eq!(e.to_string(), "(x + 1) * 2");
/// ```
pub struct ExprArena<'a> {
    nodes: Arena<Node<'a>>,
    names: Arena<u8>,
}

/// Arena-local node. Operands are references to sibling nodes of the same lifetime.
pub(crate) struct Node<'a> {
    pub(crate) view: ExprView<'a, &'a Node<'a>>,
}

/// Trait for values that can be used as an operand of an operator constructor.
///
/// Contract
/// - An [`Expr`] is returned as-is, without re-allocation.
/// - Numeric primitives are coerced into a fresh `Number` node allocated in `ctx`.
///
/// Coercion is restricted to numeric types: anything else simply does not implement this trait.
pub trait ArenaAllocable<'a> {
    fn alloc_in(self, ctx: &'a ExprArena<'a>) -> Expr<'a>;
}

impl<'a> ArenaAllocable<'a> for Expr<'a> {
    #[inline]
    fn alloc_in(self, _ctx: &'a ExprArena<'a>) -> Expr<'a> {
        self
    }
}

macro_rules! impl_allocable_for_number {
    ($($num:ty),* $(,)?) => {
        $(
            impl<'a> ArenaAllocable<'a> for $num {
                #[inline]
                fn alloc_in(self, ctx: &'a ExprArena<'a>) -> Expr<'a> {
                    ctx.number(self as f64)
                }
            }
        )*
    };
}

impl_allocable_for_number!(f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! define_operator_constructors {
    ($lt:lifetime; $($(#[$doc:meta])* $name:ident => $variant:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name<L, R>(&$lt self, lhs: L, rhs: R) -> Expr<$lt>
            where
                L: ArenaAllocable<$lt>,
                R: ArenaAllocable<$lt>,
            {
                let lhs = lhs.alloc_in(self);
                let rhs = rhs.alloc_in(self);
                self.alloc_view(ExprView::$variant(lhs.node, rhs.node))
            }
        )*
    };
}

impl<'a> ExprArena<'a> {
    /// Create a new, empty arena.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            names: Arena::new(),
        }
    }

    #[inline]
    pub(crate) fn alloc_view(&'a self, view: ExprView<'a, &'a Node<'a>>) -> Expr<'a> {
        let node = self.nodes.alloc(Node { view });
        Expr { ctx: self, node }
    }

    /// Allocate a numeric literal.
    pub fn number(&'a self, value: f64) -> Expr<'a> {
        self.alloc_view(ExprView::Number(value))
    }

    /// Allocate a named symbol. The name is copied into the arena.
    pub fn symbol(&'a self, name: &str) -> Expr<'a> {
        let name: &'a str = self.names.alloc_str(name);
        self.alloc_view(ExprView::Symbol(name))
    }

    define_operator_constructors! {
        'a;
        /// Allocate `lhs + rhs`.
        add => Add,
        /// Allocate `lhs - rhs`.
        sub => Sub,
        /// Allocate `lhs * rhs`.
        mul => Mul,
        /// Allocate `lhs / rhs`.
        div => Div,
        /// Allocate `base ^ exponent`.
        pow => Pow,
    }

    /// Allocate an operator node whose kind is only known at runtime.
    ///
    /// This is the rebuild entry point for generic rewrites that keep the kind of a node but
    /// replace its operands. Terminal kinds cannot be built from two operands and are rejected
    /// with [`Error::UnsupportedExpressionKind`].
    ///
    /// ```
    /// use symexpr::arena::ExprArena;
    /// use symexpr::expr::variant::ExprType;
    ///
    /// let ctx = ExprArena::new();
    /// let x = ctx.symbol("x");
    /// assert_eq!(ctx.binary(ExprType::Div, x, 2).unwrap().to_string(), "x / 2");
    /// assert!(ctx.binary(ExprType::Symbol, x, 2).is_err());
    /// ```
    pub fn binary<L, R>(&'a self, kind: ExprType, lhs: L, rhs: R) -> Result<Expr<'a>>
    where
        L: ArenaAllocable<'a>,
        R: ArenaAllocable<'a>,
    {
        if kind.is_terminal() {
            return Err(Error::UnsupportedExpressionKind(kind));
        }

        let lhs = lhs.alloc_in(self);
        let rhs = rhs.alloc_in(self);
        ExprView::binary(kind, lhs.node, rhs.node)
            .map(|view| self.alloc_view(view))
            .ok_or(Error::UnsupportedExpressionKind(kind))
    }

    /// Deep copy an expression, possibly living in another arena, into this one.
    ///
    /// Semantics
    /// - Runs a postorder traversal of `expr` and allocates a structurally identical graph of
    ///   new nodes in this arena. Symbol names are re-interned.
    /// - Sharing is preserved: every distinct source node is copied exactly once, so a
    ///   sub-expression referenced by several parents stays shared in the copy.
    ///
    /// Complexity
    /// - O(n) in the number of distinct nodes of `expr`.
    ///
    /// ```
    /// use symexpr::arena::ExprArena;
    ///
    /// let source = ExprArena::new();
    /// let x = source.symbol("x");
    /// let e = source.mul(x, x);
    ///
    /// let target = ExprArena::new();
    /// let copy = target.import(e);
    /// assert!(copy == e);
    /// assert_eq!(copy.node_count(), 2);
    /// ```
    pub fn import(&'a self, expr: Expr<'_>) -> Expr<'a> {
        let mut copied = 0usize;
        let root = postorder_evaluate(expr, |node, operands: &[&Expr<'a>]| {
            copied += 1;
            match node.view() {
                ExprView::Number(value) => self.number(value),
                ExprView::Symbol(name) => self.symbol(name),
                ExprView::Add(..) => self.add(*operands[0], *operands[1]),
                ExprView::Sub(..) => self.sub(*operands[0], *operands[1]),
                ExprView::Mul(..) => self.mul(*operands[0], *operands[1]),
                ExprView::Div(..) => self.div(*operands[0], *operands[1]),
                ExprView::Pow(..) => self.pow(*operands[0], *operands[1]),
            }
        });
        debug!("Imported {copied} distinct nodes into arena");
        root
    }

    /// Number of nodes allocated in this arena so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> Default for ExprArena<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// Create an arena and run a callback within it.
///
/// This is useful for quick one-off computations when you don't need to keep the arena around.
/// The callback's result must not borrow from the arena.
///
/// Example
/// ```
/// use symexpr::arena::with_arena;
///
/// let rendered = with_arena(|ctx| {
///     let x = ctx.symbol("x");
///     (x * 2 + 1).to_string()
/// });
/// assert_eq!(rendered, "x * 2 + 1");
/// ```
pub fn with_arena<F, R>(callback: F) -> R
where
    F: for<'a> FnOnce(&'a ExprArena<'a>) -> R,
{
    let ctx = ExprArena::new();
    callback(&ctx)
}
