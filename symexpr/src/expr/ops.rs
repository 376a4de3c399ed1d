//! Operator sugar for expressions.
//!
//! `Expr + rhs`, `Expr - rhs`, `Expr * rhs` and `Expr / rhs` accept either another [`Expr`]
//! or a numeric primitive, which is coerced into a `Number` node. The reflected forms
//! (`2 * x`) keep the mathematical operand order: `1 + x` builds `Add(Number(1), x)`, not
//! `Add(x, Number(1))`.
//!
//! Reflected forms only exist for `i32` and `f64`. An unsuffixed literal on the left then has
//! a single candidate impl and its type is inferred; with one impl per primitive `2 * x` would
//! be ambiguous. Use the named constructors for other left-hand types: `ctx.mul(3u8, x)`.
//!
//! New nodes are allocated in the arena of the [`Expr`] operand.
use crate::arena::ArenaAllocable;
use crate::expr::Expr;

macro_rules! define_ops_expr {
    ($($op:ident :: $method:ident => $ctor:ident),* $(,)?) => {
        $(
            impl<'a, R: ArenaAllocable<'a>> std::ops::$op<R> for Expr<'a> {
                type Output = Expr<'a>;

                #[inline]
                fn $method(self, rhs: R) -> Self::Output {
                    self.ctx.$ctor(self, rhs)
                }
            }
        )*
    };
}

macro_rules! define_reflected_ops_expr {
    ($($num:ty),* $(,)?) => {
        $(
            impl<'a> std::ops::Add<Expr<'a>> for $num {
                type Output = Expr<'a>;

                #[inline]
                fn add(self, rhs: Expr<'a>) -> Self::Output {
                    rhs.ctx.add(self, rhs)
                }
            }

            impl<'a> std::ops::Sub<Expr<'a>> for $num {
                type Output = Expr<'a>;

                #[inline]
                fn sub(self, rhs: Expr<'a>) -> Self::Output {
                    rhs.ctx.sub(self, rhs)
                }
            }

            impl<'a> std::ops::Mul<Expr<'a>> for $num {
                type Output = Expr<'a>;

                #[inline]
                fn mul(self, rhs: Expr<'a>) -> Self::Output {
                    rhs.ctx.mul(self, rhs)
                }
            }

            impl<'a> std::ops::Div<Expr<'a>> for $num {
                type Output = Expr<'a>;

                #[inline]
                fn div(self, rhs: Expr<'a>) -> Self::Output {
                    rhs.ctx.div(self, rhs)
                }
            }
        )*
    };
}

define_ops_expr! {
    Add::add => add,
    Sub::sub => sub,
    Mul::mul => mul,
    Div::div => div,
}

define_reflected_ops_expr!(i32, f64);
