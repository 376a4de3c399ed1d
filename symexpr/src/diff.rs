//! Symbolic differentiation.
//!
//! The derivative is produced by a fallible postorder fold: the derivative of every distinct
//! node is computed once from the derivatives of its operands and the operands themselves.
//! The result is returned exactly as the rules below build it; no simplification is applied,
//! so `d(x + 3)/dx` is `1 + 0`.
//!
//! | Node        | Derivative                                        |
//! |-------------|---------------------------------------------------|
//! | `c`         | `0`                                               |
//! | `x`         | `1` if `x` is the variable, else `0`              |
//! | `l + r`     | `l' + r'`                                         |
//! | `l - r`     | `l' - r'`                                         |
//! | `l * r`     | `l' * r + r' * l`                                 |
//! | `n / d`     | `(n' * d - n * d') / d ^ 2`                       |
//! | `b ^ k`     | `k * b ^ (k - 1) * b'` when `k` is a number       |
//!
//! Derivatives of terminals are only allocated when a parent uses them, and at most one `0` and
//! one `1` node are allocated per call. The exponent of a `Pow` is always a literal, so its
//! derivative is never materialized.
use std::cell::OnceCell;

use log::debug;

use crate::error::{Error, Result};
use crate::expr::{Expr, pretty::abbreviated, view::ExprView};
use crate::walker::try_postorder_evaluate;

/// Longest rendering of an operand carried by an error, in bytes.
const OPERAND_PREVIEW: usize = 64;

/// Derivative of a node, with the constants of terminal rules kept symbolic.
#[derive(Clone, Copy)]
enum Derivative<'a> {
    Zero,
    One,
    Expr(Expr<'a>),
}

/// Differentiate `expr` with respect to the symbol named `variable`.
///
/// New nodes are allocated in the arena of `expr`. A sub-expression shared in the input has its
/// derivative computed once, and that derivative is shared in the output.
///
/// Fails with [`Error::UnsupportedVariableExponent`] if a `Pow` node has an exponent that is not
/// a `Number`. The error carries renderings of both operands, abbreviated when long.
///
/// ```
/// use symexpr::arena::ExprArena;
/// use symexpr::diff::differentiate;
///
/// let ctx = ExprArena::new();
/// let x = ctx.symbol("x");
/// let d = differentiate(x * x, "x").unwrap();
/// assert_eq!(d.to_string(), "1 * x + 1 * x");
///
/// let y = ctx.symbol("y");
/// assert!(differentiate(x.pow(y), "x").unwrap_err().is_unsupported_variable_exponent());
/// ```
pub fn differentiate<'a>(expr: Expr<'a>, variable: &str) -> Result<Expr<'a>> {
    debug!(
        "Differentiating a `{}` expression with respect to `{variable}`",
        expr.type_()
    );

    let ctx = expr.arena();
    let (zero, one) = (OnceCell::new(), OnceCell::new());
    let materialize = |derivative: Derivative<'a>| match derivative {
        Derivative::Zero => *zero.get_or_init(|| ctx.number(0.0)),
        Derivative::One => *one.get_or_init(|| ctx.number(1.0)),
        Derivative::Expr(e) => e,
    };

    let root = try_postorder_evaluate(expr, |node, derivatives: &[&Derivative<'a>]| {
        let derivative = match node.view() {
            ExprView::Number(_) => return Ok(Derivative::Zero),
            ExprView::Symbol(name) if name == variable => return Ok(Derivative::One),
            ExprView::Symbol(_) => return Ok(Derivative::Zero),
            ExprView::Add(..) => ctx.add(
                materialize(*derivatives[0]),
                materialize(*derivatives[1]),
            ),
            ExprView::Sub(..) => ctx.sub(
                materialize(*derivatives[0]),
                materialize(*derivatives[1]),
            ),
            ExprView::Mul(lhs, rhs) => {
                let (dlhs, drhs) = (materialize(*derivatives[0]), materialize(*derivatives[1]));
                ctx.add(ctx.mul(dlhs, rhs), ctx.mul(drhs, lhs))
            }
            ExprView::Div(numerator, denominator) => {
                let (dnum, dden) = (materialize(*derivatives[0]), materialize(*derivatives[1]));
                ctx.div(
                    ctx.sub(ctx.mul(dnum, denominator), ctx.mul(numerator, dden)),
                    ctx.pow(denominator, 2.0),
                )
            }
            ExprView::Pow(base, exponent) => {
                let Some(k) = exponent.as_number() else {
                    let base = abbreviated(base, OPERAND_PREVIEW);
                    let exponent = abbreviated(exponent, OPERAND_PREVIEW);
                    debug!("Rejecting non-constant exponent `{exponent}` of `{base}`");
                    return Err(Error::UnsupportedVariableExponent {
                        base,
                        exponent,
                        variable: variable.to_owned(),
                    });
                };
                let dbase = materialize(*derivatives[0]);
                ctx.mul(ctx.mul(k, ctx.pow(base, k - 1.0)), dbase)
            }
        };
        Ok(Derivative::Expr(derivative))
    })?;

    Ok(materialize(root))
}
