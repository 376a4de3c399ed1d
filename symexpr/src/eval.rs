//! Numeric evaluation of expressions.
use crate::error::{Error, Result};
use crate::expr::{Expr, view::ExprView};
use crate::walker::try_postorder_evaluate;

/// Compute the `f64` value of `expr`, resolving symbols through `lookup`.
///
/// Arithmetic follows IEEE-754: `Pow` uses [`f64::powf`] and dividing by zero yields an infinity
/// or NaN rather than an error. A symbol for which `lookup` returns `None` fails with
/// [`Error::UnboundSymbol`]. Shared sub-expressions are evaluated once.
///
/// ```
/// use std::collections::HashMap;
/// use symexpr::arena::ExprArena;
/// use symexpr::eval::evaluate;
///
/// let ctx = ExprArena::new();
/// let x = ctx.symbol("x");
/// let e = (x + 1) * x.pow(2);
///
/// let env = HashMap::from([("x", 3.0)]);
/// assert_eq!(evaluate(e, |name| env.get(name).copied()).unwrap(), 36.0);
/// assert!(evaluate(e, |_| None).unwrap_err().is_unbound_symbol());
/// ```
pub fn evaluate<F>(expr: Expr<'_>, lookup: F) -> Result<f64>
where
    F: Fn(&str) -> Option<f64>,
{
    try_postorder_evaluate(expr, |node, values: &[&f64]| {
        let value = match node.view() {
            ExprView::Number(value) => value,
            ExprView::Symbol(name) => {
                lookup(name).ok_or_else(|| Error::UnboundSymbol(name.to_owned()))?
            }
            ExprView::Add(..) => values[0] + values[1],
            ExprView::Sub(..) => values[0] - values[1],
            ExprView::Mul(..) => values[0] * values[1],
            ExprView::Div(..) => values[0] / values[1],
            ExprView::Pow(..) => values[0].powf(*values[1]),
        };
        Ok(value)
    })
}
