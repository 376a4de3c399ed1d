use strum::EnumIs;
use thiserror::Error;

use crate::expr::variant::ExprType;

#[derive(Debug, Clone, PartialEq, Eq, EnumIs, Error)]
pub enum Error {
    /// A dispatch over expression kinds received a kind it cannot handle.
    #[error(
        "Expression kind `{0}` is not supported here. Only binary operators (Add, Sub, Mul, Div, Pow) can be built from two operands."
    )]
    UnsupportedExpressionKind(ExprType),

    /// The power rule only covers constant exponents.
    #[error(
        "Cannot differentiate `{base} ^ {exponent}` with respect to `{variable}`: the exponent `{exponent}` is not a numeric constant."
    )]
    UnsupportedVariableExponent {
        base: String,
        exponent: String,
        variable: String,
    },

    /// A symbol reached by numeric evaluation has no value.
    #[error("Symbol `{0}` has no bound value. Provide one through the lookup function.")]
    UnboundSymbol(String),
}

pub type Result<T> = std::result::Result<T, Error>;
