use strum::Display;

/// Field-less discriminant of an expression node.
///
/// Operator kinds carry the static properties used for rendering: a precedence level (higher
/// binds tighter) and a display symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[repr(u8)]
pub enum ExprType {
    // Terminals
    Number,
    Symbol,

    // Binary operators
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl ExprType {
    /// Binding strength of the kind. Terminals never need parentheses and report `u8::MAX`.
    #[inline]
    pub fn precedence(self) -> u8 {
        use ExprType::*;

        match self {
            Add | Sub => 1,
            Mul | Div => 2,
            Pow => 3,
            Number | Symbol => u8::MAX,
        }
    }

    /// Infix symbol of an operator kind, `None` for terminals.
    #[inline]
    pub fn symbol(self) -> Option<&'static str> {
        use ExprType::*;

        match self {
            Add => Some("+"),
            Sub => Some("-"),
            Mul => Some("*"),
            Div => Some("/"),
            Pow => Some("^"),
            Number | Symbol => None,
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, ExprType::Number | ExprType::Symbol)
    }

    #[inline]
    pub fn is_operator(self) -> bool {
        !self.is_terminal()
    }

    /// Number of operands a node of this kind carries.
    #[inline]
    pub fn arity(self) -> usize {
        if self.is_terminal() { 0 } else { 2 }
    }
}
