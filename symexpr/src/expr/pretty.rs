//! RcDoc-based pretty-printer with termcolor annotations for [`Expr`].
//!
//! Role
//! - Convert an expression into an annotated document suitable for width-aware rendering.
//! - Provide colored output for terminals (TTY-aware) and plain strings for logs/tests.
//!
//! Parenthesization
//! - An operator renders as `<left> <symbol> <right>`.
//! - An operand is wrapped in parentheses iff it is an operator whose precedence is strictly
//!   lower than the precedence of its parent, e.g. `(x + 1) * 2` but `x * 2 + 1`.
//!
//! Scalability
//! - Text is produced as a flat sequence of pieces by an explicit stack, so deep expressions
//!   never recurse. `Display` writes the pieces straight to the formatter; the document is a
//!   balanced concatenation of the pieces, so its depth is logarithmic in their number.
//! - Shared sub-expressions are written out at each occurrence.

use std::convert::Infallible;
use std::fmt;
use std::io::{self, Write};

use pretty::{RcDoc, RenderAnnotated};
use smallvec::{SmallVec, smallvec};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::expr::Expr;
use crate::expr::{variant::ExprType, view::ExprView};

/// Width used by [`PrettyExpr::pretty_print`] when the terminal size is unknown.
pub const DEFAULT_WIDTH: usize = 80;

/// Styles used to annotate parts of the pretty-printed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Parentheses are colored by nesting level so matching pairs share a color.
    Paren(u8),
    Operator, // + - * / ^
    Number,
    Ident, // symbols
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Paren(depth) => {
                // Rotate through a palette for nested parentheses.
                let fg = match depth % 6 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::White,
                    3 => Color::Yellow,
                    4 => Color::Red,
                    5 => Color::Magenta,
                    _ => unreachable!(),
                };
                s.set_fg(Some(fg)).set_dimmed(true);
            }
            Style::Operator => {
                s.set_fg(Some(Color::Yellow)).set_bold(true);
            }
            Style::Number => {
                s.set_fg(Some(Color::Magenta));
            }
            Style::Ident => {
                s.set_fg(Some(Color::Green)).set_bold(true);
            }
        }
        s
    }
}

#[inline]
fn lparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string("(").annotate(Style::Paren(depth))
}

#[inline]
fn rparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string(")").annotate(Style::Paren(depth))
}

fn op(symbol: &'static str) -> RcDoc<'static, Style> {
    RcDoc::as_string(symbol).annotate(Style::Operator)
}

fn number(value: f64) -> RcDoc<'static, Style> {
    RcDoc::as_string(value).annotate(Style::Number)
}

fn ident(name: &str) -> RcDoc<'static, Style> {
    RcDoc::as_string(name).annotate(Style::Ident)
}

#[inline]
fn requires_parens(operand: ExprType, parent: ExprType) -> bool {
    operand.is_operator() && operand.precedence() < parent.precedence()
}

/// Smallest unit of rendered text.
#[derive(Debug, Clone, Copy)]
enum Piece<'a> {
    Number(f64),
    Ident(&'a str),
    Operator(&'static str),
    Space,
    /// Parentheses carry their nesting depth, counted from the root.
    LParen(u8),
    RParen(u8),
}

impl Piece<'_> {
    fn to_doc(self) -> RcDoc<'static, Style> {
        match self {
            Piece::Number(value) => number(value),
            Piece::Ident(name) => ident(name),
            Piece::Operator(symbol) => op(symbol),
            Piece::Space => RcDoc::space(),
            Piece::LParen(depth) => lparen(depth),
            Piece::RParen(depth) => rparen(depth),
        }
    }
}

impl fmt::Display for Piece<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Piece::Number(value) => write!(f, "{value}"),
            Piece::Ident(name) => f.write_str(name),
            Piece::Operator(symbol) => f.write_str(symbol),
            Piece::Space => f.write_str(" "),
            Piece::LParen(_) => f.write_str("("),
            Piece::RParen(_) => f.write_str(")"),
        }
    }
}

/// Work item of the rendering stack.
enum Pending<'a> {
    Node(Expr<'a>, u8),
    Piece(Piece<'a>),
}

fn push_operand<'a>(
    stack: &mut SmallVec<[Pending<'a>; 16]>,
    operand: Expr<'a>,
    parent: ExprType,
    depth: u8,
) {
    if requires_parens(operand.type_(), parent) {
        stack.push(Pending::Piece(Piece::RParen(depth)));
        stack.push(Pending::Node(operand, depth.saturating_add(1)));
        stack.push(Pending::Piece(Piece::LParen(depth)));
    } else {
        stack.push(Pending::Node(operand, depth));
    }
}

/// Feed the pieces of `expr` to `sink` from left to right, stopping at the first error.
fn for_each_piece<'a, E>(
    expr: Expr<'a>,
    mut sink: impl FnMut(Piece<'a>) -> Result<(), E>,
) -> Result<(), E> {
    let mut stack: SmallVec<[Pending<'a>; 16]> = smallvec![Pending::Node(expr, 0)];

    while let Some(pending) = stack.pop() {
        match pending {
            Pending::Piece(piece) => sink(piece)?,
            Pending::Node(node, depth) => match node.view() {
                ExprView::Number(value) => sink(Piece::Number(value))?,
                ExprView::Symbol(name) => sink(Piece::Ident(name))?,
                view => {
                    let kind = view.type_();
                    let (lhs, rhs) = match view.as_binary() {
                        Some((lhs, rhs)) => (*lhs, *rhs),
                        None => unreachable!("operator nodes carry two operands"),
                    };
                    // Reversed, so that the left operand is popped first
                    push_operand(&mut stack, rhs, kind, depth);
                    stack.push(Pending::Piece(Piece::Space));
                    stack.push(Pending::Piece(Piece::Operator(
                        kind.symbol().unwrap_or_default(),
                    )));
                    stack.push(Pending::Piece(Piece::Space));
                    push_operand(&mut stack, lhs, kind, depth);
                }
            },
        }
    }
    Ok(())
}

/// Concatenate documents pairwise, level by level.
fn concat_balanced(mut docs: Vec<RcDoc<'static, Style>>) -> RcDoc<'static, Style> {
    while docs.len() > 1 {
        let mut next = Vec::with_capacity(docs.len().div_ceil(2));
        let mut docs_iter = docs.into_iter();
        while let Some(first) = docs_iter.next() {
            next.push(match docs_iter.next() {
                Some(second) => first.append(second),
                None => first,
            });
        }
        docs = next;
    }
    docs.pop().unwrap_or_else(RcDoc::nil)
}

fn to_doc(e: Expr<'_>) -> RcDoc<'static, Style> {
    let mut docs = Vec::new();
    let Ok(()) = for_each_piece(e, |piece| {
        docs.push(piece.to_doc());
        Ok::<(), Infallible>(())
    });
    concat_balanced(docs)
}

/// Plain rendering of `expr` cut after `limit` bytes, with `...` marking the cut.
///
/// Stops walking the expression as soon as the limit is exceeded.
pub(crate) fn abbreviated(expr: Expr<'_>, limit: usize) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();
    let _ = for_each_piece(expr, |piece| {
        if out.len() > limit {
            return Err(fmt::Error);
        }
        write!(out, "{piece}")
    });

    if out.len() > limit {
        let mut end = limit;
        while !out.is_char_boundary(end) {
            end -= 1;
        }
        out.truncate(end);
        out.push_str("...");
    }
    out
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

/// Render a document to a `termcolor::WriteColor` with width-aware layout.
fn render_to<W: WriteColor + Write>(
    doc: &RcDoc<'_, Style>,
    width: usize,
    out: &mut W,
) -> io::Result<()> {
    let mut cw = ColorWriter { out };
    doc.render_raw(width, &mut cw)
}

/// Convenience: retrieve the width of the terminal, or the default if it cannot be determined.
fn terminal_width() -> usize {
    term_size::dimensions()
        .map(|(w, _)| w)
        .unwrap_or(DEFAULT_WIDTH)
}

/// Pretty-printing conveniences for expressions.
pub trait PrettyExpr {
    /// Build an RcDoc representation of this expression with style annotations.
    /// Useful for composing or rendering manually.
    fn pretty_doc(&self) -> RcDoc<'static, Style>;

    /// Render this expression with colors to any termcolor writer at the given width.
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()>;

    /// Print this expression to stdout with colors (TTY-aware), at auto-detected width.
    fn pretty_print(&self) -> io::Result<()>;

    /// Format this expression into a plain string (no colors).
    fn pretty_string(&self) -> String;
}

impl<'e> PrettyExpr for Expr<'e> {
    #[inline]
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        to_doc(*self)
    }

    #[inline]
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()> {
        render_to(&self.pretty_doc(), width, out)
    }

    fn pretty_print(&self) -> io::Result<()> {
        let stdout = StandardStream::stdout(ColorChoice::Auto);
        let mut stdout = stdout.lock();
        self.pretty_render_to(terminal_width(), &mut stdout)
    }

    fn pretty_string(&self) -> String {
        self.to_string()
    }
}

impl<'e> fmt::Display for Expr<'e> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for_each_piece(*self, |piece| write!(f, "{piece}"))
    }
}
