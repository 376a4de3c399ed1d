use symexpr::arena::ExprArena;
use symexpr::error::Error;
use symexpr::expr::Expr;
use symexpr::expr::variant::ExprType;
use symexpr::expr::view::ExprView;

fn operands_of<'a>(e: Expr<'a>) -> (Expr<'a>, Expr<'a>) {
    let operands = e.operands();
    assert_eq!(operands.len(), 2, "expected an operator node, got {e:?}");
    (operands[0], operands[1])
}

#[test]
fn terminals_carry_payload_and_no_operands() {
    let ctx = ExprArena::new();
    let n = ctx.number(2.5);
    let x = ctx.symbol("x");

    assert_eq!(n.type_(), ExprType::Number);
    assert_eq!(n.as_number(), Some(2.5));
    assert_eq!(n.as_symbol(), None);
    assert!(n.operands().is_empty());

    assert_eq!(x.type_(), ExprType::Symbol);
    assert_eq!(x.as_symbol(), Some("x"));
    assert_eq!(x.as_number(), None);
    assert!(x.operands().is_empty());
    assert!(x.is_terminal());
}

#[test]
fn named_constructors_build_each_operator() {
    let ctx = ExprArena::new();
    let x = ctx.symbol("x");
    let y = ctx.symbol("y");

    let cases = [
        (ctx.add(x, y), ExprType::Add),
        (ctx.sub(x, y), ExprType::Sub),
        (ctx.mul(x, y), ExprType::Mul),
        (ctx.div(x, y), ExprType::Div),
        (ctx.pow(x, y), ExprType::Pow),
    ];
    for (e, kind) in cases {
        assert_eq!(e.type_(), kind);
        let (l, r) = operands_of(e);
        // Operands are shared, not copied
        assert!(l.is_same(&x));
        assert!(r.is_same(&y));
    }
}

#[test]
fn right_hand_literal_is_coerced_to_number() {
    let ctx = ExprArena::new();
    let x = ctx.symbol("x");

    let e = x + 1;
    assert!(e == ctx.add(ctx.symbol("x"), ctx.number(1.0)));

    let (l, r) = operands_of(e);
    assert!(l.is_same(&x));
    assert_eq!(r.as_number(), Some(1.0));
}

#[test]
fn reflected_operators_preserve_operand_order() {
    let ctx = ExprArena::new();
    let x = ctx.symbol("x");

    let e = 1 + x;
    assert!(e == ctx.add(ctx.number(1.0), ctx.symbol("x")));
    assert!(e != x + 1);

    let cases = [
        (2.0 - x, ExprType::Sub),
        (2.0 * x, ExprType::Mul),
        (2.0 / x, ExprType::Div),
    ];
    for (e, kind) in cases {
        assert_eq!(e.type_(), kind);
        let (l, r) = operands_of(e);
        assert_eq!(l.as_number(), Some(2.0));
        assert!(r.is_same(&x));
    }
}

#[test]
fn every_numeric_primitive_is_coerced() {
    let ctx = ExprArena::new();
    let x = ctx.symbol("x");

    let values = [
        x * 3u8,
        x * 3u16,
        x * 3u32,
        x * 3u64,
        x * 3usize,
        x * 3i8,
        x * 3i16,
        x * 3i32,
        x * 3i64,
        x * 3isize,
        x * 3.0f32,
        x * 3.0f64,
    ];
    for e in values {
        assert!(e == ctx.mul(x, ctx.number(3.0)));
    }

    // Reflected forms for the default literal types, constructors for the rest
    assert!(3 * x == 3.0 * x);
    assert!(ctx.sub(3i64, x) == 3 - x);
    assert!(ctx.div(3u8, x) == ctx.div(3.0f32, x));
}

#[test]
fn pow_method_stands_in_for_power_operator() {
    let ctx = ExprArena::new();
    let x = ctx.symbol("x");
    let y = ctx.symbol("y");

    assert!(x.pow(2) == ctx.pow(x, ctx.number(2.0)));
    assert!(x.pow(y) == ctx.pow(ctx.symbol("x"), ctx.symbol("y")));
    // Reflected power goes through the named constructor
    let e = ctx.pow(2, x);
    let (base, exponent) = operands_of(e);
    assert_eq!(base.as_number(), Some(2.0));
    assert!(exponent.is_same(&x));
}

#[test]
fn operators_always_allocate_new_nodes() {
    let ctx = ExprArena::new();
    let x = ctx.symbol("x");
    let before = ctx.len();

    let a = x + x;
    let b = x + x;
    assert!(a == b);
    assert!(!a.is_same(&b));
    assert_eq!(ctx.len(), before + 2);

    // Operands are untouched
    assert_eq!(x.as_symbol(), Some("x"));
    assert!(x.operands().is_empty());
}

#[test]
fn nested_sugar_matches_explicit_construction() {
    let ctx = ExprArena::new();
    let x = ctx.symbol("x");
    let y = ctx.symbol("y");

    let sugar = (x + 1) * y / 2 - x.pow(3);
    let explicit = ctx.sub(ctx.div(ctx.mul(ctx.add(x, 1), y), 2), ctx.pow(x, 3));
    assert!(sugar == explicit);
}

#[test]
fn binary_builds_operators_from_runtime_kind() {
    let ctx = ExprArena::new();
    let x = ctx.symbol("x");

    for kind in [
        ExprType::Add,
        ExprType::Sub,
        ExprType::Mul,
        ExprType::Div,
        ExprType::Pow,
    ] {
        let e = ctx.binary(kind, x, 1).unwrap();
        assert_eq!(e.type_(), kind);
        let (l, r) = operands_of(e);
        assert!(l.is_same(&x));
        assert_eq!(r.as_number(), Some(1.0));
    }
}

#[test]
fn binary_rejects_terminal_kinds() {
    let ctx = ExprArena::new();
    let x = ctx.symbol("x");
    let before = ctx.len();

    for kind in [ExprType::Number, ExprType::Symbol] {
        let err = ctx.binary(kind, x, 1).unwrap_err();
        assert_eq!(err, Error::UnsupportedExpressionKind(kind));
        assert!(err.is_unsupported_expression_kind());
    }
    // Nothing was allocated for rejected requests
    assert_eq!(ctx.len(), before);
}

#[test]
fn kind_properties() {
    assert_eq!(ExprType::Add.precedence(), 1);
    assert_eq!(ExprType::Sub.precedence(), 1);
    assert_eq!(ExprType::Mul.precedence(), 2);
    assert_eq!(ExprType::Div.precedence(), 2);
    assert_eq!(ExprType::Pow.precedence(), 3);

    assert_eq!(ExprType::Add.symbol(), Some("+"));
    assert_eq!(ExprType::Sub.symbol(), Some("-"));
    assert_eq!(ExprType::Mul.symbol(), Some("*"));
    assert_eq!(ExprType::Div.symbol(), Some("/"));
    assert_eq!(ExprType::Pow.symbol(), Some("^"));
    assert_eq!(ExprType::Number.symbol(), None);
    assert_eq!(ExprType::Symbol.symbol(), None);

    assert!(ExprType::Number.is_terminal());
    assert!(ExprType::Symbol.is_terminal());
    assert!(ExprType::Pow.is_operator());
    assert_eq!(ExprType::Number.arity(), 0);
    assert_eq!(ExprType::Div.arity(), 2);
}

#[test]
fn view_exposes_operands_as_handles() {
    let ctx = ExprArena::new();
    let x = ctx.symbol("x");
    let e = x / 4;

    match e.view() {
        ExprView::Div(num, den) => {
            assert!(num.is_same(&x));
            assert_eq!(den.as_number(), Some(4.0));
        }
        other => panic!("expected a division, got {:?}", other.type_()),
    }

    let mapped = e.view().map(|operand, position| (operand.type_(), position));
    assert!(matches!(
        mapped,
        ExprView::Div((ExprType::Symbol, 0), (ExprType::Number, 1))
    ));
}
