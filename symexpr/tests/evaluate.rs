use std::cell::Cell;
use std::collections::HashMap;

use symexpr::arena::ExprArena;
use symexpr::error::Error;
use symexpr::eval::evaluate;

#[test]
fn arithmetic_over_bound_symbols() {
    let ctx = ExprArena::new();
    let x = ctx.symbol("x");
    let y = ctx.symbol("y");
    let env = HashMap::from([("x", 4.0), ("y", 0.5)]);
    let lookup = |name: &str| env.get(name).copied();

    assert_eq!((x + y).evaluate(lookup).unwrap(), 4.5);
    assert_eq!((x - y).evaluate(lookup).unwrap(), 3.5);
    assert_eq!((x * y).evaluate(lookup).unwrap(), 2.0);
    assert_eq!((x / y).evaluate(lookup).unwrap(), 8.0);
    assert_eq!(x.pow(y).evaluate(lookup).unwrap(), 2.0);
    assert_eq!(((x + 1) * 2 - x.pow(2) / y).evaluate(lookup).unwrap(), -22.0);
}

#[test]
fn literals_need_no_bindings() {
    let ctx = ExprArena::new();
    let e = ctx.sub(ctx.pow(2, 10), ctx.div(9, 3));
    assert_eq!(evaluate(e, |_| None).unwrap(), 1021.0);
}

#[test]
fn unbound_symbol_is_reported_by_name() {
    let ctx = ExprArena::new();
    let x = ctx.symbol("x");
    let e = x * ctx.symbol("rate");

    let err = evaluate(e, |name| (name == "x").then_some(1.0)).unwrap_err();
    assert_eq!(err, Error::UnboundSymbol("rate".to_string()));
    assert!(err.to_string().contains("`rate`"));
}

#[test]
fn division_by_zero_follows_ieee() {
    let ctx = ExprArena::new();
    assert_eq!(ctx.div(1, 0).evaluate(|_| None).unwrap(), f64::INFINITY);
    assert_eq!(ctx.div(-1, 0).evaluate(|_| None).unwrap(), f64::NEG_INFINITY);
    assert!(ctx.div(0, 0).evaluate(|_| None).unwrap().is_nan());
}

#[test]
fn shared_symbol_is_looked_up_once() {
    let ctx = ExprArena::new();
    let x = ctx.symbol("x");
    let shared = x * x;
    let e = shared + shared;

    let lookups = Cell::new(0);
    let value = evaluate(e, |_| {
        lookups.set(lookups.get() + 1);
        Some(3.0)
    })
    .unwrap();

    assert_eq!(value, 18.0);
    assert_eq!(lookups.get(), 1);
}
