use std::collections::HashSet;
use std::hash::{DefaultHasher, Hash, Hasher};

use symexpr::arena::ExprArena;
use symexpr::expr::Expr;

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn right_chain<'a>(ctx: &'a ExprArena<'a>, depth: usize) -> Expr<'a> {
    let mut e = ctx.symbol("x");
    for i in 0..depth {
        e = ctx.add(ctx.number(i as f64), e);
    }
    e
}

#[test]
fn structurally_equal_but_distinct_nodes() {
    let ctx = ExprArena::new();
    let a = ctx.add(ctx.number(1.0), ctx.number(2.0));
    let b = ctx.add(ctx.number(1.0), ctx.number(2.0));

    assert!(a == b);
    assert!(!a.is_same(&b));
    assert_ne!(a.id(), b.id());
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_eq!(a.structural_hash(), b.structural_hash());
}

#[test]
fn kind_payload_and_operands_all_matter() {
    let ctx = ExprArena::new();
    let x = ctx.symbol("x");
    let y = ctx.symbol("y");

    // Different kinds over the same operands
    assert!(ctx.add(x, y) != ctx.sub(x, y));
    assert!(ctx.mul(x, y) != ctx.div(x, y));
    // Operand order
    assert!(x + 1 != 1 + x);
    assert!(ctx.add(x, y) != ctx.add(y, x));
    // Terminal payloads
    assert!(x != y);
    assert!(ctx.number(1.0) != ctx.number(2.0));
    // Terminal kinds
    assert!(ctx.number(1.0) != ctx.symbol("1"));
    // Terminal vs operator
    assert!(x != x + 0);
}

#[test]
fn integer_and_float_literals_coincide() {
    let ctx = ExprArena::new();
    let x = ctx.symbol("x");
    assert!(x + 1 == x + 1.0);
    assert_eq!(hash_of(&(x + 1)), hash_of(&(x + 1.0)));
}

#[test]
fn signed_zeros_are_equal_and_hash_alike() {
    let ctx = ExprArena::new();
    let pos = ctx.number(0.0);
    let neg = ctx.number(-0.0);
    assert!(pos == neg);
    assert_eq!(hash_of(&pos), hash_of(&neg));
}

#[test]
fn nan_literal_equals_itself() {
    let ctx = ExprArena::new();
    let nan = ctx.number(f64::NAN);
    assert!(nan == nan);
    assert!(nan == ctx.number(f64::NAN));
}

#[test]
fn equality_across_arenas() {
    let left = ExprArena::new();
    let right = ExprArena::new();

    let a = left.symbol("x").pow(2) * 3;
    let b = right.symbol("x").pow(2) * 3;
    assert!(a == b);
    assert!(b == a);
    assert_eq!(hash_of(&a), hash_of(&b));

    let c = right.symbol("y").pow(2) * 3;
    assert!(a != c);
}

#[test]
fn shared_and_unshared_graphs_compare_equal() {
    let ctx = ExprArena::new();
    let shared = ctx.symbol("x") + 1;
    let with_sharing = shared * shared;
    let without_sharing = (ctx.symbol("x") + 1) * (ctx.symbol("x") + 1);

    assert!(with_sharing == without_sharing);
    assert_eq!(hash_of(&with_sharing), hash_of(&without_sharing));
    assert_eq!(with_sharing.node_count(), 4);
    assert_eq!(without_sharing.node_count(), 7);
}

#[test]
fn hash_set_deduplicates_structurally() {
    let ctx = ExprArena::new();
    let x = ctx.symbol("x");

    let mut set = HashSet::new();
    assert!(set.insert(x * 2));
    assert!(!set.insert(ctx.symbol("x") * 2));
    assert!(set.insert(2 * x));
    assert_eq!(set.len(), 2);
}

#[test]
fn deep_chains_compare_and_hash_without_overflow() {
    let ctx = ExprArena::new();
    let a = right_chain(&ctx, 10_000);
    let b = right_chain(&ctx, 10_000);
    let c = right_chain(&ctx, 9_999);

    assert!(a == b);
    assert!(a != c);
    assert_eq!(hash_of(&a), hash_of(&b));
}
