use symexpr::prelude::*;

fn main() {
    let ctx = ExprArena::new();
    let x = ctx.symbol("x");
    let y = ctx.symbol("y");

    let expr = (x + 1).pow(3) * y / (x - y);
    expr.pretty_print().unwrap();
    println!();

    match expr.differentiate("x") {
        Ok(derivative) => {
            derivative.pretty_print().unwrap();
            println!();

            let at = |name: &str| match name {
                "x" => Some(2.0),
                "y" => Some(0.5),
                _ => None,
            };
            println!(
                "value at x = 2, y = 0.5: {} (slope {})",
                expr.evaluate(at).unwrap(),
                derivative.evaluate(at).unwrap()
            );
        }
        Err(err) => eprintln!("{err}"),
    }
}
