use oblift_parser::{lift, print_expr, print_lifted, tokenize, Arena, Parser};

fn main() {
    let code = r#"
{
    origin: {x: 0, y: 0},
    move(dx, dy): {x: origin.x.add(dx), y: origin.y.add(dy)},
    label: name
}.move(3, 4)
"#;

    let tokens = tokenize(code);
    println!("{} tokens", tokens.len());

    let arena = Arena::new();
    match Parser::new(&arena, &tokens).parse_with_stats() {
        Ok((expr, stats)) => {
            println!("Parsed (max stack {}, max depth {}):", stats.max_stack, stats.max_depth);
            println!("{}", print_expr(&expr));

            let lifted = lift(&arena, &expr);
            println!("\n--- Lifted ---\n{}", print_lifted(&lifted));
            println!("{} bytes in arena", arena.allocated_bytes());
        }
        Err(e) => println!("Parse error: {}", e),
    }

    // Errors stop at the first problem
    let broken = "{foo: }";
    let tokens = tokenize(broken);
    if let Err(e) = Parser::new(&arena, &tokens).parse() {
        println!("\n{broken} -> {} ({})", e, e.code());
    }
}
