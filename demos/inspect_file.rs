use std::env;
use std::process::exit;

use chisel_inspect::inspector::{Inspector, InspectorOptions, ViewMode};
use chisel_inspect::parser::Parser;

/// Load a JSON payload from disk and print it through one of the views.
///
/// Usage: inspect_file <file> [tree|table|raw] [path to expand]...
fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: inspect_file <file> [tree|table|raw] [path]...");
        exit(2);
    }
    let mode = match args.get(1).map(|m| m.parse::<ViewMode>()) {
        Some(Ok(mode)) => mode,
        Some(Err(err)) => {
            eprintln!("{}", err);
            exit(2);
        }
        None => ViewMode::Tree,
    };

    let value = match Parser::default().parse_file(&args[0]) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("failed to load {}: {}", args[0], err);
            exit(1);
        }
    };

    let mut inspector = Inspector::new(InspectorOptions::default());
    inspector.load(value);
    inspector.set_mode(mode);
    args.iter().skip(2).for_each(|path| inspector.expand(path));

    print!("{}", inspector.render());
    println!("({})", inspector.size_summary());
    if let Some(next) = inspector.page_links(None).next() {
        println!("next page: {}", next);
    }
}
