// typedef: scan and parse a TypeDef schema, then summarize its definitions

use std::fs;
use std::path::Path;
use std::process;

use log::{debug, info};

use typedef::parser::ast::Definition;
use typedef::parser::lexer::{locate, Scanner, ScannerConfig};
use typedef::{Ast, ParseError, TokenSequence};

struct Options {
    path: String,
    dump_tokens: bool,
    config: ScannerConfig,
}

fn usage(program_name: &str) -> ! {
    eprintln!("Usage: {} <file> [--tokens] [--max-word-len N]", program_name);
    eprintln!();
    eprintln!("  --tokens           Log every token with its byte offset");
    eprintln!("  --max-word-len N   Warn about identifiers longer than N characters");
    eprintln!();
    eprintln!("Set RUST_LOG=debug to trace definitions as they are registered.");
    process::exit(1);
}

fn parse_args(args: &[String]) -> Options {
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("typedef");
    let mut path = None;
    let mut dump_tokens = false;
    let mut config = ScannerConfig::default();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--tokens" => dump_tokens = true,
            "--max-word-len" => match iter.next().and_then(|n| n.parse().ok()) {
                Some(n) => config.max_word_len = Some(n),
                None => {
                    eprintln!("Error: --max-word-len expects a number");
                    usage(program_name);
                }
            },
            "-h" | "--help" => usage(program_name),
            _ if path.is_none() => path = Some(arg.clone()),
            _ => {
                eprintln!("Error: Unexpected argument '{}'", arg);
                usage(program_name);
            }
        }
    }

    let Some(path) = path else {
        eprintln!("Error: No input file provided");
        eprintln!();
        usage(program_name);
    };

    Options {
        path,
        dump_tokens,
        config,
    }
}

/// Print a diagnostic as `file:line:column: error: message`.
fn report(path: &str, source: &str, err: &ParseError<'_>) {
    match err.token.and_then(|token| locate(source, &token)) {
        Some(location) => eprintln!("{}:{}: {}: {}", path, location, err.kind, err),
        None => eprintln!("{}: {}: {}", path, err.kind, err),
    }
}

fn print_definition(definition: &Definition<'_>) {
    match definition {
        Definition::Enum(def) => {
            let members: Vec<_> = def.members().iter().map(|m| m.text).collect();
            println!("enum {} {{ {} }}", def.name.text, members.join(", "));
        }
        Definition::Type(def) => {
            match def.parent {
                Some(parent) => println!("type {} : {} {{", def.name.text, parent.text),
                None => println!("type {} {{", def.name.text),
            }
            for field in def.fields() {
                let array = if field.is_array { "[]" } else { "" };
                match &field.default {
                    Some(value) => println!(
                        "    {} {}{} = {}",
                        field.type_name.text, field.name.text, array, value
                    ),
                    None => println!("    {} {}{}", field.type_name.text, field.name.text, array),
                }
            }
            println!("}}");
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    if !Path::new(&options.path).exists() {
        eprintln!("Error: File '{}' not found", options.path);
        process::exit(1);
    }

    let source = fs::read_to_string(&options.path)?;

    // Scan everything up front; the parser works over the finished slice
    let mut scanner = Scanner::with_config(&source, options.config);
    let tokens = match scanner.tokenize() {
        Ok(tokens) => tokens,
        Err(err) => {
            report(&options.path, &source, &err.into());
            process::exit(1);
        }
    };

    if options.dump_tokens {
        for token in &tokens {
            let offset = scanner.token_offset(token).unwrap_or_default();
            info!("{:>6} {:<16} {}", offset, token.kind.name(), token.text);
        }
    }

    let stats = scanner.comment_stats();
    debug!(
        "{} tokens, {} line comments, {} block comments",
        tokens.len(),
        stats.line_comments,
        stats.block_comments
    );

    let mut ast = Ast::new();
    let mut sequence = TokenSequence::new(&tokens);
    loop {
        match ast.parse_next(&mut sequence) {
            Ok(Some(name)) => info!("ast added {}", name),
            Ok(None) => break,
            Err(err) => {
                report(&options.path, &source, &err);
                process::exit(1);
            }
        }
    }

    for definition in ast.definitions() {
        print_definition(definition);
    }
    info!(
        "{}: {} definitions, {} warnings",
        options.path,
        ast.len(),
        scanner.warnings().len()
    );

    Ok(())
}
