use std::io::{BufRead, IsTerminal, Write};

use clap::{Parser, ValueEnum};
use graft::{BasicCastPatcher, Engine, EngineOptions, Pipeline, UnpackPatcher, render_error};
use miette::{IntoDiagnostic, Result};

/// graft - evaluate expressions after rewriting named-type values
#[derive(Parser, Debug)]
#[command(name = "graft")]
#[command(about = "Evaluate expressions against the demo environment", long_about = None)]
struct Args {
    /// Rewrite rule applied before evaluation
    #[arg(long, value_enum, default_value_t = Rule::Unpack)]
    rule: Rule,

    /// Print the rewritten expression before its value
    #[arg(long)]
    show_rewritten: bool,

    /// Print the typed tree (for debugging)
    #[arg(long)]
    debug_tree: bool,

    /// Expression to evaluate (if not provided, reads from stdin)
    expression: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Rule {
    /// Wrap named values in `unpack(...)`
    Unpack,
    /// Convert named values with `int`, `float` or `string`
    Cast,
    /// Leave the tree as written
    None,
}

impl Rule {
    fn pipeline(self) -> Pipeline {
        match self {
            Rule::Unpack => Pipeline::new().with(UnpackPatcher),
            Rule::Cast => Pipeline::new().with(BasicCastPatcher),
            Rule::None => Pipeline::new(),
        }
    }
}

fn interpret_input(engine: &Engine, args: &Args, input: &str) {
    let expr = match engine.compile(input, &mut args.rule.pipeline()) {
        Ok(expr) => expr,
        Err(e) => {
            render_error(&e);
            return;
        }
    };

    if args.debug_tree {
        println!("=== Typed Tree ===");
        println!("{:#?}", expr.root());
        println!();
    }
    if args.show_rewritten {
        println!("{}", expr.root());
    }

    match expr.run() {
        Ok(value) => println!("{}", value),
        Err(e) => render_error(&e),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    use tracing_subscriber::{EnvFilter, fmt};

    // RUST_LOG controls the level; rewrites are logged at trace.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .into_diagnostic()?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let engine = Engine::new(EngineOptions::default(), graft::demo::register)
        .map_err(|e| miette::miette!("failed to build the demo environment: {}", e))?;
    tracing::debug!(rule = ?args.rule, "engine ready");

    if let Some(expr) = &args.expression {
        interpret_input(&engine, &args, expr);
        return Ok(());
    }

    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        println!("graft - type expressions to evaluate (Ctrl+D to exit)");
    }

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("> ");
            std::io::stdout().flush().into_diagnostic()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.into_diagnostic()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        interpret_input(&engine, &args, line);
    }

    Ok(())
}
