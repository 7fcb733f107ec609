use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "animexpr", version)]
struct Cli {
    /// Log compiler and evaluator activity to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile an expression and report the first error.
    Check(SourceArgs),
    /// Print the token stream of an expression.
    Tokens(ExprArgs),
    /// Print the parsed tree.
    Ast(SourceArgs),
    /// Evaluate a single expression and print its number and boolean views.
    Eval(EvalArgs),
    /// Run an asset against a recording host and print the trace as JSON.
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Input asset JSON.
    #[arg(long = "in", conflicts_with = "expr", required_unless_present = "expr")]
    in_path: Option<PathBuf>,

    /// Expression source.
    #[arg(long)]
    expr: Option<String>,
}

#[derive(Args, Debug)]
struct ExprArgs {
    /// Expression source.
    #[arg(long)]
    expr: String,
}

#[derive(Args, Debug)]
struct EvalArgs {
    /// Expression source.
    #[arg(long)]
    expr: String,

    /// Variable binding, `name=value`. May be repeated.
    #[arg(long = "var", value_parser = parse_binding)]
    vars: Vec<(String, f64)>,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Input asset JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Complete every playing tween after evaluation, running `Then` bodies.
    #[arg(long)]
    complete: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Tokens(args) => cmd_tokens(args),
        Command::Ast(args) => cmd_ast(args),
        Command::Eval(args) => cmd_eval(args),
        Command::Run(args) => cmd_run(args),
    }
}

fn parse_binding(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{s}'"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value for '{name}': {e}"))?;
    Ok((name.trim().to_string(), value))
}

fn read_asset_json(path: &Path) -> anyhow::Result<animexpr::AnimationExpression> {
    let f = File::open(path).with_context(|| format!("open asset '{}'", path.display()))?;
    let r = BufReader::new(f);
    let asset: animexpr::AnimationExpression =
        serde_json::from_reader(r).with_context(|| "parse asset JSON")?;
    Ok(asset)
}

fn load_source(args: SourceArgs) -> anyhow::Result<String> {
    match (args.in_path, args.expr) {
        (Some(path), _) => {
            let asset = read_asset_json(&path)?;
            asset.validate()?;
            Ok(asset.expression)
        }
        (None, Some(expr)) => Ok(expr),
        (None, None) => anyhow::bail!("one of --in or --expr is required"),
    }
}

fn cmd_check(args: SourceArgs) -> anyhow::Result<()> {
    let src = load_source(args)?;
    animexpr::parse_program(&src)?;
    eprintln!("ok");
    Ok(())
}

fn cmd_tokens(args: ExprArgs) -> anyhow::Result<()> {
    for tok in animexpr::Scanner::new(&args.expr) {
        println!("{}", tok?);
    }
    Ok(())
}

fn cmd_ast(args: SourceArgs) -> anyhow::Result<()> {
    let src = load_source(args)?;
    let program = animexpr::parse_program(&src)?;
    println!("{program:#?}");
    Ok(())
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let expr = animexpr::parse_expression(&args.expr)?;
    let ctx = args
        .vars
        .into_iter()
        .fold(animexpr::RecordingContext::new(), |ctx, (name, value)| {
            ctx.with_variable(name, value)
        });
    println!("number: {}", expr.evaluate_as_number(&ctx));
    println!("bool:   {}", expr.evaluate_as_bool(&ctx));
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let asset = read_asset_json(&args.in_path)?;
    let ctx = animexpr::RecordingContext::new();
    asset
        .run(&ctx)
        .with_context(|| format!("run '{}'", args.in_path.display()))?;

    if args.complete {
        let n = ctx.complete_all()?;
        eprintln!("completed {n} tweens");
    }

    let trace = ctx.trace();
    ctx.discard_pending();
    println!("{}", serde_json::to_string_pretty(&trace)?);
    Ok(())
}
