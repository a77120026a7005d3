use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use getopts_core::{CompiledTable, DefinitionTable, OptionValue, ParseResult};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit status used when the arguments themselves were rejected.
const PARSE_ERROR_STATUS: i32 = 2;

/// Output format for parse results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Table,
}

#[derive(Debug, Parser)]
#[command(name = "getopts")]
#[command(about = "Parse command-line arguments against a declarative option table")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse arguments and print every option's value.
    Parse(ParseArgs),
    /// Compile the option table and report its spellings.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct DefinitionArgs {
    /// JSON or YAML file mapping option ids to definitions.
    #[arg(long)]
    defs: Option<PathBuf>,
    /// Inline definition in compact form, e.g. `verbose="C v verbose"`.
    #[arg(long = "define", value_name = "ID=SPEC")]
    defines: Vec<String>,
}

#[derive(Debug, Args)]
struct ParseArgs {
    #[command(flatten)]
    definitions: DefinitionArgs,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Arguments to parse. Put them after `--` when they start with a dash.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    #[command(flatten)]
    definitions: DefinitionArgs,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Check(args) => run_check(args),
    };

    match result {
        Ok(status) => std::process::exit(status),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GETOPTS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn run_parse(args: ParseArgs) -> Result<i32, String> {
    let table = compile_definitions(&args.definitions)?;
    let result = table.parse(args.args);

    let output = format_result(&result, args.format)?;
    print!("{output}");

    if let Some(errors) = result.error_messages() {
        for message in errors {
            eprintln!("{message}");
        }
        return Ok(PARSE_ERROR_STATUS);
    }
    Ok(0)
}

fn run_check(args: CheckArgs) -> Result<i32, String> {
    let table = compile_definitions(&args.definitions)?;
    println!("{} option(s)", table.len());
    for (id, kind) in table.options() {
        let spellings: Vec<String> = table.spellings(id).iter().map(ToString::to_string).collect();
        println!("  {id:<16} {:<4} {}", kind.tag(), spellings.join(", "));
    }
    Ok(0)
}

/// Loads `--defs`, applies `--define` overrides, and compiles the result.
fn compile_definitions(args: &DefinitionArgs) -> Result<CompiledTable, String> {
    let mut definitions = match &args.defs {
        Some(path) => load_definitions(path)?,
        None => DefinitionTable::new(),
    };
    definitions.extend(parse_defines(&args.defines)?);

    if definitions.is_empty() {
        return Err("no option definitions given (use --defs or --define)".to_string());
    }

    CompiledTable::compile(&definitions).map_err(|err| err.to_string())
}

fn load_definitions(path: &Path) -> Result<DefinitionTable, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    debug!(path = %path.display(), json = is_json, "Loading definitions");

    if is_json {
        serde_json::from_str(&raw)
            .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))
    } else {
        serde_yaml::from_str(&raw)
            .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))
    }
}

fn parse_defines(defines: &[String]) -> Result<DefinitionTable, String> {
    let mut table = DefinitionTable::new();
    for define in defines {
        let Some((id, spec)) = define.split_once('=') else {
            return Err(format!("Invalid --define '{define}' (expected ID=SPEC)"));
        };
        let id = id.trim();
        if id.is_empty() {
            return Err(format!("Invalid --define '{define}' (empty option id)"));
        }
        table = table.compact(id, spec).map_err(|err| err.to_string())?;
    }
    Ok(table)
}

/// Formats a parse result in the requested output format.
fn format_result(result: &ParseResult, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(result)
            .map(|json| format!("{json}\n"))
            .map_err(|e| format!("JSON serialization failed: {e}")),
        CliOutputFormat::Yaml => {
            serde_yaml::to_string(result).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        CliOutputFormat::Table => Ok(result_to_table(result)),
    }
}

fn result_to_table(result: &ParseResult) -> String {
    let width = result.values().keys().map(String::len).max().unwrap_or(0);
    let mut out = String::new();
    for (id, value) in result.values() {
        out.push_str(&format!("{id:<width$}  {}\n", render_value(value)));
    }
    if !result.positionals().is_empty() {
        out.push_str(&format!("--  {}\n", result.positionals().join(" ")));
    }
    out
}

fn render_value(value: &OptionValue) -> String {
    match value {
        OptionValue::Bool(b) => b.to_string(),
        OptionValue::Count(n) => n.to_string(),
        OptionValue::Str(s) => s.clone(),
        OptionValue::List(items) => {
            let items: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", items.join(", "))
        }
        OptionValue::Map(map) => {
            let pairs: Vec<String> = map.iter().map(|(k, v)| format!("{k}={v}")).collect();
            format!("{{{}}}", pairs.join(", "))
        }
    }
}
