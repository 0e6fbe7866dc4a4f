//! Dementia Test Advisor - command line entry point
//!
//! Wraps the risk evaluator with:
//! - Argument parsing and test-name aliases
//! - JSON / Markdown / summary / prose rendering
//! - Structured logging to stderr
//! - Stable exit codes

use clap::{Args, Parser, Subcommand};
use dta_common::error::{format_error_human, AssessmentError, NumericField, StructuredError};
use dta_common::{Error, OutputFormat, Result, SCHEMA_VERSION};
use dta_core::baseline::{age_band, AGE_BANDS};
use dta_core::catalog::{catalog, find_test_fuzzy};
use dta_core::evaluator::{evaluate, evaluate_all, parse_age, AssessmentInput, AssessmentResult};
use dta_core::exit_codes::ExitCode;
use dta_core::logging::{event_names, generate_run_id, init_logging, LogConfig, LogFormat, LogLevel};
use dta_core::report::{
    render_md, render_prose, render_summary, AssessmentReport, ComparisonReport, Envelope,
    ErrorReport,
};
use dta_core::schema::{available_schemas, generate_schema};
use serde::Serialize;
use std::io::{IsTerminal, Write};

/// Dementia Test Advisor - likelihood-ratio based diagnostic test recommendations
#[derive(Parser)]
#[command(name = "dta")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, env = "DTA_FORMAT", default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one diagnostic test for a patient
    Assess(AssessArgs),

    /// Evaluate every catalog test for a patient
    Compare(CompareArgs),

    /// List the diagnostic test catalog
    Tests,

    /// Show the age-based baseline risk
    Baseline(BaselineArgs),

    /// Print JSON schemas for output types
    Schema(SchemaArgs),

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
struct AssessArgs {
    /// Clinician's pre-test probability estimate, in percent
    #[arg(long, short = 'p', allow_hyphen_values = true)]
    probability: Option<String>,

    /// Patient age in years
    #[arg(long, short = 'a', allow_hyphen_values = true)]
    age: Option<String>,

    /// Test name or alias (see 'dta tests')
    #[arg(long, short = 't')]
    test: Option<String>,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Clinician's pre-test probability estimate, in percent
    #[arg(long, short = 'p', allow_hyphen_values = true)]
    probability: Option<String>,

    /// Patient age in years
    #[arg(long, short = 'a', allow_hyphen_values = true)]
    age: Option<String>,
}

#[derive(Args, Debug)]
struct BaselineArgs {
    /// Patient age in years
    #[arg(long, short = 'a', allow_hyphen_values = true)]
    age: String,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Type name to print the schema for
    type_name: Option<String>,

    /// List available schema types
    #[arg(long)]
    list: bool,
}

/// Per-invocation context shared by command handlers.
struct RunContext<'a> {
    global: &'a GlobalOpts,
    run_id: String,
    command: &'static str,
}

impl RunContext<'_> {
    fn envelope(&self) -> Envelope {
        Envelope::new(&self.run_id, self.command)
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };

    // Machine-readable stdout gets machine-readable stderr unless the
    // environment asks otherwise.
    let log_format = if std::env::var_os("DTA_LOG_FORMAT").is_some() {
        None
    } else if cli.global.format == OutputFormat::Json {
        Some(LogFormat::Jsonl)
    } else {
        Some(LogFormat::Human)
    };

    init_logging(&LogConfig::from_env(log_level, log_format));

    let command = match &cli.command {
        Commands::Assess(_) => "assess",
        Commands::Compare(_) => "compare",
        Commands::Tests => "tests",
        Commands::Baseline(_) => "baseline",
        Commands::Schema(_) => "schema",
        Commands::Version => "version",
    };
    let ctx = RunContext {
        global: &cli.global,
        run_id: generate_run_id(),
        command,
    };
    tracing::info!(target: event_names::CLI_STARTED, run_id = %ctx.run_id, command, "dta started");

    let outcome = match &cli.command {
        Commands::Assess(args) => run_assess(&ctx, args),
        Commands::Compare(args) => run_compare(&ctx, args),
        Commands::Tests => run_tests(&ctx),
        Commands::Baseline(args) => run_baseline(&ctx, args),
        Commands::Schema(args) => run_schema(&ctx, args),
        Commands::Version => print_version(&ctx),
    };

    let exit_code = match outcome {
        Ok(code) => code,
        Err(err) => report_error(&ctx, &err),
    };

    tracing::info!(
        target: event_names::CLI_FINISHED,
        run_id = %ctx.run_id,
        exit_code = exit_code.as_i32(),
        "dta finished"
    );
    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Output helpers
// ============================================================================

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

fn write_json<T: Serialize>(value: &T) -> Result<()> {
    write_stdout(&serde_json::to_string_pretty(value)?)
}

fn use_color(global: &GlobalOpts) -> bool {
    !global.no_color && std::io::stderr().is_terminal()
}

fn report_error(ctx: &RunContext<'_>, err: &Error) -> ExitCode {
    let code = ExitCode::for_error(err);
    match ctx.global.format {
        OutputFormat::Json => {
            let report = ErrorReport {
                envelope: ctx.envelope(),
                error: StructuredError::from(err),
            };
            if let Err(write_err) = write_json(&report) {
                tracing::error!(
                    target: event_names::OUTPUT_WRITE_FAILED,
                    error = %write_err,
                    "failed to write error payload"
                );
            }
        }
        OutputFormat::Exitcode => {}
        _ => eprintln!("{}", format_error_human(err, use_color(ctx.global))),
    }
    code
}

/// Resolve a CLI test argument to its exact catalog name.
///
/// Unknown names pass through unchanged so the evaluator reports them.
fn resolve_test_name(raw: Option<&str>) -> String {
    let raw = raw.unwrap_or_default();
    find_test_fuzzy(raw)
        .map(|t| t.name.to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn verdict_exit(recommended: bool) -> ExitCode {
    if recommended {
        ExitCode::Clean
    } else {
        ExitCode::NotRecommended
    }
}

// ============================================================================
// Commands
// ============================================================================

fn run_assess(ctx: &RunContext<'_>, args: &AssessArgs) -> Result<ExitCode> {
    let input = AssessmentInput::new(
        args.probability.clone().unwrap_or_default(),
        args.age.clone().unwrap_or_default(),
        resolve_test_name(args.test.as_deref()),
    );
    let result = evaluate(&input)?;
    let exit = verdict_exit(result.recommended);

    match ctx.global.format {
        OutputFormat::Json => write_json(&AssessmentReport::new(ctx.envelope(), result))?,
        OutputFormat::Md => write_stdout(&render_md(&result))?,
        OutputFormat::Summary => write_stdout(&render_summary(&result))?,
        OutputFormat::Prose => write_stdout(&render_prose(&result))?,
        OutputFormat::Exitcode => {}
    }
    Ok(exit)
}

fn run_compare(ctx: &RunContext<'_>, args: &CompareArgs) -> Result<ExitCode> {
    let results = evaluate_all(
        args.probability.as_deref().unwrap_or_default(),
        args.age.as_deref().unwrap_or_default(),
    )?;
    let exit = verdict_exit(results.iter().any(|r| r.recommended));

    let join = |render: fn(&AssessmentResult) -> String, sep: &str| {
        results.iter().map(render).collect::<Vec<_>>().join(sep)
    };
    match ctx.global.format {
        OutputFormat::Json => write_json(&ComparisonReport::new(ctx.envelope(), results.clone()))?,
        OutputFormat::Md => write_stdout(&join(render_md, "\n"))?,
        OutputFormat::Summary => write_stdout(&join(render_summary, "\n"))?,
        OutputFormat::Prose => write_stdout(&join(render_prose, "\n"))?,
        OutputFormat::Exitcode => {}
    }
    Ok(exit)
}

fn run_tests(ctx: &RunContext<'_>) -> Result<ExitCode> {
    match ctx.global.format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "run_id": ctx.run_id,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "command": ctx.command,
                "tests": catalog(),
            });
            write_json(&payload)?;
        }
        OutputFormat::Md => {
            let mut out = String::from(
                "| Test | Alias | LR+ | LR- | Threshold |\n|---|---|---|---|---|\n",
            );
            for t in catalog() {
                out.push_str(&format!(
                    "| {} | {} | {} | {} | {}% |\n",
                    t.name, t.alias, t.positive_lr, t.negative_lr, t.threshold_percent
                ));
            }
            write_stdout(&out)?;
        }
        OutputFormat::Summary | OutputFormat::Prose => {
            let lines: Vec<String> = catalog()
                .iter()
                .map(|t| format!("{:<12} {}", t.alias, t.name))
                .collect();
            write_stdout(&lines.join("\n"))?;
        }
        OutputFormat::Exitcode => {}
    }
    Ok(ExitCode::Clean)
}

fn run_baseline(ctx: &RunContext<'_>, args: &BaselineArgs) -> Result<ExitCode> {
    let age = parse_age(&args.age).ok_or(AssessmentError::InvalidNumericInput {
        field: NumericField::PatientAge,
    })?;
    let band = age_band(age);

    match ctx.global.format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "run_id": ctx.run_id,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "command": ctx.command,
                "age": age,
                "band": band.label(),
                "baseline_risk_percent": band.baseline_percent,
                "bands": AGE_BANDS
                    .iter()
                    .map(|b| serde_json::json!({"band": b.label(), "baseline_risk_percent": b.baseline_percent}))
                    .collect::<Vec<_>>(),
            });
            write_json(&payload)?;
        }
        OutputFormat::Exitcode => {}
        _ => write_stdout(&format!(
            "Age {} (band {}): baseline risk {:.1}%",
            age,
            band.label(),
            band.baseline_percent
        ))?,
    }
    Ok(ExitCode::Clean)
}

fn run_schema(ctx: &RunContext<'_>, args: &SchemaArgs) -> Result<ExitCode> {
    if args.list || args.type_name.is_none() {
        let schemas = available_schemas();
        match ctx.global.format {
            OutputFormat::Json => {
                let list: Vec<_> = schemas
                    .iter()
                    .map(|(name, desc)| serde_json::json!({"name": name, "description": desc}))
                    .collect();
                write_json(&list)?;
            }
            OutputFormat::Exitcode => {}
            _ => {
                let lines: Vec<String> = schemas
                    .iter()
                    .map(|(name, desc)| format!("{:<24} {}", name, desc))
                    .collect();
                write_stdout(&lines.join("\n"))?;
            }
        }
        return Ok(ExitCode::Clean);
    }

    let name = args.type_name.as_deref().unwrap_or_default();
    let schema = generate_schema(name).ok_or_else(|| Error::UnknownSchema(name.to_string()))?;
    if ctx.global.format != OutputFormat::Exitcode {
        write_json(&schema)?;
    }
    Ok(ExitCode::Clean)
}

fn print_version(ctx: &RunContext<'_>) -> Result<ExitCode> {
    match ctx.global.format {
        OutputFormat::Json => {
            let version_info = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "dta_version": env!("CARGO_PKG_VERSION"),
                "rust_version": env!("CARGO_PKG_RUST_VERSION"),
            });
            write_json(&version_info)?;
        }
        OutputFormat::Exitcode => {}
        _ => write_stdout(&format!(
            "dta {}\nschema version: {}",
            env!("CARGO_PKG_VERSION"),
            SCHEMA_VERSION
        ))?,
    }
    Ok(ExitCode::Clean)
}
