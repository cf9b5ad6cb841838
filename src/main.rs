//! Binary entry point for the sharpfix CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Report diagnostics for every .cs file under src/
//! sharpfix analyze src/
//!
//! # Preview every available fix for one file (unified diff in the JSON)
//! sharpfix fix src/Composite.cs
//!
//! # Apply one batch of fixes in place
//! sharpfix fix src/Composite.cs --key ACA0003-FixByRemovingMethodComments --write
//!
//! # List rules
//! sharpfix rules
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use sharpfix::cli::{analyze_paths, fix_file, list_rules, FixOptions};
use sharpfix_core::error::{OutputErrorCode, SharpfixError};
use sharpfix_core::output::{emit_response, ErrorResponse};
use sharpfix_csharp::{AnalysisConfig, RuleRegistry};

// ============================================================================
// CLI Structure
// ============================================================================

/// Structural analyzers and compiling code fixes for C#.
///
/// All output is JSON on stdout. Logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "sharpfix", version, about = "Structural analyzers and code fixes for C#")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

/// Global arguments shared by all subcommands.
#[derive(Parser, Debug)]
struct GlobalArgs {
    /// Log level for tracing output. `RUST_LOG` takes precedence when set.
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Run only these rule ids. Can be given multiple times.
    #[arg(long = "rule", global = true, value_name = "ID")]
    rules: Vec<String>,

    /// Never run these rule ids. Can be given multiple times.
    #[arg(long = "disable", global = true, value_name = "ID")]
    disabled: Vec<String>,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Report diagnostics for C# files and directories.
    Analyze {
        /// Files or directories to analyze.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Apply fixes to one file (dry run unless `--write`).
    Fix {
        /// File to fix.
        path: PathBuf,
        /// Apply only fixes with this equivalence key.
        #[arg(long)]
        key: Option<String>,
        /// Write the fixed text back to the file.
        #[arg(long)]
        write: bool,
    },
    /// List registered rules.
    Rules,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.global.log_level, cli.global.log_json);

    match execute(cli) {
        Ok(code) => code,
        Err(err) => {
            let error_code = OutputErrorCode::from(&err);
            let response = ErrorResponse::from_error(&err);

            // Errors go to stdout as JSON like every other response
            let _ = emit_response(&response, &mut io::stdout());
            let _ = io::stdout().flush();

            ExitCode::from(error_code.code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel, json: bool) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Execute the CLI command.
///
/// `analyze` prints its response even when some files fail; the exit code
/// is then the first failed file's error code.
fn execute(cli: Cli) -> Result<ExitCode, SharpfixError> {
    let registry = RuleRegistry::builtin();
    let config = load_config(&cli.global, &registry)?;
    let mut stdout = io::stdout();
    match cli.command {
        Command::Analyze { paths } => {
            let response = analyze_paths(&paths, &registry, &config)?;
            emit_response(&response, &mut stdout)?;
            if let Some(error) = response.files.iter().find_map(|f| f.error.as_ref()) {
                return Ok(ExitCode::from(error.code));
            }
        }
        Command::Fix { path, key, write } => {
            let options = FixOptions {
                equivalence_key: key,
                write,
            };
            let response = fix_file(&path, &registry, &config, &options)?;
            emit_response(&response, &mut stdout)?;
        }
        Command::Rules => {
            emit_response(&list_rules(&registry, &config), &mut stdout)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// The configuration file (if any) merged with `--rule` and `--disable`.
/// Every rule id it mentions must be registered.
fn load_config(global: &GlobalArgs, registry: &RuleRegistry) -> Result<AnalysisConfig, SharpfixError> {
    let base = match &global.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    let config = base.with_cli_rules(global.rules.clone(), global.disabled.clone());
    registry.check_rule_ids(
        config
            .enabled_rules
            .iter()
            .chain(&config.disabled_rules)
            .chain(config.severity_overrides.keys()),
    )?;
    Ok(config)
}

// ============================================================================
// Tests
// ============================================================================
