mod logging;
mod pipeline;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use cldr_codegen_generate::{
    CommandFormatter, ElmEngine, GenerationEngine, GenerationFailure, GenerationMode,
    ProcessEngine, WriteError,
};
use cldr_codegen_load::{DataLayout, LoadError};
use logging::init_logging;
use pipeline::{RunPlan, list_locales, run_generate};
use settings::{EngineKind, Settings, SettingsError, load_settings};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("load error: {0}")]
    Load(#[from] LoadError),
    #[error("write error: {0}")]
    Write(#[from] WriteError),
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationFailure),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Parser, Debug)]
#[command(name = "cldr-codegen", version, about = "Generate source modules from CLDR JSON data")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Regenerate every module from the CLDR data.
    Generate(GenerateArgs),
    /// List the locale codes the loader would read.
    Locales(LocalesArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Settings file (defaults to ./cldr-codegen.toml when present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Generation mode: full or numbers.
    #[arg(long, value_name = "MODE")]
    mode: Option<GenerationMode>,
    /// Directory holding the cldr-* packages.
    #[arg(long, value_name = "PATH")]
    data_root: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Output root for generated modules.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
    /// Skip the formatter.
    #[arg(long, default_value_t = false)]
    no_format: bool,
    /// Formatter program, run as `<program> <args..> <file>`.
    #[arg(long, value_name = "PROGRAM")]
    formatter: Option<String>,
    /// Use an external worker process instead of the built-in engine.
    #[arg(long, value_name = "PROGRAM")]
    engine_command: Option<String>,
    /// Also write JSON log records to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct LocalesArgs {
    #[command(flatten)]
    source: SourceArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(args) => generate(args),
        Command::Locales(args) => locales(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Generation(failure)) => {
            for line in failure.lines() {
                println!("{line}");
            }
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn resolve_settings(source: &SourceArgs) -> Result<Settings, CliError> {
    let mut settings = load_settings(source.config.as_deref())?;
    if let Some(mode) = source.mode {
        settings.mode = mode;
    }
    if let Some(data_root) = &source.data_root {
        settings.data_root = data_root.clone();
    }
    Ok(settings)
}

fn generate(args: GenerateArgs) -> Result<(), CliError> {
    init_logging(args.log_file.as_deref()).map_err(CliError::Logging)?;

    let mut settings = resolve_settings(&args.source)?;
    if let Some(out) = args.out {
        settings.output_root = Some(out);
    }
    if args.no_format {
        settings.formatter.enabled = false;
    }
    if let Some(program) = args.formatter {
        settings.formatter.command = program;
    }
    if let Some(program) = args.engine_command {
        settings.engine.kind = EngineKind::Process;
        settings.engine.command = Some(program);
    }

    let plan = RunPlan {
        mode: settings.mode,
        layout: DataLayout::new(&settings.data_root),
        output_root: settings.output_root(),
        engine: build_engine(&settings)?,
        formatter: settings.formatter.enabled.then(|| {
            CommandFormatter::new(
                settings.formatter.command.clone(),
                settings.formatter.args.clone(),
            )
        }),
    };

    run_generate(&plan)?;
    Ok(())
}

fn build_engine(settings: &Settings) -> Result<Box<dyn GenerationEngine>, CliError> {
    match settings.engine.kind {
        EngineKind::Builtin => Ok(Box::new(ElmEngine)),
        EngineKind::Process => {
            let program = settings.engine.command.clone().ok_or_else(|| {
                CliError::InvalidConfig(
                    "engine.kind = \"process\" needs engine.command".to_string(),
                )
            })?;
            Ok(Box::new(ProcessEngine::new(
                program,
                settings.engine.args.clone(),
            )))
        }
    }
}

fn locales(args: LocalesArgs) -> Result<(), CliError> {
    let settings = resolve_settings(&args.source)?;
    let layout = DataLayout::new(&settings.data_root);
    for code in list_locales(settings.mode, &layout)? {
        println!("{code}");
    }
    Ok(())
}
