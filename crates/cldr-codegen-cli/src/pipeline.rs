use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, info_span};
use uuid::Uuid;

use cldr_codegen_generate::{
    CommandFormatter, Formatter, GenerationEngine, GenerationMode, GenerationRequest, NoFormatter,
    PROGRESS_TARGET, WriteReport, run_engine, write_modules,
};
use cldr_codegen_load::{
    DataLayout, LoadError, list_dataset_locales, list_locale_codes, load_dataset,
    load_number_formats, load_supplemental, read_document,
};

use crate::CliError;

/// Fully resolved inputs of one generation run.
pub struct RunPlan {
    pub mode: GenerationMode,
    pub layout: DataLayout,
    pub output_root: PathBuf,
    pub engine: Box<dyn GenerationEngine>,
    pub formatter: Option<CommandFormatter>,
}

/// Load, generate, write. Nothing is written unless loading and generation
/// both succeed.
pub fn run_generate(plan: &RunPlan) -> Result<WriteReport, CliError> {
    let run_id = Uuid::new_v4().to_string();
    let span = info_span!("run", run_id = %run_id, mode = %plan.mode);
    let _guard = span.enter();
    let timer = Instant::now();

    info!(
        event = "run_started",
        engine = plan.engine.name(),
        data_root = %plan.layout.data_root.display(),
        output_root = %plan.output_root.display()
    );

    let request = load_request(plan.mode, &plan.layout)?;
    let modules = run_engine(&*plan.engine, &request)?;

    let formatter: &dyn Formatter = match &plan.formatter {
        Some(formatter) => formatter,
        None => &NoFormatter,
    };
    let report = write_modules(&plan.output_root, &modules, formatter)?;

    if let Some(formatter) = &plan.formatter {
        info!(
            target: PROGRESS_TARGET,
            event = "formatter_pending",
            formatter = formatter.program(),
            "waiting for formatter to finish"
        );
    }

    info!(
        event = "run_finished",
        status = "success",
        modules = report.written.len(),
        bytes_written = report.bytes_written,
        duration_ms = timer.elapsed().as_millis() as u64
    );

    Ok(report)
}

/// Read everything the engine needs for `mode`.
pub fn load_request(
    mode: GenerationMode,
    layout: &DataLayout,
) -> Result<GenerationRequest, LoadError> {
    match mode {
        GenerationMode::Full => Ok(GenerationRequest::Full {
            dataset: load_dataset(layout)?,
            supplemental: load_supplemental(layout)?,
        }),
        GenerationMode::Numbers => Ok(GenerationRequest::NumbersOnly {
            number_formats: load_number_formats(layout)?,
            cardinals: read_document(&layout.plurals_path())?,
            ordinals: read_document(&layout.ordinals_path())?,
        }),
    }
}

/// Locale codes the loader reads in `mode`.
pub fn list_locales(mode: GenerationMode, layout: &DataLayout) -> Result<Vec<String>, LoadError> {
    match mode {
        GenerationMode::Full => list_dataset_locales(layout),
        GenerationMode::Numbers => list_locale_codes(&layout.numbers_root()),
    }
}
