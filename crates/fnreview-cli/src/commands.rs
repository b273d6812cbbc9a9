use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use fnreview_config::{ExtractionConfig, load_config};
use fnreview_extract::{ExtractionOrchestrator, ExtractionOutcome};
use fnreview_reconcile::{ReconciliationEngine, ReconciliationReport};
use fnreview_cli::pipeline::{load_input_document, load_review_inputs, resolve_config};

use crate::cli::{CheckConfigArgs, ExtractArgs, ModeArg, OutputFormatArg, ReconcileArgs};
use crate::summary::{apply_table_style, print_extraction, print_report};

pub fn run_extract(args: &ExtractArgs) -> Result<ExtractionOutcome> {
    let span = info_span!("extract_command", document = %args.document.display());
    let _guard = span.enter();

    let config = resolve_config(
        args.config.as_deref(),
        args.mode.map(ModeArg::config_name),
        &args.order,
    )?;
    let document = load_input_document(&args.document, args.text.as_deref())?;
    let outcome = ExtractionOrchestrator::new(&config).run(&document);

    match args.format {
        OutputFormatArg::Table => print_extraction(&outcome),
        OutputFormatArg::Json => {
            let json = serde_json::to_string_pretty(&outcome).context("serialize records")?;
            println!("{json}");
        }
    }
    Ok(outcome)
}

pub fn run_reconcile(args: &ReconcileArgs) -> Result<ReconciliationReport> {
    let span = info_span!("reconcile_command", inputs = %args.inputs.display());
    let _guard = span.enter();

    let mut options = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("load {}", path.display()))?
            .review,
        None => ExtractionConfig::default().review,
    };
    if args.flag_subquestions {
        options.flag_subquestion_availability = true;
    }
    let inputs = load_review_inputs(&args.inputs)?;
    let report = ReconciliationEngine::new(options).reconcile(&inputs);

    match args.format {
        OutputFormatArg::Table => print_report(&report),
        OutputFormatArg::Json => {
            let json = serde_json::to_string_pretty(&report).context("serialize report")?;
            println!("{json}");
        }
    }
    Ok(report)
}

pub fn run_check_config(args: &CheckConfigArgs) -> Result<()> {
    let config = load_config(&args.config)
        .with_context(|| format!("load {}", args.config.display()))?;
    info!(path = %args.config.display(), "configuration is valid");

    let mut table = Table::new();
    table.set_header(vec!["Setting", "Value"]);
    apply_table_style(&mut table);
    let sub_questions: usize = config.functions.iter().map(|f| f.subquestions.len()).sum();
    table.add_row(vec!["Mode".to_string(), config.mode.to_string()]);
    table.add_row(vec!["Functions".to_string(), config.functions.len().to_string()]);
    table.add_row(vec!["Sub-questions".to_string(), sub_questions.to_string()]);
    table.add_row(vec!["Rules".to_string(), config.rules().len().to_string()]);
    table.add_row(vec!["Phrase fields".to_string(), config.phrases.len().to_string()]);
    table.add_row(vec![
        "Boilerplate cells".to_string(),
        config.boilerplate.len().to_string(),
    ]);
    table.add_row(vec![
        "Flag sub-question availability".to_string(),
        config.review.flag_subquestion_availability.to_string(),
    ]);
    println!("{table}");
    Ok(())
}

pub fn run_default_config() -> Result<()> {
    let text = ExtractionConfig::default()
        .to_toml_string()
        .context("serialize default configuration")?;
    print!("{text}");
    Ok(())
}
