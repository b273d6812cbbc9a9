//! Strategy selection and fallback.

use fnreview_config::{ExtractionConfig, ExtractionMode, StrategyKind};
use fnreview_model::{Document, ExtractionFailure, FunctionRecord};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use crate::strategy::{Strategy, build_strategy};

/// Result of one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ExtractionOutcome {
    pub records: Vec<FunctionRecord>,
    /// Strategy that produced `records`, `None` when every strategy came up empty.
    pub strategy: Option<StrategyKind>,
    /// Strategies that could not run, in the order they were tried.
    #[serde(skip)]
    pub failures: Vec<(StrategyKind, ExtractionFailure)>,
}

impl ExtractionOutcome {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Runs the strategies of the configured mode in order.
///
/// In `auto` mode the first strategy that returns at least one record wins
/// and later strategies are not run. Single-strategy modes never fall back.
pub struct ExtractionOrchestrator<'a> {
    mode: ExtractionMode,
    strategies: Vec<Box<dyn Strategy + 'a>>,
}

impl<'a> ExtractionOrchestrator<'a> {
    pub fn new(config: &'a ExtractionConfig) -> Self {
        let mode = config.mode.clone();
        let strategies = mode
            .strategies()
            .into_iter()
            .map(|kind| build_strategy(kind, config))
            .collect();
        Self { mode, strategies }
    }

    /// Uses the given strategies instead of those named by the mode.
    pub fn with_strategies(mode: ExtractionMode, strategies: Vec<Box<dyn Strategy + 'a>>) -> Self {
        Self { mode, strategies }
    }

    pub fn mode(&self) -> &ExtractionMode {
        &self.mode
    }

    pub fn run(&self, document: &Document) -> ExtractionOutcome {
        let span = info_span!("extract", mode = %self.mode);
        let _guard = span.enter();

        let mut outcome = ExtractionOutcome::default();
        let strategies = if self.mode.falls_back() {
            &self.strategies[..]
        } else {
            &self.strategies[..self.strategies.len().min(1)]
        };

        for strategy in strategies {
            let kind = strategy.kind();
            match strategy.extract(document) {
                Ok(records) if !records.is_empty() => {
                    info!(strategy = %kind, records = records.len(), "extraction succeeded");
                    outcome.records = records;
                    outcome.strategy = Some(kind);
                    return outcome;
                }
                Ok(_) => debug!(strategy = %kind, "strategy found no functions"),
                Err(failure @ ExtractionFailure::MissingInput { .. }) => {
                    debug!(strategy = %kind, reason = %failure, "strategy not applicable");
                    outcome.failures.push((kind, failure));
                }
                Err(failure) => {
                    warn!(strategy = %kind, error = %failure, "strategy failed");
                    outcome.failures.push((kind, failure));
                }
            }
        }

        info!("no strategy produced records");
        outcome
    }
}

/// Extracts function records from `document` using `config.mode`.
pub fn extract(document: &Document, config: &ExtractionConfig) -> ExtractionOutcome {
    ExtractionOrchestrator::new(config).run(document)
}
