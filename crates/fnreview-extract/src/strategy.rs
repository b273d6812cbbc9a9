use fnreview_config::{ExtractionConfig, StrategyKind};
use fnreview_model::{Document, ExtractionFailure, FunctionRecord};

use crate::phrase::PhraseExtractor;
use crate::rule::RuleExtractor;
use crate::table::TableExtractor;

/// One way of turning a document into function records.
///
/// An empty `Ok` means the strategy ran but found nothing; `Err` means it
/// could not run on this input. The orchestrator treats both as "try the
/// next strategy".
pub trait Strategy {
    fn kind(&self) -> StrategyKind;

    fn extract(&self, document: &Document) -> Result<Vec<FunctionRecord>, ExtractionFailure>;
}

/// Builds the extractor for `kind`.
pub fn build_strategy<'a>(
    kind: StrategyKind,
    config: &'a ExtractionConfig,
) -> Box<dyn Strategy + 'a> {
    match kind {
        StrategyKind::Table => Box::new(TableExtractor::new(config)),
        StrategyKind::Rule => Box::new(RuleExtractor::new(config)),
        StrategyKind::Phrase => Box::new(PhraseExtractor::new(config)),
    }
}
