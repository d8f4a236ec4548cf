use kanal::AsyncSender;
use qamus_core::{DefaultPreprocessor, Preprocessor};
use qamus_types::{AppEvent, SearchOutcome};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub async fn handle_text_input(
    text: String,
    generation: u64,
    state: &AppState,
    cancel: CancellationToken,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let query = DefaultPreprocessor.process(&text);
    tracing::debug!("Normalized: '{}'", query);

    let outcome = tokio::select! {
        _ = cancel.cancelled() => {
            tracing::debug!("Query '{}' superseded, abandoning provider calls", query);
            return Ok(());
        }
        outcome = state.aggregator.search(&query) => outcome,
    };

    if !state.is_current(generation) {
        tracing::debug!("Discarding stale results for '{}'", query);
        return Ok(());
    }

    app_to_ui_tx.send(outcome_event(query, outcome)).await?;

    Ok(())
}

/// Presenter event for a finished search
pub fn outcome_event(query: String, outcome: SearchOutcome) -> AppEvent {
    match outcome {
        SearchOutcome::EmptyQuery => AppEvent::ShowWelcome,
        SearchOutcome::Results(results) if results.is_empty() => AppEvent::NoResults { query },
        SearchOutcome::Results(results) => {
            tracing::debug!("Sending {} results", results.len());
            AppEvent::ShowResults { query, results }
        }
    }
}
