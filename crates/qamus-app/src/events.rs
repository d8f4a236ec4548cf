use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use qamus_types::AppEvent;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod text_input;

use text_input::handle_text_input;

/// Query currently being answered
struct InFlight {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl InFlight {
    async fn finish(self) {
        if let Err(e) = self.handle.await {
            tracing::error!("Query task panicked: {e}");
        }
    }
}

fn spawn_query(
    text: String,
    state: &Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    cancel: &CancellationToken,
) -> InFlight {
    let generation = state.begin_query();
    let query_cancel = cancel.child_token();
    let task_state = Arc::clone(state);
    let tx = app_to_ui_tx.clone();
    let task_cancel = query_cancel.clone();

    let handle = tokio::spawn(async move {
        if let Err(e) = handle_text_input(text, generation, &task_state, task_cancel, &tx).await {
            tracing::error!("Failed to answer query: {e}");
        }
    });

    InFlight {
        cancel: query_cancel,
        handle,
    }
}

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    let mut in_flight: Option<InFlight> = None;

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = input_rx.recv() => event?,
        };

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );

        match event {
            AppEvent::TextInput(text) => {
                // A newer query supersedes whatever is still running
                if let Some(previous) = in_flight.take() {
                    previous.cancel.cancel();
                }
                in_flight = Some(spawn_query(text, &state, &app_to_ui_tx, &cancel));
            }
            AppEvent::RawTextInput { text, source } => {
                // Batch queries are all answered, in order
                if let Some(previous) = in_flight.take() {
                    previous.finish().await;
                }
                tracing::debug!("[EVENT_LOOP] {:?} query: {}", source, text);
                in_flight = Some(spawn_query(text, &state, &app_to_ui_tx, &cancel));
            }
            AppEvent::Shutdown => {
                // Let the last query finish before the presenter stops
                if let Some(last) = in_flight.take() {
                    last.finish().await;
                }
                let _ = app_to_ui_tx.send(AppEvent::Shutdown).await;
                break;
            }
            AppEvent::ShowWelcome | AppEvent::ShowResults { .. } | AppEvent::NoResults { .. } => {
                // UI-only events, ignore in backend
            }
        }
    }

    Ok(())
}
