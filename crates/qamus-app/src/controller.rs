use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use qamus_types::{AppEvent, TextSource};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::watcher_io;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub input_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(64),
            input_to_app: kanal::bounded_async(64),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Sender for injecting queries, e.g. from the command line
    pub fn input(&self) -> AsyncSender<AppEvent> {
        self.channels.input_to_app.0.clone()
    }

    /// Spawn the event loop, presenter and stdin watcher.
    ///
    /// `interactive` input supersedes running queries; piped input is answered line by line.
    pub fn spawn_tasks(&self, interactive: bool) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.input_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        // UI loop
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.state.config.clone(),
        ));

        // Stdin watcher
        tasks.spawn(watcher_io(
            interactive,
            self.cancel_token.child_token(),
            self.channels.input_to_app.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
        let _ = self.channels.app_to_ui.0.close();
    }
}

/// Answer `queries` in order through the event loop and presenter, then stop
pub async fn run_batch(
    state: Arc<AppState>,
    queries: Vec<String>,
    source: TextSource,
) -> anyhow::Result<()> {
    let channels = ChannelSet::new();
    let (input_tx, input_rx) = channels.input_to_app;
    let (ui_tx, ui_rx) = channels.app_to_ui;

    let events = tokio::spawn(event_loop(
        state.clone(),
        input_rx,
        ui_tx,
        CancellationToken::new(),
    ));
    let presenter = tokio::spawn(ui_loop(ui_rx, state.config.clone()));

    for text in queries {
        input_tx.send(AppEvent::RawTextInput { text, source }).await?;
    }
    input_tx.send(AppEvent::Shutdown).await?;

    events.await??;
    presenter.await??;
    Ok(())
}
