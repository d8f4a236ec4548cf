use std::io::Write;
use std::sync::Arc;

use kanal::AsyncReceiver;
use qamus_config::Config;
use qamus_types::AppEvent;
use tokio::sync::RwLock;

use crate::render::{WELCOME, render_json, render_no_results, render_results};

/// Output for one presenter event, `None` for events with nothing to print
pub fn present(event: &AppEvent, config: &Config) -> anyhow::Result<Option<String>> {
    let ui = &config.ui;
    let text = match event {
        AppEvent::ShowWelcome => WELCOME.to_string(),
        AppEvent::ShowResults { query, results } if ui.json => {
            render_json(query, results, ui.max_results)?
        }
        AppEvent::ShowResults { query, results } => render_results(query, results, ui.max_results),
        AppEvent::NoResults { query } if ui.json => render_json(query, &[], ui.max_results)?,
        AppEvent::NoResults { query } => render_no_results(query),
        _ => return Ok(None),
    };
    Ok(Some(text))
}

/// Terminal presenter
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    config: Arc<RwLock<Config>>,
) -> anyhow::Result<()> {
    tracing::debug!("[UI] Presenter started");

    loop {
        let Ok(event) = app_to_ui_rx.recv().await else {
            tracing::debug!("[UI] Channel closed");
            break;
        };
        if matches!(event, AppEvent::Shutdown) {
            tracing::debug!("[UI] Shutdown received");
            break;
        }

        let output = {
            let config = config.read().await;
            present(&event, &config)?
        };
        if let Some(text) = output {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", text.trim_end())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
