use kanal::AsyncSender;
use qamus_types::{AppEvent, TextSource};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

/// Reads queries from stdin, one per line
pub async fn watcher_io(
    interactive: bool,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    read_queries(BufReader::new(tokio::io::stdin()), interactive, cancel, event_tx).await
}

/// Forward every line as a query, then `Shutdown` once the input ends.
///
/// Interactive lines supersede each other; piped lines are batch queries that
/// all get an answer.
pub async fn read_queries<R>(
    reader: R,
    interactive: bool,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Input watcher cancelled");
                return Ok(());
            }
            line = lines.next_line() => line?,
        };

        let Some(text) = line else {
            tracing::info!("Input closed");
            break;
        };

        tracing::debug!("Read query: {}", text);
        let event = if interactive {
            AppEvent::TextInput(text)
        } else {
            AppEvent::RawTextInput {
                text,
                source: TextSource::Stdin,
            }
        };
        event_tx.send(event).await?;
    }

    event_tx.send(AppEvent::Shutdown).await?;
    Ok(())
}
