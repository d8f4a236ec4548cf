use std::sync::Arc;
use std::time::Duration;

use qamus_config::Config;
use qamus_core::{LocalIndex, ResultCache};
use qamus_lang_arabic::DictionaryLoader;
use qamus_sources::SourceAdapter;
use qamus_types::{AppEvent, Language, TextSource};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use super::mocks::{Behavior, MockAdapter, english};
use crate::aggregator::Aggregator;
use crate::events::event_loop;
use crate::io::read_queries;
use crate::state::AppState;
use crate::ui::present;

struct Harness {
    input: kanal::AsyncSender<AppEvent>,
    output: kanal::AsyncReceiver<AppEvent>,
    task: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    fn start(state: AppState) -> Self {
        let (input, input_rx) = kanal::unbounded_async();
        let (output_tx, output) = kanal::unbounded_async();
        let task = tokio::spawn(event_loop(
            Arc::new(state),
            input_rx,
            output_tx,
            CancellationToken::new(),
        ));
        Self {
            input,
            output,
            task,
        }
    }

    async fn ask(&self, text: &str) {
        self.input
            .send(AppEvent::TextInput(text.to_string()))
            .await
            .unwrap();
    }

    async fn next(&self) -> AppEvent {
        match timeout(Duration::from_secs(2), self.output.recv()).await {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => panic!("Channel error: {}", e),
            Err(_) => panic!("Timeout waiting for presenter event"),
        }
    }
}

fn offline_state() -> AppState {
    AppState::offline(Config::default(), DictionaryLoader::load_embedded().unwrap())
}

#[tokio::test]
async fn test_empty_query_shows_welcome() {
    let harness = Harness::start(offline_state());

    harness.ask("  \u{0640} ").await;

    assert!(matches!(harness.next().await, AppEvent::ShowWelcome));
}

#[tokio::test]
async fn test_results_and_no_results() {
    let harness = Harness::start(offline_state());

    harness.ask("BOOK").await;
    match harness.next().await {
        AppEvent::ShowResults { query, results } => {
            assert_eq!(query, "BOOK");
            assert_eq!(results[0].word, "book");
            assert_eq!(results[0].language, Language::English);
        }
        other => panic!("Unexpected event: {:?}", other),
    }

    harness.ask("zzzz").await;
    match harness.next().await {
        AppEvent::NoResults { query } => assert_eq!(query, "zzzz"),
        other => panic!("Unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn test_newer_query_supersedes_slow_one() {
    let slow = MockAdapter::new("Free Dictionary", Behavior::Stall(Duration::from_secs(30)));
    let aggregator = Aggregator::new(
        Arc::new(LocalIndex::empty()),
        Arc::new(ResultCache::new(10, Duration::from_secs(60))),
    )
    .with_definitions(vec![slow.clone() as Arc<dyn SourceAdapter>]);
    let harness = Harness::start(AppState::with_aggregator(Config::default(), aggregator));

    harness.ask("slow").await;
    harness.ask("").await;

    // only the newest query answers
    assert!(matches!(harness.next().await, AppEvent::ShowWelcome));

    harness.input.send(AppEvent::Shutdown).await.unwrap();
    assert!(matches!(harness.next().await, AppEvent::Shutdown));
    harness.task.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_shutdown_waits_for_last_query() {
    let definitions = MockAdapter::answering(
        "Free Dictionary",
        english("run", "Free Dictionary", &[("verb", "move swiftly on foot")]),
    );
    let aggregator = Aggregator::new(
        Arc::new(LocalIndex::empty()),
        Arc::new(ResultCache::new(10, Duration::from_secs(60))),
    )
    .with_definitions(vec![definitions.clone() as Arc<dyn SourceAdapter>]);
    let harness = Harness::start(AppState::with_aggregator(Config::default(), aggregator));

    harness.ask("run").await;
    harness.input.send(AppEvent::Shutdown).await.unwrap();

    assert!(matches!(harness.next().await, AppEvent::ShowResults { .. }));
    assert!(matches!(harness.next().await, AppEvent::Shutdown));
    assert_eq!(definitions.calls(), 1);
}

#[tokio::test]
async fn test_read_queries_forwards_lines_then_shutdown() {
    let (tx, rx) = kanal::unbounded_async();
    let input: &[u8] = "book\n\nماء\n".as_bytes();

    read_queries(input, false, CancellationToken::new(), tx).await.unwrap();

    let mut texts = Vec::new();
    loop {
        match rx.recv().await.unwrap() {
            AppEvent::RawTextInput {
                text,
                source: TextSource::Stdin,
            } => texts.push(text),
            AppEvent::Shutdown => break,
            other => panic!("Unexpected event: {:?}", other),
        }
    }
    assert_eq!(texts, vec!["book", "", "ماء"]);
}

#[tokio::test]
async fn test_interactive_lines_are_text_input() {
    let (tx, rx) = kanal::unbounded_async();
    let input: &[u8] = "book\n".as_bytes();

    read_queries(input, true, CancellationToken::new(), tx).await.unwrap();

    assert!(matches!(rx.recv().await.unwrap(), AppEvent::TextInput(text) if text == "book"));
    assert!(matches!(rx.recv().await.unwrap(), AppEvent::Shutdown));
}

#[tokio::test]
async fn test_piped_lines_are_all_answered_in_order() {
    let slow = MockAdapter::new("Free Dictionary", Behavior::Stall(Duration::from_millis(200)));
    let aggregator = Aggregator::new(
        Arc::new(DictionaryLoader::load_embedded().unwrap()),
        Arc::new(ResultCache::new(10, Duration::from_secs(60))),
    )
    .with_definitions(vec![slow.clone() as Arc<dyn SourceAdapter>]);
    let harness = Harness::start(AppState::with_aggregator(Config::default(), aggregator));

    let input: &[u8] = "book\nwater\n".as_bytes();
    read_queries(input, false, CancellationToken::new(), harness.input.clone())
        .await
        .unwrap();

    let mut answered = Vec::new();
    loop {
        match timeout(Duration::from_secs(5), harness.output.recv()).await {
            Ok(Ok(AppEvent::ShowResults { query, .. })) => answered.push(query),
            Ok(Ok(AppEvent::NoResults { query })) => answered.push(query),
            Ok(Ok(AppEvent::Shutdown)) => break,
            other => panic!("Unexpected presenter output: {:?}", other.map(|r| r.is_ok())),
        }
    }

    assert_eq!(answered, vec!["book", "water"]);
    assert_eq!(slow.calls(), 2);
    harness.task.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_argument_query_is_answered() {
    let harness = Harness::start(offline_state());

    harness
        .input
        .send(AppEvent::RawTextInput {
            text: "house".into(),
            source: TextSource::Argument,
        })
        .await
        .unwrap();
    harness.input.send(AppEvent::Shutdown).await.unwrap();

    match harness.next().await {
        AppEvent::ShowResults { query, results } => {
            assert_eq!(query, "house");
            assert_eq!(results[0].word, "house");
        }
        other => panic!("Unexpected event: {:?}", other),
    }
    assert!(matches!(harness.next().await, AppEvent::Shutdown));
}

#[test]
fn test_present_text_and_json() {
    let mut config = Config::default();
    let event = AppEvent::NoResults {
        query: "zzzz".into(),
    };

    let text = present(&event, &config).unwrap().unwrap();
    assert_eq!(text, "No results for 'zzzz'\n");

    config.ui.json = true;
    let json = present(&event, &config).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["query"], "zzzz");
    assert_eq!(value["results"].as_array().unwrap().len(), 0);

    assert!(present(&AppEvent::Shutdown, &config).unwrap().is_none());
}
