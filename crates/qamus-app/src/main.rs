use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use qamus_app::controller::{AppController, run_batch};
use qamus_app::profile::{load_config, save_profile};
use qamus_app::state::AppState;
use qamus_types::{AppEvent, TextSource};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "qamus", version, about = "English and Arabic word lookup")]
struct Args {
    /// Word or phrase to look up, queries are read from stdin when omitted
    query: Vec<String>,

    /// Config file, overrides the profile
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Profile name under the config folder
    #[arg(short, long)]
    profile: Option<String>,

    /// Save the effective config as this profile and exit
    #[arg(long, value_name = "NAME")]
    save_profile: Option<String>,

    /// Only search the local word list
    #[arg(long)]
    offline: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Log as JSON to stderr
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    init_tracing(args.log_json);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(start(args));

    // stdin reads park a blocking thread that never returns on its own
    runtime.shutdown_timeout(Duration::from_millis(250));
    result
}

async fn start(args: Args) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref(), args.profile.as_deref())?;
    if args.offline {
        config.network.offline = true;
    }
    if args.json {
        config.ui.json = true;
    }

    if let Some(name) = &args.save_profile {
        let file = save_profile(name, &config)?;
        println!("Saved profile {name} to {}", file.display());
        return Ok(());
    }

    let state = Arc::new(AppState::new(config));
    tracing::info!(
        "Local word list: {} entries",
        state.aggregator.index().len()
    );

    if !args.query.is_empty() {
        return run_batch(state, vec![args.query.join(" ")], TextSource::Argument).await;
    }

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };

    run(state, shutdown).await
}

pub async fn run(state: Arc<AppState>, shutdown: impl Future<Output = ()>) -> anyhow::Result<()> {
    let controller = AppController::new(state);
    let interactive = atty::is(atty::Stream::Stdin);

    if interactive {
        // An empty query answers with the welcome text
        controller.input().send(AppEvent::TextInput(String::new())).await?;
    }

    let mut tasks = controller.spawn_tasks(interactive);

    tokio::select! {
        _ = shutdown => {
            tracing::info!("Shutdown requested");
            controller.shutdown();
        }
        _ = async {
            while let Some(result) = tasks.join_next().await {
                match result {
                    Ok(Ok(())) => tracing::debug!("task finished"),
                    Ok(Err(e)) => tracing::error!("task exited: {e}"),
                    Err(e) => tracing::error!("task panicked: {e}"),
                }
            }
        } => {}
    }

    tasks.abort_all();
    Ok(())
}
