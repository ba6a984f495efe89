//! Interactive terminal client.
//!
//! Reads one command per line from stdin and redraws the list on stdout
//! once the command's requests have settled. Logs go to stderr.

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use todosync::cli::{self, Command, CommandError, USAGE};
use todosync::{
    Config, ConfigError, HttpTodoApi, TodoAction, TodoEnvironment, TodoReducer, TodoState, view,
};
use todosync_core::environment::SystemClock;
use todosync_runtime::{Store, StoreConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

const USER_WARNING: &str = "\
Please set TODOS_USER_ID to your user id before starting the client.
It can also be placed in a .env file next to the binary.";

/// Poll interval while waiting for in-flight requests
const SETTLE_POLL: Duration = Duration::from_millis(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional .env file; real environment variables take precedence
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(ConfigError::MissingUserId) => {
            println!("{USER_WARNING}");
            return Ok(());
        },
        Err(error) => return Err(anyhow::Error::new(error).context("Invalid configuration")),
    };
    tracing::info!(api_url = %config.api_url, user_id = config.user_id, "Starting todo client");

    let api = HttpTodoApi::new(config.api_url.clone(), config.request_timeout())
        .context("Failed to build HTTP client")?;
    let env = TodoEnvironment::new(Arc::new(api), Arc::new(SystemClock), config.user_id())
        .with_error_timeout(config.error_timeout());

    let store = Store::with_config(
        TodoState::new(),
        TodoReducer::new(),
        env,
        StoreConfig::default().with_shutdown_timeout(config.shutdown_timeout()),
    );

    store.send(TodoAction::Load).await?;
    settle(&store, config.request_timeout()).await;
    redraw(&store).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let action = match cli::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => {
                println!("{USAGE}");
                continue;
            },
            Ok(Command::Show) => {
                redraw(&store).await;
                continue;
            },
            Ok(Command::Save(title)) => match store.state(|s| s.editing).await {
                Some(id) => TodoAction::SubmitEdit { id, title },
                None => {
                    println!("nothing is being edited (use `edit <id>` first)");
                    continue;
                },
            },
            Ok(Command::Dispatch(action)) => action,
            Err(CommandError::Empty) => continue,
            Err(error) => {
                println!("{error}\n\n{USAGE}");
                continue;
            },
        };

        store.send(action).await?;
        settle(&store, config.request_timeout()).await;
        redraw(&store).await;
    }

    tracing::info!("Shutting down");
    store
        .shutdown(config.shutdown_timeout())
        .await
        .context("Graceful shutdown failed")?;

    Ok(())
}

/// Initialize tracing; logs go to stderr so they never interleave with the list
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todosync=info,todosync_runtime=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Wait until no request is in flight, or until `timeout` passes
///
/// Error dismiss timers are not waited for.
async fn settle(store: &TodoStore, timeout: Duration) {
    let idle = async {
        while store
            .state(|s| s.is_loading || s.is_submitting || !s.processing.is_empty())
            .await
        {
            tokio::time::sleep(SETTLE_POLL).await;
        }
    };

    if tokio::time::timeout(timeout, idle).await.is_err() {
        tracing::warn!(?timeout, "Requests still in flight, redrawing anyway");
    }
}

async fn redraw(store: &TodoStore) {
    let screen = store.state(view::render).await;
    println!("{screen}");
}
