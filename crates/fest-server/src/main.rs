//! fest-server binary.
//!
//! Settings come from `config.toml` (or `--config <path>`), then `FEST_*`
//! environment variables, then command-line flags.
//!
//! ```
//! FEST_STORE_PATH=~/fest.db fest-server --port 9000
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use fest_api::{LogNotifier, Notifier};
use fest_server::{AppState, ServerConfig};
use fest_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Campus Fest Hub gateway server")]
struct Cli {
  /// TOML configuration file; missing is fine.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Listen port, overriding the configuration.
  #[arg(short, long)]
  port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let mut cfg = load_config(&cli.config)?;
  if let Some(port) = cli.port {
    cfg.port = port;
  }
  tracing::debug!(?cfg, "configuration loaded");

  let store_path = expand_tilde(&cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let notifier: Option<Arc<dyn Notifier>> = if cfg.notify_subscribers {
    Some(Arc::new(LogNotifier))
  } else {
    tracing::info!("subscriber announcements disabled");
    None
  };

  let address = cfg.address();
  let app = fest_server::router(AppState {
    store: Arc::new(store),
    config: Arc::new(cfg),
    notifier,
  })
  .context("allowed_origin is not a valid header value")?;

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("gateway listening on http://{address}");

  axum::serve(listener, app).await.context("server error")
}

/// Layer the optional config file under `FEST_*` environment overrides.
fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
  config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("FEST"))
    .build()
    .with_context(|| format!("failed to read {}", path.display()))?
    .try_deserialize()
    .context("invalid server configuration")
}

/// Expand a leading `~/` using `$HOME`.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  match (s.strip_prefix("~/"), std::env::var_os("HOME")) {
    (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
    _ => path.to_path_buf(),
  }
}
