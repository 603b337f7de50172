//! `fest`, the command-line client for Campus Fest Hub.
//!
//! # Usage
//!
//! ```
//! fest events
//! fest --url https://fest.example.edu subscribe ada@example.com
//! fest --config ~/.config/fest/config.toml register <event-id> --name Ada --email ada@example.com
//! ```

use std::{path::PathBuf, process::ExitCode, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fest_client::{
  App,
  app::ImageInput,
  card,
  catalog::CatalogState,
  client::{ApiClient, ApiConfig, DEFAULT_BASE_URL, Endpoints},
  notice::{Notice, NoticeKind},
};
use fest_core::event::NewEvent;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "fest", about = "Command-line client for Campus Fest Hub")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", env = "FEST_CONFIG")]
  config: Option<PathBuf>,

  /// Base URL of the gateway (default: http://localhost:8080).
  #[arg(long, env = "FEST_URL")]
  url: Option<String>,

  /// Catalog source: an http(s) URL or a local JSON file.
  #[arg(long, env = "FEST_EVENTS")]
  events: Option<String>,

  /// Request timeout in seconds; unset or 0 waits indefinitely.
  #[arg(long, env = "FEST_TIMEOUT")]
  timeout: Option<u64>,

  /// Report failed registrations as simulated successes.
  #[arg(long, env = "FEST_DEMO_MODE")]
  demo_mode: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List upcoming events.
  Events,

  /// Show one event.
  Event { id: String },

  /// Subscribe to the newsletter.
  Subscribe { email: String },

  /// Register for an event.
  Register {
    event_id: String,
    #[arg(long)]
    name:     String,
    #[arg(long)]
    email:    String,
  },

  /// Publish a new event (administrators).
  CreateEvent(CreateEventArgs),

  /// List newsletter subscribers (administrators).
  Subscribers(AdminArgs),
}

#[derive(clap::Args, Debug)]
struct AdminArgs {
  #[arg(long = "admin-email", env = "FEST_ADMIN_EMAIL")]
  email:    String,
  #[arg(long = "admin-password", env = "FEST_ADMIN_PASSWORD", hide_env_values = true)]
  password: String,
}

#[derive(clap::Args, Debug)]
struct CreateEventArgs {
  #[command(flatten)]
  admin: AdminArgs,

  /// Explicit id; the gateway assigns one when omitted.
  #[arg(long)]
  id:                Option<String>,
  #[arg(long)]
  name:              String,
  /// YYYY-MM-DD
  #[arg(long)]
  date:              String,
  #[arg(long)]
  time:              String,
  #[arg(long)]
  venue:             String,
  /// cultural, technical, sports, workshop, seminar or any other label.
  #[arg(long = "type", default_value = "")]
  kind:              String,
  #[arg(long, default_value = "")]
  short_description: String,
  #[arg(long)]
  description:       String,
  /// Image URL.
  #[arg(long, conflicts_with = "image_file")]
  image:             Option<String>,
  /// Local image, sent inline as a data URL.
  #[arg(long)]
  image_file:        Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct ConfigFile {
  #[serde(default)]
  url:             String,
  #[serde(default)]
  timeout_seconds: Option<u64>,
  #[serde(default)]
  demo_mode:       bool,
  #[serde(default)]
  endpoints:       Endpoints,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let mut endpoints = file_cfg.endpoints;
  if args.events.is_some() {
    endpoints.events = args.events;
  }
  let timeout = args
    .timeout
    .or(file_cfg.timeout_seconds)
    .filter(|&secs| secs > 0)
    .map(Duration::from_secs);
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
    endpoints,
    timeout,
    demo_mode: args.demo_mode || file_cfg.demo_mode,
  };

  let client = ApiClient::new(api_config).context("building HTTP client")?;
  let mut app = App::new(client);

  let notice = run(&mut app, args.command).await;
  Ok(report(&notice))
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn run(app: &mut App, command: Command) -> Notice {
  match command {
    Command::Events => {
      let notice = app.reload().await;
      if let CatalogState::Ready(events) = app.catalog.state() {
        println!("{}", card::render(&events));
      }
      notice
    }
    Command::Event { id } => match app.event(&id).await {
      Ok(event) => {
        println!("{}", card::detail(&event));
        Notice::info(card::detail_link(&event.id))
      }
      Err(notice) => notice,
    },
    Command::Subscribe { email } => app.subscribe(&email).await,
    Command::Register { event_id, name, email } => {
      // Best effort: the event name is filled from the catalog when it loads.
      app.reload().await;
      app.register(&event_id, &name, &email).await
    }
    Command::CreateEvent(args) => {
      let signed_in = app.sign_in(&args.admin.email, &args.admin.password);
      if signed_in.is_error() {
        return signed_in;
      }
      let source = match (args.image, args.image_file) {
        (Some(url), _) => ImageInput::Url(url),
        (None, Some(path)) => ImageInput::File(path),
        (None, None) => ImageInput::None,
      };
      let event = NewEvent {
        id:                args.id,
        name:              args.name,
        date:              args.date,
        time:              args.time,
        venue:             args.venue,
        kind:              args.kind,
        short_description: args.short_description,
        description:       args.description,
        image:             String::new(),
      };
      let notice = app.create_event(event, source).await;
      if !notice.is_error() {
        println!("{}", card::render(&app.catalog.events()));
      }
      notice
    }
    Command::Subscribers(admin) => {
      let signed_in = app.sign_in(&admin.email, &admin.password);
      if signed_in.is_error() {
        return signed_in;
      }
      match app.subscribers().await {
        Ok(subscribers) if subscribers.is_empty() => Notice::info("No subscribers available."),
        Ok(subscribers) => {
          for s in &subscribers {
            let status = if s.is_confirmed() { "confirmed" } else { "unsubscribed" };
            println!("{}\t{}\t{status}", s.email, s.timestamp.format("%Y-%m-%d %H:%M"));
          }
          Notice::info(format!("{} subscribers", subscribers.len()))
        }
        Err(notice) => notice,
      }
    }
  }
}

/// Print the notice and map it to the process exit status.
fn report(notice: &Notice) -> ExitCode {
  match notice.kind {
    NoticeKind::Error => {
      eprintln!("error: {notice}");
      ExitCode::FAILURE
    }
    NoticeKind::Success | NoticeKind::Info => {
      eprintln!("{notice}");
      ExitCode::SUCCESS
    }
  }
}
