//! Client tests against a live gateway bound to an ephemeral port.

use std::sync::Arc;

use axum::{Router, http::StatusCode, routing::get};
use fest_core::{
  ack::{ALREADY_SUBSCRIBED, AckStatus},
  event::NewEvent,
  registration::NewRegistration,
};
use fest_store_sqlite::SqliteStore;
use tokio::net::TcpListener;

use crate::{
  App, ApiClient, ApiConfig, CatalogSource, Endpoint, Error,
  app::{ADMIN_ONLY, EVENT_ADDED, EVENT_FAILED, ImageInput, REGISTERED},
  catalog::{CatalogState, FAILED_MESSAGE},
  client::DEMO_REGISTRATION,
  notice::NoticeKind,
};

/// Serve the gateway under `/api` plus a few misbehaving routes; returns the
/// base URL.
async fn spawn_gateway() -> String {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let router = Router::new()
    .nest("/api", fest_api::api_router(Arc::new(store), None))
    .route("/broken", get(broken).post(broken))
    .route("/malformed", get(|| async { "{not json" }));

  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
  format!("http://{addr}")
}

async fn broken() -> StatusCode { StatusCode::INTERNAL_SERVER_ERROR }

async fn gateway_client() -> ApiClient {
  ApiClient::new(ApiConfig::new(spawn_gateway().await)).unwrap()
}

fn new_event(id: &str, date: &str) -> NewEvent {
  NewEvent {
    id: Some(id.to_owned()),
    name: format!("Event {id}"),
    date: date.to_owned(),
    time: "6 PM".into(),
    venue: "Main Hall".into(),
    kind: "technical".into(),
    description: "Talks and demos.".into(),
    ..NewEvent::default()
  }
}

fn signed_in(client: ApiClient) -> App {
  let mut app = App::new(client);
  assert_eq!(app.sign_in("admin@fest.edu", "secret").kind, NoticeKind::Success);
  app
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn catalog_is_shown_in_date_order() {
  let client = gateway_client().await;
  client.create_event(&new_event("1", "2025-05-10")).await.unwrap();
  client.create_event(&new_event("2", "2025-03-01")).await.unwrap();

  let app = App::new(client);
  assert_eq!(app.reload().await.kind, NoticeKind::Info);
  let ids: Vec<_> = app.catalog.cards().into_iter().map(|c| c.id).collect();
  assert_eq!(ids, ["2", "1"]);
}

#[tokio::test]
async fn unreachable_catalog_is_a_fetch_error_with_no_cards() {
  let base = spawn_gateway().await;
  let client = ApiClient::new(ApiConfig::new(base.clone())).unwrap();
  let err = client
    .load_catalog(&CatalogSource::parse(&format!("{base}/nowhere.json")))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Fetch { .. }));

  let mut config = ApiConfig::new(base.clone());
  config.endpoints.events = Some(format!("{base}/broken"));
  let app = App::new(ApiClient::new(config).unwrap());
  let notice = app.reload().await;
  assert_eq!(notice.kind, NoticeKind::Error);
  assert_eq!(app.catalog.state(), CatalogState::Failed(FAILED_MESSAGE.into()));
  assert!(app.catalog.cards().is_empty());
}

#[tokio::test]
async fn malformed_catalog_is_a_parse_error_and_shows_no_cards() {
  let base = spawn_gateway().await;
  let mut config = ApiConfig::new(base.clone());
  config.endpoints.events = Some(format!("{base}/malformed"));
  let client = ApiClient::new(config).unwrap();

  let err = client.load_catalog(&client.catalog_source()).await.unwrap_err();
  assert!(matches!(err, Error::Parse { .. }));

  let app = App::new(client);
  let notice = app.reload().await;
  assert_eq!(notice.kind, NoticeKind::Error);
  assert_eq!(app.catalog.state(), CatalogState::Failed(FAILED_MESSAGE.into()));
  assert!(app.catalog.cards().is_empty());
}

#[tokio::test]
async fn catalog_can_be_read_from_a_file() {
  let path = std::env::temp_dir().join(format!("fest-catalog-{}.json", std::process::id()));
  tokio::fs::write(
    &path,
    r#"[{"id":"1","name":"Late","date":"2025-05-10"},
        {"id":"2","name":"Early","date":"2025-03-01"}]"#,
  )
  .await
  .unwrap();

  let mut config = ApiConfig::default();
  config.endpoints.events = Some(format!("file://{}", path.display()));
  let app = App::new(ApiClient::new(config).unwrap());
  app.reload().await;
  tokio::fs::remove_file(&path).await.unwrap();

  let ids: Vec<_> = app.catalog.events().into_iter().map(|e| e.id).collect();
  assert_eq!(ids, ["2", "1"]);
}

#[tokio::test]
async fn late_reload_does_not_overwrite_newer_one() {
  let client = gateway_client().await;
  client.create_event(&new_event("a", "2025-01-01")).await.unwrap();
  let app = App::new(client);

  let older = app.catalog.begin();
  let newer = app.catalog.begin();
  let source = app.client.catalog_source();
  assert!(app.catalog.apply(newer, app.client.load_catalog(&source).await));
  assert!(!app.catalog.apply(older, Err(Error::fetch("late", "timed out"))));
  assert_eq!(app.catalog.events().len(), 1);
}

// ── Submissions ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn subscribing_twice_is_created_then_conflict() {
  let client = gateway_client().await;

  let first = client.subscribe("a@x.com").await.unwrap();
  assert_eq!(first.status, AckStatus::Created);
  assert!(first.field("subscriberId").is_some());

  let second = client.subscribe("a@x.com").await.unwrap();
  assert_eq!(second.status, AckStatus::Conflict);
  assert_eq!(second.message.as_deref(), Some(ALREADY_SUBSCRIBED));

  let app = App::new(client);
  let notice = app.subscribe("a@x.com").await;
  assert_eq!(notice.kind, NoticeKind::Info);
  assert_eq!(notice.text, ALREADY_SUBSCRIBED);
}

#[tokio::test]
async fn conflict_on_other_endpoints_is_an_error() {
  let client = gateway_client().await;
  client.create_event(&new_event("dup", "2025-05-10")).await.unwrap();
  let err = client
    .create_event(&new_event("dup", "2025-06-10"))
    .await
    .unwrap_err();
  match err {
    Error::Submission { endpoint, status, reason } => {
      assert_eq!(endpoint, Endpoint::CreateEvent);
      assert_eq!(status, Some(409));
      assert!(reason.contains("dup"));
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[tokio::test]
async fn validation_errors_carry_the_gateway_reason() {
  let client = gateway_client().await;
  let err = client
    .create_event(&NewEvent { name: "x".into(), ..NewEvent::default() })
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Submission { status: Some(400), ref reason, .. }
      if reason == "Missing required fields: date, time, venue, description"
  ));
}

#[tokio::test]
async fn create_event_reloads_the_catalog_once() {
  let app = signed_in(gateway_client().await);
  app.reload().await;
  let before = app.catalog.generation();

  let notice = app.create_event(new_event("new", "2025-09-01"), ImageInput::None).await;
  assert_eq!(notice.kind, NoticeKind::Success);
  assert_eq!(notice.text, EVENT_ADDED);
  assert_eq!(app.catalog.generation(), before + 1);
  assert_eq!(app.catalog.cards()[0].image, "assets/technical.jpg");
}

#[tokio::test]
async fn create_event_requires_a_session() {
  let app = App::new(gateway_client().await);
  let before = app.catalog.generation();
  let notice = app.create_event(new_event("x", "2025-09-01"), ImageInput::None).await;
  assert_eq!(notice.text, ADMIN_ONLY);
  assert_eq!(app.catalog.generation(), before);
}

#[tokio::test]
async fn failed_create_shows_fallback_and_skips_reload() {
  let base = spawn_gateway().await;
  let mut config = ApiConfig::new(base.clone());
  config.endpoints.create_event = Some(format!("{base}/broken"));
  let app = signed_in(ApiClient::new(config).unwrap());

  let notice = app.create_event(new_event("x", "2025-09-01"), ImageInput::None).await;
  assert_eq!(notice.kind, NoticeKind::Error);
  assert_eq!(notice.text, EVENT_FAILED);
  assert_eq!(app.catalog.generation(), 0);
}

#[tokio::test]
async fn registration_is_stored_with_event_name() {
  let client = gateway_client().await;
  client.create_event(&new_event("g1", "2025-05-10")).await.unwrap();
  let app = App::new(client);
  app.reload().await;

  let notice = app.register("g1", "Ada", "ada@x.com").await;
  assert_eq!(notice.kind, NoticeKind::Success);
  assert_eq!(notice.text, REGISTERED);

  let again = app.register("g1", "Ada", "ada@x.com").await;
  assert_eq!(again.kind, NoticeKind::Error);
  assert_eq!(again.text, "You are already registered for this event");
}

#[tokio::test]
async fn demo_mode_simulates_failed_registration() {
  let registration = NewRegistration {
    name:       "Ada".into(),
    email:      "ada@x.com".into(),
    event_name: Some("Expo".into()),
    event_id:   None,
  };

  let base = spawn_gateway().await;
  let broken = format!("{base}/broken");

  let mut config = ApiConfig::new(base.clone());
  config.endpoints.register = Some(broken.clone());
  let err = ApiClient::new(config).unwrap().register(&registration).await.unwrap_err();
  assert!(matches!(err, Error::Submission { status: Some(500), .. }));

  let mut config = ApiConfig::new(base);
  config.endpoints.register = Some(broken);
  config.demo_mode = true;
  let ack = ApiClient::new(config).unwrap().register(&registration).await.unwrap();
  assert_eq!(ack.status, AckStatus::Simulated);
  assert_eq!(ack.message.as_deref(), Some(DEMO_REGISTRATION));
}

#[tokio::test]
async fn subscribers_are_listed_newest_first_for_admins() {
  let client = gateway_client().await;
  client.subscribe("a@x.com").await.unwrap();
  client.subscribe("b@x.com").await.unwrap();

  let mut app = App::new(client);
  assert!(app.subscribers().await.is_err());
  app.sign_in("admin@fest.edu", "secret");
  let emails: Vec<_> = app
    .subscribers()
    .await
    .unwrap()
    .into_iter()
    .map(|s| s.email)
    .collect();
  assert_eq!(emails, ["b@x.com", "a@x.com"]);
}
