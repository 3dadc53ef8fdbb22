#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use stockmill_api::{
    config::AppConfig,
    db::{self, DbConfig, DbPool},
    entities::{bom_line, bom_recipe, item, warehouse},
    events::{self, Event, EventSender},
    handlers::AppServices,
    AppState,
};
use tokio::sync::mpsc;
use tower::ServiceExt;

/// Fresh in-memory sqlite pool with the full schema applied. Pinned to a
/// single connection: every pooled connection to `sqlite::memory:` opens
/// its own empty database.
pub async fn setup_test_db() -> Arc<DbPool> {
    let config = DbConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    let pool = db::establish_connection_with_config(&config)
        .await
        .expect("test database should connect");
    db::run_migrations(&pool)
        .await
        .expect("migrations should apply cleanly");
    Arc::new(pool)
}

/// Event channel wired the way `main` wires it, with the receiver kept so
/// tests can assert on emitted events.
pub fn test_event_sender() -> (Arc<EventSender>, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(100);
    (Arc::new(EventSender::new(tx)), rx)
}

pub async fn seed_item(db: &DbPool, sku: &str, name: &str) -> item::Model {
    item::ActiveModel {
        sku: Set(sku.to_string()),
        name: Set(name.to_string()),
        unit: Set(Some("kg".to_string())),
        is_active: Set(true),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("item fixture should insert")
}

pub async fn seed_warehouse(db: &DbPool, code: &str, name: &str) -> warehouse::Model {
    warehouse::ActiveModel {
        code: Set(code.to_string()),
        name: Set(name.to_string()),
        is_active: Set(true),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("warehouse fixture should insert")
}

pub async fn seed_recipe(
    db: &DbPool,
    output_item_id: i64,
    output_qty_per_batch: Decimal,
    components: &[(i64, Decimal)],
) -> bom_recipe::Model {
    let recipe = bom_recipe::ActiveModel {
        output_item_id: Set(output_item_id),
        output_qty_per_batch: Set(output_qty_per_batch),
        is_active: Set(true),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("recipe fixture should insert");

    for (component_item_id, qty_per_batch) in components {
        bom_line::ActiveModel {
            bom_recipe_id: Set(recipe.id),
            component_item_id: Set(*component_item_id),
            qty_per_batch: Set(*qty_per_batch),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("recipe line fixture should insert");
    }

    recipe
}

/// Application harness backed by an in-memory database, driving the same
/// router `main` serves.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = setup_test_db().await;

        let (event_tx, event_rx) = mpsc::channel(100);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let services = AppServices::new(db.clone(), Arc::new(event_sender.clone()), false);

        let config = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );

        let state = AppState {
            db: db.clone(),
            config,
            event_sender,
            services,
        };

        let router = stockmill_api::app_router(state.clone());

        Self {
            router,
            state,
            _event_task: event_task,
        }
    }

    pub fn db(&self) -> &DbPool {
        self.state.db.as_ref()
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request should build"),
            None => builder.body(Body::empty()).expect("request should build"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router should produce a response");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body should read");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body should be JSON")
        };

        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}
