//! Shared test harness: an in-process mock store with json-server semantics
//! plus the application router wired against it.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, State},
    http::{Request, StatusCode, header},
    routing::get,
};
use invoice_manager::AppState;
use invoice_manager::config::StoreSettings;
use invoice_manager::services::StoreClient;
use invoice_manager::startup::build_router;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tower::util::ServiceExt;

/// In-memory stand-in for json-server: two collections of raw JSON records.
#[derive(Clone, Default)]
pub struct MockStore {
    invoices: Arc<Mutex<Vec<Value>>>,
    products: Arc<Mutex<Vec<Value>>>,
    next_id: Arc<Mutex<u64>>,
}

impl MockStore {
    pub fn router(&self) -> Router {
        Router::new()
            .route("/invoices", get(list_invoices).post(create_invoice))
            .route(
                "/invoices/:id",
                get(get_invoice).put(put_invoice).delete(delete_invoice),
            )
            .route("/products", get(list_products).post(create_product))
            .route("/products/:id", get(get_product).put(put_product).delete(delete_product))
            .with_state(self.clone())
    }

    pub async fn invoice_count(&self) -> usize {
        self.invoices.lock().await.len()
    }

    pub async fn product_count(&self) -> usize {
        self.products.lock().await.len()
    }

    /// Seed a raw product record, bypassing the application.
    pub async fn insert_product(&self, record: Value) {
        self.products.lock().await.push(record);
    }

    async fn fresh_id(&self) -> String {
        let mut next = self.next_id.lock().await;
        *next += 1;
        next.to_string()
    }
}

fn id_matches(record: &Value, id: &str) -> bool {
    record["id"].as_str() == Some(id)
}

async fn list_invoices(State(store): State<MockStore>) -> Json<Value> {
    Json(Value::Array(store.invoices.lock().await.clone()))
}

async fn create_invoice(
    State(store): State<MockStore>,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if body["id"].as_str().map_or(true, str::is_empty) {
        body["id"] = json!(store.fresh_id().await);
    }
    store.invoices.lock().await.push(body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn get_invoice(
    State(store): State<MockStore>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    store
        .invoices
        .lock()
        .await
        .iter()
        .find(|record| id_matches(record, &id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn put_invoice(
    State(store): State<MockStore>,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut invoices = store.invoices.lock().await;
    let slot = invoices
        .iter_mut()
        .find(|record| id_matches(record, &id))
        .ok_or(StatusCode::NOT_FOUND)?;
    body["id"] = json!(id);
    *slot = body.clone();
    Ok(Json(body))
}

async fn delete_invoice(
    State(store): State<MockStore>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let mut invoices = store.invoices.lock().await;
    let position = invoices
        .iter()
        .position(|record| id_matches(record, &id))
        .ok_or(StatusCode::NOT_FOUND)?;
    invoices.remove(position);
    Ok(Json(json!({})))
}

async fn list_products(
    State(store): State<MockStore>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let products = store.products.lock().await;
    let filtered: Vec<Value> = match params.get("invoiceId") {
        Some(invoice_id) => products
            .iter()
            .filter(|record| record["invoiceId"].as_str() == Some(invoice_id.as_str()))
            .cloned()
            .collect(),
        None => products.clone(),
    };
    Json(Value::Array(filtered))
}

async fn create_product(
    State(store): State<MockStore>,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if body["id"].as_str().map_or(true, str::is_empty) {
        body["id"] = json!(store.fresh_id().await);
    }
    store.products.lock().await.push(body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn get_product(
    State(store): State<MockStore>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    store
        .products
        .lock()
        .await
        .iter()
        .find(|record| id_matches(record, &id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn put_product(
    State(store): State<MockStore>,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut products = store.products.lock().await;
    let slot = products
        .iter_mut()
        .find(|record| id_matches(record, &id))
        .ok_or(StatusCode::NOT_FOUND)?;
    body["id"] = json!(id);
    *slot = body.clone();
    Ok(Json(body))
}

async fn delete_product(
    State(store): State<MockStore>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let mut products = store.products.lock().await;
    let position = products
        .iter()
        .position(|record| id_matches(record, &id))
        .ok_or(StatusCode::NOT_FOUND)?;
    products.remove(position);
    Ok(Json(json!({})))
}

/// The application under test plus a handle on its mock store.
pub struct TestApp {
    router: Router,
    pub mock: MockStore,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let mock = MockStore::default();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock store listener");
        let address = listener.local_addr().expect("Missing mock store address");
        let store_router = mock.router();
        tokio::spawn(async move {
            axum::serve(listener, store_router)
                .await
                .expect("Mock store crashed");
        });

        let store = Arc::new(StoreClient::new(StoreSettings {
            url: format!("http://{address}"),
        }));
        let state = AppState::new(store, Decimal::from(5));

        Self {
            router: build_router(state),
            mock,
        }
    }

    /// Drive one request through the application router.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .expect("Failed to build request"),
            None => builder.body(Body::empty()).expect("Failed to build request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed to respond");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };

        (status, value)
    }
}

/// A complete, valid draft with a single Pen line.
pub fn pen_draft(id: Option<&str>, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "date": "2024-01-05",
        "address": "12 Baker Street",
        "products": [
            { "name": "Pen", "rate": 2.0, "quantity": 3 }
        ]
    })
}
