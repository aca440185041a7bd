pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::RwLock;

use models::Invoice;
use services::StoreClient;

/// In-memory session state: the cached invoice collection and the
/// process-wide discount percentage. The store stays the source of truth;
/// the collection is refreshed from it on every list command.
#[derive(Debug, Clone)]
pub struct Session {
    pub invoices: Vec<Invoice>,
    pub discount_percentage: Decimal,
}

impl Session {
    pub fn new(discount_percentage: Decimal) -> Self {
        Self {
            invoices: Vec::new(),
            discount_percentage,
        }
    }
}

/// Shared application state passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StoreClient>,
    pub session: Arc<RwLock<Session>>,
}

impl AppState {
    pub fn new(store: Arc<StoreClient>, default_discount: Decimal) -> Self {
        Self {
            store,
            session: Arc::new(RwLock::new(Session::new(default_discount))),
        }
    }
}
