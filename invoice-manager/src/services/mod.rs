//! Service clients for invoice-manager.

pub mod store;

pub use store::StoreClient;
