//! Invoice model for invoice-manager.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ProductLine, ProductRecord};

/// Invoice status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Pending,
    Complete,
    Cancel,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Complete => "Complete",
            InvoiceStatus::Cancel => "Cancel",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "Complete" => InvoiceStatus::Complete,
            "Cancel" => InvoiceStatus::Cancel,
            _ => InvoiceStatus::Pending,
        }
    }
}

/// Billing record with customer metadata, status and its product lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub name: String,
    pub email: String,
    pub date: NaiveDate,
    pub address: String,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub products: Vec<ProductLine>,
}

impl Invoice {
    /// Sum of line amounts, before any discount.
    pub fn total_amount(&self) -> Decimal {
        self.products.iter().map(ProductLine::amount).sum()
    }

    /// Assemble a full invoice from its store records.
    pub fn from_records(record: InvoiceRecord, products: Vec<ProductRecord>) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            date: record.date,
            address: record.address,
            status: InvoiceStatus::from_string(&record.status),
            favorite: record.favorite,
            products: products.into_iter().map(ProductLine::from).collect(),
        }
    }

    /// The store's shape of this invoice; product lines live under `/products`.
    pub fn to_record(&self) -> InvoiceRecord {
        InvoiceRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            date: self.date,
            address: self.address.clone(),
            status: self.status.as_str().to_string(),
            favorite: self.favorite,
        }
    }
}

/// Invoice as held by the store. Status stays a plain string on the wire;
/// unknown values decode to `Pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub date: NaiveDate,
    pub address: String,
    pub status: String,
    #[serde(default)]
    pub favorite: bool,
}
