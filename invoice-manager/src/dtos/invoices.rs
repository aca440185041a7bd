use invoice_core::error::AppError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Invoice, InvoiceStatus, ProductLine};
use crate::utils::invoice_id::generate_invoice_id;
use crate::utils::totals::InvoiceTotals;

/// A submitted invoice form: everything the create and save commands accept.
///
/// `date` stays a raw string so an unparseable value surfaces through the
/// validation report instead of failing deserialization.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InvoiceDraft {
    /// Optional; a blank or missing id gets the generated `INV-` form.
    #[serde(default)]
    pub id: Option<String>,

    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: String,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[serde(default)]
    pub date: String,

    #[validate(length(min = 5, max = 200, message = "Address must be between 5 and 200 characters"))]
    pub address: String,

    /// Unknown values fall back to `Pending`, same as records from the store.
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub favorite: bool,

    #[serde(default)]
    pub products: Vec<ProductLineInput>,
}

impl InvoiceDraft {
    /// Build the domain invoice. Only call after the draft validated; the
    /// date parse is still propagated rather than assumed.
    pub fn into_invoice(self) -> Result<Invoice, AppError> {
        let date = self
            .date
            .trim()
            .parse()
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid date: {e}")))?;

        let id = match self.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => generate_invoice_id(),
        };

        let status = self
            .status
            .as_deref()
            .map(InvoiceStatus::from_string)
            .unwrap_or(InvoiceStatus::Pending);

        Ok(Invoice {
            id,
            name: self.name,
            email: self.email,
            date,
            address: self.address,
            status,
            favorite: self.favorite,
            products: self.products.into_iter().map(ProductLineInput::into_line).collect(),
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductLineInput {
    #[validate(length(
        min = 2,
        max = 50,
        message = "Product name must be between 2 and 50 characters"
    ))]
    pub name: String,

    pub rate: Decimal,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
}

impl ProductLineInput {
    pub fn into_line(self) -> ProductLine {
        ProductLine {
            id: None,
            name: self.name,
            rate: self.rate,
            quantity: self.quantity,
        }
    }
}

/// Query parameters of the list command.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteInvoicesRequest {
    pub ids: Vec<String>,
}

/// Live-preview input. Numbers arrive as typed on the form, so malformed
/// rate/quantity coerce to zero instead of rejecting the draft.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub products: Vec<PreviewLine>,

    /// Overrides the session discount when present.
    #[serde(default, deserialize_with = "crate::models::lenient_optional_decimal")]
    pub discount_percentage: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewLine {
    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "crate::models::lenient_decimal")]
    pub rate: Decimal,

    #[serde(default, deserialize_with = "crate::models::lenient_quantity")]
    pub quantity: u32,
}

impl PreviewLine {
    pub fn into_line(self) -> ProductLine {
        ProductLine {
            id: None,
            name: self.name,
            rate: self.rate,
            quantity: self.quantity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub products: Vec<PreviewLineAmount>,
    pub discount_percentage: Decimal,
    #[serde(flatten)]
    pub totals: InvoiceTotals,
}

#[derive(Debug, Serialize)]
pub struct PreviewLineAmount {
    pub name: String,
    pub rate: Decimal,
    pub quantity: u32,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscountUpdate {
    #[serde(deserialize_with = "crate::models::lenient_decimal")]
    pub percentage: Decimal,
}

#[derive(Debug, Serialize)]
pub struct DiscountResponse {
    pub discount_percentage: Decimal,
}
