//! HTTP client for the external invoice store (json-server style REST API).

use futures::future::try_join_all;
use invoice_core::error::AppError;
use reqwest::{Client, Response, StatusCode};
use tracing::instrument;

use crate::config::StoreSettings;
use crate::models::{InvoiceRecord, ProductRecord};

/// Thin wrapper issuing CRUD requests for invoices and products.
///
/// Failures are surfaced per call site and abort the calling operation; there
/// is no retry and no timeout beyond the client defaults.
pub struct StoreClient {
    client: Client,
    settings: StoreSettings,
}

impl StoreClient {
    pub fn new(settings: StoreSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.settings.url
    }

    #[instrument(skip(self))]
    pub async fn list_invoices(&self) -> Result<Vec<InvoiceRecord>, AppError> {
        let url = format!("{}/invoices", self.settings.url);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response, "fetch invoices").await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self), fields(invoice_id = %id))]
    pub async fn get_invoice(&self, id: &str) -> Result<InvoiceRecord, AppError> {
        let url = format!("{}/invoices/{}", self.settings.url, encode_id(id));
        let response = self.client.get(&url).send().await?;
        let response = check_status(response, "fetch invoice").await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self, record), fields(invoice_id = %record.id))]
    pub async fn create_invoice(&self, record: &InvoiceRecord) -> Result<InvoiceRecord, AppError> {
        let url = format!("{}/invoices", self.settings.url);
        let response = self.client.post(&url).json(record).send().await?;
        let response = check_status(response, "create invoice").await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self, record), fields(invoice_id = %id))]
    pub async fn update_invoice(
        &self,
        id: &str,
        record: &InvoiceRecord,
    ) -> Result<InvoiceRecord, AppError> {
        let url = format!("{}/invoices/{}", self.settings.url, encode_id(id));
        let response = self.client.put(&url).json(record).send().await?;
        let response = check_status(response, "update invoice").await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self), fields(invoice_id = %id))]
    pub async fn delete_invoice(&self, id: &str) -> Result<(), AppError> {
        let url = format!("{}/invoices/{}", self.settings.url, encode_id(id));
        let response = self.client.delete(&url).send().await?;
        check_status(response, "delete invoice").await?;
        Ok(())
    }

    /// Concurrent sibling deletes; the call resolves once every one finished.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn delete_invoices(&self, ids: &[String]) -> Result<(), AppError> {
        try_join_all(ids.iter().map(|id| self.delete_invoice(id))).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<ProductRecord>, AppError> {
        let url = format!("{}/products", self.settings.url);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response, "fetch products").await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self), fields(invoice_id = %invoice_id))]
    pub async fn products_by_invoice(
        &self,
        invoice_id: &str,
    ) -> Result<Vec<ProductRecord>, AppError> {
        let url = format!("{}/products", self.settings.url);
        let response = self
            .client
            .get(&url)
            .query(&[("invoiceId", invoice_id)])
            .send()
            .await?;
        let response = check_status(response, "fetch products").await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self, record), fields(invoice_id = %record.invoice_id))]
    pub async fn add_product(&self, record: &ProductRecord) -> Result<ProductRecord, AppError> {
        let url = format!("{}/products", self.settings.url);
        let response = self.client.post(&url).json(record).send().await?;
        let response = check_status(response, "add product").await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &str) -> Result<(), AppError> {
        let url = format!("{}/products/{}", self.settings.url, encode_id(id));
        let response = self.client.delete(&url).send().await?;
        check_status(response, "delete product").await?;
        Ok(())
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn delete_products(&self, ids: &[String]) -> Result<(), AppError> {
        try_join_all(ids.iter().map(|id| self.delete_product(id))).await?;
        Ok(())
    }
}

/// Invoice ids may carry a `#` prefix, which would otherwise become a URL
/// fragment.
fn encode_id(id: &str) -> String {
    id.replace('#', "%23")
}

async fn check_status(response: Response, action: &str) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::error!(status = %status, action, "Store request failed");

    if status == StatusCode::NOT_FOUND {
        Err(AppError::NotFound(anyhow::anyhow!(
            "Failed to {action}: not found"
        )))
    } else {
        Err(AppError::StoreError(anyhow::anyhow!(
            "Failed to {action}: {status} {body}"
        )))
    }
}
