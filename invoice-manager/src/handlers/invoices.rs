//! Invoice CRUD commands.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use futures::future::try_join_all;
use invoice_core::error::AppError;
use tracing::{info, instrument};

use crate::AppState;
use crate::dtos::{DeleteInvoicesRequest, InvoiceDraft, ListQuery};
use crate::models::{Invoice, ProductLine, ProductRecord};
use crate::utils::sorting::{SortField, SortOrder};
use crate::utils::{search, sorting, validation};

/// List the collection, freshly fetched from the store, optionally filtered
/// by `q` and ordered by `sort`/`order`.
#[instrument(skip(state))]
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Invoice>>, AppError> {
    refresh_session(&state).await?;

    let session = state.session.read().await;
    let mut results = match query.q.as_deref() {
        Some(q) => search::search_invoices(&session.invoices, q),
        None => session.invoices.clone(),
    };

    if let Some(field) = query.sort.as_deref() {
        let field = SortField::from_string(field)
            .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Unknown sort field: {field}")))?;
        let order = match query.order.as_deref() {
            None => SortOrder::Asc,
            Some(order) => SortOrder::from_string(order)
                .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Unknown sort order: {order}")))?,
        };
        results = sorting::sort_invoices(&results, field, order);
    }

    Ok(Json(results))
}

#[instrument(skip(state, payload))]
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(payload): Json<InvoiceDraft>,
) -> Result<(StatusCode, Json<Invoice>), AppError> {
    validation::validate_draft(&payload).into_result()?;

    let mut invoice = payload.into_invoice()?;

    let record = state.store.create_invoice(&invoice.to_record()).await?;
    invoice.id = record.id;

    let lines = std::mem::take(&mut invoice.products);
    invoice.products = persist_lines(&state, &invoice.id, lines).await?;

    state.session.write().await.invoices.push(invoice.clone());
    info!(invoice_id = %invoice.id, "Invoice created");

    Ok((StatusCode::CREATED, Json(invoice)))
}

#[instrument(skip(state))]
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Invoice>, AppError> {
    let record = state.store.get_invoice(&id).await?;
    let products = state.store.products_by_invoice(&id).await?;
    Ok(Json(Invoice::from_records(record, products)))
}

/// Save changes to an existing invoice. The old product lines are fully
/// removed before the new ones are added; there is no rollback, so a failure
/// partway leaves the store and the session inconsistent until the next list.
#[instrument(skip(state, payload), fields(invoice_id = %id))]
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut payload): Json<InvoiceDraft>,
) -> Result<Json<Invoice>, AppError> {
    // The path id is authoritative; an echoed body id is not re-checked.
    payload.id = None;
    validation::validate_draft(&payload).into_result()?;

    let mut invoice = payload.into_invoice()?;
    invoice.id = id.clone();

    state.store.update_invoice(&id, &invoice.to_record()).await?;

    let existing = state.store.products_by_invoice(&id).await?;
    let old_ids: Vec<String> = existing.into_iter().filter_map(|p| p.id).collect();
    state.store.delete_products(&old_ids).await?;

    invoice.products = persist_lines(&state, &id, invoice.products).await?;

    let mut session = state.session.write().await;
    if let Some(slot) = session.invoices.iter_mut().find(|inv| inv.id == id) {
        *slot = invoice.clone();
    }
    info!(invoice_id = %id, "Invoice updated");

    Ok(Json(invoice))
}

#[instrument(skip(state))]
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    delete_invoice_cascade(&state, &id).await?;

    state.session.write().await.invoices.retain(|inv| inv.id != id);
    info!(invoice_id = %id, "Invoice deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Bulk delete; sibling invoices are removed concurrently.
#[instrument(skip(state, payload), fields(count = payload.ids.len()))]
pub async fn delete_invoices(
    State(state): State<AppState>,
    Json(payload): Json<DeleteInvoicesRequest>,
) -> Result<StatusCode, AppError> {
    if payload.ids.is_empty() {
        return Ok(StatusCode::NO_CONTENT);
    }

    let lines = try_join_all(
        payload
            .ids
            .iter()
            .map(|id| state.store.products_by_invoice(id)),
    )
    .await?;
    let line_ids: Vec<String> = lines
        .into_iter()
        .flatten()
        .filter_map(|product| product.id)
        .collect();

    state.store.delete_invoices(&payload.ids).await?;
    state.store.delete_products(&line_ids).await?;

    let mut session = state.session.write().await;
    session.invoices.retain(|inv| !payload.ids.contains(&inv.id));
    info!(count = payload.ids.len(), "Invoices deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Invoice>, AppError> {
    let mut record = state.store.get_invoice(&id).await?;
    record.favorite = !record.favorite;

    let record = state.store.update_invoice(&id, &record).await?;
    let products = state.store.products_by_invoice(&id).await?;
    let invoice = Invoice::from_records(record, products);

    let mut session = state.session.write().await;
    if let Some(slot) = session.invoices.iter_mut().find(|inv| inv.id == id) {
        *slot = invoice.clone();
    }
    info!(invoice_id = %id, favorite = invoice.favorite, "Favorite toggled");

    Ok(Json(invoice))
}

/// Re-fetch the whole collection from the store into the session cache.
async fn refresh_session(state: &AppState) -> Result<(), AppError> {
    let records = state.store.list_invoices().await?;
    let products = state.store.list_products().await?;

    let mut by_invoice: HashMap<String, Vec<ProductRecord>> = HashMap::new();
    for product in products {
        by_invoice
            .entry(product.invoice_id.clone())
            .or_default()
            .push(product);
    }

    let invoices: Vec<Invoice> = records
        .into_iter()
        .map(|record| {
            let lines = by_invoice.remove(&record.id).unwrap_or_default();
            Invoice::from_records(record, lines)
        })
        .collect();

    state.session.write().await.invoices = invoices;
    Ok(())
}

/// Persist product lines one by one, in program order.
async fn persist_lines(
    state: &AppState,
    invoice_id: &str,
    lines: Vec<ProductLine>,
) -> Result<Vec<ProductLine>, AppError> {
    let mut saved = Vec::with_capacity(lines.len());
    for line in &lines {
        let stored = state
            .store
            .add_product(&ProductRecord::from_line(invoice_id, line))
            .await?;
        saved.push(ProductLine::from(stored));
    }
    Ok(saved)
}

/// Remove an invoice together with every product line that belongs to it.
async fn delete_invoice_cascade(state: &AppState, id: &str) -> Result<(), AppError> {
    let products = state.store.products_by_invoice(id).await?;
    state.store.delete_invoice(id).await?;

    let product_ids: Vec<String> = products.into_iter().filter_map(|p| p.id).collect();
    state.store.delete_products(&product_ids).await?;
    Ok(())
}
