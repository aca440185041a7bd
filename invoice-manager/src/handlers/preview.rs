//! Live preview totals and the session discount percentage.

use axum::{Json, extract::State};
use tracing::{info, instrument};

use crate::AppState;
use crate::dtos::{
    DiscountResponse, DiscountUpdate, PreviewLineAmount, PreviewRequest, PreviewResponse,
};
use crate::models::ProductLine;
use crate::utils::totals;

/// Recompute totals for a draft. Malformed line numbers already coerced to
/// zero at the boundary, so the preview itself cannot fail.
#[instrument(skip(state, payload))]
pub async fn preview_invoice(
    State(state): State<AppState>,
    Json(payload): Json<PreviewRequest>,
) -> Json<PreviewResponse> {
    let discount = match payload.discount_percentage {
        Some(discount) => discount,
        None => state.session.read().await.discount_percentage,
    };

    let lines: Vec<ProductLine> = payload
        .products
        .into_iter()
        .map(|line| line.into_line())
        .collect();

    let products = lines
        .iter()
        .map(|line| PreviewLineAmount {
            name: line.name.clone(),
            rate: line.rate,
            quantity: line.quantity,
            amount: line.amount().round_dp(2),
        })
        .collect();

    Json(PreviewResponse {
        products,
        discount_percentage: discount,
        totals: totals::calculate(&lines, discount).rounded(),
    })
}

pub async fn get_discount(State(state): State<AppState>) -> Json<DiscountResponse> {
    let session = state.session.read().await;
    Json(DiscountResponse {
        discount_percentage: session.discount_percentage,
    })
}

#[instrument(skip(state, payload))]
pub async fn set_discount(
    State(state): State<AppState>,
    Json(payload): Json<DiscountUpdate>,
) -> Json<DiscountResponse> {
    let mut session = state.session.write().await;
    session.discount_percentage = payload.percentage;
    info!(percentage = %payload.percentage, "Discount percentage updated");

    Json(DiscountResponse {
        discount_percentage: payload.percentage,
    })
}
