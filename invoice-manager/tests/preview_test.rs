//! Preview totals and session discount behavior.

mod common;

use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn pen_preview_uses_the_default_discount() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .request(
            "POST",
            "/invoices/preview",
            Some(json!({
                "products": [ { "name": "Pen", "rate": 2.0, "quantity": 3 } ]
            })),
        )
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["discount_percentage"].as_f64(), Some(5.0));
    assert_eq!(body["subtotal"].as_f64(), Some(6.0));
    assert_eq!(body["discount_amount"].as_f64(), Some(0.3));
    assert_eq!(body["total"].as_f64(), Some(5.7));
    assert_eq!(body["products"][0]["amount"].as_f64(), Some(6.0));
}

#[tokio::test]
async fn malformed_line_numbers_coerce_to_zero() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .request(
            "POST",
            "/invoices/preview",
            Some(json!({
                "products": [
                    { "name": "Pen", "rate": "abc", "quantity": null },
                    { "name": "Notebook", "rate": 4.0, "quantity": "2" }
                ]
            })),
        )
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["products"][0]["amount"].as_f64(), Some(0.0));
    assert_eq!(body["subtotal"].as_f64(), Some(8.0));
}

#[tokio::test]
async fn explicit_discount_overrides_the_session_value() {
    let app = TestApp::spawn().await;

    let (_, body) = app
        .request(
            "POST",
            "/invoices/preview",
            Some(json!({
                "products": [ { "name": "Pen", "rate": 2.0, "quantity": 3 } ],
                "discount_percentage": 10
            })),
        )
        .await;

    assert_eq!(body["discount_percentage"].as_f64(), Some(10.0));
    assert_eq!(body["total"].as_f64(), Some(5.4));
}

#[tokio::test]
async fn empty_preview_yields_zero_totals() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .request("POST", "/invoices/preview", Some(json!({ "products": [] })))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["subtotal"].as_f64(), Some(0.0));
    assert_eq!(body["total"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn discount_update_applies_to_later_previews() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .request(
            "PUT",
            "/settings/discount",
            Some(json!({ "percentage": 10 })),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["discount_percentage"].as_f64(), Some(10.0));

    let (_, body) = app.request("GET", "/settings/discount", None).await;
    assert_eq!(body["discount_percentage"].as_f64(), Some(10.0));

    let (_, body) = app
        .request(
            "POST",
            "/invoices/preview",
            Some(json!({
                "products": [ { "name": "Pen", "rate": 2.0, "quantity": 3 } ]
            })),
        )
        .await;
    assert_eq!(body["total"].as_f64(), Some(5.4));
}

#[tokio::test]
async fn junk_discount_input_coerces_to_zero() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .request(
            "PUT",
            "/settings/discount",
            Some(json!({ "percentage": "abc" })),
        )
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["discount_percentage"].as_f64(), Some(0.0));
}
