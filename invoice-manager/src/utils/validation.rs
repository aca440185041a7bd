//! Field and aggregate validation for invoice drafts.
//!
//! Validation never throws: the outcome is a [`ValidationReport`] and callers
//! decide whether to abort. Messages are user-facing.

use chrono::{NaiveDate, Utc};
use invoice_core::error::ValidationReport;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use validator::Validate;

use crate::dtos::{InvoiceDraft, ProductLineInput};

/// Optional `#` prefix, then at least six digits.
static INVOICE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#?\d{6,}$").expect("invoice id regex"));

/// Validate a complete draft: metadata, every product line, and the
/// at-least-one-line aggregate rule.
pub fn validate_draft(draft: &InvoiceDraft) -> ValidationReport {
    let mut report = ValidationReport::new();

    if let Err(errors) = draft.validate() {
        report.merge_validator_errors(None, &errors);
    }

    // A blank id means "generate one", so only a provided value is checked.
    if let Some(id) = draft.id.as_deref().map(str::trim) {
        if !id.is_empty() && !INVOICE_ID_RE.is_match(id) {
            report.add(
                "id",
                "Invoice ID must be at least a 6-digit number with optional # prefix",
            );
        }
    }

    validate_date(&mut report, &draft.date);

    if draft.products.is_empty() {
        report.add("products", "At least one product is required");
    }
    for (index, line) in draft.products.iter().enumerate() {
        let line_report = validate_line(line);
        for (field, message) in line_report.errors {
            report.add(format!("products-{}.{}", index + 1, field), message);
        }
    }

    report
}

/// Validate a single product line.
pub fn validate_line(line: &ProductLineInput) -> ValidationReport {
    let mut report = ValidationReport::new();

    if let Err(errors) = line.validate() {
        report.merge_validator_errors(None, &errors);
    }
    if line.rate < Decimal::ZERO {
        report.add("rate", "Rate cannot be negative");
    }

    report
}

fn validate_date(report: &mut ValidationReport, raw: &str) {
    let raw = raw.trim();
    if raw.is_empty() {
        report.add("date", "Date is required");
        return;
    }
    match raw.parse::<NaiveDate>() {
        Ok(date) => {
            // Today is allowed; only strictly-future dates are rejected.
            if date > Utc::now().date_naive() {
                report.add("date", "Invoice date cannot be in the future");
            }
        }
        Err(_) => report.add("date", "Date must be a valid ISO date (YYYY-MM-DD)"),
    }
}
