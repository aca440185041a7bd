//! Case-insensitive substring search over the invoice collection.

use crate::models::Invoice;

/// Match against id, name, email, ISO date and status. An empty or blank
/// query returns the collection unchanged; relative order is preserved.
pub fn search_invoices(invoices: &[Invoice], query: &str) -> Vec<Invoice> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return invoices.to_vec();
    }

    invoices
        .iter()
        .filter(|invoice| matches(invoice, &needle))
        .cloned()
        .collect()
}

fn matches(invoice: &Invoice, needle: &str) -> bool {
    invoice.id.to_lowercase().contains(needle)
        || invoice.name.to_lowercase().contains(needle)
        || invoice.email.to_lowercase().contains(needle)
        || invoice.date.format("%Y-%m-%d").to_string().contains(needle)
        || invoice.status.as_str().to_lowercase().contains(needle)
}
