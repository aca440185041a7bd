//! Comparator-based ordering of the invoice collection.

use std::cmp::Ordering;

use crate::models::Invoice;

/// Field a list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Email,
    Date,
    Status,
}

impl SortField {
    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "id" => Some(SortField::Id),
            "name" => Some(SortField::Name),
            "email" => Some(SortField::Email),
            "date" => Some(SortField::Date),
            "status" => Some(SortField::Status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Copy-then-sort: the source collection is untouched. Dates compare as
/// dates, strings case-insensitively; ties keep input order (stable sort).
pub fn sort_invoices(invoices: &[Invoice], field: SortField, order: SortOrder) -> Vec<Invoice> {
    let mut sorted = invoices.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = match field {
            SortField::Id => compare_ci(&a.id, &b.id),
            SortField::Name => compare_ci(&a.name, &b.name),
            SortField::Email => compare_ci(&a.email, &b.email),
            SortField::Date => a.date.cmp(&b.date),
            SortField::Status => compare_ci(a.status.as_str(), b.status.as_str()),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    sorted
}

fn compare_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
