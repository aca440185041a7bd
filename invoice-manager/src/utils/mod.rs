//! Pure helpers: totals, validation, sorting, search, id generation.

pub mod invoice_id;
pub mod search;
pub mod sorting;
pub mod totals;
pub mod validation;
