//! Domain models for invoice-manager.

mod invoice;
mod product;

pub use invoice::{Invoice, InvoiceRecord, InvoiceStatus};
pub use product::{lenient_decimal, lenient_optional_decimal, lenient_quantity};
pub use product::{ProductLine, ProductRecord};
