//! Request and response bodies for the command surface.

mod invoices;

pub use invoices::{
    DeleteInvoicesRequest, DiscountResponse, DiscountUpdate, InvoiceDraft, ListQuery, PreviewLine,
    PreviewLineAmount, PreviewRequest, PreviewResponse, ProductLineInput,
};
