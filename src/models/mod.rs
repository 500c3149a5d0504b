pub mod invoice;
pub mod request;

pub use invoice::{
    Address, CustomerDetails, InvoiceData, InvoiceDetails, InvoiceRow, ProductDetails,
    StoredInvoice, Tax, TotalAmount,
};
pub use request::{GetInvoiceQuery, SubmitInvoiceRequest};
