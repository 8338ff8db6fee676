use thiserror::Error;

#[derive(Debug, Error)]
pub enum PalletError {
    #[error("invoice {invoice_no} is not in the packing list")]
    UnknownInvoice { invoice_no: String },
    #[error("invoice {invoice_no} has no cartons")]
    EmptyBatch { invoice_no: String },
}

pub type Result<T> = std::result::Result<T, PalletError>;
