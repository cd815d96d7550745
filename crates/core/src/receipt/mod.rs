//! Per-supplier receipts ("nota").
//!
//! A transaction prints one receipt per supplier that appears in it. Each
//! supplier gets a visual template picked by substring match on its name.

pub mod builder;
pub mod error;
pub mod template;

pub use builder::{ReceiptBuilder, ReceiptLine, SupplierReceipt};
pub use error::ReceiptError;
pub use template::{TemplateKind, TemplateRule, TemplateSelector};
