//! Transaction report aggregation.
//!
//! This module provides pure logic for the delivery report:
//! - Enrichment of line items from goods/supplier lookups
//! - Grouping by local date, then by supplier
//! - Per-supplier, per-date and grand totals
//! - The supplier-first view used for per-supplier sheets

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::{ReferenceIndex, ReportService};
pub use types::*;
