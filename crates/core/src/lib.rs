//! Core domain logic for Pasok.
//!
//! This crate contains pure logic with ZERO http or file-format dependencies.
//! All domain records, validation rules, and report calculations live here.
//!
//! # Modules
//!
//! - `domain` - Records returned by the back-office API
//! - `validation` - Form validation for create/update inputs
//! - `reports` - Transaction aggregation by date and supplier
//! - `receipt` - Per-supplier receipts and template selection
//! - `bulk` - Outcome bookkeeping for bulk uploads

pub mod bulk;
pub mod domain;
pub mod receipt;
pub mod reports;
pub mod validation;
