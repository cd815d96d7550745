//! Records returned by the back-office API.
//!
//! Every entity is owned by the remote server; these types only hold
//! request-scoped copies and the small amount of derived logic the client
//! needs (totals, status checks, date truncation).

pub mod activity;
pub mod amounts;
pub mod master;
pub mod period;
pub mod transaction;
pub mod user;

pub use activity::{ActivityFilter, ActivityLog};
pub use amounts::Amounts;
pub use master::{Goods, Kitchen, Supplier};
pub use period::Period;
pub use transaction::{BusinessDate, LineItem, Transaction, TransactionStatus};
pub use user::{Role, User};
