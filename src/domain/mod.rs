//! Ledger entity types and the sparse-update patch representation.

pub mod account;
pub mod patch;
pub mod statement;
pub mod transaction;
pub mod vendor;

pub use account::{Account, AccountCategory, Side};
pub use patch::{AccountPatch, FieldPatch, StatementPatch, TransactionPatch, VendorPatch};
pub use statement::Statement;
pub use transaction::{Entry, Transaction};
pub use vendor::Vendor;
