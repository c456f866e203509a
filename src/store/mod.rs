//! The relational collaborator: per-entity CRUD plus the query primitives
//! the report engine is built on.
//!
//! The core depends only on this trait and its atomicity-per-transaction
//! guarantee, never on a concrete engine. [`MemoryStore`] is the reference
//! implementation used by replay tests and the report suites.

pub mod memory;

pub use memory::MemoryStore;

use chrono::NaiveDate;

use crate::currency::Cents;
use crate::domain::{
    Account, AccountPatch, Statement, StatementPatch, Transaction, TransactionPatch, Vendor,
    VendorPatch,
};
use crate::errors::Result;

/// One entry joined with its transaction header and the transaction's other
/// entries. `seq` is the store's monotonically increasing insertion
/// sequence: the tie-breaker that keeps same-day rows in entry order.
#[derive(Debug, Clone, PartialEq)]
pub struct PostedEntry {
    pub transaction_id: String,
    pub seq: u64,
    pub date: NaiveDate,
    pub code: Option<String>,
    pub vendor: Option<String>,
    pub description: Option<String>,
    pub account_id: String,
    pub account_name: String,
    pub debit: Cents,
    pub credit: Cents,
    pub siblings: Vec<SiblingEntry>,
}

/// A sibling posting line inside the same transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SiblingEntry {
    pub account_name: String,
    pub debit: Cents,
    pub credit: Cents,
}

/// Mutation and query contract the core is written against.
///
/// Name references (entry account, vendor default account, transaction
/// vendor, statement account) are resolved to ids at write time, so later
/// renames never orphan history. All failures are typed; implementations
/// never panic on bad input.
pub trait LedgerStore: Send {
    fn create_account(&mut self, account: Account) -> Result<Account>;
    fn update_account(&mut self, id: &str, patch: AccountPatch) -> Result<Account>;
    fn delete_account(&mut self, id: &str) -> Result<()>;
    fn account(&self, id: &str) -> Result<Account>;
    fn account_by_name(&self, name: &str) -> Option<Account>;
    fn accounts(&self) -> Vec<Account>;

    fn create_vendor(&mut self, vendor: Vendor) -> Result<Vendor>;
    fn update_vendor(&mut self, id: &str, patch: VendorPatch) -> Result<Vendor>;
    fn delete_vendor(&mut self, id: &str) -> Result<()>;
    fn vendor(&self, id: &str) -> Result<Vendor>;
    fn vendor_by_name(&self, name: &str) -> Option<Vendor>;
    fn vendors(&self) -> Vec<Vendor>;

    fn create_transaction(&mut self, transaction: Transaction) -> Result<Transaction>;
    fn update_transaction(&mut self, id: &str, patch: TransactionPatch) -> Result<Transaction>;
    fn delete_transaction(&mut self, id: &str) -> Result<()>;
    fn transaction(&self, id: &str) -> Result<Transaction>;
    fn transactions(&self) -> Vec<Transaction>;

    fn create_statement(&mut self, statement: Statement) -> Result<Statement>;
    fn update_statement(&mut self, id: &str, patch: StatementPatch) -> Result<Statement>;
    fn delete_statement(&mut self, id: &str) -> Result<()>;
    fn statement(&self, id: &str) -> Result<Statement>;
    fn statements(&self) -> Vec<Statement>;

    /// Entries for one account within an optional date range, ordered by
    /// date then insertion sequence.
    fn postings_for_account(
        &self,
        account_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Vec<PostedEntry>;
}
