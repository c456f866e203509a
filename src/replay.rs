//! Deterministic reconstruction of ledger state from the directive log.
//!
//! Replay is a strict left-to-right fold: no reordering, batching, or
//! deduplication. Any failure aborts with the 1-based position of the
//! offending directive; callers must treat that as a fatal start-up
//! condition, since the store now holds partial state.

use tracing::info;

use crate::errors::Result;
use crate::journal::{parse_directive, split_blocks, Directive};
use crate::store::LedgerStore;

/// Applies every directive in order. Returns the number applied.
pub fn replay(directives: &[Directive], store: &mut dyn LedgerStore) -> Result<usize> {
    info!(count = directives.len(), "replaying directive log");
    for (index, directive) in directives.iter().enumerate() {
        apply(directive, store).map_err(|err| err.at_position(index + 1))?;
    }
    info!(count = directives.len(), "replay complete");
    Ok(directives.len())
}

/// Parses and applies a full log text. Parse failures carry the position of
/// the block that failed, just like application failures.
pub fn replay_log(text: &str, store: &mut dyn LedgerStore) -> Result<usize> {
    let blocks = split_blocks(text);
    info!(count = blocks.len(), "replaying directive log");
    for (index, block) in blocks.iter().enumerate() {
        let directive = parse_directive(block).map_err(|err| err.at_position(index + 1))?;
        apply(&directive, store).map_err(|err| err.at_position(index + 1))?;
    }
    info!(count = blocks.len(), "replay complete");
    Ok(blocks.len())
}

fn apply(directive: &Directive, store: &mut dyn LedgerStore) -> Result<()> {
    match directive {
        Directive::CreateAccount(account) => {
            store.create_account(account.clone())?;
        }
        Directive::UpdateAccount { id, patch } => {
            store.update_account(id, patch.clone())?;
        }
        Directive::DeleteAccount { id } => store.delete_account(id)?,
        Directive::CreateVendor(vendor) => {
            store.create_vendor(vendor.clone())?;
        }
        Directive::UpdateVendor { id, patch } => {
            store.update_vendor(id, patch.clone())?;
        }
        Directive::DeleteVendor { id } => store.delete_vendor(id)?,
        Directive::CreateTransaction(transaction) => {
            store.create_transaction(transaction.clone())?;
        }
        Directive::UpdateTransaction { id, patch } => {
            store.update_transaction(id, patch.clone())?;
        }
        Directive::DeleteTransaction { id } => store.delete_transaction(id)?,
        Directive::CreateStatement(statement) => {
            store.create_statement(statement.clone())?;
        }
        Directive::UpdateStatement { id, patch } => {
            store.update_statement(id, patch.clone())?;
        }
        Directive::DeleteStatement { id } => store.delete_statement(id)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Account, AccountCategory, Entry, Transaction};
    use crate::errors::LedgerError;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    #[test]
    fn aborts_with_the_offending_position() {
        let checking = Account::new("Checking", AccountCategory::Asset);
        let orphan = Transaction::new(
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            vec![
                Entry::debit("No:Such:Account", 100),
                Entry::credit("Checking", 100),
            ],
        );
        let directives = vec![
            Directive::CreateAccount(checking),
            Directive::CreateTransaction(orphan),
        ];

        let mut store = MemoryStore::new();
        let err = replay(&directives, &mut store).unwrap_err();
        match err {
            LedgerError::Replay { position, source } => {
                assert_eq!(position, 2);
                assert!(matches!(*source, LedgerError::Reference(_)));
            }
            other => panic!("expected replay error, got {other:?}"),
        }
    }
}
