//! Dual-write coordinator: commit to the store, then mirror to the log,
//! never the reverse.
//!
//! The log is strictly a consequence of a committed store mutation; it is
//! never written speculatively and never rolled back on its own. Mutations
//! take `&mut self`, so the commit-then-append pair is a critical section
//! under the single-writer model. Reads bypass the writer and go straight
//! to [`TeeWriter::store`]; the log has no read path.

use tracing::error;

use crate::domain::{
    Account, AccountPatch, Statement, StatementPatch, Transaction, TransactionPatch, Vendor,
    VendorPatch,
};
use crate::errors::{LedgerError, Result};
use crate::journal::{Directive, DirectiveSink};
use crate::store::LedgerStore;

pub struct TeeWriter {
    store: Box<dyn LedgerStore>,
    journal: Box<dyn DirectiveSink>,
    diverged: bool,
}

impl TeeWriter {
    pub fn new(store: Box<dyn LedgerStore>, journal: Box<dyn DirectiveSink>) -> Self {
        Self {
            store,
            journal,
            diverged: false,
        }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &dyn LedgerStore {
        self.store.as_ref()
    }

    /// Tears the writer apart, e.g. to rebuild the journal from the store.
    pub fn into_parts(self) -> (Box<dyn LedgerStore>, Box<dyn DirectiveSink>) {
        (self.store, self.journal)
    }

    pub fn create_account(&mut self, account: Account) -> Result<Account> {
        self.ensure_consistent()?;
        let created = self.store.create_account(account)?;
        self.mirror(Directive::CreateAccount(created.clone()))?;
        Ok(created)
    }

    pub fn update_account(&mut self, id: &str, patch: AccountPatch) -> Result<Account> {
        self.ensure_consistent()?;
        let updated = self.store.update_account(id, patch.clone())?;
        self.mirror(Directive::UpdateAccount {
            id: id.to_string(),
            patch,
        })?;
        Ok(updated)
    }

    pub fn delete_account(&mut self, id: &str) -> Result<()> {
        self.ensure_consistent()?;
        self.store.delete_account(id)?;
        self.mirror(Directive::DeleteAccount { id: id.to_string() })
    }

    pub fn create_vendor(&mut self, vendor: Vendor) -> Result<Vendor> {
        self.ensure_consistent()?;
        let created = self.store.create_vendor(vendor)?;
        self.mirror(Directive::CreateVendor(created.clone()))?;
        Ok(created)
    }

    pub fn update_vendor(&mut self, id: &str, patch: VendorPatch) -> Result<Vendor> {
        self.ensure_consistent()?;
        let updated = self.store.update_vendor(id, patch.clone())?;
        self.mirror(Directive::UpdateVendor {
            id: id.to_string(),
            patch,
        })?;
        Ok(updated)
    }

    pub fn delete_vendor(&mut self, id: &str) -> Result<()> {
        self.ensure_consistent()?;
        self.store.delete_vendor(id)?;
        self.mirror(Directive::DeleteVendor { id: id.to_string() })
    }

    pub fn create_transaction(&mut self, transaction: Transaction) -> Result<Transaction> {
        self.ensure_consistent()?;
        let created = self.store.create_transaction(transaction)?;
        self.mirror(Directive::CreateTransaction(created.clone()))?;
        Ok(created)
    }

    pub fn update_transaction(
        &mut self,
        id: &str,
        patch: TransactionPatch,
    ) -> Result<Transaction> {
        self.ensure_consistent()?;
        let updated = self.store.update_transaction(id, patch.clone())?;
        self.mirror(Directive::UpdateTransaction {
            id: id.to_string(),
            patch,
        })?;
        Ok(updated)
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<()> {
        self.ensure_consistent()?;
        self.store.delete_transaction(id)?;
        self.mirror(Directive::DeleteTransaction { id: id.to_string() })
    }

    pub fn create_statement(&mut self, statement: Statement) -> Result<Statement> {
        self.ensure_consistent()?;
        let created = self.store.create_statement(statement)?;
        self.mirror(Directive::CreateStatement(created.clone()))?;
        Ok(created)
    }

    pub fn update_statement(&mut self, id: &str, patch: StatementPatch) -> Result<Statement> {
        self.ensure_consistent()?;
        let updated = self.store.update_statement(id, patch.clone())?;
        self.mirror(Directive::UpdateStatement {
            id: id.to_string(),
            patch,
        })?;
        Ok(updated)
    }

    pub fn delete_statement(&mut self, id: &str) -> Result<()> {
        self.ensure_consistent()?;
        self.store.delete_statement(id)?;
        self.mirror(Directive::DeleteStatement { id: id.to_string() })
    }

    /// A failed append after a successful commit breaks the replay
    /// guarantee. The writer refuses all further mutations until rebuilt;
    /// continuing would silently widen the divergence.
    fn mirror(&mut self, directive: Directive) -> Result<()> {
        if let Err(err) = self.journal.append(&directive) {
            self.diverged = true;
            error!(
                entity = directive.entity_id(),
                %err,
                "journal append failed after store commit"
            );
            return Err(LedgerError::Divergence(format!(
                "journal append failed after committing `{}`: {}",
                directive.entity_id(),
                err
            )));
        }
        Ok(())
    }

    fn ensure_consistent(&self) -> Result<()> {
        if self.diverged {
            return Err(LedgerError::Divergence(
                "store and journal have diverged; mutations are halted".into(),
            ));
        }
        Ok(())
    }
}
