use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::currency::Cents;
use crate::domain::{
    Account, AccountPatch, Entry, FieldPatch, Statement, StatementPatch, Transaction,
    TransactionPatch, Vendor, VendorPatch,
};
use crate::errors::{LedgerError, Result};
use crate::ident::{self, EntityKind};

use super::{LedgerStore, PostedEntry, SiblingEntry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct VendorRow {
    id: String,
    name: String,
    description: Option<String>,
    default_account_id: Option<String>,
    is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct EntryRow {
    account_id: String,
    debit: Cents,
    credit: Cents,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TransactionRow {
    id: String,
    seq: u64,
    date: NaiveDate,
    code: Option<String>,
    vendor_id: Option<String>,
    description: Option<String>,
    entries: Vec<EntryRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StatementRow {
    id: String,
    account_id: String,
    begin_date: NaiveDate,
    end_date: NaiveDate,
    begin_balance: Cents,
    end_balance: Cents,
    is_reconciled: bool,
    transactions: Vec<String>,
}

/// Vec-backed reference store. Rows hold resolved ids; the domain view
/// handed back to callers carries current names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    accounts: Vec<Account>,
    vendors: Vec<VendorRow>,
    transactions: Vec<TransactionRow>,
    statements: Vec<StatementRow>,
    next_seq: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a JSON snapshot of the full store, atomically (temp file then
    /// rename). Additive optimization only: replay-from-log remains the
    /// correctness-defining algorithm.
    pub fn save_snapshot(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        let tmp = tmp_path(path);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn load_snapshot(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn account_name(&self, id: &str) -> String {
        self.accounts
            .iter()
            .find(|account| account.id == id)
            .map(|account| account.name.clone())
            .unwrap_or_default()
    }

    fn resolve_account(&self, name: &str) -> Result<String> {
        self.accounts
            .iter()
            .find(|account| account.name == name)
            .map(|account| account.id.clone())
            .ok_or_else(|| LedgerError::Reference(format!("account `{}` not found", name)))
    }

    fn resolve_vendor(&self, name: &str) -> Result<String> {
        self.vendors
            .iter()
            .find(|vendor| vendor.name == name)
            .map(|vendor| vendor.id.clone())
            .ok_or_else(|| LedgerError::Reference(format!("vendor `{}` not found", name)))
    }

    fn validate_account_name(&self, exclude: Option<&str>, candidate: &str) -> Result<()> {
        validate_name_against(
            self.accounts.iter().map(|a| (a.id.as_str(), a.name.as_str())),
            exclude,
            candidate,
            "account",
        )
    }

    fn validate_vendor_name(&self, exclude: Option<&str>, candidate: &str) -> Result<()> {
        validate_name_against(
            self.vendors.iter().map(|v| (v.id.as_str(), v.name.as_str())),
            exclude,
            candidate,
            "vendor",
        )
    }

    fn validate_id(&self, kind: EntityKind, id: &str) -> Result<()> {
        if !ident::validate(kind, id) {
            return Err(LedgerError::Format(format!(
                "malformed {} id `{}`",
                kind.label(),
                id
            )));
        }
        let duplicate = match kind {
            EntityKind::Account => self.accounts.iter().any(|a| a.id == id),
            EntityKind::Vendor => self.vendors.iter().any(|v| v.id == id),
            EntityKind::Transaction => self.transactions.iter().any(|t| t.id == id),
            EntityKind::Statement => self.statements.iter().any(|s| s.id == id),
        };
        if duplicate {
            return Err(LedgerError::Validation(format!(
                "{} id `{}` already exists",
                kind.label(),
                id
            )));
        }
        Ok(())
    }

    /// Validates an entry set and resolves account names to ids.
    fn resolve_entries(&self, entries: &[Entry]) -> Result<Vec<EntryRow>> {
        if entries.len() < 2 {
            return Err(LedgerError::Validation(
                "transaction requires at least two entries".into(),
            ));
        }
        let mut rows = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry.debit < 0 || entry.credit < 0 {
                return Err(LedgerError::Validation(
                    "entry amounts cannot be negative".into(),
                ));
            }
            if !entry.is_one_sided() {
                return Err(LedgerError::Validation(
                    "entry must have exactly one of debit or credit".into(),
                ));
            }
            rows.push(EntryRow {
                account_id: self.resolve_account(&entry.account)?,
                debit: entry.debit,
                credit: entry.credit,
            });
        }
        let debits: Cents = entries.iter().map(|e| e.debit).sum();
        let credits: Cents = entries.iter().map(|e| e.credit).sum();
        if debits != credits {
            return Err(LedgerError::Validation(
                "debits and credits must balance".into(),
            ));
        }
        Ok(rows)
    }

    fn resolve_statement_transactions(&self, ids: &[String]) -> Result<Vec<String>> {
        for id in ids {
            if !self.transactions.iter().any(|t| &t.id == id) {
                return Err(LedgerError::Reference(format!(
                    "transaction `{}` not found",
                    id
                )));
            }
        }
        Ok(ids.to_vec())
    }

    fn vendor_view(&self, row: &VendorRow) -> Vendor {
        Vendor {
            id: row.id.clone(),
            name: row.name.clone(),
            description: row.description.clone(),
            default_account: row
                .default_account_id
                .as_deref()
                .map(|id| self.account_name(id)),
            is_active: row.is_active,
        }
    }

    fn transaction_view(&self, row: &TransactionRow) -> Transaction {
        Transaction {
            id: row.id.clone(),
            date: row.date,
            code: row.code.clone(),
            vendor: row.vendor_id.as_deref().map(|id| {
                self.vendors
                    .iter()
                    .find(|v| v.id == id)
                    .map(|v| v.name.clone())
                    .unwrap_or_default()
            }),
            description: row.description.clone(),
            entries: row
                .entries
                .iter()
                .map(|entry| Entry {
                    account: self.account_name(&entry.account_id),
                    debit: entry.debit,
                    credit: entry.credit,
                })
                .collect(),
        }
    }

    fn statement_view(&self, row: &StatementRow) -> Statement {
        Statement {
            id: row.id.clone(),
            account: self.account_name(&row.account_id),
            begin_date: row.begin_date,
            end_date: row.end_date,
            begin_balance: row.begin_balance,
            end_balance: row.end_balance,
            is_reconciled: row.is_reconciled,
            transactions: row.transactions.clone(),
        }
    }
}

fn validate_name_against<'a>(
    existing: impl Iterator<Item = (&'a str, &'a str)>,
    exclude: Option<&str>,
    candidate: &str,
    kind: &str,
) -> Result<()> {
    let normalized = candidate.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Err(LedgerError::Validation(format!(
            "{} name cannot be empty",
            kind
        )));
    }
    validate_text(&format!("{} name", kind), candidate)?;
    for (id, name) in existing {
        if exclude == Some(id) {
            continue;
        }
        if name.trim().to_ascii_lowercase() == normalized {
            return Err(LedgerError::Validation(format!(
                "{} `{}` already exists",
                kind, candidate
            )));
        }
    }
    Ok(())
}

// Committed strings must survive the journal's line-based grammar: no
// control characters, and never wrapped in double quotes (the formatter's
// quoting layer would strip them on read). Anything rejected here can
// therefore never poison the log.
fn validate_text(field: &str, value: &str) -> Result<()> {
    if value.chars().any(char::is_control) {
        return Err(LedgerError::Validation(format!(
            "field `{}` cannot contain control characters",
            field
        )));
    }
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return Err(LedgerError::Validation(format!(
            "field `{}` cannot be wrapped in double quotes",
            field
        )));
    }
    Ok(())
}

fn validate_optional_text(field: &str, value: &Option<String>) -> Result<()> {
    match value.as_deref() {
        Some("") => Err(LedgerError::Validation(format!(
            "field `{}` cannot be empty",
            field
        ))),
        Some(value) => validate_text(field, value),
        None => Ok(()),
    }
}

fn validate_text_patch(field: &str, patch: &FieldPatch<String>) -> Result<()> {
    match patch {
        FieldPatch::Set(value) if value.is_empty() => Err(LedgerError::Validation(format!(
            "field `{}` cannot be set to empty; clear it instead",
            field
        ))),
        FieldPatch::Set(value) => validate_text(field, value),
        _ => Ok(()),
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => "tmp".to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

impl LedgerStore for MemoryStore {
    fn create_account(&mut self, account: Account) -> Result<Account> {
        self.validate_id(EntityKind::Account, &account.id)?;
        self.validate_account_name(None, &account.name)?;
        validate_optional_text("number", &account.number)?;
        validate_optional_text("description", &account.description)?;
        self.accounts.push(account.clone());
        Ok(account)
    }

    fn update_account(&mut self, id: &str, patch: AccountPatch) -> Result<Account> {
        if let Some(name) = &patch.name {
            self.validate_account_name(Some(id), name)?;
        }
        validate_text_patch("number", &patch.number)?;
        validate_text_patch("description", &patch.description)?;
        let account = self
            .accounts
            .iter_mut()
            .find(|account| account.id == id)
            .ok_or_else(|| LedgerError::Reference(format!("account `{}` not found", id)))?;
        if let Some(name) = patch.name {
            account.name = name;
        }
        patch.number.apply(&mut account.number);
        patch.description.apply(&mut account.description);
        Ok(account.clone())
    }

    fn delete_account(&mut self, id: &str) -> Result<()> {
        if !self.accounts.iter().any(|account| account.id == id) {
            return Err(LedgerError::Reference(format!("account `{}` not found", id)));
        }
        // Fail-safe policy: any reference blocks deletion.
        let in_use = self
            .transactions
            .iter()
            .any(|txn| txn.entries.iter().any(|entry| entry.account_id == id))
            || self
                .vendors
                .iter()
                .any(|vendor| vendor.default_account_id.as_deref() == Some(id))
            || self.statements.iter().any(|stmt| stmt.account_id == id);
        if in_use {
            return Err(LedgerError::Validation("account is in use".into()));
        }
        self.accounts.retain(|account| account.id != id);
        Ok(())
    }

    fn account(&self, id: &str) -> Result<Account> {
        self.accounts
            .iter()
            .find(|account| account.id == id)
            .cloned()
            .ok_or_else(|| LedgerError::Reference(format!("account `{}` not found", id)))
    }

    fn account_by_name(&self, name: &str) -> Option<Account> {
        self.accounts.iter().find(|a| a.name == name).cloned()
    }

    fn accounts(&self) -> Vec<Account> {
        self.accounts.clone()
    }

    fn create_vendor(&mut self, vendor: Vendor) -> Result<Vendor> {
        self.validate_id(EntityKind::Vendor, &vendor.id)?;
        self.validate_vendor_name(None, &vendor.name)?;
        validate_optional_text("description", &vendor.description)?;
        let default_account_id = vendor
            .default_account
            .as_deref()
            .map(|name| self.resolve_account(name))
            .transpose()?;
        self.vendors.push(VendorRow {
            id: vendor.id.clone(),
            name: vendor.name.clone(),
            description: vendor.description.clone(),
            default_account_id,
            is_active: vendor.is_active,
        });
        Ok(vendor)
    }

    fn update_vendor(&mut self, id: &str, patch: VendorPatch) -> Result<Vendor> {
        if let Some(name) = &patch.name {
            self.validate_vendor_name(Some(id), name)?;
        }
        validate_text_patch("description", &patch.description)?;
        let default_account_id = match &patch.default_account {
            FieldPatch::Unchanged => None,
            FieldPatch::Set(name) => Some(Some(self.resolve_account(name)?)),
            FieldPatch::Clear => Some(None),
        };
        let row = self
            .vendors
            .iter_mut()
            .find(|vendor| vendor.id == id)
            .ok_or_else(|| LedgerError::Reference(format!("vendor `{}` not found", id)))?;
        if let Some(name) = patch.name {
            row.name = name;
        }
        patch.description.apply(&mut row.description);
        if let Some(resolved) = default_account_id {
            row.default_account_id = resolved;
        }
        if let Some(is_active) = patch.is_active {
            row.is_active = is_active;
        }
        let row = row.clone();
        Ok(self.vendor_view(&row))
    }

    fn delete_vendor(&mut self, id: &str) -> Result<()> {
        if !self.vendors.iter().any(|vendor| vendor.id == id) {
            return Err(LedgerError::Reference(format!("vendor `{}` not found", id)));
        }
        if self
            .transactions
            .iter()
            .any(|txn| txn.vendor_id.as_deref() == Some(id))
        {
            return Err(LedgerError::Validation("vendor is in use".into()));
        }
        self.vendors.retain(|vendor| vendor.id != id);
        Ok(())
    }

    fn vendor(&self, id: &str) -> Result<Vendor> {
        self.vendors
            .iter()
            .find(|vendor| vendor.id == id)
            .map(|row| self.vendor_view(row))
            .ok_or_else(|| LedgerError::Reference(format!("vendor `{}` not found", id)))
    }

    fn vendor_by_name(&self, name: &str) -> Option<Vendor> {
        self.vendors
            .iter()
            .find(|vendor| vendor.name == name)
            .map(|row| self.vendor_view(row))
    }

    fn vendors(&self) -> Vec<Vendor> {
        self.vendors.iter().map(|row| self.vendor_view(row)).collect()
    }

    fn create_transaction(&mut self, transaction: Transaction) -> Result<Transaction> {
        self.validate_id(EntityKind::Transaction, &transaction.id)?;
        validate_optional_text("code", &transaction.code)?;
        validate_optional_text("description", &transaction.description)?;
        let entries = self.resolve_entries(&transaction.entries)?;
        let vendor_id = transaction
            .vendor
            .as_deref()
            .map(|name| self.resolve_vendor(name))
            .transpose()?;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.transactions.push(TransactionRow {
            id: transaction.id.clone(),
            seq,
            date: transaction.date,
            code: transaction.code.clone(),
            vendor_id,
            description: transaction.description.clone(),
            entries,
        });
        Ok(transaction)
    }

    fn update_transaction(&mut self, id: &str, patch: TransactionPatch) -> Result<Transaction> {
        validate_text_patch("code", &patch.code)?;
        validate_text_patch("description", &patch.description)?;
        let entries = patch
            .entries
            .as_deref()
            .map(|entries| self.resolve_entries(entries))
            .transpose()?;
        let vendor_id = match &patch.vendor {
            FieldPatch::Unchanged => None,
            FieldPatch::Set(name) => Some(Some(self.resolve_vendor(name)?)),
            FieldPatch::Clear => Some(None),
        };
        let row = self
            .transactions
            .iter_mut()
            .find(|txn| txn.id == id)
            .ok_or_else(|| LedgerError::Reference(format!("transaction `{}` not found", id)))?;
        if let Some(date) = patch.date {
            row.date = date;
        }
        patch.code.apply(&mut row.code);
        patch.description.apply(&mut row.description);
        if let Some(resolved) = vendor_id {
            row.vendor_id = resolved;
        }
        if let Some(entries) = entries {
            // The entry set is replaced as a unit; the insertion sequence
            // stays with the transaction.
            row.entries = entries;
        }
        let row = row.clone();
        Ok(self.transaction_view(&row))
    }

    fn delete_transaction(&mut self, id: &str) -> Result<()> {
        if !self.transactions.iter().any(|txn| txn.id == id) {
            return Err(LedgerError::Reference(format!(
                "transaction `{}` not found",
                id
            )));
        }
        if self
            .statements
            .iter()
            .any(|stmt| stmt.transactions.iter().any(|t| t == id))
        {
            return Err(LedgerError::Validation(
                "transaction is referenced by a statement".into(),
            ));
        }
        self.transactions.retain(|txn| txn.id != id);
        Ok(())
    }

    fn transaction(&self, id: &str) -> Result<Transaction> {
        self.transactions
            .iter()
            .find(|txn| txn.id == id)
            .map(|row| self.transaction_view(row))
            .ok_or_else(|| LedgerError::Reference(format!("transaction `{}` not found", id)))
    }

    fn transactions(&self) -> Vec<Transaction> {
        self.transactions
            .iter()
            .map(|row| self.transaction_view(row))
            .collect()
    }

    fn create_statement(&mut self, statement: Statement) -> Result<Statement> {
        self.validate_id(EntityKind::Statement, &statement.id)?;
        if statement.begin_date > statement.end_date {
            return Err(LedgerError::Validation(
                "statement begin date must not be after end date".into(),
            ));
        }
        let account_id = self.resolve_account(&statement.account)?;
        let transactions = self.resolve_statement_transactions(&statement.transactions)?;
        self.statements.push(StatementRow {
            id: statement.id.clone(),
            account_id,
            begin_date: statement.begin_date,
            end_date: statement.end_date,
            begin_balance: statement.begin_balance,
            end_balance: statement.end_balance,
            is_reconciled: statement.is_reconciled,
            transactions,
        });
        Ok(statement)
    }

    fn update_statement(&mut self, id: &str, patch: StatementPatch) -> Result<Statement> {
        let account_id = patch
            .account
            .as_deref()
            .map(|name| self.resolve_account(name))
            .transpose()?;
        let transactions = patch
            .transactions
            .as_deref()
            .map(|ids| self.resolve_statement_transactions(ids))
            .transpose()?;
        let index = self
            .statements
            .iter()
            .position(|stmt| stmt.id == id)
            .ok_or_else(|| LedgerError::Reference(format!("statement `{}` not found", id)))?;
        // All validation happens before the first write so a rejected update
        // leaves the row untouched.
        let begin_date = patch.begin_date.unwrap_or(self.statements[index].begin_date);
        let end_date = patch.end_date.unwrap_or(self.statements[index].end_date);
        if begin_date > end_date {
            return Err(LedgerError::Validation(
                "statement begin date must not be after end date".into(),
            ));
        }
        let row = &mut self.statements[index];
        if let Some(account_id) = account_id {
            row.account_id = account_id;
        }
        row.begin_date = begin_date;
        row.end_date = end_date;
        if let Some(balance) = patch.begin_balance {
            row.begin_balance = balance;
        }
        if let Some(balance) = patch.end_balance {
            row.end_balance = balance;
        }
        if let Some(is_reconciled) = patch.is_reconciled {
            row.is_reconciled = is_reconciled;
        }
        if let Some(transactions) = transactions {
            row.transactions = transactions;
        }
        let row = row.clone();
        Ok(self.statement_view(&row))
    }

    fn delete_statement(&mut self, id: &str) -> Result<()> {
        if !self.statements.iter().any(|stmt| stmt.id == id) {
            return Err(LedgerError::Reference(format!(
                "statement `{}` not found",
                id
            )));
        }
        self.statements.retain(|stmt| stmt.id != id);
        Ok(())
    }

    fn statement(&self, id: &str) -> Result<Statement> {
        self.statements
            .iter()
            .find(|stmt| stmt.id == id)
            .map(|row| self.statement_view(row))
            .ok_or_else(|| LedgerError::Reference(format!("statement `{}` not found", id)))
    }

    fn statements(&self) -> Vec<Statement> {
        self.statements
            .iter()
            .map(|row| self.statement_view(row))
            .collect()
    }

    fn postings_for_account(
        &self,
        account_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Vec<PostedEntry> {
        let mut postings = Vec::new();
        for txn in &self.transactions {
            if from.is_some_and(|from| txn.date < from) || to.is_some_and(|to| txn.date > to) {
                continue;
            }
            for (index, entry) in txn.entries.iter().enumerate() {
                if entry.account_id != account_id {
                    continue;
                }
                let siblings = txn
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(other, _)| *other != index)
                    .map(|(_, sibling)| SiblingEntry {
                        account_name: self.account_name(&sibling.account_id),
                        debit: sibling.debit,
                        credit: sibling.credit,
                    })
                    .collect();
                postings.push(PostedEntry {
                    transaction_id: txn.id.clone(),
                    seq: txn.seq,
                    date: txn.date,
                    code: txn.code.clone(),
                    vendor: txn.vendor_id.as_deref().map(|id| {
                        self.vendors
                            .iter()
                            .find(|v| v.id == id)
                            .map(|v| v.name.clone())
                            .unwrap_or_default()
                    }),
                    description: txn.description.clone(),
                    account_id: entry.account_id.clone(),
                    account_name: self.account_name(&entry.account_id),
                    debit: entry.debit,
                    credit: entry.credit,
                    siblings,
                });
            }
        }
        postings.sort_by(|a, b| a.date.cmp(&b.date).then(a.seq.cmp(&b.seq)));
        postings
    }
}
