mod common;

use ledger_core::domain::{Account, AccountCategory, Entry, Transaction};
use ledger_core::errors::{LedgerError, Result};
use ledger_core::journal::{Directive, DirectiveSink, JournalFile};
use ledger_core::replay::replay_log;
use ledger_core::store::{LedgerStore, MemoryStore};
use ledger_core::tee::TeeWriter;
use tempfile::tempdir;

use common::{date, seeded_session};

/// Drives one parsed directive back through the writer's mutation API.
fn apply(tee: &mut TeeWriter, directive: Directive) -> Result<()> {
    match directive {
        Directive::CreateAccount(account) => tee.create_account(account).map(|_| ()),
        Directive::UpdateAccount { id, patch } => tee.update_account(&id, patch).map(|_| ()),
        Directive::DeleteAccount { id } => tee.delete_account(&id),
        Directive::CreateVendor(vendor) => tee.create_vendor(vendor).map(|_| ()),
        Directive::UpdateVendor { id, patch } => tee.update_vendor(&id, patch).map(|_| ()),
        Directive::DeleteVendor { id } => tee.delete_vendor(&id),
        Directive::CreateTransaction(transaction) => {
            tee.create_transaction(transaction).map(|_| ())
        }
        Directive::UpdateTransaction { id, patch } => {
            tee.update_transaction(&id, patch).map(|_| ())
        }
        Directive::DeleteTransaction { id } => tee.delete_transaction(&id),
        Directive::CreateStatement(statement) => tee.create_statement(statement).map(|_| ()),
        Directive::UpdateStatement { id, patch } => tee.update_statement(&id, patch).map(|_| ()),
        Directive::DeleteStatement { id } => tee.delete_statement(&id),
    }
}

#[test]
fn replaying_the_log_reproduces_it_byte_for_byte() {
    let session = seeded_session();
    let original = session.journal.read_text().unwrap();

    let temp = tempdir().unwrap();
    let copy = JournalFile::new(temp.path().join("copy.log"));
    let mut tee = TeeWriter::new(Box::new(MemoryStore::new()), Box::new(copy.clone()));
    for directive in session.journal.read_all().unwrap() {
        apply(&mut tee, directive).unwrap();
    }

    assert_eq!(copy.read_text().unwrap(), original);
}

#[test]
fn rejected_mutation_writes_nothing() {
    let mut session = seeded_session();
    let before = session.journal.read_text().unwrap();

    let err = session
        .tee
        .create_account(Account::new("checking", AccountCategory::Asset))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    assert_eq!(session.journal.read_text().unwrap(), before);
}

#[test]
fn delete_is_blocked_while_referenced_and_allowed_after() {
    let mut session = seeded_session();
    session
        .tee
        .create_account(Account::new("Expenses:Test", AccountCategory::Expense))
        .unwrap();
    let txn = session
        .tee
        .create_transaction(Transaction::new(
            date(2025, 2, 1),
            vec![
                Entry::debit("Expenses:Test", 5_000),
                Entry::credit("Checking", 5_000),
            ],
        ))
        .unwrap();
    let account_id = session
        .tee
        .store()
        .account_by_name("Expenses:Test")
        .unwrap()
        .id;

    let err = session.tee.delete_account(&account_id).unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert!(err.to_string().contains("in use"));

    session.tee.delete_transaction(&txn.id).unwrap();
    session.tee.delete_account(&account_id).unwrap();
    assert!(session.tee.store().account_by_name("Expenses:Test").is_none());
}

#[test]
fn vendor_and_statement_references_block_deletion() {
    let mut session = seeded_session();

    let err = session.tee.delete_vendor(&session.ids.city_power).unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    // The opening transaction sits on the seeded statement.
    let opening_txn = session.ids.opening_txn.clone();
    let err = session.tee.delete_transaction(&opening_txn).unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    session.tee.delete_statement(&session.ids.statement.clone()).unwrap();
    session.tee.delete_transaction(&opening_txn).unwrap();
}

#[test]
fn text_the_log_cannot_represent_never_commits() {
    let mut session = seeded_session();
    let before = session.journal.read_text().unwrap();

    let multiline = Transaction::new(
        date(2025, 2, 2),
        vec![
            Entry::debit("Groceries", 100),
            Entry::credit("Checking", 100),
        ],
    )
    .with_description("line one\nline two");
    let err = session.tee.create_transaction(multiline).unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    let empty = Transaction::new(
        date(2025, 2, 2),
        vec![
            Entry::debit("Groceries", 100),
            Entry::credit("Checking", 100),
        ],
    )
    .with_description("");
    let err = session.tee.create_transaction(empty).unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    // Nothing reached the journal, and what is there still replays cleanly.
    assert_eq!(session.journal.read_text().unwrap(), before);
    let mut store = MemoryStore::new();
    replay_log(&before, &mut store).unwrap();
}

struct FailingSink;

impl DirectiveSink for FailingSink {
    fn append(&mut self, _directive: &Directive) -> Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into())
    }
}

#[test]
fn append_failure_poisons_the_writer() {
    let mut tee = TeeWriter::new(Box::new(MemoryStore::new()), Box::new(FailingSink));

    let err = tee
        .create_account(Account::new("Checking", AccountCategory::Asset))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Divergence(_)));

    // The store commit went through before the append failed.
    assert!(tee.store().account_by_name("Checking").is_some());

    // Every later mutation is refused outright; the store stays put.
    let err = tee
        .create_account(Account::new("Savings", AccountCategory::Asset))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Divergence(_)));
    assert!(tee.store().account_by_name("Savings").is_none());
}
