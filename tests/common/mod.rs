#![allow(dead_code)]

//! Shared fixture: a realistic bookkeeping session driven through the
//! TeeWriter, with a journal file mirroring every committed mutation.

use chrono::NaiveDate;
use ledger_core::domain::{
    Account, AccountCategory, Entry, Statement, StatementPatch, Transaction, Vendor,
};
use ledger_core::journal::JournalFile;
use ledger_core::store::MemoryStore;
use ledger_core::tee::TeeWriter;
use tempfile::TempDir;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub struct SessionIds {
    pub checking: String,
    pub visa: String,
    pub opening: String,
    pub salary: String,
    pub electric: String,
    pub groceries: String,
    pub city_power: String,
    pub opening_txn: String,
    pub salary_txn: String,
    pub electric_txn: String,
    pub split_txn: String,
    pub statement: String,
}

pub struct Session {
    pub tee: TeeWriter,
    pub journal: JournalFile,
    pub ids: SessionIds,
    _temp: TempDir,
}

/// January of a small household ledger: six accounts, two vendors, four
/// transactions (two sharing a date, one a three-way split), and a
/// reconciled bank statement.
pub fn seeded_session() -> Session {
    let temp = TempDir::new().expect("temp dir");
    let journal = JournalFile::new(temp.path().join("ledger.log"));
    let mut tee = TeeWriter::new(
        Box::new(MemoryStore::new()),
        Box::new(journal.clone()),
    );

    let checking = tee
        .create_account(Account::new("Checking", AccountCategory::Asset).with_number("0042"))
        .expect("create Checking");
    let visa = tee
        .create_account(Account::new("Visa", AccountCategory::Liability))
        .expect("create Visa");
    let opening = tee
        .create_account(Account::new("Opening Balances", AccountCategory::Equity))
        .expect("create Opening Balances");
    let salary = tee
        .create_account(Account::new("Salary", AccountCategory::Income))
        .expect("create Salary");
    let electric = tee
        .create_account(Account::new("Utilities:Electric", AccountCategory::Expense))
        .expect("create Utilities:Electric");
    let groceries = tee
        .create_account(Account::new("Groceries", AccountCategory::Expense))
        .expect("create Groceries");

    let city_power = tee
        .create_vendor(Vendor::new("City Power").with_default_account("Utilities:Electric"))
        .expect("create City Power");
    tee.create_vendor(Vendor::new("Acme Corp"))
        .expect("create Acme Corp");

    let opening_txn = tee
        .create_transaction(
            Transaction::new(
                date(2025, 1, 1),
                vec![
                    Entry::debit("Checking", 100_000),
                    Entry::credit("Opening Balances", 100_000),
                ],
            )
            .with_description("Opening balance"),
        )
        .expect("opening transaction");
    let salary_txn = tee
        .create_transaction(
            Transaction::new(
                date(2025, 1, 15),
                vec![
                    Entry::debit("Checking", 250_000),
                    Entry::credit("Salary", 250_000),
                ],
            )
            .with_vendor("Acme Corp"),
        )
        .expect("salary transaction");
    let electric_txn = tee
        .create_transaction(
            Transaction::new(
                date(2025, 1, 20),
                vec![
                    Entry::debit("Utilities:Electric", 8_420),
                    Entry::credit("Checking", 8_420),
                ],
            )
            .with_vendor("City Power")
            .with_code("1043"),
        )
        .expect("electric transaction");
    let split_txn = tee
        .create_transaction(
            Transaction::new(
                date(2025, 1, 20),
                vec![
                    Entry::debit("Groceries", 12_000),
                    Entry::debit("Utilities:Electric", 3_000),
                    Entry::credit("Visa", 15_000),
                ],
            )
            .with_description("Weekly shop"),
        )
        .expect("split transaction");

    let statement = tee
        .create_statement(
            Statement::new("Checking", date(2025, 1, 1), date(2025, 1, 31), 0, 341_580)
                .with_transactions(vec![
                    opening_txn.id.clone(),
                    salary_txn.id.clone(),
                    electric_txn.id.clone(),
                ]),
        )
        .expect("create statement");
    tee.update_statement(
        &statement.id,
        StatementPatch {
            is_reconciled: Some(true),
            ..StatementPatch::default()
        },
    )
    .expect("reconcile statement");

    Session {
        tee,
        journal,
        ids: SessionIds {
            checking: checking.id,
            visa: visa.id,
            opening: opening.id,
            salary: salary.id,
            electric: electric.id,
            groceries: groceries.id,
            city_power: city_power.id,
            opening_txn: opening_txn.id,
            salary_txn: salary_txn.id,
            electric_txn: electric_txn.id,
            split_txn: split_txn.id,
            statement: statement.id,
        },
        _temp: temp,
    }
}
