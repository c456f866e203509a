mod common;

use ledger_core::reports::{
    balance_sheet, income_statement, income_statement_details, register, SPLIT_LABEL,
};

use common::{date, seeded_session};

#[test]
fn accounting_equation_holds_for_every_as_of_date() {
    let session = seeded_session();
    let store = session.tee.store();
    for as_of in [
        date(2024, 12, 31),
        date(2025, 1, 1),
        date(2025, 1, 19),
        date(2025, 1, 31),
    ] {
        let sheet = balance_sheet(store, as_of);
        assert_eq!(
            sheet.total_equity,
            sheet.total_assets - sheet.total_liabilities,
            "as of {as_of}"
        );
        assert_eq!(
            sheet.total_assets,
            sheet.assets.iter().map(|line| line.amount).sum::<i64>()
        );
        assert_eq!(
            sheet.total_equity,
            sheet.equity.iter().map(|line| line.amount).sum::<i64>()
        );
    }
}

#[test]
fn balance_sheet_folds_earnings_into_equity() {
    let session = seeded_session();
    let sheet = balance_sheet(session.tee.store(), date(2025, 1, 31));

    assert_eq!(sheet.total_assets, 341_580);
    assert_eq!(sheet.total_liabilities, 15_000);
    assert_eq!(sheet.total_equity, 326_580);

    let earnings = sheet
        .equity
        .iter()
        .find(|line| line.account_id.is_none())
        .expect("synthetic earnings line");
    assert_eq!(earnings.name, "Current Earnings");
    assert_eq!(earnings.amount, 226_580);

    // Before the month's activity, earnings are zero but the line is there.
    let opening = balance_sheet(session.tee.store(), date(2024, 12, 31));
    assert_eq!(opening.total_assets, 0);
    let earnings = opening
        .equity
        .iter()
        .find(|line| line.account_id.is_none())
        .expect("synthetic earnings line");
    assert_eq!(earnings.amount, 0);
}

#[test]
fn income_statement_totals_are_exact_sums() {
    let session = seeded_session();
    let statement = income_statement(session.tee.store(), date(2025, 1, 1), date(2025, 1, 31));

    assert_eq!(statement.total_income, 250_000);
    assert_eq!(statement.total_expenses, 23_420);
    assert_eq!(statement.net_income, 226_580);

    // Lines are name-sorted; expenses split across the two accounts.
    assert_eq!(statement.expenses.len(), 2);
    assert_eq!(statement.expenses[0].name, "Groceries");
    assert_eq!(statement.expenses[0].amount, 12_000);
    assert_eq!(statement.expenses[1].name, "Utilities:Electric");
    assert_eq!(statement.expenses[1].amount, 11_420);
    assert_eq!(statement.income.len(), 1);
    assert_eq!(statement.income[0].name, "Salary");
}

#[test]
fn detail_entries_sum_to_their_line_exactly() {
    let session = seeded_session();
    let details =
        income_statement_details(session.tee.store(), date(2025, 1, 1), date(2025, 1, 31));

    for line in details.income.iter().chain(details.expenses.iter()) {
        assert_eq!(
            line.amount,
            line.entries.iter().map(|entry| entry.amount).sum::<i64>(),
            "line {}",
            line.name
        );
    }

    let electric = details
        .expenses
        .iter()
        .find(|line| line.name == "Utilities:Electric")
        .unwrap();
    assert_eq!(electric.entries.len(), 2);
    // Counterparty falls back from vendor to the transaction description.
    assert_eq!(electric.entries[0].description, "City Power");
    assert_eq!(electric.entries[0].amount, 8_420);
    assert_eq!(electric.entries[1].description, "Weekly shop");
    assert_eq!(electric.entries[1].amount, 3_000);
}

#[test]
fn register_runs_its_balance_forward_and_presents_newest_first() {
    let session = seeded_session();
    let register = register(session.tee.store(), &session.ids.checking).unwrap();

    assert_eq!(register.account_name, "Checking");
    assert_eq!(register.rows.len(), 3);

    assert_eq!(register.rows[0].date, date(2025, 1, 20));
    assert_eq!(register.rows[0].code.as_deref(), Some("1043"));
    assert_eq!(register.rows[0].offset, "Utilities:Electric");
    assert_eq!(register.rows[0].credit, 8_420);
    assert_eq!(register.rows[0].amount, -8_420);
    assert_eq!(register.rows[0].balance, 341_580);

    assert_eq!(register.rows[1].date, date(2025, 1, 15));
    assert_eq!(register.rows[1].description.as_deref(), Some("Acme Corp"));
    assert_eq!(register.rows[1].offset, "Salary");
    assert_eq!(register.rows[1].balance, 350_000);

    assert_eq!(register.rows[2].date, date(2025, 1, 1));
    assert_eq!(register.rows[2].offset, "Opening Balances");
    assert_eq!(register.rows[2].balance, 100_000);
}

#[test]
fn same_date_rows_break_ties_by_insertion_order() {
    let session = seeded_session();
    let register = register(session.tee.store(), &session.ids.electric).unwrap();

    // Both rows fall on Jan 20; the split was entered after the bill, so it
    // presents first.
    assert_eq!(register.rows.len(), 2);
    assert_eq!(register.rows[0].transaction_id, session.ids.split_txn);
    assert_eq!(register.rows[0].balance, 11_420);
    assert_eq!(register.rows[1].transaction_id, session.ids.electric_txn);
    assert_eq!(register.rows[1].offset, "Checking");
    assert_eq!(register.rows[1].balance, 8_420);
}

#[test]
fn split_transactions_use_the_fixed_offset_marker() {
    let session = seeded_session();
    let register = register(session.tee.store(), &session.ids.visa).unwrap();

    assert_eq!(register.rows.len(), 1);
    let row = &register.rows[0];
    assert_eq!(row.offset, SPLIT_LABEL);
    assert!(!row.offset.contains("Groceries"));
    assert_eq!(row.credit, 15_000);
    assert_eq!(row.amount, 15_000);
    assert_eq!(row.balance, 15_000);
}
