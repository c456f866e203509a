use chrono::NaiveDate;

use crate::currency::Cents;
use crate::domain::{Account, AccountCategory};
use crate::store::LedgerStore;

/// One balance-sheet line. The synthetic current-earnings line carries no
/// account id.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub account_id: Option<String>,
    pub name: String,
    pub amount: Cents,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSheet {
    pub as_of: NaiveDate,
    pub assets: Vec<ReportLine>,
    pub liabilities: Vec<ReportLine>,
    pub equity: Vec<ReportLine>,
    pub total_assets: Cents,
    pub total_liabilities: Cents,
    pub total_equity: Cents,
}

/// Sums every ASSET/LIABILITY/EQUITY account through the as-of date, netted
/// by natural side. Income and expense activity through the same date is
/// folded into a "Current Earnings" equity line, which is what makes the
/// accounting equation hold from independently summed line items.
pub fn balance_sheet(store: &dyn LedgerStore, as_of: NaiveDate) -> BalanceSheet {
    let mut assets = Vec::new();
    let mut liabilities = Vec::new();
    let mut equity = Vec::new();
    let mut earnings: Cents = 0;

    for account in sorted_accounts(store) {
        let amount = balance_through(store, &account, as_of);
        let line = ReportLine {
            account_id: Some(account.id.clone()),
            name: account.name.clone(),
            amount,
        };
        match account.category {
            AccountCategory::Asset => assets.push(line),
            AccountCategory::Liability => liabilities.push(line),
            AccountCategory::Equity => equity.push(line),
            AccountCategory::Income => earnings += amount,
            AccountCategory::Expense => earnings -= amount,
        }
    }
    equity.push(ReportLine {
        account_id: None,
        name: "Current Earnings".to_string(),
        amount: earnings,
    });

    let total_assets = assets.iter().map(|line| line.amount).sum();
    let total_liabilities = liabilities.iter().map(|line| line.amount).sum();
    let total_equity = equity.iter().map(|line| line.amount).sum();
    BalanceSheet {
        as_of,
        assets,
        liabilities,
        equity,
        total_assets,
        total_liabilities,
        total_equity,
    }
}

fn balance_through(store: &dyn LedgerStore, account: &Account, as_of: NaiveDate) -> Cents {
    store
        .postings_for_account(&account.id, None, Some(as_of))
        .iter()
        .map(|posting| account.category.signed(posting.debit, posting.credit))
        .sum()
}

pub(crate) fn sorted_accounts(store: &dyn LedgerStore) -> Vec<Account> {
    let mut accounts = store.accounts();
    accounts.sort_by(|a, b| a.name.cmp(&b.name));
    accounts
}
