use chrono::NaiveDate;

use crate::currency::Cents;
use crate::domain::AccountCategory;
use crate::store::{LedgerStore, PostedEntry};

use super::balance_sheet::sorted_accounts;

/// One income-statement line, carrying the owning account's identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeLine {
    pub account_id: String,
    pub name: String,
    pub amount: Cents,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncomeStatement {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub income: Vec<IncomeLine>,
    pub expenses: Vec<IncomeLine>,
    pub total_income: Cents,
    pub total_expenses: Cents,
    pub net_income: Cents,
}

/// One contributing entry in the detail report: date, counterparty
/// description, signed amount.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailEntry {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Cents,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailLine {
    pub account_id: String,
    pub name: String,
    pub amount: Cents,
    pub entries: Vec<DetailEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncomeStatementDetails {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub income: Vec<DetailLine>,
    pub expenses: Vec<DetailLine>,
    pub total_income: Cents,
    pub total_expenses: Cents,
    pub net_income: Cents,
}

/// Sums every EXPENSE/INCOME account over `start ≤ date ≤ end`, netted by
/// natural side. `net_income == total_income - total_expenses` exactly.
pub fn income_statement(store: &dyn LedgerStore, start: NaiveDate, end: NaiveDate) -> IncomeStatement {
    let mut income = Vec::new();
    let mut expenses = Vec::new();
    for account in sorted_accounts(store) {
        let target = match account.category {
            AccountCategory::Income => &mut income,
            AccountCategory::Expense => &mut expenses,
            _ => continue,
        };
        let amount = store
            .postings_for_account(&account.id, Some(start), Some(end))
            .iter()
            .map(|posting| account.category.signed(posting.debit, posting.credit))
            .sum();
        target.push(IncomeLine {
            account_id: account.id.clone(),
            name: account.name.clone(),
            amount,
        });
    }
    let total_income = income.iter().map(|line| line.amount).sum::<Cents>();
    let total_expenses = expenses.iter().map(|line| line.amount).sum::<Cents>();
    IncomeStatement {
        start,
        end,
        income,
        expenses,
        total_income,
        total_expenses,
        net_income: total_income - total_expenses,
    }
}

/// Same grouping as [`income_statement`], with every contributing entry
/// attached. Per line, the entry amounts sum to the line total exactly.
pub fn income_statement_details(
    store: &dyn LedgerStore,
    start: NaiveDate,
    end: NaiveDate,
) -> IncomeStatementDetails {
    let mut income = Vec::new();
    let mut expenses = Vec::new();
    for account in sorted_accounts(store) {
        let target = match account.category {
            AccountCategory::Income => &mut income,
            AccountCategory::Expense => &mut expenses,
            _ => continue,
        };
        let entries: Vec<DetailEntry> = store
            .postings_for_account(&account.id, Some(start), Some(end))
            .iter()
            .map(|posting| DetailEntry {
                date: posting.date,
                description: counterparty(posting),
                amount: account.category.signed(posting.debit, posting.credit),
            })
            .collect();
        let amount = entries.iter().map(|entry| entry.amount).sum();
        target.push(DetailLine {
            account_id: account.id.clone(),
            name: account.name.clone(),
            amount,
            entries,
        });
    }
    let total_income = income.iter().map(|line| line.amount).sum::<Cents>();
    let total_expenses = expenses.iter().map(|line| line.amount).sum::<Cents>();
    IncomeStatementDetails {
        start,
        end,
        income,
        expenses,
        total_income,
        total_expenses,
        net_income: total_income - total_expenses,
    }
}

fn counterparty(posting: &PostedEntry) -> String {
    posting
        .vendor
        .clone()
        .or_else(|| posting.description.clone())
        .unwrap_or_default()
}
