use chrono::NaiveDate;

use crate::currency::Cents;
use crate::errors::Result;
use crate::store::LedgerStore;

/// Fixed offset-column marker for transactions with more than two entries.
pub const SPLIT_LABEL: &str = "split";

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterRow {
    pub transaction_id: String,
    pub date: NaiveDate,
    pub code: Option<String>,
    pub description: Option<String>,
    /// The offsetting account's name, [`SPLIT_LABEL`] for a split, or empty
    /// for a degenerate one-sided row.
    pub offset: String,
    pub debit: Cents,
    pub credit: Cents,
    /// Amount signed by the account's natural side.
    pub amount: Cents,
    /// Running balance accumulated in forward chronological order.
    pub balance: Cents,
}

/// All activity for one account, most recent first.
#[derive(Debug, Clone, PartialEq)]
pub struct Register {
    pub account_id: String,
    pub account_name: String,
    pub rows: Vec<RegisterRow>,
}

/// Builds the register: forward chronological (date, then insertion
/// sequence) for balance accumulation, then reversed for presentation.
pub fn register(store: &dyn LedgerStore, account_id: &str) -> Result<Register> {
    let account = store.account(account_id)?;
    let mut balance: Cents = 0;
    let mut rows: Vec<RegisterRow> = store
        .postings_for_account(account_id, None, None)
        .into_iter()
        .map(|posting| {
            let amount = account.category.signed(posting.debit, posting.credit);
            balance += amount;
            let offset = match posting.siblings.len() {
                0 => String::new(),
                1 => posting.siblings[0].account_name.clone(),
                _ => SPLIT_LABEL.to_string(),
            };
            RegisterRow {
                transaction_id: posting.transaction_id,
                date: posting.date,
                code: posting.code,
                description: posting.vendor.or(posting.description),
                offset,
                debit: posting.debit,
                credit: posting.credit,
                amount,
                balance,
            }
        })
        .collect();
    rows.reverse();
    Ok(Register {
        account_id: account.id,
        account_name: account.name,
        rows,
    })
}
