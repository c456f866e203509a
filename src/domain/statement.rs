use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::currency::Cents;
use crate::ident::{self, EntityKind};

/// Groups transactions for bank-statement reconciliation. Does not itself
/// participate in debit/credit balancing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub id: String,
    /// Account reference by name.
    pub account: String,
    pub begin_date: NaiveDate,
    pub end_date: NaiveDate,
    pub begin_balance: Cents,
    pub end_balance: Cents,
    #[serde(default)]
    pub is_reconciled: bool,
    /// Ordered transaction-id references.
    #[serde(default)]
    pub transactions: Vec<String>,
}

impl Statement {
    pub fn new(
        account: impl Into<String>,
        begin_date: NaiveDate,
        end_date: NaiveDate,
        begin_balance: Cents,
        end_balance: Cents,
    ) -> Self {
        Self {
            id: ident::generate(EntityKind::Statement),
            account: account.into(),
            begin_date,
            end_date,
            begin_balance,
            end_balance,
            is_reconciled: false,
            transactions: Vec::new(),
        }
    }

    pub fn with_transactions(mut self, transactions: Vec<String>) -> Self {
        self.transactions = transactions;
        self
    }
}
