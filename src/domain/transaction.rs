use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::currency::Cents;
use crate::ident::{self, EntityKind};

/// One debit-or-credit posting line. Exactly one side is non-zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Account reference by name, resolved by the store at write time.
    pub account: String,
    #[serde(default)]
    pub debit: Cents,
    #[serde(default)]
    pub credit: Cents,
}

impl Entry {
    pub fn debit(account: impl Into<String>, amount: Cents) -> Self {
        Self {
            account: account.into(),
            debit: amount,
            credit: 0,
        }
    }

    pub fn credit(account: impl Into<String>, amount: Cents) -> Self {
        Self {
            account: account.into(),
            debit: 0,
            credit: amount,
        }
    }

    pub fn is_one_sided(&self) -> bool {
        (self.debit != 0) != (self.credit != 0)
    }
}

/// A balanced set of at least two entries, created/updated/deleted as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    /// Check number or similar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Vendor reference by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub entries: Vec<Entry>,
}

impl Transaction {
    pub fn new(date: NaiveDate, entries: Vec<Entry>) -> Self {
        Self {
            id: ident::generate(EntityKind::Transaction),
            date,
            code: None,
            vendor: None,
            description: None,
            entries,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn total_debits(&self) -> Cents {
        self.entries.iter().map(|entry| entry.debit).sum()
    }

    pub fn total_credits(&self) -> Cents {
        self.entries.iter().map(|entry| entry.credit).sum()
    }
}
