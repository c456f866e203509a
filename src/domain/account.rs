use serde::{Deserialize, Serialize};

use crate::currency::Cents;
use crate::ident::{self, EntityKind};

/// The five account categories. Fixed at creation; never changed by updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountCategory {
    Asset,
    Liability,
    Equity,
    Expense,
    Income,
}

/// The direction in which an account category's balance normally increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Debit,
    Credit,
}

impl AccountCategory {
    pub fn natural_side(self) -> Side {
        match self {
            AccountCategory::Asset | AccountCategory::Expense => Side::Debit,
            AccountCategory::Liability | AccountCategory::Equity | AccountCategory::Income => {
                Side::Credit
            }
        }
    }

    /// Nets a debit/credit pair by this category's natural side.
    pub fn signed(self, debit: Cents, credit: Cents) -> Cents {
        match self.natural_side() {
            Side::Debit => debit - credit,
            Side::Credit => credit - debit,
        }
    }

    /// Lower-case name used in the directive log.
    pub fn as_str(self) -> &'static str {
        match self {
            AccountCategory::Asset => "asset",
            AccountCategory::Liability => "liability",
            AccountCategory::Equity => "equity",
            AccountCategory::Expense => "expense",
            AccountCategory::Income => "income",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "asset" => Some(AccountCategory::Asset),
            "liability" => Some(AccountCategory::Liability),
            "equity" => Some(AccountCategory::Equity),
            "expense" => Some(AccountCategory::Expense),
            "income" => Some(AccountCategory::Income),
            _ => None,
        }
    }
}

/// A ledger account. Names are unique, colon-segmented hierarchical paths
/// such as `Utilities:Electric`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub category: AccountCategory,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Account {
    pub fn new(name: impl Into<String>, category: AccountCategory) -> Self {
        Self {
            id: ident::generate(EntityKind::Account),
            category,
            name: name.into(),
            number: None,
            description: None,
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
