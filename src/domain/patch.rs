use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::currency::Cents;

use super::transaction::Entry;

/// Sparse update to one clearable optional field.
///
/// Distinguishes "field unchanged" from "field cleared", which emptiness
/// alone cannot express for strings that may legitimately become empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum FieldPatch<T> {
    #[default]
    Unchanged,
    Set(T),
    Clear,
}

impl<T> FieldPatch<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, FieldPatch::Unchanged)
    }

    /// Applies this patch to an optional slot.
    pub fn apply(self, slot: &mut Option<T>) {
        match self {
            FieldPatch::Unchanged => {}
            FieldPatch::Set(value) => *slot = Some(value),
            FieldPatch::Clear => *slot = None,
        }
    }
}

/// Partial update to an account. Category is fixed at creation and has no
/// patch field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub number: FieldPatch<String>,
    pub description: FieldPatch<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorPatch {
    pub name: Option<String>,
    pub description: FieldPatch<String>,
    pub default_account: FieldPatch<String>,
    pub is_active: Option<bool>,
}

/// Partial update to a transaction. A present `entries` replaces the whole
/// entry set atomically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub code: FieldPatch<String>,
    pub vendor: FieldPatch<String>,
    pub description: FieldPatch<String>,
    pub entries: Option<Vec<Entry>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementPatch {
    pub account: Option<String>,
    pub begin_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub begin_balance: Option<Cents>,
    pub end_balance: Option<Cents>,
    pub is_reconciled: Option<bool>,
    pub transactions: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_patch_distinguishes_clear_from_unchanged() {
        let mut slot = Some("old".to_string());
        FieldPatch::Unchanged.apply(&mut slot);
        assert_eq!(slot.as_deref(), Some("old"));
        FieldPatch::Set("new".to_string()).apply(&mut slot);
        assert_eq!(slot.as_deref(), Some("new"));
        FieldPatch::<String>::Clear.apply(&mut slot);
        assert_eq!(slot, None);
    }
}
