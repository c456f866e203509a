use serde::{Deserialize, Serialize};

use crate::domain::{
    Account, AccountPatch, Statement, StatementPatch, Transaction, TransactionPatch, Vendor,
    VendorPatch,
};
use crate::ident::EntityKind;

/// The three mutation verbs a directive can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    pub fn from_str(text: &str) -> Option<Self> {
        match text {
            "create" => Some(Action::Create),
            "update" => Some(Action::Update),
            "delete" => Some(Action::Delete),
            _ => None,
        }
    }
}

/// One recorded mutation intent: the unit stored in the log.
///
/// Creates carry the full entity, updates carry only the changed fields,
/// deletes carry just the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Directive {
    CreateAccount(Account),
    UpdateAccount { id: String, patch: AccountPatch },
    DeleteAccount { id: String },
    CreateVendor(Vendor),
    UpdateVendor { id: String, patch: VendorPatch },
    DeleteVendor { id: String },
    CreateTransaction(Transaction),
    UpdateTransaction { id: String, patch: TransactionPatch },
    DeleteTransaction { id: String },
    CreateStatement(Statement),
    UpdateStatement { id: String, patch: StatementPatch },
    DeleteStatement { id: String },
}

impl Directive {
    pub fn action(&self) -> Action {
        match self {
            Directive::CreateAccount(_)
            | Directive::CreateVendor(_)
            | Directive::CreateTransaction(_)
            | Directive::CreateStatement(_) => Action::Create,
            Directive::UpdateAccount { .. }
            | Directive::UpdateVendor { .. }
            | Directive::UpdateTransaction { .. }
            | Directive::UpdateStatement { .. } => Action::Update,
            Directive::DeleteAccount { .. }
            | Directive::DeleteVendor { .. }
            | Directive::DeleteTransaction { .. }
            | Directive::DeleteStatement { .. } => Action::Delete,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Directive::CreateAccount(_)
            | Directive::UpdateAccount { .. }
            | Directive::DeleteAccount { .. } => EntityKind::Account,
            Directive::CreateVendor(_)
            | Directive::UpdateVendor { .. }
            | Directive::DeleteVendor { .. } => EntityKind::Vendor,
            Directive::CreateTransaction(_)
            | Directive::UpdateTransaction { .. }
            | Directive::DeleteTransaction { .. } => EntityKind::Transaction,
            Directive::CreateStatement(_)
            | Directive::UpdateStatement { .. }
            | Directive::DeleteStatement { .. } => EntityKind::Statement,
        }
    }

    /// Id of the entity this directive targets.
    pub fn entity_id(&self) -> &str {
        match self {
            Directive::CreateAccount(account) => &account.id,
            Directive::CreateVendor(vendor) => &vendor.id,
            Directive::CreateTransaction(transaction) => &transaction.id,
            Directive::CreateStatement(statement) => &statement.id,
            Directive::UpdateAccount { id, .. }
            | Directive::DeleteAccount { id }
            | Directive::UpdateVendor { id, .. }
            | Directive::DeleteVendor { id }
            | Directive::UpdateTransaction { id, .. }
            | Directive::DeleteTransaction { id }
            | Directive::UpdateStatement { id, .. }
            | Directive::DeleteStatement { id } => id,
        }
    }
}
