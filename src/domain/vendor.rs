use serde::{Deserialize, Serialize};

use crate::ident::{self, EntityKind};

/// A counterparty. The optional default account is referenced by name and
/// resolved by the store at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_account: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl Vendor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ident::generate(EntityKind::Vendor),
            name: name.into(),
            description: None,
            default_account: None,
            is_active: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default_account(mut self, account: impl Into<String>) -> Self {
        self.default_account = Some(account.into());
        self
    }
}
