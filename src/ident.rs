//! Type-prefixed unique identifiers.
//!
//! Every entity id is a fixed short prefix, an underscore, and a
//! collision-resistant random hex suffix of fixed length. Ids carry no
//! ordering semantics; ordering comes solely from log position.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the random hex suffix following the prefix.
pub const SUFFIX_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Account,
    Vendor,
    Transaction,
    Statement,
}

impl EntityKind {
    pub fn prefix(self) -> &'static str {
        match self {
            EntityKind::Account => "acct",
            EntityKind::Vendor => "vndr",
            EntityKind::Transaction => "trxn",
            EntityKind::Statement => "stmt",
        }
    }

    /// Lower-case label used in directive headers.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Account => "account",
            EntityKind::Vendor => "vendor",
            EntityKind::Transaction => "transaction",
            EntityKind::Statement => "statement",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "account" => Some(EntityKind::Account),
            "vendor" => Some(EntityKind::Vendor),
            "transaction" => Some(EntityKind::Transaction),
            "statement" => Some(EntityKind::Statement),
            _ => None,
        }
    }
}

/// Generates a fresh id for the given entity kind.
pub fn generate(kind: EntityKind) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}", kind.prefix(), &suffix[..SUFFIX_LEN])
}

/// Checks that a candidate id is well-formed for the given kind.
pub fn validate(kind: EntityKind, candidate: &str) -> bool {
    let Some(suffix) = candidate
        .strip_prefix(kind.prefix())
        .and_then(|rest| rest.strip_prefix('_'))
    else {
        return false;
    };
    suffix.len() == SUFFIX_LEN
        && suffix
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
