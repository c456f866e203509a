//! Canonical directive-block formatter.
//!
//! One block per directive: a `<action> <kind>` header, then one line per
//! present field in fixed order (id first, collections last). Absent
//! optional fields produce no line; a cleared field in an update produces a
//! bare `key:` line; zero-valued entry sides are never emitted. Blocks are
//! separated by exactly one blank line and the log ends with a newline.

use crate::currency::{from_cents, Cents};
use crate::domain::{
    Account, AccountPatch, Entry, FieldPatch, Statement, StatementPatch, Transaction,
    TransactionPatch, Vendor, VendorPatch,
};

use super::directive::Directive;

/// Formats a whole log: blocks joined by one blank line, trailing newline.
pub fn format_log(directives: &[Directive]) -> String {
    let blocks: Vec<String> = directives.iter().map(format_directive).collect();
    let mut out = blocks.join("\n\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Formats one directive block, without a trailing newline.
pub fn format_directive(directive: &Directive) -> String {
    let mut lines = vec![format!(
        "{} {}",
        directive.action().as_str(),
        directive.kind().label()
    )];
    match directive {
        Directive::CreateAccount(account) => account_fields(&mut lines, account),
        Directive::UpdateAccount { id, patch } => account_patch_fields(&mut lines, id, patch),
        Directive::CreateVendor(vendor) => vendor_fields(&mut lines, vendor),
        Directive::UpdateVendor { id, patch } => vendor_patch_fields(&mut lines, id, patch),
        Directive::CreateTransaction(transaction) => transaction_fields(&mut lines, transaction),
        Directive::UpdateTransaction { id, patch } => {
            transaction_patch_fields(&mut lines, id, patch)
        }
        Directive::CreateStatement(statement) => statement_fields(&mut lines, statement),
        Directive::UpdateStatement { id, patch } => statement_patch_fields(&mut lines, id, patch),
        Directive::DeleteAccount { id }
        | Directive::DeleteVendor { id }
        | Directive::DeleteTransaction { id }
        | Directive::DeleteStatement { id } => scalar(&mut lines, "id", id),
    }
    lines.join("\n")
}

fn account_fields(lines: &mut Vec<String>, account: &Account) {
    scalar(lines, "id", &account.id);
    scalar(lines, "category", account.category.as_str());
    scalar(lines, "name", &account.name);
    optional(lines, "number", &account.number);
    optional(lines, "description", &account.description);
}

fn account_patch_fields(lines: &mut Vec<String>, id: &str, patch: &AccountPatch) {
    scalar(lines, "id", id);
    optional(lines, "name", &patch.name);
    patched(lines, "number", &patch.number);
    patched(lines, "description", &patch.description);
}

fn vendor_fields(lines: &mut Vec<String>, vendor: &Vendor) {
    scalar(lines, "id", &vendor.id);
    scalar(lines, "name", &vendor.name);
    optional(lines, "description", &vendor.description);
    optional(lines, "default_account", &vendor.default_account);
    flag(lines, "is_active", vendor.is_active);
}

fn vendor_patch_fields(lines: &mut Vec<String>, id: &str, patch: &VendorPatch) {
    scalar(lines, "id", id);
    optional(lines, "name", &patch.name);
    patched(lines, "description", &patch.description);
    patched(lines, "default_account", &patch.default_account);
    patched_flag(lines, "is_active", patch.is_active);
}

fn transaction_fields(lines: &mut Vec<String>, transaction: &Transaction) {
    scalar(lines, "id", &transaction.id);
    scalar(lines, "date", &transaction.date.format("%Y-%m-%d").to_string());
    optional(lines, "code", &transaction.code);
    optional(lines, "vendor", &transaction.vendor);
    optional(lines, "description", &transaction.description);
    entry_list(lines, &transaction.entries);
}

fn transaction_patch_fields(lines: &mut Vec<String>, id: &str, patch: &TransactionPatch) {
    scalar(lines, "id", id);
    if let Some(date) = patch.date {
        scalar(lines, "date", &date.format("%Y-%m-%d").to_string());
    }
    patched(lines, "code", &patch.code);
    patched(lines, "vendor", &patch.vendor);
    patched(lines, "description", &patch.description);
    if let Some(entries) = &patch.entries {
        if entries.is_empty() {
            lines.push("entries:".to_string());
        } else {
            entry_list(lines, entries);
        }
    }
}

fn statement_fields(lines: &mut Vec<String>, statement: &Statement) {
    scalar(lines, "id", &statement.id);
    scalar(lines, "account", &statement.account);
    scalar(
        lines,
        "begin_date",
        &statement.begin_date.format("%Y-%m-%d").to_string(),
    );
    scalar(
        lines,
        "end_date",
        &statement.end_date.format("%Y-%m-%d").to_string(),
    );
    amount(lines, "begin_balance", statement.begin_balance);
    amount(lines, "end_balance", statement.end_balance);
    flag(lines, "is_reconciled", statement.is_reconciled);
    id_list(lines, &statement.transactions);
}

fn statement_patch_fields(lines: &mut Vec<String>, id: &str, patch: &StatementPatch) {
    scalar(lines, "id", id);
    optional(lines, "account", &patch.account);
    if let Some(date) = patch.begin_date {
        scalar(lines, "begin_date", &date.format("%Y-%m-%d").to_string());
    }
    if let Some(date) = patch.end_date {
        scalar(lines, "end_date", &date.format("%Y-%m-%d").to_string());
    }
    if let Some(balance) = patch.begin_balance {
        amount(lines, "begin_balance", balance);
    }
    if let Some(balance) = patch.end_balance {
        amount(lines, "end_balance", balance);
    }
    patched_flag(lines, "is_reconciled", patch.is_reconciled);
    if let Some(transactions) = &patch.transactions {
        if transactions.is_empty() {
            lines.push("transactions:".to_string());
        } else {
            id_list(lines, transactions);
        }
    }
}

fn scalar(lines: &mut Vec<String>, key: &str, value: &str) {
    lines.push(format!("{}: {}", key, render_value(value)));
}

fn optional(lines: &mut Vec<String>, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        scalar(lines, key, value);
    }
}

fn patched(lines: &mut Vec<String>, key: &str, patch: &FieldPatch<String>) {
    match patch {
        FieldPatch::Unchanged => {}
        FieldPatch::Set(value) => scalar(lines, key, value),
        FieldPatch::Clear => lines.push(format!("{}:", key)),
    }
}

fn amount(lines: &mut Vec<String>, key: &str, cents: Cents) {
    lines.push(format!("{}: {}", key, from_cents(cents)));
}

// Create blocks carry booleans only when true; omission decodes as false.
fn flag(lines: &mut Vec<String>, key: &str, value: bool) {
    if value {
        lines.push(format!("{}: true", key));
    }
}

// Update blocks carry booleans whenever patched, so an explicit `false`
// survives the round trip.
fn patched_flag(lines: &mut Vec<String>, key: &str, value: Option<bool>) {
    if let Some(value) = value {
        lines.push(format!("{}: {}", key, value));
    }
}

fn entry_list(lines: &mut Vec<String>, entries: &[Entry]) {
    if entries.is_empty() {
        return;
    }
    lines.push("entries:".to_string());
    for entry in entries {
        lines.push(format!("  - account: {}", render_value(&entry.account)));
        if entry.debit != 0 {
            lines.push(format!("    debit: {}", from_cents(entry.debit)));
        }
        if entry.credit != 0 {
            lines.push(format!("    credit: {}", from_cents(entry.credit)));
        }
    }
}

fn id_list(lines: &mut Vec<String>, ids: &[String]) {
    if ids.is_empty() {
        return;
    }
    lines.push("transactions:".to_string());
    for id in ids {
        lines.push(format!("  - {}", id));
    }
}

/// Strings that would read back as a bare number (an all-digit check code,
/// say) are quoted; everything else is emitted bare.
fn render_value(value: &str) -> String {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}
