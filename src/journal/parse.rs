//! Line-based parser for the directive log: the exact inverse of
//! [`super::format`].
//!
//! The parser establishes syntactic structure and field typing. Entity-level
//! invariants (balance, uniqueness, reference existence) are the consuming
//! store mutation's job and are not checked here.

use chrono::NaiveDate;

use crate::currency::{to_cents, Cents};
use crate::domain::{
    Account, AccountCategory, AccountPatch, Entry, FieldPatch, Statement, StatementPatch,
    Transaction, TransactionPatch, Vendor, VendorPatch,
};
use crate::errors::{LedgerError, Result};
use crate::ident::EntityKind;

use super::directive::{Action, Directive};

const ITEM_PREFIX: &str = "  - ";
const CONTINUATION_PREFIX: &str = "    ";

/// Parses a full log text into directives, in file order.
pub fn parse_log(text: &str) -> Result<Vec<Directive>> {
    split_blocks(text)
        .iter()
        .map(|block| parse_directive(block))
        .collect()
}

/// Splits log text into directive blocks (runs of non-empty lines).
pub fn split_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }
    blocks
}

/// Parses one directive block.
pub fn parse_directive(block: &str) -> Result<Directive> {
    let lines: Vec<&str> = block.lines().collect();
    let header = *lines
        .first()
        .ok_or_else(|| LedgerError::Format("empty directive block".into()))?;
    let (action, kind) = parse_header(header)?;
    let mut fields = parse_fields(&lines[1..])?;
    let directive = match (action, kind) {
        (Action::Create, EntityKind::Account) => Directive::CreateAccount(Account {
            id: fields.required("id")?,
            category: parse_category(&fields.required("category")?)?,
            name: fields.required("name")?,
            number: fields.optional("number")?,
            description: fields.optional("description")?,
        }),
        (Action::Update, EntityKind::Account) => Directive::UpdateAccount {
            id: fields.required("id")?,
            patch: AccountPatch {
                name: fields.replaceable("name")?,
                number: fields.patchable("number")?,
                description: fields.patchable("description")?,
            },
        },
        (Action::Delete, EntityKind::Account) => Directive::DeleteAccount {
            id: fields.required("id")?,
        },
        (Action::Create, EntityKind::Vendor) => Directive::CreateVendor(Vendor {
            id: fields.required("id")?,
            name: fields.required("name")?,
            description: fields.optional("description")?,
            default_account: fields.optional("default_account")?,
            is_active: fields.flag("is_active")?,
        }),
        (Action::Update, EntityKind::Vendor) => Directive::UpdateVendor {
            id: fields.required("id")?,
            patch: VendorPatch {
                name: fields.replaceable("name")?,
                description: fields.patchable("description")?,
                default_account: fields.patchable("default_account")?,
                is_active: fields.patchable_flag("is_active")?,
            },
        },
        (Action::Delete, EntityKind::Vendor) => Directive::DeleteVendor {
            id: fields.required("id")?,
        },
        (Action::Create, EntityKind::Transaction) => Directive::CreateTransaction(Transaction {
            id: fields.required("id")?,
            date: parse_date(&fields.required("date")?)?,
            code: fields.optional("code")?,
            vendor: fields.optional("vendor")?,
            description: fields.optional("description")?,
            entries: fields.entries()?.unwrap_or_default(),
        }),
        (Action::Update, EntityKind::Transaction) => Directive::UpdateTransaction {
            id: fields.required("id")?,
            patch: TransactionPatch {
                date: fields
                    .replaceable("date")?
                    .map(|text| parse_date(&text))
                    .transpose()?,
                code: fields.patchable("code")?,
                vendor: fields.patchable("vendor")?,
                description: fields.patchable("description")?,
                entries: fields.entries()?,
            },
        },
        (Action::Delete, EntityKind::Transaction) => Directive::DeleteTransaction {
            id: fields.required("id")?,
        },
        (Action::Create, EntityKind::Statement) => Directive::CreateStatement(Statement {
            id: fields.required("id")?,
            account: fields.required("account")?,
            begin_date: parse_date(&fields.required("begin_date")?)?,
            end_date: parse_date(&fields.required("end_date")?)?,
            begin_balance: parse_amount(&fields.required("begin_balance")?)?,
            end_balance: parse_amount(&fields.required("end_balance")?)?,
            is_reconciled: fields.flag("is_reconciled")?,
            transactions: fields.ids()?.unwrap_or_default(),
        }),
        (Action::Update, EntityKind::Statement) => Directive::UpdateStatement {
            id: fields.required("id")?,
            patch: StatementPatch {
                account: fields.replaceable("account")?,
                begin_date: fields
                    .replaceable("begin_date")?
                    .map(|text| parse_date(&text))
                    .transpose()?,
                end_date: fields
                    .replaceable("end_date")?
                    .map(|text| parse_date(&text))
                    .transpose()?,
                begin_balance: fields
                    .replaceable("begin_balance")?
                    .map(|text| parse_amount(&text))
                    .transpose()?,
                end_balance: fields
                    .replaceable("end_balance")?
                    .map(|text| parse_amount(&text))
                    .transpose()?,
                is_reconciled: fields.patchable_flag("is_reconciled")?,
                transactions: fields.ids()?,
            },
        },
        (Action::Delete, EntityKind::Statement) => Directive::DeleteStatement {
            id: fields.required("id")?,
        },
    };
    fields.finish()?;
    Ok(directive)
}

fn parse_header(header: &str) -> Result<(Action, EntityKind)> {
    let mut words = header.split_whitespace();
    let action = words.next().and_then(Action::from_str);
    let kind = words.next().and_then(EntityKind::from_label);
    match (action, kind, words.next()) {
        (Some(action), Some(kind), None) => Ok((action, kind)),
        _ => Err(LedgerError::UnknownDirective(header.to_string())),
    }
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| LedgerError::Format(format!("invalid date `{}`", text)))
}

fn parse_amount(text: &str) -> Result<Cents> {
    to_cents(text)
}

fn parse_category(text: &str) -> Result<AccountCategory> {
    AccountCategory::parse(text)
        .ok_or_else(|| LedgerError::Format(format!("invalid account category `{}`", text)))
}

fn parse_bool(text: &str) -> Result<bool> {
    match text {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(LedgerError::Format(format!("invalid boolean `{}`", other))),
    }
}

/// A raw field value as it appears in a block.
enum RawField {
    /// `key: value`, or a bare `key:` (None) meaning cleared.
    Scalar(Option<String>),
    Entries(Vec<Entry>),
    Ids(Vec<String>),
}

struct Fields {
    items: Vec<(String, RawField)>,
}

impl Fields {
    fn take(&mut self, key: &str) -> Option<RawField> {
        let index = self.items.iter().position(|(k, _)| k == key)?;
        Some(self.items.remove(index).1)
    }

    /// Required scalar: missing or cleared is a schema violation.
    fn required(&mut self, key: &str) -> Result<String> {
        match self.take(key) {
            Some(RawField::Scalar(Some(value))) => Ok(value),
            Some(RawField::Scalar(None)) => Err(LedgerError::Validation(format!(
                "field `{}` cannot be empty",
                key
            ))),
            Some(_) => Err(LedgerError::Format(format!("field `{}` must be scalar", key))),
            None => Err(LedgerError::Validation(format!(
                "missing required field `{}`",
                key
            ))),
        }
    }

    /// Optional scalar in a create block.
    fn optional(&mut self, key: &str) -> Result<Option<String>> {
        match self.take(key) {
            Some(RawField::Scalar(Some(value))) => Ok(Some(value)),
            Some(RawField::Scalar(None)) => Err(LedgerError::Validation(format!(
                "field `{}` cannot be empty",
                key
            ))),
            Some(_) => Err(LedgerError::Format(format!("field `{}` must be scalar", key))),
            None => Ok(None),
        }
    }

    /// Required field in an update block: replaceable but not clearable.
    fn replaceable(&mut self, key: &str) -> Result<Option<String>> {
        match self.take(key) {
            Some(RawField::Scalar(Some(value))) => Ok(Some(value)),
            Some(RawField::Scalar(None)) => Err(LedgerError::Validation(format!(
                "field `{}` cannot be cleared",
                key
            ))),
            Some(_) => Err(LedgerError::Format(format!("field `{}` must be scalar", key))),
            None => Ok(None),
        }
    }

    /// Clearable optional field in an update block.
    fn patchable(&mut self, key: &str) -> Result<FieldPatch<String>> {
        match self.take(key) {
            Some(RawField::Scalar(Some(value))) => Ok(FieldPatch::Set(value)),
            Some(RawField::Scalar(None)) => Ok(FieldPatch::Clear),
            Some(_) => Err(LedgerError::Format(format!("field `{}` must be scalar", key))),
            None => Ok(FieldPatch::Unchanged),
        }
    }

    /// Boolean in a create block: omission decodes as false.
    fn flag(&mut self, key: &str) -> Result<bool> {
        match self.take(key) {
            Some(RawField::Scalar(Some(value))) => parse_bool(&value),
            Some(_) => Err(LedgerError::Format(format!("field `{}` must be a boolean", key))),
            None => Ok(false),
        }
    }

    fn patchable_flag(&mut self, key: &str) -> Result<Option<bool>> {
        match self.take(key) {
            Some(RawField::Scalar(Some(value))) => parse_bool(&value).map(Some),
            Some(_) => Err(LedgerError::Format(format!("field `{}` must be a boolean", key))),
            None => Ok(None),
        }
    }

    fn entries(&mut self) -> Result<Option<Vec<Entry>>> {
        match self.take("entries") {
            Some(RawField::Entries(entries)) => Ok(Some(entries)),
            Some(_) => Err(LedgerError::Format("field `entries` must be a list".into())),
            None => Ok(None),
        }
    }

    fn ids(&mut self) -> Result<Option<Vec<String>>> {
        match self.take("transactions") {
            Some(RawField::Ids(ids)) => Ok(Some(ids)),
            Some(_) => Err(LedgerError::Format(
                "field `transactions` must be a list".into(),
            )),
            None => Ok(None),
        }
    }

    fn finish(self) -> Result<()> {
        match self.items.first() {
            Some((key, _)) => Err(LedgerError::Format(format!("unexpected field `{}`", key))),
            None => Ok(()),
        }
    }
}

fn parse_fields(lines: &[&str]) -> Result<Fields> {
    let mut items: Vec<(String, RawField)> = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if line.starts_with(' ') {
            return Err(LedgerError::Format(format!(
                "unexpected indentation: `{}`",
                line
            )));
        }
        let (key, value) = split_key_value(line)?;
        if items.iter().any(|(k, _)| k == key) {
            return Err(LedgerError::Format(format!("duplicate field `{}`", key)));
        }
        match key {
            "entries" => {
                if value.is_some() {
                    return Err(LedgerError::Format("field `entries` must be a list".into()));
                }
                let (entries, consumed) = parse_entry_items(&lines[i + 1..])?;
                items.push((key.to_string(), RawField::Entries(entries)));
                i += 1 + consumed;
            }
            "transactions" => {
                if value.is_some() {
                    return Err(LedgerError::Format(
                        "field `transactions` must be a list".into(),
                    ));
                }
                let mut ids = Vec::new();
                let mut consumed = 0;
                while let Some(item) = lines.get(i + 1 + consumed) {
                    let Some(id) = item.strip_prefix(ITEM_PREFIX) else {
                        break;
                    };
                    ids.push(id.to_string());
                    consumed += 1;
                }
                items.push((key.to_string(), RawField::Ids(ids)));
                i += 1 + consumed;
            }
            _ => {
                items.push((key.to_string(), RawField::Scalar(value)));
                i += 1;
            }
        }
    }
    Ok(Fields { items })
}

fn parse_entry_items(lines: &[&str]) -> Result<(Vec<Entry>, usize)> {
    let mut entries = Vec::new();
    let mut i = 0;
    while let Some(line) = lines.get(i) {
        let Some(head) = line.strip_prefix(ITEM_PREFIX) else {
            break;
        };
        let (key, value) = split_key_value(head)?;
        if key != "account" {
            return Err(LedgerError::Format(format!(
                "entry item must start with `account`, found `{}`",
                key
            )));
        }
        let account = value.ok_or_else(|| {
            LedgerError::Validation("field `account` cannot be empty".into())
        })?;
        let mut entry = Entry {
            account,
            debit: 0,
            credit: 0,
        };
        i += 1;
        while let Some(line) = lines.get(i) {
            if line.starts_with(ITEM_PREFIX) || !line.starts_with(CONTINUATION_PREFIX) {
                break;
            }
            let (key, value) = split_key_value(&line[CONTINUATION_PREFIX.len()..])?;
            let value = value.ok_or_else(|| {
                LedgerError::Validation(format!("field `{}` cannot be empty", key))
            })?;
            match key {
                "debit" => entry.debit = parse_amount(&value)?,
                "credit" => entry.credit = parse_amount(&value)?,
                other => {
                    return Err(LedgerError::Format(format!(
                        "unexpected entry field `{}`",
                        other
                    )))
                }
            }
            i += 1;
        }
        entries.push(entry);
    }
    Ok((entries, i))
}

/// Splits `key: value` / `key:` into a key and an optional value, stripping
/// one layer of double quotes from the value.
fn split_key_value(text: &str) -> Result<(&str, Option<String>)> {
    let colon = text
        .find(':')
        .ok_or_else(|| LedgerError::Format(format!("expected `key: value`, found `{}`", text)))?;
    let key = &text[..colon];
    if key.is_empty() || key.contains(' ') {
        return Err(LedgerError::Format(format!("invalid field key `{}`", key)));
    }
    let rest = &text[colon + 1..];
    if rest.is_empty() {
        return Ok((key, None));
    }
    let value = rest.strip_prefix(' ').ok_or_else(|| {
        LedgerError::Format(format!("expected a space after `{}:`", key))
    })?;
    if value.is_empty() {
        return Err(LedgerError::Format(format!(
            "trailing space after `{}:`",
            key
        )));
    }
    Ok((key, Some(unquote(value))))
}

fn unquote(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value[1..value.len() - 1].to_string()
    } else {
        value.to_string()
    }
}
