//! Exact integer-cents money handling and the canonical display grammar.
//!
//! Amounts render as `$#,###.##`, with negatives wrapped in parentheses
//! (`($#,###.##)`) and never a minus sign. Parsing is strict: anything that
//! `from_cents` would not itself produce is rejected.

use crate::errors::{LedgerError, Result};

/// Monetary amounts are integer cents everywhere inside the core.
pub type Cents = i64;

/// Renders integer cents in the canonical display form.
pub fn from_cents(cents: Cents) -> String {
    let magnitude = cents.unsigned_abs();
    let dollars = magnitude / 100;
    let fraction = magnitude % 100;
    let body = format!("${}.{:02}", group_digits(&dollars.to_string()), fraction);
    if cents < 0 {
        format!("({})", body)
    } else {
        body
    }
}

/// Parses a canonical display string back into integer cents.
///
/// Rejects minus signs, missing `$`, malformed grouping, leading zeros,
/// fractional parts that are not exactly two digits, and a parenthesized
/// zero (which would not survive the round trip).
pub fn to_cents(text: &str) -> Result<Cents> {
    let (body, negative) = match text.strip_prefix('(') {
        Some(inner) => (
            inner
                .strip_suffix(')')
                .ok_or_else(|| bad_amount(text, "unterminated parentheses"))?,
            true,
        ),
        None => (text, false),
    };
    let body = body
        .strip_prefix('$')
        .ok_or_else(|| bad_amount(text, "missing `$`"))?;
    let (int_part, frac_part) = body
        .split_once('.')
        .ok_or_else(|| bad_amount(text, "missing decimal point"))?;
    if frac_part.len() != 2 || !frac_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad_amount(text, "fraction must be exactly two digits"));
    }

    let groups: Vec<&str> = int_part.split(',').collect();
    let first = groups[0];
    if first.is_empty() || first.len() > 3 || !first.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad_amount(text, "malformed integer part"));
    }
    if first.starts_with('0') && (first.len() > 1 || groups.len() > 1) {
        return Err(bad_amount(text, "leading zero"));
    }
    for group in &groups[1..] {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad_amount(text, "grouping must be three digits"));
        }
    }

    let digits: String = groups.concat();
    let dollars: i64 = digits
        .parse()
        .map_err(|_| bad_amount(text, "integer part out of range"))?;
    let fraction: i64 = frac_part
        .parse()
        .map_err(|_| bad_amount(text, "malformed fraction"))?;
    let cents = dollars
        .checked_mul(100)
        .and_then(|d| d.checked_add(fraction))
        .ok_or_else(|| bad_amount(text, "amount out of range"))?;
    if negative && cents == 0 {
        return Err(bad_amount(text, "negative zero"));
    }
    Ok(if negative { -cents } else { cents })
}

fn bad_amount(text: &str, reason: &str) -> LedgerError {
    LedgerError::Format(format!("invalid amount `{}`: {}", text, reason))
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}
