//! Read-only aggregate views over the store's entry and transaction data.
//!
//! Every computation nets amounts by the owning account category's natural
//! balance side; no report assumes a fixed sign. All arithmetic is integer
//! cents, so totals always equal the sum of their line items exactly.

pub mod balance_sheet;
pub mod income;
pub mod register;

pub use balance_sheet::{balance_sheet, BalanceSheet, ReportLine};
pub use income::{
    income_statement, income_statement_details, DetailEntry, DetailLine, IncomeLine,
    IncomeStatement, IncomeStatementDetails,
};
pub use register::{register, Register, RegisterRow, SPLIT_LABEL};
