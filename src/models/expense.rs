//! Expense submission bodies and the processed records derived from them.
//!
//! An [`ExpenseBody`] arrives from a client with a total, a split policy,
//! payer contributions, and per-participant split inputs. The split
//! processor validates it and materializes a [`ProcessedExpense`] whose
//! records are persisted atomically with the parent expense (and fully
//! replaced on update).

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an expense total is divided among its participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SplitType {
    /// Even division, with leftover cents going to the earliest participants.
    Equal,
    /// Every owed amount is supplied explicitly and must sum to the total.
    Exact,
    /// Owed amounts derived from percent weights summing to 100.
    Percentage,
    /// Owed amounts derived proportionally from share weights.
    Share,
}

impl SplitType {
    /// Returns the wire-format policy name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitType::Equal => "EQUAL",
            SplitType::Exact => "EXACT",
            SplitType::Percentage => "PERCENTAGE",
            SplitType::Share => "SHARE",
        }
    }
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An expense submission body, as received from a client.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseBody {
    /// Group the expense belongs to, if any.
    #[serde(default)]
    pub group_id: Option<String>,
    /// Counterparty for a non-group (friend) expense.
    #[serde(default)]
    pub friend_id: Option<String>,
    pub description: String,
    /// Total expense amount, as a decimal string.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// Expense date, passed through untouched.
    pub date: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub receipt_url: Option<String>,
    /// Who paid, and how much each contributed.
    pub payers: Vec<PayerInput>,
    pub split_type: SplitType,
    /// Who owes a piece of this expense, with per-policy weights.
    pub splits: Vec<SplitInput>,
}

/// One payer contribution within an expense body.
#[derive(Debug, Clone, Deserialize)]
pub struct PayerInput {
    pub user_id: String,
    /// Contributed amount, as a decimal string. May be zero.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// One split entry within an expense body.
///
/// Exactly one weight field is meaningful per policy: `amount_owed` for
/// EXACT, `percent_owed` for PERCENTAGE, `shares_owed` for SHARE. EQUAL
/// splits carry only the user id.
#[derive(Debug, Clone, Deserialize)]
pub struct SplitInput {
    pub user_id: String,
    /// Explicit owed amount (EXACT), as a decimal string.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub amount_owed: Option<Decimal>,
    /// Percent weight (PERCENTAGE). Plain number, may be fractional.
    #[serde(default)]
    pub percent_owed: Option<f64>,
    /// Proportional share weight (SHARE). Plain number, may be fractional.
    #[serde(default)]
    pub shares_owed: Option<f64>,
}

/// Validated, materialized output of the split processor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedExpense {
    pub payers: Vec<PayerRecord>,
    pub splits: Vec<SplitRecord>,
}

/// A validated payer contribution, ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayerRecord {
    pub user_id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// A materialized split obligation, ready to persist.
///
/// `amount_owed` is always populated; the weight that produced it is echoed
/// back so an expense can be re-edited under its original policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitRecord {
    pub user_id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount_owed: Decimal,
    pub percent_owed: Option<f64>,
    pub shares_owed: Option<f64>,
}
