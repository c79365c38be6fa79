//! Pairwise balance rows and per-user balance summaries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PublicUser;

/// One stored balance between an ordered pair of users.
///
/// The pair is canonical: `user_a_id < user_b_id` by lexical id order. A
/// positive `amount` means `user_b` owes `user_a`; negative means `user_a`
/// owes `user_b`. Many rows may exist per pair (one per group plus one
/// non-group row), so net exposure is always a sum across rows.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceRow {
    pub user_a_id: String,
    pub user_b_id: String,
    /// Group scope, or `None` for a direct friend balance.
    #[serde(default)]
    pub group_id: Option<String>,
    /// Signed balance, as a decimal string.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// Display data for `user_a_id`, used only to decorate output.
    pub user_a: PublicUser,
    /// Display data for `user_b_id`, used only to decorate output.
    pub user_b: PublicUser,
}

/// A counterparty and the (positive, 2-decimal) amount owed one way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterpartyBalance {
    pub user: PublicUser,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// A user's position across a set of balance rows.
///
/// `net_balance` is signed (positive means the user is owed money overall);
/// the two lists break the position down per counterparty, omitting settled
/// pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSummary {
    #[serde(with = "rust_decimal::serde::str")]
    pub net_balance: Decimal,
    pub you_owe: Vec<CounterpartyBalance>,
    pub you_are_owed: Vec<CounterpartyBalance>,
}
