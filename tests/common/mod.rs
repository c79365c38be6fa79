//! Shared builders for the integration test suites.

use std::collections::HashSet;

use rust_decimal::Decimal;

use paise_core::models::PublicUser;
use paise_core::models::balance::BalanceRow;
use paise_core::models::expense::{ExpenseBody, PayerInput, SplitInput, SplitType};

pub fn authorized(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|id| (*id).to_string()).collect()
}

pub fn user(id: &str) -> PublicUser {
    PublicUser {
        id: id.to_string(),
        name: format!("User {id}"),
        avatar_url: None,
    }
}

/// A balance row for the canonical pair (a, b), positive = b owes a.
pub fn balance_row(a: &str, b: &str, group: Option<&str>, amount: Decimal) -> BalanceRow {
    BalanceRow {
        user_a_id: a.to_string(),
        user_b_id: b.to_string(),
        group_id: group.map(str::to_string),
        amount,
        user_a: user(a),
        user_b: user(b),
    }
}

pub fn payer(id: &str, amount: Decimal) -> PayerInput {
    PayerInput {
        user_id: id.to_string(),
        amount,
    }
}

pub fn split_entry(id: &str) -> SplitInput {
    SplitInput {
        user_id: id.to_string(),
        amount_owed: None,
        percent_owed: None,
        shares_owed: None,
    }
}

pub fn expense_body(
    total: Decimal,
    split_type: SplitType,
    payers: Vec<PayerInput>,
    splits: Vec<SplitInput>,
) -> ExpenseBody {
    ExpenseBody {
        group_id: Some("g1".to_string()),
        friend_id: None,
        description: "Trip dinner".to_string(),
        amount: total,
        date: "2026-02-14".to_string(),
        category: Some("Food".to_string()),
        currency: Some("INR".to_string()),
        receipt_url: None,
        payers,
        split_type,
        splits,
    }
}
