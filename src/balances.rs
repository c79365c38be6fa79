//! Balance views derived from persisted pairwise balance rows.
//!
//! A balance row stores a signed amount for a canonically ordered user pair
//! (positive means user B owes user A). These helpers fold a row snapshot
//! into the viewing user's position without ever touching storage; scoping
//! the rows (one group, everything, one counterparty) is the caller's job.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::PublicUser;
use crate::models::balance::{BalanceRow, BalanceSummary, CounterpartyBalance};

/// A counterparty's running net against the viewing user.
#[derive(Debug, Clone)]
struct CounterpartyNet {
    user: PublicUser,
    net: Decimal,
}

/// Summarizes `user_id`'s position across a set of balance rows.
///
/// The viewing user gains `+amount` from rows where they sit on the A side
/// and `-amount` where they sit on the B side; rows not involving them are
/// ignored. Counterparties appear in first-appearance order; pairs that net
/// to zero are omitted from both lists but still count toward `net_balance`.
/// All emitted amounts are 2-decimal normalized, and the per-counterparty
/// amounts are positive in both lists (direction is carried by which list).
#[must_use]
pub fn summarize_balances(user_id: &str, rows: &[BalanceRow]) -> BalanceSummary {
    let mut nets: Vec<CounterpartyNet> = Vec::new();
    for row in rows {
        let (signed, other) = if row.user_a_id == user_id {
            (row.amount, &row.user_b)
        } else if row.user_b_id == user_id {
            (-row.amount, &row.user_a)
        } else {
            continue;
        };
        match nets.iter_mut().find(|entry| entry.user.id == other.id) {
            Some(entry) => entry.net += signed,
            None => nets.push(CounterpartyNet {
                user: other.clone(),
                net: signed,
            }),
        }
    }

    let mut net_balance = Decimal::ZERO;
    let mut you_owe = Vec::new();
    let mut you_are_owed = Vec::new();
    for entry in nets {
        net_balance += entry.net;
        if entry.net.is_zero() {
            continue;
        }
        let counterparty = CounterpartyBalance {
            user: entry.user,
            amount: to_cents(entry.net.abs()),
        };
        if entry.net.is_sign_negative() {
            you_owe.push(counterparty);
        } else {
            you_are_owed.push(counterparty);
        }
    }

    BalanceSummary {
        net_balance: to_cents(net_balance),
        you_owe,
        you_are_owed,
    }
}

/// Exact signed net between `user_id` and `other_id` across the rows.
///
/// Positive means `other_id` owes the viewing user. Rows involving anyone
/// else are ignored, so the caller can pass an unfiltered snapshot.
#[must_use]
pub fn pairwise_net(user_id: &str, other_id: &str, rows: &[BalanceRow]) -> Decimal {
    let mut net = Decimal::ZERO;
    for row in rows {
        if row.user_a_id == user_id && row.user_b_id == other_id {
            net += row.amount;
        } else if row.user_a_id == other_id && row.user_b_id == user_id {
            net -= row.amount;
        }
    }
    net
}

/// Orders two user ids into the canonical (A, B) storage pair, A < B
/// lexically.
#[must_use]
pub fn canonical_pair<'a>(x: &'a str, y: &'a str) -> (&'a str, &'a str) {
    if x <= y { (x, y) } else { (y, x) }
}

/// Rounds to cents and pins the scale to 2 so amounts serialize as "40.00",
/// never "40".
fn to_cents(amount: Decimal) -> Decimal {
    let mut cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    cents
}
