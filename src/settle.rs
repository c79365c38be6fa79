//! Debt simplification over persisted pairwise balances.
//!
//! Folds a snapshot of balance rows into per-user nets and matches debtors
//! against creditors greedily, producing an ordered settlement plan. The
//! function is pure apart from a warning log when the input nets do not
//! cancel; it never writes balance state.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::PublicUser;
use crate::models::balance::BalanceRow;
use crate::models::settlement::SettlementPayment;

/// Residual threshold under which a party counts as settled.
///
/// Inputs are already-rounded currency values, so anything below one cent is
/// rounding residue, not a real debt. Also prevents the greedy loop from
/// spinning on sub-cent remainders.
const SETTLED_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// A user's running net position while simplifying.
#[derive(Debug, Clone)]
struct UserNet {
    user: PublicUser,
    net: Decimal,
}

/// Computes a minimal-payment settlement plan for one balance scope.
///
/// The caller scopes `rows` (all rows of one group, or one friend pair);
/// this function never filters by group. A positive row amount means user B
/// owes user A. Nets are accumulated per user in first-appearance order,
/// debtors are matched against creditors largest-magnitude-first, and
/// payments are emitted in generation order, decorated with the display
/// refs retained from each user's first appearance.
///
/// The greedy matching is a heuristic: it emits at most
/// (debtors + creditors - 1) payments but is not a guaranteed global
/// minimum for every balance topology (true minimum-payment settlement is
/// NP-hard). The sort order by net magnitude is a deterministic tie-break
/// and part of the observable contract.
///
/// If one side exhausts while the other still carries residue over
/// [`SETTLED_EPSILON`], the balance data is internally inconsistent
/// (nets of a closed scope must sum to zero). The residue is logged as a
/// warning and the plan computed so far is returned.
#[must_use]
pub fn simplify_group_debts(rows: &[BalanceRow]) -> Vec<SettlementPayment> {
    let nets = accumulate_nets(rows);

    let mut debtors: Vec<UserNet> = Vec::new();
    let mut creditors: Vec<UserNet> = Vec::new();
    for entry in nets {
        if entry.net.is_sign_negative() && !entry.net.is_zero() {
            debtors.push(entry);
        } else if entry.net.is_sign_positive() && !entry.net.is_zero() {
            creditors.push(entry);
        }
    }

    // Most negative debtor first, most positive creditor first. Stable, so
    // ties keep first-appearance order and the plan is deterministic.
    debtors.sort_by(|a, b| a.net.cmp(&b.net));
    creditors.sort_by(|a, b| b.net.cmp(&a.net));

    let mut payments = Vec::new();
    let mut d = 0;
    let mut c = 0;
    while d < debtors.len() && c < creditors.len() {
        let payment = debtors[d].net.abs().min(creditors[c].net);

        // Emitted amount is display-rounded to a fixed 2-decimal scale
        let mut emitted = payment.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        emitted.rescale(2);
        payments.push(SettlementPayment {
            from: debtors[d].user.clone(),
            to: creditors[c].user.clone(),
            amount: emitted,
        });

        // Nets keep exact values; only the emitted amount is display-rounded
        debtors[d].net += payment;
        creditors[c].net -= payment;

        if debtors[d].net.abs() < SETTLED_EPSILON {
            d += 1;
        }
        if creditors[c].net < SETTLED_EPSILON {
            c += 1;
        }
    }

    warn_on_residue(&debtors[d..], &creditors[c..]);

    payments
}

/// Folds rows into per-user nets, first-appearance order, retaining each
/// user's display ref from the row where they first appear.
fn accumulate_nets(rows: &[BalanceRow]) -> Vec<UserNet> {
    let mut nets: Vec<UserNet> = Vec::new();
    for row in rows {
        // Positive amount: B owes A, so A's net rises and B's falls
        apply(&mut nets, &row.user_a, row.amount);
        apply(&mut nets, &row.user_b, -row.amount);
    }
    nets
}

fn apply(nets: &mut Vec<UserNet>, user: &PublicUser, delta: Decimal) {
    match nets.iter_mut().find(|entry| entry.user.id == user.id) {
        Some(entry) => entry.net += delta,
        None => nets.push(UserNet {
            user: user.clone(),
            net: delta,
        }),
    }
}

/// Logs leftover nonzero nets after the greedy loop terminates.
///
/// A closed balance scope nets to zero, so residue means the stored rows are
/// inconsistent. That is corrupted upstream data, not a bad request; the
/// partial plan is still returned to the caller.
fn warn_on_residue(debtors: &[UserNet], creditors: &[UserNet]) {
    for entry in debtors.iter().chain(creditors) {
        if entry.net.abs() >= SETTLED_EPSILON {
            tracing::warn!(
                user_id = %entry.user.id,
                residue = %entry.net,
                "Balance inconsistency: nonzero net left after debt simplification"
            );
        }
    }
}
