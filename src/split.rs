//! Expense split validation and materialization.
//!
//! Validates an [`ExpenseBody`] against an authorized participant set and
//! materializes per-participant payer and split records under one of four
//! policies (EQUAL, EXACT, PERCENTAGE, SHARE). All arithmetic is fixed-point
//! decimal; every accepted expense satisfies the exact-sum invariant: payer
//! amounts and owed amounts each sum to the expense total to the cent.

use std::collections::HashSet;
use std::fmt;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::expense::{ExpenseBody, PayerRecord, ProcessedExpense, SplitRecord, SplitType};

/// One cent, the smallest unit handled by distribution.
const CENT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Absolute tolerance when checking that percent weights sum to 100.
const PERCENT_TOLERANCE: f64 = 1e-9;

/// Reason an expense body was rejected by split validation.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitError {
    EmptyPayers,
    EmptySplits,
    /// A supplied amount is unusable: non-positive total, negative payer or
    /// split amount, or a weight with no decimal representation.
    InvalidAmount {
        detail: String,
    },
    UserNotAuthorized {
        user_id: String,
        role: &'static str,
    },
    PayerSumMismatch {
        payer_sum: Decimal,
        total: Decimal,
    },
    SplitSumMismatch {
        split_sum: Decimal,
        total: Decimal,
    },
    PercentSumMismatch {
        total_percent: f64,
    },
    ZeroShares,
    /// A split entry lacks the weight field its policy requires.
    MissingSplitValue {
        split_type: SplitType,
        user_id: String,
        field: &'static str,
    },
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayers => write!(f, "At least one payer is required"),
            Self::EmptySplits => write!(f, "At least one split is required"),
            Self::InvalidAmount { detail } => write!(f, "{detail}"),
            Self::UserNotAuthorized { user_id, role } => {
                write!(f, "{role} {user_id} is not an authorized participant")
            }
            Self::PayerSumMismatch { payer_sum, total } => {
                write!(
                    f,
                    "Payers sum ({payer_sum}) does not equal total amount ({total})"
                )
            }
            Self::SplitSumMismatch { split_sum, total } => {
                write!(
                    f,
                    "Splits sum ({split_sum}) does not equal total amount ({total})"
                )
            }
            Self::PercentSumMismatch { total_percent } => {
                write!(f, "Percentages do not sum to 100 (got {total_percent})")
            }
            Self::ZeroShares => write!(f, "Total shares cannot be zero"),
            Self::MissingSplitValue {
                split_type,
                user_id,
                field,
            } => {
                write!(f, "{split_type} split for user {user_id} is missing '{field}'")
            }
        }
    }
}

impl std::error::Error for SplitError {}

/// Parses a raw JSON expense body and runs full split validation.
///
/// # Errors
///
/// Returns [`crate::PaiseError::Json`] when the body is malformed (including
/// amounts sent as JSON numbers instead of decimal strings) and
/// [`crate::PaiseError::Split`] when the body fails validation.
pub fn process_expense_body(
    body: &str,
    authorized_users: &HashSet<String>,
) -> crate::Result<ProcessedExpense> {
    let body: ExpenseBody = serde_json::from_str(body)?;
    Ok(process_expense_split(&body, authorized_users)?)
}

/// Validates an expense body and materializes its payer and split records.
///
/// `authorized_users` is the set of ids allowed to appear as payers or split
/// participants (group members, or both sides of a friend expense). The
/// function is pure; persisting the returned records (replacing any prior
/// set when editing) is the caller's concern.
///
/// # Errors
///
/// Returns [`SplitError`] describing the first failed validation; see the
/// variant docs for the full taxonomy.
pub fn process_expense_split(
    body: &ExpenseBody,
    authorized_users: &HashSet<String>,
) -> Result<ProcessedExpense, SplitError> {
    let total = body.amount;

    // 1. Reject empty payer or split sets
    if body.payers.is_empty() {
        return Err(SplitError::EmptyPayers);
    }
    if body.splits.is_empty() {
        return Err(SplitError::EmptySplits);
    }

    // 2. Reject non-positive totals
    if total <= Decimal::ZERO {
        return Err(SplitError::InvalidAmount {
            detail: format!("Expense amount must be positive, got {total}"),
        });
    }

    // 3. Reject payers outside the authorized set
    for payer in &body.payers {
        if !authorized_users.contains(&payer.user_id) {
            return Err(SplitError::UserNotAuthorized {
                user_id: payer.user_id.clone(),
                role: "Payer",
            });
        }
    }

    // 4. Reject negative payer amounts; payer amounts must sum to the total
    let mut payer_sum = Decimal::ZERO;
    let mut payers = Vec::with_capacity(body.payers.len());
    for payer in &body.payers {
        if payer.amount < Decimal::ZERO {
            return Err(SplitError::InvalidAmount {
                detail: format!("Payer amount cannot be negative, got {}", payer.amount),
            });
        }
        payer_sum += payer.amount;
        payers.push(PayerRecord {
            user_id: payer.user_id.clone(),
            amount: payer.amount,
        });
    }
    if payer_sum != total {
        return Err(SplitError::PayerSumMismatch { payer_sum, total });
    }

    // 5. Reject split users outside the authorized set
    for split in &body.splits {
        if !authorized_users.contains(&split.user_id) {
            return Err(SplitError::UserNotAuthorized {
                user_id: split.user_id.clone(),
                role: "Split user",
            });
        }
    }

    // 6. Materialize owed amounts per policy
    let splits = match body.split_type {
        SplitType::Equal => {
            let amounts = distribute_equally(total, body.splits.len());
            body.splits
                .iter()
                .zip(amounts)
                .map(|(split, amount_owed)| SplitRecord {
                    user_id: split.user_id.clone(),
                    amount_owed,
                    percent_owed: None,
                    shares_owed: None,
                })
                .collect::<Vec<_>>()
        }
        SplitType::Exact => {
            let mut records = Vec::with_capacity(body.splits.len());
            for split in &body.splits {
                let amount_owed = split.amount_owed.ok_or_else(|| missing(split, "amount_owed", SplitType::Exact))?;
                if amount_owed < Decimal::ZERO {
                    return Err(SplitError::InvalidAmount {
                        detail: format!("Split amount cannot be negative, got {amount_owed}"),
                    });
                }
                records.push(SplitRecord {
                    user_id: split.user_id.clone(),
                    amount_owed,
                    percent_owed: None,
                    shares_owed: None,
                });
            }
            records
        }
        SplitType::Percentage => {
            let mut total_percent = 0.0_f64;
            let mut weights = Vec::with_capacity(body.splits.len());
            for split in &body.splits {
                let percent = split.percent_owed.ok_or_else(|| missing(split, "percent_owed", SplitType::Percentage))?;
                total_percent += percent;
                weights.push(decimal_weight(percent, "Percent")?);
            }
            if (total_percent - 100.0).abs() > PERCENT_TOLERANCE {
                return Err(SplitError::PercentSumMismatch { total_percent });
            }
            let amounts = distribute_by_share(total, &weights)?;
            body.splits
                .iter()
                .zip(amounts)
                .map(|(split, amount_owed)| SplitRecord {
                    user_id: split.user_id.clone(),
                    amount_owed,
                    percent_owed: split.percent_owed,
                    shares_owed: None,
                })
                .collect()
        }
        SplitType::Share => {
            let mut weights = Vec::with_capacity(body.splits.len());
            for split in &body.splits {
                let shares = split.shares_owed.ok_or_else(|| missing(split, "shares_owed", SplitType::Share))?;
                weights.push(decimal_weight(shares, "Share")?);
            }
            let amounts = distribute_by_share(total, &weights)?;
            body.splits
                .iter()
                .zip(amounts)
                .map(|(split, amount_owed)| SplitRecord {
                    user_id: split.user_id.clone(),
                    amount_owed,
                    percent_owed: None,
                    shares_owed: split.shares_owed,
                })
                .collect()
        }
    };

    // 7. Final invariant: materialized splits must sum exactly to the total
    let split_sum: Decimal = splits.iter().map(|s| s.amount_owed).sum();
    if split_sum != total {
        return Err(SplitError::SplitSumMismatch { split_sum, total });
    }

    Ok(ProcessedExpense { payers, splits })
}

/// Divides `total` into `count` near-equal 2-decimal amounts.
///
/// The base share is `total / count` floored at 2 decimals; the leftover is
/// handed out one cent at a time to the earliest entries, so results differ
/// by at most one cent and always sum exactly to the (2-decimal-rounded)
/// total. Returns an empty vector when `count` is zero.
#[must_use]
pub fn distribute_equally(total: Decimal, count: usize) -> Vec<Decimal> {
    if count == 0 {
        return Vec::new();
    }
    let amount = total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let n = Decimal::from(count as u64);
    let base = (amount / n).round_dp_with_strategy(2, RoundingStrategy::ToNegativeInfinity);
    let mut leftover = amount - base * n;

    let mut amounts = Vec::with_capacity(count);
    for _ in 0..count {
        if leftover >= CENT {
            amounts.push(base + CENT);
            leftover -= CENT;
        } else {
            amounts.push(base);
        }
    }
    amounts
}

/// Divides `total` proportionally to `weights`, exact to the cent.
///
/// Each candidate is `total * weight / sum(weights)` rounded to 2 decimals
/// (ties round half away from zero); the entire rounding residual is then
/// added to the FIRST entry, even when that correction is negative, so the
/// results always sum exactly to the (2-decimal-rounded) total.
///
/// # Errors
///
/// Returns [`SplitError::ZeroShares`] when the weights sum to zero (which
/// includes an empty `weights`).
pub fn distribute_by_share(total: Decimal, weights: &[Decimal]) -> Result<Vec<Decimal>, SplitError> {
    let weight_sum: Decimal = weights.iter().copied().sum();
    if weight_sum.is_zero() {
        return Err(SplitError::ZeroShares);
    }
    let amount = total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let mut amounts: Vec<Decimal> = weights
        .iter()
        .map(|&weight| {
            (amount * weight / weight_sum)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        })
        .collect();

    let allocated: Decimal = amounts.iter().copied().sum();
    let residual = amount - allocated;
    if !residual.is_zero() {
        amounts[0] += residual;
    }
    Ok(amounts)
}

fn missing(split: &crate::models::expense::SplitInput, field: &'static str, split_type: SplitType) -> SplitError {
    SplitError::MissingSplitValue {
        split_type,
        user_id: split.user_id.clone(),
        field,
    }
}

fn decimal_weight(value: f64, kind: &'static str) -> Result<Decimal, SplitError> {
    Decimal::from_f64(value).ok_or_else(|| SplitError::InvalidAmount {
        detail: format!("{kind} value {value} is not representable as a decimal"),
    })
}
