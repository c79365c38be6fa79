//! Settlement requests and settlement plan entries.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PublicUser;

/// A settle-up submission body, as received from a client.
#[derive(Debug, Clone, Deserialize)]
pub struct SettlementRequest {
    /// User receiving the money.
    pub receiver_id: String,
    /// Group scope, or `None` for a direct friend settlement.
    #[serde(default)]
    pub group_id: Option<String>,
    /// Settled amount, as a decimal string. Must be strictly positive.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// Settlement date, passed through untouched.
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl SettlementRequest {
    /// Parses a raw JSON body and validates it for the given payer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PaiseError::Json`] when the body is malformed and
    /// [`crate::PaiseError::Settlement`] when it fails validation.
    pub fn parse(body: &str, payer_id: &str) -> crate::Result<Self> {
        let request: Self = serde_json::from_str(body)?;
        request.validate(payer_id)?;
        Ok(request)
    }

    /// Validates the request for the given payer.
    ///
    /// # Errors
    ///
    /// Returns [`SettlementError`] when the amount is not strictly positive
    /// or the payer and receiver are the same user.
    pub fn validate(&self, payer_id: &str) -> Result<(), SettlementError> {
        if self.amount <= Decimal::ZERO {
            return Err(SettlementError::NonPositiveAmount {
                amount: self.amount,
            });
        }
        if payer_id == self.receiver_id {
            return Err(SettlementError::SelfSettlement);
        }
        Ok(())
    }
}

/// Reason a settlement request was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    NonPositiveAmount { amount: Decimal },
    SelfSettlement,
}

impl fmt::Display for SettlementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount { amount } => {
                write!(f, "settlement amount must be positive, got {amount}")
            }
            Self::SelfSettlement => {
                write!(f, "cannot settle with yourself")
            }
        }
    }
}

impl std::error::Error for SettlementError {}

/// One entry of a settlement plan: `from` pays `to` the given amount.
///
/// Produced by the debt simplifier. The amount is always positive and
/// serialized with exactly two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementPayment {
    pub from: PublicUser,
    pub to: PublicUser,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}
