//! Shared wire models for the expense core.
//!
//! Contains the expense submission and processing records, pairwise balance
//! rows, and settlement types exchanged with clients. All money fields are
//! fixed-point decimals encoded as strings on the wire.

pub mod balance;
pub mod expense;
pub mod settlement;

use serde::{Deserialize, Serialize};

/// Public-facing user display data.
///
/// Denormalized onto balance rows and echoed into settlement output so the
/// caller can render a plan without further lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    /// Avatar image URL, when the user has one.
    #[serde(default)]
    pub avatar_url: Option<String>,
}
