//! Expense splitting and debt settlement core for pAIse.
//!
//! Provides typed wire models and pure computation over them: split
//! validation and materialization for the four split policies
//! ([`split::process_expense_split`]), greedy debt simplification over
//! pairwise balance snapshots ([`settle::simplify_group_debts`]), balance
//! summaries ([`balances::summarize_balances`]), and the capability ports
//! behind which the AI providers live ([`ports`]). All money arithmetic is
//! fixed-point decimal; amounts cross JSON boundaries as decimal strings.

pub mod balances;
pub mod error;
pub mod models;
pub mod ports;
pub mod settle;
pub mod split;

pub use error::{PaiseError, Result};
