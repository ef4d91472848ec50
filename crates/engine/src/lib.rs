//! Pure expense-splitting core.
//!
//! Everything in this crate is synchronous and side-effect-free: it reads its
//! arguments and allocates new output. Network-bound collaborators (the
//! backend, the extraction service) live in the `client` crate; the acting
//! user's id is always passed in as a parameter, never read from ambient
//! state.

pub use balance::{Balances, compute_balances};
pub use draft::ExpenseDraft;
pub use error::EngineError;
pub use expense::Expense;
pub use friends::{Friend, PendingRequests, derive_friends, normalize_email, pending_requests};
pub use submit::encode_paid_by;

mod balance;
mod draft;
mod error;
mod expense;
mod friends;
mod submit;
