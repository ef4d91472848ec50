//! Network-bound collaborators.
//!
//! This crate is a thin client over two remote services: the backend that
//! owns identity, friend edges and expense records, and the optional
//! free-text extraction service. All domain computation stays in `engine`;
//! everything here is request/response plumbing plus the session lifecycle
//! and the refresh snapshot.

pub use api::{ApiClient, ApiError};
pub use extract::ExtractionClient;
pub use session::{Session, SessionStore};
pub use state::StateStore;
pub use store::{Snapshot, Store, StoreError};

mod api;
mod extract;
mod session;
mod state;
mod store;
