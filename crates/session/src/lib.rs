//! `upskeel-session` — the client's session store.
//!
//! Single source of truth for "who is logged in and with what roles":
//! persists the bearer token, hydrates it at startup, performs the
//! credential exchange, and notifies dependents when session state changes.

pub mod store;
pub mod token_store;

pub use store::{SessionError, SessionSnapshot, SessionStore};
pub use token_store::{FileTokenStore, MemoryTokenStore, StorageError, TokenStore};
