//! Brackets Session - Owning a live bracket and persisting it
//!
//! This crate provides the layer between the bracket engine and its callers:
//! - A session that owns at most one bracket and the RNG used to seed it
//! - The store contract (bracket records plus seat records)
//! - In-memory and JSON file stores
//! - Environment-driven configuration
//!
//! ## Architecture
//!
//! - Level 1: Session::create_bracket / load / store (orchestration)
//! - Level 2: Session::advance / revert (transitions)
//! - Level 3: BracketStore implementations, configuration

mod config;
mod error;
mod session;
mod store;

pub use config::{SessionConfig, DEFAULT_STORE_FILE, SEED_ENV, STORE_ENV};
pub use error::{SessionError, SessionResult, StoreError, StoreResult};
pub use session::Session;
pub use store::{BracketId, BracketRecord, BracketStore, JsonFileStore, MemoryStore, SeatRecord};
