//! Ledger domain module (customers and their transactions).
//!
//! This crate contains the business rules for the ledger graph, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage). All
//! functions operate over data the caller has already fetched.

pub mod aggregate;
pub mod customer;
pub mod transaction;

pub use aggregate::{compute_balance, search, SearchOutcome};
pub use customer::{find_duplicate, Customer, CustomerFields};
pub use transaction::{validate_transaction, NewTransaction, Transaction};
