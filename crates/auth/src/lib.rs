//! `ledgerkeep-auth` — credential and access-control boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. Storage is
//! reached only through the narrow [`PrincipalStore`] trait; everything else
//! is a pure function of its inputs (plus salt/signing randomness).

pub mod admin;
pub mod config;
pub mod guard;
pub mod hasher;
pub mod principal;
pub mod token;

pub use admin::{AccountAdministrator, LoginOutcome};
pub use config::AuthConfig;
pub use guard::{require_admin, require_not_self, AccessGuard, PrincipalStore};
pub use hasher::CredentialHasher;
pub use principal::Principal;
pub use token::{Claims, TokenError, TokenIssuer};
