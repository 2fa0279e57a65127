use serde::{Deserialize, Serialize};

use ledgerkeep_core::PrincipalId;

/// An authenticated operator account.
///
/// Principals operate the system; they are not participants in the ledger
/// graph. Created only via [`crate::AccountAdministrator`].
///
/// # Invariants
/// - `email` is unique across all principals (enforced by the store).
/// - `password_hash` is a self-contained PHC-format digest, never plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: PrincipalId,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}
