//! Principal lifecycle orchestration.

use std::sync::Arc;

use ledgerkeep_core::{DomainError, DomainResult, PrincipalId};

use crate::guard::{require_admin, require_not_self, PrincipalStore};
use crate::hasher::CredentialHasher;
use crate::principal::Principal;
use crate::token::TokenIssuer;

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub token: String,
    pub is_admin: bool,
}

/// Orchestrates principal creation, deletion and login.
///
/// Composes the privilege checks from [`crate::guard`] with the
/// [`CredentialHasher`]; the storage collaborator enforces email uniqueness
/// under its own commit boundary.
pub struct AccountAdministrator {
    hasher: CredentialHasher,
    store: Arc<dyn PrincipalStore>,
}

impl AccountAdministrator {
    pub fn new(store: Arc<dyn PrincipalStore>) -> Self {
        Self {
            hasher: CredentialHasher::new(),
            store,
        }
    }

    /// Authenticate credentials and mint a session token.
    ///
    /// Unknown email and wrong password produce the identical `Unauthorized`;
    /// a corrupt stored digest is surfaced as its own failure since that is
    /// an operational fault, not a guessing attempt.
    pub fn login(
        &self,
        issuer: &TokenIssuer,
        email: &str,
        password: &str,
    ) -> DomainResult<LoginOutcome> {
        let email = normalize_email(email)?;
        let principal = self
            .store
            .find_by_email(&email)?
            .ok_or(DomainError::Unauthorized)?;

        if !self.hasher.verify(&principal.password_hash, password)? {
            return Err(DomainError::Unauthorized);
        }

        let token = issuer.issue(&principal.email)?;
        tracing::info!(principal = %principal.id, "login succeeded");
        Ok(LoginOutcome {
            token,
            is_admin: principal.is_admin,
        })
    }

    /// Create a new non-admin principal.
    ///
    /// Admin status is never granted here regardless of who asks; the only
    /// admin-creating path is [`Self::bootstrap_admin`].
    pub fn create_principal(&self, email: &str, password: &str) -> DomainResult<Principal> {
        self.create(email, password, false)
    }

    /// Create the bootstrap admin account (operator-invoked, not exposed
    /// over HTTP). At least one must exist before any admin operation is
    /// possible.
    pub fn bootstrap_admin(&self, email: &str, password: &str) -> DomainResult<Principal> {
        self.create(email, password, true)
    }

    fn create(&self, email: &str, password: &str, is_admin: bool) -> DomainResult<Principal> {
        let email = normalize_email(email)?;
        if password.is_empty() {
            return Err(DomainError::validation("password cannot be empty"));
        }

        let principal = Principal {
            id: PrincipalId::new(),
            email,
            password_hash: self.hasher.hash(password)?,
            is_admin,
        };

        // The store rejects a taken email atomically (DuplicateEmail).
        let created = self.store.insert(principal)?;
        tracing::info!(principal = %created.id, is_admin, "principal created");
        Ok(created)
    }

    /// Delete a principal on behalf of `requester`.
    ///
    /// Checks run in a fixed order: admin privilege, then the self-delete
    /// block, then existence. A non-admin attempting self-delete therefore
    /// observes `Forbidden`, not `InvalidOperation`.
    pub fn delete_principal(
        &self,
        requester: &Principal,
        target: PrincipalId,
    ) -> DomainResult<()> {
        require_admin(requester)?;
        require_not_self(requester, target)?;
        self.store.delete(target)?;
        tracing::info!(principal = %target, requester = %requester.id, "principal deleted");
        Ok(())
    }

    /// List all principals (the service layer gates this behind admin).
    pub fn list_principals(&self) -> DomainResult<Vec<Principal>> {
        self.store.list()
    }
}

fn normalize_email(email: &str) -> DomainResult<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::validation("invalid email format"));
    }
    Ok(email)
}
