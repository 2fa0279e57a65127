//! Token-to-principal resolution and privilege checks.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use ledgerkeep_core::{DomainError, DomainResult, PrincipalId};

use crate::principal::Principal;
use crate::token::TokenIssuer;

/// Narrow storage contract for principal lookup and lifecycle.
///
/// Implementations must enforce email uniqueness atomically inside `insert`
/// and execute each method under their own commit boundary.
pub trait PrincipalStore: Send + Sync {
    fn find_by_email(&self, email: &str) -> DomainResult<Option<Principal>>;
    fn find_by_id(&self, id: PrincipalId) -> DomainResult<Option<Principal>>;
    /// Insert a new principal; fails with `DuplicateEmail` if taken.
    fn insert(&self, principal: Principal) -> DomainResult<Principal>;
    /// Delete by id; fails with `NotFound` if absent.
    fn delete(&self, id: PrincipalId) -> DomainResult<()>;
    fn list(&self) -> DomainResult<Vec<Principal>>;
}

/// Resolves bearer tokens into authenticated principals.
pub struct AccessGuard {
    issuer: TokenIssuer,
    store: Arc<dyn PrincipalStore>,
}

impl AccessGuard {
    pub fn new(issuer: TokenIssuer, store: Arc<dyn PrincipalStore>) -> Self {
        Self { issuer, store }
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Authenticate a bearer token against the current wall clock.
    pub fn authenticate(&self, token: &str) -> DomainResult<Principal> {
        self.authenticate_at(token, Utc::now())
    }

    /// Verify the token, extract its subject, and resolve the principal.
    ///
    /// An invalid token and a valid token whose principal has since been
    /// deleted surface as the same `Unauthorized`: callers must not be able
    /// to probe which accounts exist.
    pub fn authenticate_at(&self, token: &str, now: DateTime<Utc>) -> DomainResult<Principal> {
        let subject = self.issuer.verify_at(token, now)?;
        self.store
            .find_by_email(&subject)?
            .ok_or(DomainError::Unauthorized)
    }
}

/// Require the admin privilege.
pub fn require_admin(principal: &Principal) -> DomainResult<()> {
    if principal.is_admin {
        Ok(())
    } else {
        Err(DomainError::Forbidden)
    }
}

/// Reject operations a principal directs at their own account.
///
/// Used exclusively to block an admin from deleting themselves. Kept
/// separate from [`require_admin`] so each failure mode stays independently
/// testable; callers compose the checks in a fixed order.
pub fn require_not_self(principal: &Principal, target: PrincipalId) -> DomainResult<()> {
    if principal.id == target {
        Err(DomainError::invalid_operation(
            "you cannot delete your own account",
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use std::sync::Mutex;

    /// Minimal in-crate store double; the real backends live in infra.
    #[derive(Default)]
    struct FakeStore {
        principals: Mutex<Vec<Principal>>,
    }

    impl PrincipalStore for FakeStore {
        fn find_by_email(&self, email: &str) -> DomainResult<Option<Principal>> {
            Ok(self
                .principals
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.email == email)
                .cloned())
        }

        fn find_by_id(&self, id: PrincipalId) -> DomainResult<Option<Principal>> {
            Ok(self
                .principals
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == id)
                .cloned())
        }

        fn insert(&self, principal: Principal) -> DomainResult<Principal> {
            let mut guard = self.principals.lock().unwrap();
            if guard.iter().any(|p| p.email == principal.email) {
                return Err(DomainError::DuplicateEmail);
            }
            guard.push(principal.clone());
            Ok(principal)
        }

        fn delete(&self, id: PrincipalId) -> DomainResult<()> {
            let mut guard = self.principals.lock().unwrap();
            let before = guard.len();
            guard.retain(|p| p.id != id);
            if guard.len() == before {
                return Err(DomainError::NotFound);
            }
            Ok(())
        }

        fn list(&self) -> DomainResult<Vec<Principal>> {
            Ok(self.principals.lock().unwrap().clone())
        }
    }

    fn principal(email: &str, is_admin: bool) -> Principal {
        Principal {
            id: PrincipalId::new(),
            email: email.to_string(),
            password_hash: "unused".to_string(),
            is_admin,
        }
    }

    fn guard_with(principals: Vec<Principal>) -> AccessGuard {
        let store = Arc::new(FakeStore {
            principals: Mutex::new(principals),
        });
        let issuer = TokenIssuer::new(&AuthConfig::new("guard-test-secret"));
        AccessGuard::new(issuer, store)
    }

    #[test]
    fn authenticate_resolves_known_subject() {
        let alice = principal("alice@example.com", false);
        let guard = guard_with(vec![alice.clone()]);
        let token = guard.issuer().issue("alice@example.com").unwrap();
        assert_eq!(guard.authenticate(&token).unwrap(), alice);
    }

    #[test]
    fn deleted_principal_and_bad_token_are_indistinguishable() {
        let guard = guard_with(vec![]);
        let token = guard.issuer().issue("ghost@example.com").unwrap();

        // Valid signature, subject no longer exists.
        assert_eq!(guard.authenticate(&token), Err(DomainError::Unauthorized));
        // Garbage token.
        assert_eq!(
            guard.authenticate("garbage"),
            Err(DomainError::Unauthorized)
        );
    }

    #[test]
    fn require_admin_rejects_non_admin() {
        assert_eq!(
            require_admin(&principal("bob@example.com", false)),
            Err(DomainError::Forbidden)
        );
        assert!(require_admin(&principal("root@example.com", true)).is_ok());
    }

    #[test]
    fn require_not_self_rejects_own_id() {
        let admin = principal("root@example.com", true);
        assert!(matches!(
            require_not_self(&admin, admin.id),
            Err(DomainError::InvalidOperation(_))
        ));
        assert!(require_not_self(&admin, PrincipalId::new()).is_ok());
    }
}
