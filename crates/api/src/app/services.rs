//! Service facade composing auth, ledger logic and storage.
//!
//! One method per exposed operation; every operation except `login` starts
//! from a principal the middleware already authenticated. Handlers stay thin:
//! parse, call, map.

use std::sync::Arc;

use rust_decimal::Decimal;

use ledgerkeep_auth::{
    require_admin, AccessGuard, AccountAdministrator, AuthConfig, LoginOutcome, Principal,
    TokenIssuer,
};
use ledgerkeep_core::{CustomerId, DomainResult, PrincipalId};
use ledgerkeep_infra::{LedgerStore, StoreHandle};
use ledgerkeep_ledger::{
    compute_balance, search, Customer, CustomerFields, NewTransaction, Transaction,
};

pub struct AppServices {
    guard: AccessGuard,
    admin: AccountAdministrator,
    ledger: Arc<dyn LedgerStore>,
}

impl AppServices {
    pub fn new(config: AuthConfig, store: StoreHandle) -> Self {
        let issuer = TokenIssuer::new(&config);
        Self {
            guard: AccessGuard::new(issuer, store.principals.clone()),
            admin: AccountAdministrator::new(store.principals),
            ledger: store.ledger,
        }
    }

    /// Resolve a bearer token into a principal (middleware entrypoint).
    pub fn authenticate(&self, token: &str) -> DomainResult<Principal> {
        self.guard.authenticate(token)
    }

    // ── Auth operations ─────────────────────────────────────────────────

    pub fn login(&self, email: &str, password: &str) -> DomainResult<LoginOutcome> {
        self.admin.login(self.guard.issuer(), email, password)
    }

    pub fn create_user(
        &self,
        requester: &Principal,
        email: &str,
        password: &str,
    ) -> DomainResult<Principal> {
        require_admin(requester)?;
        self.admin.create_principal(email, password)
    }

    pub fn list_users(&self, requester: &Principal) -> DomainResult<Vec<Principal>> {
        require_admin(requester)?;
        self.admin.list_principals()
    }

    pub fn delete_user(&self, requester: &Principal, target: PrincipalId) -> DomainResult<()> {
        self.admin.delete_principal(requester, target)
    }

    // ── Ledger operations ───────────────────────────────────────────────

    pub fn list_customers(&self) -> DomainResult<Vec<(Customer, Vec<Transaction>)>> {
        let customers = self.ledger.list_customers()?;
        customers
            .into_iter()
            .map(|c| {
                let txs = self.ledger.list_transactions_for_customer(c.id)?;
                Ok((c, txs))
            })
            .collect()
    }

    pub fn create_customer(&self, fields: CustomerFields) -> DomainResult<Customer> {
        self.ledger.insert_customer(fields)
    }

    pub fn update_customer(
        &self,
        id: CustomerId,
        fields: CustomerFields,
    ) -> DomainResult<Customer> {
        self.ledger.update_customer(id, fields)
    }

    /// Search customers by name/address and report each match's balance.
    pub fn search_customers(&self, query: &str) -> DomainResult<Vec<(Customer, Decimal)>> {
        let customers = self.ledger.list_customers()?;
        // NoMatch and EmptyPopulation both render as an empty list here.
        let matches = search(query, &customers).into_matches();

        matches
            .into_iter()
            .map(|c| {
                let txs = self.ledger.list_transactions_for_customer(c.id)?;
                Ok((c.clone(), compute_balance(&txs)))
            })
            .collect()
    }

    pub fn create_transaction(&self, tx: NewTransaction) -> DomainResult<Transaction> {
        self.ledger.insert_transaction(tx)
    }

    pub fn list_transactions(&self) -> DomainResult<Vec<Transaction>> {
        self.ledger.list_transactions()
    }

    pub fn list_transactions_for(&self, customer: CustomerId) -> DomainResult<Vec<Transaction>> {
        self.ledger.list_transactions_for_customer(customer)
    }
}
