//! In-memory storage backend (dev/test default).

use std::sync::Mutex;

use ledgerkeep_auth::{Principal, PrincipalStore};
use ledgerkeep_core::{CustomerId, DomainError, DomainResult, PrincipalId};
use ledgerkeep_ledger::{Customer, CustomerFields, NewTransaction, Transaction};

use crate::store::{self, LedgerStore, Tables};

/// All tables behind a single lock: every read-modify-write sequence
/// (duplicate check + insert, reference check + insert) commits atomically.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_tables<T>(&self, f: impl FnOnce(&mut Tables) -> DomainResult<T>) -> DomainResult<T> {
        let mut tables = self
            .inner
            .lock()
            .map_err(|_| DomainError::storage("memory store lock poisoned"))?;
        f(&mut tables)
    }
}

impl PrincipalStore for MemoryStore {
    fn find_by_email(&self, email: &str) -> DomainResult<Option<Principal>> {
        self.with_tables(|t| Ok(t.principals.iter().find(|p| p.email == email).cloned()))
    }

    fn find_by_id(&self, id: PrincipalId) -> DomainResult<Option<Principal>> {
        self.with_tables(|t| Ok(t.principals.iter().find(|p| p.id == id).cloned()))
    }

    fn insert(&self, principal: Principal) -> DomainResult<Principal> {
        self.with_tables(|t| store::insert_principal(t, principal))
    }

    fn delete(&self, id: PrincipalId) -> DomainResult<()> {
        self.with_tables(|t| store::delete_principal(t, id))
    }

    fn list(&self) -> DomainResult<Vec<Principal>> {
        self.with_tables(|t| Ok(t.principals.clone()))
    }
}

impl LedgerStore for MemoryStore {
    fn list_customers(&self) -> DomainResult<Vec<Customer>> {
        self.with_tables(|t| Ok(t.customers.clone()))
    }

    fn get_customer(&self, id: CustomerId) -> DomainResult<Option<Customer>> {
        self.with_tables(|t| Ok(t.customers.iter().find(|c| c.id == id).cloned()))
    }

    fn customer_exists(&self, id: CustomerId) -> DomainResult<bool> {
        self.with_tables(|t| Ok(t.customers.iter().any(|c| c.id == id)))
    }

    fn insert_customer(&self, fields: CustomerFields) -> DomainResult<Customer> {
        self.with_tables(|t| store::insert_customer(t, fields))
    }

    fn update_customer(&self, id: CustomerId, fields: CustomerFields) -> DomainResult<Customer> {
        self.with_tables(|t| store::update_customer(t, id, fields))
    }

    fn list_transactions(&self) -> DomainResult<Vec<Transaction>> {
        self.with_tables(|t| Ok(t.transactions.clone()))
    }

    fn list_transactions_for_customer(&self, id: CustomerId) -> DomainResult<Vec<Transaction>> {
        self.with_tables(|t| {
            Ok(t.transactions
                .iter()
                .filter(|tx| tx.customer_id == id)
                .cloned()
                .collect())
        })
    }

    fn insert_transaction(&self, tx: NewTransaction) -> DomainResult<Transaction> {
        self.with_tables(|t| store::insert_transaction(t, tx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn alice_fields() -> CustomerFields {
        CustomerFields {
            name: "Alice".to_string(),
            email: Some("a@x.com".to_string()),
            phone: None,
            address: None,
        }
    }

    #[test]
    fn duplicate_insert_fails_second_time() {
        let store = MemoryStore::new();
        store.insert_customer(alice_fields()).unwrap();
        assert_eq!(
            store.insert_customer(alice_fields()),
            Err(DomainError::DuplicateCustomer)
        );

        // Different email, no phone overlap: allowed.
        let mut different = alice_fields();
        different.email = Some("b@x.com".to_string());
        assert!(store.insert_customer(different).is_ok());
    }

    #[test]
    fn concurrent_duplicate_creation_admits_exactly_one() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.insert_customer(alice_fields()))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        assert!(results
            .iter()
            .filter(|r| r.is_err())
            .all(|r| *r == Err(DomainError::DuplicateCustomer)));
    }

    #[test]
    fn transaction_against_unknown_customer_persists_nothing() {
        let store = MemoryStore::new();
        let result = store.insert_transaction(NewTransaction {
            customer_id: CustomerId::new(),
            amount: dec!(5.00),
            entry_timestamp: Utc::now(),
            notes: None,
        });
        assert_eq!(result, Err(DomainError::UnknownCustomer));
        assert!(store.list_transactions().unwrap().is_empty());
    }

    #[test]
    fn transactions_are_scoped_to_their_customer() {
        let store = MemoryStore::new();
        let alice = store.insert_customer(alice_fields()).unwrap();
        let bob = store
            .insert_customer(CustomerFields {
                name: "Bob".to_string(),
                email: Some("bob@x.com".to_string()),
                phone: None,
                address: None,
            })
            .unwrap();

        for (customer, amount) in [(&alice, dec!(10.10)), (&bob, dec!(99.99))] {
            store
                .insert_transaction(NewTransaction {
                    customer_id: customer.id,
                    amount,
                    entry_timestamp: Utc::now(),
                    notes: None,
                })
                .unwrap();
        }

        let for_alice = store.list_transactions_for_customer(alice.id).unwrap();
        assert_eq!(for_alice.len(), 1);
        assert_eq!(for_alice[0].amount, dec!(10.10));
    }

    #[test]
    fn update_missing_customer_is_not_found() {
        let store = MemoryStore::new();
        assert_eq!(
            store.update_customer(CustomerId::new(), alice_fields()),
            Err(DomainError::NotFound)
        );
    }
}
