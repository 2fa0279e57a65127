//! Local file-backed storage (single JSON snapshot).
//!
//! The snapshot on disk is the commit point: each mutation is applied to a
//! copy of the tables, written out, and only then made visible in memory.
//! A failed write leaves both the file and the in-memory state untouched.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ledgerkeep_auth::{Principal, PrincipalStore};
use ledgerkeep_core::{CustomerId, DomainError, DomainResult, PrincipalId};
use ledgerkeep_ledger::{Customer, CustomerFields, NewTransaction, Transaction};

use crate::store::{self, LedgerStore, Tables};

pub struct FileStore {
    path: PathBuf,
    inner: Mutex<Tables>,
}

impl FileStore {
    /// Open (or create) the store at `path`.
    ///
    /// A missing file starts empty; an unreadable or unparseable file is
    /// surfaced as `StorageUnavailable` rather than silently discarded.
    pub fn open(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref().to_path_buf();
        let tables = if path.exists() {
            let raw = fs::read_to_string(&path)
                .map_err(|e| DomainError::storage(format!("reading {}: {e}", path.display())))?;
            serde_json::from_str(&raw)
                .map_err(|e| DomainError::storage(format!("parsing {}: {e}", path.display())))?
        } else {
            Tables::default()
        };

        Ok(Self {
            path,
            inner: Mutex::new(tables),
        })
    }

    /// Apply a mutation copy-on-write: persist first, then swap in memory.
    fn commit<T>(&self, f: impl FnOnce(&mut Tables) -> DomainResult<T>) -> DomainResult<T> {
        let mut tables = self.lock()?;
        let mut staged = tables.clone();
        let out = f(&mut staged)?;
        self.persist(&staged)?;
        *tables = staged;
        Ok(out)
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> DomainResult<T> {
        Ok(f(&*self.lock()?))
    }

    fn lock(&self) -> DomainResult<std::sync::MutexGuard<'_, Tables>> {
        self.inner
            .lock()
            .map_err(|_| DomainError::storage("file store lock poisoned"))
    }

    fn persist(&self, tables: &Tables) -> DomainResult<()> {
        let raw = serde_json::to_string_pretty(tables)
            .map_err(|e| DomainError::storage(format!("serializing snapshot: {e}")))?;
        // Write-then-rename so a crash mid-write cannot truncate the snapshot.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)
            .map_err(|e| DomainError::storage(format!("writing {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| DomainError::storage(format!("committing {}: {e}", self.path.display())))
    }
}

impl PrincipalStore for FileStore {
    fn find_by_email(&self, email: &str) -> DomainResult<Option<Principal>> {
        self.read(|t| t.principals.iter().find(|p| p.email == email).cloned())
    }

    fn find_by_id(&self, id: PrincipalId) -> DomainResult<Option<Principal>> {
        self.read(|t| t.principals.iter().find(|p| p.id == id).cloned())
    }

    fn insert(&self, principal: Principal) -> DomainResult<Principal> {
        self.commit(|t| store::insert_principal(t, principal))
    }

    fn delete(&self, id: PrincipalId) -> DomainResult<()> {
        self.commit(|t| store::delete_principal(t, id))
    }

    fn list(&self) -> DomainResult<Vec<Principal>> {
        self.read(|t| t.principals.clone())
    }
}

impl LedgerStore for FileStore {
    fn list_customers(&self) -> DomainResult<Vec<Customer>> {
        self.read(|t| t.customers.clone())
    }

    fn get_customer(&self, id: CustomerId) -> DomainResult<Option<Customer>> {
        self.read(|t| t.customers.iter().find(|c| c.id == id).cloned())
    }

    fn customer_exists(&self, id: CustomerId) -> DomainResult<bool> {
        self.read(|t| t.customers.iter().any(|c| c.id == id))
    }

    fn insert_customer(&self, fields: CustomerFields) -> DomainResult<Customer> {
        self.commit(|t| store::insert_customer(t, fields))
    }

    fn update_customer(&self, id: CustomerId, fields: CustomerFields) -> DomainResult<Customer> {
        self.commit(|t| store::update_customer(t, id, fields))
    }

    fn list_transactions(&self) -> DomainResult<Vec<Transaction>> {
        self.read(|t| t.transactions.clone())
    }

    fn list_transactions_for_customer(&self, id: CustomerId) -> DomainResult<Vec<Transaction>> {
        self.read(|t| {
            t.transactions
                .iter()
                .filter(|tx| tx.customer_id == id)
                .cloned()
                .collect()
        })
    }

    fn insert_transaction(&self, tx: NewTransaction) -> DomainResult<Transaction> {
        self.commit(|t| store::insert_transaction(t, tx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    struct TempPath(PathBuf);

    impl TempPath {
        fn new() -> Self {
            let path = std::env::temp_dir().join(format!(
                "ledgerkeep-test-{}.json",
                uuid::Uuid::now_v7()
            ));
            Self(path)
        }
    }

    impl Drop for TempPath {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    fn fields(name: &str, email: &str) -> CustomerFields {
        CustomerFields {
            name: name.to_string(),
            email: Some(email.to_string()),
            phone: None,
            address: None,
        }
    }

    #[test]
    fn data_survives_reopen() {
        let tmp = TempPath::new();

        let alice = {
            let store = FileStore::open(&tmp.0).unwrap();
            let alice = store.insert_customer(fields("Alice", "a@x.com")).unwrap();
            store
                .insert_transaction(NewTransaction {
                    customer_id: alice.id,
                    amount: dec!(10.10),
                    entry_timestamp: Utc::now(),
                    notes: Some("deposit".to_string()),
                })
                .unwrap();
            alice
        };

        let reopened = FileStore::open(&tmp.0).unwrap();
        assert_eq!(reopened.list_customers().unwrap(), vec![alice.clone()]);
        let txs = reopened.list_transactions_for_customer(alice.id).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].amount, dec!(10.10));
    }

    #[test]
    fn duplicate_rule_holds_across_reopen() {
        let tmp = TempPath::new();
        {
            let store = FileStore::open(&tmp.0).unwrap();
            store.insert_customer(fields("Alice", "a@x.com")).unwrap();
        }
        let reopened = FileStore::open(&tmp.0).unwrap();
        assert_eq!(
            reopened.insert_customer(fields("Alice", "a@x.com")),
            Err(DomainError::DuplicateCustomer)
        );
    }

    #[test]
    fn corrupt_snapshot_is_storage_unavailable() {
        let tmp = TempPath::new();
        fs::write(&tmp.0, "{ not json").unwrap();
        assert!(matches!(
            FileStore::open(&tmp.0),
            Err(DomainError::StorageUnavailable(_))
        ));
    }

    #[test]
    fn rejected_mutation_leaves_snapshot_untouched() {
        let tmp = TempPath::new();
        let store = FileStore::open(&tmp.0).unwrap();
        store.insert_customer(fields("Alice", "a@x.com")).unwrap();

        let before = fs::read_to_string(&tmp.0).unwrap();
        let _ = store.insert_customer(fields("Alice", "a@x.com"));
        let after = fs::read_to_string(&tmp.0).unwrap();
        assert_eq!(before, after);
    }
}
