//! Storage traits and the shared table logic both backends commit through.

use serde::{Deserialize, Serialize};

use ledgerkeep_auth::Principal;
use ledgerkeep_core::{CustomerId, DomainError, DomainResult, TransactionId};
use ledgerkeep_ledger::{
    find_duplicate, validate_transaction, Customer, CustomerFields, NewTransaction, Transaction,
};

/// Narrow storage contract for customers and transactions (the ledger side
/// of the store). Principal operations live on
/// [`ledgerkeep_auth::PrincipalStore`].
pub trait LedgerStore: Send + Sync {
    fn list_customers(&self) -> DomainResult<Vec<Customer>>;
    fn get_customer(&self, id: CustomerId) -> DomainResult<Option<Customer>>;
    fn customer_exists(&self, id: CustomerId) -> DomainResult<bool>;
    /// Insert after running the duplicate-customer rule; the check and the
    /// insert commit together, so concurrent identical creations cannot both
    /// succeed.
    fn insert_customer(&self, fields: CustomerFields) -> DomainResult<Customer>;
    fn update_customer(&self, id: CustomerId, fields: CustomerFields) -> DomainResult<Customer>;
    fn list_transactions(&self) -> DomainResult<Vec<Transaction>>;
    fn list_transactions_for_customer(&self, id: CustomerId) -> DomainResult<Vec<Transaction>>;
    /// Insert after re-checking the customer reference under the commit
    /// boundary; orphaned transactions are never persisted.
    fn insert_transaction(&self, tx: NewTransaction) -> DomainResult<Transaction>;
}

/// All persisted tables. Backends hold one of these behind a lock; the file
/// backend also snapshots it to disk as its commit point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Tables {
    pub principals: Vec<Principal>,
    pub customers: Vec<Customer>,
    pub transactions: Vec<Transaction>,
}

// Mutations below are pure functions over `Tables`. Backends call them while
// holding their lock, which is what makes each uniqueness rule a storage
// constraint rather than a racy application-level pre-check.

pub(crate) fn insert_principal(tables: &mut Tables, principal: Principal) -> DomainResult<Principal> {
    if tables.principals.iter().any(|p| p.email == principal.email) {
        return Err(DomainError::DuplicateEmail);
    }
    tables.principals.push(principal.clone());
    Ok(principal)
}

pub(crate) fn delete_principal(
    tables: &mut Tables,
    id: ledgerkeep_core::PrincipalId,
) -> DomainResult<()> {
    let before = tables.principals.len();
    tables.principals.retain(|p| p.id != id);
    if tables.principals.len() == before {
        return Err(DomainError::NotFound);
    }
    Ok(())
}

pub(crate) fn insert_customer(
    tables: &mut Tables,
    fields: CustomerFields,
) -> DomainResult<Customer> {
    let fields = fields.normalized()?;
    if find_duplicate(&fields, &tables.customers).is_some() {
        return Err(DomainError::DuplicateCustomer);
    }
    let customer = fields.into_customer(CustomerId::new())?;
    tables.customers.push(customer.clone());
    Ok(customer)
}

pub(crate) fn update_customer(
    tables: &mut Tables,
    id: CustomerId,
    fields: CustomerFields,
) -> DomainResult<Customer> {
    let existing = tables
        .customers
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or(DomainError::NotFound)?;
    let updated = existing.with_fields(fields)?;
    *existing = updated.clone();
    Ok(updated)
}

pub(crate) fn insert_transaction(
    tables: &mut Tables,
    tx: NewTransaction,
) -> DomainResult<Transaction> {
    let known: Vec<CustomerId> = tables.customers.iter().map(|c| c.id).collect();
    validate_transaction(tx.customer_id, &known)?;
    let tx = tx.into_transaction(TransactionId::new());
    tables.transactions.push(tx.clone());
    Ok(tx)
}
