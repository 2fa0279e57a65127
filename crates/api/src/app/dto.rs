use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ledgerkeep_auth::Principal;
use ledgerkeep_core::{CustomerId, PrincipalId, TransactionId};
use ledgerkeep_ledger::{Customer, CustomerFields, NewTransaction, Transaction};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CustomerRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl From<CustomerRequest> for CustomerFields {
    fn from(req: CustomerRequest) -> Self {
        CustomerFields {
            name: req.name,
            email: req.email,
            phone: req.phone,
            address: req.address,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub customer_id: CustomerId,
    pub amount: Decimal,
    pub entry_timestamp: DateTime<Utc>,
    pub notes: Option<String>,
}

impl From<CreateTransactionRequest> for NewTransaction {
    fn from(req: CreateTransactionRequest) -> Self {
        NewTransaction {
            customer_id: req.customer_id,
            amount: req.amount,
            entry_timestamp: req.entry_timestamp,
            notes: req.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub is_admin: bool,
}

/// Principal view without the credential digest.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: PrincipalId,
    pub email: String,
    pub is_admin: bool,
}

impl From<Principal> for UserResponse {
    fn from(p: Principal) -> Self {
        Self {
            id: p.id,
            email: p.email,
            is_admin: p.is_admin,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: TransactionId,
    pub customer_id: CustomerId,
    pub amount: Decimal,
    pub entry_timestamp: DateTime<Utc>,
    pub notes: Option<String>,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            customer_id: tx.customer_id,
            amount: tx.amount,
            entry_timestamp: tx.entry_timestamp,
            notes: tx.notes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: CustomerId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub transactions: Vec<TransactionResponse>,
}

impl CustomerResponse {
    pub fn new(customer: Customer, transactions: Vec<Transaction>) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            address: customer.address,
            transactions: transactions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Search result row: one matched customer with their current balance.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub customer_id: CustomerId,
    pub name: String,
    pub balance: Decimal,
}

impl From<(Customer, Decimal)> for BalanceResponse {
    fn from((customer, balance): (Customer, Decimal)) -> Self {
        Self {
            customer_id: customer.id,
            name: customer.name,
            balance,
        }
    }
}
