use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ledgerkeep_core::{CustomerId, DomainError, DomainResult, TransactionId};

/// A signed financial transaction owned by exactly one customer.
///
/// Immutable once created: no update or delete operation exists for
/// transactions in this subsystem. Amounts are exact fixed-point decimals,
/// never binary floating point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub customer_id: CustomerId,
    pub amount: Decimal,
    pub entry_timestamp: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Caller-supplied fields for a new transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub customer_id: CustomerId,
    pub amount: Decimal,
    pub entry_timestamp: DateTime<Utc>,
    pub notes: Option<String>,
}

impl NewTransaction {
    pub fn into_transaction(self, id: TransactionId) -> Transaction {
        let notes = self.notes.and_then(|n| {
            let trimmed = n.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        });
        Transaction {
            id,
            customer_id: self.customer_id,
            amount: self.amount,
            entry_timestamp: self.entry_timestamp,
            notes,
        }
    }
}

/// Referential integrity check for transaction creation.
///
/// A transaction may only be created against a customer that exists at
/// creation time; orphaned transactions must never be persisted.
pub fn validate_transaction(
    customer_id: CustomerId,
    known_customer_ids: &[CustomerId],
) -> DomainResult<()> {
    if known_customer_ids.contains(&customer_id) {
        Ok(())
    } else {
        Err(DomainError::UnknownCustomer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn validate_accepts_known_customer() {
        let id = CustomerId::new();
        assert_eq!(validate_transaction(id, &[CustomerId::new(), id]), Ok(()));
    }

    #[test]
    fn validate_rejects_unknown_customer() {
        let result = validate_transaction(CustomerId::new(), &[CustomerId::new()]);
        assert_eq!(result, Err(DomainError::UnknownCustomer));
    }

    #[test]
    fn validate_rejects_against_empty_population() {
        let result = validate_transaction(CustomerId::new(), &[]);
        assert_eq!(result, Err(DomainError::UnknownCustomer));
    }

    #[test]
    fn blank_notes_are_normalized_away() {
        let tx = NewTransaction {
            customer_id: CustomerId::new(),
            amount: dec!(1.00),
            entry_timestamp: Utc::now(),
            notes: Some("   ".to_string()),
        }
        .into_transaction(TransactionId::new());
        assert_eq!(tx.notes, None);
    }
}
