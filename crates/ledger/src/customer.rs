use serde::{Deserialize, Serialize};

use ledgerkeep_core::{CustomerId, DomainError, DomainResult};

/// A ledger customer.
///
/// # Invariants
/// - `name` is non-empty after trimming.
/// - Optional contact fields are never blank strings: empty or
///   whitespace-only input is normalized to `None` at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Raw customer fields as supplied by a caller (create or update).
///
/// Turned into normalized values via [`CustomerFields::normalized`]; blank
/// optional fields collapse to `None` rather than being stored as empty
/// strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerFields {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl CustomerFields {
    /// Validate and normalize the fields.
    pub fn normalized(self) -> DomainResult<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("customer name cannot be empty"));
        }
        Ok(Self {
            name,
            email: normalize_optional(self.email),
            phone: normalize_optional(self.phone),
            address: normalize_optional(self.address),
        })
    }

    /// Build a customer with a fresh identifier from normalized fields.
    pub fn into_customer(self, id: CustomerId) -> DomainResult<Customer> {
        let fields = self.normalized()?;
        Ok(Customer {
            id,
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            address: fields.address,
        })
    }
}

impl Customer {
    /// Apply normalized fields onto an existing record (update path).
    pub fn with_fields(&self, fields: CustomerFields) -> DomainResult<Customer> {
        let fields = fields.normalized()?;
        Ok(Customer {
            id: self.id,
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            address: fields.address,
        })
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Duplicate-customer rule.
///
/// A candidate duplicates an existing record when the name matches exactly
/// (case-sensitive) AND at least one contact channel matches where both sides
/// have it: email equals email, or phone equals phone. Absent fields never
/// match.
pub fn find_duplicate<'a>(
    candidate: &CustomerFields,
    existing: &'a [Customer],
) -> Option<&'a Customer> {
    existing.iter().find(|c| {
        c.name == candidate.name
            && (both_match(&c.email, &candidate.email) || both_match(&c.phone, &candidate.phone))
    })
}

fn both_match(a: &Option<String>, b: &Option<String>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, email: Option<&str>, phone: Option<&str>) -> CustomerFields {
        CustomerFields {
            name: name.to_string(),
            email: email.map(str::to_string),
            phone: phone.map(str::to_string),
            address: None,
        }
    }

    fn customer(name: &str, email: Option<&str>, phone: Option<&str>) -> Customer {
        fields(name, email, phone)
            .into_customer(CustomerId::new())
            .unwrap()
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let normalized = CustomerFields {
            name: "  Alice  ".to_string(),
            email: Some("   ".to_string()),
            phone: Some("".to_string()),
            address: Some(" 1 Main St ".to_string()),
        }
        .normalized()
        .unwrap();

        assert_eq!(normalized.name, "Alice");
        assert_eq!(normalized.email, None);
        assert_eq!(normalized.phone, None);
        assert_eq!(normalized.address.as_deref(), Some("1 Main St"));
    }

    #[test]
    fn empty_name_is_rejected() {
        let result = fields("   ", None, None).normalized();
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn same_name_same_email_is_duplicate() {
        let existing = vec![customer("Alice", Some("a@x.com"), None)];
        let candidate = fields("Alice", Some("a@x.com"), None);
        assert!(find_duplicate(&candidate, &existing).is_some());
    }

    #[test]
    fn same_name_different_email_is_not_duplicate() {
        let existing = vec![customer("Alice", Some("a@x.com"), None)];
        let candidate = fields("Alice", Some("b@x.com"), None);
        assert!(find_duplicate(&candidate, &existing).is_none());
    }

    #[test]
    fn same_name_same_phone_is_duplicate() {
        let existing = vec![customer("Alice", None, Some("555-0100"))];
        let candidate = fields("Alice", Some("b@x.com"), Some("555-0100"));
        assert!(find_duplicate(&candidate, &existing).is_some());
    }

    #[test]
    fn name_match_is_case_sensitive() {
        let existing = vec![customer("Alice", Some("a@x.com"), None)];
        let candidate = fields("alice", Some("a@x.com"), None);
        assert!(find_duplicate(&candidate, &existing).is_none());
    }

    #[test]
    fn absent_contact_fields_never_match() {
        // Name alone is not enough; two contactless "Alice" records are
        // allowed to coexist.
        let existing = vec![customer("Alice", None, None)];
        let candidate = fields("Alice", None, None);
        assert!(find_duplicate(&candidate, &existing).is_none());
    }
}
