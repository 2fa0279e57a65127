//! Balance aggregation and customer search.
//!
//! Pure functions over already-fetched data: no queries, no lazy
//! object-graph traversal. The storage collaborator decides how the inputs
//! are loaded; these functions decide what they mean.

use rust_decimal::Decimal;

use crate::customer::Customer;
use crate::transaction::Transaction;

/// Sum the amounts of a customer's transactions.
///
/// Exact decimal arithmetic throughout; the empty set sums to exact zero.
/// Callers are expected to pass only the transactions belonging to the
/// customer in question (see `list_transactions_for_customer` on the store).
pub fn compute_balance(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .fold(Decimal::ZERO, |acc, tx| acc + tx.amount)
}

/// Outcome of a customer search.
///
/// `NoMatch` and `EmptyPopulation` are rendered identically to API callers
/// (an empty result), but remain distinguishable here so the two cases can
/// be asserted separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<'a> {
    Matches(Vec<&'a Customer>),
    /// The population was non-empty but nothing matched the query.
    NoMatch,
    /// There were no customers to search at all.
    EmptyPopulation,
}

impl<'a> SearchOutcome<'a> {
    /// The matched customers, empty for both non-match outcomes.
    pub fn into_matches(self) -> Vec<&'a Customer> {
        match self {
            SearchOutcome::Matches(items) => items,
            SearchOutcome::NoMatch | SearchOutcome::EmptyPopulation => Vec::new(),
        }
    }
}

/// Case-insensitive substring search over customer name or address.
pub fn search<'a>(query: &str, customers: &'a [Customer]) -> SearchOutcome<'a> {
    if customers.is_empty() {
        return SearchOutcome::EmptyPopulation;
    }

    let needle = query.to_lowercase();
    let matches: Vec<&Customer> = customers
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&needle)
                || c.address
                    .as_deref()
                    .is_some_and(|a| a.to_lowercase().contains(&needle))
        })
        .collect();

    if matches.is_empty() {
        SearchOutcome::NoMatch
    } else {
        SearchOutcome::Matches(matches)
    }
}
