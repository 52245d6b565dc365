use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{ExpenseError, Result};
use crate::records::Category;

/// Store-assigned identifier. Ids are handed out from a monotonically
/// increasing sequence, so a higher id always means a later creation.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single recorded expense. Immutable once created; changed only by full
/// replacement or deletion through the record store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub id: RecordId,
    pub title: String,
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Create/replace payload. The store validates it and assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExpenseDraft {
    pub fn new(
        title: impl Into<String>,
        amount: Decimal,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            amount,
            category,
            date,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks the draft invariants: a non-empty title and a non-negative
    /// amount. Dates are already valid by construction of `NaiveDate`.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ExpenseError::Validation(
                "title must not be empty".to_string(),
            ));
        }
        if self.amount < Decimal::ZERO {
            return Err(ExpenseError::Validation(format!(
                "amount must not be negative (got {})",
                self.amount
            )));
        }
        Ok(())
    }

    /// Promotes a validated draft into a record with the given id.
    pub fn into_record(self, id: RecordId) -> ExpenseRecord {
        ExpenseRecord {
            id,
            title: self.title,
            amount: self.amount,
            category: self.category,
            date: self.date,
            description: self.description,
        }
    }
}
