use serde::{Deserialize, Serialize};

use crate::errors::{ExpenseError, Result};
use crate::records::{ExpenseDraft, ExpenseRecord, RecordId};
use crate::store::RecordStore;

/// In-memory record set with sequence-assigned ids.
///
/// Ids grow monotonically and are never reused, so they double as a
/// creation-order proxy for recency tie-breaks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MemoryStore {
    records: Vec<ExpenseRecord>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&ExpenseRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    fn position(&self, id: RecordId) -> Result<usize> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .ok_or(ExpenseError::NotFound(id))
    }

    fn next_id(&mut self) -> RecordId {
        self.next_id += 1;
        RecordId(self.next_id)
    }
}

impl RecordStore for MemoryStore {
    fn list_all(&self) -> Result<Vec<ExpenseRecord>> {
        Ok(self.records.clone())
    }

    fn create(&mut self, draft: ExpenseDraft) -> Result<ExpenseRecord> {
        draft.validate()?;
        let record = draft.into_record(self.next_id());
        tracing::info!(id = %record.id, title = %record.title, "expense created");
        self.records.push(record.clone());
        Ok(record)
    }

    fn update(&mut self, id: RecordId, draft: ExpenseDraft) -> Result<ExpenseRecord> {
        draft.validate()?;
        let index = self.position(id)?;
        let record = draft.into_record(id);
        self.records[index] = record.clone();
        tracing::info!(id = %id, "expense replaced");
        Ok(record)
    }

    fn delete(&mut self, id: RecordId) -> Result<ExpenseRecord> {
        let index = self.position(id)?;
        let removed = self.records.remove(index);
        tracing::info!(id = %id, "expense deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::records::Category;

    fn draft(title: &str) -> ExpenseDraft {
        ExpenseDraft::new(
            title,
            dec!(12.50),
            Category::Food,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
    }

    #[test]
    fn create_assigns_increasing_ids() {
        let mut store = MemoryStore::new();
        let first = store.create(draft("Coffee")).unwrap();
        let second = store.create(draft("Lunch")).unwrap();
        assert!(second.id > first.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn create_rejects_invalid_draft() {
        let mut store = MemoryStore::new();
        let mut bad = draft("Coffee");
        bad.amount = dec!(-5);
        assert!(matches!(
            store.create(bad),
            Err(ExpenseError::Validation(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn delete_removes_and_returns_record() {
        let mut store = MemoryStore::new();
        let record = store.create(draft("Coffee")).unwrap();
        let removed = store.delete(record.id).unwrap();
        assert_eq!(removed, record);
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn delete_missing_record_is_not_found() {
        let mut store = MemoryStore::new();
        let err = store.delete(RecordId(99)).expect_err("must fail");
        assert!(matches!(err, ExpenseError::NotFound(RecordId(99))));
    }

    #[test]
    fn update_replaces_wholesale_but_keeps_id() {
        let mut store = MemoryStore::new();
        let record = store.create(draft("Coffee")).unwrap();
        let replacement = draft("Espresso").with_description("double shot");
        let updated = store.update(record.id, replacement).unwrap();
        assert_eq!(updated.id, record.id);
        assert_eq!(updated.title, "Espresso");
        assert_eq!(store.get(record.id).unwrap().title, "Espresso");
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = MemoryStore::new();
        let first = store.create(draft("Coffee")).unwrap();
        store.delete(first.id).unwrap();
        let second = store.create(draft("Lunch")).unwrap();
        assert!(second.id > first.id);
    }
}
