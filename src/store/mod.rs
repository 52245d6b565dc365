pub mod json_backend;
pub mod memory;

use crate::errors::Result;
use crate::records::{ExpenseDraft, ExpenseRecord, RecordId};

/// Abstraction over backends that own the live expense record set.
///
/// Mutations are serializable at this boundary: each call completes fully
/// before its effect is observable, and `list_all` always returns a
/// consistent snapshot for aggregation.
pub trait RecordStore: Send + Sync {
    /// Full snapshot of the live record set.
    fn list_all(&self) -> Result<Vec<ExpenseRecord>>;

    /// Validates the draft, assigns the next id, and stores the record.
    fn create(&mut self, draft: ExpenseDraft) -> Result<ExpenseRecord>;

    /// Replaces the record wholesale, keeping its id.
    fn update(&mut self, id: RecordId, draft: ExpenseDraft) -> Result<ExpenseRecord>;

    /// Removes the record, returning the removed instance.
    fn delete(&mut self, id: RecordId) -> Result<ExpenseRecord>;
}

pub use json_backend::JsonStore;
pub use memory::MemoryStore;
