//! Expense record domain models and category metadata.

pub mod category;
pub mod expense;

pub use category::Category;
pub use expense::{ExpenseDraft, ExpenseRecord, RecordId};
