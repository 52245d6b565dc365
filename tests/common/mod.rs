#![allow(dead_code)]

use chrono::NaiveDate;
use expense_core::records::{Category, ExpenseDraft};
use expense_core::store::{MemoryStore, RecordStore};
use rust_decimal::Decimal;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn draft(
    title: &str,
    amount: Decimal,
    category: Category,
    date: NaiveDate,
) -> ExpenseDraft {
    ExpenseDraft::new(title, amount, category, date)
}

/// Builds a store holding the given expenses, in creation order.
pub fn seeded_store(entries: &[(&str, Decimal, Category, NaiveDate)]) -> MemoryStore {
    let mut store = MemoryStore::new();
    for (title, amount, category, date) in entries {
        store
            .create(draft(title, *amount, *category, *date))
            .expect("seed record");
    }
    store
}
