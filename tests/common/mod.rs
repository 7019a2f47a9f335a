#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use spendsmart_stats::{
    core::FixedClock,
    domain::{BudgetEntry, ExpenseRecord, IncomeRecord, UserId},
    storage::{JsonRecordStore, MemorySource, UserRecords},
};
use tempfile::TempDir;
use uuid::Uuid;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Category ids keyed by name, shared across fixtures.
static CATEGORY_IDS: Lazy<Mutex<Vec<(String, Uuid)>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

pub fn clock(y: i32, m: u32, d: u32) -> FixedClock {
    FixedClock::new(date(y, m, d))
}

fn category_id(name: &str) -> Uuid {
    let mut ids = CATEGORY_IDS.lock().expect("lock category registry");
    if let Some((_, id)) = ids.iter().find(|(existing, _)| existing == name) {
        return *id;
    }
    let id = Uuid::new_v4();
    ids.push((name.to_string(), id));
    id
}

pub fn expense(user: UserId, amount: Decimal, on: NaiveDate, category: &str) -> ExpenseRecord {
    ExpenseRecord::new(
        user,
        category.to_lowercase(),
        amount,
        on,
        category_id(category),
        category,
    )
}

pub fn income(user: UserId, amount: Decimal, on: NaiveDate) -> IncomeRecord {
    IncomeRecord::new(user, "Salary", amount, on)
}

/// A user with early-2024 activity plus a stranger whose records must never leak.
pub struct Household {
    pub user: UserId,
    pub stranger: UserId,
    pub source: MemorySource,
}

pub fn household() -> Household {
    let user = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let mut source = MemorySource::new();
    source
        .add_expense(expense(user, dec!(50), date(2024, 1, 10), "Food"))
        .add_expense(expense(user, dec!(700), date(2024, 1, 1), "Rent"))
        .add_expense(expense(user, dec!(25.5), date(2024, 2, 14), "Fun").impulsive())
        .add_expense(expense(user, dec!(80), date(2024, 2, 20), "Food"))
        .add_expense(expense(user, dec!(700), date(2024, 2, 1), "Rent"))
        .add_expense(expense(user, dec!(12.25), date(2024, 3, 3), "Fun").impulsive())
        .add_expense(expense(stranger, dec!(9999), date(2024, 1, 5), "Food"))
        .add_income(income(user, dec!(2000), date(2024, 1, 25)))
        .add_income(income(user, dec!(2000), date(2024, 2, 25)))
        .add_income(income(stranger, dec!(5000), date(2024, 1, 25)))
        .set_budget(BudgetEntry::new(user, 2024, 1, dec!(900)))
        .set_budget(BudgetEntry::new(user, 2024, 2, dec!(850)));
    Household {
        user,
        stranger,
        source,
    }
}

/// Writes the records built by `records` for a fresh user into a temporary JSON store.
pub fn seeded_store(records: impl FnOnce(UserId) -> UserRecords) -> (JsonRecordStore, UserId) {
    let user = Uuid::new_v4();
    let store = JsonRecordStore::new(Some(temp_base())).expect("create json record store");
    store
        .save_user(user, &records(user))
        .expect("seed user records");
    (store, user)
}
