pub mod json_backend;
pub mod memory;

use chrono::{Datelike, NaiveDate};

use crate::{
    domain::{period::month_bounds, BudgetEntry, ExpenseRecord, IncomeRecord, Owned, UserId},
    errors::StorageError,
    stats::request::{DateRange, Narrowing},
};

pub type Result<T> = std::result::Result<T, StorageError>;

/// Read-only access to the per-user record streams.
///
/// Implementations return only records owned by `user_id` and admitted by
/// `filter`, with amounts as exact decimals.
pub trait RecordSource: Send + Sync {
    fn query_expenses(&self, user_id: UserId, filter: &RecordFilter) -> Result<Vec<ExpenseRecord>>;
    fn query_incomes(&self, user_id: UserId, filter: &RecordFilter) -> Result<Vec<IncomeRecord>>;
    fn query_budgets(&self, user_id: UserId, filter: &RecordFilter) -> Result<Vec<BudgetEntry>>;

    /// Reads expenses plus the optional `streams` for one report.
    ///
    /// Sources backed by a single document should override this to read it once.
    fn query_records(
        &self,
        user_id: UserId,
        filter: &RecordFilter,
        streams: Streams,
    ) -> Result<RecordSet> {
        let expenses = self.query_expenses(user_id, filter)?;
        let incomes = if streams.incomes {
            self.query_incomes(user_id, filter)?
        } else {
            Vec::new()
        };
        let budgets = if streams.budgets {
            self.query_budgets(user_id, filter)?
        } else {
            Vec::new()
        };
        Ok(RecordSet {
            expenses,
            incomes,
            budgets,
        })
    }
}

/// Optional streams a report reads next to its expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Streams {
    pub incomes: bool,
    pub budgets: bool,
}

impl Streams {
    pub fn all() -> Self {
        Self {
            incomes: true,
            budgets: true,
        }
    }
}

/// How a day filter inside a calendar window is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayMode {
    /// Only the given day.
    #[default]
    Exact,
    /// Every day of the month up to and including the given day.
    UpTo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordWindow {
    #[default]
    All,
    Range(DateRange),
    Calendar(Narrowing),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordFilter {
    pub window: RecordWindow,
    pub day_mode: DayMode,
    /// Category name narrowing, compared case-insensitively. Applies to expenses only.
    pub category: Option<String>,
}

impl RecordFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn admits_date(&self, date: NaiveDate) -> bool {
        match &self.window {
            RecordWindow::All => true,
            RecordWindow::Range(range) => range.contains(date),
            RecordWindow::Calendar(narrowing) => {
                if narrowing.year.is_some_and(|year| year != date.year()) {
                    return false;
                }
                if narrowing.month.is_some_and(|month| month != date.month()) {
                    return false;
                }
                match (narrowing.day, self.day_mode) {
                    (None, _) => true,
                    (Some(day), DayMode::Exact) => date.day() == day,
                    (Some(day), DayMode::UpTo) => date.day() <= day,
                }
            }
        }
    }

    /// Budgets cover whole months; day narrowing never excludes them.
    pub fn admits_month(&self, year: i32, month: u32) -> bool {
        match &self.window {
            RecordWindow::All => true,
            RecordWindow::Range(range) => month_bounds(year, month)
                .is_some_and(|(first, last)| range.overlaps(first, last)),
            RecordWindow::Calendar(narrowing) => {
                narrowing.year.map_or(true, |y| y == year)
                    && narrowing.month.map_or(true, |m| m == month)
            }
        }
    }

    pub fn admits_category(&self, category_name: &str) -> bool {
        match &self.category {
            None => true,
            Some(wanted) => wanted.trim().to_lowercase() == category_name.trim().to_lowercase(),
        }
    }

    pub fn select_expenses<'a>(
        &self,
        user_id: UserId,
        records: impl IntoIterator<Item = &'a ExpenseRecord>,
    ) -> Vec<ExpenseRecord> {
        records
            .into_iter()
            .filter(|record| record.user_id() == user_id)
            .filter(|record| self.admits_date(record.date) && self.admits_category(&record.category_name))
            .cloned()
            .collect()
    }

    pub fn select_incomes<'a>(
        &self,
        user_id: UserId,
        records: impl IntoIterator<Item = &'a IncomeRecord>,
    ) -> Vec<IncomeRecord> {
        records
            .into_iter()
            .filter(|record| record.user_id() == user_id && self.admits_date(record.date))
            .cloned()
            .collect()
    }

    pub fn select_budgets<'a>(
        &self,
        user_id: UserId,
        records: impl IntoIterator<Item = &'a BudgetEntry>,
    ) -> Vec<BudgetEntry> {
        records
            .into_iter()
            .filter(|entry| entry.user_id() == user_id && self.admits_month(entry.year, entry.month))
            .cloned()
            .collect()
    }
}

/// The three record streams read for a single report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub expenses: Vec<ExpenseRecord>,
    pub incomes: Vec<IncomeRecord>,
    pub budgets: Vec<BudgetEntry>,
}

pub use json_backend::{JsonRecordStore, UserRecords};
pub use memory::MemorySource;
