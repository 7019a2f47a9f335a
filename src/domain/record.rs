//! Read-only snapshots of the user-owned records the statistics engine consumes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A single spending entry.
///
/// `category_name` is the category label captured when the expense was
/// written; renaming the category later does not touch existing expenses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub user_id: UserId,
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: Uuid,
    pub category_name: String,
    /// `true` when the expense was impulsive, `false` when it was planned.
    #[serde(default)]
    pub planned_impulsive: bool,
}

impl ExpenseRecord {
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
        category_id: Uuid,
        category_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            amount,
            date,
            category_id,
            category_name: category_name.into(),
            planned_impulsive: false,
        }
    }

    pub fn impulsive(mut self) -> Self {
        self.planned_impulsive = true;
        self
    }

    pub fn is_impulsive(&self) -> bool {
        self.planned_impulsive
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeRecord {
    pub id: Uuid,
    pub user_id: UserId,
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl IncomeRecord {
    pub fn new(user_id: UserId, name: impl Into<String>, amount: Decimal, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            amount,
            date,
        }
    }
}

/// Monthly budget set by a user. At most one entry exists per calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetEntry {
    pub id: Uuid,
    pub user_id: UserId,
    pub year: i32,
    pub month: u32,
    pub amount: Decimal,
}

impl BudgetEntry {
    pub fn new(user_id: UserId, year: i32, month: u32, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            year,
            month,
            amount,
        }
    }
}

impl Identifiable for ExpenseRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Identifiable for IncomeRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Identifiable for BudgetEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Owned for ExpenseRecord {
    fn user_id(&self) -> UserId {
        self.user_id
    }
}

impl Owned for IncomeRecord {
    fn user_id(&self) -> UserId {
        self.user_id
    }
}

impl Owned for BudgetEntry {
    fn user_id(&self) -> UserId {
        self.user_id
    }
}

impl NamedEntity for ExpenseRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

impl NamedEntity for IncomeRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Dated for ExpenseRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for IncomeRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Amounted for ExpenseRecord {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl Amounted for IncomeRecord {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl Amounted for BudgetEntry {
    fn amount(&self) -> Decimal {
        self.amount
    }
}
