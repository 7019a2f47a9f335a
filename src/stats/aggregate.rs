//! Executes an [`AggregationPlan`] over the record streams of one request.
//!
//! Each stream is grouped on its own into an ordered map keyed by period; the
//! maps are then merged by key union with missing sums read as zero. No rounding
//! happens here.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{
    Amounted, BudgetEntry, Dated, ExpenseRecord, Granularity, Identifiable, NamedEntity, PeriodKey,
};
use crate::storage::RecordSet;

use super::plan::{AggregationPlan, Dimension, JoinShape};
use super::request::Narrowing;

/// Sums of the three streams for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodRow {
    pub period: PeriodKey,
    pub expenses_sum: Decimal,
    pub incomes_sum: Decimal,
    pub budget_sum: Decimal,
}

impl PeriodRow {
    pub fn empty(period: PeriodKey) -> Self {
        Self {
            period,
            expenses_sum: Decimal::ZERO,
            incomes_sum: Decimal::ZERO,
            budget_sum: Decimal::ZERO,
        }
    }

    pub fn savings(&self) -> Decimal {
        self.incomes_sum - self.expenses_sum
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub category_name: String,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpulseRow {
    pub period: PeriodKey,
    pub impulsive_sum: Decimal,
    pub planned_sum: Decimal,
}

impl ImpulseRow {
    pub fn total(&self) -> Decimal {
        self.impulsive_sum + self.planned_sum
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    Periods(Vec<PeriodRow>),
    /// Raw expenses ordered by date.
    Lines(Vec<ExpenseRecord>),
    Categories(Vec<CategoryRow>),
    Impulses(Vec<ImpulseRow>),
}

impl Aggregation {
    pub fn len(&self) -> usize {
        match self {
            Aggregation::Periods(rows) => rows.len(),
            Aggregation::Lines(rows) => rows.len(),
            Aggregation::Categories(rows) => rows.len(),
            Aggregation::Impulses(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Period rows, empty for dimension aggregations.
    pub fn periods(&self) -> &[PeriodRow] {
        match self {
            Aggregation::Periods(rows) => rows,
            _ => &[],
        }
    }
}

pub fn aggregate(plan: &AggregationPlan, narrowing: &Narrowing, records: &RecordSet) -> Aggregation {
    // Whole-window plans only pair with the category dimension.
    let granularity = plan
        .granularity
        .resolve(narrowing)
        .unwrap_or(Granularity::Month);

    match plan.dimension {
        Dimension::Line => Aggregation::Lines(expense_lines(&records.expenses)),
        Dimension::Category => Aggregation::Categories(by_category(&records.expenses)),
        Dimension::Impulsive => Aggregation::Impulses(by_impulse(granularity, &records.expenses)),
        Dimension::None => {
            let expenses = group_sums(granularity, &records.expenses);
            let incomes = if plan.read_incomes {
                group_sums(granularity, &records.incomes)
            } else {
                BTreeMap::new()
            };
            let budgets = if plan.read_budgets {
                budget_sums(granularity, &records.budgets)
            } else {
                BTreeMap::new()
            };
            Aggregation::Periods(merge(plan.join_shape, &expenses, &incomes, &budgets))
        }
    }
}

/// Sums amounts per period key.
pub fn group_sums<T: Dated + Amounted>(granularity: Granularity, items: &[T]) -> BTreeMap<PeriodKey, Decimal> {
    let mut sums = BTreeMap::new();
    for item in items {
        *sums.entry(granularity.key_for(item.date())).or_insert(Decimal::ZERO) += item.amount();
    }
    sums
}

fn budget_sums(granularity: Granularity, budgets: &[BudgetEntry]) -> BTreeMap<PeriodKey, Decimal> {
    let mut sums = BTreeMap::new();
    for entry in budgets {
        if let Some(key) = granularity.key_for_month(entry.year, entry.month) {
            *sums.entry(key).or_insert(Decimal::ZERO) += entry.amount;
        }
    }
    sums
}

fn merge(
    shape: JoinShape,
    expenses: &BTreeMap<PeriodKey, Decimal>,
    incomes: &BTreeMap<PeriodKey, Decimal>,
    budgets: &BTreeMap<PeriodKey, Decimal>,
) -> Vec<PeriodRow> {
    let keys: Vec<PeriodKey> = match shape {
        JoinShape::OuterJoin => expenses
            .keys()
            .chain(incomes.keys())
            .chain(budgets.keys())
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
        JoinShape::ExpenseKeys => expenses.keys().copied().collect(),
        JoinShape::ExpenseSpan => match (expenses.keys().next(), expenses.keys().next_back()) {
            (Some(first), Some(last)) => first.span_to(last),
            _ => Vec::new(),
        },
    };

    let lookup = |sums: &BTreeMap<PeriodKey, Decimal>, key: &PeriodKey| {
        sums.get(key).copied().unwrap_or(Decimal::ZERO)
    };

    keys.into_iter()
        .map(|period| PeriodRow {
            expenses_sum: lookup(expenses, &period),
            incomes_sum: lookup(incomes, &period),
            budget_sum: lookup(budgets, &period),
            period,
        })
        .collect()
}

fn by_category(expenses: &[ExpenseRecord]) -> Vec<CategoryRow> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category_name.as_str()).or_insert(Decimal::ZERO) += expense.amount;
    }
    let mut rows: Vec<CategoryRow> = totals
        .into_iter()
        .map(|(name, total_amount)| CategoryRow {
            category_name: name.to_string(),
            total_amount,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then_with(|| a.category_name.cmp(&b.category_name))
    });
    rows
}

fn by_impulse(granularity: Granularity, expenses: &[ExpenseRecord]) -> Vec<ImpulseRow> {
    let mut sums: BTreeMap<PeriodKey, (Decimal, Decimal)> = BTreeMap::new();
    for expense in expenses {
        let entry = sums
            .entry(granularity.key_for(expense.date))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        if expense.is_impulsive() {
            entry.0 += expense.amount;
        } else {
            entry.1 += expense.amount;
        }
    }
    sums.into_iter()
        .map(|(period, (impulsive_sum, planned_sum))| ImpulseRow {
            period,
            impulsive_sum,
            planned_sum,
        })
        .collect()
}

fn expense_lines(expenses: &[ExpenseRecord]) -> Vec<ExpenseRecord> {
    let mut lines = expenses.to_vec();
    lines.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.name().cmp(b.name()))
            .then_with(|| a.id().cmp(&b.id()))
    });
    lines
}
