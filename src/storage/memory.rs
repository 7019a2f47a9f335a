use crate::domain::{BudgetEntry, ExpenseRecord, IncomeRecord, UserId};

use super::{RecordFilter, RecordSource, Result};

/// Record source backed by vectors held in memory. Holds records of any number of users.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    expenses: Vec<ExpenseRecord>,
    incomes: Vec<IncomeRecord>,
    budgets: Vec<BudgetEntry>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(
        expenses: Vec<ExpenseRecord>,
        incomes: Vec<IncomeRecord>,
        budgets: Vec<BudgetEntry>,
    ) -> Self {
        Self {
            expenses,
            incomes,
            budgets,
        }
    }

    pub fn add_expense(&mut self, expense: ExpenseRecord) -> &mut Self {
        self.expenses.push(expense);
        self
    }

    pub fn add_income(&mut self, income: IncomeRecord) -> &mut Self {
        self.incomes.push(income);
        self
    }

    /// Stores a budget, replacing any existing entry for the same user and month.
    pub fn set_budget(&mut self, budget: BudgetEntry) -> &mut Self {
        self.budgets.retain(|existing| {
            !(existing.user_id == budget.user_id
                && existing.year == budget.year
                && existing.month == budget.month)
        });
        self.budgets.push(budget);
        self
    }

    pub fn len(&self) -> usize {
        self.expenses.len() + self.incomes.len() + self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordSource for MemorySource {
    fn query_expenses(&self, user_id: UserId, filter: &RecordFilter) -> Result<Vec<ExpenseRecord>> {
        Ok(filter.select_expenses(user_id, &self.expenses))
    }

    fn query_incomes(&self, user_id: UserId, filter: &RecordFilter) -> Result<Vec<IncomeRecord>> {
        Ok(filter.select_incomes(user_id, &self.incomes))
    }

    fn query_budgets(&self, user_id: UserId, filter: &RecordFilter) -> Result<Vec<BudgetEntry>> {
        Ok(filter.select_budgets(user_id, &self.budgets))
    }
}
