pub mod common;
pub mod period;
pub mod record;

pub use common::{Amounted, Dated, Identifiable, NamedEntity, Owned, UserId};
pub use period::{Granularity, PeriodKey};
pub use record::{BudgetEntry, ExpenseRecord, IncomeRecord};
