use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::{
    core::utils::{app_data_dir, ensure_dir, users_dir_in},
    domain::{BudgetEntry, ExpenseRecord, IncomeRecord, UserId},
    utils::persistence::{load_json_or_default, save_json},
};

use super::{RecordFilter, RecordSet, RecordSource, Result, Streams};

const USER_FILE_EXTENSION: &str = "json";

/// On-disk snapshot of every record owned by one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecords {
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    #[serde(default)]
    pub incomes: Vec<IncomeRecord>,
    #[serde(default)]
    pub budgets: Vec<BudgetEntry>,
}

/// Record source reading one JSON document per user from `<root>/users/<uuid>.json`.
///
/// A user without a document has no records. Records whose `user_id` differs from
/// the document owner are ignored. `query_records` parses the document once per
/// report; the per-stream queries each parse it again.
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    root: PathBuf,
    users_dir: PathBuf,
}

impl JsonRecordStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        let users_dir = users_dir_in(&root);
        ensure_dir(&users_dir)?;
        Ok(Self { root, users_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn user_path(&self, user_id: UserId) -> PathBuf {
        self.users_dir
            .join(format!("{}.{}", user_id.hyphenated(), USER_FILE_EXTENSION))
    }

    pub fn load_user(&self, user_id: UserId) -> Result<UserRecords> {
        load_json_or_default(&self.user_path(user_id))
    }

    /// Replaces the stored snapshot of `user_id`. Used by import and seeding tools.
    pub fn save_user(&self, user_id: UserId, records: &UserRecords) -> Result<()> {
        save_json(records, &self.user_path(user_id))
    }

    fn owned(&self, user_id: UserId) -> Result<UserRecords> {
        let records = self.load_user(user_id)?;
        let foreign = records.expenses.iter().filter(|r| r.user_id != user_id).count()
            + records.incomes.iter().filter(|r| r.user_id != user_id).count()
            + records.budgets.iter().filter(|r| r.user_id != user_id).count();
        if foreign > 0 {
            warn!(user = %user_id, foreign, "ignoring records owned by another user");
        }
        Ok(records)
    }
}

impl RecordSource for JsonRecordStore {
    fn query_expenses(&self, user_id: UserId, filter: &RecordFilter) -> Result<Vec<ExpenseRecord>> {
        let records = self.owned(user_id)?;
        Ok(filter.select_expenses(user_id, &records.expenses))
    }

    fn query_incomes(&self, user_id: UserId, filter: &RecordFilter) -> Result<Vec<IncomeRecord>> {
        let records = self.owned(user_id)?;
        Ok(filter.select_incomes(user_id, &records.incomes))
    }

    fn query_budgets(&self, user_id: UserId, filter: &RecordFilter) -> Result<Vec<BudgetEntry>> {
        let records = self.owned(user_id)?;
        Ok(filter.select_budgets(user_id, &records.budgets))
    }

    fn query_records(
        &self,
        user_id: UserId,
        filter: &RecordFilter,
        streams: Streams,
    ) -> Result<RecordSet> {
        let records = self.owned(user_id)?;
        Ok(RecordSet {
            expenses: filter.select_expenses(user_id, &records.expenses),
            incomes: if streams.incomes {
                filter.select_incomes(user_id, &records.incomes)
            } else {
                Vec::new()
            },
            budgets: if streams.budgets {
                filter.select_budgets(user_id, &records.budgets)
            } else {
                Vec::new()
            },
        })
    }
}
