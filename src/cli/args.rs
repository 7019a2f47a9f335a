use std::path::PathBuf;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::CliError;
use crate::stats::ReportRequest;

/// Parsed `key=value` arguments of one invocation. Later keys override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub user: Option<Uuid>,
    pub report_type: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub today: Option<NaiveDate>,
}

impl CliArgs {
    pub fn parse<I, S>(tokens: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = Self::default();
        for token in tokens {
            let token = token.as_ref();
            let (key, value) = token
                .split_once('=')
                .ok_or_else(|| CliError::Input(format!("expected key=value, got `{token}`")))?;
            let value = value.trim();
            match key.trim() {
                "user" => {
                    let user = Uuid::parse_str(value)
                        .map_err(|_| CliError::Input(format!("invalid user id `{value}`")))?;
                    args.user = Some(user);
                }
                "type" => args.report_type = Some(value.to_string()),
                "year" => args.year = Some(value.to_string()),
                "month" => args.month = Some(value.to_string()),
                "day" => args.day = Some(value.to_string()),
                "start_date" | "startDate" => args.start_date = Some(value.to_string()),
                "end_date" | "endDate" => args.end_date = Some(value.to_string()),
                "category" => args.category = Some(value.to_string()),
                "data_dir" => args.data_dir = Some(PathBuf::from(value)),
                "today" => {
                    let today = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                        .map_err(|_| CliError::Input(format!("invalid date for today: `{value}`")))?;
                    args.today = Some(today);
                }
                other => return Err(CliError::Input(format!("unknown argument `{other}`"))),
            }
        }
        Ok(args)
    }

    /// Builds the report request, falling back to `default_user` when no user was given.
    pub fn to_request(&self, default_user: Option<Uuid>) -> Result<ReportRequest, CliError> {
        let user = self
            .user
            .or(default_user)
            .ok_or_else(|| CliError::Input("missing `user` and no default_user configured".into()))?;
        let report_type = self
            .report_type
            .clone()
            .ok_or_else(|| CliError::Input("missing `type`".into()))?;

        Ok(ReportRequest {
            user_id: user,
            report_type,
            year: self.year.clone(),
            month: self.month.clone(),
            day: self.day.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            category: self.category.clone(),
        })
    }
}
