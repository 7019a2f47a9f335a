//! Report requests and their normalisation into typed query descriptors.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::UserId;
use crate::errors::QueryError;

/// The fixed set of reports the engine can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportType {
    General,
    Annual,
    Monthly,
    Daily,
    BudgetComparison,
    ExpensesByPeriod,
    ExpensesByCategory,
    UnplannedExpenses,
    Prediction,
}

impl ReportType {
    pub const ALL: [ReportType; 9] = [
        ReportType::General,
        ReportType::Annual,
        ReportType::Monthly,
        ReportType::Daily,
        ReportType::BudgetComparison,
        ReportType::ExpensesByPeriod,
        ReportType::ExpensesByCategory,
        ReportType::UnplannedExpenses,
        ReportType::Prediction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::General => "general",
            ReportType::Annual => "annual",
            ReportType::Monthly => "monthly",
            ReportType::Daily => "daily",
            ReportType::BudgetComparison => "budgetComparison",
            ReportType::ExpensesByPeriod => "expensesByPeriod",
            ReportType::ExpensesByCategory => "expensesByCategory",
            ReportType::UnplannedExpenses => "unplannedExpenses",
            ReportType::Prediction => "prediction",
        }
    }

    /// Reports scoped by an explicit `[start_date, end_date]` window.
    pub fn is_range_based(&self) -> bool {
        matches!(
            self,
            ReportType::ExpensesByPeriod | ReportType::ExpensesByCategory
        )
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = QueryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        ReportType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == trimmed)
            .ok_or_else(|| QueryError::InvalidReportType(raw.to_string()))
    }
}

/// Raw report request as received from the caller.
///
/// Calendar filters accept JSON strings or integers; empty strings count as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportRequest {
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub report_type: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub month: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub day: Option<String>,
    #[serde(default, alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(default, alias = "endDate")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ReportRequest {
    pub fn new(user_id: UserId, report_type: impl Into<String>) -> Self {
        Self {
            user_id,
            report_type: report_type.into(),
            ..Self::default()
        }
    }

    pub fn year(mut self, year: impl ToString) -> Self {
        self.year = Some(year.to_string());
        self
    }

    pub fn month(mut self, month: impl ToString) -> Self {
        self.month = Some(month.to_string());
        self
    }

    pub fn day(mut self, day: impl ToString) -> Self {
        self.day = Some(day.to_string());
        self
    }

    pub fn between(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Int(i64),
        Text(String),
    }

    Ok(Option::<Loose>::deserialize(deserializer)?.map(|value| match value {
        Loose::Int(number) => number.to_string(),
        Loose::Text(text) => text,
    }))
}

/// Optional calendar narrowing. A month is only kept alongside a year and a day
/// only alongside a month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Narrowing {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl Narrowing {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn year(year: i32) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn month(year: i32, month: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: None,
        }
    }

    pub fn day(year: i32, month: u32, day: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: Some(day),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_none()
    }
}

/// Inclusive date window. A window whose start follows its end admits nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn overlaps(&self, first: NaiveDate, last: NaiveDate) -> bool {
        !self.is_empty() && first <= self.end && last >= self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// Validated, typed form of a [`ReportRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    pub user_id: UserId,
    pub report_type: ReportType,
    pub narrowing: Narrowing,
    pub range: Option<DateRange>,
    pub category: Option<String>,
}

impl QueryDescriptor {
    pub fn normalize(request: &ReportRequest) -> Result<Self, QueryError> {
        let report_type: ReportType = request.report_type.parse()?;

        if report_type.is_range_based() {
            let (start, end) = match (present(&request.start_date), present(&request.end_date)) {
                (Some(start), Some(end)) => (start, end),
                _ => return Err(QueryError::MissingDateRange(report_type)),
            };
            let range = DateRange::new(parse_date("start_date", start)?, parse_date("end_date", end)?);
            return Ok(Self {
                user_id: request.user_id,
                report_type,
                narrowing: Narrowing::none(),
                range: Some(range),
                category: present(&request.category).map(str::to_string),
            });
        }

        let year = parse_number::<i32>("year", &request.year)?;
        let month = parse_number::<u32>("month", &request.month)?;
        let day = parse_number::<u32>("day", &request.day)?;
        if let Some(month) = month {
            if !(1..=12).contains(&month) {
                return Err(QueryError::InvalidFilter {
                    field: "month",
                    value: month.to_string(),
                });
            }
        }
        if let Some(day) = day {
            if !(1..=31).contains(&day) {
                return Err(QueryError::InvalidFilter {
                    field: "day",
                    value: day.to_string(),
                });
            }
        }

        let month = year.and(month);
        let day = month.and(day);

        Ok(Self {
            user_id: request.user_id,
            report_type,
            narrowing: Narrowing { year, month, day },
            range: None,
            category: None,
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|text| !text.is_empty())
}

fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, QueryError> {
    // Timestamps such as `2024-01-31T00:00:00Z` are accepted by their date part.
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .filter(|date| date.year() > 0)
        .ok_or_else(|| QueryError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}

fn parse_number<T: FromStr>(field: &'static str, raw: &Option<String>) -> Result<Option<T>, QueryError> {
    match present(raw) {
        None => Ok(None),
        Some(text) => text
            .parse::<T>()
            .map(Some)
            .map_err(|_| QueryError::InvalidFilter {
                field,
                value: text.to_string(),
            }),
    }
}
