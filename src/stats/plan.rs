//! Declarative aggregation plans, one per report type.

use crate::domain::Granularity;
use crate::storage::{DayMode, RecordFilter, RecordWindow};

use super::request::{Narrowing, QueryDescriptor, ReportType};

/// Bucketing rule of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanGranularity {
    Fixed(Granularity),
    /// Daily when the query narrows to a month, monthly otherwise.
    Adaptive,
    /// A single bucket spanning the whole window.
    Whole,
}

impl PlanGranularity {
    /// Concrete period granularity for a narrowing, `None` for whole-window plans.
    pub fn resolve(&self, narrowing: &Narrowing) -> Option<Granularity> {
        match self {
            PlanGranularity::Fixed(granularity) => Some(*granularity),
            PlanGranularity::Adaptive if narrowing.month.is_some() => Some(Granularity::Day),
            PlanGranularity::Adaptive => Some(Granularity::Month),
            PlanGranularity::Whole => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    None,
    Category,
    Impulsive,
    /// Raw expense rows, labelled by day.
    Line,
}

/// How the keys of the grouped streams combine into output rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinShape {
    /// Any key present in any stream.
    OuterJoin,
    /// Only keys reported by the expense stream.
    ExpenseKeys,
    /// Every key between the first and last expense key, inclusive.
    ExpenseSpan,
}

/// Which records a plan reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordScope {
    Narrowed,
    DateRange,
    FullHistory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutput {
    Report,
    Forecast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationPlan {
    pub granularity: PlanGranularity,
    pub dimension: Dimension,
    pub join_shape: JoinShape,
    pub read_incomes: bool,
    pub read_budgets: bool,
    pub scope: RecordScope,
    pub day_mode: DayMode,
    pub output: PlanOutput,
}

impl AggregationPlan {
    const PERIODS: AggregationPlan = AggregationPlan {
        granularity: PlanGranularity::Fixed(Granularity::Month),
        dimension: Dimension::None,
        join_shape: JoinShape::OuterJoin,
        read_incomes: true,
        read_budgets: true,
        scope: RecordScope::Narrowed,
        day_mode: DayMode::Exact,
        output: PlanOutput::Report,
    };

    const EXPENSES_ONLY: AggregationPlan = AggregationPlan {
        join_shape: JoinShape::ExpenseKeys,
        read_incomes: false,
        read_budgets: false,
        ..Self::PERIODS
    };

    pub fn for_report(report_type: ReportType) -> Self {
        match report_type {
            ReportType::General => Self {
                join_shape: JoinShape::ExpenseSpan,
                ..Self::PERIODS
            },
            ReportType::Annual => Self {
                granularity: PlanGranularity::Fixed(Granularity::Year),
                join_shape: JoinShape::ExpenseKeys,
                ..Self::PERIODS
            },
            ReportType::Monthly => Self::PERIODS,
            ReportType::Daily => Self {
                granularity: PlanGranularity::Fixed(Granularity::Day),
                read_budgets: false,
                ..Self::PERIODS
            },
            ReportType::BudgetComparison => Self {
                day_mode: DayMode::UpTo,
                ..Self::PERIODS
            },
            ReportType::ExpensesByPeriod => Self {
                granularity: PlanGranularity::Fixed(Granularity::Day),
                dimension: Dimension::Line,
                scope: RecordScope::DateRange,
                ..Self::EXPENSES_ONLY
            },
            ReportType::ExpensesByCategory => Self {
                granularity: PlanGranularity::Whole,
                dimension: Dimension::Category,
                scope: RecordScope::DateRange,
                ..Self::EXPENSES_ONLY
            },
            ReportType::UnplannedExpenses => Self {
                granularity: PlanGranularity::Adaptive,
                dimension: Dimension::Impulsive,
                ..Self::EXPENSES_ONLY
            },
            ReportType::Prediction => Self {
                read_budgets: false,
                scope: RecordScope::FullHistory,
                output: PlanOutput::Forecast,
                ..Self::PERIODS
            },
        }
    }

    /// Record filter handed to the record source for this plan and query.
    pub fn record_filter(&self, query: &QueryDescriptor) -> RecordFilter {
        let window = match (self.scope, query.range) {
            (RecordScope::DateRange, Some(range)) => RecordWindow::Range(range),
            (RecordScope::Narrowed, _) if !query.narrowing.is_empty() => {
                RecordWindow::Calendar(query.narrowing)
            }
            _ => RecordWindow::All,
        };
        RecordFilter {
            window,
            day_mode: self.day_mode,
            category: query.category.clone(),
        }
    }

    /// Narrowing the aggregator should resolve adaptive granularity against.
    pub fn narrowing(&self, query: &QueryDescriptor) -> Narrowing {
        match self.scope {
            RecordScope::Narrowed => query.narrowing,
            _ => Narrowing::none(),
        }
    }
}
