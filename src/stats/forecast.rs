//! Three-month-ahead forecast of expenses, incomes and savings.
//!
//! Each target month uses the seasonal average of the same calendar month when
//! history has one, and the least-squares trend line otherwise.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::domain::PeriodKey;

use super::aggregate::PeriodRow;

pub const FORECAST_HORIZON: i32 = 3;

const MONEY_SCALE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateBasis {
    Seasonal,
    Trend,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub period: PeriodKey,
    pub avg_expenses: Decimal,
    pub avg_incomes: Decimal,
    pub estimated_savings: Decimal,
    pub basis: EstimateBasis,
}

/// Ordinary least-squares line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinearTrend {
    pub slope: Decimal,
    pub intercept: Decimal,
}

impl LinearTrend {
    /// Fits the line through `(x, y)` points. A vertical or empty point set
    /// yields a zero slope.
    pub fn fit(points: &[(Decimal, Decimal)]) -> Self {
        if points.is_empty() {
            return Self::default();
        }
        let n = Decimal::from(points.len());
        let (sum_x, sum_y, sum_xy, sum_xx) = points.iter().fold(
            (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
            |(sx, sy, sxy, sxx), (x, y)| (sx + x, sy + y, sxy + x * y, sxx + x * x),
        );

        let denominator = n * sum_xx - sum_x * sum_x;
        let slope = if denominator.is_zero() {
            Decimal::ZERO
        } else {
            (n * sum_xy - sum_x * sum_y)
                .checked_div(denominator)
                .unwrap_or(Decimal::ZERO)
        };
        let intercept = (sum_y - slope * sum_x)
            .checked_div(n)
            .unwrap_or(Decimal::ZERO);
        Self { slope, intercept }
    }

    pub fn at(&self, x: Decimal) -> Decimal {
        self.intercept + self.slope * x
    }
}

/// Rounds to cents, halves away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Default)]
struct SeasonalSum {
    expenses: Decimal,
    incomes: Decimal,
    count: u32,
}

impl SeasonalSum {
    fn average(&self) -> (Decimal, Decimal) {
        let count = Decimal::from(self.count);
        (self.expenses / count, self.incomes / count)
    }
}

/// Forecasts the three months following `today`'s month from monthly history.
///
/// Only months with a strictly positive expense or income sum count as history.
/// The rest are dropped before indexing, so gaps compress the regression time axis.
pub fn forecast(history: &[PeriodRow], today: NaiveDate) -> Vec<ForecastPoint> {
    let mut active: Vec<&PeriodRow> = history
        .iter()
        .filter(|row| row.expenses_sum > Decimal::ZERO || row.incomes_sum > Decimal::ZERO)
        .collect();
    active.sort_by_key(|row| row.period);

    let mut seasons: BTreeMap<u32, SeasonalSum> = BTreeMap::new();
    for row in &active {
        if let Some(month) = row.period.month_number() {
            let season = seasons.entry(month).or_default();
            season.expenses += row.expenses_sum;
            season.incomes += row.incomes_sum;
            season.count += 1;
        }
    }

    let indexed = |value: fn(&PeriodRow) -> Decimal| -> Vec<(Decimal, Decimal)> {
        active
            .iter()
            .enumerate()
            .map(|(i, row)| (Decimal::from(i + 1), value(row)))
            .collect()
    };
    let expense_trend = LinearTrend::fit(&indexed(|row| row.expenses_sum));
    let income_trend = LinearTrend::fit(&indexed(|row| row.incomes_sum));
    let n = Decimal::from(active.len());

    (1..=FORECAST_HORIZON)
        .map(|offset| {
            let period = PeriodKey::month_after(today, offset);
            let seasonal = period
                .month_number()
                .and_then(|month| seasons.get(&month))
                .map(SeasonalSum::average);

            let (expenses, incomes, basis) = match seasonal {
                Some((expenses, incomes)) => (expenses, incomes, EstimateBasis::Seasonal),
                None => {
                    let x = n + Decimal::from(offset);
                    debug!(%period, history = active.len(), "no seasonal history, using trend");
                    (expense_trend.at(x), income_trend.at(x), EstimateBasis::Trend)
                }
            };

            let avg_expenses = round_money(expenses);
            let avg_incomes = round_money(incomes);
            ForecastPoint {
                period,
                avg_expenses,
                avg_incomes,
                estimated_savings: avg_incomes - avg_expenses,
                basis,
            }
        })
        .collect()
}
