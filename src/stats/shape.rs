//! Converts aggregations and forecasts into the response documents.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{ExpenseRecord, PeriodKey};

use super::aggregate::{Aggregation, CategoryRow, ImpulseRow, PeriodRow};
use super::forecast::{round_money, ForecastPoint};

/// Stable response of every non-forecast report. Every field is always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    pub labels: Vec<String>,
    pub expenses: Vec<f64>,
    pub incomes: Vec<f64>,
    pub budget: Vec<f64>,
    pub savings: Vec<f64>,
    pub expenses_sum: f64,
    pub incomes_sum: f64,
    pub budget_sum: f64,
    pub details: Vec<DetailRow>,
    pub unplanned_expenses: f64,
    pub planned_expenses: f64,
}

/// Per-row data backing tabular display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DetailRow {
    Period(PeriodDetail),
    Line(LineDetail),
    Category(CategoryDetail),
    Impulse(ImpulseDetail),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDetail {
    pub period: PeriodKey,
    pub expenses: f64,
    pub incomes: f64,
    pub budget: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDetail {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub date: PeriodKey,
    pub category_name: String,
    pub planned_impulsive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    pub category_name: String,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpulseDetail {
    pub period: PeriodKey,
    pub unplanned: f64,
    pub planned: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionPoint {
    pub period: PeriodKey,
    pub avg_expenses: f64,
    pub avg_incomes: f64,
    pub estimated_savings: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictionReport {
    pub predictions: Vec<PredictionPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatisticsResponse {
    Aggregate(AggregateReport),
    Prediction(PredictionReport),
}

impl StatisticsResponse {
    pub fn as_aggregate(&self) -> Option<&AggregateReport> {
        match self {
            StatisticsResponse::Aggregate(report) => Some(report),
            StatisticsResponse::Prediction(_) => None,
        }
    }

    pub fn as_prediction(&self) -> Option<&PredictionReport> {
        match self {
            StatisticsResponse::Prediction(report) => Some(report),
            StatisticsResponse::Aggregate(_) => None,
        }
    }
}

/// Rounds to cents and converts to the wire representation.
pub fn money(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

fn total<'a>(values: impl Iterator<Item = &'a Decimal>) -> f64 {
    money(values.sum())
}

pub fn shape(aggregation: &Aggregation) -> AggregateReport {
    match aggregation {
        Aggregation::Periods(rows) => shape_periods(rows),
        Aggregation::Lines(lines) => shape_lines(lines),
        Aggregation::Categories(rows) => shape_categories(rows),
        Aggregation::Impulses(rows) => shape_impulses(rows),
    }
}

fn shape_periods(rows: &[PeriodRow]) -> AggregateReport {
    AggregateReport {
        labels: rows.iter().map(|row| row.period.to_string()).collect(),
        expenses: rows.iter().map(|row| money(row.expenses_sum)).collect(),
        incomes: rows.iter().map(|row| money(row.incomes_sum)).collect(),
        budget: rows.iter().map(|row| money(row.budget_sum)).collect(),
        savings: rows.iter().map(|row| money(row.savings())).collect(),
        expenses_sum: total(rows.iter().map(|row| &row.expenses_sum)),
        incomes_sum: total(rows.iter().map(|row| &row.incomes_sum)),
        budget_sum: total(rows.iter().map(|row| &row.budget_sum)),
        details: rows
            .iter()
            .map(|row| {
                DetailRow::Period(PeriodDetail {
                    period: row.period,
                    expenses: money(row.expenses_sum),
                    incomes: money(row.incomes_sum),
                    budget: money(row.budget_sum),
                })
            })
            .collect(),
        ..AggregateReport::default()
    }
}

fn shape_lines(lines: &[ExpenseRecord]) -> AggregateReport {
    AggregateReport {
        labels: lines.iter().map(|line| PeriodKey::Day(line.date).to_string()).collect(),
        expenses: lines.iter().map(|line| money(line.amount)).collect(),
        expenses_sum: total(lines.iter().map(|line| &line.amount)),
        details: lines
            .iter()
            .map(|line| {
                DetailRow::Line(LineDetail {
                    id: line.id,
                    name: line.name.clone(),
                    amount: money(line.amount),
                    date: PeriodKey::Day(line.date),
                    category_name: line.category_name.clone(),
                    planned_impulsive: line.planned_impulsive,
                })
            })
            .collect(),
        ..AggregateReport::default()
    }
}

fn shape_categories(rows: &[CategoryRow]) -> AggregateReport {
    AggregateReport {
        labels: rows.iter().map(|row| row.category_name.clone()).collect(),
        expenses: rows.iter().map(|row| money(row.total_amount)).collect(),
        expenses_sum: total(rows.iter().map(|row| &row.total_amount)),
        details: rows
            .iter()
            .map(|row| {
                DetailRow::Category(CategoryDetail {
                    category_name: row.category_name.clone(),
                    total_amount: money(row.total_amount),
                })
            })
            .collect(),
        ..AggregateReport::default()
    }
}

fn shape_impulses(rows: &[ImpulseRow]) -> AggregateReport {
    let totals: Vec<Decimal> = rows.iter().map(ImpulseRow::total).collect();
    AggregateReport {
        labels: rows.iter().map(|row| row.period.to_string()).collect(),
        expenses: totals.iter().copied().map(money).collect(),
        expenses_sum: total(totals.iter()),
        details: rows
            .iter()
            .map(|row| {
                DetailRow::Impulse(ImpulseDetail {
                    period: row.period,
                    unplanned: money(row.impulsive_sum),
                    planned: money(row.planned_sum),
                })
            })
            .collect(),
        unplanned_expenses: total(rows.iter().map(|row| &row.impulsive_sum)),
        planned_expenses: total(rows.iter().map(|row| &row.planned_sum)),
        ..AggregateReport::default()
    }
}

pub fn shape_forecast(points: &[ForecastPoint]) -> PredictionReport {
    PredictionReport {
        predictions: points
            .iter()
            .map(|point| PredictionPoint {
                period: point.period,
                avg_expenses: money(point.avg_expenses),
                avg_incomes: money(point.avg_incomes),
                estimated_savings: money(point.estimated_savings),
            })
            .collect(),
    }
}
