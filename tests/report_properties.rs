mod common;

use common::{clock, date, expense, household, income};
use rust_decimal_macros::dec;
use spendsmart_stats::{
    stats::{AggregateReport, PredictionReport},
    storage::MemorySource,
    ReportRequest, StatisticsService,
};
use uuid::Uuid;

fn aggregate(source: &MemorySource, request: &ReportRequest) -> AggregateReport {
    StatisticsService::report(source, &clock(2024, 6, 15), request)
        .expect("report succeeds")
        .as_aggregate()
        .cloned()
        .expect("aggregate report")
}

fn predict(source: &MemorySource, user: Uuid, today: (i32, u32, u32)) -> PredictionReport {
    let request = ReportRequest::new(user, "prediction");
    StatisticsService::report(source, &clock(today.0, today.1, today.2), &request)
        .expect("prediction succeeds")
        .as_prediction()
        .cloned()
        .expect("prediction report")
}

#[test]
fn monthly_report_lists_every_active_period_once() {
    let fixture = household();
    let report = aggregate(
        &fixture.source,
        &ReportRequest::new(fixture.user, "monthly").year(2024),
    );

    assert_eq!(report.labels, vec!["2024-01", "2024-02", "2024-03"]);
    assert_eq!(report.expenses, vec![750.0, 805.5, 12.25]);
    assert_eq!(report.incomes, vec![2000.0, 2000.0, 0.0]);
    assert_eq!(report.budget, vec![900.0, 850.0, 0.0]);
    assert_eq!(report.savings, vec![1250.0, 1194.5, -12.25]);
}

#[test]
fn category_totals_match_the_expense_total_of_the_range() {
    let fixture = household();
    let by_category = aggregate(
        &fixture.source,
        &ReportRequest::new(fixture.user, "expensesByCategory").between("2024-01-01", "2024-12-31"),
    );
    let by_period = aggregate(
        &fixture.source,
        &ReportRequest::new(fixture.user, "expensesByPeriod").between("2024-01-01", "2024-12-31"),
    );

    assert_eq!(by_category.labels, vec!["Rent", "Food", "Fun"]);
    assert_eq!(by_category.expenses, vec![1400.0, 130.0, 37.75]);
    assert_eq!(by_category.expenses_sum, 1567.75);
    assert_eq!(by_category.expenses_sum, by_period.expenses_sum);
}

#[test]
fn unplanned_and_planned_partition_the_expense_total() {
    let fixture = household();
    let report = aggregate(
        &fixture.source,
        &ReportRequest::new(fixture.user, "unplannedExpenses").year(2024),
    );

    assert_eq!(report.unplanned_expenses, 37.75);
    assert_eq!(report.planned_expenses, 1530.0);
    assert_eq!(
        report.unplanned_expenses + report.planned_expenses,
        report.expenses_sum
    );
}

#[test]
fn single_month_history_forecasts_a_flat_line() {
    let user = Uuid::new_v4();
    let mut source = MemorySource::new();
    source
        .add_expense(expense(user, dec!(300), date(2024, 5, 2), "Food"))
        .add_income(income(user, dec!(1000), date(2024, 5, 28)));

    let report = predict(&source, user, (2024, 5, 15));
    let labels: Vec<String> = report.predictions.iter().map(|p| p.period.to_string()).collect();
    assert_eq!(labels, vec!["2024-06", "2024-07", "2024-08"]);
    for point in &report.predictions {
        assert_eq!(point.avg_expenses, 300.0);
        assert_eq!(point.avg_incomes, 1000.0);
        assert_eq!(point.estimated_savings, 700.0);
    }
}

#[test]
fn seasonal_history_wins_over_the_trend() {
    let user = Uuid::new_v4();
    let mut source = MemorySource::new();
    source
        .add_expense(expense(user, dec!(100), date(2023, 7, 4), "Travel"))
        .add_income(income(user, dec!(500), date(2023, 7, 30)));
    for (month, amount) in [(1, dec!(200)), (2, dec!(400)), (3, dec!(600)), (4, dec!(800))] {
        source.add_expense(expense(user, amount, date(2024, month, 10), "Food"));
    }

    let report = predict(&source, user, (2024, 6, 10));
    let july = &report.predictions[0];
    assert_eq!(july.period.to_string(), "2024-07");
    assert_eq!(july.avg_expenses, 100.0);
    assert_eq!(july.avg_incomes, 500.0);
    assert_eq!(july.estimated_savings, 400.0);
}

#[test]
fn general_report_matches_the_reference_example() {
    let user = Uuid::new_v4();
    let mut source = MemorySource::new();
    source
        .add_expense(expense(user, dec!(50), date(2024, 1, 12), "Food"))
        .add_expense(expense(user, dec!(80), date(2024, 2, 8), "Food"))
        .add_income(income(user, dec!(1000), date(2024, 1, 31)));

    let report = aggregate(&source, &ReportRequest::new(user, "general"));
    assert_eq!(report.labels, vec!["2024-01", "2024-02"]);
    assert_eq!(report.expenses, vec![50.0, 80.0]);
    assert_eq!(report.incomes, vec![1000.0, 0.0]);
    assert_eq!(report.budget, vec![0.0, 0.0]);
}

#[test]
fn inverted_range_is_empty_rather_than_an_error() {
    let fixture = household();
    let report = aggregate(
        &fixture.source,
        &ReportRequest::new(fixture.user, "expensesByPeriod").between("2024-03-01", "2024-01-01"),
    );
    assert!(report.details.is_empty());
    assert!(report.labels.is_empty());
    assert_eq!(report.expenses_sum, 0.0);
}

#[test]
fn another_user_never_leaks_into_reports() {
    let fixture = household();
    let report = aggregate(
        &fixture.source,
        &ReportRequest::new(fixture.stranger, "monthly").year(2024),
    );
    assert_eq!(report.labels, vec!["2024-01"]);
    assert_eq!(report.expenses, vec![9999.0]);
    assert_eq!(report.budget, vec![0.0]);
}
