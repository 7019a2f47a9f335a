mod common;

use common::{clock, date, expense, household, income};
use rust_decimal_macros::dec;
use spendsmart_stats::{
    errors::QueryError,
    stats::{AggregateReport, DetailRow},
    storage::MemorySource,
    ReportRequest, ServiceError, StatisticsService,
};
use uuid::Uuid;

fn run(source: &MemorySource, request: ReportRequest) -> AggregateReport {
    StatisticsService::report(source, &clock(2024, 6, 15), &request)
        .expect("report succeeds")
        .as_aggregate()
        .cloned()
        .expect("aggregate report")
}

fn reject(request: ReportRequest) -> QueryError {
    match StatisticsService::report(&MemorySource::new(), &clock(2024, 6, 15), &request) {
        Err(ServiceError::Query(err)) => err,
        other => panic!("expected a query error, got {other:?}"),
    }
}

#[test]
fn annual_report_groups_by_year() {
    let fixture = household();
    let report = run(&fixture.source, ReportRequest::new(fixture.user, "annual"));
    assert_eq!(report.labels, vec!["2024"]);
    assert_eq!(report.expenses, vec![1567.75]);
    assert_eq!(report.incomes, vec![4000.0]);
    assert_eq!(report.budget, vec![1750.0]);
    assert_eq!(report.budget_sum, 1750.0);
}

#[test]
fn daily_report_narrows_to_one_month() {
    let fixture = household();
    let report = run(
        &fixture.source,
        ReportRequest::new(fixture.user, "daily").year(2024).month(2),
    );
    assert_eq!(report.labels, vec!["2024-02-01", "2024-02-14", "2024-02-20", "2024-02-25"]);
    assert_eq!(report.expenses, vec![700.0, 25.5, 80.0, 0.0]);
    assert_eq!(report.incomes, vec![0.0, 0.0, 0.0, 2000.0]);
    assert_eq!(report.budget, vec![0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn budget_comparison_sums_month_to_date() {
    let fixture = household();
    let report = run(
        &fixture.source,
        ReportRequest::new(fixture.user, "budgetComparison")
            .year(2024)
            .month(2)
            .day(15),
    );
    assert_eq!(report.labels, vec!["2024-02"]);
    assert_eq!(report.expenses, vec![725.5]);
    assert_eq!(report.incomes, vec![0.0]);
    assert_eq!(report.budget, vec![850.0]);
}

#[test]
fn month_without_year_is_ignored() {
    let fixture = household();
    let narrowed = run(&fixture.source, ReportRequest::new(fixture.user, "monthly").month(2));
    let unfiltered = run(&fixture.source, ReportRequest::new(fixture.user, "monthly"));
    assert_eq!(narrowed, unfiltered);
    assert_eq!(unfiltered.labels.len(), 3);
}

#[test]
fn category_filter_is_case_insensitive() {
    let fixture = household();
    let report = run(
        &fixture.source,
        ReportRequest::new(fixture.user, "expensesByPeriod")
            .between("2024-01-01", "2024-12-31")
            .category("food"),
    );
    assert_eq!(report.labels, vec!["2024-01-10", "2024-02-20"]);
    assert_eq!(report.expenses_sum, 130.0);
    assert!(report
        .details
        .iter()
        .all(|row| matches!(row, DetailRow::Line(line) if line.category_name == "Food")));
}

#[test]
fn unplanned_report_switches_to_days_inside_a_month() {
    let fixture = household();
    let report = run(
        &fixture.source,
        ReportRequest::new(fixture.user, "unplannedExpenses")
            .year(2024)
            .month(2),
    );
    assert_eq!(report.labels, vec!["2024-02-01", "2024-02-14", "2024-02-20"]);
    assert_eq!(report.unplanned_expenses, 25.5);
    assert_eq!(report.planned_expenses, 780.0);
}

#[test]
fn general_report_fills_months_without_expenses() {
    let user = Uuid::new_v4();
    let mut source = MemorySource::new();
    source
        .add_expense(expense(user, dec!(10), date(2023, 11, 3), "Food"))
        .add_expense(expense(user, dec!(20), date(2024, 2, 3), "Food"))
        .add_income(income(user, dec!(500), date(2023, 10, 1)));

    let report = run(&source, ReportRequest::new(user, "general"));
    assert_eq!(report.labels, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);
    assert_eq!(report.expenses, vec![10.0, 0.0, 0.0, 20.0]);
    assert_eq!(report.incomes_sum, 0.0);
}

#[test]
fn unknown_user_gets_empty_reports() {
    let fixture = household();
    for kind in ["general", "annual", "monthly", "daily", "unplannedExpenses"] {
        let report = run(&fixture.source, ReportRequest::new(Uuid::new_v4(), kind));
        assert!(report.labels.is_empty(), "{kind}");
        assert_eq!(report.expenses_sum, 0.0, "{kind}");
    }
}

#[test]
fn range_reports_need_both_dates() {
    let mut request = ReportRequest::new(Uuid::new_v4(), "expensesByCategory");
    request.start_date = Some("2024-01-01".into());
    assert!(matches!(reject(request), QueryError::MissingDateRange(_)));
}

#[test]
fn malformed_dates_and_filters_are_rejected() {
    let user = Uuid::new_v4();
    assert!(matches!(
        reject(ReportRequest::new(user, "expensesByPeriod").between("2024-13-01", "2024-12-31")),
        QueryError::InvalidDate { field: "start_date", .. }
    ));
    assert!(matches!(
        reject(ReportRequest::new(user, "monthly").year("twenty")),
        QueryError::InvalidFilter { field: "year", .. }
    ));
    assert!(matches!(
        reject(ReportRequest::new(user, "monthly").year(2024).month(13)),
        QueryError::InvalidFilter { field: "month", .. }
    ));
}

#[test]
fn json_requests_accept_numbers_and_camel_case_dates() {
    let fixture = household();
    let json = format!(
        r#"{{"user_id":"{}","type":"expensesByCategory","startDate":"2024-02-01","endDate":"2024-02-29"}}"#,
        fixture.user
    );
    let request: ReportRequest = serde_json::from_str(&json).unwrap();
    let report = run(&fixture.source, request);
    assert_eq!(report.labels, vec!["Rent", "Food", "Fun"]);

    let json = format!(r#"{{"user_id":"{}","type":"monthly","year":2024,"month":""}}"#, fixture.user);
    let request: ReportRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(run(&fixture.source, request).labels.len(), 3);
}
