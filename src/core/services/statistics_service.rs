use tracing::{debug, info, warn};

use crate::core::time::Clock;
use crate::stats::{
    aggregate, forecast, shape, shape_forecast, AggregationPlan, PlanOutput, QueryDescriptor,
    ReportRequest, StatisticsResponse,
};
use crate::storage::{RecordSet, RecordSource, Streams};

use super::{ServiceError, ServiceResult};

/// Runs report requests end to end against a record source.
pub struct StatisticsService;

impl StatisticsService {
    pub fn report(
        source: &dyn RecordSource,
        clock: &dyn Clock,
        request: &ReportRequest,
    ) -> ServiceResult<StatisticsResponse> {
        let query = QueryDescriptor::normalize(request).map_err(|err| {
            warn!(user = %request.user_id, report = %request.report_type, %err, "rejected report request");
            ServiceError::from(err)
        })?;
        debug!(
            user = %query.user_id,
            report = %query.report_type,
            narrowing = ?query.narrowing,
            range = ?query.range,
            "normalized report request"
        );

        let plan = AggregationPlan::for_report(query.report_type);
        let records = Self::fetch(source, &plan, &query)?;
        let aggregation = aggregate(&plan, &plan.narrowing(&query), &records);

        let response = match plan.output {
            PlanOutput::Report => StatisticsResponse::Aggregate(shape(&aggregation)),
            PlanOutput::Forecast => {
                let points = forecast(aggregation.periods(), clock.today());
                StatisticsResponse::Prediction(shape_forecast(&points))
            }
        };
        info!(
            user = %query.user_id,
            report = %query.report_type,
            rows = aggregation.len(),
            "report generated"
        );
        Ok(response)
    }

    /// Reads the streams a plan needs. An inverted date range reads nothing.
    pub fn fetch(
        source: &dyn RecordSource,
        plan: &AggregationPlan,
        query: &QueryDescriptor,
    ) -> ServiceResult<RecordSet> {
        if query.range.is_some_and(|range| range.is_empty()) {
            debug!(user = %query.user_id, "date range is inverted, skipping reads");
            return Ok(RecordSet::default());
        }

        let filter = plan.record_filter(query);
        let streams = Streams {
            incomes: plan.read_incomes,
            budgets: plan.read_budgets,
        };
        let records = source
            .query_records(query.user_id, &filter, streams)
            .map_err(|err| {
                warn!(user = %query.user_id, %err, "record source failed");
                ServiceError::from(err)
            })?;
        debug!(
            expenses = records.expenses.len(),
            incomes = records.incomes.len(),
            budgets = records.budgets.len(),
            "fetched records"
        );
        Ok(records)
    }
}
