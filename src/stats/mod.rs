//! Report engine: request normalization, plan selection, aggregation, forecasting
//! and response shaping.

pub mod aggregate;
pub mod forecast;
pub mod plan;
pub mod request;
pub mod shape;

pub use aggregate::{aggregate, Aggregation, CategoryRow, ImpulseRow, PeriodRow};
pub use forecast::{forecast, EstimateBasis, ForecastPoint, LinearTrend, FORECAST_HORIZON};
pub use plan::{AggregationPlan, Dimension, JoinShape, PlanGranularity, PlanOutput, RecordScope};
pub use request::{DateRange, Narrowing, QueryDescriptor, ReportRequest, ReportType};
pub use shape::{
    shape, shape_forecast, AggregateReport, DetailRow, PredictionPoint, PredictionReport,
    StatisticsResponse,
};
