//! Vendor-neutral telemetry data model.
//!
//! This crate defines the in-memory representation of the telemetry the host
//! pipeline hands to the exporter: typed attribute values, spans and metrics,
//! and the resource/scope groupings they arrive in. It carries no conversion
//! logic; converters consume these types read-only.

mod metric;
mod resource;
mod trace;
mod value;

pub mod semconv;

pub use metric::{
    AggregationTemporality, Gauge, Histogram, HistogramDataPoint, Metric, MetricData, Metrics,
    NumberDataPoint, NumberValue, ResourceMetrics, ScopeMetrics, Sum,
};
pub use resource::{InstrumentationScope, Resource};
pub use trace::{
    ResourceSpans, ScopeSpans, Span, SpanId, SpanKind, Status, StatusCode, TraceId, Traces,
};
pub use value::{AttrMap, Value};
