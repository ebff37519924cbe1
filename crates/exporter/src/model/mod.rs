//! The Instana wire model: what a serialized bundle looks like on the way to
//! the agent.

mod bundle;
mod id;
mod plugin;
mod span;

pub use bundle::{Bundle, PluginContainer};
pub use id::{hex_span_id, hex_trace_id, IdError};
pub use plugin::{
    CpuSummary, CustomMetricsData, DockerData, GenericZoneData, GoProcessData, HostData,
    JvmProcessData, MetricMaps, PluginData, PluginPayload, ProcessData, PythonProcessData,
    RuntimeInfo,
};
pub use span::{convert_span, FromS, OTelSpanData, Span, OTEL_SPAN_TYPE};
