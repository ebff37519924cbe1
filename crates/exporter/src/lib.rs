//! Exporter that translates vendor-neutral telemetry into the Instana bundle
//! format and ships it to an Instana agent over HTTP.
//!
//! The host pipeline hands us parsed [`instana_pdata::Traces`] and
//! [`instana_pdata::Metrics`] batches; a family of converters reshapes them
//! into Instana spans and plugin payloads, which are accumulated into a single
//! bundle per export call and POSTed to the agent's `/bundle` endpoint.
//!
//! Logging goes through the `log` facade; the host is expected to install a
//! logger.

pub mod config;
pub mod model;

mod converter;
mod exporter;

pub use config::Config;
pub use converter::{
    CollectorConverter, ConvertAll, Converter, CustomMetricsConverter, DockerConverter,
    GoRuntimeConverter, HostConverter, JavaRuntimeConverter, ProcessConverter,
    PythonRuntimeConverter, SpanConverter,
};
pub use exporter::Exporter;
