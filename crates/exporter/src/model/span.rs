use std::collections::BTreeMap;

use instana_pdata::{self as pdata, SpanKind, StatusCode};
use serde::Serialize;

use crate::model::id::{hex_span_id, hex_trace_id, IdError};

/// Every span we emit is typed `otel` on the Instana side.
pub const OTEL_SPAN_TYPE: &str = "otel";

const KIND_SERVER: &str = "server";
const KIND_CLIENT: &str = "client";
const KIND_PRODUCER: &str = "producer";
const KIND_CONSUMER: &str = "consumer";
const KIND_INTERNAL: &str = "internal";
const KIND_UNKNOWN: &str = "unknown";

const DATA_ERROR: &str = "error";
const DATA_ERROR_DETAIL: &str = "error_detail";

const NANOS_PER_MILLI: u64 = 1_000_000;

/// Origin descriptor: which host and entity produced a span.
#[derive(Debug, Clone, Serialize)]
pub struct FromS {
    #[serde(rename = "e")]
    pub entity_id: String,
    #[serde(rename = "h", skip_serializing_if = "String::is_empty")]
    pub host_id: String,
}

/// Span payload carried under `data` on the wire.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OTelSpanData {
    pub kind: String,
    #[serde(rename = "tp", skip_serializing_if = "is_false")]
    pub has_trace_parent: bool,
    #[serde(rename = "service")]
    pub service_name: String,
    pub operation: String,
    #[serde(rename = "trace_state", skip_serializing_if = "String::is_empty")]
    pub trace_state: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

/// An Instana span as serialized into a bundle.
#[derive(Debug, Clone, Serialize)]
pub struct Span {
    /// Short trace id: the low-order 16 hex chars of the canonical form.
    #[serde(rename = "t")]
    pub trace_id: String,
    #[serde(rename = "p", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(rename = "s")]
    pub span_id: String,
    /// Full 32-hex-char canonical trace id.
    #[serde(rename = "lt", skip_serializing_if = "String::is_empty")]
    pub long_trace_id: String,
    #[serde(rename = "ts")]
    pub timestamp: u64,
    #[serde(rename = "d")]
    pub duration: u64,
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "f")]
    pub from: FromS,
    #[serde(rename = "ec", skip_serializing_if = "Option::is_none")]
    pub error_count: Option<u32>,
    pub data: OTelSpanData,
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn kind_to_instana(kind: SpanKind) -> (&'static str, bool) {
    match kind {
        SpanKind::Server => (KIND_SERVER, true),
        SpanKind::Client => (KIND_CLIENT, false),
        SpanKind::Producer => (KIND_PRODUCER, false),
        SpanKind::Consumer => (KIND_CONSUMER, true),
        SpanKind::Internal => (KIND_INTERNAL, false),
        SpanKind::Unspecified => (KIND_UNKNOWN, false),
    }
}

/// Converts one inbound span into its Instana wire form.
///
/// Fails only on malformed (over-width) identifiers; the caller drops the span
/// and continues with the rest of the batch.
pub fn convert_span(
    from: FromS,
    span: &pdata::Span,
    service_name: &str,
) -> Result<Span, IdError> {
    let long_trace_id = hex_trace_id(&span.trace_id)?;
    let span_id = hex_span_id(&span.span_id)?;
    let parent_id = span
        .parent_span_id
        .as_ref()
        .filter(|p| !p.is_empty())
        .map(hex_span_id)
        .transpose()?;

    let (kind, is_entry) = kind_to_instana(span.kind);

    let mut data = OTelSpanData {
        kind: kind.to_string(),
        has_trace_parent: parent_id.is_some() && is_entry,
        service_name: service_name.to_string(),
        operation: span.name.clone(),
        trace_state: span.trace_state.clone(),
        tags: BTreeMap::new(),
    };

    for (key, value) in span.attributes.sorted() {
        data.tags.insert(key.to_string(), value.to_string());
    }

    let mut error_count = None;
    if span.status.code == StatusCode::Error {
        error_count = Some(1);
        data.tags
            .insert(DATA_ERROR.to_string(), span.status.code.to_string());
        data.tags
            .insert(DATA_ERROR_DETAIL.to_string(), span.status.message.clone());
    }

    Ok(Span {
        trace_id: long_trace_id[16..].to_string(),
        parent_id,
        span_id,
        long_trace_id,
        timestamp: span.start_time_unix_nano / NANOS_PER_MILLI,
        duration: span
            .end_time_unix_nano
            .saturating_sub(span.start_time_unix_nano)
            / NANOS_PER_MILLI,
        name: OTEL_SPAN_TYPE.to_string(),
        from,
        error_count,
        data,
    })
}
