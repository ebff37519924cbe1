use std::fmt::{self, Display};

use crate::{AttrMap, InstrumentationScope, Resource};

/// A trace identifier as supplied by the host, possibly narrower than the
/// canonical 16 bytes. Widening to the canonical form is the exporter's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceId(Vec<u8>);

impl TraceId {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

/// A span identifier, canonically 8 bytes wide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanId(Vec<u8>);

impl SpanId {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpanKind {
    #[default]
    Unspecified,
    Internal,
    Server,
    Client,
    Producer,
    Consumer,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusCode {
    #[default]
    Unset,
    Ok,
    Error,
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusCode::Unset => "Unset",
            StatusCode::Ok => "Ok",
            StatusCode::Error => "Error",
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Status {
    pub code: StatusCode,
    pub message: String,
}

impl Status {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::Error,
            message: message.into(),
        }
    }
}

/// A single timed operation within a distributed trace.
///
/// Constructed by the host per ingestion call and immutable for the duration
/// of conversion; the exporter never retains it.
#[derive(Debug, Clone, Default)]
pub struct Span {
    pub trace_id: TraceId,
    pub span_id: SpanId,
    pub parent_span_id: Option<SpanId>,
    pub name: String,
    pub kind: SpanKind,
    pub start_time_unix_nano: u64,
    pub end_time_unix_nano: u64,
    pub status: Status,
    pub trace_state: String,
    pub attributes: AttrMap,
}

/// A full trace export batch: resource groups, each holding scope groups.
#[derive(Debug, Clone, Default)]
pub struct Traces {
    pub resource_spans: Vec<ResourceSpans>,
}

impl Traces {
    pub fn span_count(&self) -> usize {
        self.resource_spans
            .iter()
            .flat_map(|rs| &rs.scope_spans)
            .map(|ss| ss.spans.len())
            .sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResourceSpans {
    pub resource: Resource,
    pub scope_spans: Vec<ScopeSpans>,
}

#[derive(Debug, Clone, Default)]
pub struct ScopeSpans {
    pub scope: InstrumentationScope,
    pub spans: Vec<Span>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_ids_are_empty() {
        assert!(TraceId::new(vec![]).is_empty());
        assert!(TraceId::new(vec![0; 16]).is_empty());
        assert!(!TraceId::new(vec![0, 1]).is_empty());
        assert!(SpanId::new(vec![0; 8]).is_empty());
        assert!(!SpanId::new(vec![5]).is_empty());
    }

    #[test]
    fn span_count_spans_all_groups() {
        let traces = Traces {
            resource_spans: vec![
                ResourceSpans {
                    resource: Resource::default(),
                    scope_spans: vec![
                        ScopeSpans {
                            spans: vec![Span::default(), Span::default()],
                            ..Default::default()
                        },
                        ScopeSpans {
                            spans: vec![Span::default()],
                            ..Default::default()
                        },
                    ],
                },
                ResourceSpans::default(),
            ],
        };
        assert_eq!(traces.span_count(), 3);
    }
}
