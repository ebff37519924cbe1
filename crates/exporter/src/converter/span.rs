use instana_pdata::{semconv, AttrMap, Span};

use crate::config;
use crate::converter::Converter;
use crate::model::{convert_span, Bundle, FromS};

/// Converts every span batch into Instana spans, deriving the origin
/// descriptor and service name from the resource attributes.
pub struct SpanConverter;

impl Converter for SpanConverter {
    fn name(&self) -> &'static str {
        "span"
    }

    fn accepts_spans(&self, _attributes: &AttrMap, _spans: &[Span]) -> bool {
        true
    }

    fn convert_spans(&self, attributes: &AttrMap, spans: &[Span]) -> Bundle {
        let from = FromS {
            host_id: attributes
                .get(config::ATTRIBUTE_INSTANA_HOST_ID)
                .map(|v| v.to_string())
                .unwrap_or_else(|| "unknown-host-id".to_string()),
            entity_id: attributes
                .get(semconv::PROCESS_PID)
                .map(|v| v.to_string())
                .unwrap_or_else(|| "unknown-process-id".to_string()),
        };

        let service_name = attributes
            .get(semconv::SERVICE_NAME)
            .map(|v| v.to_string())
            .unwrap_or_default();

        let mut bundle = Bundle::new();
        for span in spans {
            match convert_span(from.clone(), span, &service_name) {
                Ok(converted) => bundle.spans.push(converted),
                Err(err) => {
                    log::debug!("dropping span {:?}: {}", span.name, err);
                }
            }
        }
        bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use instana_pdata::{SpanId, SpanKind, TraceId};

    fn attrs() -> AttrMap {
        let mut attrs = AttrMap::new();
        attrs.insert(config::ATTRIBUTE_INSTANA_HOST_ID, "myhost1");
        attrs.insert(semconv::PROCESS_PID, "1234");
        attrs.insert(semconv::SERVICE_NAME, "myservice");
        attrs
    }

    fn span(trace_id: TraceId) -> Span {
        Span {
            trace_id,
            span_id: SpanId::new(vec![1, 2, 3, 4, 5, 6, 7, 8]),
            name: "op".to_string(),
            kind: SpanKind::Client,
            start_time_unix_nano: 1_000_000,
            end_time_unix_nano: 2_000_000,
            ..Default::default()
        }
    }

    #[test]
    fn derives_origin_from_resource_attributes() {
        let bundle =
            SpanConverter.convert_spans(&attrs(), &[span(TraceId::new(vec![1]))]);
        assert_eq!(bundle.spans.len(), 1);
        assert_eq!(bundle.spans[0].from.host_id, "myhost1");
        assert_eq!(bundle.spans[0].from.entity_id, "1234");
        assert_eq!(bundle.spans[0].data.service_name, "myservice");
    }

    #[test]
    fn falls_back_to_unknown_origin() {
        let bundle =
            SpanConverter.convert_spans(&AttrMap::new(), &[span(TraceId::new(vec![1]))]);
        assert_eq!(bundle.spans[0].from.host_id, "unknown-host-id");
        assert_eq!(bundle.spans[0].from.entity_id, "unknown-process-id");
        assert_eq!(bundle.spans[0].data.service_name, "");
    }

    #[test]
    fn malformed_span_is_skipped_rest_of_batch_survives() {
        let spans = vec![
            span(TraceId::new(vec![1])),
            span(TraceId::new(vec![0xff; 17])),
            span(TraceId::new(vec![2])),
        ];
        let bundle = SpanConverter.convert_spans(&attrs(), &spans);
        assert_eq!(bundle.spans.len(), 2);
        assert!(bundle.spans[0].long_trace_id.ends_with("01"));
        assert!(bundle.spans[1].long_trace_id.ends_with("02"));
    }

    #[test]
    fn does_not_accept_metric_batches() {
        assert!(!SpanConverter.accepts_metrics(&attrs(), &[]));
    }
}
