use instana_pdata::{AttrMap, Metric};

use crate::converter::{contains_metric_with_prefix, Converter};
use crate::model::{CustomMetricsData, PluginPayload, ProcessData};

const COLLECTOR_METRIC_PREFIX: &str = "otelcol_";

/// Self-telemetry: reports the collector process itself, plus its own metrics
/// as a custom-metrics payload keyed by its pid.
pub struct CollectorConverter;

fn collector_exec() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "otelcol".to_string())
}

impl Converter for CollectorConverter {
    fn name(&self) -> &'static str {
        "collector-metrics"
    }

    fn accepts_metrics(&self, _attributes: &AttrMap, metrics: &[Metric]) -> bool {
        contains_metric_with_prefix(metrics, COLLECTOR_METRIC_PREFIX)
    }

    fn convert_metrics(&self, _attributes: &AttrMap, metrics: &[Metric]) -> Vec<PluginPayload> {
        let pid = std::process::id() as i64;

        let process = PluginPayload::process(
            pid.to_string(),
            ProcessData {
                pid,
                exec: collector_exec(),
                host_pid: Some(pid),
                ..Default::default()
            },
        );

        let mut data = CustomMetricsData {
            pid: pid.to_string(),
            ..Default::default()
        };
        for metric in metrics {
            data.append_metric(metric);
        }

        vec![process, PluginPayload::custom_metrics(pid.to_string(), data)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use instana_pdata::NumberDataPoint;

    #[test]
    fn keys_on_collector_metric_prefix() {
        let own = vec![Metric::sum("otelcol_exporter_sent_spans", vec![])];
        let foreign = vec![Metric::sum("system.cpu.time", vec![])];
        assert!(CollectorConverter.accepts_metrics(&AttrMap::new(), &own));
        assert!(!CollectorConverter.accepts_metrics(&AttrMap::new(), &foreign));
    }

    #[test]
    fn reports_own_process_and_metrics() {
        let metrics = vec![Metric::sum(
            "otelcol_exporter_sent_spans",
            vec![NumberDataPoint::int(17)],
        )];
        let plugins = CollectorConverter.convert_metrics(&AttrMap::new(), &metrics);
        assert_eq!(plugins.len(), 2);

        let own_pid = std::process::id().to_string();
        assert_eq!(plugins[0].name, "com.instana.plugin.process");
        assert_eq!(plugins[0].entity_id, own_pid);
        assert_eq!(plugins[1].name, "com.instana.plugin.otel.metrics");
        assert_eq!(plugins[1].entity_id, own_pid);
    }
}
