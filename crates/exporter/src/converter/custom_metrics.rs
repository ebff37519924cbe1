use instana_pdata::{semconv, AttrMap, Metric};

use crate::converter::Converter;
use crate::model::{CustomMetricsData, PluginPayload};

/// Catch-all converter: folds every metric in the batch into the generic
/// custom-metrics payload, keyed by the process id when one is known.
pub struct CustomMetricsConverter;

impl Converter for CustomMetricsConverter {
    fn name(&self) -> &'static str {
        "custom-metrics"
    }

    fn accepts_metrics(&self, _attributes: &AttrMap, _metrics: &[Metric]) -> bool {
        true
    }

    fn convert_metrics(&self, attributes: &AttrMap, metrics: &[Metric]) -> Vec<PluginPayload> {
        if metrics.is_empty() {
            return Vec::new();
        }

        let entity_id = attributes
            .get(semconv::PROCESS_PID)
            .map(|pid| pid.to_string())
            .unwrap_or_else(|| "h".to_string());

        let mut data = CustomMetricsData::default();
        for metric in metrics {
            data.append_metric(metric);
        }

        vec![PluginPayload::custom_metrics(entity_id, data)]
    }
}
