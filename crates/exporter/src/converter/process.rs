use instana_pdata::{semconv, AttrMap, Metric, Span};

use crate::converter::Converter;
use crate::model::{Bundle, PluginPayload, ProcessData};

/// Command arguments arrive as a single joined attribute value.
const ARGS_DELIMITER: &str = ", ";

/// Emits a process snapshot whenever the batch carries a process identifier,
/// for metric and span exports alike.
pub struct ProcessConverter;

fn create_process_data(attributes: &AttrMap, pid: i64) -> ProcessData {
    let mut data = ProcessData {
        pid,
        ..Default::default()
    };

    if let Some(exec) = attributes.get_str(semconv::PROCESS_EXECUTABLE_PATH) {
        data.exec = exec.to_string();
    }
    if let Some(args) = attributes.get(semconv::PROCESS_COMMAND_ARGS) {
        data.args = args
            .to_string()
            .split(ARGS_DELIMITER)
            .map(str::to_string)
            .collect();
    }
    if let Some(container) = attributes.get_str(semconv::CONTAINER_ID) {
        data.container_id = container.to_string();
    }

    data
}

fn process_payload(attributes: &AttrMap) -> Option<PluginPayload> {
    let pid_attr = attributes.get(semconv::PROCESS_PID)?;
    let pid = attributes.get_int(semconv::PROCESS_PID).unwrap_or(0);
    Some(PluginPayload::process(
        pid_attr.to_string(),
        create_process_data(attributes, pid),
    ))
}

impl Converter for ProcessConverter {
    fn name(&self) -> &'static str {
        "process-metrics"
    }

    fn accepts_metrics(&self, attributes: &AttrMap, _metrics: &[Metric]) -> bool {
        attributes.contains_key(semconv::PROCESS_PID)
    }

    fn convert_metrics(&self, attributes: &AttrMap, _metrics: &[Metric]) -> Vec<PluginPayload> {
        process_payload(attributes).into_iter().collect()
    }

    fn accepts_spans(&self, attributes: &AttrMap, _spans: &[Span]) -> bool {
        attributes.contains_key(semconv::PROCESS_PID)
    }

    fn convert_spans(&self, attributes: &AttrMap, _spans: &[Span]) -> Bundle {
        let mut bundle = Bundle::new();
        bundle.metrics.plugins.extend(process_payload(attributes));
        bundle
    }
}
