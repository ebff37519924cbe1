use instana_pdata::{semconv, AttrMap, Metric, MetricData};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::converter::{contains_metric_with_prefix, Converter};
use crate::model::{CpuSummary, HostData, PluginPayload};

const SYSTEM_METRIC_PREFIX: &str = "system.";
const CPU_TIME_METRIC: &str = "system.cpu.time";

static CPU_INDEX: Lazy<Regex> = Lazy::new(|| Regex::new("[0-9]+").expect("static regex"));

/// Builds a host summary out of system metrics: resource attributes become
/// tags, and `system.cpu.time` points fold into per-core state summaries.
pub struct HostConverter;

impl Converter for HostConverter {
    fn name(&self) -> &'static str {
        "host-metrics"
    }

    fn accepts_metrics(&self, _attributes: &AttrMap, metrics: &[Metric]) -> bool {
        contains_metric_with_prefix(metrics, SYSTEM_METRIC_PREFIX)
    }

    fn convert_metrics(&self, attributes: &AttrMap, metrics: &[Metric]) -> Vec<PluginPayload> {
        let mut host = HostData::default();

        for (name, value) in attributes.iter() {
            host.tags.push(format!("{name}={value}"));
        }
        if let Some(hostname) = attributes.get_str(semconv::HOST_NAME) {
            host.host_name = hostname.to_string();
        }
        if let Some(os) = attributes.get_str(semconv::OS_TYPE) {
            host.os_name = os.to_string();
        }

        let mut cpu_count = 0;
        let mut summaries: Vec<CpuSummary> = Vec::new();

        for metric in metrics {
            if metric.name != CPU_TIME_METRIC {
                continue;
            }
            let MetricData::Sum(sum) = &metric.data else {
                continue;
            };
            for dp in &sum.data_points {
                let Some(cpu_attr) = dp.attributes.get("cpu") else {
                    continue;
                };
                // The attribute is usually "cpuN"; a point without a numeric
                // index cannot be assigned to a core.
                let Some(index) = CPU_INDEX
                    .find(&cpu_attr.to_string())
                    .and_then(|m| m.as_str().parse::<usize>().ok())
                else {
                    continue;
                };
                if summaries.len() <= index {
                    summaries.resize_with(index + 1, CpuSummary::default);
                }

                let state = dp.attributes.get_str("state").unwrap_or_default();
                if state == "system" {
                    cpu_count += 1;
                }

                let share = (dp.value.as_f64() * 100.0).round() / 100_000_000.0;
                match state {
                    "idle" => summaries[index].idle = share,
                    "interrupt" => summaries[index].steal = share,
                    "system" => summaries[index].sys = share,
                    "user" => summaries[index].user = share,
                    _ => {}
                }
            }
        }

        if let Some((first, rest)) = summaries.split_first() {
            host.cpu = *first;
            host.cpu_summaries = rest.to_vec();
        }
        host.cpu_count = cpu_count;

        vec![PluginPayload::host("h", host)]
    }
}
