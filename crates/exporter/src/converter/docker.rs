use instana_pdata::{semconv, AttrMap, Metric};

use crate::converter::{contains_attributes, contains_metric_with_prefix, Converter};
use crate::model::{DockerData, PluginPayload};

const CONTAINER_METRIC_PREFIX: &str = "container.";

/// Emits a container snapshot when container metrics arrive with full
/// container identity (id, image and name) in the resource attributes.
pub struct DockerConverter;

impl Converter for DockerConverter {
    fn name(&self) -> &'static str {
        "docker-container-metrics"
    }

    fn accepts_metrics(&self, attributes: &AttrMap, metrics: &[Metric]) -> bool {
        contains_metric_with_prefix(metrics, CONTAINER_METRIC_PREFIX)
            && contains_attributes(
                attributes,
                &[
                    semconv::CONTAINER_ID,
                    semconv::CONTAINER_IMAGE_NAME,
                    semconv::CONTAINER_NAME,
                ],
            )
    }

    fn convert_metrics(&self, attributes: &AttrMap, _metrics: &[Metric]) -> Vec<PluginPayload> {
        let (Some(id), Some(image), Some(name)) = (
            attributes.get(semconv::CONTAINER_ID),
            attributes.get(semconv::CONTAINER_IMAGE_NAME),
            attributes.get(semconv::CONTAINER_NAME),
        ) else {
            return Vec::new();
        };

        let data = DockerData {
            id: id.to_string(),
            image: image.to_string(),
            names: vec![name.to_string()],
            ..Default::default()
        };

        vec![PluginPayload::docker(id.to_string(), data)]
    }
}
