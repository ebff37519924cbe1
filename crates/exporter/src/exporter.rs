use anyhow::Context;
use instana_pdata::{Metrics, Traces};

use crate::config::{self, Config};
use crate::converter::ConvertAll;
use crate::model::{Bundle, PluginPayload};

/// Translates telemetry batches into Instana bundles and ships them to the
/// agent's `/bundle` endpoint.
///
/// Conversion is synchronous and builds fresh accumulators per call; only the
/// HTTP send awaits. The exporter holds no mutable state, so trace and metric
/// exports may run concurrently against the same instance. Delivery is
/// fire-once: there is no retry, backoff or queueing here — a failed send is
/// reported to the caller exactly once, and cancelling the returned future
/// aborts the request.
pub struct Exporter {
    config: Config,
    client: reqwest::Client,
    converter: ConvertAll,
    user_agent: String,
}

impl Exporter {
    /// Creates an exporter with the standard converter composition.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        Self::with_converter(config, ConvertAll::standard())
    }

    /// Creates an exporter with an explicit converter composition.
    pub fn with_converter(config: Config, converter: ConvertAll) -> anyhow::Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build http client")?;
        let user_agent = format!(
            "{}/{} ({}/{})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS,
            std::env::consts::ARCH,
        );

        Ok(Self {
            config,
            client,
            converter,
            user_agent,
        })
    }

    /// Exports one trace batch. An empty result is a success, not an error,
    /// and produces no request.
    pub async fn push_traces(&self, traces: &Traces) -> anyhow::Result<()> {
        log::debug!("exporting {} spans", traces.span_count());

        let (host_id, mut bundle) = self.collect_spans(traces);
        if bundle.spans.is_empty() {
            // nothing to send
            return Ok(());
        }

        bundle
            .metrics
            .plugins
            .push(PluginPayload::zone(&self.config.custom_zone));

        let body = bundle.marshal().context("marshal span bundle")?;
        self.export(&host_id, body).await
    }

    /// Exports one metric batch, with the same empty-result semantics.
    pub async fn push_metrics(&self, metrics: &Metrics) -> anyhow::Result<()> {
        log::debug!("exporting {} metrics", metrics.metric_count());

        let (host_id, mut bundle) = self.collect_metrics(metrics);
        if bundle.metrics.plugins.is_empty() {
            // nothing to send
            return Ok(());
        }

        bundle
            .metrics
            .plugins
            .push(PluginPayload::zone(&self.config.custom_zone));

        let body = bundle.marshal().context("marshal metric bundle")?;
        self.export(&host_id, body).await
    }

    fn collect_spans(&self, traces: &Traces) -> (String, Bundle) {
        let mut bundle = Bundle::new();
        let mut host_id = String::new();

        for group in &traces.resource_spans {
            let attributes = &group.resource.attributes;
            if let Some(id) = attributes.get_str(config::ATTRIBUTE_INSTANA_HOST_ID) {
                host_id = id.to_string();
            }
            for scope in &group.scope_spans {
                bundle.merge(self.converter.convert_spans(attributes, &scope.spans));
            }
        }

        (host_id, bundle)
    }

    fn collect_metrics(&self, metrics: &Metrics) -> (String, Bundle) {
        let mut bundle = Bundle::new();
        let mut host_id = String::new();

        for group in &metrics.resource_metrics {
            let attributes = &group.resource.attributes;
            if let Some(id) = attributes.get_str(config::ATTRIBUTE_INSTANA_HOST_ID) {
                host_id = id.to_string();
            }
            for scope in &group.scope_metrics {
                bundle
                    .metrics
                    .plugins
                    .extend(self.converter.convert_metrics(attributes, &scope.metrics));
            }
        }

        (host_id, bundle)
    }

    async fn export(&self, host_id: &str, body: Vec<u8>) -> anyhow::Result<()> {
        let url = format!("{}/bundle", self.config.endpoint.trim_end_matches('/'));
        log::debug!("sending bundle to {}", url);

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .header(config::HEADER_KEY, self.config.agent_key.as_str())
            .header(config::HEADER_HOST, host_id)
            .header(config::HEADER_TIME, "0")
            .body(body)
            .send()
            .await
            .context("send bundle to the Instana agent")?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response body>".to_string());
            anyhow::bail!("agent returned non-success status {status}: {body}");
        }

        Ok(())
    }
}
