use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use sharder_common::{MutationResult, PodInfo};

use crate::api::PodApi;
use crate::error::PodError;
use crate::graphql;

pub const DEFAULT_ENDPOINT: &str = "https://api.runpod.io/graphql";

/// Upper bound on how much of a failed response body is kept for display.
const MAX_ERROR_BODY: usize = 2048;

/// RunPod GraphQL client.
///
/// The API key travels as the `api_key` query parameter on every request,
/// which is where the provider expects it.
#[derive(Clone)]
pub struct RunpodClient {
    endpoint: String,
    api_key: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for RunpodClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunpodClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl RunpodClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self, PodError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(3))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(PodError::Transport)?;
        Ok(Self::with_http(endpoint, api_key, http))
    }

    pub fn with_http(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            http,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts one GraphQL document and returns the decoded envelope.
    ///
    /// The status is checked before the body is touched; a non-2xx answer is
    /// never parsed.
    async fn execute(&self, operation: &'static str, document: String) -> Result<Value, PodError> {
        tracing::debug!(operation, endpoint=%self.endpoint, "sending graphql request");

        let resp = self
            .http
            .post(&self.endpoint)
            .query(&[("api_key", self.api_key.as_str())])
            .json(&json!({ "query": document }))
            .send()
            .await
            .map_err(|e| {
                // The request URL carries the api key.
                let e = e.without_url();
                tracing::warn!(operation, error=%e, "graphql request failed");
                PodError::Transport(e)
            })?;

        let status = resp.status();
        if !status.is_success() {
            let mut body = resp.text().await.unwrap_or_default();
            truncate_at_char_boundary(&mut body, MAX_ERROR_BODY);
            tracing::warn!(operation, status = status.as_u16(), "remote api returned error status");
            return Err(PodError::RemoteUnavailable {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| PodError::Transport(e.without_url()))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(operation, error=%e, "remote api returned invalid json");
            PodError::MalformedResponse(format!("invalid JSON body: {e}"))
        })
    }
}

fn truncate_at_char_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s.truncate(cut);
}

fn graphql_errors(envelope: &Value) -> Option<&Value> {
    envelope
        .get("errors")
        .filter(|e| e.as_array().is_some_and(|items| !items.is_empty()))
}

fn decode_mutation(envelope: Value) -> Result<MutationResult, PodError> {
    if !envelope.is_object() {
        return Err(PodError::MalformedResponse(
            "response is not a JSON object".to_string(),
        ));
    }
    serde_json::from_value(envelope)
        .map_err(|e| PodError::MalformedResponse(format!("unexpected mutation shape: {e}")))
}

#[async_trait]
impl PodApi for RunpodClient {
    async fn pod_info(&self, pod_id: &str) -> Result<PodInfo, PodError> {
        let mut envelope = self.execute("pod", graphql::pod_query(pod_id)).await?;

        let pod = envelope
            .pointer_mut("/data/pod")
            .map(Value::take)
            .unwrap_or(Value::Null);

        if pod.is_null() {
            if let Some(errors) = graphql_errors(&envelope) {
                return Err(PodError::Rejected(errors.clone()));
            }
            return Err(PodError::MalformedResponse(
                "response has no data.pod".to_string(),
            ));
        }

        serde_json::from_value(pod)
            .map_err(|e| PodError::MalformedResponse(format!("unexpected pod shape: {e}")))
    }

    async fn resume_pod(&self, pod_id: &str, gpu_count: u32) -> Result<MutationResult, PodError> {
        let envelope = self
            .execute("podResume", graphql::resume_mutation(pod_id, gpu_count))
            .await?;
        decode_mutation(envelope)
    }

    async fn stop_pod(&self, pod_id: &str) -> Result<MutationResult, PodError> {
        let envelope = self
            .execute("podStop", graphql::stop_mutation(pod_id))
            .await?;
        decode_mutation(envelope)
    }
}
