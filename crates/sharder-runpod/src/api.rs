use async_trait::async_trait;

use sharder_common::{MutationResult, PodInfo};

use crate::error::PodError;

/// The three operations the dashboard performs against the pod provider.
///
/// Every call is a single independent request: nothing is retried, cached or
/// serialized against concurrent callers.
#[async_trait]
pub trait PodApi: Send + Sync {
    async fn pod_info(&self, pod_id: &str) -> Result<PodInfo, PodError>;

    /// `gpu_count` is forwarded as-is; the provider decides whether it is valid.
    async fn resume_pod(&self, pod_id: &str, gpu_count: u32) -> Result<MutationResult, PodError>;

    async fn stop_pod(&self, pod_id: &str) -> Result<MutationResult, PodError>;
}
