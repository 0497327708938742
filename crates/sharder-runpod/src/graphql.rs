//! GraphQL documents sent to the pod provider.
//!
//! Documents are plain text carried in the `query` field of the request
//! body. Caller-supplied strings only enter a document through
//! [`string_literal`].

/// Renders `value` as a quoted GraphQL string literal.
///
/// GraphQL string escapes are a subset-compatible match for JSON's, so the
/// JSON encoder produces a valid literal for any input.
pub fn string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

pub fn pod_query(pod_id: &str) -> String {
    format!(
        "query Pod {{ pod(input: {{podId: {}}}) {{ id name runtime {{ uptimeInSeconds \
         ports {{ ip isIpPublic privatePort publicPort type }} \
         gpus {{ id gpuUtilPercent memoryUtilPercent }} \
         container {{ cpuPercent memoryPercent }} }} }} }}",
        string_literal(pod_id)
    )
}

pub fn resume_mutation(pod_id: &str, gpu_count: u32) -> String {
    format!(
        "mutation {{ podResume(input: {{podId: {}, gpuCount: {gpu_count}}}) {{ \
         id desiredStatus imageName env machineId machine {{ podHostId }} }} }}",
        string_literal(pod_id)
    )
}

pub fn stop_mutation(pod_id: &str) -> String {
    format!(
        "mutation {{ podStop(input: {{podId: {}}}) {{ id desiredStatus }} }}",
        string_literal(pod_id)
    )
}
