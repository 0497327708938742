use std::fmt;
use std::path::PathBuf;

use sharder_common::{ConfigError, CredentialStore};

use crate::args::Args;

/// Validated process configuration. Built once in `main` and shared
/// read-only with every request.
#[derive(Clone)]
pub struct Config {
    pub listen_addr: String,
    pub credentials: CredentialStore,
    pub pod_id: String,
    pub api_key: String,
    pub gpu_count: u32,
    pub api_url: String,
    pub logo_path: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("listen_addr", &self.listen_addr)
            .field("credentials", &self.credentials)
            .field("pod_id", &self.pod_id)
            .field("api_key", &"<redacted>")
            .field("gpu_count", &self.gpu_count)
            .field("api_url", &self.api_url)
            .field("logo_path", &self.logo_path)
            .finish()
    }
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let creds = required(args.creds, "CREDS")?;
        let credentials = CredentialStore::parse(&creds)?;

        let pod_id = required(args.pod_id, "POD_ID")?;
        let api_key = required(args.api_key, "API_KEY")?;

        let gpus_raw = required(args.pod_gpus, "POD_GPUS")?;
        let gpu_count = gpus_raw
            .trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::Invalid {
                name: "POD_GPUS",
                reason: e.to_string(),
            })?;

        Ok(Self {
            listen_addr: args.listen_addr,
            credentials,
            pod_id,
            api_key,
            gpu_count,
            api_url: args.api_url,
            logo_path: args.logo_path,
        })
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            listen_addr: "127.0.0.1:0".to_string(),
            creds: Some("alice:s3cret".to_string()),
            pod_id: Some("riixlu8oclhp".to_string()),
            api_key: Some("key".to_string()),
            pod_gpus: Some("2".to_string()),
            api_url: "http://localhost/graphql".to_string(),
            logo_path: PathBuf::from("logo.webp"),
            otlp_endpoint: None,
            otlp_token: None,
        }
    }

    #[test]
    fn test_from_args() {
        let config = Config::from_args(args()).unwrap();
        assert_eq!(config.pod_id, "riixlu8oclhp");
        assert_eq!(config.gpu_count, 2);
        assert!(config.credentials.contains("alice", "s3cret"));
    }

    #[test]
    fn test_missing_settings() {
        let mut a = args();
        a.creds = None;
        assert_eq!(Config::from_args(a).unwrap_err(), ConfigError::Missing("CREDS"));

        let mut a = args();
        a.pod_id = Some("  ".to_string());
        assert_eq!(Config::from_args(a).unwrap_err(), ConfigError::Missing("POD_ID"));

        let mut a = args();
        a.api_key = None;
        assert_eq!(Config::from_args(a).unwrap_err(), ConfigError::Missing("API_KEY"));
    }

    #[test]
    fn test_invalid_gpu_count() {
        let mut a = args();
        a.pod_gpus = Some("two".to_string());
        assert!(matches!(
            Config::from_args(a).unwrap_err(),
            ConfigError::Invalid { name: "POD_GPUS", .. }
        ));

        let mut a = args();
        a.pod_gpus = Some("-1".to_string());
        assert!(Config::from_args(a).is_err());
    }

    #[test]
    fn test_malformed_creds_abort() {
        let mut a = args();
        a.creds = Some("alice".to_string());
        assert_eq!(
            Config::from_args(a).unwrap_err(),
            ConfigError::MalformedCredential { index: 0 }
        );
    }

    #[test]
    fn test_debug_hides_secrets() {
        let dbg = format!("{:?}", Config::from_args(args()).unwrap());
        assert!(!dbg.contains("s3cret"));
        assert!(!dbg.contains("\"key\""));
    }
}
