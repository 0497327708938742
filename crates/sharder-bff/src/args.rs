use std::path::PathBuf;

use clap::Parser;

use sharder_runpod::DEFAULT_ENDPOINT;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    #[arg(long, env = "SHARDER_ADDR", default_value = "0.0.0.0:8501")]
    pub listen_addr: String,

    /// Operator allow-list, `user1:pass1,user2:pass2`.
    #[arg(long, env = "CREDS", hide_env_values = true)]
    pub creds: Option<String>,

    #[arg(long, env = "POD_ID")]
    pub pod_id: Option<String>,

    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// GPU count requested when the pod is resumed.
    #[arg(long, env = "POD_GPUS")]
    pub pod_gpus: Option<String>,

    #[arg(long, env = "RUNPOD_API_URL", default_value = DEFAULT_ENDPOINT)]
    pub api_url: String,

    #[arg(long, env = "SHARDER_LOGO", default_value = "./shard-mouse-logo.webp")]
    pub logo_path: PathBuf,

    #[arg(long, env = "OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    #[arg(long, env = "OTLP_TOKEN", hide_env_values = true)]
    pub otlp_token: Option<String>,
}
