pub mod credentials;
pub mod pod;

pub use credentials::{ConfigError, Credential, CredentialStore};
pub use pod::{Container, Gpu, MutationResult, PodInfo, Port, Runtime};

pub mod telemetry;
