pub mod api;
pub mod client;
pub mod error;
pub mod graphql;

pub use api::PodApi;
pub use client::{RunpodClient, DEFAULT_ENDPOINT};
pub use error::PodError;
