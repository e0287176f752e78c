//! Outbound side of marketlens: the hosted Langflow workflow.
//!
//! [`FlowClient`] sends one prompt per analysis and retries according to a
//! [`RetryPolicy`]. The HTTP call itself sits behind [`FlowTransport`] so
//! tests can count attempts without a network.

pub mod flow_client;
pub mod flow_config;
pub mod retry;
pub mod transport;

pub use flow_client::FlowClient;
pub use flow_config::{FlowConfig, default_tweaks};
pub use retry::RetryPolicy;
pub use transport::{FlowRunRequest, FlowTransport, HttpFlowTransport, TransportResponse};
