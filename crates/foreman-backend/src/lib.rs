//! HTTP implementation of the assistant backend client.
//!
//! This crate provides [`HttpWorkflowBackend`], a `reqwest`-based
//! implementation of `foreman_core::backend::WorkflowBackend`, together
//! with its configuration loading.

mod config;
mod http;

pub use config::BackendConfig;
pub use http::HttpWorkflowBackend;
