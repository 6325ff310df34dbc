//! Backend trait.
//!
//! Defines the interface to the remote assistant backend.

use crate::error::Result;
use crate::protocol::{ChatPayload, StartPayload, StartRequest, StatusPayload};
use async_trait::async_trait;

/// An abstract client for the assistant backend's four operations.
///
/// This trait decouples the controllers from the transport (HTTP+JSON in
/// production, in-memory mocks in tests). Implementations must be cheap to
/// share behind an `Arc` and safe to call concurrently; the controllers
/// provide their own serialization where the protocol requires it.
#[async_trait]
pub trait WorkflowBackend: Send + Sync {
    /// Queries authoritative session state.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or a
    /// malformed payload. Callers treat that as "backend offline".
    async fn status(&self) -> Result<StatusPayload>;

    /// Starts a new project.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or a
    /// malformed payload.
    async fn start(&self, request: &StartRequest) -> Result<StartPayload>;

    /// Runs one chat turn.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or a
    /// malformed payload.
    async fn chat(&self, message: &str) -> Result<ChatPayload>;

    /// Abandons the active project on the backend.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure. Callers treat reset as
    /// best-effort and clear local state regardless.
    async fn reset(&self) -> Result<()>;
}
