use crate::models::{ExecutionResult, GenerationRequest};
use shared::error::Result;

/// One wire exchange with the remote generation endpoint. The retrying
/// client wraps this seam so tests can script the network.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: &GenerationRequest) -> Result<String>;
}

/// Blocking yes/no boundary for the execution gate.
pub trait Confirmer {
    fn confirm(&mut self, command: &str) -> Result<bool>;
}

/// Runs an approved command to completion.
#[async_trait::async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &str) -> ExecutionResult;
}
