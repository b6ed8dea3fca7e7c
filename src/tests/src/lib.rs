//! Workspace-level integration tests for the generation/execution pipeline.

#[cfg(test)]
mod pipeline_tests;
