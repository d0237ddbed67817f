//! Progress reporting for effectful steps
//!
//! The reconciliation engine never prints. It reports through this trait
//! and the binary decides where the lines go.

use async_trait::async_trait;

/// Receives human-readable progress lines
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// A normal progress line
    async fn on_message(&self, message: &str);

    /// A diagnostic for a failure that did not abort the run
    async fn on_error(&self, message: &str);
}
