//! Traits for delivery channel integration

use async_trait::async_trait;

/// Capability delivering a code to its destination
///
/// Any implementation satisfying this contract is interchangeable, including a
/// no-op used outside production. Failures are reported, never retried by the
/// caller.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `message` to `destination`
    ///
    /// # Returns
    ///
    /// * `Ok(delivery_id)` - Provider-side identifier of the accepted message
    /// * `Err(String)` - Provider error description
    async fn send(&self, destination: &str, message: &str) -> Result<String, String>;

    /// Short provider name used in logs
    fn provider_name(&self) -> &str;
}
