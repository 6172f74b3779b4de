//! Notifier trait for delivering messages

use async_trait::async_trait;

/// Trait for sending a text message to the configured destination
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send a message, failing with [`crate::WatchError::Delivery`]
    async fn send(&self, message: &str) -> crate::Result<()>;
}
