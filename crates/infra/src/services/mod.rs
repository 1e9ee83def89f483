mod solapi;

pub use solapi::{AlimtalkMessage, DeliveryOutcome, SolapiClient};

/// Outbound templated-message gateway. Delivery is best effort: callers
/// must not condition their own bookkeeping on the per-recipient outcomes.
#[async_trait::async_trait]
pub trait IDispatchGateway: Send + Sync {
    /// Submits one batch of messages and returns the per-recipient
    /// outcomes reported by the provider.
    async fn send_batch(
        &self,
        messages: Vec<AlimtalkMessage>,
    ) -> anyhow::Result<Vec<DeliveryOutcome>>;
}
