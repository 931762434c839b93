use async_trait::async_trait;
use std::collections::BTreeMap;

/// One message fanned out to several device tokens
#[derive(Debug, Clone)]
pub struct PushMessage {
    pub tokens: Vec<String>,
    pub title: String,
    pub body: String,
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MulticastOutcome {
    pub success_count: usize,
    pub failure_count: usize,
    /// Tokens the provider reported as no longer valid
    pub invalid_tokens: Vec<String>,
}

#[async_trait]
pub trait PushProvider: Send + Sync {
    async fn send_multicast(&self, message: &PushMessage)
    -> Result<MulticastOutcome, anyhow::Error>;
}
