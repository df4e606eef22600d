use crate::core::Throttle;
use async_trait::async_trait;
use std::time::Duration;

/// Fixed wall-clock pause between batches.
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepThrottle;

#[async_trait]
impl Throttle for SleepThrottle {
    async fn pause(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}
