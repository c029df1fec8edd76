use crate::error::Result;
use crate::Notifier;
use async_trait::async_trait;

/// Dry-run channel: logs the would-be message instead of delivering it.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        tracing::info!(message = text, "Dry run, notification not sent");
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}
