use crate::{Result, config::NotifyConfig, warning};

/// Delivers a two-field message to the configured recipients.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn send(&self, subject: &str, body: &str) -> Result<()>;
}

/// Sends and forgets: a failed delivery is logged, never propagated.
pub async fn deliver<N: Notifier>(notifier: &N, subject: &str, body: &str) {
    if let Err(e) = notifier.send(subject, body).await {
        warning!("Failed to send notification '{}': {}", subject, e);
    }
}

/// Prints the message to stdout. Mail transport is handled by whatever
/// wraps the binary.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier {
    sender: Option<String>,
    recipients: Vec<String>,
}

impl ConsoleNotifier {
    pub fn new(config: &NotifyConfig) -> Self {
        Self {
            sender: config.sender.clone(),
            recipients: config.recipients.clone(),
        }
    }
}

impl Notifier for ConsoleNotifier {
    async fn send(&self, subject: &str, body: &str) -> Result<()> {
        if let Some(sender) = &self.sender {
            println!("From: {sender}");
        }
        if !self.recipients.is_empty() {
            println!("To: {}", self.recipients.join(", "));
        }
        println!("Subject: {subject}");
        println!();
        println!("{body}");
        Ok(())
    }
}
