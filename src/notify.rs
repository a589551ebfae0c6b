// src/notify.rs
//! Outbound notifications about finished word counts.

use crate::constants::{DEFAULT_NOTIFY_FROM, DEFAULT_NOTIFY_TO};
use crate::error::DeliveryError;
use tokio_util::sync::CancellationToken;

/// A message to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub from: String,
    pub body: String,
}

/// Sender and recipient used for every notification a workflow sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAddresses {
    pub to: String,
    pub from: String,
}

impl NotificationAddresses {
    pub fn message(&self, body: impl Into<String>) -> Notification {
        Notification {
            to: self.to.clone(),
            from: self.from.clone(),
            body: body.into(),
        }
    }
}

impl Default for NotificationAddresses {
    fn default() -> Self {
        Self {
            to: DEFAULT_NOTIFY_TO.to_string(),
            from: DEFAULT_NOTIFY_FROM.to_string(),
        }
    }
}

/// The ability to deliver a notification. Failures are not retried.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(
        &self,
        notification: &Notification,
        cancel: &CancellationToken,
    ) -> Result<(), DeliveryError>;
}

/// Delivers notifications by writing them to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn send(
        &self,
        notification: &Notification,
        cancel: &CancellationToken,
    ) -> Result<(), DeliveryError> {
        if cancel.is_cancelled() {
            return Err(DeliveryError::Cancelled);
        }
        log::info!(
            "Sending notification to [{}] from [{}]: {}",
            notification.to,
            notification.from,
            notification.body
        );
        Ok(())
    }
}
