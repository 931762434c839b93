//! Template-driven notification fan-out.
//!
//! A dispatch renders the active template of an event, stores one history
//! row for the recipient and pushes it to every registered device. Push
//! delivery is best effort: failures are logged and never retried, and
//! tokens the provider reports as dead are pruned.

use crate::domain::devices::DeviceRepository;
use crate::domain::notifications::{
    NewNotification, Notification, NotificationRepository, NotificationTemplateRepository,
    TemplateData,
};
use crate::domain::push::{PushMessage, PushProvider};
use crate::shared::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct NotificationDispatcher {
    templates: Arc<dyn NotificationTemplateRepository>,
    notifications: Arc<dyn NotificationRepository>,
    devices: Arc<dyn DeviceRepository>,
    push: Arc<dyn PushProvider>,
}

impl NotificationDispatcher {
    pub fn new(
        templates: Arc<dyn NotificationTemplateRepository>,
        notifications: Arc<dyn NotificationRepository>,
        devices: Arc<dyn DeviceRepository>,
        push: Arc<dyn PushProvider>,
    ) -> Self {
        Self {
            templates,
            notifications,
            devices,
            push,
        }
    }

    /// Returns `None` when the event has no active template
    #[tracing::instrument(skip(self, data))]
    pub async fn dispatch(
        &self,
        event_code: &str,
        user_id: Uuid,
        data: &TemplateData,
    ) -> Result<Option<Notification>, AppError> {
        let Some(template) = self.templates.find_active_by_event(event_code).await? else {
            tracing::debug!("No active template, nothing to send");
            return Ok(None);
        };

        let (title, body) = template.render(data);
        let tokens = self.devices.push_tokens_for_user(user_id).await?;

        let notification = self
            .notifications
            .create(NewNotification {
                user_id,
                event_code: event_code.to_string(),
                title,
                body,
            })
            .await?;

        if !tokens.is_empty() {
            self.push(&notification, tokens, data).await;
        }

        Ok(Some(notification))
    }

    async fn push(&self, notification: &Notification, tokens: Vec<String>, data: &TemplateData) {
        let mut payload = data.clone();
        payload.insert("event_code".to_string(), notification.event_code.clone());
        payload.insert("notification_id".to_string(), notification.id.to_string());

        let message = PushMessage {
            tokens,
            title: notification.title.clone(),
            body: notification.body.clone(),
            data: payload,
        };

        let outcome = match self.push.send_multicast(&message).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(
                    notification_id = %notification.id,
                    "Push delivery failed: {:?}",
                    e
                );
                return;
            }
        };

        tracing::debug!(
            success = outcome.success_count,
            failure = outcome.failure_count,
            "Push delivered"
        );

        if outcome.invalid_tokens.is_empty() {
            return;
        }
        match self.devices.delete_tokens(&outcome.invalid_tokens).await {
            Ok(removed) => tracing::info!(removed, "Pruned invalid push tokens"),
            Err(e) => tracing::error!("Failed to prune invalid push tokens: {:?}", e),
        }
    }
}
