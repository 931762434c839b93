use hrms::application::notifications::devices::{
    RegisterDeviceRequest, RegisterDeviceUseCase, UnregisterDeviceRequest,
    UnregisterDeviceUseCase,
};
use hrms::application::notifications::dispatch::NotificationDispatcher;
use hrms::application::notifications::inbox::{
    ListNotificationsRequest, NotificationInbox, RecentNotificationsQuery,
};
use hrms::application::notifications::send::{SendNotificationRequest, SendNotificationUseCase};
use hrms::application::notifications::templates::{
    CreateTemplateRequest, CreateTemplateUseCase, UpdateTemplateRequest, UpdateTemplateUseCase,
};
use hrms::domain::devices::DevicePlatform;
use hrms::domain::notifications::{NotificationTemplate, TemplateData};
use hrms::domain::users::{User, UserRepository, UserRole};
use hrms::infrastructure::repositories::mock::{
    MockDeviceRepository, MockNotificationRepository, MockNotificationTemplateRepository,
    MockPushProvider, MockUserRepository, new_user,
};
use hrms::shared::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

struct Fixture {
    users: Arc<MockUserRepository>,
    templates: Arc<MockNotificationTemplateRepository>,
    notifications: Arc<MockNotificationRepository>,
    devices: Arc<MockDeviceRepository>,
    push: Arc<MockPushProvider>,
}

impl Fixture {
    fn new(push: MockPushProvider) -> Self {
        Self {
            users: Arc::new(MockUserRepository::default()),
            templates: Arc::new(MockNotificationTemplateRepository::new()),
            notifications: Arc::new(MockNotificationRepository::new()),
            devices: Arc::new(MockDeviceRepository::new()),
            push: Arc::new(push),
        }
    }

    async fn user(&self, name: &str) -> User {
        let email = format!("{}@example.com", name.to_lowercase());
        self.users
            .create(new_user(name, &email, UserRole::Employee))
            .await
            .unwrap()
    }

    async fn template(&self, code: &str, body: &str) -> NotificationTemplate {
        CreateTemplateUseCase::new(self.templates.clone())
            .execute(CreateTemplateRequest {
                event_code: code.to_string(),
                title_template: "Hello {name}".to_string(),
                body_template: body.to_string(),
                is_active: true,
            })
            .await
            .unwrap()
    }

    async fn register(&self, user_id: Uuid, token: &str) {
        RegisterDeviceUseCase::new(self.devices.clone())
            .execute(
                user_id,
                RegisterDeviceRequest {
                    push_token: token.to_string(),
                    platform: DevicePlatform::Android,
                },
            )
            .await
            .unwrap();
    }

    fn dispatcher(&self) -> NotificationDispatcher {
        NotificationDispatcher::new(
            self.templates.clone(),
            self.notifications.clone(),
            self.devices.clone(),
            self.push.clone(),
        )
    }

    async fn send(&self, code: &str, user_id: Uuid, data: TemplateData) -> Result<Uuid, AppError> {
        SendNotificationUseCase::new(self.users.clone(), self.dispatcher())
            .execute(SendNotificationRequest {
                event_code: code.to_string(),
                user_id,
                data,
            })
            .await
            .map(|n| n.id)
    }

    fn inbox(&self) -> NotificationInbox {
        NotificationInbox::new(self.notifications.clone())
    }
}

fn data(pairs: &[(&str, &str)]) -> TemplateData {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn test_manual_send_lands_in_inbox_and_on_device() {
    let f = Fixture::new(MockPushProvider::new());
    let user = f.user("Rina").await;
    f.template("PAYSLIP_READY", "Your payslip for {month} is ready").await;
    f.register(user.id, " device-a ").await;

    let id = f
        .send(
            "PAYSLIP_READY",
            user.id,
            data(&[("name", "Rina"), ("month", "March")]),
        )
        .await
        .unwrap();

    let recent = f
        .inbox()
        .recent(user.id, RecentNotificationsQuery::default())
        .await
        .unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, id);
    assert_eq!(recent[0].title, "Hello Rina");
    assert_eq!(recent[0].body, "Your payslip for March is ready");

    let sent = f.push.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].tokens, vec!["device-a".to_string()]);
    assert_eq!(sent[0].data["month"], "March");
    assert_eq!(sent[0].data["notification_id"], id.to_string());
}

#[tokio::test]
async fn test_placeholder_values_are_not_rescanned() {
    let f = Fixture::new(MockPushProvider::new());
    let user = f.user("Dewi").await;
    f.template("ANNOUNCEMENT", "{message} / {missing}").await;

    f.send(
        "ANNOUNCEMENT",
        user.id,
        data(&[("name", "Dewi"), ("message", "{name} <b>")]),
    )
    .await
    .unwrap();

    let stored = f.notifications.all().await;
    assert_eq!(stored[0].body, "{name} <b> / {missing}");
}

#[tokio::test]
async fn test_inactive_template_rejects_manual_send() {
    let f = Fixture::new(MockPushProvider::new());
    let user = f.user("Agus").await;
    let template = f.template("PAYSLIP_READY", "Ready").await;

    UpdateTemplateUseCase::new(f.templates.clone())
        .execute(
            template.id,
            UpdateTemplateRequest {
                title_template: None,
                body_template: None,
                is_active: Some(false),
            },
        )
        .await
        .unwrap();

    let result = f.send("PAYSLIP_READY", user.id, TemplateData::new()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(f.notifications.all().await.is_empty());
}

#[tokio::test]
async fn test_send_to_unknown_user_is_not_found() {
    let f = Fixture::new(MockPushProvider::new());
    f.template("PAYSLIP_READY", "Ready").await;

    let result = f
        .send("PAYSLIP_READY", Uuid::new_v4(), TemplateData::new())
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_device_token_follows_latest_user() {
    let f = Fixture::new(MockPushProvider::new());
    let first = f.user("First").await;
    let second = f.user("Second").await;
    f.template("PAYSLIP_READY", "Ready").await;

    f.register(first.id, "shared-phone").await;
    f.register(second.id, "shared-phone").await;

    f.send("PAYSLIP_READY", first.id, TemplateData::new())
        .await
        .unwrap();
    assert!(f.push.sent().await.is_empty());

    f.send("PAYSLIP_READY", second.id, TemplateData::new())
        .await
        .unwrap();
    assert_eq!(f.push.sent().await.len(), 1);
}

#[tokio::test]
async fn test_unregistered_device_stops_receiving() {
    let f = Fixture::new(MockPushProvider::new());
    let user = f.user("Budi").await;
    f.template("PAYSLIP_READY", "Ready").await;
    f.register(user.id, "phone").await;

    let unregister = UnregisterDeviceUseCase::new(f.devices.clone());
    unregister
        .execute(
            user.id,
            UnregisterDeviceRequest {
                push_token: "phone".to_string(),
            },
        )
        .await
        .unwrap();

    let again = unregister
        .execute(
            user.id,
            UnregisterDeviceRequest {
                push_token: "phone".to_string(),
            },
        )
        .await;
    assert!(matches!(again, Err(AppError::NotFound(_))));

    f.send("PAYSLIP_READY", user.id, TemplateData::new())
        .await
        .unwrap();
    assert!(f.push.sent().await.is_empty());
    assert_eq!(f.notifications.all().await.len(), 1);
}

#[tokio::test]
async fn test_rejected_tokens_are_not_pushed_again() {
    let f = Fixture::new(MockPushProvider::rejecting(vec!["stale".to_string()]));
    let user = f.user("Wati").await;
    f.template("PAYSLIP_READY", "Ready").await;
    f.register(user.id, "stale").await;
    f.register(user.id, "fresh").await;

    f.send("PAYSLIP_READY", user.id, TemplateData::new())
        .await
        .unwrap();
    f.send("PAYSLIP_READY", user.id, TemplateData::new())
        .await
        .unwrap();

    let sent = f.push.sent().await;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].tokens.len(), 2);
    assert_eq!(sent[1].tokens, vec!["fresh".to_string()]);
}

#[tokio::test]
async fn test_push_outage_keeps_history() {
    let f = Fixture::new(MockPushProvider::failing());
    let user = f.user("Joko").await;
    f.template("PAYSLIP_READY", "Ready").await;
    f.register(user.id, "phone").await;

    f.send("PAYSLIP_READY", user.id, TemplateData::new())
        .await
        .unwrap();

    assert_eq!(f.inbox().unread_count(user.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_inbox_read_and_delete_lifecycle() {
    let f = Fixture::new(MockPushProvider::new());
    let user = f.user("Lina").await;
    let other = f.user("Other").await;
    f.template("PAYSLIP_READY", "Ready").await;

    let mut ids = Vec::new();
    for _ in 0..3 {
        ids.push(
            f.send("PAYSLIP_READY", user.id, TemplateData::new())
                .await
                .unwrap(),
        );
    }
    let inbox = f.inbox();
    assert_eq!(inbox.unread_count(user.id).await.unwrap(), 3);

    inbox.mark_read(user.id, ids[0]).await.unwrap();
    // Marking twice is harmless
    inbox.mark_read(user.id, ids[0]).await.unwrap();
    assert_eq!(inbox.unread_count(user.id).await.unwrap(), 2);

    // Someone else's notification is invisible
    assert!(matches!(
        inbox.mark_read(other.id, ids[1]).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        inbox.delete(other.id, ids[1]).await,
        Err(AppError::NotFound(_))
    ));

    inbox.delete(user.id, ids[1]).await.unwrap();
    assert!(matches!(
        inbox.delete(user.id, ids[1]).await,
        Err(AppError::NotFound(_))
    ));

    assert_eq!(inbox.mark_all_read(user.id).await.unwrap(), 1);
    assert_eq!(inbox.unread_count(user.id).await.unwrap(), 0);

    let page = inbox
        .list(user.id, ListNotificationsRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    assert!(page.items.iter().all(|n| n.id != ids[1]));
}
