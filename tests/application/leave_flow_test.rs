use hrms::application::leave::cancel::CancelLeaveUseCase;
use hrms::application::leave::list::{LeaveFilterParams, ListLeaveRequest, ListLeaveUseCase};
use hrms::application::leave::review::{LeaveDecision, ReviewLeaveRequest, ReviewLeaveUseCase};
use hrms::application::leave::submit::{SubmitLeaveRequest, SubmitLeaveUseCase};
use hrms::application::notifications::dispatch::NotificationDispatcher;
use hrms::domain::leave::{LeaveRequest, LeaveStatus, LeaveType};
use hrms::domain::notifications::{NewNotificationTemplate, NotificationTemplateRepository};
use hrms::domain::users::{User, UserRepository, UserRole};
use hrms::infrastructure::repositories::mock::{
    MockDeviceRepository, MockLeaveRequestRepository, MockNotificationRepository,
    MockNotificationTemplateRepository, MockPushProvider, MockUserRepository, new_user,
};
use hrms::shared::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

const TEMPLATES: [(&str, &str, &str); 3] = [
    (
        "LEAVE_SUBMITTED",
        "Leave request submitted",
        "Your {leave_type} leave from {start_date} to {end_date} is waiting for approval.",
    ),
    (
        "LEAVE_APPROVED",
        "Leave request approved",
        "Hi {name}, your {leave_type} leave from {start_date} to {end_date} has been approved.",
    ),
    (
        "LEAVE_REJECTED",
        "Leave request rejected",
        "Hi {name}, your {leave_type} leave from {start_date} to {end_date} was rejected. {review_note}",
    ),
];

struct Fixture {
    users: Arc<MockUserRepository>,
    leave: Arc<MockLeaveRequestRepository>,
    notifications: Arc<MockNotificationRepository>,
    dispatcher: NotificationDispatcher,
    employee: User,
    manager: User,
}

impl Fixture {
    async fn new() -> Self {
        let users = Arc::new(MockUserRepository::default());
        let employee = users
            .create(new_user("Sari", "sari@example.com", UserRole::Employee))
            .await
            .unwrap();
        let manager = users
            .create(new_user("Hendra", "hendra@example.com", UserRole::Manager))
            .await
            .unwrap();

        let templates = Arc::new(MockNotificationTemplateRepository::new());
        for (code, title, body) in TEMPLATES {
            templates
                .create(NewNotificationTemplate {
                    event_code: code.to_string(),
                    title_template: title.to_string(),
                    body_template: body.to_string(),
                    is_active: true,
                })
                .await
                .unwrap();
        }

        let notifications = Arc::new(MockNotificationRepository::new());
        let dispatcher = NotificationDispatcher::new(
            templates,
            notifications.clone(),
            Arc::new(MockDeviceRepository::new()),
            Arc::new(MockPushProvider::new()),
        );

        Self {
            users,
            leave: Arc::new(MockLeaveRequestRepository::new()),
            notifications,
            dispatcher,
            employee,
            manager,
        }
    }

    async fn submit(&self, start: &str, end: &str) -> Result<LeaveRequest, AppError> {
        SubmitLeaveUseCase::new(
            self.leave.clone(),
            self.users.clone(),
            self.dispatcher.clone(),
        )
        .execute(
            self.employee.id,
            SubmitLeaveRequest {
                leave_type: LeaveType::Annual,
                start_date: start.to_string(),
                end_date: end.to_string(),
                reason: "  Family wedding  ".to_string(),
            },
        )
        .await
    }

    async fn review(
        &self,
        reviewer_id: Uuid,
        id: Uuid,
        decision: LeaveDecision,
        note: Option<&str>,
    ) -> Result<LeaveRequest, AppError> {
        ReviewLeaveUseCase::new(
            self.leave.clone(),
            self.users.clone(),
            self.dispatcher.clone(),
        )
        .execute(
            reviewer_id,
            id,
            decision,
            ReviewLeaveRequest {
                note: note.map(str::to_string),
            },
        )
        .await
    }

    async fn bodies(&self) -> Vec<String> {
        self.notifications
            .all()
            .await
            .into_iter()
            .map(|n| n.body)
            .collect()
    }
}

#[tokio::test]
async fn test_submit_then_approve() {
    let f = Fixture::new().await;

    let leave = f.submit("2025-03-10", "2025-03-12").await.unwrap();
    assert_eq!(leave.status, LeaveStatus::Pending);
    assert_eq!(leave.reason, "Family wedding");
    assert_eq!(leave.days(), 3);

    let approved = f
        .review(f.manager.id, leave.id, LeaveDecision::Approve, None)
        .await
        .unwrap();
    assert_eq!(approved.status, LeaveStatus::Approved);
    assert_eq!(approved.reviewed_by, Some(f.manager.id));
    assert!(approved.reviewed_at.is_some());

    assert_eq!(
        f.bodies().await,
        vec![
            "Your annual leave from 2025-03-10 to 2025-03-12 is waiting for approval.".to_string(),
            "Hi Sari, your annual leave from 2025-03-10 to 2025-03-12 has been approved."
                .to_string(),
        ]
    );
}

#[tokio::test]
async fn test_reject_carries_review_note() {
    let f = Fixture::new().await;
    let leave = f.submit("2025-04-01", "2025-04-01").await.unwrap();

    let rejected = f
        .review(
            f.manager.id,
            leave.id,
            LeaveDecision::Reject,
            Some("Quarter closing"),
        )
        .await
        .unwrap();

    assert_eq!(rejected.status, LeaveStatus::Rejected);
    assert_eq!(rejected.review_note.as_deref(), Some("Quarter closing"));
    let bodies = f.bodies().await;
    assert!(bodies[1].ends_with("was rejected. Quarter closing"));
}

#[tokio::test]
async fn test_reviewed_request_is_final() {
    let f = Fixture::new().await;
    let leave = f.submit("2025-05-05", "2025-05-06").await.unwrap();
    f.review(f.manager.id, leave.id, LeaveDecision::Approve, None)
        .await
        .unwrap();

    let again = f
        .review(f.manager.id, leave.id, LeaveDecision::Reject, None)
        .await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    let cancel = CancelLeaveUseCase::new(f.leave.clone())
        .execute(f.employee.id, leave.id)
        .await;
    assert!(matches!(cancel, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_self_review_is_forbidden() {
    let f = Fixture::new().await;
    let leave = f.submit("2025-06-02", "2025-06-03").await.unwrap();

    let result = f
        .review(f.employee.id, leave.id, LeaveDecision::Approve, None)
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn test_overlap_blocks_until_cancelled() {
    let f = Fixture::new().await;
    let first = f.submit("2025-07-07", "2025-07-11").await.unwrap();

    let overlapping = f.submit("2025-07-11", "2025-07-14").await;
    assert!(matches!(overlapping, Err(AppError::Conflict(_))));

    // Adjacent ranges do not overlap
    f.submit("2025-07-12", "2025-07-13").await.unwrap();

    let cancelled = CancelLeaveUseCase::new(f.leave.clone())
        .execute(f.employee.id, first.id)
        .await
        .unwrap();
    assert_eq!(cancelled.status, LeaveStatus::Cancelled);
    assert_eq!(cancelled.reviewed_by, None);

    f.submit("2025-07-08", "2025-07-09").await.unwrap();
}

#[tokio::test]
async fn test_rejected_range_can_be_requested_again() {
    let f = Fixture::new().await;
    let leave = f.submit("2025-08-18", "2025-08-19").await.unwrap();
    f.review(f.manager.id, leave.id, LeaveDecision::Reject, None)
        .await
        .unwrap();

    assert!(f.submit("2025-08-18", "2025-08-19").await.is_ok());
}

#[tokio::test]
async fn test_only_requester_can_cancel() {
    let f = Fixture::new().await;
    let leave = f.submit("2025-09-01", "2025-09-01").await.unwrap();

    let result = CancelLeaveUseCase::new(f.leave.clone())
        .execute(f.manager.id, leave.id)
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn test_invalid_dates_are_rejected() {
    let f = Fixture::new().await;

    let reversed = f.submit("2025-03-12", "2025-03-10").await;
    assert!(matches!(reversed, Err(AppError::ValidationError(_))));

    let malformed = f.submit("12/03/2025", "2025-03-12").await;
    assert!(matches!(malformed, Err(AppError::ValidationError(_))));

    assert!(f.notifications.all().await.is_empty());
}

#[tokio::test]
async fn test_listing_by_status() {
    let f = Fixture::new().await;
    let approved = f.submit("2025-10-01", "2025-10-02").await.unwrap();
    f.submit("2025-10-06", "2025-10-07").await.unwrap();
    f.review(f.manager.id, approved.id, LeaveDecision::Approve, None)
        .await
        .unwrap();

    let list = ListLeaveUseCase::new(f.leave.clone());
    let pending = list
        .all(ListLeaveRequest {
            filter: LeaveFilterParams {
                status: Some(LeaveStatus::Pending),
                ..Default::default()
            },
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(pending.total, 1);

    let own = list
        .own(f.employee.id, ListLeaveRequest::default())
        .await
        .unwrap();
    assert_eq!(own.total, 2);

    let manager_own = list
        .own(f.manager.id, ListLeaveRequest::default())
        .await
        .unwrap();
    assert_eq!(manager_own.total, 0);
}
