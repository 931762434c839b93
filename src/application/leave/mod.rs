pub mod cancel;
pub mod list;
pub mod review;
pub mod submit;

use crate::application::notifications::dispatch::NotificationDispatcher;
use crate::domain::leave::LeaveRequest;
use crate::domain::notifications::TemplateData;
use crate::domain::users::User;

/// Placeholders available to the leave notification templates
pub(crate) fn template_data(request: &LeaveRequest, requester: Option<&User>) -> TemplateData {
    let mut data = TemplateData::from([
        ("leave_id".to_string(), request.id.to_string()),
        ("leave_type".to_string(), request.leave_type.to_string()),
        ("start_date".to_string(), request.start_date.to_string()),
        ("end_date".to_string(), request.end_date.to_string()),
        ("days".to_string(), request.days().to_string()),
        ("reason".to_string(), request.reason.clone()),
        ("status".to_string(), request.status.to_string()),
        (
            "review_note".to_string(),
            request.review_note.clone().unwrap_or_default(),
        ),
    ]);
    if let Some(user) = requester {
        data.insert("name".to_string(), user.name.clone());
    }
    data
}

/// Sends a leave event to the requester; failures are only logged
pub(crate) async fn notify_requester(
    dispatcher: &NotificationDispatcher,
    event_code: &str,
    request: &LeaveRequest,
    requester: Option<&User>,
) {
    let data = template_data(request, requester);
    if let Err(e) = dispatcher
        .dispatch(event_code, request.user_id, &data)
        .await
    {
        tracing::error!(
            leave_id = %request.id,
            event_code,
            "Failed to dispatch leave notification: {:?}",
            e
        );
    }
}
