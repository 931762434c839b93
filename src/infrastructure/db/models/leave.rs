use super::parse_column;
use crate::domain::leave::LeaveRequest;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

pub const LEAVE_COLUMNS: &str = "l.id, l.user_id, l.leave_type, l.start_date, l.end_date, l.reason, \
     l.status, l.reviewed_by, l.reviewed_at, l.review_note, l.created_at, l.updated_at";

#[derive(Debug, Clone, FromRow)]
pub struct LeaveRequestDbModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub leave_type: String,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: String,
    pub status: String,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<OffsetDateTime>,
    pub review_note: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<LeaveRequestDbModel> for LeaveRequest {
    type Error = anyhow::Error;

    fn try_from(model: LeaveRequestDbModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            leave_type: parse_column("leave_requests.leave_type", &model.leave_type)?,
            start_date: model.start_date,
            end_date: model.end_date,
            reason: model.reason,
            status: parse_column("leave_requests.status", &model.status)?,
            reviewed_by: model.reviewed_by,
            reviewed_at: model.reviewed_at,
            review_note: model.review_note,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
