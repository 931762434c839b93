use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    Annual,
    Sick,
    Unpaid,
    Other,
}

impl LeaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Annual => "annual",
            LeaveType::Sick => "sick",
            LeaveType::Unpaid => "unpaid",
            LeaveType::Other => "other",
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annual" => Ok(LeaveType::Annual),
            "sick" => Ok(LeaveType::Sick),
            "unpaid" => Ok(LeaveType::Unpaid),
            "other" => Ok(LeaveType::Other),
            _ => Err(format!("Unknown leave type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Cancelled => "cancelled",
        }
    }

    /// Only pending requests move, and never back to pending
    pub fn can_transition_to(&self, next: LeaveStatus) -> bool {
        matches!(
            (self, next),
            (
                LeaveStatus::Pending,
                LeaveStatus::Approved | LeaveStatus::Rejected | LeaveStatus::Cancelled
            )
        )
    }

    /// Statuses that block overlapping requests
    pub fn is_blocking(&self) -> bool {
        matches!(self, LeaveStatus::Pending | LeaveStatus::Approved)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(LeaveStatus::Pending),
            "approved" => Ok(LeaveStatus::Approved),
            "rejected" => Ok(LeaveStatus::Rejected),
            "cancelled" => Ok(LeaveStatus::Cancelled),
            _ => Err(format!("Unknown leave status: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub leave_type: LeaveType,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: String,
    pub status: LeaveStatus,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<OffsetDateTime>,
    pub review_note: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl LeaveRequest {
    /// Number of calendar days covered, both ends inclusive
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).whole_days() + 1
    }

    pub fn overlaps(&self, start: Date, end: Date) -> bool {
        self.start_date <= end && start <= self.end_date
    }
}

#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    pub user_id: Uuid,
    pub leave_type: LeaveType,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct LeaveStatusChange {
    pub status: LeaveStatus,
    pub reviewed_by: Option<Uuid>,
    pub review_note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LeaveFilter {
    pub user_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub status: Option<LeaveStatus>,
}

#[async_trait]
pub trait LeaveRequestRepository: Send + Sync {
    async fn create(&self, new_request: NewLeaveRequest) -> Result<LeaveRequest, anyhow::Error>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<LeaveRequest>, anyhow::Error>;

    /// Pending or approved requests of the user that intersect `[start, end]`
    async fn find_overlapping(
        &self,
        user_id: Uuid,
        start: Date,
        end: Date,
    ) -> Result<Vec<LeaveRequest>, anyhow::Error>;

    /// Applies the change only while the request is still pending
    async fn transition_from_pending(
        &self,
        id: Uuid,
        change: LeaveStatusChange,
    ) -> Result<Option<LeaveRequest>, anyhow::Error>;

    async fn find_all(
        &self,
        filter: &LeaveFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LeaveRequest>, anyhow::Error>;
    async fn count(&self, filter: &LeaveFilter) -> Result<i64, anyhow::Error>;
}
