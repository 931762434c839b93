//! Response resources: the JSON shape of each domain entity

use crate::application::auth::token_utils::TokenResponse;
use crate::domain::attendance::{AttendanceRecord, AttendanceStatus, Coordinates};
use crate::domain::dashboard::DashboardSummary;
use crate::domain::departments::Department;
use crate::domain::devices::{Device, DevicePlatform};
use crate::domain::leave::{LeaveRequest, LeaveStatus, LeaveType};
use crate::domain::locations::Location;
use crate::domain::notifications::{Notification, NotificationTemplate};
use crate::domain::positions::Position;
use crate::domain::shifts::Shift;
use crate::domain::users::{User, UserRole};
use crate::shared::pagination::{Paginated, PaginationLinkBuilder};
use crate::shared::response::ApiResponse;
use axum::http::Uri;
use serde::Serialize;
use time::{Date, OffsetDateTime, Time};
use utoipa::ToSchema;
use uuid::Uuid;

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");
time::serde::format_description!(clock_time, Time, "[hour]:[minute]");

/// Paginated envelope with `meta` and `links` built from the request URI
pub fn paginated<T, R: From<T>>(
    message: &str,
    uri: &Uri,
    result: Paginated<T>,
) -> ApiResponse<Vec<R>> {
    let page = result.page;
    let links = PaginationLinkBuilder::from_uri(uri, page.number, page.size, result.total).build();

    ApiResponse::new(message, result.items.into_iter().map(R::from).collect())
        .with_meta(page.meta(result.total))
        .with_links(links)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResource {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub department_id: Option<Uuid>,
    pub position_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub shift_id: Option<Uuid>,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}

impl From<User> for UserResource {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            phone: user.phone,
            department_id: user.department_id,
            position_id: user.position_id,
            location_id: user.location_id,
            shift_id: user.shift_id,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Login payload: the token pair plus the profile of the caller
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResource {
    #[serde(flatten)]
    pub tokens: TokenResponse,
    pub user: UserResource,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepartmentResource {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}

impl From<Department> for DepartmentResource {
    fn from(d: Department) -> Self {
        Self {
            id: d.id,
            code: d.code,
            name: d.name,
            description: d.description,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PositionResource {
    pub id: Uuid,
    pub name: String,
    pub department_id: Option<Uuid>,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}

impl From<Position> for PositionResource {
    fn from(p: Position) -> Self {
        Self {
            id: p.id,
            name: p.name,
            department_id: p.department_id,
            description: p.description,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LocationResource {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: i32,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}

impl From<Location> for LocationResource {
    fn from(l: Location) -> Self {
        Self {
            id: l.id,
            name: l.name,
            address: l.address,
            latitude: l.latitude,
            longitude: l.longitude,
            radius_meters: l.radius_meters,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShiftResource {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "clock_time")]
    #[schema(value_type = String, example = "08:00")]
    pub start_time: Time,
    #[serde(with = "clock_time")]
    #[schema(value_type = String, example = "17:00")]
    pub end_time: Time,
    pub late_tolerance_minutes: i32,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}

impl From<Shift> for ShiftResource {
    fn from(s: Shift) -> Self {
        Self {
            id: s.id,
            name: s.name,
            start_time: s.start_time,
            end_time: s.end_time,
            late_tolerance_minutes: s.late_tolerance_minutes,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct CoordinatesResource {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinates> for CoordinatesResource {
    fn from(c: Coordinates) -> Self {
        Self {
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceResource {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(with = "calendar_date")]
    #[schema(value_type = String, format = Date)]
    pub work_date: Date,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub check_in_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub check_out_at: Option<OffsetDateTime>,
    pub check_in_location: Option<CoordinatesResource>,
    pub check_out_location: Option<CoordinatesResource>,
    pub status: AttendanceStatus,
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
}

impl From<crate::domain::attendance::Attendance> for AttendanceResource {
    fn from(a: crate::domain::attendance::Attendance) -> Self {
        Self {
            id: a.id,
            user_id: a.user_id,
            work_date: a.work_date,
            check_in_at: a.check_in_at,
            check_out_at: a.check_out_at,
            check_in_location: a.check_in_location.map(Into::into),
            check_out_location: a.check_out_location.map(Into::into),
            status: a.status,
            note: a.note,
            employee_name: None,
            department_id: None,
            department_name: None,
        }
    }
}

impl From<AttendanceRecord> for AttendanceResource {
    fn from(record: AttendanceRecord) -> Self {
        let mut resource = Self::from(record.attendance);
        resource.employee_name = Some(record.employee_name).filter(|n| !n.is_empty());
        resource.department_id = record.department_id;
        resource.department_name = record.department_name;
        resource
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LeaveResource {
    pub id: Uuid,
    pub user_id: Uuid,
    pub leave_type: LeaveType,
    #[serde(with = "calendar_date")]
    #[schema(value_type = String, format = Date)]
    pub start_date: Date,
    #[serde(with = "calendar_date")]
    #[schema(value_type = String, format = Date)]
    pub end_date: Date,
    pub days: i64,
    pub reason: String,
    pub status: LeaveStatus,
    pub reviewed_by: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub reviewed_at: Option<OffsetDateTime>,
    pub review_note: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
}

impl From<LeaveRequest> for LeaveResource {
    fn from(r: LeaveRequest) -> Self {
        Self {
            days: r.days(),
            id: r.id,
            user_id: r.user_id,
            leave_type: r.leave_type,
            start_date: r.start_date,
            end_date: r.end_date,
            reason: r.reason,
            status: r.status,
            reviewed_by: r.reviewed_by,
            reviewed_at: r.reviewed_at,
            review_note: r.review_note,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationResource {
    pub id: Uuid,
    pub event_code: String,
    pub title: String,
    pub body: String,
    pub is_read: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub read_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
}

impl From<Notification> for NotificationResource {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            event_code: n.event_code,
            title: n.title,
            body: n.body,
            is_read: n.read_at.is_some(),
            read_at: n.read_at,
            created_at: n.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCountResource {
    pub unread: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TemplateResource {
    pub id: Uuid,
    pub event_code: String,
    pub title_template: String,
    pub body_template: String,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}

impl From<NotificationTemplate> for TemplateResource {
    fn from(t: NotificationTemplate) -> Self {
        Self {
            id: t.id,
            event_code: t.event_code,
            title_template: t.title_template,
            body_template: t.body_template,
            is_active: t.is_active,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeviceResource {
    pub id: Uuid,
    pub push_token: String,
    pub platform: DevicePlatform,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub last_seen_at: OffsetDateTime,
}

impl From<Device> for DeviceResource {
    fn from(d: Device) -> Self {
        Self {
            id: d.id,
            push_token: d.push_token,
            platform: d.platform,
            last_seen_at: d.last_seen_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResource {
    #[serde(with = "calendar_date")]
    #[schema(value_type = String, format = Date)]
    pub date: Date,
    pub active_employees: i64,
    pub present_today: i64,
    pub late_today: i64,
    pub on_leave_today: i64,
    pub pending_leave_requests: i64,
    pub departments: i64,
}

impl From<DashboardSummary> for DashboardResource {
    fn from(s: DashboardSummary) -> Self {
        Self {
            date: s.date,
            active_employees: s.active_employees,
            present_today: s.present_today,
            late_today: s.late_today,
            on_leave_today: s.on_leave_today,
            pending_leave_requests: s.pending_leave_requests,
            departments: s.departments,
        }
    }
}
