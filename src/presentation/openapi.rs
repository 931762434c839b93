use crate::application::attendance::check_in::AttendanceRequest;
use crate::application::auth::change_password::ChangePasswordRequest;
use crate::application::auth::login::LoginRequest;
use crate::application::auth::mobile_login::MobileLoginRequest;
use crate::application::auth::refresh::RefreshTokenRequest;
use crate::application::auth::token_utils::TokenResponse;
use crate::application::departments::create::CreateDepartmentRequest;
use crate::application::departments::update::UpdateDepartmentRequest;
use crate::application::leave::review::ReviewLeaveRequest;
use crate::application::leave::submit::SubmitLeaveRequest;
use crate::application::locations::{CreateLocationRequest, UpdateLocationRequest};
use crate::application::notifications::devices::{RegisterDeviceRequest, UnregisterDeviceRequest};
use crate::application::notifications::send::SendNotificationRequest;
use crate::application::notifications::templates::{CreateTemplateRequest, UpdateTemplateRequest};
use crate::application::positions::{CreatePositionRequest, UpdatePositionRequest};
use crate::application::shifts::{CreateShiftRequest, UpdateShiftRequest};
use crate::application::users::create::CreateUserRequest;
use crate::application::users::update::UpdateUserRequest;
use crate::domain::attendance::AttendanceStatus;
use crate::domain::devices::DevicePlatform;
use crate::domain::leave::{LeaveStatus, LeaveType};
use crate::domain::users::UserRole;
use crate::presentation::dtos::{
    AttendanceResource, CoordinatesResource, DashboardResource, DepartmentResource,
    DeviceResource, LeaveResource, LocationResource, LoginResource, NotificationResource,
    PositionResource, ShiftResource, TemplateResource, UnreadCountResource, UserResource,
};
use crate::presentation::handlers::health::HealthResource;
use crate::shared::error::{ErrorDetail, ErrorResponse};
use crate::shared::response::{MessageResponse, PaginationLinks, PaginationMeta};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS API",
        version = "0.1.0",
        description = "Attendance, leave, organization structure and notifications.\n\nAuthenticate with `Authorization: Bearer <token>` or the `session_token` cookie set by the web login."
    ),
    paths(
        crate::presentation::handlers::health::health_check,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::auth::mobile_login,
        crate::presentation::handlers::auth::refresh_token,
        crate::presentation::handlers::auth::web_refresh_token,
        crate::presentation::handlers::auth::logout,
        crate::presentation::handlers::auth::me,
        crate::presentation::handlers::auth::change_password,
        crate::presentation::handlers::users::create_user,
        crate::presentation::handlers::users::list_users,
        crate::presentation::handlers::users::get_user,
        crate::presentation::handlers::users::update_user,
        crate::presentation::handlers::users::delete_user,
        crate::presentation::handlers::departments::create_department,
        crate::presentation::handlers::departments::list_departments,
        crate::presentation::handlers::departments::get_department,
        crate::presentation::handlers::departments::update_department,
        crate::presentation::handlers::departments::delete_department,
        crate::presentation::handlers::positions::create_position,
        crate::presentation::handlers::positions::list_positions,
        crate::presentation::handlers::positions::get_position,
        crate::presentation::handlers::positions::update_position,
        crate::presentation::handlers::positions::delete_position,
        crate::presentation::handlers::locations::create_location,
        crate::presentation::handlers::locations::list_locations,
        crate::presentation::handlers::locations::get_location,
        crate::presentation::handlers::locations::update_location,
        crate::presentation::handlers::locations::delete_location,
        crate::presentation::handlers::shifts::create_shift,
        crate::presentation::handlers::shifts::list_shifts,
        crate::presentation::handlers::shifts::get_shift,
        crate::presentation::handlers::shifts::update_shift,
        crate::presentation::handlers::shifts::delete_shift,
        crate::presentation::handlers::attendance::check_in,
        crate::presentation::handlers::attendance::check_out,
        crate::presentation::handlers::attendance::my_attendance,
        crate::presentation::handlers::attendance::list_attendance,
        crate::presentation::handlers::leave::submit_leave,
        crate::presentation::handlers::leave::my_leave,
        crate::presentation::handlers::leave::cancel_leave,
        crate::presentation::handlers::leave::list_leave,
        crate::presentation::handlers::leave::approve_leave,
        crate::presentation::handlers::leave::reject_leave,
        crate::presentation::handlers::notifications::recent_notifications,
        crate::presentation::handlers::notifications::list_notifications,
        crate::presentation::handlers::notifications::unread_count,
        crate::presentation::handlers::notifications::mark_read,
        crate::presentation::handlers::notifications::mark_all_read,
        crate::presentation::handlers::notifications::delete_notification,
        crate::presentation::handlers::notifications::register_device,
        crate::presentation::handlers::notifications::unregister_device,
        crate::presentation::handlers::notifications::list_templates,
        crate::presentation::handlers::notifications::create_template,
        crate::presentation::handlers::notifications::get_template,
        crate::presentation::handlers::notifications::update_template,
        crate::presentation::handlers::notifications::send_notification,
        crate::presentation::handlers::dashboard::dashboard_summary,
    ),
    components(
        schemas(
            // Requests
            LoginRequest,
            MobileLoginRequest,
            RefreshTokenRequest,
            ChangePasswordRequest,
            CreateUserRequest,
            UpdateUserRequest,
            CreateDepartmentRequest,
            UpdateDepartmentRequest,
            CreatePositionRequest,
            UpdatePositionRequest,
            CreateLocationRequest,
            UpdateLocationRequest,
            CreateShiftRequest,
            UpdateShiftRequest,
            AttendanceRequest,
            SubmitLeaveRequest,
            ReviewLeaveRequest,
            RegisterDeviceRequest,
            UnregisterDeviceRequest,
            CreateTemplateRequest,
            UpdateTemplateRequest,
            SendNotificationRequest,

            // Resources
            TokenResponse,
            LoginResource,
            UserResource,
            DepartmentResource,
            PositionResource,
            LocationResource,
            ShiftResource,
            CoordinatesResource,
            AttendanceResource,
            LeaveResource,
            NotificationResource,
            UnreadCountResource,
            TemplateResource,
            DeviceResource,
            DashboardResource,
            HealthResource,

            // Enums
            UserRole,
            AttendanceStatus,
            LeaveType,
            LeaveStatus,
            DevicePlatform,

            // Envelopes
            MessageResponse,
            PaginationMeta,
            PaginationLinks,
            ErrorResponse,
            ErrorDetail,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Login, token refresh and profile"),
        (name = "users", description = "Employee administration"),
        (name = "departments", description = "Departments"),
        (name = "positions", description = "Job positions"),
        (name = "locations", description = "Work locations and geofences"),
        (name = "shifts", description = "Work shifts"),
        (name = "attendance", description = "Check-in, check-out and reports"),
        (name = "leave", description = "Leave requests and review"),
        (name = "notifications", description = "Notification inbox and manual sends"),
        (name = "notification-templates", description = "Notification templates"),
        (name = "devices", description = "Push device registration"),
        (name = "dashboard", description = "Back-office summary")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
