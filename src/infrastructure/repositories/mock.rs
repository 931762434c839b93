//! In-memory repositories for unit and application tests

use crate::domain::attendance::{
    Attendance, AttendanceFilter, AttendanceRecord, AttendanceRepository, Coordinates,
    NewAttendance,
};
use crate::domain::auth::{AuthService, Claims, NewRefreshToken, RefreshToken, RefreshTokenRepository};
use crate::domain::departments::{Department, DepartmentRepository, NewDepartment, UpdateDepartment};
use crate::domain::devices::{Device, DevicePlatform, DeviceRepository};
use crate::domain::leave::{
    LeaveFilter, LeaveRequest, LeaveRequestRepository, LeaveStatus, LeaveStatusChange,
    NewLeaveRequest,
};
use crate::domain::locations::{Location, LocationRepository, NewLocation, UpdateLocation};
use crate::domain::notifications::{
    NewNotification, NewNotificationTemplate, Notification, NotificationRepository,
    NotificationTemplate, NotificationTemplateRepository, UpdateNotificationTemplate,
};
use crate::domain::positions::{NewPosition, Position, PositionRepository, UpdatePosition};
use crate::domain::push::{MulticastOutcome, PushMessage, PushProvider};
use crate::domain::shifts::{NewShift, Shift, ShiftRepository, UpdateShift};
use crate::domain::users::{NewUser, UpdateUser, User, UserFilter, UserRepository, UserRole};
use async_trait::async_trait;
use std::sync::Arc;
use time::{Date, OffsetDateTime};
use tokio::sync::Mutex;
use uuid::Uuid;

fn page<T: Clone>(items: &[T], limit: i64, offset: i64) -> Vec<T> {
    items
        .iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .cloned()
        .collect()
}

fn matches_search(haystacks: &[&str], search: Option<&str>) -> bool {
    match search.filter(|s| !s.is_empty()) {
        Some(needle) => {
            let needle = needle.to_lowercase();
            haystacks
                .iter()
                .any(|h| h.to_lowercase().contains(&needle))
        }
        None => true,
    }
}

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn user_matches(user: &User, filter: &UserFilter) -> bool {
    filter.department_id.is_none_or(|d| user.department_id == Some(d))
        && filter.role.is_none_or(|r| user.role == r)
        && filter.active.is_none_or(|a| user.is_active == a)
        && matches_search(&[&user.name, &user.email], filter.search.as_deref())
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, anyhow::Error> {
        let mut users = self.users.lock().await;
        if users.iter().any(|u| u.email == new_user.email) {
            anyhow::bail!("duplicate key value violates unique constraint \"users_email_key\"");
        }

        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            phone: new_user.phone,
            department_id: new_user.department_id,
            position_id: new_user.position_id,
            location_id: new_user.location_id,
            shift_id: new_user.shift_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, anyhow::Error> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, anyhow::Error> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_all(
        &self,
        filter: &UserFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, anyhow::Error> {
        let users = self.users.lock().await;
        let mut matched: Vec<User> = users
            .iter()
            .filter(|u| user_matches(u, filter))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page(&matched, limit, offset))
    }

    async fn count(&self, filter: &UserFilter) -> Result<i64, anyhow::Error> {
        let users = self.users.lock().await;
        Ok(users.iter().filter(|u| user_matches(u, filter)).count() as i64)
    }

    async fn update(&self, id: Uuid, update: UpdateUser) -> Result<Option<User>, anyhow::Error> {
        let mut users = self.users.lock().await;
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(password_hash) = update.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if update.phone.is_some() {
            user.phone = update.phone;
        }
        if update.department_id.is_some() {
            user.department_id = update.department_id;
        }
        if update.position_id.is_some() {
            user.position_id = update.position_id;
        }
        if update.location_id.is_some() {
            user.location_id = update.location_id;
        }
        if update.shift_id.is_some() {
            user.shift_id = update.shift_id;
        }
        if let Some(is_active) = update.is_active {
            user.is_active = is_active;
        }
        user.updated_at = OffsetDateTime::now_utc();

        Ok(Some(user.clone()))
    }
}

#[derive(Clone, Default)]
pub struct MockRefreshTokenRepository {
    tokens: Arc<Mutex<Vec<RefreshToken>>>,
}

impl MockRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored token, revoked ones included
    pub async fn all(&self) -> Vec<RefreshToken> {
        self.tokens.lock().await.clone()
    }
}

fn store_token(tokens: &mut Vec<RefreshToken>, token: NewRefreshToken) -> RefreshToken {
    let stored = RefreshToken {
        id: Uuid::new_v4(),
        user_id: token.user_id,
        session_id: token.session_id,
        token_hash: token.token_hash,
        expires_at: token.expires_at,
        revoked_at: None,
        created_at: OffsetDateTime::now_utc(),
    };
    tokens.push(stored.clone());
    stored
}

#[async_trait]
impl RefreshTokenRepository for MockRefreshTokenRepository {
    async fn create(&self, token: NewRefreshToken) -> anyhow::Result<RefreshToken> {
        let mut tokens = self.tokens.lock().await;
        Ok(store_token(&mut tokens, token))
    }

    async fn find_active(
        &self,
        session_id: Uuid,
        token_hash: &str,
    ) -> anyhow::Result<Option<RefreshToken>> {
        let now = OffsetDateTime::now_utc();
        let tokens = self.tokens.lock().await;
        Ok(tokens
            .iter()
            .find(|t| t.session_id == session_id && t.token_hash == token_hash && t.is_active_at(now))
            .cloned())
    }

    async fn rotate(
        &self,
        old_id: Uuid,
        replacement: NewRefreshToken,
    ) -> anyhow::Result<Option<RefreshToken>> {
        let now = OffsetDateTime::now_utc();
        let mut tokens = self.tokens.lock().await;
        let Some(old) = tokens
            .iter_mut()
            .find(|t| t.id == old_id && t.is_active_at(now))
        else {
            return Ok(None);
        };
        old.revoked_at = Some(now);

        Ok(Some(store_token(&mut tokens, replacement)))
    }

    async fn revoke_session(&self, session_id: Uuid) -> anyhow::Result<u64> {
        let now = OffsetDateTime::now_utc();
        let mut tokens = self.tokens.lock().await;
        let mut revoked = 0;
        for token in tokens
            .iter_mut()
            .filter(|t| t.session_id == session_id && t.revoked_at.is_none())
        {
            token.revoked_at = Some(now);
            revoked += 1;
        }
        Ok(revoked)
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> anyhow::Result<u64> {
        let now = OffsetDateTime::now_utc();
        let mut tokens = self.tokens.lock().await;
        let mut revoked = 0;
        for token in tokens
            .iter_mut()
            .filter(|t| t.user_id == user_id && t.revoked_at.is_none())
        {
            token.revoked_at = Some(now);
            revoked += 1;
        }
        Ok(revoked)
    }

    async fn delete_expired(&self, before: OffsetDateTime) -> anyhow::Result<u64> {
        let mut tokens = self.tokens.lock().await;
        let len = tokens.len();
        tokens.retain(|t| t.expires_at > before);
        Ok((len - tokens.len()) as u64)
    }
}

#[derive(Clone, Default)]
pub struct MockDepartmentRepository {
    departments: Arc<Mutex<Vec<Department>>>,
}

impl MockDepartmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DepartmentRepository for MockDepartmentRepository {
    async fn create(&self, new_department: NewDepartment) -> Result<Department, anyhow::Error> {
        let mut departments = self.departments.lock().await;
        if departments.iter().any(|d| d.code == new_department.code) {
            anyhow::bail!("duplicate key value violates unique constraint \"departments_code_key\"");
        }

        let now = OffsetDateTime::now_utc();
        let department = Department {
            id: Uuid::new_v4(),
            code: new_department.code,
            name: new_department.name,
            description: new_department.description,
            created_at: now,
            updated_at: now,
        };
        departments.push(department.clone());
        Ok(department)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Department>, anyhow::Error> {
        let departments = self.departments.lock().await;
        Ok(departments.iter().find(|d| d.id == id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Department>, anyhow::Error> {
        let departments = self.departments.lock().await;
        Ok(departments.iter().find(|d| d.code == code).cloned())
    }

    async fn find_all(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Department>, anyhow::Error> {
        let departments = self.departments.lock().await;
        let mut matched: Vec<Department> = departments
            .iter()
            .filter(|d| matches_search(&[&d.name, &d.code], search))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page(&matched, limit, offset))
    }

    async fn count(&self, search: Option<&str>) -> Result<i64, anyhow::Error> {
        let departments = self.departments.lock().await;
        Ok(departments
            .iter()
            .filter(|d| matches_search(&[&d.name, &d.code], search))
            .count() as i64)
    }

    async fn update(
        &self,
        id: Uuid,
        update: UpdateDepartment,
    ) -> Result<Option<Department>, anyhow::Error> {
        let mut departments = self.departments.lock().await;
        let Some(department) = departments.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        if let Some(code) = update.code {
            department.code = code;
        }
        if let Some(name) = update.name {
            department.name = name;
        }
        if update.description.is_some() {
            department.description = update.description;
        }
        department.updated_at = OffsetDateTime::now_utc();
        Ok(Some(department.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let mut departments = self.departments.lock().await;
        let len = departments.len();
        departments.retain(|d| d.id != id);
        Ok(departments.len() < len)
    }
}

#[derive(Clone, Default)]
pub struct MockPositionRepository {
    positions: Arc<Mutex<Vec<Position>>>,
}

impl MockPositionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn position_matches(position: &Position, search: Option<&str>, department_id: Option<Uuid>) -> bool {
    department_id.is_none_or(|d| position.department_id == Some(d))
        && matches_search(&[&position.name], search)
}

#[async_trait]
impl PositionRepository for MockPositionRepository {
    async fn create(&self, new_position: NewPosition) -> Result<Position, anyhow::Error> {
        let now = OffsetDateTime::now_utc();
        let position = Position {
            id: Uuid::new_v4(),
            name: new_position.name,
            department_id: new_position.department_id,
            description: new_position.description,
            created_at: now,
            updated_at: now,
        };
        self.positions.lock().await.push(position.clone());
        Ok(position)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Position>, anyhow::Error> {
        let positions = self.positions.lock().await;
        Ok(positions.iter().find(|p| p.id == id).cloned())
    }

    async fn find_all(
        &self,
        search: Option<&str>,
        department_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Position>, anyhow::Error> {
        let positions = self.positions.lock().await;
        let matched: Vec<Position> = positions
            .iter()
            .filter(|p| position_matches(p, search, department_id))
            .cloned()
            .collect();
        Ok(page(&matched, limit, offset))
    }

    async fn count(
        &self,
        search: Option<&str>,
        department_id: Option<Uuid>,
    ) -> Result<i64, anyhow::Error> {
        let positions = self.positions.lock().await;
        Ok(positions
            .iter()
            .filter(|p| position_matches(p, search, department_id))
            .count() as i64)
    }

    async fn update(
        &self,
        id: Uuid,
        update: UpdatePosition,
    ) -> Result<Option<Position>, anyhow::Error> {
        let mut positions = self.positions.lock().await;
        let Some(position) = positions.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            position.name = name;
        }
        if update.department_id.is_some() {
            position.department_id = update.department_id;
        }
        if update.description.is_some() {
            position.description = update.description;
        }
        position.updated_at = OffsetDateTime::now_utc();
        Ok(Some(position.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let mut positions = self.positions.lock().await;
        let len = positions.len();
        positions.retain(|p| p.id != id);
        Ok(positions.len() < len)
    }
}

#[derive(Clone, Default)]
pub struct MockLocationRepository {
    locations: Arc<Mutex<Vec<Location>>>,
}

impl MockLocationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocationRepository for MockLocationRepository {
    async fn create(&self, new_location: NewLocation) -> Result<Location, anyhow::Error> {
        let now = OffsetDateTime::now_utc();
        let location = Location {
            id: Uuid::new_v4(),
            name: new_location.name,
            address: new_location.address,
            latitude: new_location.latitude,
            longitude: new_location.longitude,
            radius_meters: new_location.radius_meters,
            created_at: now,
            updated_at: now,
        };
        self.locations.lock().await.push(location.clone());
        Ok(location)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Location>, anyhow::Error> {
        let locations = self.locations.lock().await;
        Ok(locations.iter().find(|l| l.id == id).cloned())
    }

    async fn find_all(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Location>, anyhow::Error> {
        let locations = self.locations.lock().await;
        let matched: Vec<Location> = locations
            .iter()
            .filter(|l| matches_search(&[&l.name], search))
            .cloned()
            .collect();
        Ok(page(&matched, limit, offset))
    }

    async fn count(&self, search: Option<&str>) -> Result<i64, anyhow::Error> {
        let locations = self.locations.lock().await;
        Ok(locations
            .iter()
            .filter(|l| matches_search(&[&l.name], search))
            .count() as i64)
    }

    async fn update(
        &self,
        id: Uuid,
        update: UpdateLocation,
    ) -> Result<Option<Location>, anyhow::Error> {
        let mut locations = self.locations.lock().await;
        let Some(location) = locations.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            location.name = name;
        }
        if update.address.is_some() {
            location.address = update.address;
        }
        if let Some(latitude) = update.latitude {
            location.latitude = latitude;
        }
        if let Some(longitude) = update.longitude {
            location.longitude = longitude;
        }
        if let Some(radius) = update.radius_meters {
            location.radius_meters = radius;
        }
        location.updated_at = OffsetDateTime::now_utc();
        Ok(Some(location.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let mut locations = self.locations.lock().await;
        let len = locations.len();
        locations.retain(|l| l.id != id);
        Ok(locations.len() < len)
    }
}

#[derive(Clone, Default)]
pub struct MockShiftRepository {
    shifts: Arc<Mutex<Vec<Shift>>>,
}

impl MockShiftRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShiftRepository for MockShiftRepository {
    async fn create(&self, new_shift: NewShift) -> Result<Shift, anyhow::Error> {
        let now = OffsetDateTime::now_utc();
        let shift = Shift {
            id: Uuid::new_v4(),
            name: new_shift.name,
            start_time: new_shift.start_time,
            end_time: new_shift.end_time,
            late_tolerance_minutes: new_shift.late_tolerance_minutes,
            created_at: now,
            updated_at: now,
        };
        self.shifts.lock().await.push(shift.clone());
        Ok(shift)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Shift>, anyhow::Error> {
        let shifts = self.shifts.lock().await;
        Ok(shifts.iter().find(|s| s.id == id).cloned())
    }

    async fn find_all(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Shift>, anyhow::Error> {
        let shifts = self.shifts.lock().await;
        let matched: Vec<Shift> = shifts
            .iter()
            .filter(|s| matches_search(&[&s.name], search))
            .cloned()
            .collect();
        Ok(page(&matched, limit, offset))
    }

    async fn count(&self, search: Option<&str>) -> Result<i64, anyhow::Error> {
        let shifts = self.shifts.lock().await;
        Ok(shifts
            .iter()
            .filter(|s| matches_search(&[&s.name], search))
            .count() as i64)
    }

    async fn update(&self, id: Uuid, update: UpdateShift) -> Result<Option<Shift>, anyhow::Error> {
        let mut shifts = self.shifts.lock().await;
        let Some(shift) = shifts.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            shift.name = name;
        }
        if let Some(start_time) = update.start_time {
            shift.start_time = start_time;
        }
        if let Some(end_time) = update.end_time {
            shift.end_time = end_time;
        }
        if let Some(tolerance) = update.late_tolerance_minutes {
            shift.late_tolerance_minutes = tolerance;
        }
        shift.updated_at = OffsetDateTime::now_utc();
        Ok(Some(shift.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let mut shifts = self.shifts.lock().await;
        let len = shifts.len();
        shifts.retain(|s| s.id != id);
        Ok(shifts.len() < len)
    }
}

#[derive(Clone, Default)]
pub struct MockAttendanceRepository {
    attendances: Arc<Mutex<Vec<Attendance>>>,
}

impl MockAttendanceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn attendance_matches(attendance: &Attendance, filter: &AttendanceFilter) -> bool {
    filter.date_from.is_none_or(|d| attendance.work_date >= d)
        && filter.date_to.is_none_or(|d| attendance.work_date <= d)
        && filter.user_id.is_none_or(|u| attendance.user_id == u)
        && filter.status.is_none_or(|s| attendance.status == s)
}

#[async_trait]
impl AttendanceRepository for MockAttendanceRepository {
    async fn create(&self, new_attendance: NewAttendance) -> Result<Attendance, anyhow::Error> {
        let mut attendances = self.attendances.lock().await;
        if attendances
            .iter()
            .any(|a| a.user_id == new_attendance.user_id && a.work_date == new_attendance.work_date)
        {
            anyhow::bail!("duplicate key value violates unique constraint \"attendances_user_id_work_date_key\"");
        }

        let now = OffsetDateTime::now_utc();
        let attendance = Attendance {
            id: Uuid::new_v4(),
            user_id: new_attendance.user_id,
            work_date: new_attendance.work_date,
            check_in_at: new_attendance.check_in_at,
            check_out_at: None,
            check_in_location: new_attendance.check_in_location,
            check_out_location: None,
            status: new_attendance.status,
            note: new_attendance.note,
            created_at: now,
            updated_at: now,
        };
        attendances.push(attendance.clone());
        Ok(attendance)
    }

    async fn find_by_user_and_date(
        &self,
        user_id: Uuid,
        work_date: Date,
    ) -> Result<Option<Attendance>, anyhow::Error> {
        let attendances = self.attendances.lock().await;
        Ok(attendances
            .iter()
            .find(|a| a.user_id == user_id && a.work_date == work_date)
            .cloned())
    }

    async fn check_out(
        &self,
        id: Uuid,
        at: OffsetDateTime,
        location: Option<Coordinates>,
    ) -> Result<Option<Attendance>, anyhow::Error> {
        let mut attendances = self.attendances.lock().await;
        let Some(attendance) = attendances
            .iter_mut()
            .find(|a| a.id == id && a.check_out_at.is_none())
        else {
            return Ok(None);
        };
        attendance.check_out_at = Some(at);
        attendance.check_out_location = location;
        attendance.updated_at = OffsetDateTime::now_utc();
        Ok(Some(attendance.clone()))
    }

    // The in-memory store has no user join, so department filters match nothing
    async fn find_all(
        &self,
        filter: &AttendanceFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AttendanceRecord>, anyhow::Error> {
        let attendances = self.attendances.lock().await;
        let mut matched: Vec<Attendance> = attendances
            .iter()
            .filter(|a| filter.department_id.is_none() && attendance_matches(a, filter))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.work_date.cmp(&a.work_date));

        Ok(page(&matched, limit, offset)
            .into_iter()
            .map(|attendance| AttendanceRecord {
                attendance,
                employee_name: String::new(),
                department_id: None,
                department_name: None,
            })
            .collect())
    }

    async fn count(&self, filter: &AttendanceFilter) -> Result<i64, anyhow::Error> {
        let attendances = self.attendances.lock().await;
        Ok(attendances
            .iter()
            .filter(|a| filter.department_id.is_none() && attendance_matches(a, filter))
            .count() as i64)
    }
}

#[derive(Clone, Default)]
pub struct MockLeaveRequestRepository {
    requests: Arc<Mutex<Vec<LeaveRequest>>>,
}

impl MockLeaveRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn leave_matches(request: &LeaveRequest, filter: &LeaveFilter) -> bool {
    filter.department_id.is_none()
        && filter.user_id.is_none_or(|u| request.user_id == u)
        && filter.status.is_none_or(|s| request.status == s)
}

#[async_trait]
impl LeaveRequestRepository for MockLeaveRequestRepository {
    async fn create(&self, new_request: NewLeaveRequest) -> Result<LeaveRequest, anyhow::Error> {
        let now = OffsetDateTime::now_utc();
        let request = LeaveRequest {
            id: Uuid::new_v4(),
            user_id: new_request.user_id,
            leave_type: new_request.leave_type,
            start_date: new_request.start_date,
            end_date: new_request.end_date,
            reason: new_request.reason,
            status: LeaveStatus::Pending,
            reviewed_by: None,
            reviewed_at: None,
            review_note: None,
            created_at: now,
            updated_at: now,
        };
        self.requests.lock().await.push(request.clone());
        Ok(request)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<LeaveRequest>, anyhow::Error> {
        let requests = self.requests.lock().await;
        Ok(requests.iter().find(|r| r.id == id).cloned())
    }

    async fn find_overlapping(
        &self,
        user_id: Uuid,
        start: Date,
        end: Date,
    ) -> Result<Vec<LeaveRequest>, anyhow::Error> {
        let requests = self.requests.lock().await;
        Ok(requests
            .iter()
            .filter(|r| r.user_id == user_id && r.status.is_blocking() && r.overlaps(start, end))
            .cloned()
            .collect())
    }

    async fn transition_from_pending(
        &self,
        id: Uuid,
        change: LeaveStatusChange,
    ) -> Result<Option<LeaveRequest>, anyhow::Error> {
        let mut requests = self.requests.lock().await;
        let Some(request) = requests
            .iter_mut()
            .find(|r| r.id == id && r.status == LeaveStatus::Pending)
        else {
            return Ok(None);
        };

        let now = OffsetDateTime::now_utc();
        request.status = change.status;
        request.reviewed_at = change.reviewed_by.map(|_| now);
        request.reviewed_by = change.reviewed_by;
        request.review_note = change.review_note;
        request.updated_at = now;
        Ok(Some(request.clone()))
    }

    async fn find_all(
        &self,
        filter: &LeaveFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LeaveRequest>, anyhow::Error> {
        let requests = self.requests.lock().await;
        let mut matched: Vec<LeaveRequest> = requests
            .iter()
            .filter(|r| leave_matches(r, filter))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page(&matched, limit, offset))
    }

    async fn count(&self, filter: &LeaveFilter) -> Result<i64, anyhow::Error> {
        let requests = self.requests.lock().await;
        Ok(requests.iter().filter(|r| leave_matches(r, filter)).count() as i64)
    }
}

#[derive(Clone, Default)]
pub struct MockNotificationRepository {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl MockNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored row, soft-deleted ones included
    pub async fn all(&self) -> Vec<Notification> {
        self.notifications.lock().await.clone()
    }
}

fn visible_for(notifications: &[Notification], user_id: Uuid) -> Vec<Notification> {
    let mut visible: Vec<Notification> = notifications
        .iter()
        .filter(|n| n.user_id == user_id && n.deleted_at.is_none())
        .cloned()
        .collect();
    // Newest first; insertion order breaks timestamp ties
    visible.reverse();
    visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    visible
}

#[async_trait]
impl NotificationRepository for MockNotificationRepository {
    async fn create(&self, notification: NewNotification) -> Result<Notification, anyhow::Error> {
        let stored = Notification {
            id: Uuid::new_v4(),
            user_id: notification.user_id,
            event_code: notification.event_code,
            title: notification.title,
            body: notification.body,
            read_at: None,
            created_at: OffsetDateTime::now_utc(),
            deleted_at: None,
        };
        self.notifications.lock().await.push(stored.clone());
        Ok(stored)
    }

    async fn find_recent(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Notification>, anyhow::Error> {
        self.find_by_user(user_id, limit, 0).await
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, anyhow::Error> {
        let notifications = self.notifications.lock().await;
        Ok(page(&visible_for(&notifications, user_id), limit, offset))
    }

    async fn count_by_user(&self, user_id: Uuid) -> Result<i64, anyhow::Error> {
        let notifications = self.notifications.lock().await;
        Ok(visible_for(&notifications, user_id).len() as i64)
    }

    async fn count_unread(&self, user_id: Uuid) -> Result<i64, anyhow::Error> {
        let notifications = self.notifications.lock().await;
        Ok(visible_for(&notifications, user_id)
            .iter()
            .filter(|n| n.read_at.is_none())
            .count() as i64)
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<bool, anyhow::Error> {
        let mut notifications = self.notifications.lock().await;
        match notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id && n.deleted_at.is_none())
        {
            Some(notification) => {
                notification.read_at.get_or_insert_with(OffsetDateTime::now_utc);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, anyhow::Error> {
        let now = OffsetDateTime::now_utc();
        let mut notifications = self.notifications.lock().await;
        let mut updated = 0;
        for notification in notifications.iter_mut().filter(|n| {
            n.user_id == user_id && n.read_at.is_none() && n.deleted_at.is_none()
        }) {
            notification.read_at = Some(now);
            updated += 1;
        }
        Ok(updated)
    }

    async fn soft_delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, anyhow::Error> {
        let mut notifications = self.notifications.lock().await;
        match notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id && n.deleted_at.is_none())
        {
            Some(notification) => {
                notification.deleted_at = Some(OffsetDateTime::now_utc());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Clone, Default)]
pub struct MockNotificationTemplateRepository {
    templates: Arc<Mutex<Vec<NotificationTemplate>>>,
}

impl MockNotificationTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationTemplateRepository for MockNotificationTemplateRepository {
    async fn find_active_by_event(
        &self,
        event_code: &str,
    ) -> Result<Option<NotificationTemplate>, anyhow::Error> {
        let templates = self.templates.lock().await;
        Ok(templates
            .iter()
            .find(|t| t.event_code == event_code && t.is_active)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<NotificationTemplate>, anyhow::Error> {
        let templates = self.templates.lock().await;
        Ok(templates.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_event(
        &self,
        event_code: &str,
    ) -> Result<Option<NotificationTemplate>, anyhow::Error> {
        let templates = self.templates.lock().await;
        Ok(templates.iter().find(|t| t.event_code == event_code).cloned())
    }

    async fn find_all(&self) -> Result<Vec<NotificationTemplate>, anyhow::Error> {
        let mut templates = self.templates.lock().await.clone();
        templates.sort_by(|a, b| a.event_code.cmp(&b.event_code));
        Ok(templates)
    }

    async fn create(
        &self,
        template: NewNotificationTemplate,
    ) -> Result<NotificationTemplate, anyhow::Error> {
        let mut templates = self.templates.lock().await;
        if templates.iter().any(|t| t.event_code == template.event_code) {
            anyhow::bail!(
                "duplicate key value violates unique constraint \"notification_templates_event_code_key\""
            );
        }

        let now = OffsetDateTime::now_utc();
        let stored = NotificationTemplate {
            id: Uuid::new_v4(),
            event_code: template.event_code,
            title_template: template.title_template,
            body_template: template.body_template,
            is_active: template.is_active,
            created_at: now,
            updated_at: now,
        };
        templates.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: Uuid,
        update: UpdateNotificationTemplate,
    ) -> Result<Option<NotificationTemplate>, anyhow::Error> {
        let mut templates = self.templates.lock().await;
        let Some(template) = templates.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(title) = update.title_template {
            template.title_template = title;
        }
        if let Some(body) = update.body_template {
            template.body_template = body;
        }
        if let Some(is_active) = update.is_active {
            template.is_active = is_active;
        }
        template.updated_at = OffsetDateTime::now_utc();
        Ok(Some(template.clone()))
    }
}

#[derive(Clone, Default)]
pub struct MockDeviceRepository {
    devices: Arc<Mutex<Vec<Device>>>,
}

impl MockDeviceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeviceRepository for MockDeviceRepository {
    async fn upsert(
        &self,
        user_id: Uuid,
        push_token: &str,
        platform: DevicePlatform,
    ) -> Result<Device, anyhow::Error> {
        let now = OffsetDateTime::now_utc();
        let mut devices = self.devices.lock().await;

        if let Some(device) = devices.iter_mut().find(|d| d.push_token == push_token) {
            device.user_id = user_id;
            device.platform = platform;
            device.last_seen_at = now;
            return Ok(device.clone());
        }

        let device = Device {
            id: Uuid::new_v4(),
            user_id,
            push_token: push_token.to_string(),
            platform,
            last_seen_at: now,
            created_at: now,
        };
        devices.push(device.clone());
        Ok(device)
    }

    async fn push_tokens_for_user(&self, user_id: Uuid) -> Result<Vec<String>, anyhow::Error> {
        let devices = self.devices.lock().await;
        Ok(devices
            .iter()
            .filter(|d| d.user_id == user_id)
            .map(|d| d.push_token.clone())
            .collect())
    }

    async fn delete_for_user(&self, user_id: Uuid, push_token: &str) -> Result<bool, anyhow::Error> {
        let mut devices = self.devices.lock().await;
        let len = devices.len();
        devices.retain(|d| !(d.user_id == user_id && d.push_token == push_token));
        Ok(devices.len() < len)
    }

    async fn delete_tokens(&self, push_tokens: &[String]) -> Result<u64, anyhow::Error> {
        let mut devices = self.devices.lock().await;
        let len = devices.len();
        devices.retain(|d| !push_tokens.contains(&d.push_token));
        Ok((len - devices.len()) as u64)
    }
}

/// Records every message; can be told to fail or to reject specific tokens
#[derive(Clone, Default)]
pub struct MockPushProvider {
    sent: Arc<Mutex<Vec<PushMessage>>>,
    invalid_tokens: Vec<String>,
    fail: bool,
}

impl MockPushProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn rejecting(invalid_tokens: Vec<String>) -> Self {
        Self {
            invalid_tokens,
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<PushMessage> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl PushProvider for MockPushProvider {
    async fn send_multicast(
        &self,
        message: &PushMessage,
    ) -> Result<MulticastOutcome, anyhow::Error> {
        self.sent.lock().await.push(message.clone());
        if self.fail {
            anyhow::bail!("push provider unavailable");
        }

        let invalid_tokens: Vec<String> = message
            .tokens
            .iter()
            .filter(|t| self.invalid_tokens.contains(t))
            .cloned()
            .collect();

        Ok(MulticastOutcome {
            success_count: message.tokens.len() - invalid_tokens.len(),
            failure_count: invalid_tokens.len(),
            invalid_tokens,
        })
    }
}

/// Unsigned stand-in for the JWT service: tokens are `user_id.role.session_id`
#[derive(Clone, Default)]
pub struct MockAuthService;

impl AuthService for MockAuthService {
    fn generate_access_token(
        &self,
        user_id: Uuid,
        role: UserRole,
        session_id: Uuid,
    ) -> anyhow::Result<String> {
        Ok(format!("{}.{}.{}", user_id, role, session_id))
    }

    fn validate_token(&self, token: &str) -> anyhow::Result<Claims> {
        let mut parts = token.split('.');
        let (Some(user_id), Some(role), Some(session_id), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            anyhow::bail!("Invalid token");
        };

        let role: UserRole = role.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        Ok(Claims::new_access_token(
            Uuid::parse_str(user_id)?,
            role,
            Uuid::parse_str(session_id)?,
            900,
        ))
    }
}

/// `NewUser` with no assignments and a placeholder hash
pub fn new_user(name: &str, email: &str, role: UserRole) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
        password_hash: "hash".to_string(),
        role,
        phone: None,
        department_id: None,
        position_id: None,
        location_id: None,
        shift_id: None,
    }
}
