use hrms::application::attendance::check_in::{AttendanceRequest, CheckInUseCase};
use hrms::application::attendance::check_out::CheckOutUseCase;
use hrms::application::attendance::history::{AttendanceHistoryRequest, AttendanceHistoryUseCase};
use hrms::application::attendance::list::{
    AttendanceFilterParams, ListAttendanceRequest, ListAttendanceUseCase,
};
use hrms::domain::attendance::AttendanceStatus;
use hrms::domain::locations::{LocationRepository, NewLocation};
use hrms::domain::shifts::{NewShift, ShiftRepository};
use hrms::domain::users::{UpdateUser, User, UserRepository, UserRole};
use hrms::infrastructure::repositories::mock::{
    MockAttendanceRepository, MockLocationRepository, MockShiftRepository, MockUserRepository,
    new_user,
};
use hrms::shared::error::AppError;
use std::sync::Arc;
use time::OffsetDateTime;
use time::macros::{date, datetime, offset, time};

const OFFICE: (f64, f64) = (-6.2088, 106.8456);

struct Fixture {
    users: Arc<MockUserRepository>,
    locations: Arc<MockLocationRepository>,
    shifts: Arc<MockShiftRepository>,
    attendances: Arc<MockAttendanceRepository>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            users: Arc::new(MockUserRepository::default()),
            locations: Arc::new(MockLocationRepository::new()),
            shifts: Arc::new(MockShiftRepository::new()),
            attendances: Arc::new(MockAttendanceRepository::new()),
        }
    }

    /// Employee assigned to a 100 m office and an 08:00 shift with 15 minutes tolerance
    async fn office_worker(&self) -> User {
        let user = self
            .users
            .create(new_user("Ayu", "ayu@example.com", UserRole::Employee))
            .await
            .unwrap();
        let location = self
            .locations
            .create(NewLocation {
                name: "Jakarta HQ".to_string(),
                address: None,
                latitude: OFFICE.0,
                longitude: OFFICE.1,
                radius_meters: 100,
            })
            .await
            .unwrap();
        let shift = self
            .shifts
            .create(NewShift {
                name: "Morning".to_string(),
                start_time: time!(08:00),
                end_time: time!(17:00),
                late_tolerance_minutes: 15,
            })
            .await
            .unwrap();

        self.users
            .update(
                user.id,
                UpdateUser {
                    location_id: Some(location.id),
                    shift_id: Some(shift.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap()
    }

    fn check_in(&self) -> CheckInUseCase {
        CheckInUseCase::new(
            self.users.clone(),
            self.locations.clone(),
            self.shifts.clone(),
            self.attendances.clone(),
            offset!(+7),
        )
    }

    fn check_out(&self) -> CheckOutUseCase {
        CheckOutUseCase::new(
            self.users.clone(),
            self.locations.clone(),
            self.attendances.clone(),
            offset!(+7),
        )
    }
}

fn at(latitude: f64, longitude: f64) -> AttendanceRequest {
    AttendanceRequest {
        latitude: Some(latitude),
        longitude: Some(longitude),
        note: None,
    }
}

fn at_office() -> AttendanceRequest {
    at(OFFICE.0, OFFICE.1)
}

async fn check_in_at(f: &Fixture, user: &User, when: OffsetDateTime) -> AttendanceStatus {
    f.check_in()
        .execute_at(user.id, at_office(), when)
        .await
        .unwrap()
        .status
}

#[tokio::test]
async fn test_full_working_day() {
    let f = Fixture::new();
    let user = f.office_worker().await;

    // 08:10 local, inside the tolerance
    let checked_in = f
        .check_in()
        .execute_at(user.id, at_office(), datetime!(2025-03-10 01:10 UTC))
        .await
        .unwrap();
    assert_eq!(checked_in.status, AttendanceStatus::Present);
    assert_eq!(checked_in.work_date, date!(2025 - 03 - 10));
    assert!(checked_in.check_out_at.is_none());

    let checked_out = f
        .check_out()
        .execute_at(user.id, at_office(), datetime!(2025-03-10 10:05 UTC))
        .await
        .unwrap();
    assert_eq!(checked_out.id, checked_in.id);
    assert_eq!(checked_out.check_out_at, Some(datetime!(2025-03-10 10:05 UTC)));
    assert!(checked_out.check_out_location.is_some());

    let again = f
        .check_out()
        .execute_at(user.id, at_office(), datetime!(2025-03-10 10:30 UTC))
        .await;
    assert!(matches!(again, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_late_boundary() {
    let f = Fixture::new();
    let user = f.office_worker().await;

    // Exactly 08:15 local is still on time
    assert_eq!(
        check_in_at(&f, &user, datetime!(2025-03-10 01:15 UTC)).await,
        AttendanceStatus::Present
    );
    // 08:16 local the next day is late
    assert_eq!(
        check_in_at(&f, &user, datetime!(2025-03-11 01:16 UTC)).await,
        AttendanceStatus::Late
    );
}

#[tokio::test]
async fn test_geofence_rejects_outside_radius() {
    let f = Fixture::new();
    let user = f.office_worker().await;
    let when = datetime!(2025-03-10 01:00 UTC);

    // Roughly 1.1 km north of the office
    let outside = f
        .check_in()
        .execute_at(user.id, at(-6.1988, 106.8456), when)
        .await;
    assert!(matches!(outside, Err(AppError::ValidationError(_))));

    let missing = f
        .check_in()
        .execute_at(user.id, AttendanceRequest::default(), when)
        .await;
    assert!(matches!(missing, Err(AppError::ValidationError(_))));

    // Rejected attempts leave no row, so a valid check-in still succeeds
    f.check_in()
        .execute_at(user.id, at_office(), when)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_check_out_geofence_and_missing_check_in() {
    let f = Fixture::new();
    let user = f.office_worker().await;

    let before = f
        .check_out()
        .execute_at(user.id, at_office(), datetime!(2025-03-10 10:00 UTC))
        .await;
    assert!(matches!(before, Err(AppError::NotFound(_))));

    check_in_at(&f, &user, datetime!(2025-03-10 01:00 UTC)).await;
    let outside = f
        .check_out()
        .execute_at(user.id, at(-6.1988, 106.8456), datetime!(2025-03-10 10:00 UTC))
        .await;
    assert!(matches!(outside, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn test_unassigned_employee_needs_no_coordinates() {
    let f = Fixture::new();
    let user = f
        .users
        .create(new_user("Rudi", "rudi@example.com", UserRole::Employee))
        .await
        .unwrap();

    let attendance = f
        .check_in()
        .execute_at(
            user.id,
            AttendanceRequest::default(),
            datetime!(2025-03-10 05:00 UTC),
        )
        .await
        .unwrap();
    assert_eq!(attendance.status, AttendanceStatus::Present);
    assert!(attendance.check_in_location.is_none());
}

#[tokio::test]
async fn test_deactivated_employee_cannot_check_in() {
    let f = Fixture::new();
    let user = f.office_worker().await;
    f.users
        .update(
            user.id,
            UpdateUser {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let result = f
        .check_in()
        .execute_at(user.id, at_office(), datetime!(2025-03-10 01:00 UTC))
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn test_history_and_report() {
    let f = Fixture::new();
    let user = f.office_worker().await;
    check_in_at(&f, &user, datetime!(2025-03-10 01:00 UTC)).await;
    check_in_at(&f, &user, datetime!(2025-03-11 02:00 UTC)).await;
    check_in_at(&f, &user, datetime!(2025-03-12 01:05 UTC)).await;

    let history = AttendanceHistoryUseCase::new(f.attendances.clone())
        .execute(user.id, AttendanceHistoryRequest::default())
        .await
        .unwrap();
    assert_eq!(history.total, 3);
    assert_eq!(
        history.items[0].attendance.work_date,
        date!(2025 - 03 - 12)
    );

    let report = ListAttendanceUseCase::new(f.attendances.clone());
    let late = report
        .execute(ListAttendanceRequest {
            filter: AttendanceFilterParams {
                status: Some(AttendanceStatus::Late),
                ..Default::default()
            },
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(late.total, 1);
    assert_eq!(late.items[0].attendance.work_date, date!(2025 - 03 - 11));

    let window = report
        .execute(ListAttendanceRequest {
            filter: AttendanceFilterParams {
                date_from: Some("2025-03-11".to_string()),
                date_to: Some("2025-03-12".to_string()),
                ..Default::default()
            },
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(window.total, 2);

    let reversed = report
        .execute(ListAttendanceRequest {
            filter: AttendanceFilterParams {
                date_from: Some("2025-03-12".to_string()),
                date_to: Some("2025-03-11".to_string()),
                ..Default::default()
            },
            ..Default::default()
        })
        .await;
    assert!(matches!(reversed, Err(AppError::ValidationError(_))));
}
