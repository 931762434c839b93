use crate::domain::attendance::{
    Attendance, AttendanceFilter, AttendanceRecord, AttendanceRepository, Coordinates,
    NewAttendance,
};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::attendance::{
    ATTENDANCE_COLUMNS, AttendanceDbModel, AttendanceRecordDbModel,
};
use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresAttendanceRepository {
    pool: DbPool,
}

impl PostgresAttendanceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const RECORD_FROM: &str = " FROM attendances a \
     JOIN users u ON u.id = a.user_id \
     LEFT JOIN departments d ON d.id = u.department_id \
     WHERE 1 = 1";

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &AttendanceFilter) {
    if let Some(date_from) = filter.date_from {
        qb.push(" AND a.work_date >= ").push_bind(date_from);
    }
    if let Some(date_to) = filter.date_to {
        qb.push(" AND a.work_date <= ").push_bind(date_to);
    }
    if let Some(user_id) = filter.user_id {
        qb.push(" AND a.user_id = ").push_bind(user_id);
    }
    if let Some(department_id) = filter.department_id {
        qb.push(" AND u.department_id = ").push_bind(department_id);
    }
    if let Some(status) = filter.status {
        qb.push(" AND a.status = ").push_bind(status.as_str());
    }
}

#[async_trait]
impl AttendanceRepository for PostgresAttendanceRepository {
    #[tracing::instrument(skip(self, new_attendance), fields(user_id = %new_attendance.user_id))]
    async fn create(&self, new_attendance: NewAttendance) -> Result<Attendance, anyhow::Error> {
        let location = new_attendance.check_in_location;
        let attendance = sqlx::query_as::<_, AttendanceDbModel>(&format!(
            r#"
            INSERT INTO attendances AS a (user_id, work_date, check_in_at,
                                          check_in_latitude, check_in_longitude, status, note)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            ATTENDANCE_COLUMNS
        ))
        .bind(new_attendance.user_id)
        .bind(new_attendance.work_date)
        .bind(new_attendance.check_in_at)
        .bind(location.map(|c| c.latitude))
        .bind(location.map(|c| c.longitude))
        .bind(new_attendance.status.as_str())
        .bind(new_attendance.note)
        .fetch_one(&self.pool)
        .await?;

        attendance.try_into()
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_user_and_date(
        &self,
        user_id: Uuid,
        work_date: Date,
    ) -> Result<Option<Attendance>, anyhow::Error> {
        let attendance = sqlx::query_as::<_, AttendanceDbModel>(&format!(
            "SELECT {} FROM attendances a WHERE a.user_id = $1 AND a.work_date = $2",
            ATTENDANCE_COLUMNS
        ))
        .bind(user_id)
        .bind(work_date)
        .fetch_optional(&self.pool)
        .await?;

        attendance.map(TryInto::try_into).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn check_out(
        &self,
        id: Uuid,
        at: OffsetDateTime,
        location: Option<Coordinates>,
    ) -> Result<Option<Attendance>, anyhow::Error> {
        // Only the first check-out sticks
        let attendance = sqlx::query_as::<_, AttendanceDbModel>(&format!(
            r#"
            UPDATE attendances AS a SET
                check_out_at = $2,
                check_out_latitude = $3,
                check_out_longitude = $4,
                updated_at = NOW()
            WHERE a.id = $1 AND a.check_out_at IS NULL
            RETURNING {}
            "#,
            ATTENDANCE_COLUMNS
        ))
        .bind(id)
        .bind(at)
        .bind(location.map(|c| c.latitude))
        .bind(location.map(|c| c.longitude))
        .fetch_optional(&self.pool)
        .await?;

        attendance.map(TryInto::try_into).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(
        &self,
        filter: &AttendanceFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AttendanceRecord>, anyhow::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {}, u.name AS employee_name, u.department_id AS department_id, \
             d.name AS department_name{}",
            ATTENDANCE_COLUMNS, RECORD_FROM
        ));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY a.work_date DESC, a.check_in_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let records = qb
            .build_query_as::<AttendanceRecordDbModel>()
            .fetch_all(&self.pool)
            .await?;

        records.into_iter().map(TryInto::try_into).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self, filter: &AttendanceFilter) -> Result<i64, anyhow::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*){}", RECORD_FROM));
        push_filter(&mut qb, filter);

        let (count,): (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;
        Ok(count)
    }
}
