use crate::domain::leave::{
    LeaveFilter, LeaveRequest, LeaveRequestRepository, LeaveStatusChange, NewLeaveRequest,
};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::leave::{LEAVE_COLUMNS, LeaveRequestDbModel};
use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use time::Date;
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresLeaveRequestRepository {
    pool: DbPool,
}

impl PostgresLeaveRequestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &LeaveFilter) {
    if let Some(user_id) = filter.user_id {
        qb.push(" AND l.user_id = ").push_bind(user_id);
    }
    if let Some(department_id) = filter.department_id {
        qb.push(" AND u.department_id = ").push_bind(department_id);
    }
    if let Some(status) = filter.status {
        qb.push(" AND l.status = ").push_bind(status.as_str());
    }
}

#[async_trait]
impl LeaveRequestRepository for PostgresLeaveRequestRepository {
    #[tracing::instrument(skip(self, new_request), fields(user_id = %new_request.user_id))]
    async fn create(&self, new_request: NewLeaveRequest) -> Result<LeaveRequest, anyhow::Error> {
        let request = sqlx::query_as::<_, LeaveRequestDbModel>(&format!(
            r#"
            INSERT INTO leave_requests AS l (user_id, leave_type, start_date, end_date, reason)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            LEAVE_COLUMNS
        ))
        .bind(new_request.user_id)
        .bind(new_request.leave_type.as_str())
        .bind(new_request.start_date)
        .bind(new_request.end_date)
        .bind(new_request.reason)
        .fetch_one(&self.pool)
        .await?;

        request.try_into()
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<LeaveRequest>, anyhow::Error> {
        let request = sqlx::query_as::<_, LeaveRequestDbModel>(&format!(
            "SELECT {} FROM leave_requests l WHERE l.id = $1",
            LEAVE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        request.map(TryInto::try_into).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn find_overlapping(
        &self,
        user_id: Uuid,
        start: Date,
        end: Date,
    ) -> Result<Vec<LeaveRequest>, anyhow::Error> {
        let requests = sqlx::query_as::<_, LeaveRequestDbModel>(&format!(
            r#"
            SELECT {} FROM leave_requests l
            WHERE l.user_id = $1
              AND l.status IN ('pending', 'approved')
              AND l.start_date <= $3
              AND l.end_date >= $2
            ORDER BY l.start_date ASC
            "#,
            LEAVE_COLUMNS
        ))
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        requests.into_iter().map(TryInto::try_into).collect()
    }

    #[tracing::instrument(skip(self, change), fields(status = %change.status))]
    async fn transition_from_pending(
        &self,
        id: Uuid,
        change: LeaveStatusChange,
    ) -> Result<Option<LeaveRequest>, anyhow::Error> {
        // The status guard makes concurrent reviews race-safe: only one wins
        let request = sqlx::query_as::<_, LeaveRequestDbModel>(&format!(
            r#"
            UPDATE leave_requests AS l SET
                status = $2,
                reviewed_by = $3,
                reviewed_at = CASE WHEN $3::UUID IS NULL THEN NULL ELSE NOW() END,
                review_note = $4,
                updated_at = NOW()
            WHERE l.id = $1 AND l.status = 'pending'
            RETURNING {}
            "#,
            LEAVE_COLUMNS
        ))
        .bind(id)
        .bind(change.status.as_str())
        .bind(change.reviewed_by)
        .bind(change.review_note)
        .fetch_optional(&self.pool)
        .await?;

        request.map(TryInto::try_into).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(
        &self,
        filter: &LeaveFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LeaveRequest>, anyhow::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM leave_requests l JOIN users u ON u.id = l.user_id WHERE 1 = 1",
            LEAVE_COLUMNS
        ));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY l.created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let requests = qb
            .build_query_as::<LeaveRequestDbModel>()
            .fetch_all(&self.pool)
            .await?;

        requests.into_iter().map(TryInto::try_into).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self, filter: &LeaveFilter) -> Result<i64, anyhow::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM leave_requests l JOIN users u ON u.id = l.user_id WHERE 1 = 1",
        );
        push_filter(&mut qb, filter);

        let (count,): (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;
        Ok(count)
    }
}
