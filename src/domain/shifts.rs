use async_trait::async_trait;
use time::{Duration, OffsetDateTime, Time};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Shift {
    pub id: Uuid,
    pub name: String,
    pub start_time: Time,
    pub end_time: Time,
    pub late_tolerance_minutes: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Shift {
    /// A check-in at `local_time` is late once the tolerance after `start_time` has passed
    pub fn is_late(&self, local_time: Time) -> bool {
        let tolerance = Duration::minutes(i64::from(self.late_tolerance_minutes.max(0)));
        let start_seconds = seconds_since_midnight(self.start_time);
        let cutoff = start_seconds + tolerance.whole_seconds();
        seconds_since_midnight(local_time) > cutoff
    }
}

fn seconds_since_midnight(t: Time) -> i64 {
    i64::from(t.hour()) * 3600 + i64::from(t.minute()) * 60 + i64::from(t.second())
}

#[derive(Debug, Clone)]
pub struct NewShift {
    pub name: String,
    pub start_time: Time,
    pub end_time: Time,
    pub late_tolerance_minutes: i32,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateShift {
    pub name: Option<String>,
    pub start_time: Option<Time>,
    pub end_time: Option<Time>,
    pub late_tolerance_minutes: Option<i32>,
}

#[async_trait]
pub trait ShiftRepository: Send + Sync {
    async fn create(&self, new_shift: NewShift) -> Result<Shift, anyhow::Error>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Shift>, anyhow::Error>;
    async fn find_all(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Shift>, anyhow::Error>;
    async fn count(&self, search: Option<&str>) -> Result<i64, anyhow::Error>;
    async fn update(&self, id: Uuid, update: UpdateShift) -> Result<Option<Shift>, anyhow::Error>;
    async fn delete(&self, id: Uuid) -> Result<bool, anyhow::Error>;
}
