use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Work site with a circular attendance geofence
#[derive(Debug, Clone)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Location {
    pub fn distance_to(&self, latitude: f64, longitude: f64) -> f64 {
        haversine_distance(self.latitude, self.longitude, latitude, longitude)
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.distance_to(latitude, longitude) <= f64::from(self.radius_meters)
    }
}

/// Great-circle distance in meters between two WGS84 points
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * a.sqrt().asin()
}

#[derive(Debug, Clone)]
pub struct NewLocation {
    pub name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: i32,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateLocation {
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_meters: Option<i32>,
}

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn create(&self, new_location: NewLocation) -> Result<Location, anyhow::Error>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Location>, anyhow::Error>;
    async fn find_all(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Location>, anyhow::Error>;
    async fn count(&self, search: Option<&str>) -> Result<i64, anyhow::Error>;
    async fn update(
        &self,
        id: Uuid,
        update: UpdateLocation,
    ) -> Result<Option<Location>, anyhow::Error>;
    async fn delete(&self, id: Uuid) -> Result<bool, anyhow::Error>;
}
