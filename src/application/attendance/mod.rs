pub mod check_in;
pub mod check_out;
pub mod history;
pub mod list;

use crate::domain::attendance::Coordinates;
use crate::domain::locations::LocationRepository;
use crate::domain::users::User;
use crate::shared::error::AppError;
use std::sync::Arc;

/// Both halves of a coordinate pair must be given together
pub(crate) fn coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<Coordinates>, AppError> {
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Ok(Some(Coordinates {
            latitude,
            longitude,
        })),
        (None, None) => Ok(None),
        _ => Err(AppError::ValidationError(
            "latitude and longitude must be sent together".to_string(),
        )),
    }
}

/// Enforces the geofence of the user's assigned location, if any
pub(crate) async fn check_geofence(
    locations: &Arc<dyn LocationRepository>,
    user: &User,
    position: Option<Coordinates>,
) -> Result<(), AppError> {
    let Some(location_id) = user.location_id else {
        return Ok(());
    };
    let Some(location) = locations.find_by_id(location_id).await? else {
        return Ok(());
    };

    let position = position.ok_or_else(|| {
        AppError::ValidationError("Coordinates are required at your work location".to_string())
    })?;

    if !location.contains(position.latitude, position.longitude) {
        let distance = location.distance_to(position.latitude, position.longitude);
        tracing::info!(
            user_id = %user.id,
            location_id = %location.id,
            distance = distance.round(),
            "Attendance rejected outside geofence"
        );
        return Err(AppError::ValidationError(format!(
            "You are {:.0} m from {}, the allowed radius is {} m",
            distance, location.name, location.radius_meters
        )));
    }

    Ok(())
}
