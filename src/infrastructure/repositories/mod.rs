pub mod attendance;
pub mod dashboard;
pub mod departments;
pub mod devices;
pub mod leave;
pub mod locations;
pub mod mock;
pub mod notifications;
pub mod positions;
pub mod refresh_tokens;
pub mod shifts;
pub mod templates;
pub mod users;
