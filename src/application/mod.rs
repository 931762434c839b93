pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod departments;
pub mod leave;
pub mod locations;
pub mod notifications;
pub mod positions;
pub mod shifts;
pub mod users;
