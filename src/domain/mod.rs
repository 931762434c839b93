pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod departments;
pub mod devices;
pub mod leave;
pub mod locations;
pub mod notifications;
pub mod password;
pub mod positions;
pub mod push;
pub mod shifts;
pub mod users;
