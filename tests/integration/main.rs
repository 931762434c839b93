#[path = "../common/mod.rs"]
#[macro_use]
pub mod common;

mod access;
mod attendance;
mod auth;
mod health;
mod leave;
mod notifications;
mod organization;
