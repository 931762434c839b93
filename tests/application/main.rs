#[path = "../common/mod.rs"]
#[macro_use]
pub mod common;

mod attendance_test;
mod auth_session_test;
mod leave_flow_test;
mod notification_dispatch_test;
