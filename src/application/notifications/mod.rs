pub mod devices;
pub mod dispatch;
pub mod inbox;
pub mod send;
pub mod templates;

/// Event codes raised by the leave workflow
pub mod events {
    pub const LEAVE_SUBMITTED: &str = "LEAVE_SUBMITTED";
    pub const LEAVE_APPROVED: &str = "LEAVE_APPROVED";
    pub const LEAVE_REJECTED: &str = "LEAVE_REJECTED";
}
