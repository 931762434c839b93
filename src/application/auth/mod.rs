pub mod change_password;
pub mod login;
pub mod logout;
pub mod mobile_login;
pub mod purge;
pub mod refresh;
pub mod token_utils;
