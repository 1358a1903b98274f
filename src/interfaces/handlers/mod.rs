pub mod auth;
pub mod home;
pub mod json_error;
pub mod profiles;
pub mod projects;
pub mod system;
