pub mod auth;
pub mod extractors;
pub mod profiles;
pub mod projects;
pub mod provisioning;
