pub mod account;
pub mod profile;
pub mod project;
pub mod sqlx_repo;
pub mod token;
