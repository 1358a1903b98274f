pub mod account;
pub mod profile;
pub mod project;
pub mod token;
